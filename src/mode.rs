//!# Operating modes
//! The device is either in config mode or in mission mode. Configuration of channels is only
//! accepted in config mode, while channels can only be switched on and regulated in mission mode.
//!
//! ```
//!# use tle92466ed::mode::{GuardedOperation, ModeController, OperatingMode};
//!#
//! let mut controller = ModeController::default();
//! assert_eq!(OperatingMode::Config, controller.mode());
//! assert!(!controller.permits(GuardedOperation::ChannelEnable));
//!
//! controller.set_mode(OperatingMode::Mission);
//! assert!(controller.permits(GuardedOperation::SetpointChange));
//! assert!(!controller.permits(GuardedOperation::DitherConfiguration));
//! ```
use crate::registers::ChannelControlReg;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OperatingMode {
    /// Channels are off, configuration registers are writable
    #[default]
    Config,
    /// Channels may be enabled and regulated
    Mission,
}

impl OperatingMode {
    pub(crate) fn from_register(register: ChannelControlReg) -> Self {
        if register.op_mode() {
            Self::Mission
        } else {
            Self::Config
        }
    }
}

/// Operations restricted to a single operating mode
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuardedOperation {
    ChannelEnable,
    SetpointChange,
    ChannelModeChange,
    ParallelConfiguration,
    PwmConfiguration,
    DitherConfiguration,
    ChannelConfiguration,
    RegulationConfiguration,
    OnTimeConfiguration,
    FaultMaskConfiguration,
}

impl GuardedOperation {
    /// Mode in which the operation is accepted
    pub fn required_mode(self) -> OperatingMode {
        match self {
            Self::ChannelEnable | Self::SetpointChange => OperatingMode::Mission,
            _ => OperatingMode::Config,
        }
    }
}

/// Result of a mode change
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: OperatingMode,
    pub to: OperatingMode,
}

impl Transition {
    /// Leaving mission mode switches off all outputs on the device
    pub fn disables_channels(&self) -> bool {
        self.from == OperatingMode::Mission && self.to == OperatingMode::Config
    }
}

/// Local mirror of the device operating mode
#[derive(Copy, Clone, Debug, Default)]
pub struct ModeController {
    mode: OperatingMode,
}

impl ModeController {
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// True if the operation is accepted in the current mode
    pub fn permits(&self, operation: GuardedOperation) -> bool {
        operation.required_mode() == self.mode
    }

    /// Records a mode change, to be called once the control register write succeeded
    pub fn set_mode(&mut self, mode: OperatingMode) -> Transition {
        let transition = Transition { from: self.mode, to: mode };
        self.mode = mode;

        transition
    }
}
