//!# Channels
//! The device drives six low-side outputs. Channels 0/3, 1/2 and 4/5 may be paired to double the
//! current capability.
use crate::calc::target_to_current_ma;
use serde::Serialize;

/// Number of output channels
pub const CHANNEL_COUNT: usize = 6;

/// Channel operation mode selected by the MODE register
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum ChannelMode {
    #[default]
    Off = 0x0,
    /// Integrated current control
    ICC = 0x1,
    /// Output controlled by SPI on-time
    DirectDriveSPI = 0x2,
    /// Output follows the DRV0 pin
    DirectDriveDRV0 = 0x3,
    /// Output follows the DRV1 pin
    DirectDriveDRV1 = 0x4,
    /// Free running current measurement
    FreeRunMeasurement = 0x5,
}

impl ChannelMode {
    pub(crate) fn from_register(register: u8) -> Self {
        match register & 0xF {
            0x1 => Self::ICC,
            0x2 => Self::DirectDriveSPI,
            0x3 => Self::DirectDriveDRV0,
            0x4 => Self::DirectDriveDRV1,
            0x5 => Self::FreeRunMeasurement,
            _ => Self::Off,
        }
    }
}

/// Fixed channel pairs for parallel operation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ParallelPair {
    Ch0Ch3,
    Ch1Ch2,
    Ch4Ch5,
}

impl ParallelPair {
    pub const ALL: [ParallelPair; 3] = [Self::Ch0Ch3, Self::Ch1Ch2, Self::Ch4Ch5];

    /// Channels of the pair, primary channel first
    pub fn channels(self) -> [u8; 2] {
        match self {
            Self::Ch0Ch3 => [0, 3],
            Self::Ch1Ch2 => [1, 2],
            Self::Ch4Ch5 => [4, 5],
        }
    }

    /// Returns the pair the channel may belong to
    pub fn of(channel: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|pair| pair.channels().contains(&channel))
    }
}

/// Locally cached state of one channel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChannelState {
    pub enabled: bool,
    pub mode: ChannelMode,
    /// Setpoint target, 0..=32767
    pub setpoint: u16,
    /// Active parallel pairing
    pub parallel: Option<ParallelPair>,
}

impl ChannelState {
    /// Setpoint in mA, scaled according to the parallel configuration
    pub fn setpoint_ma(&self) -> u16 {
        target_to_current_ma(self.setpoint, self.parallel.is_some())
    }
}
