//!# Device diagnostics
//! Decoded snapshots of the diagnosis registers. Decoding is pure, latched flags on the device are
//! only cleared by an explicit write (see [crate::driver::TLE92466ED::clear_faults]).
use crate::mode::OperatingMode;
use crate::registers::ChannelControlReg;
use serde::Serialize;

/// Fault flags of a critical fault reply frame
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CriticalFaults {
    pub internal_reset: bool,
    pub ground_loss: bool,
    pub reference_error: bool,
    pub over_temperature_shutdown: bool,
    pub clock_failure: bool,
    pub bandgap_error: bool,
    pub vdd_overvoltage: bool,
    pub vdd_undervoltage: bool,
}

impl CriticalFaults {
    pub(crate) fn from_register(register: u8) -> Self {
        Self {
            internal_reset: register & (1 << 7) != 0,
            ground_loss: register & (1 << 6) != 0,
            reference_error: register & (1 << 5) != 0,
            over_temperature_shutdown: register & (1 << 4) != 0,
            clock_failure: register & (1 << 3) != 0,
            bandgap_error: register & (1 << 2) != 0,
            vdd_overvoltage: register & (1 << 1) != 0,
            vdd_undervoltage: register & 1 != 0,
        }
    }

    pub(crate) fn as_register(&self) -> u8 {
        let mut register = 0x0;

        register |= (self.internal_reset as u8) << 7;
        register |= (self.ground_loss as u8) << 6;
        register |= (self.reference_error as u8) << 5;
        register |= (self.over_temperature_shutdown as u8) << 4;
        register |= (self.clock_failure as u8) << 3;
        register |= (self.bandgap_error as u8) << 2;
        register |= (self.vdd_overvoltage as u8) << 1;
        register |= self.vdd_undervoltage as u8;

        register
    }
}

/// Global device status read from CH_CTRL and GLOBAL_DIAG0..2
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    /// Operation mode reported by the device
    pub mode: OperatingMode,
    /// Enabled channels, bit n = channel n
    pub enabled_channels: u8,

    pub vbat_undervoltage: bool,
    pub vbat_overvoltage: bool,
    pub vio_undervoltage: bool,
    pub vio_overvoltage: bool,
    pub vdd_undervoltage: bool,
    pub vdd_overvoltage: bool,
    pub spi_watchdog_error: bool,
    pub clock_watchdog_error: bool,
    pub over_temperature_warning: bool,
    pub over_temperature_error: bool,
    /// Reset via RESN pin occurred since last clear
    pub reset_event: bool,
    /// Power-on reset occurred since last clear
    pub power_on_event: bool,

    /// Channels with at least one error flag, bit n = channel n
    pub channel_errors: u8,
    /// Channels with at least one warning flag
    pub channel_warnings: u8,

    pub register_ecc_error: bool,
    pub otp_ecc_error: bool,
    /// OTP memory not programmed
    pub otp_virgin: bool,
}

impl DeviceStatus {
    pub(crate) fn from_registers(ctrl: u16, diag0: u16, diag1: u16, diag2: u16) -> Self {
        let ctrl = ChannelControlReg::from(ctrl);

        Self {
            mode: OperatingMode::from_register(ctrl),
            enabled_channels: ctrl.enable(),
            vbat_undervoltage: diag0 & 1 != 0,
            vbat_overvoltage: diag0 & (1 << 1) != 0,
            vio_undervoltage: diag0 & (1 << 2) != 0,
            vio_overvoltage: diag0 & (1 << 3) != 0,
            vdd_undervoltage: diag0 & (1 << 4) != 0,
            vdd_overvoltage: diag0 & (1 << 5) != 0,
            spi_watchdog_error: diag0 & (1 << 6) != 0,
            clock_watchdog_error: diag0 & (1 << 7) != 0,
            over_temperature_warning: diag0 & (1 << 8) != 0,
            over_temperature_error: diag0 & (1 << 9) != 0,
            reset_event: diag0 & (1 << 13) != 0,
            power_on_event: diag0 & (1 << 14) != 0,
            channel_errors: (diag1 & 0x3F) as u8,
            channel_warnings: ((diag1 >> 8) & 0x3F) as u8,
            register_ecc_error: diag2 & 1 != 0,
            otp_ecc_error: diag2 & (1 << 1) != 0,
            otp_virgin: diag2 & (1 << 2) != 0,
        }
    }

    /// True if any supply monitor reports a fault
    pub fn has_supply_fault(&self) -> bool {
        self.vbat_undervoltage
            || self.vbat_overvoltage
            || self.vio_undervoltage
            || self.vio_overvoltage
            || self.vdd_undervoltage
            || self.vdd_overvoltage
    }

    /// True if any error (not warning or event) is flagged
    pub fn has_fault(&self) -> bool {
        self.has_supply_fault()
            || self.spi_watchdog_error
            || self.clock_watchdog_error
            || self.over_temperature_error
            || self.channel_errors != 0
            || self.register_ecc_error
            || self.otp_ecc_error
    }
}

/// Diagnosis of a single channel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChannelDiagnostics {
    pub channel: u8,
    pub over_current: bool,
    pub short_to_ground: bool,
    pub open_load: bool,
    pub over_temperature: bool,
    /// Measured current deviates from the setpoint
    pub regulation_warning: bool,
}

impl ChannelDiagnostics {
    /// Decodes the channel bit out of the per-kind diagnosis registers
    /// DIAG_OC, DIAG_SG, DIAG_OL, DIAG_OT and DIAG_WARN (in this order)
    pub(crate) fn from_registers(channel: u8, registers: [u16; 5]) -> Self {
        let bit = 1 << channel;

        Self {
            channel,
            over_current: registers[0] & bit != 0,
            short_to_ground: registers[1] & bit != 0,
            open_load: registers[2] & bit != 0,
            over_temperature: registers[3] & bit != 0,
            regulation_warning: registers[4] & bit != 0,
        }
    }

    pub fn has_fault(&self) -> bool {
        self.over_current || self.short_to_ground || self.open_load || self.over_temperature
    }
}

/// Measured values of a single channel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChannelFeedback {
    pub channel: u8,
    /// Average current in mA
    pub average_current_ma: u16,
    /// Raw duty cycle, 0xFFFF = 100 %
    pub duty_cycle: u16,
}

impl ChannelFeedback {
    pub fn duty_cycle_percent(&self) -> f32 {
        self.duty_cycle as f32 * 100.0 / u16::MAX as f32
    }
}

/// IC identification read from ICVID
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChipInfo {
    pub ic_id: u8,
    pub version: u8,
}

impl ChipInfo {
    pub(crate) fn from_register(register: u16) -> Self {
        Self {
            ic_id: (register >> 8) as u8,
            version: register as u8,
        }
    }
}
