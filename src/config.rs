use crate::registers::{ChannelConfigReg, GlobalConfigReg, RegulationReg};

/// Largest value of the regulator gain fields
pub const MAX_REGULATOR_GAIN: u8 = 0x3F;

/// Entire configuration applied during initialization
#[derive(Copy, Clone, Debug)]
pub struct Configuration {
    pub global: GlobalConfiguration,

    /// Compare the IC identifier against [crate::driver::EXPECTED_IC_ID]
    pub check_device_id: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            global: GlobalConfiguration::default(),
            check_device_id: true,
        }
    }
}

/// Global device configuration (GLOBAL_CONFIG)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlobalConfiguration {
    /// Device checks CRC of received frames, driver checks CRC of replies
    pub crc_enabled: bool,

    /// SPI watchdog, has to be reloaded via [crate::driver::TLE92466ED::reload_watchdog]
    pub spi_watchdog: bool,

    /// Clock watchdog
    pub clock_watchdog: bool,

    /// VIO supply is 5 V instead of 3.3 V
    pub vio_5v: bool,

    /// Swap VBAT under- and over-voltage reaction
    pub uv_ov_swap: bool,
}

impl Default for GlobalConfiguration {
    fn default() -> Self {
        Self {
            crc_enabled: true,
            spi_watchdog: true,
            clock_watchdog: true,
            vio_5v: false,
            uv_ov_swap: false,
        }
    }
}

impl GlobalConfiguration {
    /// Maps register values to configuration
    pub(crate) fn from_register(register: u16) -> Self {
        let register = GlobalConfigReg::from(register);

        Self {
            crc_enabled: register.crc_en(),
            spi_watchdog: register.spi_wd_en(),
            clock_watchdog: register.clk_wd_en(),
            vio_5v: register.vio_5v(),
            uv_ov_swap: register.uv_ov_swap(),
        }
    }

    /// Encodes the configuration to register value
    pub(crate) fn as_register(&self) -> u16 {
        GlobalConfigReg::new()
            .with_crc_en(self.crc_enabled)
            .with_spi_wd_en(self.spi_watchdog)
            .with_clk_wd_en(self.clock_watchdog)
            .with_vio_5v(self.vio_5v)
            .with_uv_ov_swap(self.uv_ov_swap)
            .into()
    }
}

/// Output slew rate
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SlewRate {
    OneVoltPerUs = 0b00,
    #[default]
    TwoAndHalfVoltPerUs = 0b01,
    FiveVoltPerUs = 0b10,
    TenVoltPerUs = 0b11,
}

impl SlewRate {
    /// Maps register values to configuration
    pub(crate) fn from_register(register: u8) -> Self {
        match register & 0b11 {
            0b00 => Self::OneVoltPerUs,
            0b01 => Self::TwoAndHalfVoltPerUs,
            0b10 => Self::FiveVoltPerUs,
            _ => Self::TenVoltPerUs,
        }
    }
}

/// Pull-down current used for off-state diagnosis
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DiagnosticCurrent {
    Off = 0b00,
    #[default]
    Current80uA = 0b01,
    Current190uA = 0b10,
    Current400uA = 0b11,
}

impl DiagnosticCurrent {
    /// Maps register values to configuration
    pub(crate) fn from_register(register: u8) -> Self {
        match register & 0b11 {
            0b00 => Self::Off,
            0b01 => Self::Current80uA,
            0b10 => Self::Current190uA,
            _ => Self::Current400uA,
        }
    }
}

/// Output stage configuration of a channel (CH_CONFIG)
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ChannelConfiguration {
    pub slew_rate: SlewRate,

    pub diag_current: DiagnosticCurrent,

    /// Open load threshold in eighths of the setpoint (1-7), 0 disables detection
    pub open_load_threshold: u8,
}

impl ChannelConfiguration {
    /// Maps register values to configuration
    pub(crate) fn from_register(register: u16) -> Self {
        let register = ChannelConfigReg::from(register);

        Self {
            slew_rate: SlewRate::from_register(register.slew_rate()),
            diag_current: DiagnosticCurrent::from_register(register.diag_current()),
            open_load_threshold: register.ol_threshold(),
        }
    }

    /// Encodes the configuration to register value, the open load threshold is limited to 7
    pub(crate) fn as_register(&self) -> u16 {
        ChannelConfigReg::new()
            .with_slew_rate(self.slew_rate as u8)
            .with_diag_current(self.diag_current as u8)
            .with_ol_threshold(self.open_load_threshold.min(7))
            .into()
    }
}

/// Current regulator of a channel in ICC mode (CTRL and INT_LIMIT)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegulationConfiguration {
    /// Proportional gain (0-63)
    pub proportional_gain: u8,

    /// Integral gain (0-63)
    pub integral_gain: u8,

    /// Limit of the integrator, same unit as the setpoint target
    pub integrator_limit: u16,
}

impl Default for RegulationConfiguration {
    fn default() -> Self {
        Self {
            proportional_gain: 0x10,
            integral_gain: 0x08,
            integrator_limit: 0x7FFF,
        }
    }
}

impl RegulationConfiguration {
    /// True if all fields fit into their registers
    pub fn is_valid(&self) -> bool {
        self.proportional_gain <= MAX_REGULATOR_GAIN && self.integral_gain <= MAX_REGULATOR_GAIN
    }

    /// Encodes the gains to the CTRL register value
    pub(crate) fn as_register(&self) -> u16 {
        RegulationReg::new()
            .with_kp(self.proportional_gain & MAX_REGULATOR_GAIN)
            .with_ki(self.integral_gain & MAX_REGULATOR_GAIN)
            .into()
    }
}

/// Masks of the FAULTN pin, set bits suppress the fault indication
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FaultMasks {
    /// Channel faults, bit n = channel n (FAULT_MASK0)
    pub channels: u8,

    /// Supply faults, same layout as GLOBAL_DIAG0 (FAULT_MASK1)
    pub supply: u16,

    /// Internal faults, same layout as GLOBAL_DIAG2 (FAULT_MASK2)
    pub internal: u16,
}

impl FaultMasks {
    /// Register values of FAULT_MASK0..2
    pub(crate) fn as_registers(&self) -> [u16; 3] {
        [(self.channels & 0x3F) as u16, self.supply, self.internal]
    }
}
