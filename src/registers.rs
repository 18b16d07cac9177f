//!# Register map
//! Central registers live at fixed addresses. Each of the six channels owns a register block
//! starting at `0x0100 + channel * 0x0020`.
//!
//! ```
//!# use tle92466ed::registers::*;
//!#
//! assert_eq!(0x0100, channel_register(0, CHANNEL_SETPOINT));
//! assert_eq!(0x01A2, channel_register(5, CHANNEL_PERIOD));
//! ```
#![allow(unused_braces)]
use modular_bitfield_msb::prelude::*;

/// Register addresses are 10 bits wide
pub const ADDRESS_MASK: u16 = 0x03FF;

/// Channel control and operation mode
pub const REGISTER_CH_CTRL: u16 = 0x0000;
/// Supply, watchdog and CRC configuration
pub const REGISTER_GLOBAL_CONFIG: u16 = 0x0002;
/// Supply, temperature and watchdog diagnosis
pub const REGISTER_GLOBAL_DIAG0: u16 = 0x0003;
/// Channel error/warning summary
pub const REGISTER_GLOBAL_DIAG1: u16 = 0x0004;
/// Internal memory diagnosis
pub const REGISTER_GLOBAL_DIAG2: u16 = 0x0005;
/// VBAT under- and over-voltage thresholds
pub const REGISTER_VBAT_TH: u16 = 0x0006;
pub const REGISTER_FB_FRZ: u16 = 0x0007;
pub const REGISTER_FB_UPD: u16 = 0x0008;
/// SPI watchdog reload
pub const REGISTER_WD_RELOAD: u16 = 0x0009;
/// Over-current flags, bit n = channel n
pub const REGISTER_DIAG_OC: u16 = 0x0010;
/// Short to ground flags
pub const REGISTER_DIAG_SG: u16 = 0x0011;
/// Open load flags
pub const REGISTER_DIAG_OL: u16 = 0x0012;
/// Channel over-temperature flags
pub const REGISTER_DIAG_OT: u16 = 0x0013;
/// Current regulation warning flags
pub const REGISTER_DIAG_WARN: u16 = 0x0014;
pub const REGISTER_FAULT_MASK0: u16 = 0x0018;
pub const REGISTER_FAULT_MASK1: u16 = 0x0019;
pub const REGISTER_FAULT_MASK2: u16 = 0x001A;
/// IC identifier and version
pub const REGISTER_ICVID: u16 = 0x0200;
pub const REGISTER_CHIPID0: u16 = 0x0201;
pub const REGISTER_CHIPID1: u16 = 0x0202;
pub const REGISTER_CHIPID2: u16 = 0x0203;

/// Address of the channel 0 register block
pub const CHANNEL_BLOCK_BASE: u16 = 0x0100;
/// Distance between two channel blocks
pub const CHANNEL_BLOCK_STRIDE: u16 = 0x0020;

pub const CHANNEL_SETPOINT: u16 = 0x00;
pub const CHANNEL_CTRL: u16 = 0x01;
pub const CHANNEL_PERIOD: u16 = 0x02;
pub const CHANNEL_INT_LIMIT: u16 = 0x03;
pub const CHANNEL_DITHER_CLK_DIV: u16 = 0x04;
pub const CHANNEL_DITHER_STEP: u16 = 0x05;
pub const CHANNEL_DITHER_CTRL: u16 = 0x06;
pub const CHANNEL_CONFIG: u16 = 0x07;
pub const CHANNEL_MODE: u16 = 0x0C;
/// Direct drive on-time
pub const CHANNEL_TON: u16 = 0x0D;
/// Duty cycle feedback
pub const CHANNEL_FB_DC: u16 = 0x10;
pub const CHANNEL_FB_VBAT: u16 = 0x11;
/// Average current feedback
pub const CHANNEL_FB_I_AVG: u16 = 0x12;
pub const CHANNEL_FB_IMIN_IMAX: u16 = 0x13;

/// Returns the address of a register inside the block of the given channel
pub fn channel_register(channel: u8, offset: u16) -> u16 {
    (CHANNEL_BLOCK_BASE + channel as u16 * CHANNEL_BLOCK_STRIDE + offset) & ADDRESS_MASK
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Central channel control register (CH_CTRL)
pub struct ChannelControlReg {
    /// Operation mode, set in mission mode
    pub op_mode: bool,
    #[skip]
    __: B4,
    /// Channels 4 and 5 in parallel
    pub par_4_5: bool,
    /// Channels 1 and 2 in parallel
    pub par_1_2: bool,
    /// Channels 0 and 3 in parallel
    pub par_0_3: bool,
    #[skip]
    reserved: B2,
    /// Enable bits, bit n = channel n
    pub enable: B6,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Global configuration register (GLOBAL_CONFIG)
pub struct GlobalConfigReg {
    /// Swap of VBAT under-/over-voltage fault reaction
    pub uv_ov_swap: bool,
    /// VIO supply is 5 V instead of 3.3 V
    pub vio_5v: bool,
    #[skip]
    __: B11,
    /// CRC check of received frames
    pub crc_en: bool,
    /// SPI watchdog enable
    pub spi_wd_en: bool,
    /// Clock watchdog enable
    pub clk_wd_en: bool,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Channel current setpoint register (SETPOINT)
pub struct SetpointReg {
    /// Disables the automatic limit of the setpoint
    pub auto_limit_disable: bool,
    /// Current target in 1/32767 of full scale
    pub target: B15,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Current regulator gains (CTRL)
pub struct RegulationReg {
    #[skip]
    __: B2,
    /// Integral gain
    pub ki: B6,
    #[skip]
    reserved: B2,
    /// Proportional gain
    pub kp: B6,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// PWM period (PERIOD) and direct drive on-time (TON) encoding
pub struct PeriodReg {
    #[skip]
    __: B4,
    /// Additional divide by 8
    pub low_freq: bool,
    pub exponent: B3,
    pub mantissa: B8,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Dither reference clock divider (DITHER_CLK_DIV)
pub struct DitherClockReg {
    #[skip]
    __: B4,
    pub divider: B12,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Dither current step (DITHER_STEP)
pub struct DitherStepReg {
    #[skip]
    __: B4,
    pub step_size: B12,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Dither shape (DITHER_CTRL)
pub struct DitherCtrlReg {
    /// Number of steps of one ramp
    pub num_steps: B8,
    /// Number of flat steps at top and bottom
    pub flat_steps: B8,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Channel configuration (CH_CONFIG)
pub struct ChannelConfigReg {
    #[skip]
    __: B5,
    /// Open load detection threshold
    pub ol_threshold: B3,
    #[skip]
    reserved_0: B2,
    /// Diagnostic pull-down current
    pub diag_current: B2,
    #[skip]
    reserved_1: B2,
    /// Output slew rate
    pub slew_rate: B2,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// Channel operation mode selector (MODE)
pub struct ModeReg {
    #[skip]
    __: B12,
    pub mode: B4,
}

#[bitfield]
#[derive(Default, Copy, Clone)]
#[repr(u16)]
/// VBAT monitoring thresholds (VBAT_TH)
pub struct VbatThresholdReg {
    pub ov_threshold: B8,
    pub uv_threshold: B8,
}
