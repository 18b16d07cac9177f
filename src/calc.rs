//!# Unit conversions
//! Pure conversions between engineering units and register encodings. All functions saturate at the
//! limits of the register fields, callers are expected to validate the input range first
//! (see the `*_in_range` helpers).
//!
//! ```
//!# use tle92466ed::calc::*;
//!#
//! // 1 A on a single channel is half of the 2 A full scale
//! assert_eq!(16384, setpoint_to_target(1000, false));
//! assert_eq!(1000, target_to_current_ma(16384, false));
//!
//! // 1 kHz PWM
//! let period = period_from_microseconds(1000.0);
//! assert_eq!((250, 5, false), (period.mantissa, period.exponent, period.low_freq));
//! ```

/// Full scale current of a single channel in mA
pub const MAX_CURRENT_MA: u16 = 2000;

/// Full scale current of two channels in parallel in mA
pub const MAX_CURRENT_PARALLEL_MA: u16 = 4000;

/// Largest setpoint register value
pub const MAX_TARGET: u16 = 0x7FFF;

/// Resolution of the period encoding in µs
pub const PERIOD_BASE_US: f32 = 0.125;

/// Shortest encodable period in µs
pub const PERIOD_MIN_US: f32 = 0.125;

/// Longest encodable period in µs (mantissa 255, exponent 7, low frequency range)
pub const PERIOD_MAX_US: f32 = 32640.0;

const LOW_FREQ_FACTOR: f32 = 8.0;

/// Internal clock in MHz
pub const SYSTEM_CLOCK_MHZ: u16 = 8;

/// Divider of the dither reference clock
pub const DITHER_CLOCK_DIVIDER: u16 = 80;

/// Largest step size of the 12 bit DITHER_STEP field
pub const MAX_DITHER_STEP: u16 = 0x0FFF;

const MAX_DITHER_STEPS: u32 = 255;

/// Largest VBAT threshold in V
pub const VBAT_MAX_V: f32 = 41.4;

/// VBAT threshold resolution in V per LSB
pub const VBAT_LSB_V: f32 = 0.16208;

/// Full scale current in mA for the given parallel setting
pub fn max_current_ma(parallel: bool) -> u16 {
    if parallel {
        MAX_CURRENT_PARALLEL_MA
    } else {
        MAX_CURRENT_MA
    }
}

/// Converts a current in mA to the setpoint target. Saturates at [MAX_TARGET].
pub fn setpoint_to_target(current_ma: u16, parallel: bool) -> u16 {
    let max = max_current_ma(parallel) as u32;
    let target = (current_ma as u32 * MAX_TARGET as u32 + max / 2) / max;

    target.min(MAX_TARGET as u32) as u16
}

/// Converts a setpoint target (or average current feedback) to mA, rounded to the nearest mA
pub fn target_to_current_ma(target: u16, parallel: bool) -> u16 {
    let max = max_current_ma(parallel) as u32;
    let target = target.min(MAX_TARGET) as u32;

    ((target * max + MAX_TARGET as u32 / 2) / MAX_TARGET as u32) as u16
}

/// Encoded PWM period or direct drive on-time
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PwmPeriod {
    pub mantissa: u8,
    pub exponent: u8,
    /// Divisor multiplied by 8
    pub low_freq: bool,
}

impl PwmPeriod {
    /// Decoded period in µs
    pub fn microseconds(&self) -> f32 {
        self.mantissa as f32 * Self::divisor(self.exponent, self.low_freq)
    }

    fn divisor(exponent: u8, low_freq: bool) -> f32 {
        let divisor = (1u32 << exponent) as f32 * PERIOD_BASE_US;

        if low_freq {
            divisor * LOW_FREQ_FACTOR
        } else {
            divisor
        }
    }
}

/// True if the period can be encoded
pub fn period_in_range(period_us: f32) -> bool {
    period_us.is_finite() && (PERIOD_MIN_US..=PERIOD_MAX_US).contains(&period_us)
}

/// Encodes a period in µs. The smallest exponent of the standard range is preferred, the
/// low frequency range is only used if no standard encoding exists.
pub fn period_from_microseconds(period_us: f32) -> PwmPeriod {
    for low_freq in [false, true] {
        for exponent in 0..8 {
            let mantissa = round(period_us / PwmPeriod::divisor(exponent, low_freq));

            if (1..=255).contains(&mantissa) {
                return PwmPeriod {
                    mantissa: mantissa as u8,
                    exponent,
                    low_freq,
                };
            }
        }
    }

    if period_us > PERIOD_MAX_US {
        PwmPeriod {
            mantissa: 255,
            exponent: 7,
            low_freq: true,
        }
    } else {
        PwmPeriod {
            mantissa: 1,
            exponent: 0,
            low_freq: false,
        }
    }
}

/// Dither shape of a channel
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DitherSettings {
    /// Current increment per step, same unit as the setpoint target
    pub step_size: u16,
    pub num_steps: u8,
    pub flat_steps: u8,
}

impl DitherSettings {
    /// Dither period `(4 * num_steps + 2 * flat_steps) * t_ref` in µs
    pub fn period_us(&self) -> f32 {
        (4 * self.num_steps as u32 + 2 * self.flat_steps as u32) as f32 * dither_reference_us()
    }

    pub fn frequency_hz(&self) -> f32 {
        1_000_000.0 / self.period_us()
    }

    /// Amplitude `num_steps * step_size * max_current / 32767` in mA
    pub fn amplitude_ma(&self, parallel: bool) -> f32 {
        self.num_steps as f32 * self.step_size as f32 * max_current_ma(parallel) as f32 / MAX_TARGET as f32
    }
}

/// Period of the dither reference clock in µs
pub fn dither_reference_us() -> f32 {
    DITHER_CLOCK_DIVIDER as f32 / SYSTEM_CLOCK_MHZ as f32
}

fn dither_ticks(frequency_hz: f32) -> u32 {
    round(1_000_000.0 / frequency_hz / dither_reference_us())
}

/// True if the dither frequency can be encoded
pub fn dither_frequency_in_range(frequency_hz: f32) -> bool {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return false;
    }

    let ticks = dither_ticks(frequency_hz);
    (4..=6 * MAX_DITHER_STEPS).contains(&ticks)
}

/// Solves the dither registers for the given amplitude (mA) and frequency (Hz).
///
/// The number of ramp steps is derived from the period, the remainder goes to the flat steps.
/// The step size is saturated at the 12 bit field width.
pub fn dither_from_amplitude_frequency(amplitude_ma: u16, frequency_hz: f32, parallel: bool) -> DitherSettings {
    let ticks = if frequency_hz > 0.0 { dither_ticks(frequency_hz) } else { u32::MAX };

    let num_steps = (ticks / 4).clamp(1, MAX_DITHER_STEPS);
    let flat_steps = (ticks.saturating_sub(4 * num_steps) / 2).min(MAX_DITHER_STEPS);

    let max = max_current_ma(parallel) as u32;
    let step_size = (amplitude_ma as u32 * MAX_TARGET as u32 + max * num_steps / 2) / (max * num_steps);

    DitherSettings {
        step_size: step_size.min(MAX_DITHER_STEP as u32) as u16,
        num_steps: num_steps as u8,
        flat_steps: flat_steps as u8,
    }
}

/// True if the voltage is a valid VBAT threshold
pub fn vbat_in_range(volts: f32) -> bool {
    volts.is_finite() && (0.0..=VBAT_MAX_V).contains(&volts)
}

/// Encodes a VBAT threshold in V
pub fn vbat_threshold_from_volts(volts: f32) -> u8 {
    let volts = if volts.is_finite() { volts.clamp(0.0, VBAT_MAX_V) } else { 0.0 };

    round(volts / VBAT_LSB_V).min(u8::MAX as u32) as u8
}

/// Decodes a VBAT threshold register value to V
pub fn volts_from_threshold(register: u8) -> f32 {
    register as f32 * VBAT_LSB_V
}

/// Rounds a non-negative value to the nearest integer, negative values and NaN map to zero
fn round(value: f32) -> u32 {
    (value + 0.5) as u32
}
