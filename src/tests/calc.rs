use crate::calc::*;

#[test]
fn test_max_current() {
    assert_eq!(2000, max_current_ma(false));
    assert_eq!(4000, max_current_ma(true));
}

#[test]
fn test_setpoint_to_target() {
    assert_eq!(0, setpoint_to_target(0, false));
    assert_eq!(1638, setpoint_to_target(100, false));
    assert_eq!(16384, setpoint_to_target(1000, false));
    assert_eq!(32767, setpoint_to_target(2000, false));

    assert_eq!(8192, setpoint_to_target(1000, true));
    assert_eq!(24575, setpoint_to_target(3000, true));
    assert_eq!(32767, setpoint_to_target(4000, true));
}

#[test]
fn test_setpoint_to_target_saturates() {
    assert_eq!(MAX_TARGET, setpoint_to_target(2500, false));
    assert_eq!(MAX_TARGET, setpoint_to_target(u16::MAX, true));
}

#[test]
fn test_target_to_current() {
    assert_eq!(0, target_to_current_ma(0, false));
    assert_eq!(1000, target_to_current_ma(16384, false));
    assert_eq!(2000, target_to_current_ma(MAX_TARGET, false));
    assert_eq!(4000, target_to_current_ma(MAX_TARGET, true));

    // Values above the 15 bit range are limited
    assert_eq!(2000, target_to_current_ma(0xFFFF, false));
}

#[test]
fn test_setpoint_round_trip_single() {
    for current in [0, 100, 500, 1000, 1500, 2000] {
        assert_eq!(current, target_to_current_ma(setpoint_to_target(current, false), false));
    }
}

#[test]
fn test_setpoint_round_trip_parallel() {
    for current in [0, 100, 500, 1000, 1500, 2000, 3000, 4000] {
        assert_eq!(current, target_to_current_ma(setpoint_to_target(current, true), true));
    }
}

#[test]
fn test_period_shortest() {
    let period = period_from_microseconds(PERIOD_MIN_US);

    assert_eq!(
        PwmPeriod {
            mantissa: 1,
            exponent: 0,
            low_freq: false
        },
        period
    );
    assert_eq!(0.125, period.microseconds());
}

#[test]
fn test_period_longest() {
    let period = period_from_microseconds(PERIOD_MAX_US);

    assert_eq!(
        PwmPeriod {
            mantissa: 255,
            exponent: 7,
            low_freq: true
        },
        period
    );
    assert_eq!(32640.0, period.microseconds());
}

#[test]
fn test_period_prefers_standard_range() {
    let period = period_from_microseconds(1000.0);
    assert_eq!((250, 5, false), (period.mantissa, period.exponent, period.low_freq));
    assert_eq!(1000.0, period.microseconds());

    let period = period_from_microseconds(0.2);
    assert_eq!((2, 0, false), (period.mantissa, period.exponent, period.low_freq));

    // 4080 µs is the longest period of the standard range
    let period = period_from_microseconds(4080.0);
    assert_eq!((255, 7, false), (period.mantissa, period.exponent, period.low_freq));

    let period = period_from_microseconds(8160.0);
    assert_eq!((255, 5, true), (period.mantissa, period.exponent, period.low_freq));

    let period = period_from_microseconds(10_000.0);
    assert!(period.low_freq);
    assert!((period.microseconds() - 10_000.0).abs() <= 64.0);
}

#[test]
fn test_period_out_of_range_saturates() {
    assert_eq!((255, 7, true), {
        let period = period_from_microseconds(50_000.0);
        (period.mantissa, period.exponent, period.low_freq)
    });

    assert_eq!((1, 0, false), {
        let period = period_from_microseconds(0.01);
        (period.mantissa, period.exponent, period.low_freq)
    });
}

#[test]
fn test_period_in_range() {
    assert!(period_in_range(0.125));
    assert!(period_in_range(1000.0));
    assert!(period_in_range(32640.0));

    assert!(!period_in_range(0.1));
    assert!(!period_in_range(32641.0));
    assert!(!period_in_range(-5.0));
    assert!(!period_in_range(f32::NAN));
    assert!(!period_in_range(f32::INFINITY));
}

#[test]
fn test_dither_reference() {
    assert_eq!(10.0, dither_reference_us());
}

#[test]
fn test_dither_frequency_in_range() {
    assert!(dither_frequency_in_range(100.0));
    assert!(dither_frequency_in_range(25_000.0));
    assert!(dither_frequency_in_range(70.0));

    assert!(!dither_frequency_in_range(30_000.0));
    assert!(!dither_frequency_in_range(50.0));
    assert!(!dither_frequency_in_range(0.0));
    assert!(!dither_frequency_in_range(-100.0));
    assert!(!dither_frequency_in_range(f32::NAN));
}

#[test]
fn test_dither_from_amplitude_frequency() {
    let settings = dither_from_amplitude_frequency(200, 100.0, false);

    assert_eq!(
        DitherSettings {
            step_size: 13,
            num_steps: 250,
            flat_steps: 0
        },
        settings
    );
    assert_eq!(10_000.0, settings.period_us());
    assert_eq!(100.0, settings.frequency_hz());
    assert!((settings.amplitude_ma(false) - 200.0).abs() < 2.0);
}

#[test]
fn test_dither_parallel() {
    let settings = dither_from_amplitude_frequency(100, 250.0, true);

    assert_eq!(8, settings.step_size);
    assert_eq!(100, settings.num_steps);
    assert_eq!(0, settings.flat_steps);
}

#[test]
fn test_dither_limits() {
    // Period longer than the ramp steps allow
    let settings = dither_from_amplitude_frequency(100, 50.0, false);
    assert_eq!(255, settings.num_steps);
    assert_eq!(255, settings.flat_steps);

    // Step size saturated at 12 bits
    let settings = dither_from_amplitude_frequency(2000, 25_000.0, false);
    assert_eq!(1, settings.num_steps);
    assert_eq!(MAX_DITHER_STEP, settings.step_size);

    // Zero amplitude disables dither
    assert_eq!(0, dither_from_amplitude_frequency(0, 100.0, false).step_size);
}

#[test]
fn test_vbat_threshold() {
    assert_eq!(37, vbat_threshold_from_volts(6.0));
    assert_eq!(185, vbat_threshold_from_volts(30.0));
    assert_eq!(255, vbat_threshold_from_volts(VBAT_MAX_V));
    assert_eq!(255, vbat_threshold_from_volts(60.0));
    assert_eq!(0, vbat_threshold_from_volts(-1.0));
    assert_eq!(0, vbat_threshold_from_volts(f32::NAN));

    assert!((volts_from_threshold(100) - 16.208).abs() < 0.001);
}

#[test]
fn test_vbat_in_range() {
    assert!(vbat_in_range(0.0));
    assert!(vbat_in_range(12.0));
    assert!(vbat_in_range(41.4));

    assert!(!vbat_in_range(41.5));
    assert!(!vbat_in_range(-0.1));
    assert!(!vbat_in_range(f32::NAN));
}
