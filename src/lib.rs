#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]
#![allow(clippy::identity_op)]

//! # Library for TLE92466ED six-channel solenoid driver
//!
//! Crate currently offer the following features:
//! * CRC-protected 32-bit SPI protocol with pipelined replies
//! * Config/mission mode handling, invalid accesses are rejected before touching the bus
//! * Current regulation, PWM period, dither and parallel channel configuration
//! * Device and channel diagnostics
//! * no_std support
//!
//!## Example
//!
//!```
//!use tle92466ed::channel::{ChannelMode, ParallelPair};
//!use tle92466ed::config::{ChannelConfiguration, Configuration, GlobalConfiguration, SlewRate};
//!use tle92466ed::driver::{SolenoidController, TLE92466ED};
//!use tle92466ed::example::{ExampleClock, ExampleDelay, ExampleSPIDevice};
//!use tle92466ed::mode::OperatingMode;
//!use tle92466ed::transport::SpiTransport;
//!
//!let transport = SpiTransport::new(ExampleSPIDevice::default(), ExampleDelay::default());
//!let clock = ExampleClock::default();
//!
//!let config = Configuration {
//!    global: GlobalConfiguration {
//!        crc_enabled: true,
//!        spi_watchdog: false,
//!        clock_watchdog: true,
//!        vio_5v: true,
//!        uv_ov_swap: false,
//!    },
//!    check_device_id: true,
//!};
//!
//!let mut driver = TLE92466ED::with_configuration(transport, config);
//!driver.init(&clock).unwrap();
//!assert_eq!(OperatingMode::Config, driver.operating_mode());
//!
//! // Channel 1 and 2 drive one solenoid together
//!driver.set_parallel_operation(ParallelPair::Ch1Ch2, true).unwrap();
//!driver.set_channel_mode(1, ChannelMode::ICC).unwrap();
//!driver
//!    .configure_channel(
//!        1,
//!        &ChannelConfiguration {
//!            slew_rate: SlewRate::FiveVoltPerUs,
//!            ..Default::default()
//!        },
//!    )
//!    .unwrap();
//!driver.configure_pwm_period(1, 500.0).unwrap();
//!driver.configure_dither(1, 100, 250.0).unwrap();
//!
//!driver.enter_mission_mode().unwrap();
//!driver.set_current_setpoint(1, 3000).unwrap();
//!driver.enable_channel(1).unwrap();
//!assert_eq!(3000, driver.current_setpoint(1).unwrap());
//!
//!let status = driver.read_device_status().unwrap();
//!assert!(!status.has_fault());
//!```

extern crate alloc;

pub mod calc;
pub mod channel;
pub mod config;
pub mod crc;
pub mod driver;
pub mod error;
pub mod frame;
pub mod mode;
pub mod registers;
pub mod status;
pub mod transaction;
pub mod transport;

pub mod example;
#[cfg(test)]
pub(crate) mod mocks;
#[cfg(test)]
mod tests;
