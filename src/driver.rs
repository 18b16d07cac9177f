//!# Solenoid driver device
//!
//!```
//!# use tle92466ed::channel::ChannelMode;
//!# use tle92466ed::driver::{SolenoidController, TLE92466ED};
//!# use tle92466ed::example::*;
//!#
//! let clock = ExampleClock::default();
//! let transport = ExampleTransport::default();
//!
//! // Initialize driver object
//! let mut driver = TLE92466ED::new(transport);
//!
//! // Reset, identify and configure the device
//! driver.init(&clock).unwrap();
//!
//! // Channel configuration is only accepted in config mode
//! driver.set_channel_mode(0, ChannelMode::ICC).unwrap();
//! driver.configure_pwm_period(0, 1000.0).unwrap();
//!
//! // Regulate 1.5 A on channel 0
//! driver.enter_mission_mode().unwrap();
//! driver.set_current_setpoint(0, 1500).unwrap();
//! driver.enable_channel(0).unwrap();
//! ```

use crate::calc::{
    dither_frequency_in_range, dither_from_amplitude_frequency, max_current_ma, period_from_microseconds,
    period_in_range, setpoint_to_target, target_to_current_ma, vbat_in_range, vbat_threshold_from_volts,
    DitherSettings, PwmPeriod, DITHER_CLOCK_DIVIDER, MAX_TARGET,
};
use crate::channel::{ChannelMode, ChannelState, ParallelPair, CHANNEL_COUNT};
use crate::config::{ChannelConfiguration, Configuration, FaultMasks, GlobalConfiguration, RegulationConfiguration};
use crate::error::DriverError;
use crate::frame::{Frame, ReplyFrame};
use crate::mode::{GuardedOperation, ModeController, OperatingMode};
use crate::registers::*;
use crate::status::{ChannelDiagnostics, ChannelFeedback, ChipInfo, DeviceStatus};
use crate::transaction::execute;
use crate::transport::Transport;
use core::marker::PhantomData;
use embedded_time::duration::Milliseconds;
use embedded_time::Clock;
use log::debug;

/// IC identifier in the upper byte of ICVID
pub const EXPECTED_IC_ID: u8 = 0x92;

/// Low time of the reset pulse in µs
const RESET_PULSE_US: u32 = 10;

/// Wait time after releasing reset in µs
const POWER_UP_DELAY_US: u32 = 1_000;

/// Time the device may take to answer after reset
const RESPONSE_TIMEOUT_MS: u32 = 2;

/// Mask of the channel enable bits
const CHANNEL_MASK: u8 = 0x3F;

/// Latched diagnosis flags are cleared by writing ones
const CLEAR_ALL_FLAGS: u16 = 0xFFFF;

/// Trait for runtime control of the solenoid channels
pub trait SolenoidController {
    type Error;

    /// Switches the channel output on, requires mission mode
    fn enable_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Switches the channel output off, requires mission mode
    fn disable_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Sets the regulated current in mA, requires mission mode
    fn set_current_setpoint(&mut self, channel: u8, current_ma: u16) -> Result<(), Self::Error>;
}

/// Main TLE92466ED device
///
/// The driver owns all cached device state and is not meant to be shared between threads
/// without external synchronization.
///
/// # Write addressing
///
/// Write frames only carry the low 7 bits of the register address, read frames the full 10 bits.
/// Every write therefore lands on `address & 0x7F`: writes to a channel block alias the global
/// registers and each other (e.g. the PWM period of channel 0 at 0x0102 is written to 0x02).
pub struct TLE92466ED<T: Transport, CLK: Clock> {
    /// Access to the device
    transport: T,

    /// Configuration applied by [Self::init]
    config: Configuration,

    /// Set by a successful [Self::init]
    initialized: bool,

    /// Mirror of the operation mode bit
    mode: ModeController,

    /// Cached channel state
    channels: [ChannelState; CHANNEL_COUNT],

    /// System clock
    clock: PhantomData<CLK>,
}

impl<T, CLK> SolenoidController for TLE92466ED<T, CLK>
where
    T: Transport,
    CLK: Clock,
{
    type Error = DriverError<T::Error>;

    fn enable_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.check_channel(channel)?;

        self.set_enabled_channels(self.enabled_channels() | (1 << channel))
    }

    fn disable_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.check_channel(channel)?;

        self.set_enabled_channels(self.enabled_channels() & !(1 << channel))
    }

    /// Writes a channel block register, see [write addressing](TLE92466ED#write-addressing).
    fn set_current_setpoint(&mut self, channel: u8, current_ma: u16) -> Result<(), Self::Error> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::SetpointChange)?;

        let parallel = self.channels[channel as usize].parallel.is_some();
        if current_ma > max_current_ma(parallel) {
            return Err(DriverError::InvalidParameter);
        }

        let target = setpoint_to_target(current_ma, parallel);
        let register = SetpointReg::new().with_target(target);

        self.write(channel_register(channel, CHANNEL_SETPOINT), register.into())?;
        self.channels[channel as usize].setpoint = target;

        Ok(())
    }
}

impl<T, CLK> TLE92466ED<T, CLK>
where
    T: Transport,
    CLK: Clock,
{
    /// Creates a driver with default configuration
    pub fn new(transport: T) -> Self {
        Self::with_configuration(transport, Configuration::default())
    }

    pub fn with_configuration(transport: T, config: Configuration) -> Self {
        Self {
            transport,
            config,
            initialized: false,
            mode: ModeController::default(),
            channels: [ChannelState::default(); CHANNEL_COUNT],
            clock: Default::default(),
        }
    }

    /// Returns the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Resets and identifies the device, then applies the global configuration.
    /// Afterwards the device is in config mode with all channels off.
    ///
    /// The device has to answer within 2 ms after reset.
    pub fn init(&mut self, clock: &CLK) -> Result<(), DriverError<T::Error>> {
        self.reset()?;
        self.warm_up()?;

        let info = self.wait_for_device(clock)?;
        if self.config.check_device_id && info.ic_id != EXPECTED_IC_ID {
            debug!("Unexpected IC identifier {:#04X}", info.ic_id);
            return Err(DriverError::WrongDeviceID(info.ic_id));
        }

        let global = self.config.global.as_register();
        self.write(REGISTER_GLOBAL_CONFIG, global)?;

        let read_back = self.read(REGISTER_GLOBAL_CONFIG)?;
        if GlobalConfiguration::from_register(read_back) != self.config.global {
            debug!("Global configuration not applied. Written: {global:#06X}, read: {read_back:#06X}");
            return Err(DriverError::ConfigurationError);
        }

        self.clear_latched_faults()?;
        self.write(
            REGISTER_CH_CTRL,
            Self::control_register(OperatingMode::Config, 0, &self.channels),
        )?;

        self.initialized = true;
        Ok(())
    }

    /// Pulses the reset line and drops all cached state. [Self::init] has to be called again afterwards.
    ///
    /// This is the only way to recover from [DriverError::FaultDetected].
    pub fn reset(&mut self) -> Result<(), DriverError<T::Error>> {
        self.initialized = false;
        self.mode = ModeController::default();
        self.channels = [ChannelState::default(); CHANNEL_COUNT];

        self.transport.set_reset(true).map_err(DriverError::HardwareError)?;
        self.transport.delay_us(RESET_PULSE_US);
        self.transport.set_reset(false).map_err(DriverError::HardwareError)?;
        self.transport.delay_us(POWER_UP_DELAY_US);

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Locally cached operating mode
    pub fn operating_mode(&self) -> OperatingMode {
        self.mode.mode()
    }

    /// Locally cached state of the given channel
    pub fn channel_state(&self, channel: u8) -> Option<ChannelState> {
        self.channels.get(channel as usize).copied()
    }

    /// Locally cached setpoint in mA
    pub fn current_setpoint(&self, channel: u8) -> Result<u16, DriverError<T::Error>> {
        self.check_channel(channel)?;

        Ok(self.channels[channel as usize].setpoint_ma())
    }

    /// Enabled channels, bit n = channel n
    pub fn enabled_channels(&self) -> u8 {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, state)| state.enabled)
            .fold(0, |mask, (index, _)| mask | (1 << index))
    }

    /// Switches to mission mode, enabled channels stay enabled
    pub fn enter_mission_mode(&mut self) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        let register = Self::control_register(OperatingMode::Mission, self.enabled_channels(), &self.channels);
        self.write(REGISTER_CH_CTRL, register)?;

        let transition = self.mode.set_mode(OperatingMode::Mission);
        debug!("Operating mode {:?} -> {:?}", transition.from, transition.to);

        Ok(())
    }

    /// Switches to config mode. The device switches off all outputs.
    pub fn enter_config_mode(&mut self) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        let register = Self::control_register(OperatingMode::Config, 0, &self.channels);
        self.write(REGISTER_CH_CTRL, register)?;

        let transition = self.mode.set_mode(OperatingMode::Config);
        if transition.disables_channels() {
            debug!("Left mission mode, outputs {:#04X} disabled", self.enabled_channels());
        }

        for state in self.channels.iter_mut() {
            state.enabled = false;
        }

        Ok(())
    }

    /// Writes the enable bits of all channels at once, requires mission mode
    pub fn set_enabled_channels(&mut self, mask: u8) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;
        self.guard(GuardedOperation::ChannelEnable)?;

        if mask & !CHANNEL_MASK != 0 {
            return Err(DriverError::InvalidParameter);
        }

        let register = Self::control_register(OperatingMode::Mission, mask, &self.channels);
        self.write(REGISTER_CH_CTRL, register)?;

        for (index, state) in self.channels.iter_mut().enumerate() {
            state.enabled = mask & (1 << index) != 0;
        }

        Ok(())
    }

    /// Selects the operation mode of a channel, requires config mode
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn set_channel_mode(&mut self, channel: u8, mode: ChannelMode) -> Result<(), DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::ChannelModeChange)?;

        let register = ModeReg::new().with_mode(mode as u8);
        self.write(channel_register(channel, CHANNEL_MODE), register.into())?;
        self.channels[channel as usize].mode = mode;

        Ok(())
    }

    /// Reads back the operation mode the device applies to a channel
    pub fn read_channel_mode(&mut self, channel: u8) -> Result<ChannelMode, DriverError<T::Error>> {
        self.check_channel(channel)?;

        let register = ModeReg::from(self.read(channel_register(channel, CHANNEL_MODE))?);
        Ok(ChannelMode::from_register(register.mode()))
    }

    /// Pairs or unpairs two channels for parallel operation, requires config mode
    pub fn set_parallel_operation(&mut self, pair: ParallelPair, enabled: bool) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;
        self.guard(GuardedOperation::ParallelConfiguration)?;

        let mut channels = self.channels;
        for channel in pair.channels() {
            channels[channel as usize].parallel = if enabled { Some(pair) } else { None };
        }

        let register = Self::control_register(OperatingMode::Config, 0, &channels);
        self.write(REGISTER_CH_CTRL, register)?;
        self.channels = channels;

        Ok(())
    }

    /// Applies slew rate, diagnosis current and open load threshold, requires config mode
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn configure_channel(
        &mut self,
        channel: u8,
        config: &ChannelConfiguration,
    ) -> Result<(), DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::ChannelConfiguration)?;

        self.write(channel_register(channel, CHANNEL_CONFIG), config.as_register())
    }

    /// Reads back the channel configuration
    pub fn read_channel_configuration(&mut self, channel: u8) -> Result<ChannelConfiguration, DriverError<T::Error>> {
        self.check_channel(channel)?;

        let register = self.read(channel_register(channel, CHANNEL_CONFIG))?;
        Ok(ChannelConfiguration::from_register(register))
    }

    /// Applies the current regulator gains and integrator limit, requires config mode
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn configure_regulation(
        &mut self,
        channel: u8,
        config: &RegulationConfiguration,
    ) -> Result<(), DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::RegulationConfiguration)?;

        if !config.is_valid() || config.integrator_limit > MAX_TARGET {
            return Err(DriverError::InvalidParameter);
        }

        self.write(channel_register(channel, CHANNEL_CTRL), config.as_register())?;
        self.write(channel_register(channel, CHANNEL_INT_LIMIT), config.integrator_limit)
    }

    /// Sets the PWM period in µs (0.125 µs to 32.64 ms), requires config mode.
    /// Returns the encoding actually written.
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn configure_pwm_period(&mut self, channel: u8, period_us: f32) -> Result<PwmPeriod, DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::PwmConfiguration)?;

        self.write_period(channel, CHANNEL_PERIOD, period_us)
    }

    /// Sets the on-time in µs used in direct drive mode, requires config mode
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn set_on_time(&mut self, channel: u8, on_time_us: f32) -> Result<PwmPeriod, DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::OnTimeConfiguration)?;

        self.write_period(channel, CHANNEL_TON, on_time_us)
    }

    /// Configures the dither overlay, requires config mode. An amplitude of zero disables dither.
    /// Returns the register settings actually written.
    /// Writes a channel block register, see [write addressing](Self#write-addressing).
    pub fn configure_dither(
        &mut self,
        channel: u8,
        amplitude_ma: u16,
        frequency_hz: f32,
    ) -> Result<DitherSettings, DriverError<T::Error>> {
        self.check_channel(channel)?;
        self.guard(GuardedOperation::DitherConfiguration)?;

        let parallel = self.channels[channel as usize].parallel.is_some();
        if amplitude_ma > max_current_ma(parallel) || !dither_frequency_in_range(frequency_hz) {
            return Err(DriverError::InvalidParameter);
        }

        let settings = dither_from_amplitude_frequency(amplitude_ma, frequency_hz, parallel);

        let clock_div = DitherClockReg::new().with_divider(DITHER_CLOCK_DIVIDER);
        let step = DitherStepReg::new().with_step_size(settings.step_size);
        let ctrl = DitherCtrlReg::new()
            .with_num_steps(settings.num_steps)
            .with_flat_steps(settings.flat_steps);

        self.write(channel_register(channel, CHANNEL_DITHER_CLK_DIV), clock_div.into())?;
        self.write(channel_register(channel, CHANNEL_DITHER_STEP), step.into())?;
        self.write(channel_register(channel, CHANNEL_DITHER_CTRL), ctrl.into())?;

        Ok(settings)
    }

    /// Sets the VBAT under- and over-voltage thresholds in V (0 to 41.4 V)
    pub fn set_vbat_thresholds(&mut self, undervoltage: f32, overvoltage: f32) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        if !vbat_in_range(undervoltage) || !vbat_in_range(overvoltage) || undervoltage >= overvoltage {
            return Err(DriverError::InvalidParameter);
        }

        let register = VbatThresholdReg::new()
            .with_uv_threshold(vbat_threshold_from_volts(undervoltage))
            .with_ov_threshold(vbat_threshold_from_volts(overvoltage));

        self.write(REGISTER_VBAT_TH, register.into())
    }

    /// Configures which faults are signaled on the fault pin, requires config mode
    pub fn set_fault_masks(&mut self, masks: &FaultMasks) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;
        self.guard(GuardedOperation::FaultMaskConfiguration)?;

        let [channels, supply, internal] = masks.as_registers();
        self.write(REGISTER_FAULT_MASK0, channels)?;
        self.write(REGISTER_FAULT_MASK1, supply)?;
        self.write(REGISTER_FAULT_MASK2, internal)
    }

    /// Reloads the SPI watchdog
    pub fn reload_watchdog(&mut self, value: u16) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        self.write(REGISTER_WD_RELOAD, value)
    }

    /// Clears all latched diagnosis flags
    pub fn clear_faults(&mut self) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        self.clear_latched_faults()
    }

    /// Drives the output enable pin
    pub fn set_output_enable(&mut self, enabled: bool) -> Result<(), DriverError<T::Error>> {
        self.transport.set_enable(enabled).map_err(DriverError::HardwareError)
    }

    /// True if the device signals a fault on the fault pin
    pub fn fault_pin_active(&mut self) -> Result<bool, DriverError<T::Error>> {
        self.transport.fault_active().map_err(DriverError::HardwareError)
    }

    /// Reads and returns the global device status
    pub fn read_device_status(&mut self) -> Result<DeviceStatus, DriverError<T::Error>> {
        self.ensure_initialized()?;

        let ctrl = self.read(REGISTER_CH_CTRL)?;
        let diag0 = self.read(REGISTER_GLOBAL_DIAG0)?;
        let diag1 = self.read(REGISTER_GLOBAL_DIAG1)?;
        let diag2 = self.read(REGISTER_GLOBAL_DIAG2)?;

        Ok(DeviceStatus::from_registers(ctrl, diag0, diag1, diag2))
    }

    /// Reads and returns the diagnosis flags of the given channel
    pub fn read_channel_diagnostics(&mut self, channel: u8) -> Result<ChannelDiagnostics, DriverError<T::Error>> {
        self.check_channel(channel)?;

        let mut registers = [0u16; 5];
        let addresses = [
            REGISTER_DIAG_OC,
            REGISTER_DIAG_SG,
            REGISTER_DIAG_OL,
            REGISTER_DIAG_OT,
            REGISTER_DIAG_WARN,
        ];

        for (register, address) in registers.iter_mut().zip(addresses) {
            *register = self.read(address)?;
        }

        Ok(ChannelDiagnostics::from_registers(channel, registers))
    }

    /// Reads average current and duty cycle of the given channel
    pub fn read_channel_feedback(&mut self, channel: u8) -> Result<ChannelFeedback, DriverError<T::Error>> {
        self.check_channel(channel)?;

        let average = self.read(channel_register(channel, CHANNEL_FB_I_AVG))?;
        let duty_cycle = self.read(channel_register(channel, CHANNEL_FB_DC))?;
        let parallel = self.channels[channel as usize].parallel.is_some();

        Ok(ChannelFeedback {
            channel,
            average_current_ma: target_to_current_ma(average & MAX_TARGET, parallel),
            duty_cycle,
        })
    }

    /// Reads and returns IC identifier and version
    pub fn read_chip_info(&mut self) -> Result<ChipInfo, DriverError<T::Error>> {
        self.ensure_initialized()?;

        Ok(ChipInfo::from_register(self.read(REGISTER_ICVID)?))
    }

    /// Reads and returns the 48-bit unique chip identifier
    pub fn read_chip_id(&mut self) -> Result<u64, DriverError<T::Error>> {
        self.ensure_initialized()?;

        let mut id = 0u64;
        for (index, address) in [REGISTER_CHIPID0, REGISTER_CHIPID1, REGISTER_CHIPID2].into_iter().enumerate() {
            id |= (self.read(address)? as u64) << (16 * index);
        }

        Ok(id)
    }

    /// Reads a single register
    pub fn read_register(&mut self, address: u16) -> Result<u16, DriverError<T::Error>> {
        self.ensure_initialized()?;
        Self::check_address(address)?;

        self.read(address)
    }

    /// Writes a single register. Mode restrictions are not checked.
    ///
    /// Only the low 7 address bits are transmitted, see [write addressing](Self#write-addressing).
    pub fn write_register(&mut self, address: u16, value: u16) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;
        Self::check_address(address)?;

        self.write(address, value)
    }

    /// Reads a single register and repeats the full transaction on CRC and frame errors
    pub fn read_register_with_retries(&mut self, address: u16, attempts: u8) -> Result<u16, DriverError<T::Error>> {
        self.ensure_initialized()?;
        Self::check_address(address)?;

        let mut remaining = attempts.max(1);
        loop {
            remaining -= 1;

            match self.read(address) {
                Err(error) if error.is_transient() && remaining > 0 => {
                    debug!("Read of register {address:#05X} failed, {remaining} attempts left");
                }
                result => return result,
            }
        }
    }

    /// Executes a raw transaction, bypassing all checks
    pub fn transaction(&mut self, frame: Frame) -> Result<ReplyFrame, DriverError<T::Error>> {
        execute(&mut self.transport, frame, self.config.global.crc_enabled)
    }

    /// First transaction after reset, the reply is not reliable and ignored
    fn warm_up(&mut self) -> Result<(), DriverError<T::Error>> {
        match execute(&mut self.transport, Frame::read(REGISTER_ICVID), false) {
            Err(DriverError::HardwareError(error)) => Err(DriverError::HardwareError(error)),
            _ => Ok(()),
        }
    }

    /// Polls the identification register till the device answers or timeout of 2 ms is reached
    fn wait_for_device(&mut self, clock: &CLK) -> Result<ChipInfo, DriverError<T::Error>> {
        let target = clock
            .try_now()?
            .checked_add(Milliseconds::new(RESPONSE_TIMEOUT_MS))
            .ok_or(DriverError::TimeoutError)?;

        loop {
            let error = match self.read(REGISTER_ICVID) {
                Ok(register) => return Ok(ChipInfo::from_register(register)),
                Err(error) if error.is_transient() || matches!(error, DriverError::DeviceNotResponding) => error,
                Err(error) => return Err(error),
            };

            if clock.try_now()? > target {
                debug!("Device did not answer within timeout");

                return match error {
                    DriverError::DeviceNotResponding => Err(DriverError::DeviceNotResponding),
                    _ => Err(DriverError::TimeoutError),
                };
            }
        }
    }

    fn clear_latched_faults(&mut self) -> Result<(), DriverError<T::Error>> {
        self.write(REGISTER_GLOBAL_DIAG0, CLEAR_ALL_FLAGS)?;
        self.write(REGISTER_GLOBAL_DIAG1, CLEAR_ALL_FLAGS)?;
        self.write(REGISTER_GLOBAL_DIAG2, CLEAR_ALL_FLAGS)
    }

    fn write_period(&mut self, channel: u8, offset: u16, period_us: f32) -> Result<PwmPeriod, DriverError<T::Error>> {
        if !period_in_range(period_us) {
            return Err(DriverError::InvalidParameter);
        }

        let period = period_from_microseconds(period_us);
        let register = PeriodReg::new()
            .with_mantissa(period.mantissa)
            .with_exponent(period.exponent)
            .with_low_freq(period.low_freq);

        self.write(channel_register(channel, offset), register.into())?;

        Ok(period)
    }

    /// Reads a register value
    fn read(&mut self, address: u16) -> Result<u16, DriverError<T::Error>> {
        let reply = self.transaction(Frame::read(address))?;

        reply.value().ok_or(DriverError::SPIFrameError)
    }

    /// Writes a register value
    fn write(&mut self, address: u16, value: u16) -> Result<(), DriverError<T::Error>> {
        self.transaction(Frame::write(address, value))?;

        Ok(())
    }

    /// Builds the CH_CTRL value for the given mode, enable bits and pairing
    fn control_register(mode: OperatingMode, enabled: u8, channels: &[ChannelState; CHANNEL_COUNT]) -> u16 {
        let paired = |pair: ParallelPair| channels[pair.channels()[0] as usize].parallel == Some(pair);

        ChannelControlReg::new()
            .with_op_mode(mode == OperatingMode::Mission)
            .with_par_0_3(paired(ParallelPair::Ch0Ch3))
            .with_par_1_2(paired(ParallelPair::Ch1Ch2))
            .with_par_4_5(paired(ParallelPair::Ch4Ch5))
            .with_enable(enabled & CHANNEL_MASK)
            .into()
    }

    fn ensure_initialized(&self) -> Result<(), DriverError<T::Error>> {
        if !self.initialized {
            return Err(DriverError::NotInitialized);
        }

        Ok(())
    }

    fn check_channel(&self, channel: u8) -> Result<(), DriverError<T::Error>> {
        self.ensure_initialized()?;

        if channel as usize >= CHANNEL_COUNT {
            return Err(DriverError::InvalidChannel(channel));
        }

        Ok(())
    }

    fn check_address(address: u16) -> Result<(), DriverError<T::Error>> {
        if address > ADDRESS_MASK {
            return Err(DriverError::InvalidParameter);
        }

        Ok(())
    }

    fn guard(&self, operation: GuardedOperation) -> Result<(), DriverError<T::Error>> {
        if !self.mode.permits(operation) {
            debug!("{operation:?} not allowed in {:?} mode", self.mode.mode());
            return Err(DriverError::WrongMode);
        }

        Ok(())
    }
}
