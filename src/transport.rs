//!# Transport
//! The driver talks to the device through the [Transport] trait: one full-duplex 32-bit exchange per
//! call, with chip select asserted for the whole frame. [SpiTransport] implements it on top of an
//! `embedded-hal` SPI device (mode 0, MSB first, up to 10 MHz) and optional control pins.
//!
//!```
//!# use tle92466ed::example::{ExampleDelay, ExampleSPIDevice};
//!# use tle92466ed::transport::{SpiTransport, Transport};
//!#
//! let mut transport = SpiTransport::new(ExampleSPIDevice::default(), ExampleDelay::default());
//!
//! // Filler read of address 0
//! transport.exchange(0xF100_0000).unwrap();
//!```
use byteorder::{BigEndian, ByteOrder};
use core::convert::Infallible;
use core::fmt::{Debug, Formatter};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

/// Physical access to the device
pub trait Transport {
    type Error;

    /// Sends one frame and returns the frame received at the same time
    fn exchange(&mut self, frame: u32) -> Result<u32, Self::Error>;

    /// Blocks for the given number of microseconds
    fn delay_us(&mut self, micros: u32);

    /// Drives the reset line (RESN). Transports without reset pin do nothing.
    fn set_reset(&mut self, _active: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Drives the output enable line (EN). Transports without enable pin do nothing.
    fn set_enable(&mut self, _active: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Returns true if the fault line (FAULTN) is asserted
    fn fault_active(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

pub enum SpiError<D: SpiDevice<u8>> {
    BusError(D::Error),
    /// Setting or reading a control pin failed
    PinError,
}

impl<D: SpiDevice<u8>> Debug for SpiError<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusError(error) => f.debug_tuple("BusError").field(error).finish(),
            Self::PinError => f.write_str("PinError"),
        }
    }
}

impl<D: SpiDevice<u8>> PartialEq for SpiError<D> {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BusError(_), Self::BusError(_)) | (Self::PinError, Self::PinError)
        )
    }
}

/// Placeholder for control pins which are not connected
#[derive(Copy, Clone, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// [Transport] on top of `embedded-hal` SPI device, delay and GPIO pins
pub struct SpiTransport<D, DL, RST = NoPin, EN = NoPin, FLT = NoPin> {
    /// Device on SPI bus, responsible for chip select
    device: D,
    delay: DL,

    /// Reset pin, active low
    reset: Option<RST>,
    /// Output enable pin, active high
    enable: Option<EN>,
    /// Fault indicator pin, active low
    fault: Option<FLT>,
}

impl<D: SpiDevice<u8>, DL: DelayNs> SpiTransport<D, DL> {
    /// Transport without control pins
    pub fn new(device: D, delay: DL) -> Self {
        Self {
            device,
            delay,
            reset: None,
            enable: None,
            fault: None,
        }
    }
}

impl<D, DL, RST, EN, FLT> SpiTransport<D, DL, RST, EN, FLT>
where
    D: SpiDevice<u8>,
    DL: DelayNs,
    RST: OutputPin,
    EN: OutputPin,
    FLT: InputPin,
{
    /// Transport with reset, enable and fault pins. Use [NoPin] for unconnected lines.
    pub fn with_pins(device: D, delay: DL, reset: RST, enable: EN, fault: FLT) -> Self {
        Self {
            device,
            delay,
            reset: Some(reset),
            enable: Some(enable),
            fault: Some(fault),
        }
    }

    /// Returns the owned peripherals
    pub fn release(self) -> (D, DL, Option<RST>, Option<EN>, Option<FLT>) {
        (self.device, self.delay, self.reset, self.enable, self.fault)
    }
}

impl<D, DL, RST, EN, FLT> Transport for SpiTransport<D, DL, RST, EN, FLT>
where
    D: SpiDevice<u8>,
    DL: DelayNs,
    RST: OutputPin,
    EN: OutputPin,
    FLT: InputPin,
{
    type Error = SpiError<D>;

    fn exchange(&mut self, frame: u32) -> Result<u32, Self::Error> {
        let mut buffer = [0u8; 4];
        BigEndian::write_u32(&mut buffer, frame);

        self.device.transfer_in_place(&mut buffer).map_err(SpiError::BusError)?;

        Ok(BigEndian::read_u32(&buffer))
    }

    fn delay_us(&mut self, micros: u32) {
        self.delay.delay_us(micros);
    }

    fn set_reset(&mut self, active: bool) -> Result<(), Self::Error> {
        if let Some(pin) = &mut self.reset {
            // RESN is active low
            pin.set_state((!active).into()).map_err(|_| SpiError::PinError)?;
        }

        Ok(())
    }

    fn set_enable(&mut self, active: bool) -> Result<(), Self::Error> {
        if let Some(pin) = &mut self.enable {
            pin.set_state(active.into()).map_err(|_| SpiError::PinError)?;
        }

        Ok(())
    }

    fn fault_active(&mut self) -> Result<bool, Self::Error> {
        match &mut self.fault {
            Some(pin) => pin.is_low().map_err(|_| SpiError::PinError),
            None => Ok(false),
        }
    }
}
