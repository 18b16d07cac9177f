use crate::status::CriticalFaults;
use embedded_time::clock::Error as ClockError;

/// Origin of a CRC error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CrcSource {
    /// Checksum of the reply frame did not match
    Host,
    /// Device rejected the checksum of the command frame
    Device,
}

/// Possible errors of driver operations
///
/// `E` is the error type of the underlying transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum DriverError<E> {
    /// [crate::driver::TLE92466ED::init] was not called or did not succeed
    NotInitialized,
    /// Transport failed to exchange a frame
    HardwareError(E),
    /// Channel index out of range
    InvalidChannel(u8),
    /// Value outside of the encodable range
    InvalidParameter,
    /// MISO line stuck at low or high level
    DeviceNotResponding,
    /// Unexpected IC identifier
    WrongDeviceID(u8),
    /// Device reported an internal register access error
    RegisterError,
    CRCError(CrcSource),
    /// Device replied with a critical fault frame. Requires reset and re-initialization.
    FaultDetected(CriticalFaults),
    /// Configuration read back does not match the written value
    ConfigurationError,
    /// Device did not answer within timeout or the clock failed
    TimeoutError,
    /// Operation not allowed in the current operating mode
    WrongMode,
    /// Device reported an invalid SPI frame
    SPIFrameError,
    /// Write to a read-only register
    WriteToReadOnly,
}

impl<E> DriverError<E> {
    /// True if the error was raised before any bus transaction was attempted
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::InvalidChannel(_) | Self::InvalidParameter | Self::WrongMode
        )
    }

    /// True if repeating the transaction may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CRCError(_) | Self::SPIFrameError)
    }
}

impl<E> From<ClockError> for DriverError<E> {
    fn from(_error: ClockError) -> Self {
        DriverError::TimeoutError
    }
}
