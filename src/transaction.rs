//!# Transactions
//! The device answers a frame during the transfer of the *next* frame. Each register access is therefore
//! executed as two exchanges:
//! 1. the command frame, the word received meanwhile belongs to the previous command and is dropped
//! 2. a filler read of address 0, the word received meanwhile is the reply to the command
//!
//! Both exchanges always run back to back. Retries repeat the full sequence, a reply is never reused.
use crate::crc::verify_crc;
use crate::error::{CrcSource, DriverError};
use crate::frame::{Frame, ReplyFrame, ReplyMode};
use crate::transport::Transport;
use log::{debug, warn};

/// Status codes of standard reply frames
const STATUS_OK: u8 = 0;
const STATUS_SPI_FRAME_ERROR: u8 = 1;
const STATUS_CRC_ERROR: u8 = 2;
const STATUS_WRITE_TO_READ_ONLY: u8 = 3;

/// Executes a single command and returns the checked reply
///
/// * `verify_crc`: if true, the checksum of standard and extended replies is verified.
///   Critical fault frames carry no checksum and are never verified.
pub fn execute<T: Transport>(
    transport: &mut T,
    frame: Frame,
    verify_crc_enabled: bool,
) -> Result<ReplyFrame, DriverError<T::Error>> {
    let command = frame.with_crc();

    // Reply to the previous command
    transport.exchange(command.raw()).map_err(DriverError::HardwareError)?;

    let raw = transport
        .exchange(Frame::filler().raw())
        .map_err(DriverError::HardwareError)?;

    check_reply(raw, verify_crc_enabled)
}

/// Checks a raw reply word and maps device status codes to errors
pub fn check_reply<E>(raw: u32, verify_crc_enabled: bool) -> Result<ReplyFrame, DriverError<E>> {
    if raw == 0x0000_0000 || raw == 0xFFFF_FFFF {
        debug!("MISO line stuck, received {raw:#010X}");
        return Err(DriverError::DeviceNotResponding);
    }

    let mode = ReplyMode::from_frame(raw);

    if verify_crc_enabled && mode != ReplyMode::CriticalFault && !verify_crc(raw) {
        debug!("CRC mismatch in reply {raw:#010X}");
        return Err(DriverError::CRCError(CrcSource::Host));
    }

    let reply = ReplyFrame::decode(raw);

    match reply {
        ReplyFrame::Standard { status, .. } => status_result::<E>(status)?,
        ReplyFrame::Extended { .. } => {}
        ReplyFrame::CriticalFault(faults) => {
            warn!("Critical fault frame received: {faults:?}");
            return Err(DriverError::FaultDetected(faults));
        }
        ReplyFrame::Reserved(_) => {
            debug!("Reply with reserved mode: {raw:#010X}");
            return Err(DriverError::SPIFrameError);
        }
    }

    Ok(reply)
}

/// Maps the 5-bit status field of a standard reply
pub fn status_result<E>(status: u8) -> Result<(), DriverError<E>> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_SPI_FRAME_ERROR => Err(DriverError::SPIFrameError),
        STATUS_CRC_ERROR => Err(DriverError::CRCError(CrcSource::Device)),
        STATUS_WRITE_TO_READ_ONLY => Err(DriverError::WriteToReadOnly),
        _ => {
            debug!("Device reported register error, status {status}");
            Err(DriverError::RegisterError)
        }
    }
}
