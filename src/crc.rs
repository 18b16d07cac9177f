//!# Frame checksum
//! Every frame carries a CRC-8 (SAE J1850: polynomial `0x1D`, init `0xFF`, final XOR `0xFF`)
//! in its top byte. The checksum covers the three lower bytes only, MSB first.
//!
//! ```
//!# use tle92466ed::crc::{crc8, frame_crc};
//!#
//! assert_eq!(0x4B, crc8(b"123456789"));
//!
//! // Read frame for address 0 (the filler frame)
//! assert_eq!(0xF1, frame_crc(0x0000_0000));
//! ```

use ::crc::{Crc, CRC_8_SAE_J1850};

const CRC_J1850: Crc<u8> = Crc::<u8>::new(&CRC_8_SAE_J1850);

/// Bit position of the CRC byte inside a 32-bit frame
pub const CRC_SHIFT: u32 = 24;

/// Mask of the frame bits covered by the checksum
pub const PAYLOAD_MASK: u32 = 0x00FF_FFFF;

/// Computes the CRC-8 over the given bytes
pub fn crc8(bytes: &[u8]) -> u8 {
    CRC_J1850.checksum(bytes)
}

/// Returns the three checksummed bytes (bits 23:0) of a frame in wire order
pub fn payload_bytes(raw: u32) -> [u8; 3] {
    [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8]
}

/// Computes the checksum of a raw frame. The current CRC byte is ignored.
pub fn frame_crc(raw: u32) -> u8 {
    crc8(&payload_bytes(raw & PAYLOAD_MASK))
}

/// Returns the frame with its CRC byte replaced by the computed checksum
pub fn install_crc(raw: u32) -> u32 {
    (raw & PAYLOAD_MASK) | ((frame_crc(raw) as u32) << CRC_SHIFT)
}

/// True if the CRC byte of the frame matches the checksum of bits 23:0
pub fn verify_crc(raw: u32) -> bool {
    (raw >> CRC_SHIFT) as u8 == frame_crc(raw)
}
