//!# SPI frames
//! All communication uses 32-bit frames, MSB first. The top byte is the CRC of the lower three bytes.
//!
//! Command frames (host to device):
//! * Write: `crc:8 | address:7 | rw:1 (=1) | data:16`
//! * Read: `crc:8 | don't care:7 | rw:1 (=0) | address:16`
//!
//! Write frames only carry the lower 7 address bits, while read frames place the full register
//! address into the lower 16 bits. Both layouts have to be kept as they are to stay compatible.
//!
//! Reply frames (device to host) are selected by the reply mode in bits 23:22:
//! * `00`: `crc:8 | mode:2 | status:5 | rw:1 | data:16`
//! * `01`: `crc:8 | mode:2 | data:22`
//! * `10`: critical fault frame, fault flags in bits 7:0, top byte is not a CRC
//!
//! ```
//!# use tle92466ed::frame::{Frame, ReplyFrame};
//!#
//! let frame = Frame::write(0x0002, 0x4007).with_crc();
//! assert_eq!(0xC105_4007, frame.raw());
//! assert!(frame.has_valid_crc());
//!
//! let reply = ReplyFrame::decode(0x7E01_0000);
//! assert_eq!(ReplyFrame::Standard { status: 0, write: true, data: 0 }, reply);
//! ```

use crate::crc::{install_crc, verify_crc, CRC_SHIFT};
use crate::status::CriticalFaults;

const ADDRESS_SHIFT: u32 = 17;
const ADDRESS_MASK: u32 = 0x7F;
const RW_BIT: u32 = 1 << 16;
const DATA_MASK: u32 = 0xFFFF;

const REPLY_MODE_SHIFT: u32 = 22;
const STATUS_SHIFT: u32 = 17;
const STATUS_MASK: u32 = 0x1F;
const EXTENDED_DATA_MASK: u32 = 0x3F_FFFF;

/// Additional fractional bits of extended replies compared to the 16-bit register value
pub const EXTENDED_FRACTION_BITS: u32 = 6;

/// Command frame sent to the device
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame(u32);

impl Frame {
    /// Creates a register write frame. Only the lower 7 bits of the address are transmitted.
    pub fn write(address: u16, data: u16) -> Self {
        Self((((address as u32) & ADDRESS_MASK) << ADDRESS_SHIFT) | RW_BIT | data as u32)
    }

    /// Creates a register read frame. The full address is placed into the data bits.
    pub fn read(address: u16) -> Self {
        Self(address as u32)
    }

    /// Read of address zero, used to clock out the reply of the preceding frame
    pub fn filler() -> Self {
        Self::read(0).with_crc()
    }

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Returns the frame with the CRC byte filled in
    pub fn with_crc(self) -> Self {
        Self(install_crc(self.0))
    }

    pub fn has_valid_crc(&self) -> bool {
        verify_crc(self.0)
    }

    pub fn crc(&self) -> u8 {
        (self.0 >> CRC_SHIFT) as u8
    }

    /// 7-bit address field (always zero for read frames)
    pub fn address(&self) -> u8 {
        ((self.0 >> ADDRESS_SHIFT) & ADDRESS_MASK) as u8
    }

    pub fn is_write(&self) -> bool {
        self.0 & RW_BIT != 0
    }

    /// Data field, holding the register address in case of read frames
    pub fn data(&self) -> u16 {
        (self.0 & DATA_MASK) as u16
    }
}

/// Reply layout selector (bits 23:22)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplyMode {
    /// 16-bit data with status
    Standard = 0b00,
    /// 22-bit data, used for high resolution feedback
    Extended = 0b01,
    /// Critical fault frame
    CriticalFault = 0b10,
    Reserved = 0b11,
}

impl ReplyMode {
    pub fn from_frame(raw: u32) -> Self {
        match (raw >> REPLY_MODE_SHIFT) & 0b11 {
            0b00 => Self::Standard,
            0b01 => Self::Extended,
            0b10 => Self::CriticalFault,
            _ => Self::Reserved,
        }
    }
}

/// Decoded reply frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplyFrame {
    Standard {
        /// Status of the previous command, zero on success
        status: u8,
        /// Echoed read/write bit
        write: bool,
        data: u16,
    },
    Extended {
        data: u32,
    },
    CriticalFault(CriticalFaults),
    Reserved(u32),
}

impl ReplyFrame {
    /// Decodes a raw reply word. No CRC verification is done here.
    pub fn decode(raw: u32) -> Self {
        match ReplyMode::from_frame(raw) {
            ReplyMode::Standard => Self::Standard {
                status: ((raw >> STATUS_SHIFT) & STATUS_MASK) as u8,
                write: raw & RW_BIT != 0,
                data: (raw & DATA_MASK) as u16,
            },
            ReplyMode::Extended => Self::Extended {
                data: raw & EXTENDED_DATA_MASK,
            },
            ReplyMode::CriticalFault => Self::CriticalFault(CriticalFaults::from_register(raw as u8)),
            ReplyMode::Reserved => Self::Reserved(raw),
        }
    }

    /// Encodes the reply as sent by the device, including CRC
    pub fn encode(&self) -> u32 {
        match *self {
            Self::Standard { status, write, data } => install_crc(
                ((status as u32 & STATUS_MASK) << STATUS_SHIFT) | ((write as u32) << 16) | data as u32,
            ),
            Self::Extended { data } => {
                install_crc(((ReplyMode::Extended as u32) << REPLY_MODE_SHIFT) | (data & EXTENDED_DATA_MASK))
            }
            Self::CriticalFault(faults) => {
                ((ReplyMode::CriticalFault as u32) << REPLY_MODE_SHIFT) | faults.as_register() as u32
            }
            Self::Reserved(raw) => raw,
        }
    }

    pub fn mode(&self) -> ReplyMode {
        match self {
            Self::Standard { .. } => ReplyMode::Standard,
            Self::Extended { .. } => ReplyMode::Extended,
            Self::CriticalFault(_) => ReplyMode::CriticalFault,
            Self::Reserved(_) => ReplyMode::Reserved,
        }
    }

    /// Returns the 16-bit register value of standard and extended replies
    pub fn value(&self) -> Option<u16> {
        match *self {
            Self::Standard { data, .. } => Some(data),
            Self::Extended { data } => Some((data >> EXTENDED_FRACTION_BITS) as u16),
            _ => None,
        }
    }

    /// Returns the raw payload of standard and extended replies
    pub fn data(&self) -> Option<u32> {
        match *self {
            Self::Standard { data, .. } => Some(data as u32),
            Self::Extended { data } => Some(data),
            _ => None,
        }
    }
}
