//! # Simulated device for doc examples
//!
//! [ExampleTransport] answers like a real device: replies are delayed by one frame, carry a CRC and
//! write frames only address the lower 7 bits of the register space.
use crate::frame::{Frame, ReplyFrame};
use crate::registers::{
    ADDRESS_MASK, REGISTER_CHIPID0, REGISTER_CHIPID1, REGISTER_CHIPID2, REGISTER_DIAG_OC, REGISTER_DIAG_WARN,
    REGISTER_GLOBAL_DIAG0, REGISTER_GLOBAL_DIAG2, REGISTER_ICVID,
};
use crate::transport::Transport;
use alloc::vec;
use alloc::vec::Vec;
use byteorder::{BigEndian, ByteOrder};
use core::cell::RefCell;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use embedded_time::clock::Error;
use embedded_time::duration::{Duration, Fraction};
use embedded_time::fixed_point::FixedPoint;
use embedded_time::timer::param::{Armed, OneShot};
use embedded_time::{Clock, Instant, Timer};

const REGISTER_SPACE: usize = ADDRESS_MASK as usize + 1;

/// Status code answered for frames with invalid CRC
const STATUS_CRC_ERROR: u8 = 2;

#[derive(Debug)]
pub struct ExampleTransport {
    registers: [u16; REGISTER_SPACE],

    /// Reply clocked out with the next frame
    pending: u32,
}

impl Default for ExampleTransport {
    fn default() -> Self {
        let mut registers = [0u16; REGISTER_SPACE];
        registers[REGISTER_ICVID as usize] = 0x9201;
        registers[REGISTER_CHIPID0 as usize] = 0x5678;
        registers[REGISTER_CHIPID1 as usize] = 0x1234;
        registers[REGISTER_CHIPID2 as usize] = 0x00AB;

        Self { registers, pending: 0 }
    }
}

impl ExampleTransport {
    /// Current value of the simulated register
    pub fn register(&self, address: u16) -> u16 {
        self.registers[(address & ADDRESS_MASK) as usize]
    }

    fn process(&mut self, frame: Frame) -> ReplyFrame {
        if !frame.has_valid_crc() {
            return ReplyFrame::Standard {
                status: STATUS_CRC_ERROR,
                write: frame.is_write(),
                data: 0,
            };
        }

        if !frame.is_write() {
            return ReplyFrame::Standard {
                status: 0,
                write: false,
                data: self.register(frame.data()),
            };
        }

        let address = frame.address() as u16;
        let register = &mut self.registers[address as usize];

        if Self::is_latched(address) {
            *register &= !frame.data();
        } else {
            *register = frame.data();
        }

        ReplyFrame::Standard {
            status: 0,
            write: true,
            data: 0,
        }
    }

    /// Diagnosis registers are cleared by writing ones
    fn is_latched(address: u16) -> bool {
        (REGISTER_GLOBAL_DIAG0..=REGISTER_GLOBAL_DIAG2).contains(&address)
            || (REGISTER_DIAG_OC..=REGISTER_DIAG_WARN).contains(&address)
    }
}

impl Transport for ExampleTransport {
    type Error = Infallible;

    fn exchange(&mut self, frame: u32) -> Result<u32, Self::Error> {
        let reply = self.pending;
        self.pending = self.process(Frame::from_raw(frame)).encode();
        Ok(reply)
    }

    fn delay_us(&mut self, _micros: u32) {}
}

/// SPI device wrapping the simulated device
#[derive(Debug, Default)]
pub struct ExampleSPIDevice {
    device: ExampleTransport,
}

impl ErrorType for ExampleSPIDevice {
    type Error = Infallible;
}

impl SpiDevice<u8> for ExampleSPIDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for operation in operations {
            if let Operation::TransferInPlace(buffer) = operation {
                if buffer.len() == 4 {
                    let reply = self.device.exchange(BigEndian::read_u32(buffer))?;
                    BigEndian::write_u32(buffer, reply);
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ExampleDelay {}

impl DelayNs for ExampleDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Debug, PartialEq, Eq)]
pub struct ExampleClock {
    pub next_instants: RefCell<Vec<u64>>,
}

impl ExampleClock {
    pub fn new(next_instants: Vec<u64>) -> Self {
        Self {
            next_instants: RefCell::new(next_instants),
        }
    }
}

impl Default for ExampleClock {
    fn default() -> Self {
        Self::new(vec![
            100, // Device poll: Timer start
            200, // Device poll: First expiration check
        ])
    }
}

impl Clock for ExampleClock {
    type T = u64;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, Error> {
        if self.next_instants.borrow().len() == 0 {
            return Err(Error::Unspecified);
        }

        Ok(Instant::new(self.next_instants.borrow_mut().remove(0)))
    }

    fn new_timer<Dur: Duration + FixedPoint>(&self, duration: Dur) -> Timer<OneShot, Armed, Self, Dur> {
        Timer::new(self, duration)
    }
}
