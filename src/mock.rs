//! Recording doubles for the bus, pins, timer and I2C used by the unit tests.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{self, Operation};
use embedded_hal::spi::{self, ErrorKind};

#[cfg(feature = "async")]
macro_rules! block {
    ($e:expr) => {
        embassy_futures::block_on($e)
    };
}

#[cfg(not(feature = "async"))]
macro_rules! block {
    ($e:expr) => {
        $e
    };
}
pub(crate) use block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
    Bl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    Write(Vec<u8>),
    Flush,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// A CS-delimited transfer as the controller sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Command(u8),
    Data(Vec<u8>),
}

/// Group the raw event log into CS frames, classified by the D/C level at
/// the moment CS went low.
pub fn decode_frames(events: &[Event]) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut dc = false;
    let mut open: Option<(bool, Vec<u8>)> = None;

    for event in events {
        match event {
            Event::Pin(Line::Dc, level) => {
                assert!(open.is_none(), "D/C changed inside a CS frame");
                dc = *level;
            }
            Event::Pin(Line::Cs, false) => open = Some((dc, Vec::new())),
            Event::Pin(Line::Cs, true) => {
                if let Some((is_data, bytes)) = open.take() {
                    if is_data {
                        frames.push(Frame::Data(bytes));
                    } else {
                        assert_eq!(bytes.len(), 1, "command frame must carry one byte");
                        frames.push(Frame::Command(bytes[0]));
                    }
                }
            }
            Event::Write(bytes) => {
                let (_, buf) = open.as_mut().expect("write outside a CS frame");
                buf.extend_from_slice(bytes);
            }
            _ => {}
        }
    }
    frames
}

/// Commands only, in wire order.
pub fn commands(frames: &[Frame]) -> Vec<u8> {
    frames
        .iter()
        .filter_map(|f| match f {
            Frame::Command(c) => Some(*c),
            Frame::Data(_) => None,
        })
        .collect()
}

/// The data frame that directly follows the last occurrence of `command`.
pub fn data_after(frames: &[Frame], command: u8) -> Option<Vec<u8>> {
    let pos = frames.iter().rposition(|f| *f == Frame::Command(command))?;
    match frames.get(pos + 1) {
        Some(Frame::Data(bytes)) => Some(bytes.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address)
    }
}

pub struct MockBus {
    log: Log,
    writes_left: Option<usize>,
}

impl MockBus {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            writes_left: None,
        }
    }

    /// Accept `writes` transfers, then fail every following one.
    pub fn failing_after(log: &Log, writes: usize) -> Self {
        Self {
            log: log.clone(),
            writes_left: Some(writes),
        }
    }

    fn record_write(&mut self, words: &[u8]) -> Result<(), MockError> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(MockError);
            }
            *left -= 1;
        }
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }
}

impl spi::ErrorType for MockBus {
    type Error = MockError;
}

impl spi::SpiBus for MockBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.record_write(words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.record_write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let copy = words.to_vec();
        self.record_write(&copy)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::spi::SpiBus for MockBus {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        spi::SpiBus::read(self, words)
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        spi::SpiBus::write(self, words)
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        spi::SpiBus::transfer(self, read, write)
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        spi::SpiBus::transfer_in_place(self, words)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        spi::SpiBus::flush(self)
    }
}

pub struct MockPin {
    line: Line,
    log: Log,
}

impl MockPin {
    pub fn new(line: Line, log: &Log) -> Self {
        Self {
            line,
            log: log.clone(),
        }
    }
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, true));
        Ok(())
    }
}

std::thread_local! {
    static DELAYS: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Timer that returns immediately and remembers what it was asked to wait.
pub struct MockTimer;

impl MockTimer {
    pub fn take_delays() -> Vec<u64> {
        DELAYS.with(|d| core::mem::take(&mut *d.borrow_mut()))
    }

    fn record(milliseconds: u64) {
        DELAYS.with(|d| d.borrow_mut().push(milliseconds));
    }
}

#[cfg(feature = "async")]
impl crate::Timer for MockTimer {
    async fn delay_ms(milliseconds: u64) {
        MockTimer::record(milliseconds);
    }
}

#[cfg(not(feature = "async"))]
impl crate::Timer for MockTimer {
    fn delay_ms(milliseconds: u64) {
        MockTimer::record(milliseconds);
    }
}

/// Register-file I2C target.
pub struct MockI2c {
    pub address: u8,
    pub registers: [u8; 256],
    pub reads: Vec<u8>,
    pointer: u8,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 256],
            reads: Vec::new(),
            pointer: 0,
        }
    }

    fn run(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), MockError> {
        if address != self.address {
            return Err(MockError);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some(&reg) = bytes.first() {
                        self.pointer = reg;
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        self.reads.push(self.pointer);
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = MockError;
}

impl i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}
