// src/testutil.rs

//! Shared mock bus, delay and connection implementations for unit tests.

use crate::common::registers::{REG_GET_BUSY, REG_GET_CAPACITANCE, REG_GET_VERSION};
use crate::common::Connection;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{
    self, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};
use heapless::Vec;

const WRITE_LOG_CAPACITY: usize = 2048;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum MockBusError {
    Nack,
}

impl i2c::Error for MockBusError {
    fn kind(&self) -> i2c::ErrorKind {
        match self {
            MockBusError::Nack => {
                i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
        }
    }
}

/// One simulated sensor on the mock bus.
#[derive(Debug, Clone)]
pub(crate) struct MockDevice {
    pub address: u8,
    pub raw_capacitance: u16,
    /// Number of busy polls answered with "busy" before reporting ready.
    pub busy_polls_until_ready: u32,
    last_register: u8,
}

impl MockDevice {
    pub fn new(address: u8, raw_capacitance: u16) -> Self {
        MockDevice {
            address,
            raw_capacitance,
            busy_polls_until_ready: 0,
            last_register: 0,
        }
    }
}

/// Mock I2C bus with an optional multiplexer and channel-scoped devices.
///
/// Writing a channel mask to the mux control address switches which devices
/// acknowledge, mirroring the physical segment routing.
pub(crate) struct MockBus {
    /// Devices and the channel they live on; `None` means visible on every
    /// channel (single-segment tests).
    devices: Vec<(Option<u8>, MockDevice), 8>,
    /// Every attempted write, acknowledged or not: (address, data).
    pub writes: Vec<(u8, Vec<u8, 4>), WRITE_LOG_CAPACITY>,
    pub mux_present: bool,
    pub mux_address: u8,
    pub selected_channel: Option<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        MockBus {
            devices: Vec::new(),
            writes: Vec::new(),
            mux_present: true,
            mux_address: crate::common::registers::MUX_CONTROL_ADDRESS,
            selected_channel: None,
        }
    }

    /// Adds a device visible regardless of channel selection.
    pub fn add_device(&mut self, device: MockDevice) {
        self.devices.push((None, device)).unwrap();
    }

    /// Adds a device visible only while `channel` is selected.
    pub fn add_device_on_channel(&mut self, channel: u8, device: MockDevice) {
        self.devices.push((Some(channel), device)).unwrap();
    }

    fn log_write(&mut self, address: u8, data: &[u8]) {
        let mut copy = Vec::new();
        copy.extend_from_slice(data).unwrap();
        let _ = self.writes.push((address, copy));
    }

    fn visible_device(&mut self, address: u8) -> Option<&mut MockDevice> {
        let selected = self.selected_channel;
        self.devices
            .iter_mut()
            .find(|(channel, device)| {
                device.address == address
                    && (channel.is_none() || *channel == selected)
            })
            .map(|(_, device)| device)
    }
}

impl ErrorType for MockBus {
    type Error = MockBusError;
}

impl I2c<SevenBitAddress> for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        // Log writes first so failed probes show up in the log too.
        for op in operations.iter() {
            if let Operation::Write(data) = op {
                self.log_write(address, data);
            }
        }

        if address == self.mux_address {
            if !self.mux_present {
                return Err(MockBusError::Nack);
            }
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    if let Some(mask) = data.first() {
                        if mask.count_ones() == 1 {
                            self.selected_channel = Some(mask.trailing_zeros() as u8);
                        }
                    }
                }
            }
            return Ok(());
        }

        if self.visible_device(address).is_none() {
            return Err(MockBusError::Nack);
        }

        for op in operations.iter_mut() {
            let device = self.visible_device(address).unwrap();
            match op {
                Operation::Write(data) => {
                    if let Some(register) = data.first() {
                        device.last_register = *register;
                    }
                }
                Operation::Read(buffer) => match device.last_register {
                    REG_GET_BUSY => {
                        if device.busy_polls_until_ready > 0 {
                            device.busy_polls_until_ready -= 1;
                            buffer[0] = 1;
                        } else {
                            buffer[0] = 0;
                        }
                    }
                    REG_GET_CAPACITANCE => {
                        buffer[..2].copy_from_slice(&device.raw_capacitance.to_be_bytes());
                    }
                    REG_GET_VERSION => buffer[0] = 0x26,
                    _ => buffer.fill(0),
                },
            }
        }
        Ok(())
    }
}

/// Delay provider that only accumulates requested time.
#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        MockDelay::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum MockConnError {
    Closed,
}

/// Scripted connection: serves staged inbound bytes, records outbound ones.
pub(crate) struct MockConnection {
    inbound: Vec<u8, 256>,
    pub read_pos: usize,
    pub outbound: Vec<u8, 8192>,
    /// When set, every read reports `WouldBlock` (stalled peer).
    pub stalled: bool,
    pub flushes: usize,
}

impl MockConnection {
    pub fn with_request(bytes: &[u8]) -> Self {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(bytes).unwrap();
        MockConnection {
            inbound,
            read_pos: 0,
            outbound: Vec::new(),
            stalled: false,
            flushes: 0,
        }
    }

    pub fn stalled() -> Self {
        let mut conn = Self::with_request(b"");
        conn.stalled = true;
        conn
    }
}

impl Connection for MockConnection {
    type Error = MockConnError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if self.stalled {
            return Err(nb::Error::WouldBlock);
        }
        if self.read_pos < self.inbound.len() {
            let byte = self.inbound[self.read_pos];
            self.read_pos += 1;
            Ok(byte)
        } else {
            // Peer closed the connection with no further data.
            Err(nb::Error::Other(MockConnError::Closed))
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.outbound
            .push(byte)
            .map_err(|_| nb::Error::Other(MockConnError::Closed))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}
