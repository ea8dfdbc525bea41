// src/common/registers.rs

//! Bus-level constants for the multiplexer and the sensor register protocol.
//!
//! The multiplexer is a TCA9548-style switch: writing a single byte to its
//! control address routes the downstream segment, one bit per channel.
//! The sensors speak the chirp-style capacitive moisture register protocol:
//! write a register number, then read the register contents back.

/// Reserved 7-bit address of the multiplexer itself.
///
/// This address commands the switch and must never be probed or read as a
/// sensor; see [`DeviceAddress::is_reserved`](super::DeviceAddress::is_reserved).
pub const MUX_CONTROL_ADDRESS: u8 = 0x70;

/// Capacitance register: 16-bit big-endian raw moisture value.
pub const REG_GET_CAPACITANCE: u8 = 0x00;

/// Firmware version register. Reading it has no side effect, which makes it
/// the wake-up transaction of choice.
pub const REG_GET_VERSION: u8 = 0x07;

/// Writing this register number commands the sensor into low-power sleep.
pub const REG_SLEEP: u8 = 0x08;

/// Busy flag register: non-zero while a measurement is in progress.
pub const REG_GET_BUSY: u8 = 0x09;

/// Fixed scale factor applied to the raw capacitance value before reporting.
pub const CAPACITANCE_SCALE: u32 = 2;
