// src/common/address.rs

use super::error::SoilMuxError;
use super::registers::MUX_CONTROL_ADDRESS;
use core::convert::TryFrom;
use core::fmt;

/// A 7-bit bus address that may hold a sensor.
///
/// Valid addresses are 1..=127, excluding the multiplexer's own control
/// address. The exclusion is the range-exclusion rule: the multiplexer
/// answers on [`MUX_CONTROL_ADDRESS`] on every segment, so treating it as a
/// sensor would report the switch itself as a device.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Lowest probe-able address. Address 0 is the I2C general call.
    pub const MIN: u8 = 0x01;
    /// Highest 7-bit address.
    pub const MAX: u8 = 0x7F;

    /// Creates a new `DeviceAddress` if the given value is a valid sensor
    /// address. Returns `Result<Self, SoilMuxError<()>>` because validation
    /// itself cannot cause an I/O error.
    pub fn new(raw: u8) -> Result<Self, SoilMuxError<()>> {
        if Self::is_reserved(raw) || raw < Self::MIN || raw > Self::MAX {
            Err(SoilMuxError::InvalidAddress(raw))
        } else {
            Ok(DeviceAddress(raw))
        }
    }

    pub const unsafe fn new_unchecked(raw: u8) -> Self {
        DeviceAddress(raw)
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// The named range-exclusion rule: true for the one address in the probe
    /// range that commands the multiplexer rather than a sensor.
    #[inline]
    pub const fn is_reserved(raw: u8) -> bool {
        raw == MUX_CONTROL_ADDRESS
    }

    /// All probe candidates in ascending order: 1..=127 minus the default
    /// control address. Scan order on the bus follows this iterator exactly.
    pub fn candidates() -> impl Iterator<Item = DeviceAddress> {
        Self::candidates_excluding(MUX_CONTROL_ADDRESS)
    }

    /// Probe candidates for a segment whose multiplexer is strapped to
    /// `control_address`: 1..=127 minus that one address, ascending. The
    /// default control address becomes a regular candidate when the switch
    /// sits elsewhere.
    pub fn candidates_excluding(control_address: u8) -> impl Iterator<Item = DeviceAddress> {
        (Self::MIN..=Self::MAX)
            .filter(move |raw| *raw != control_address)
            .map(DeviceAddress)
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = SoilMuxError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceAddress> for u8 {
    fn from(value: DeviceAddress) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the multiplexer's physical output channels.
///
/// Eight channels are selectable; a scan pass covers the first six in order
/// (see [`MuxChannel::scan_range`]).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxChannel(u8);

impl MuxChannel {
    /// Number of selectable channels on the switch.
    pub const COUNT: u8 = 8;
    /// Number of channels covered by one scan pass.
    pub const SCAN_COUNT: u8 = 6;

    /// Creates a new `MuxChannel` if the index addresses a physical channel.
    pub fn new(index: u8) -> Result<Self, SoilMuxError<()>> {
        if index < Self::COUNT {
            Ok(MuxChannel(index))
        } else {
            Err(SoilMuxError::InvalidChannel(index))
        }
    }

    pub const unsafe fn new_unchecked(index: u8) -> Self {
        MuxChannel(index)
    }

    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Single-byte control word selecting this channel: one bit per channel.
    #[inline]
    pub const fn select_mask(&self) -> u8 {
        1 << self.0
    }

    /// Channels visited by a full scan, in channel order.
    pub fn scan_range() -> impl Iterator<Item = MuxChannel> {
        (0..Self::SCAN_COUNT).map(MuxChannel)
    }
}

impl TryFrom<u8> for MuxChannel {
    type Error = SoilMuxError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MuxChannel> for u8 {
    fn from(value: MuxChannel) -> Self {
        value.0
    }
}

impl fmt::Display for MuxChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
