// src/mux.rs

//! Channel selection on the TCA9548-style multiplexer.

use crate::common::{registers::MUX_CONTROL_ADDRESS, MuxChannel, SoilMuxError};
use embedded_hal::i2c::I2c;

/// Routes subsequent bus transactions to one of the multiplexer's physical
/// output channels.
///
/// Selection is a one-shot side-effecting write: the switch keeps routing to
/// the selected segment until the next select. The selector borrows the bus
/// only for the duration of the call chain, so sensor transactions on the
/// selected segment can follow immediately.
#[derive(Debug)]
pub struct ChannelSelector<'b, I2C> {
    bus: &'b mut I2C,
    control_address: u8,
}

impl<'b, I2C> ChannelSelector<'b, I2C>
where
    I2C: I2c,
{
    pub fn new(bus: &'b mut I2C) -> Self {
        Self::with_control_address(bus, MUX_CONTROL_ADDRESS)
    }

    /// For boards strapping the multiplexer's address pins away from the
    /// default.
    pub fn with_control_address(bus: &'b mut I2C, control_address: u8) -> Self {
        ChannelSelector {
            bus,
            control_address,
        }
    }

    /// Selects `channel` by writing its one-bit control word to the switch.
    pub fn select(&mut self, channel: MuxChannel) -> Result<(), SoilMuxError<I2C::Error>> {
        self.bus
            .write(self.control_address, &[channel.select_mask()])
            .map_err(SoilMuxError::Io)
    }

    /// Selects by raw index. Indices outside the physical channel range are
    /// silently ignored: no bus write happens and no error is surfaced.
    pub fn select_index(&mut self, index: u8) -> Result<(), SoilMuxError<I2C::Error>> {
        match MuxChannel::new(index) {
            Ok(channel) => self.select(channel),
            Err(_) => Ok(()),
        }
    }
}
