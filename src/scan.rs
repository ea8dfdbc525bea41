// src/scan.rs

//! Presence scan of the currently selected bus segment.

use crate::common::DeviceAddress;
use embedded_hal::i2c::I2c;
use heapless::Vec;

/// Upper bound on devices a single segment can hold: every candidate
/// address could acknowledge.
pub const MAX_DEVICES_PER_CHANNEL: usize = 126;

/// Probes every candidate address on the currently selected channel and
/// returns the subset that acknowledged, in ascending address order.
///
/// Presence is inferred solely from the success of a zero-length write; a
/// single failed attempt means "absent", with no retry and no error
/// surfaced. `control_address` is the multiplexer's own address and is never
/// probed: the switch acknowledges on every segment and would otherwise be
/// reported as a sensor. The caller must have selected the channel
/// beforehand via [`ChannelSelector`](crate::mux::ChannelSelector).
pub fn scan_segment<I2C>(
    bus: &mut I2C,
    control_address: u8,
) -> Vec<DeviceAddress, MAX_DEVICES_PER_CHANNEL>
where
    I2C: I2c,
{
    let mut found = Vec::new();
    for candidate in DeviceAddress::candidates_excluding(control_address) {
        if bus.write(candidate.get(), &[]).is_ok() {
            // Capacity equals the candidate count, push cannot fail.
            let _ = found.push(candidate);
        }
    }
    found
}
