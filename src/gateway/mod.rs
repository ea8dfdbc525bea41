// src/gateway/mod.rs

//! Channel-by-channel scan orchestration.
//!
//! The gateway owns the bus and the delay provider; the multiplexer, the
//! segment scan and each sensor's protocol run borrow them in strict
//! sequence. There is no concurrency to arbitrate: one channel is selected,
//! scanned and read to completion before the next.

use crate::common::timing::{pause, READ_POLL_INTERVAL};
use crate::common::{registers::MUX_CONTROL_ADDRESS, MuxChannel};
use crate::mux::ChannelSelector;
use crate::report::{ChannelReport, ScanReport};
use crate::scan::scan_segment;
use crate::sensor::SoilSensor;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Owns the multiplexed bus and runs full scans on demand.
#[derive(Debug)]
pub struct Gateway<I2C, D> {
    bus: I2C,
    delay: D,
    control_address: u8,
}

impl<I2C, D> Gateway<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(bus: I2C, delay: D) -> Self {
        Self::with_control_address(bus, delay, MUX_CONTROL_ADDRESS)
    }

    pub fn with_control_address(bus: I2C, delay: D, control_address: u8) -> Self {
        Gateway {
            bus,
            delay,
            control_address,
        }
    }

    /// Runs one full channel-by-channel scan and returns a fresh report.
    ///
    /// Each scan channel is selected, probed exhaustively, and every
    /// acknowledging sensor is driven through its measurement protocol
    /// before the next channel is touched. Failures degrade rather than
    /// abort: a channel whose selection fails reports no readings, and an
    /// unresponsive or faulting sensor is omitted from its channel.
    pub fn scan_all(&mut self) -> ScanReport {
        let mut report = ScanReport::new();
        for channel in MuxChannel::scan_range() {
            let mut entry = ChannelReport::new(channel);
            let selected =
                ChannelSelector::with_control_address(&mut self.bus, self.control_address)
                    .select(channel)
                    .is_ok();
            if selected {
                for address in scan_segment(&mut self.bus, self.control_address) {
                    match SoilSensor::new(&mut self.bus, &mut self.delay, address).read() {
                        // Readings arrive in ascending address order from the scan.
                        Ok(reading) => {
                            let _ = entry.readings.push(reading);
                        }
                        // Unresponsive or mid-protocol fault: omitted from
                        // this request's report, not surfaced.
                        Err(_) => {}
                    }
                }
            }
            // Capacity matches the scan range, push cannot fail.
            let _ = report.push_channel(entry);
        }
        report
    }

    /// One poll-interval pause, used by the request handler between
    /// connection polls.
    pub(crate) fn poll_pause(&mut self) {
        pause(&mut self.delay, READ_POLL_INTERVAL);
    }

    /// Releases the underlying bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.bus, self.delay)
    }
}
