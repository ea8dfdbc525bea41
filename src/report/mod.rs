// src/report/mod.rs

//! Per-request result model and JSON rendering.
//!
//! A [`ScanReport`] is assembled fresh for every inbound request, lives on
//! the caller's stack, and is discarded once serialized. No sensor data
//! persists across requests.

pub mod json;

pub use json::{ReportBuilder, ReportError};

use crate::common::{DeviceAddress, MuxChannel};
use crate::scan::MAX_DEVICES_PER_CHANNEL;
use heapless::{String, Vec};

/// One sensor's scaled measurement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    pub address: DeviceAddress,
    /// Raw capacitance register value scaled by the fixed reporting factor.
    pub capacitance: u32,
}

/// All readings gathered on one channel, in ascending address order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelReport {
    pub channel: MuxChannel,
    pub readings: Vec<SensorReading, MAX_DEVICES_PER_CHANNEL>,
}

impl ChannelReport {
    pub fn new(channel: MuxChannel) -> Self {
        ChannelReport {
            channel,
            readings: Vec::new(),
        }
    }
}

/// One full channel-by-channel scan, in channel order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    channels: Vec<ChannelReport, { MuxChannel::SCAN_COUNT as usize }>,
}

impl ScanReport {
    pub fn new() -> Self {
        ScanReport {
            channels: Vec::new(),
        }
    }

    /// Appends the next channel's results. Channels beyond the scan range
    /// are rejected by capacity.
    pub fn push_channel(&mut self, report: ChannelReport) -> Result<(), ChannelReport> {
        self.channels.push(report)
    }

    pub fn channels(&self) -> &[ChannelReport] {
        &self.channels
    }

    /// Renders the report as the complete JSON document, a flat string
    /// beginning and ending with the outer object braces.
    pub fn render<const N: usize>(&self) -> Result<String<N>, ReportError> {
        let mut builder = ReportBuilder::new()?;
        for channel in &self.channels {
            builder.append(channel)?;
        }
        builder.finish()
    }
}
