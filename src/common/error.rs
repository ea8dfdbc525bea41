// src/common/error.rs

use super::address::DeviceAddress;
use crate::report::json::ReportError;

#[derive(Debug, thiserror::Error)]
pub enum SoilMuxError<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying bus or connection error from the HAL implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// Operation timed out (stalled connection, no data before the poll budget ran out).
    #[error("Operation timed out")]
    Timeout,

    /// Sensor acknowledged the probe but its busy flag never cleared within
    /// the poll budget. The sensor is omitted from the current report.
    #[error("Sensor at address {address} unresponsive")]
    SensorUnresponsive { address: DeviceAddress },

    /// Raw value is not a usable sensor address (zero, above the 7-bit range,
    /// or the multiplexer's own control address).
    #[error("Invalid device address: {0:#04x}")]
    InvalidAddress(u8),

    /// Raw value is not a selectable multiplexer channel.
    #[error("Invalid multiplexer channel: {0}")]
    InvalidChannel(u8),

    /// Buffer provided was too small.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// JSON document assembly failed.
    #[error("Report serialization failed: {0}")]
    Report(ReportError),
}

// Allow mapping from underlying HAL error if From is implemented
impl<E: core::fmt::Debug> From<E> for SoilMuxError<E> {
    fn from(e: E) -> Self {
        SoilMuxError::Io(e)
    }
}
