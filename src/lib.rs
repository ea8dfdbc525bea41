// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod common;
pub mod gateway;
pub mod mux;
pub mod report;
pub mod scan;
pub mod sensor;
pub mod server;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export key types for convenience
pub use common::Connection;
pub use common::DeviceAddress;
pub use common::MuxChannel;
pub use common::SoilMuxError;
pub use gateway::Gateway;
pub use report::{ChannelReport, ScanReport, SensorReading};
pub use server::{RequestHandler, RequestOutcome, ServerConfig};
