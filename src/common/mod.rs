// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod error;
pub mod hal_traits;
pub mod registers;
pub mod timing;

// --- Re-export key types/traits for easier access ---

// From address.rs
pub use address::{DeviceAddress, MuxChannel};

// From error.rs
pub use error::SoilMuxError;

// From hal_traits.rs
pub use hal_traits::Connection;

// From registers.rs (constants - users can also access via common::registers::*)
pub use registers::MUX_CONTROL_ADDRESS;
