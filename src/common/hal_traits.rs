// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for one accepted TCP connection.
///
/// The surrounding firmware owns the network stack and connection
/// acceptance; it hands a single connection at a time to the
/// [`RequestHandler`](crate::server::RequestHandler), which reads the
/// request line and writes the response through this trait. Closing the
/// connection afterwards is the caller's job.
pub trait Connection {
    /// Associated error type for transport errors, including the peer
    /// closing the connection mid-request.
    type Error: Debug;

    /// Attempts to read a single byte from the connection.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the connection.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or
    /// `Err(nb::Error::WouldBlock)` if the write buffer is full. Other errors
    /// are returned as `Err(nb::Error::Other(Self::Error))`.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have
    /// been handed to the network stack.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
