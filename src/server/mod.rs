// src/server/mod.rs

//! Minimal single-request HTTP responder.
//!
//! One connection is handled to completion before the caller accepts the
//! next; there is no concurrent request handling. Only the first request
//! line is read, up to and including the first newline. A `GET ` prefix
//! triggers a full scan and the JSON response; anything else gets zero
//! response bytes and the caller closes the connection.

use crate::common::timing::READ_POLL_MAX_ATTEMPTS;
use crate::common::{Connection, SoilMuxError};
use crate::gateway::Gateway;
use arrayvec::ArrayVec;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Fixed status/header block preceding every JSON body.
pub const RESPONSE_HEADER: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n";

/// Request line prefix that triggers a scan.
const GET_PREFIX: &[u8] = b"GET ";

/// Longest accepted request line, including the newline.
pub const REQUEST_LINE_CAPACITY: usize = 96;

/// Default capacity of the rendered JSON document.
///
/// Sized for sparsely populated segments: a worst-case sensor entry
/// (three-digit address, six-digit capacitance) takes 36 bytes, so this
/// holds roughly 110 of them plus the six channel wrappers. A fully
/// populated bus (126 sensors on all six channels) renders to about 26 KiB;
/// deployments anywhere near that density must override the handler's `N`
/// parameter or [`handle`](RequestHandler::handle) fails with
/// [`ReportError::Overflow`](crate::report::ReportError) before writing
/// anything.
pub const DEFAULT_REPORT_CAPACITY: usize = 4096;

/// Network identity for the out-of-scope bring-up collaborator.
///
/// The core never reads these values; they exist so the firmware's network
/// initialization is configured in one place instead of literals spread
/// through application code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServerConfig {
    pub mac: [u8; 6],
    pub ip: [u8; 4],
    pub gateway: [u8; 4],
    pub dns: [u8; 4],
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            mac: [0xDE, 0xAD, 0xBE, 0xEF, 0xFE, 0xED],
            ip: [192, 168, 1, 177],
            gateway: [192, 168, 1, 1],
            dns: [192, 168, 1, 1],
            port: 80,
        }
    }
}

/// How a connection was concluded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestOutcome {
    /// Request line matched, scan ran, response written.
    Served,
    /// Request line did not match; zero bytes written.
    Rejected,
}

/// Parses one inbound request and emits the HTTP response.
#[derive(Debug)]
pub struct RequestHandler<'a, I2C, D, const N: usize = DEFAULT_REPORT_CAPACITY> {
    gateway: &'a mut Gateway<I2C, D>,
}

impl<'a, I2C, D, const N: usize> RequestHandler<'a, I2C, D, N>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(gateway: &'a mut Gateway<I2C, D>) -> Self {
        RequestHandler { gateway }
    }

    /// Handles one connection to completion.
    ///
    /// Runs scan and response synchronously; the caller closes the
    /// connection afterwards regardless of outcome.
    pub fn handle<C>(&mut self, conn: &mut C) -> Result<RequestOutcome, SoilMuxError<C::Error>>
    where
        C: Connection,
    {
        let line = self.read_request_line(conn)?;
        if !line.starts_with(GET_PREFIX) {
            return Ok(RequestOutcome::Rejected);
        }

        let report = self.gateway.scan_all();
        let body = report.render::<N>().map_err(SoilMuxError::Report)?;

        self.write_all(conn, RESPONSE_HEADER.as_bytes())?;
        self.write_all(conn, body.as_bytes())?;
        self.block_on(conn, |c| c.flush())?;
        Ok(RequestOutcome::Served)
    }

    /// Reads inbound bytes up to and including the first newline. Headers,
    /// body and further request lines are never read.
    fn read_request_line<C>(
        &mut self,
        conn: &mut C,
    ) -> Result<ArrayVec<u8, REQUEST_LINE_CAPACITY>, SoilMuxError<C::Error>>
    where
        C: Connection,
    {
        let mut line = ArrayVec::new();
        loop {
            let byte = self.block_on(conn, |c| c.read_byte())?;
            if line.try_push(byte).is_err() {
                return Err(SoilMuxError::BufferOverflow {
                    needed: line.len() + 1,
                    got: REQUEST_LINE_CAPACITY,
                });
            }
            if byte == b'\n' {
                return Ok(line);
            }
        }
    }

    fn write_all<C>(&mut self, conn: &mut C, bytes: &[u8]) -> Result<(), SoilMuxError<C::Error>>
    where
        C: Connection,
    {
        for byte in bytes {
            self.block_on(conn, |c| c.write_byte(*byte))?;
        }
        Ok(())
    }

    /// Polls a non-blocking connection operation until it completes, with a
    /// fixed pause between polls and a bounded attempt budget.
    fn block_on<C, T, F>(&mut self, conn: &mut C, mut f: F) -> Result<T, SoilMuxError<C::Error>>
    where
        C: Connection,
        F: FnMut(&mut C) -> nb::Result<T, C::Error>,
    {
        for _ in 0..READ_POLL_MAX_ATTEMPTS {
            match f(conn) {
                Ok(value) => return Ok(value),
                Err(nb::Error::WouldBlock) => self.gateway.poll_pause(),
                Err(nb::Error::Other(e)) => return Err(SoilMuxError::Io(e)),
            }
        }
        Err(SoilMuxError::Timeout)
    }
}
