// src/report/json.rs

//! Structured JSON assembly for the scan report.
//!
//! The writer tracks "has this object already got a member" per nesting
//! level, so separators are emitted before the second and later members of
//! each object. Empty objects and final members need no special casing.

use super::ChannelReport;
use core::fmt::{self, Write as _};
use heapless::String;

/// Deepest nesting the writer supports: one bit of member-state per level.
const MAX_DEPTH: u32 = 31;

/// Error during JSON document assembly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// The output buffer filled up before the document was complete.
    #[error("document exceeds buffer capacity of {capacity} bytes")]
    Overflow { capacity: usize },

    /// Object open/close calls did not pair up.
    #[error("unbalanced object nesting")]
    Unbalanced,
}

/// Minimal JSON object writer over a fixed-capacity string.
///
/// Only what the report schema needs: nested objects with formatted keys and
/// unsigned integer fields.
#[derive(Debug)]
pub struct JsonWriter<const N: usize> {
    out: String<N>,
    depth: u32,
    /// Bit `d` set when the object at depth `d` already has a member.
    populated: u32,
}

impl<const N: usize> JsonWriter<N> {
    /// Opens the document's outer object.
    pub fn new() -> Result<Self, ReportError> {
        let mut writer = JsonWriter {
            out: String::new(),
            depth: 1,
            populated: 0,
        };
        writer.push_raw('{')?;
        Ok(writer)
    }

    fn push_raw(&mut self, c: char) -> Result<(), ReportError> {
        self.out
            .push(c)
            .map_err(|_| ReportError::Overflow { capacity: N })
    }

    fn write_args(&mut self, args: fmt::Arguments<'_>) -> Result<(), ReportError> {
        self.out
            .write_fmt(args)
            .map_err(|_| ReportError::Overflow { capacity: N })
    }

    /// Emits the member separator unless this is the first member of the
    /// object at the current depth.
    fn next_member(&mut self) -> Result<(), ReportError> {
        let bit = 1u32 << self.depth;
        if self.populated & bit != 0 {
            self.push_raw(',')?;
        } else {
            self.populated |= bit;
        }
        Ok(())
    }

    /// Opens a nested object under the given key.
    pub fn begin_object(&mut self, key: fmt::Arguments<'_>) -> Result<(), ReportError> {
        if self.depth >= MAX_DEPTH {
            return Err(ReportError::Unbalanced);
        }
        self.next_member()?;
        self.write_args(format_args!("\"{}\":{{", key))?;
        self.depth += 1;
        self.populated &= !(1u32 << self.depth);
        Ok(())
    }

    /// Writes one unsigned integer member under the given key.
    pub fn uint_field(&mut self, key: fmt::Arguments<'_>, value: u32) -> Result<(), ReportError> {
        self.next_member()?;
        self.write_args(format_args!("\"{}\":{}", key, value))
    }

    /// Closes the innermost nested object.
    pub fn end_object(&mut self) -> Result<(), ReportError> {
        if self.depth <= 1 {
            return Err(ReportError::Unbalanced);
        }
        self.push_raw('}')?;
        self.depth -= 1;
        Ok(())
    }

    /// Closes the outer object and returns the finished document.
    pub fn finish(mut self) -> Result<String<N>, ReportError> {
        if self.depth != 1 {
            return Err(ReportError::Unbalanced);
        }
        self.push_raw('}')?;
        Ok(self.out)
    }
}

/// Assembles the scan report document channel by channel.
///
/// Schema, keys derived from channel index and sensor address:
/// `{"vrstica<ch>":{"id":<ch>,"senzor<addr>":{"id":<addr>,"cap":<cap>},...},...}`
#[derive(Debug)]
pub struct ReportBuilder<const N: usize> {
    writer: JsonWriter<N>,
}

impl<const N: usize> ReportBuilder<N> {
    pub fn new() -> Result<Self, ReportError> {
        Ok(ReportBuilder {
            writer: JsonWriter::new()?,
        })
    }

    /// Serializes one channel's entry: the channel id plus one nested object
    /// per reading, in the order the scan produced them.
    pub fn append(&mut self, report: &ChannelReport) -> Result<(), ReportError> {
        self.writer
            .begin_object(format_args!("vrstica{}", report.channel))?;
        self.writer
            .uint_field(format_args!("id"), u32::from(report.channel.index()))?;
        for reading in &report.readings {
            self.writer
                .begin_object(format_args!("senzor{}", reading.address))?;
            self.writer
                .uint_field(format_args!("id"), u32::from(reading.address.get()))?;
            self.writer
                .uint_field(format_args!("cap"), reading.capacitance)?;
            self.writer.end_object()?;
        }
        self.writer.end_object()
    }

    /// Returns the complete document as a flat string.
    pub fn finish(self) -> Result<String<N>, ReportError> {
        self.writer.finish()
    }
}
