//! Wire serialization for controller frames.
//!
//! This module provides the [`Serialize`] trait for writing a [`Report`]
//! in the fixed binary form and an [`AsciiCommand`] in the line form.
//!
//! # Binary Report
//!
//! ```text
//! [buttons_lo, buttons_hi, hat, lx, ly, rx, ry, 0x00]
//! ```
//!
//! # ASCII Command
//!
//! ```text
//! <btn> <hat>[ <lx> <ly>][ <rx> <ry>]\r\n
//! ```
//!
//! - `btn` - button bits shifted left by two; bit 1 flags a left stick
//!   change, bit 0 a right stick change
//! - `hat` - hat switch wire code
//! - stick pairs are present only when flagged
//! - a line that would start with `a`-`f` gets a leading `0`
//!
//! All numbers are lower-case hex without padding.
//!
//! # Example
//!
//! ```
//! use combopad_proto::{AsciiCommand, Buttons, Report, Serialize};
//!
//! let cmd = AsciiCommand::new(Report::from_buttons(Buttons::A), false, false);
//! let mut buf = [0u8; 32];
//! let len = cmd.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"10 8\r\n");
//! ```

use crate::fmt::{hex_len, write_hex};
use crate::report::{Report, REPORT_SIZE};

/// Maximum size of a serialized binary report.
pub const MAX_REPORT_SIZE: usize = REPORT_SIZE;

/// Maximum size of a serialized ASCII command.
///
/// Breakdown: prefix(1) + btn(4) + space(1) + hat(1) + 4 * (space + 2 digits)(12) + \r\n(2) = 21
/// We use 32 for safety margin.
pub const MAX_COMMAND_SIZE: usize = 32;

/// Flag bit announcing a left stick pair in the ASCII command.
pub const LEFT_STICK_FLAG: u32 = 0b10;
/// Flag bit announcing a right stick pair in the ASCII command.
pub const RIGHT_STICK_FLAG: u32 = 0b01;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized message.
    #[error("buffer too small")]
    BufferTooSmall,
    /// A write operation failed (for `fmt::Write` adapters).
    #[error("write error")]
    WriteError,
}

/// One frame in ASCII line form, diff-encoded against the previous frame.
///
/// Stick bytes are only carried for sticks flagged as changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsciiCommand {
    pub report: Report,
    pub left_changed: bool,
    pub right_changed: bool,
}

impl AsciiCommand {
    #[must_use]
    pub const fn new(report: Report, left_changed: bool, right_changed: bool) -> Self {
        Self {
            report,
            left_changed,
            right_changed,
        }
    }

    /// Build the command for `report` given the frame sent before it.
    ///
    /// Sticks count as changed when their quantized bytes differ.
    #[must_use]
    pub fn diff(previous: &Report, report: &Report) -> Self {
        Self {
            report: *report,
            left_changed: previous.left_stick.encode() != report.left_stick.encode(),
            right_changed: previous.right_stick.encode() != report.right_stick.encode(),
        }
    }

    /// Leading token: button bits plus the two change flags.
    #[must_use]
    pub fn header(&self) -> u32 {
        let mut btn = u32::from(self.report.buttons.raw()) << 2;
        if self.left_changed {
            btn |= LEFT_STICK_FLAG;
        }
        if self.right_changed {
            btn |= RIGHT_STICK_FLAG;
        }
        btn
    }
}

/// Helper for buffer management while writing space separated tokens.
struct SerializeBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SerializeBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    #[inline]
    fn write_hex(&mut self, value: u32) {
        self.pos += write_hex(&mut self.buf[self.pos..], value);
    }

    #[inline]
    fn write_token(&mut self, value: u32) {
        self.write(b' ');
        self.write_hex(value);
    }

    #[inline]
    fn finalize(mut self) -> usize {
        self.write(b'\r');
        self.write(b'\n');
        self.pos
    }
}

/// Extension trait for serializing wire messages.
///
/// Implemented for [`Report`] (binary form) and [`AsciiCommand`] (line form).
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        // Resize to full capacity to allow serialize() to write
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails or the
    /// message is not valid UTF-8 (binary reports usually are not).
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;
}

impl Serialize for Report {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let out = buf
            .get_mut(..MAX_REPORT_SIZE)
            .ok_or(SerializeError::BufferTooSmall)?;
        out.copy_from_slice(&self.to_bytes());
        Ok(MAX_REPORT_SIZE)
    }

    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let bytes = self.to_bytes();
        let s = core::str::from_utf8(&bytes).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for AsciiCommand {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let header = self.header();
        let hat = u32::from(self.report.hat.encode());
        let [lx, ly] = self.report.left_stick.encode();
        let [rx, ry] = self.report.right_stick.encode();

        // Exact length up front so short buffers fail before any write
        let needs_prefix = header_starts_with_letter(header);
        let mut needed = usize::from(needs_prefix) + hex_len(header) + 1 + hex_len(hat) + 2;
        if self.left_changed {
            needed += 2 + hex_len(lx.into()) + hex_len(ly.into());
        }
        if self.right_changed {
            needed += 2 + hex_len(rx.into()) + hex_len(ry.into());
        }
        if buf.len() < needed {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut sb = SerializeBuf::new(buf);
        if needs_prefix {
            sb.write(b'0');
        }
        sb.write_hex(header);
        sb.write_token(hat);
        if self.left_changed {
            sb.write_token(lx.into());
            sb.write_token(ly.into());
        }
        if self.right_changed {
            sb.write_token(rx.into());
            sb.write_token(ry.into());
        }

        Ok(sb.finalize())
    }

    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_COMMAND_SIZE];
        let len = self.serialize(&mut buf)?;

        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }
}

/// The receiving side reserves lines starting with a letter.
fn header_starts_with_letter(header: u32) -> bool {
    let digits = hex_len(header);
    let leading = (header >> (4 * (digits - 1))) & 0xF;
    leading >= 0xA
}
