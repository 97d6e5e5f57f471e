//! Controller state algebra and wire encodings for the combopad protocol.
//!
//! This crate provides the value types and codecs needed to drive a
//! controller bridge over a serial link:
//!
//! - **Types**: immutable controller state with a small algebra
//!   (`combine` / `remove`, also available as `+` / `-`)
//!   - [`Buttons`] - 14 button bitfield
//!   - [`HatSwitch`] - directional pad bits, canonicalized on encode
//!   - [`AnalogStick`] - 2D stick vector with rotation and scaling
//!   - [`Report`] - complete controller snapshot
//!
//! - **Serialization**: the two wire forms
//!   - [`Serialize`] trait
//!   - binary 8-byte report ([`Report`])
//!   - diff-encoded ASCII command line ([`AsciiCommand`])
//!
//! - **Parsing**: [`Report::from_bytes`] for the binary form and
//!   [`parse_report`] / `FromStr` for `A+UP+LS.LEFT` style names.
//!
//! # Example
//!
//! ```
//! use combopad_proto::{AnalogStick, Buttons, HatSwitch, Report};
//!
//! let report = Report::from_buttons(Buttons::A)
//!     + Report::from_hat(HatSwitch::UP + HatSwitch::DOWN)
//!     + Report::from_left_stick(AnalogStick::LEFT);
//!
//! let bytes = report.to_bytes();
//! assert_eq!(bytes[2], HatSwitch::CENTER_CODE); // UP + DOWN cancels
//! assert_eq!(&bytes[3..5], &[0x00, 0x80]);
//! ```

pub mod builder;
mod fmt;
pub mod parser;
pub mod report;
pub mod serialize;
pub mod stick;
pub mod types;

// Re-export types at crate root for convenience
pub use builder::ReportBuilder;
pub use parser::{parse_report, ParseError};
pub use report::{DecodeError, Report, REPORT_SIZE};
pub use serialize::{
    AsciiCommand, Serialize, SerializeError, MAX_COMMAND_SIZE, MAX_REPORT_SIZE,
};
pub use stick::{AnalogStick, StickNames, AXIS_CENTER};
pub use types::{Buttons, HatSwitch};
