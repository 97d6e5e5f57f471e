//! Builder pattern API for constructing reports.
//!
//! # Example
//!
//! ```
//! use combopad_proto::{Buttons, HatSwitch, ReportBuilder, Serialize};
//!
//! let mut buf = [0u8; 8];
//! let len = ReportBuilder::new()
//!     .buttons(Buttons::A | Buttons::B)
//!     .hat(HatSwitch::UP)
//!     .left_stick(0.0, -1.0)
//!     .serialize(&mut buf)
//!     .unwrap();
//! assert_eq!(len, 8);
//! ```

use crate::report::Report;
use crate::serialize::{Serialize, SerializeError};
use crate::stick::AnalogStick;
use crate::types::{Buttons, HatSwitch};

/// Builder for [`Report`] values.
///
/// Starts from [`Report::NEUTRAL`]. Setters for buttons and hat add to what
/// is already there; stick setters replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            report: Report::NEUTRAL,
        }
    }

    /// Press additional buttons.
    #[must_use]
    pub fn buttons(mut self, buttons: Buttons) -> Self {
        self.report.buttons = self.report.buttons.combine(buttons);
        self
    }

    /// Add hat switch directions.
    #[must_use]
    pub fn hat(mut self, hat: HatSwitch) -> Self {
        self.report.hat = self.report.hat.combine(hat);
        self
    }

    /// Set the left stick position.
    #[must_use]
    pub fn left_stick(mut self, x: f32, y: f32) -> Self {
        self.report.left_stick = AnalogStick::new(x, y);
        self
    }

    /// Set the right stick position.
    #[must_use]
    pub fn right_stick(mut self, x: f32, y: f32) -> Self {
        self.report.right_stick = AnalogStick::new(x, y);
        self
    }

    /// Point the left stick at `degrees` (0 = right, 90 = up) at full tilt.
    #[must_use]
    pub fn left_stick_angle(mut self, degrees: f32) -> Self {
        self.report.left_stick = AnalogStick::from_degrees(degrees);
        self
    }

    /// Point the right stick at `degrees` (0 = right, 90 = up) at full tilt.
    #[must_use]
    pub fn right_stick_angle(mut self, degrees: f32) -> Self {
        self.report.right_stick = AnalogStick::from_degrees(degrees);
        self
    }

    /// Get the built report without serializing.
    #[must_use]
    pub fn build(self) -> Report {
        self.report
    }

    /// Serialize the binary report to the provided buffer.
    pub fn serialize(self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        self.report.serialize(buf)
    }
}
