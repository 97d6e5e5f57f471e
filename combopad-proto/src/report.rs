//! Full controller snapshot: [`Report`].

use core::fmt;
use core::ops::{Add, Sub};

use crate::stick::{AnalogStick, StickNames};
use crate::types::{Buttons, HatSwitch};

/// Size of the binary report on the wire.
pub const REPORT_SIZE: usize = 8;

/// Complete controller state snapshot.
///
/// Contains all inputs of the supported layout:
/// - 14 buttons (bitfield)
/// - a hat switch (directional pad)
/// - 2 analog sticks (left/right, each with X/Y)
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Report {
    pub buttons: Buttons,
    pub hat: HatSwitch,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
}

/// Error returned when a binary report cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer than the 7 meaningful bytes were supplied.
    #[error("report too short: {0} bytes")]
    TooShort(usize),
}

impl Report {
    /// Nothing pressed, hat centered, sticks at rest.
    pub const NEUTRAL: Self = Self {
        buttons: Buttons::NONE,
        hat: HatSwitch::CENTER,
        left_stick: AnalogStick::NEUTRAL,
        right_stick: AnalogStick::NEUTRAL,
    };

    #[must_use]
    pub const fn from_buttons(buttons: Buttons) -> Self {
        Self {
            buttons,
            ..Self::NEUTRAL
        }
    }

    #[must_use]
    pub const fn from_hat(hat: HatSwitch) -> Self {
        Self {
            hat,
            ..Self::NEUTRAL
        }
    }

    #[must_use]
    pub const fn from_left_stick(stick: AnalogStick) -> Self {
        Self {
            left_stick: stick,
            ..Self::NEUTRAL
        }
    }

    #[must_use]
    pub const fn from_right_stick(stick: AnalogStick) -> Self {
        Self {
            right_stick: stick,
            ..Self::NEUTRAL
        }
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Field-wise union.
    #[must_use]
    pub fn combine(self, other: Report) -> Self {
        Self {
            buttons: self.buttons.combine(other.buttons),
            hat: self.hat.combine(other.hat),
            left_stick: self.left_stick.combine(other.left_stick),
            right_stick: self.right_stick.combine(other.right_stick),
        }
    }

    /// Field-wise removal of whatever `other` holds.
    #[must_use]
    pub fn remove(self, other: Report) -> Self {
        Self {
            buttons: self.buttons.remove(other.buttons),
            hat: self.hat.remove(other.hat),
            left_stick: self.left_stick.remove(other.left_stick),
            right_stick: self.right_stick.remove(other.right_stick),
        }
    }

    /// Scale both sticks, leaving buttons and hat alone.
    #[must_use]
    pub fn scale_sticks(self, factor: f32) -> Self {
        Self {
            left_stick: self.left_stick.scale(factor),
            right_stick: self.right_stick.scale(factor),
            ..self
        }
    }

    /// Binary wire form:
    /// `[buttons_lo, buttons_hi, hat, lx, ly, rx, ry, 0x00]`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        let [b0, b1] = self.buttons.to_le_bytes();
        let [lx, ly] = self.left_stick.encode();
        let [rx, ry] = self.right_stick.encode();
        [b0, b1, self.hat.encode(), lx, ly, rx, ry, 0x00]
    }

    /// Decode a binary report. The trailing padding byte is optional.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < REPORT_SIZE - 1 {
            return Err(DecodeError::TooShort(data.len()));
        }
        Ok(Self {
            buttons: Buttons::from_le_bytes([data[0], data[1]]),
            hat: HatSwitch::decode(data[2]),
            left_stick: AnalogStick::decode([data[3], data[4]]),
            right_stick: AnalogStick::decode([data[5], data[6]]),
        })
    }
}

impl Add for Report {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Sub for Report {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.remove(rhs)
    }
}

impl From<Buttons> for Report {
    fn from(buttons: Buttons) -> Self {
        Self::from_buttons(buttons)
    }
}

impl From<HatSwitch> for Report {
    fn from(hat: HatSwitch) -> Self {
        Self::from_hat(hat)
    }
}

/// `A+UP+LS.LEFT`, or `NEUTRAL` when nothing is held.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neutral() {
            return f.write_str("NEUTRAL");
        }

        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                f.write_str("+")?;
            }
            first = false;
            Ok(())
        };

        for name in self.buttons.names().chain(self.hat.names()) {
            sep(f)?;
            f.write_str(name)?;
        }
        if !self.left_stick.is_neutral() {
            sep(f)?;
            StickNames::new(self.left_stick, "LS.").fmt(f)?;
        }
        if !self.right_stick.is_neutral() {
            sep(f)?;
            StickNames::new(self.right_stick, "RS.").fmt(f)?;
        }
        Ok(())
    }
}
