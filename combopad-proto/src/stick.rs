//! Analog stick vector and its byte quantization.

use core::fmt;
use core::ops::{Add, Mul, Sub};

/// Byte value of a centered axis.
pub const AXIS_CENTER: u8 = 0x80;

/// Analog stick with X/Y axes in `[-1.0, 1.0]`.
///
/// Screen convention: `y = -1.0` points up, `x = 1.0` points right.
/// Values outside the unit circle are legal in sums and get pulled back
/// onto the circle when encoded.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct AnalogStick {
    pub x: f32,
    pub y: f32,
}

impl AnalogStick {
    pub const NEUTRAL: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: -1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: 1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    /// Direction names in the order up, down, left, right.
    pub const NAMES: [&'static str; 4] = ["UP", "DOWN", "LEFT", "RIGHT"];

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians, counter-clockwise from right.
    #[must_use]
    pub fn from_radians(angle: f32) -> Self {
        Self::new(angle.cos(), -angle.sin())
    }

    /// Unit vector pointing at `angle` degrees (0 = right, 90 = up).
    #[must_use]
    pub fn from_degrees(angle: f32) -> Self {
        Self::from_radians(angle.to_radians())
    }

    #[inline]
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Vector sum. A neutral operand returns the other one unchanged.
    #[must_use]
    pub fn combine(self, other: AnalogStick) -> Self {
        if self.is_neutral() {
            other
        } else if other.is_neutral() {
            self
        } else {
            Self::new(self.x + other.x, self.y + other.y)
        }
    }

    /// Vector difference. Subtracting neutral returns `self` unchanged.
    #[must_use]
    pub fn remove(self, other: AnalogStick) -> Self {
        if other.is_neutral() {
            self
        } else {
            Self::new(self.x - other.x, self.y - other.y)
        }
    }

    /// Scale both axes.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        if factor == 1.0 || self.is_neutral() {
            self
        } else {
            Self::new(self.x * factor, self.y * factor)
        }
    }

    /// Rotate by `degrees` using the standard rotation matrix.
    ///
    /// Whole turns and the neutral vector are returned as-is.
    #[must_use]
    pub fn rotate(self, degrees: f32) -> Self {
        if degrees % 360.0 == 0.0 || self.is_neutral() {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Quantize to the two wire bytes `[x, y]`.
    ///
    /// Vectors longer than 1.0 are divided by their norm first, so
    /// over-range diagonals clip to the circle rather than the square.
    #[must_use]
    pub fn encode(&self) -> [u8; 2] {
        let norm = self.norm();
        let (x, y) = if norm > 1.0 {
            (self.x / norm, self.y / norm)
        } else {
            (self.x, self.y)
        };
        [quantize(x), quantize(y)]
    }

    /// Inverse of [`encode`](Self::encode), up to one quantization step.
    #[must_use]
    pub fn decode(bytes: [u8; 2]) -> Self {
        Self::new(dequantize(bytes[0]), dequantize(bytes[1]))
    }
}

/// Positive half spans 127 steps, negative half 128.
fn quantize(value: f32) -> u8 {
    let scaled = if value >= 0.0 {
        value * 127.0 + 128.0
    } else {
        value * 128.0 + 128.0
    };
    scaled.round().clamp(0.0, 255.0) as u8
}

fn dequantize(byte: u8) -> f32 {
    let offset = f32::from(byte) - f32::from(AXIS_CENTER);
    if byte >= AXIS_CENTER {
        offset / 127.0
    } else {
        offset / 128.0
    }
}

impl Add for AnalogStick {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Sub for AnalogStick {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.remove(rhs)
    }
}

impl Mul<f32> for AnalogStick {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

/// Writes `UP`, `0.50*LEFT` style tokens joined by `+`. Use [`StickNames`]
/// for a prefixed form such as `LS.UP`.
impl fmt::Display for AnalogStick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StickNames::new(*self, "").fmt(f)
    }
}

/// Display helper that prefixes every direction name, e.g. `LS.UP`.
pub struct StickNames<'a> {
    stick: AnalogStick,
    prefix: &'a str,
}

impl<'a> StickNames<'a> {
    pub fn new(stick: AnalogStick, prefix: &'a str) -> Self {
        Self { stick, prefix }
    }
}

impl fmt::Display for StickNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round first so that 0.999 prints as a full tilt
        let x = (self.stick.x * 100.0).round() / 100.0;
        let y = (self.stick.y * 100.0).round() / 100.0;

        let vertical = if y < 0.0 {
            Some((-y, AnalogStick::NAMES[0]))
        } else if y > 0.0 {
            Some((y, AnalogStick::NAMES[1]))
        } else {
            None
        };
        let horizontal = if x < 0.0 {
            Some((-x, AnalogStick::NAMES[2]))
        } else if x > 0.0 {
            Some((x, AnalogStick::NAMES[3]))
        } else {
            None
        };

        let mut first = true;
        for (amount, name) in [vertical, horizontal].into_iter().flatten() {
            if !first {
                f.write_str("+")?;
            }
            first = false;
            if amount == 1.0 {
                write!(f, "{}{}", self.prefix, name)?;
            } else {
                write!(f, "{:.2}*{}{}", amount, self.prefix, name)?;
            }
        }
        Ok(())
    }
}
