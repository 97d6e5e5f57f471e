//! Timed inputs and the hold markers used inside combos.

use core::fmt;
use core::ops::{Add, Sub};
use core::time::Duration;

use combopad_proto::{AnalogStick, Buttons, HatSwitch, Report};

/// A [`Report`] held for a duration; one frame on the wire.
///
/// A missing duration means "use [`Settings::input_duration`]".
///
/// [`Settings::input_duration`]: crate::Settings::input_duration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    pub report: Report,
    pub duration: Option<Duration>,
}

impl Input {
    pub const NEUTRAL: Self = Self::new(Report::NEUTRAL);

    #[inline]
    #[must_use]
    pub const fn new(report: Report) -> Self {
        Self {
            report,
            duration: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from_buttons(buttons: Buttons) -> Self {
        Self::new(Report::from_buttons(buttons))
    }

    #[inline]
    #[must_use]
    pub const fn from_hat(hat: HatSwitch) -> Self {
        Self::new(Report::from_hat(hat))
    }

    #[inline]
    #[must_use]
    pub const fn from_left_stick(stick: AnalogStick) -> Self {
        Self::new(Report::from_left_stick(stick))
    }

    #[inline]
    #[must_use]
    pub const fn from_right_stick(stick: AnalogStick) -> Self {
        Self::new(Report::from_right_stick(stick))
    }

    /// A neutral input that only waits.
    #[must_use]
    pub const fn wait(duration: Duration) -> Self {
        Self::NEUTRAL.with_duration(duration)
    }

    #[inline]
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the hold time in seconds.
    ///
    /// Zero, negative and non-finite values clear the duration so the
    /// default applies. Values too large for a [`Duration`] clamp to
    /// [`Duration::MAX`].
    #[must_use]
    pub fn seconds(mut self, secs: f64) -> Self {
        self.duration = if secs.is_finite() && secs > 0.0 {
            Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
        } else {
            None
        };
        self
    }

    /// Duration of this input, falling back to `default`.
    #[inline]
    #[must_use]
    pub fn duration_or(&self, default: Duration) -> Duration {
        self.duration.unwrap_or(default)
    }

    #[inline]
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.report.is_neutral()
    }

    /// Merge two inputs. The duration of `other` wins when it has one.
    #[must_use]
    pub fn combine(self, other: Input) -> Self {
        Self {
            report: self.report.combine(other.report),
            duration: other.duration.or(self.duration),
        }
    }

    /// Release everything `other` holds. The duration of `other` wins when it has one.
    #[must_use]
    pub fn remove(self, other: Input) -> Self {
        Self {
            report: self.report.remove(other.report),
            duration: other.duration.or(self.duration),
        }
    }

    /// Scale both sticks by `factor`.
    #[must_use]
    pub fn scale(mut self, factor: f32) -> Self {
        self.report = self.report.scale_sticks(factor);
        self
    }

    /// Keep this input pressed under everything that follows.
    #[must_use]
    pub const fn hold(self) -> Hold {
        Hold(self)
    }
}

impl Add for Input {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

impl Sub for Input {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.remove(rhs)
    }
}

impl From<Report> for Input {
    fn from(report: Report) -> Self {
        Self::new(report)
    }
}

impl From<Buttons> for Input {
    fn from(buttons: Buttons) -> Self {
        Self::from_buttons(buttons)
    }
}

impl From<HatSwitch> for Input {
    fn from(hat: HatSwitch) -> Self {
        Self::from_hat(hat)
    }
}

/// `A+B(0.050)`; a neutral input with a duration prints only the duration.
impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_neutral(), self.duration) {
            (true, Some(duration)) => write!(f, "{:.3}", duration.as_secs_f64()),
            (_, Some(duration)) => write!(f, "{}({:.3})", self.report, duration.as_secs_f64()),
            (_, None) => write!(f, "{}", self.report),
        }
    }
}

/// Adds its input to the background of every following frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hold(pub Input);

/// Clears the background: entirely with `None`, or only the given fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EndHold(pub Option<Input>);

impl EndHold {
    pub const ALL: Self = Self(None);

    #[must_use]
    pub const fn only(input: Input) -> Self {
        Self(Some(input))
    }
}
