//! Combo compilation: turning a list of elements into timed frames.
//!
//! A combo is described as a flat list of [`Element`]s: inputs, delays,
//! nested combos and hold markers. [`Combo::compile`] walks that list once
//! and produces the frames that will go out on the wire:
//!
//! - a delay (or a neutral input) accumulates waiting time
//! - before each real input, the accumulated wait is emitted as a frame
//!   holding the current background, stretched to at least the minimum
//!   interval
//! - held inputs are merged into every frame until released
//! - nested combos are spliced in with the background merged into them,
//!   or kept as a repeated block when their repeat count is above one
//!
//! # Example
//!
//! ```
//! use combopad_core::presets::buttons::{A, B};
//! use combopad_core::{Combo, Element, Settings};
//!
//! let settings = Settings::default();
//! let combo = Combo::compile([A.into(), Element::delay_secs(0.5)?, B.into()], &settings);
//! assert_eq!(combo.frame_count(), 4);
//! assert_eq!(combo.to_string(), "Combo(A(0.050), 0.500, B(0.050), 0.050)");
//! # Ok::<(), combopad_core::ComboError>(())
//! ```

use core::fmt;
use core::ops::Add;
use core::time::Duration;

use combopad_proto::Report;
use log::trace;

use crate::input::{EndHold, Hold, Input};
use crate::settings::Settings;

/// Error type for combo construction.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ComboError {
    /// Repeat counts must be at least one.
    #[error("invalid repeat count: {0}")]
    InvalidRepeat(i64),
    /// Delays must be finite and non-negative.
    #[error("invalid delay: {0}s")]
    InvalidDelay(f64),
}

/// One argument of a combo description.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Input(Input),
    Combo(Combo),
    Delay(Duration),
    Hold(Hold),
    EndHold(EndHold),
}

impl Element {
    /// A delay given in seconds.
    pub fn delay_secs(secs: f64) -> Result<Self, ComboError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ComboError::InvalidDelay(secs));
        }
        Duration::try_from_secs_f64(secs)
            .map(Element::Delay)
            .map_err(|_| ComboError::InvalidDelay(secs))
    }
}

impl From<Input> for Element {
    fn from(input: Input) -> Self {
        Element::Input(input)
    }
}

impl From<Combo> for Element {
    fn from(combo: Combo) -> Self {
        Element::Combo(combo)
    }
}

impl From<Duration> for Element {
    fn from(delay: Duration) -> Self {
        Element::Delay(delay)
    }
}

impl From<Hold> for Element {
    fn from(hold: Hold) -> Self {
        Element::Hold(hold)
    }
}

impl From<EndHold> for Element {
    fn from(end: EndHold) -> Self {
        Element::EndHold(end)
    }
}

impl TryFrom<f64> for Element {
    type Error = ComboError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Element::delay_secs(secs)
    }
}

/// One entry of a compiled combo.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A single frame with a resolved duration.
    Frame(Input),
    /// A nested combo with a repeat count above one.
    Repeated(Combo),
}

/// A compiled, repeatable sequence of frames.
///
/// Repeats are expanded while sending, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Combo {
    steps: Vec<Step>,
    repeat: u32,
}

impl Combo {
    /// An empty combo sent once.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
            repeat: 1,
        }
    }

    /// Compile a list of elements into frames.
    pub fn compile<I>(elements: I, settings: &Settings) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        let mut compiler = Compiler::new(settings);
        for element in elements {
            compiler.push(element);
        }
        compiler.finish()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Repeat the whole combo `times` times.
    ///
    /// `1` returns the combo unchanged. Counts below one are rejected.
    pub fn repeat(self, times: i64) -> Result<Self, ComboError> {
        if times == 1 {
            return Ok(self);
        }
        let times = u32::try_from(times)
            .ok()
            .filter(|t| *t >= 1)
            .ok_or(ComboError::InvalidRepeat(times))?;
        if self.repeat == 1 {
            Ok(Self {
                steps: self.steps,
                repeat: times,
            })
        } else {
            // Keep the inner count intact and wrap it
            Ok(Self {
                steps: vec![Step::Repeated(self)],
                repeat: times,
            })
        }
    }

    /// Copy of this combo with `background` merged into every frame.
    #[must_use]
    pub fn hold(&self, background: &Report) -> Self {
        if background.is_neutral() {
            return self.clone();
        }
        let steps = self
            .steps
            .iter()
            .map(|step| match step {
                Step::Frame(input) => Step::Frame(Input {
                    report: input.report + *background,
                    duration: input.duration,
                }),
                Step::Repeated(combo) => Step::Repeated(combo.hold(background)),
            })
            .collect();
        Self {
            steps,
            repeat: self.repeat,
        }
    }

    /// Number of frames after expanding all repeats.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        let once = self.steps.iter().fold(0u64, |acc, step| {
            acc.saturating_add(match step {
                Step::Frame(_) => 1,
                Step::Repeated(combo) => combo.frame_count(),
            })
        });
        once.saturating_mul(u64::from(self.repeat))
    }

    /// Iterate over every frame in send order, expanding repeats lazily.
    #[must_use]
    pub fn frames(&self) -> Frames<'_> {
        Frames::new(self)
    }

    /// The last frame sent, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Input> {
        if self.repeat == 0 {
            return None;
        }
        self.steps.iter().rev().find_map(|step| match step {
            Step::Frame(input) => Some(input),
            Step::Repeated(combo) => combo.last_frame(),
        })
    }

    fn append_to(self, steps: &mut Vec<Step>) {
        if self.repeat == 1 {
            steps.extend(self.steps);
        } else {
            steps.push(Step::Repeated(self));
        }
    }
}

impl Default for Combo {
    fn default() -> Self {
        Self::new()
    }
}

impl Add for Combo {
    type Output = Combo;

    fn add(self, rhs: Combo) -> Combo {
        let mut steps = Vec::with_capacity(self.steps.len() + rhs.steps.len());
        self.append_to(&mut steps);
        rhs.append_to(&mut steps);
        Combo { steps, repeat: 1 }
    }
}

/// Append one input, compiled with the default [`Settings`].
///
/// Use [`Combo::compile`] with explicit settings for other timings.
impl Add<Input> for Combo {
    type Output = Combo;

    fn add(self, rhs: Input) -> Combo {
        Combo::compile([Element::Combo(self), Element::Input(rhs)], &Settings::default())
    }
}

/// `Combo(A(0.050), 0.050)*3`
impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Combo(")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match step {
                Step::Frame(input) => write!(f, "{input}")?,
                Step::Repeated(combo) => write!(f, "{combo}")?,
            }
        }
        f.write_str(")")?;
        if self.repeat != 1 {
            write!(f, "*{}", self.repeat)?;
        }
        Ok(())
    }
}

/// Single-pass state for [`Combo::compile`].
struct Compiler<'a> {
    settings: &'a Settings,
    steps: Vec<Step>,
    background: Report,
    pending_delay: Duration,
    auto_delay: Duration,
}

impl<'a> Compiler<'a> {
    fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            steps: Vec::new(),
            background: Report::NEUTRAL,
            pending_delay: Duration::ZERO,
            auto_delay: Duration::ZERO,
        }
    }

    fn push(&mut self, element: Element) {
        match element {
            Element::Delay(delay) => {
                self.pending_delay = self.pending_delay.saturating_add(delay);
            }
            Element::Input(input) if input.is_neutral() => {
                let wait = input.duration_or(self.settings.input_duration);
                self.pending_delay = self.pending_delay.saturating_add(wait);
            }
            Element::Input(input) => {
                self.flush_delay();
                self.steps.push(Step::Frame(Input {
                    report: input.report + self.background,
                    duration: Some(input.duration_or(self.settings.input_duration)),
                }));
                self.auto_delay = self.settings.minimum_interval;
            }
            Element::Combo(combo) => {
                self.flush_delay();
                combo.hold(&self.background).append_to(&mut self.steps);
                self.auto_delay = Duration::ZERO;
            }
            Element::Hold(Hold(input)) => {
                self.background = self.background + input.report;
                trace!("hold background: {}", self.background);
            }
            Element::EndHold(EndHold(None)) => self.background = Report::NEUTRAL,
            Element::EndHold(EndHold(Some(input))) => {
                self.background = self.background - input.report;
            }
        }
    }

    /// Emit the accumulated wait as a background frame.
    fn flush_delay(&mut self) {
        if self.pending_delay.is_zero() && self.auto_delay.is_zero() {
            return;
        }
        let wait = self.pending_delay.max(self.auto_delay);
        self.steps.push(Step::Frame(Input {
            report: self.background,
            duration: Some(wait),
        }));
        self.pending_delay = Duration::ZERO;
    }

    fn finish(mut self) -> Combo {
        self.flush_delay();
        Combo {
            steps: self.steps,
            repeat: 1,
        }
    }
}

/// Iterator returned by [`Combo::frames`].
pub struct Frames<'a> {
    stack: Vec<Cursor<'a>>,
}

struct Cursor<'a> {
    steps: &'a [Step],
    index: usize,
    remaining: u32,
}

impl<'a> Frames<'a> {
    fn new(combo: &'a Combo) -> Self {
        let mut stack = Vec::new();
        if combo.repeat > 0 && !combo.steps.is_empty() {
            stack.push(Cursor {
                steps: &combo.steps,
                index: 0,
                remaining: combo.repeat,
            });
        }
        Self { stack }
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a Input;

    fn next(&mut self) -> Option<&'a Input> {
        loop {
            let top = self.stack.last_mut()?;
            let steps = top.steps;
            if let Some(step) = steps.get(top.index) {
                top.index += 1;
                match step {
                    Step::Frame(input) => return Some(input),
                    Step::Repeated(combo) => {
                        if combo.repeat > 0 && !combo.steps.is_empty() {
                            self.stack.push(Cursor {
                                steps: &combo.steps,
                                index: 0,
                                remaining: combo.repeat,
                            });
                        }
                    }
                }
            } else {
                top.remaining -= 1;
                if top.remaining == 0 {
                    self.stack.pop();
                } else {
                    top.index = 0;
                }
            }
        }
    }
}
