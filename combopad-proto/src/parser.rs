//! Parse reports from their `+`-joined name form.
//!
//! Accepted tokens (case-insensitive):
//! - button names: `A`, `ZL`, `HOME`, ...
//! - hat directions: `UP`, `RIGHT`, `DOWN`, `LEFT`
//! - stick directions with a prefix: `LS.UP`, `RS.LEFT`, ...
//! - an optional magnitude on stick tokens: `0.5*LS.UP`
//! - `NEUTRAL` on its own
//!
//! This is the inverse of the [`Report`] `Display` impl.

use core::str::FromStr;

use crate::report::Report;
use crate::stick::AnalogStick;
use crate::types::{Buttons, HatSwitch};

/// Error type for report parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input was empty or had an empty token.
    #[error("empty token")]
    Empty,
    /// The token does not name a button, direction or stick direction.
    #[error("unknown name: {0}")]
    UnknownName(String),
    /// The magnitude in front of `*` is not a finite number.
    #[error("invalid magnitude: {0}")]
    InvalidMagnitude(String),
}

/// Parse one `+`-joined report description.
pub fn parse_report(text: &str) -> Result<Report, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    if text.eq_ignore_ascii_case("NEUTRAL") {
        return Ok(Report::NEUTRAL);
    }

    text.split('+')
        .map(parse_token)
        .try_fold(Report::NEUTRAL, |acc, token| Ok(acc.combine(token?)))
}

fn parse_token(token: &str) -> Result<Report, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }

    let (magnitude, name) = match token.split_once('*') {
        Some((amount, name)) => {
            let amount = amount.trim();
            let value: f32 = amount
                .parse()
                .map_err(|_| ParseError::InvalidMagnitude(amount.to_string()))?;
            if !value.is_finite() {
                return Err(ParseError::InvalidMagnitude(amount.to_string()));
            }
            (Some(value), name.trim())
        }
        None => (None, token),
    };

    if let Some((prefix, direction)) = name.split_once('.') {
        let stick = stick_direction(direction)
            .ok_or_else(|| ParseError::UnknownName(name.to_string()))?
            .scale(magnitude.unwrap_or(1.0));
        return if prefix.eq_ignore_ascii_case("LS") {
            Ok(Report::from_left_stick(stick))
        } else if prefix.eq_ignore_ascii_case("RS") {
            Ok(Report::from_right_stick(stick))
        } else {
            Err(ParseError::UnknownName(name.to_string()))
        };
    }

    // Magnitudes only make sense on analog directions
    if magnitude.is_some() {
        return Err(ParseError::UnknownName(token.to_string()));
    }

    if let Some(buttons) = Buttons::from_name(name) {
        Ok(Report::from_buttons(buttons))
    } else if let Some(hat) = HatSwitch::from_name(name) {
        Ok(Report::from_hat(hat))
    } else {
        Err(ParseError::UnknownName(name.to_string()))
    }
}

fn stick_direction(name: &str) -> Option<AnalogStick> {
    let index = AnalogStick::NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))?;
    Some(match index {
        0 => AnalogStick::UP,
        1 => AnalogStick::DOWN,
        2 => AnalogStick::LEFT,
        _ => AnalogStick::RIGHT,
    })
}

impl FromStr for Report {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_report(s)
    }
}
