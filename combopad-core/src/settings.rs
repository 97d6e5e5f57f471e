//! Timing and output settings shared by the compiler and the sender.
//!
//! With the `serde` feature enabled, [`Settings`] can be loaded from any
//! serde format. Durations are written as float seconds:
//!
//! ```toml
//! input_duration = 0.05
//! minimum_interval = 0.05
//! echo_frames = true
//! wire_format = "binary"
//! ```

use core::time::Duration;

/// Default hold time of an input without an explicit duration.
pub const DEFAULT_INPUT_DURATION: Duration = Duration::from_millis(50);

/// Default neutral gap inserted between consecutive inputs.
pub const DEFAULT_MINIMUM_INTERVAL: Duration = Duration::from_millis(50);

/// Which encoding the sender writes to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum WireFormat {
    /// Diff-encoded ASCII command lines.
    #[default]
    Ascii,
    /// Fixed 8-byte binary reports.
    Binary,
}

/// Settings that control compilation and transmission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct Settings {
    /// Hold time used when an input has no explicit duration.
    #[cfg_attr(feature = "serde", serde(with = "seconds"))]
    pub input_duration: Duration,
    /// Neutral gap the compiler places after each input.
    #[cfg_attr(feature = "serde", serde(with = "seconds"))]
    pub minimum_interval: Duration,
    /// Log every frame at info level as it is sent.
    pub echo_frames: bool,
    pub wire_format: WireFormat,
}

impl Settings {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input_duration: DEFAULT_INPUT_DURATION,
            minimum_interval: DEFAULT_MINIMUM_INTERVAL,
            echo_frames: false,
            wire_format: WireFormat::Ascii,
        }
    }

    #[must_use]
    pub const fn with_input_duration(mut self, duration: Duration) -> Self {
        self.input_duration = duration;
        self
    }

    #[must_use]
    pub const fn with_minimum_interval(mut self, interval: Duration) -> Self {
        self.minimum_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_echo_frames(mut self, echo: bool) -> Self {
        self.echo_frames = echo;
        self
    }

    #[must_use]
    pub const fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "serde")]
mod seconds {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input_duration, Duration::from_millis(50));
        assert_eq!(settings.minimum_interval, Duration::from_millis(50));
        assert!(!settings.echo_frames);
        assert_eq!(settings.wire_format, WireFormat::Ascii);
    }

    #[test]
    fn test_setters() {
        let settings = Settings::new()
            .with_input_duration(Duration::from_millis(100))
            .with_minimum_interval(Duration::ZERO)
            .with_echo_frames(true)
            .with_wire_format(WireFormat::Binary);
        assert_eq!(settings.input_duration, Duration::from_millis(100));
        assert_eq!(settings.minimum_interval, Duration::ZERO);
        assert!(settings.echo_frames);
        assert_eq!(settings.wire_format, WireFormat::Binary);
    }
}
