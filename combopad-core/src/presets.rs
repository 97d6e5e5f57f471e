//! Named inputs for building combos without spelling out reports.
//!
//! # Example
//!
//! ```
//! use combopad_core::presets::{buttons, hat, left_stick, Compass};
//!
//! let dash = buttons::B + left_stick::RIGHT;
//! let quarter = left_stick::toward(Compass::NE);
//! assert!(!dash.is_neutral());
//! assert!(!quarter.is_neutral());
//! assert_eq!(hat::UP + hat::RIGHT, hat::NE);
//! ```

use combopad_proto::AnalogStick;

/// The 16 points of the compass, for aiming a stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Compass {
    pub const ALL: [Compass; 16] = [
        Compass::N,
        Compass::NNE,
        Compass::NE,
        Compass::ENE,
        Compass::E,
        Compass::ESE,
        Compass::SE,
        Compass::SSE,
        Compass::S,
        Compass::SSW,
        Compass::SW,
        Compass::WSW,
        Compass::W,
        Compass::WNW,
        Compass::NW,
        Compass::NNW,
    ];

    /// Angle counter-clockwise from east (E = 0, N = 90).
    #[must_use]
    pub fn degrees(self) -> f32 {
        let clockwise_from_north = Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default() as f32
            * 22.5;
        (450.0 - clockwise_from_north) % 360.0
    }

    /// Full-tilt stick vector pointing this way.
    ///
    /// Cardinal points are exact; the rest come from the angle.
    #[must_use]
    pub fn stick(self) -> AnalogStick {
        match self {
            Compass::N => AnalogStick::UP,
            Compass::E => AnalogStick::RIGHT,
            Compass::S => AnalogStick::DOWN,
            Compass::W => AnalogStick::LEFT,
            other => AnalogStick::from_degrees(other.degrees()),
        }
    }
}

pub mod buttons {
    use combopad_proto::Buttons;

    use crate::input::Input;

    pub const Y: Input = Input::from_buttons(Buttons::Y);
    pub const B: Input = Input::from_buttons(Buttons::B);
    pub const A: Input = Input::from_buttons(Buttons::A);
    pub const X: Input = Input::from_buttons(Buttons::X);
    pub const L: Input = Input::from_buttons(Buttons::L);
    pub const R: Input = Input::from_buttons(Buttons::R);
    pub const ZL: Input = Input::from_buttons(Buttons::ZL);
    pub const ZR: Input = Input::from_buttons(Buttons::ZR);
    pub const MINUS: Input = Input::from_buttons(Buttons::MINUS);
    pub const PLUS: Input = Input::from_buttons(Buttons::PLUS);
    pub const LS: Input = Input::from_buttons(Buttons::LS);
    pub const RS: Input = Input::from_buttons(Buttons::RS);
    pub const HOME: Input = Input::from_buttons(Buttons::HOME);
    pub const CAPTURE: Input = Input::from_buttons(Buttons::CAPTURE);
}

pub mod hat {
    use combopad_proto::HatSwitch;

    use crate::input::Input;

    pub const UP: Input = Input::from_hat(HatSwitch::UP);
    pub const RIGHT: Input = Input::from_hat(HatSwitch::RIGHT);
    pub const DOWN: Input = Input::from_hat(HatSwitch::DOWN);
    pub const LEFT: Input = Input::from_hat(HatSwitch::LEFT);
    pub const NE: Input = Input::from_hat(HatSwitch::NE);
    pub const SE: Input = Input::from_hat(HatSwitch::SE);
    pub const SW: Input = Input::from_hat(HatSwitch::SW);
    pub const NW: Input = Input::from_hat(HatSwitch::NW);
}

pub mod left_stick {
    use combopad_proto::AnalogStick;

    use super::Compass;
    use crate::input::Input;

    pub const UP: Input = Input::from_left_stick(AnalogStick::UP);
    pub const DOWN: Input = Input::from_left_stick(AnalogStick::DOWN);
    pub const LEFT: Input = Input::from_left_stick(AnalogStick::LEFT);
    pub const RIGHT: Input = Input::from_left_stick(AnalogStick::RIGHT);

    #[must_use]
    pub fn toward(direction: Compass) -> Input {
        Input::from_left_stick(direction.stick())
    }

    /// Full tilt at `degrees` (0 = right, 90 = up).
    #[must_use]
    pub fn angle(degrees: f32) -> Input {
        Input::from_left_stick(AnalogStick::from_degrees(degrees))
    }
}

pub mod right_stick {
    use combopad_proto::AnalogStick;

    use super::Compass;
    use crate::input::Input;

    pub const UP: Input = Input::from_right_stick(AnalogStick::UP);
    pub const DOWN: Input = Input::from_right_stick(AnalogStick::DOWN);
    pub const LEFT: Input = Input::from_right_stick(AnalogStick::LEFT);
    pub const RIGHT: Input = Input::from_right_stick(AnalogStick::RIGHT);

    #[must_use]
    pub fn toward(direction: Compass) -> Input {
        Input::from_right_stick(direction.stick())
    }

    /// Full tilt at `degrees` (0 = right, 90 = up).
    #[must_use]
    pub fn angle(degrees: f32) -> Input {
        Input::from_right_stick(AnalogStick::from_degrees(degrees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_degrees() {
        assert_eq!(Compass::E.degrees(), 0.0);
        assert_eq!(Compass::N.degrees(), 90.0);
        assert_eq!(Compass::NNE.degrees(), 67.5);
        assert_eq!(Compass::W.degrees(), 180.0);
        assert_eq!(Compass::S.degrees(), 270.0);
        assert_eq!(Compass::ESE.degrees(), 337.5);
    }

    #[test]
    fn test_compass_sticks() {
        assert_eq!(Compass::N.stick(), AnalogStick::UP);
        assert_eq!(Compass::W.stick(), AnalogStick::LEFT);
        // Screen convention: north-east is up and to the right
        let [x, y] = Compass::NE.stick().encode();
        assert!(x > 0x80);
        assert!(y < 0x80);
        let [x, y] = Compass::SSW.stick().encode();
        assert!(x < 0x80);
        assert!(y > 0x80);
    }

    #[test]
    fn test_preset_inputs() {
        assert_eq!(buttons::A.report.buttons, combopad_proto::Buttons::A);
        assert_eq!(left_stick::toward(Compass::N), left_stick::UP);
        assert_eq!(right_stick::toward(Compass::E), right_stick::RIGHT);
        assert!(buttons::HOME.duration.is_none());
    }
}
