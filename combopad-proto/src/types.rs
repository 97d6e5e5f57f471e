//! Discrete controller state: [`Buttons`] and [`HatSwitch`].

use core::ops::{Add, BitAnd, BitOr, BitOrAssign, Not, Sub};

/// Button state represented as a bitfield.
///
/// Bits follow the order the controller expects on the wire, so the raw
/// value can be written out without any remapping.
///
/// # Example
///
/// ```
/// use combopad_proto::Buttons;
///
/// let buttons = Buttons::A | Buttons::B;
/// assert!(buttons.contains(Buttons::A));
/// assert!(buttons.contains(Buttons::B));
/// assert!(!buttons.contains(Buttons::X));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Buttons(pub u16);

impl Buttons {
    pub const Y: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const A: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const L: Self = Self(1 << 4);
    pub const R: Self = Self(1 << 5);
    pub const ZL: Self = Self(1 << 6);
    pub const ZR: Self = Self(1 << 7);
    pub const MINUS: Self = Self(1 << 8);
    pub const PLUS: Self = Self(1 << 9);
    pub const LS: Self = Self(1 << 10); // Left stick press
    pub const RS: Self = Self(1 << 11); // Right stick press
    pub const HOME: Self = Self(1 << 12);
    pub const CAPTURE: Self = Self(1 << 13);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Names of the flags, indexed by bit position.
    pub const NAMES: [&'static str; 14] = [
        "Y", "B", "A", "X", "L", "R", "ZL", "ZR", "MINUS", "PLUS", "LS", "RS", "HOME", "CAPTURE",
    ];

    /// Union of two button sets.
    ///
    /// Either side being empty returns the other side untouched.
    #[inline]
    #[must_use]
    pub const fn combine(self, other: Buttons) -> Self {
        if other.0 == 0 || self.0 == other.0 {
            self
        } else if self.0 == 0 {
            other
        } else {
            Self(self.0 | other.0)
        }
    }

    /// Clear every flag present in `other`.
    #[inline]
    #[must_use]
    pub const fn remove(self, other: Buttons) -> Self {
        if other.0 == 0 {
            self
        } else {
            Self(self.0 & !other.0)
        }
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Wire form: two bytes, little-endian.
    #[inline]
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    #[inline]
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Look up a single flag by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| Self(1 << i))
    }

    /// Iterate over the names of the pressed buttons, lowest bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, name)| *name)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl Add for Buttons {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Sub for Buttons {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.remove(rhs)
    }
}

/// Directional pad state as four independent direction bits.
///
/// Opposing directions may coexist in intermediate sums (`UP + DOWN`); they
/// only cancel when the value is encoded for the wire.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct HatSwitch(pub u8);

/// Wire code order: index in this table is the encoded byte.
const HAT_TABLE: [HatSwitch; 9] = [
    HatSwitch::N,
    HatSwitch::NE,
    HatSwitch::E,
    HatSwitch::SE,
    HatSwitch::S,
    HatSwitch::SW,
    HatSwitch::W,
    HatSwitch::NW,
    HatSwitch::CENTER,
];

const VERTICAL: u8 = 0b0101;
const HORIZONTAL: u8 = 0b1010;

impl HatSwitch {
    pub const UP: Self = Self(0b0001);
    pub const RIGHT: Self = Self(0b0010);
    pub const DOWN: Self = Self(0b0100);
    pub const LEFT: Self = Self(0b1000);

    pub const N: Self = Self::UP;
    pub const NE: Self = Self(0b0011);
    pub const E: Self = Self::RIGHT;
    pub const SE: Self = Self(0b0110);
    pub const S: Self = Self::DOWN;
    pub const SW: Self = Self(0b1100);
    pub const W: Self = Self::LEFT;
    pub const NW: Self = Self(0b1001);
    pub const CENTER: Self = Self(0);

    /// Wire code for the centered hat.
    pub const CENTER_CODE: u8 = 8;

    /// Names of the direction bits, indexed by bit position.
    pub const NAMES: [&'static str; 4] = ["UP", "RIGHT", "DOWN", "LEFT"];

    /// Union of two direction sets. Opposites are kept until encoding.
    #[inline]
    #[must_use]
    pub const fn combine(self, other: HatSwitch) -> Self {
        if other.0 == 0 || self.0 == other.0 {
            self
        } else if self.0 == 0 {
            other
        } else {
            Self(self.0 | other.0)
        }
    }

    /// Clear every direction present in `other`.
    #[inline]
    #[must_use]
    pub const fn remove(self, other: HatSwitch) -> Self {
        if other.0 == 0 {
            self
        } else {
            Self(self.0 & !other.0)
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_centered(self) -> bool {
        self.0 == 0
    }

    /// Drop contradictory pairs, keeping the remaining axis.
    ///
    /// `UP + DOWN` loses both vertical bits, `LEFT + RIGHT` both horizontal
    /// ones, so `UP + DOWN + RIGHT` degrades to `RIGHT`.
    #[must_use]
    pub const fn canonical(self) -> Self {
        let mut state = self.0 & 0b1111;
        if state & VERTICAL == VERTICAL {
            state &= HORIZONTAL;
        }
        if state & HORIZONTAL == HORIZONTAL {
            state &= VERTICAL;
        }
        Self(state)
    }

    /// Encode into the 3-bit wire code (`0..=7` compass points, `8` center).
    #[must_use]
    pub fn encode(self) -> u8 {
        let state = self.canonical();
        HAT_TABLE
            .iter()
            .position(|h| *h == state)
            .map_or(Self::CENTER_CODE, |i| i as u8)
    }

    /// Decode a wire code. Anything past the table is treated as center.
    #[must_use]
    pub fn decode(code: u8) -> Self {
        HAT_TABLE
            .get(code as usize)
            .copied()
            .unwrap_or(Self::CENTER)
    }

    /// Look up a single direction bit by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| Self(1 << i))
    }

    /// Iterate over the names of the set direction bits.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, name)| *name)
    }
}

impl BitOr for HatSwitch {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Add for HatSwitch {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Sub for HatSwitch {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.remove(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::B;
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::B));
        assert!(!buttons.contains(Buttons::X));
    }

    #[test]
    fn test_buttons_union_is_idempotent() {
        let pairs = [
            (Buttons::A, Buttons::B),
            (Buttons::A | Buttons::ZR, Buttons::ZR),
            (Buttons::NONE, Buttons::HOME),
            (Buttons(0x3FFF), Buttons::CAPTURE),
        ];
        for (a, b) in pairs {
            let ab = a + b;
            assert_eq!(a + ab, ab);
        }
    }

    #[test]
    fn test_buttons_sub_removes_only_rhs_bits() {
        let a = Buttons::A | Buttons::L;
        let b = Buttons::L | Buttons::R;
        assert_eq!((a + b) - b, Buttons::A);
        // Removing something that is not pressed leaves the value alone
        assert_eq!(Buttons::A - Buttons::B, Buttons::A);
    }

    #[test]
    fn test_buttons_identity() {
        assert_eq!(Buttons::X + Buttons::NONE, Buttons::X);
        assert_eq!(Buttons::NONE + Buttons::X, Buttons::X);
        assert_eq!(Buttons::X - Buttons::NONE, Buttons::X);
    }

    #[test]
    fn test_buttons_names() {
        let buttons = Buttons::Y | Buttons::HOME;
        let names: Vec<_> = buttons.names().collect();
        assert_eq!(names, ["Y", "HOME"]);
        assert_eq!(Buttons::from_name("zl"), Some(Buttons::ZL));
        assert_eq!(Buttons::from_name("START"), None);
    }

    #[test]
    fn test_buttons_le_bytes() {
        assert_eq!(Buttons::CAPTURE.to_le_bytes(), [0x00, 0x20]);
        assert_eq!(Buttons::from_le_bytes([0x04, 0x01]), Buttons::A | Buttons::MINUS);
    }

    #[test]
    fn test_hat_opposites_cancel_on_encode() {
        let sum = HatSwitch::UP + HatSwitch::DOWN;
        // Still both bits after the algebraic sum
        assert_eq!(sum.raw(), 0b0101);
        assert_eq!(sum.encode(), HatSwitch::CENTER_CODE);
        assert_eq!((HatSwitch::LEFT + HatSwitch::RIGHT).encode(), 8);
    }

    #[test]
    fn test_hat_up_right_is_ne() {
        assert_eq!((HatSwitch::UP + HatSwitch::RIGHT).encode(), 1);
    }

    #[test]
    fn test_hat_encode_table() {
        let expected = [
            (HatSwitch::N, 0),
            (HatSwitch::NE, 1),
            (HatSwitch::E, 2),
            (HatSwitch::SE, 3),
            (HatSwitch::S, 4),
            (HatSwitch::SW, 5),
            (HatSwitch::W, 6),
            (HatSwitch::NW, 7),
            (HatSwitch::CENTER, 8),
        ];
        for (hat, code) in expected {
            assert_eq!(hat.encode(), code, "{hat:?}");
            assert_eq!(HatSwitch::decode(code), hat);
        }
    }

    #[test]
    fn test_hat_contradiction_degrades_to_single_axis() {
        let hat = HatSwitch::UP + HatSwitch::DOWN + HatSwitch::RIGHT;
        assert_eq!(hat.encode(), HatSwitch::E.encode());
        let hat = HatSwitch::LEFT + HatSwitch::RIGHT + HatSwitch::DOWN;
        assert_eq!(hat.encode(), HatSwitch::S.encode());
    }

    #[test]
    fn test_hat_decode_out_of_range_is_center() {
        assert_eq!(HatSwitch::decode(0x0F), HatSwitch::CENTER);
    }

    #[test]
    fn test_hat_remove() {
        let hat = HatSwitch::NE - HatSwitch::UP;
        assert_eq!(hat, HatSwitch::RIGHT);
        assert_eq!(HatSwitch::LEFT - HatSwitch::UP, HatSwitch::LEFT);
    }
}
