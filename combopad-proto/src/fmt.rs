//! Allocation-free hex formatting for the ASCII command line.
//!
//! Numbers are written like `{:x}` would print them: lower-case, no
//! leading zeros, a single `0` for zero.

/// Hex digits lookup table for fast conversion.
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Longest output of [`write_hex`] (a full `u32`).
pub const MAX_HEX_LEN: usize = 8;

/// Write `value` as lower-case hex without padding.
///
/// Returns the number of bytes written (1-8).
///
/// # Panics
///
/// Panics if `buf` is shorter than the digit count of `value`.
#[inline]
pub fn write_hex(buf: &mut [u8], value: u32) -> usize {
    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // Write digits in reverse order to temporary buffer
    let mut temp = [0u8; MAX_HEX_LEN];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = HEX_DIGITS[(n & 0xF) as usize];
        n >>= 4;
        len += 1;
    }

    for (i, digit) in temp[..len].iter().rev().enumerate() {
        buf[i] = *digit;
    }
    len
}

/// Number of digits [`write_hex`] produces for `value`.
#[inline]
#[must_use]
pub const fn hex_len(value: u32) -> usize {
    if value == 0 {
        1
    } else {
        ((32 - value.leading_zeros() as usize) + 3) / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_hex() {
        let mut buf = [0u8; MAX_HEX_LEN];

        let len = write_hex(&mut buf, 0);
        assert_eq!(&buf[..len], b"0");

        let len = write_hex(&mut buf, 0x8);
        assert_eq!(&buf[..len], b"8");

        let len = write_hex(&mut buf, 0x80);
        assert_eq!(&buf[..len], b"80");

        let len = write_hex(&mut buf, 0xFFFC);
        assert_eq!(&buf[..len], b"fffc");

        let len = write_hex(&mut buf, 0x0102);
        assert_eq!(&buf[..len], b"102");

        let len = write_hex(&mut buf, u32::MAX);
        assert_eq!(&buf[..len], b"ffffffff");
    }

    #[test]
    fn test_hex_len_matches_writer() {
        let mut buf = [0u8; MAX_HEX_LEN];
        for value in [0, 1, 0xF, 0x10, 0xFF, 0x100, 0xABCDE, u32::MAX] {
            assert_eq!(hex_len(value), write_hex(&mut buf, value), "{value:#x}");
        }
    }
}
