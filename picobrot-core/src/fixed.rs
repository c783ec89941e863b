//! Fixed-point arithmetic for the escape-time evaluator
//!
//! Uses Q8.24 format: 8 integer bits (including sign) and 24 fractional
//! bits in an `i32`. Every product and quotient is computed at 64-bit
//! width and only narrowed at the end, so intermediate values never
//! overflow the 32-bit range.
//!
//! The free functions operate on raw `i64` fixed values. They are the
//! building blocks for expressions whose intermediates leave the Q8.24
//! range, such as `3.0 × 127` in the viewport mapping or the divisor
//! `128.0`, which has no `i32` representation.

use core::ops::{Add, Sub};

/// Number of fractional bits
pub const FRAC_BITS: u32 = 24;

/// Convert a plain integer to a wide fixed-point value
#[inline]
pub const fn int_to_fixed(n: i32) -> i64 {
    (n as i64) << FRAC_BITS
}

/// Multiply two wide fixed-point values
///
/// The full product is formed at 64 bits and rescaled by shifting right.
#[inline]
pub const fn fixed_mul(a: i64, b: i64) -> i64 {
    (a * b) >> FRAC_BITS
}

/// Divide two wide fixed-point values
///
/// The dividend is widened by shifting left before the integer division.
/// Returns 0 if the divisor is zero.
#[inline]
pub const fn fixed_div(a: i64, b: i64) -> i64 {
    if b == 0 {
        return 0;
    }
    (a << FRAC_BITS) / b
}

/// Q8.24 fixed-point number
///
/// Range: -128.0 to +127.99999994
/// Resolution: approximately 0.00000006
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fixed824(pub i32);

impl Fixed824 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(1 << FRAC_BITS);

    /// Two (2.0)
    pub const TWO: Self = Self(0x0200_0000);

    /// Four (4.0), the squared escape radius
    pub const FOUR: Self = Self(0x0400_0000);

    /// Fractional bits (24)
    pub const FRAC_BITS: u32 = FRAC_BITS;

    /// Create from a whole integer
    ///
    /// # Example
    /// ```
    /// use picobrot_core::Fixed824;
    /// let two = Fixed824::from_int(2);
    /// assert_eq!(two, Fixed824::TWO);
    /// assert_eq!(two.to_int(), 2);
    /// ```
    #[inline]
    pub const fn from_int(n: i8) -> Self {
        Self((n as i32) << FRAC_BITS)
    }

    /// Convert to whole integer (rounds toward negative infinity)
    #[inline]
    pub const fn to_int(self) -> i8 {
        (self.0 >> FRAC_BITS) as i8
    }

    /// Narrow a wide fixed-point value
    ///
    /// Keeps the low 32 bits, matching a plain `i64 -> i32` cast.
    #[inline]
    pub const fn from_wide(wide: i64) -> Self {
        Self(wide as i32)
    }

    /// Widen to a raw `i64` fixed-point value
    #[inline]
    pub const fn widen(self) -> i64 {
        self.0 as i64
    }

    /// Multiply two fixed-point numbers
    ///
    /// Uses i64 intermediate to avoid overflow.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub const fn mul(self, other: Self) -> Self {
        Self::from_wide(fixed_mul(self.widen(), other.widen()))
    }

    /// Get the raw i32 representation
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Create from raw i32 representation
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }
}

impl Add for Fixed824 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed824 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(self.0.wrapping_sub(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_int() {
        assert_eq!(Fixed824::from_int(0).to_int(), 0);
        assert_eq!(Fixed824::from_int(1).to_int(), 1);
        assert_eq!(Fixed824::from_int(-1).to_int(), -1);
        assert_eq!(Fixed824::from_int(127).to_int(), 127);
        assert_eq!(Fixed824::from_int(-128).to_int(), -128);
        assert_eq!(Fixed824::from_int(1), Fixed824::ONE);
    }

    #[test]
    fn test_viewport_literals() {
        // Two's complement encodings of the viewport bounds
        assert_eq!(Fixed824::from_raw(0xFE00_0000_u32 as i32), Fixed824::from_int(-2));
        assert_eq!(Fixed824::from_raw(0x0100_0000), Fixed824::ONE);
        assert_eq!(
            Fixed824::from_raw(0xFE80_0000_u32 as i32).mul(Fixed824::TWO),
            Fixed824::from_int(-3)
        );
        assert_eq!(
            Fixed824::from_raw(0x0180_0000).mul(Fixed824::TWO),
            Fixed824::from_int(3)
        );
    }

    #[test]
    fn test_multiply() {
        let two = Fixed824::from_int(2);
        let three = Fixed824::from_int(3);
        assert_eq!(two.mul(three), Fixed824::from_int(6));

        let half = Fixed824::from_raw(1 << 23);
        assert_eq!(two.mul(half), Fixed824::ONE);

        let minus_one_half = Fixed824::from_raw(-(3 << 23));
        assert_eq!(minus_one_half.mul(minus_one_half), Fixed824::from_raw(9 << 22)); // 2.25
    }

    #[test]
    fn test_multiply_does_not_overflow_32_bits() {
        // 11.0 * 11.0: the raw product is 2^48 * 121, far beyond i32
        let eleven = Fixed824::from_int(11);
        assert_eq!(eleven.mul(eleven), Fixed824::from_int(121));
    }

    #[test]
    fn test_divide() {
        assert_eq!(fixed_div(int_to_fixed(6), int_to_fixed(2)), int_to_fixed(3));
        assert_eq!(fixed_div(int_to_fixed(1), int_to_fixed(4)), 1 << 22);
        assert_eq!(fixed_div(int_to_fixed(6), 0), 0);
    }

    #[test]
    fn test_wide_helpers() {
        // 3.0 * 127 = 381.0 only exists at 64 bits
        let product = fixed_mul(int_to_fixed(3), int_to_fixed(127));
        assert_eq!(product, int_to_fixed(381));

        // Divisor 128.0 = 2^31 is not an i32
        let quotient = fixed_div(product, int_to_fixed(128));
        assert_eq!(quotient, (381_i64 << FRAC_BITS) / 128);
        assert_eq!(Fixed824::from_wide(quotient), Fixed824::from_raw(0x02FA_0000));
    }

    #[test]
    fn test_ops() {
        let a = Fixed824::from_int(5);
        let b = Fixed824::from_int(3);

        assert_eq!((a + b).to_int(), 8);
        assert_eq!((a - b).to_int(), 2);
        assert_eq!((b - a).to_int(), -2);
        assert!(Fixed824::FOUR > Fixed824::TWO);
    }
}
