//! This module contains the fixed-width multiprecision helpers that back the
//! 64-bit mantissa arithmetic and the radix conversions. The mantissa never
//! grows past 64 bits, so everything here works on one or two `u128` words
//! instead of a heap-allocated big integer.

/// Reports the kind of values that are lost when we drop low bits. In some
/// context this is used as the two guard bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Loss {
    ExactlyZero,  //0000000
    LessThanHalf, //0xxxxxx
    ExactlyHalf,  //1000000
    MoreThanHalf, //1xxxxxx
}

impl Loss {
    pub fn is_exactly_zero(&self) -> bool {
        matches!(self, Self::ExactlyZero)
    }
    pub fn is_exactly_half(&self) -> bool {
        matches!(self, Self::ExactlyHalf)
    }
    pub fn is_mt_half(&self) -> bool {
        matches!(self, Self::MoreThanHalf)
    }

    /// Classify the low `bits` bits of `val` relative to a half at
    /// bit `bits - 1`.
    pub fn from_tail(val: u128, bits: u32) -> Loss {
        if bits == 0 {
            return Loss::ExactlyZero;
        }
        if bits > 128 {
            // The half position is above the whole word, so any set bit is
            // strictly below it.
            return if val == 0 {
                Loss::ExactlyZero
            } else {
                Loss::LessThanHalf
            };
        }
        let half = 1u128 << (bits - 1);
        let tail = if bits == 128 {
            val
        } else {
            val & ((half << 1) - 1)
        };
        if tail == half {
            Loss::ExactlyHalf
        } else if tail > half {
            Loss::MoreThanHalf
        } else if tail == 0 {
            Loss::ExactlyZero
        } else {
            Loss::LessThanHalf
        }
    }

    /// Combine this loss with `sticky` extra bits of lower significance.
    pub fn with_sticky(self, sticky: bool) -> Loss {
        if !sticky {
            return self;
        }
        match self {
            Loss::ExactlyZero | Loss::LessThanHalf => Loss::LessThanHalf,
            Loss::ExactlyHalf | Loss::MoreThanHalf => Loss::MoreThanHalf,
        }
    }

    /// Returns true if rounding to nearest (ties to even) must increment a
    /// result whose lowest kept bit has the parity `is_odd`.
    pub fn round_up(&self, is_odd: bool) -> bool {
        self.is_mt_half() || (self.is_exactly_half() && is_odd)
    }
}

/// Multiply two 128-bit words and return the (high, low) parts of the
/// 256-bit product.
pub(crate) fn mul_u128(a: u128, b: u128) -> (u128, u128) {
    let (a0, a1) = (a as u64, (a >> 64) as u64);
    let (b0, b1) = (b as u64, (b >> 64) as u64);

    let ll = a0 as u128 * b0 as u128;
    let lh = a0 as u128 * b1 as u128;
    let hl = a1 as u128 * b0 as u128;
    let hh = a1 as u128 * b1 as u128;

    // Sum the cross products into the middle word and carry into the top.
    let mid = (ll >> 64) + (lh as u64 as u128) + (hl as u64 as u128);
    let lo = (mid << 64) | (ll as u64 as u128);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Divide the 256-bit value `hi:lo` by `d`, returning the quotient and the
/// remainder. The quotient must fit in 128 bits, which the caller guarantees
/// by keeping `hi < d`.
pub(crate) fn div_rem_wide(hi: u128, mut lo: u128, d: u128) -> (u128, u128) {
    debug_assert!(d != 0, "division by zero");
    debug_assert!(hi < d, "quotient does not fit in 128 bits");
    let mut rem = hi;
    let mut q = 0u128;
    for _ in 0..128 {
        // If the top bit of the remainder is about to shift out, the shifted
        // remainder is larger than any 128-bit divisor.
        let carry = rem >> 127;
        rem = (rem << 1) | (lo >> 127);
        lo <<= 1;
        q <<= 1;
        if carry != 0 || rem >= d {
            rem = rem.wrapping_sub(d);
            q |= 1;
        }
    }
    (q, rem)
}

/// Shift `w` right by `sh` and round to nearest (ties to even), treating
/// `sticky` as extra dropped bits below the word.
pub(crate) fn round_shift(w: u128, sh: u32, sticky: bool) -> u128 {
    if sh == 0 {
        // Sticky bits alone are below half of the last place.
        return w;
    }
    if sh >= 128 {
        let loss = Loss::from_tail(w, sh).with_sticky(sticky);
        return if loss.round_up(false) { 1 } else { 0 };
    }
    let kept = w >> sh;
    let loss = Loss::from_tail(w, sh).with_sticky(sticky);
    if loss.round_up(kept & 1 == 1) {
        kept + 1
    } else {
        kept
    }
}

/// The 256-bit version of [`round_shift`].
pub(crate) fn round_shift_wide(
    hi: u128,
    lo: u128,
    sh: u32,
    sticky: bool,
) -> u128 {
    if sh >= 128 {
        return round_shift(hi, sh - 128, sticky || lo != 0);
    }
    if sh == 0 {
        debug_assert_eq!(hi, 0, "result does not fit in 128 bits");
        return lo;
    }
    debug_assert_eq!(hi >> sh, 0, "result does not fit in 128 bits");
    let kept = (hi << (128 - sh)) | (lo >> sh);
    let loss = Loss::from_tail(lo, sh).with_sticky(sticky);
    if loss.round_up(kept & 1 == 1) {
        kept + 1
    } else {
        kept
    }
}

#[test]
fn test_loss_classification() {
    assert!(Loss::from_tail(0b10000000, 3).is_exactly_zero());
    assert!(Loss::from_tail(0b10000111, 3).is_mt_half());
    assert!(Loss::from_tail(0b10000100, 3).is_exactly_half());
    assert_eq!(Loss::from_tail(0b10000001, 3), Loss::LessThanHalf);
    assert_eq!(Loss::from_tail(u128::MAX, 128), Loss::MoreThanHalf);
    assert_eq!(Loss::from_tail(1, 130), Loss::LessThanHalf);
    assert!(Loss::from_tail(0, 130).is_exactly_zero());

    // Sticky bits turn an exact half into more-than-half.
    assert!(Loss::from_tail(0b100, 3).with_sticky(true).is_mt_half());
    assert_eq!(Loss::from_tail(0, 3).with_sticky(true), Loss::LessThanHalf);
}

#[test]
fn test_mul_u128_small() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    // Products of 64-bit values must match the native 128-bit multiply.
    for _ in 0..5000 {
        let a = rng.next_u64();
        let b = rng.next_u64();
        let (hi, lo) = mul_u128(a as u128, b as u128);
        assert_eq!(hi, 0);
        assert_eq!(lo, a as u128 * b as u128);
    }
}

#[test]
fn test_mul_u128_symmetry() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    for _ in 0..5000 {
        let a = ((rng.next_u64() as u128) << 64) | rng.next_u64() as u128;
        let b = ((rng.next_u64() as u128) << 64) | rng.next_u64() as u128;
        assert_eq!(mul_u128(a, b), mul_u128(b, a));
    }

    // (2^127) * (2^127) = 2^254.
    let (hi, lo) = mul_u128(1 << 127, 1 << 127);
    assert_eq!(hi, 1 << 126);
    assert_eq!(lo, 0);
}

#[test]
fn test_div_rem_reconstruction() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    for _ in 0..2000 {
        let d = ((rng.next_u64() as u128) << 64) | rng.next_u64() as u128;
        let d = d | (1 << 127); // keep the divisor large
        let hi =
            (((rng.next_u64() as u128) << 64) | rng.next_u64() as u128) % d;
        let lo = ((rng.next_u64() as u128) << 64) | rng.next_u64() as u128;

        let (q, rem) = div_rem_wide(hi, lo, d);
        assert!(rem < d);

        // q * d + rem must give back hi:lo.
        let (phi, plo) = mul_u128(q, d);
        let (rlo, carry) = plo.overflowing_add(rem);
        let rhi = phi + carry as u128;
        assert_eq!((rhi, rlo), (hi, lo));
    }
}

#[test]
fn test_round_shift() {
    // 0b10100 >> 2 with a dropped 0b00 tail.
    assert_eq!(round_shift(0b10100, 2, false), 0b101);
    // Tie rounds to even.
    assert_eq!(round_shift(0b10110, 2, false), 0b110);
    assert_eq!(round_shift(0b10010, 2, false), 0b100);
    // Sticky breaks the tie upward.
    assert_eq!(round_shift(0b10010, 2, true), 0b101);
    // Above half always rounds up.
    assert_eq!(round_shift(0b10011, 2, false), 0b101);
    // Far shifts collapse to zero.
    assert_eq!(round_shift(u64::MAX as u128, 200, false), 0);

    assert_eq!(round_shift_wide(1, 0, 100, false), 1 << 28);
    assert_eq!(round_shift_wide(0, 7, 1, false), 4);
    assert_eq!(round_shift_wide(3, u128::MAX, 129, false), 2);
}
