//! Conversions between the binary form of [`Real`] and the base-10 form used
//! for parsing and printing.

use crate::real::Real;
use crate::wide::{div_rem_wide, mul_u128, round_shift, round_shift_wide, Loss};

/// floor(log10(2) * 2^32), used to estimate the decimal exponent of a binary
/// one with a single multiply.
const LN2_LN10: i64 = 1292913987;

const TEN18: u128 = 10u128.pow(18);
const TEN19: u128 = 10u128.pow(19);

/// A real number in base-10 form: `(-1)^sign * mantissa * 10^exp`, with the
/// mantissa right-justified as a plain integer. This is the shape that
/// parsing produces and printing consumes; arithmetic happens on the binary
/// [`Real`] form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    pub(crate) mantissa: u64,
    pub(crate) exp: i32,
    pub(crate) sign: bool,
}

impl Decimal {
    /// Build a decimal value. Zero is canonicalized so that derived equality
    /// behaves.
    pub fn new(sign: bool, mantissa: u64, exp: i32) -> Self {
        if mantissa == 0 {
            return Decimal {
                mantissa: 0,
                exp: 0,
                sign: false,
            };
        }
        Decimal {
            mantissa,
            exp,
            sign,
        }
    }

    pub fn zero() -> Self {
        Decimal::new(false, 0, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign
    }

    /// Returns the integer mantissa.
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Returns the base-10 exponent.
    pub fn exponent(&self) -> i32 {
        self.exp
    }

    /// Convert to the binary form, rounding the value to the 64-bit mantissa,
    /// nearest, ties to even.
    pub fn to_binary(&self) -> Real {
        if self.is_zero() {
            return Real::zero();
        }
        let base = Real::norm(self.sign, 63, self.mantissa, Loss::ExactlyZero);
        if self.exp == 0 {
            return base;
        }
        let be = base.exponent() as i64;
        let bm = base.mantissa() as u128;

        if self.exp > 0 {
            let (pm, pe) = pow10_wide(self.exp as u32);
            let (hi, lo) = mul_u128(bm << 64, pm);
            if hi >> 127 != 0 {
                Real::from_wide(self.sign, be + pe + 1, hi, lo != 0)
            } else {
                let w = (hi << 1) | (lo >> 127);
                Real::from_wide(self.sign, be + pe, w, (lo << 1) != 0)
            }
        } else {
            let (pm, pe) = pow10_wide(self.exp.unsigned_abs());
            // Scale the dividend so the quotient is left-justified.
            let (hi, exp) = if bm << 64 >= pm {
                (bm << 63, be - pe)
            } else {
                (bm << 64, be - pe - 1)
            };
            let (q, rem) = div_rem_wide(hi, 0, pm);
            Real::from_wide(self.sign, exp, q, rem != 0)
        }
    }
}

impl Real {
    /// Returns 10^k as a binary value. Exact for |k| <= 19; larger powers are
    /// correctly rounded to the 64-bit mantissa.
    pub fn pow10(k: i32) -> Self {
        Decimal::new(false, 1, k).to_binary()
    }

    /// Convert to the base-10 form with a full 19-digit mantissa, rounded to
    /// nearest, ties to even.
    pub fn to_decimal(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::zero();
        }

        // Estimate the scale that puts the mantissa at 19 digits, then
        // correct it. The log estimate is off by at most one.
        let mut d = ((self.exp as i64 * LN2_LN10) >> 32) - 18;
        let mut scaled = self.scaled_mantissa(d);
        while scaled >= TEN19 {
            d += 1;
            scaled = self.scaled_mantissa(d);
        }
        while scaled < TEN18 {
            d -= 1;
            scaled = self.scaled_mantissa(d);
        }
        if scaled >= TEN19 {
            // Rounding pushed the rescaled mantissa to exactly 10^19.
            scaled /= 10;
            d += 1;
        }
        Decimal::new(self.sign, scaled as u64, d as i32)
    }

    /// Returns `round(|self| / 10^d)`, saturating when the result does not
    /// fit in 128 bits.
    fn scaled_mantissa(&self, d: i64) -> u128 {
        let e2 = self.exp as i64 - 63;
        if d >= 0 {
            let (pm, pe) = pow10_wide(d as u32);
            let (q, rem) =
                div_rem_wide((self.mantissa as u128) << 63, 0, pm);
            // q = mantissa * 2^191 / 10^d, so the true result is
            // q * 2^(e2 - pe - 64).
            let sh = pe + 64 - e2;
            if sh < 0 {
                return u128::MAX;
            }
            if sh >= 256 {
                return 0;
            }
            round_shift(q, sh as u32, rem != 0)
        } else {
            let (pm, pe) = pow10_wide(d.unsigned_abs() as u32);
            let (hi, lo) = mul_u128((self.mantissa as u128) << 64, pm);
            // hi:lo = mantissa * 2^64 * 10^-d * 2^(127 - pe), so the true
            // result is hi:lo * 2^(e2 + pe - 191).
            let sh = 191 - e2 - pe;
            if sh < 0 || (sh < 128 && hi >> sh != 0) {
                return u128::MAX;
            }
            round_shift_wide(hi, lo, sh as u32, false)
        }
    }
}

/// Returns 10^k as `(m, e)` with `10^k = m * 2^(e - 127)` and `m` in
/// `[2^127, 2^128)`, correctly rounded. Powers up to 10^38 are exact.
pub(crate) fn pow10_wide(k: u32) -> (u128, i64) {
    if k <= 38 {
        let p = 10u128.pow(k);
        let sh = p.leading_zeros();
        return (p << sh, 127 - sh as i64);
    }
    // Square-and-multiply on the 128-bit approximation.
    let (hm, he) = pow10_wide(k / 2);
    let (sm, se) = mul_norm(hm, he, hm, he);
    if k % 2 == 1 {
        let (tm, te) = pow10_wide(1);
        mul_norm(sm, se, tm, te)
    } else {
        (sm, se)
    }
}

/// Multiply two left-justified 128-bit fixed-point values and round the
/// product back to 128 bits.
fn mul_norm(am: u128, ae: i64, bm: u128, be: i64) -> (u128, i64) {
    let (hi, lo) = mul_u128(am, bm);
    let (mut m, mut e) = if hi >> 127 != 0 {
        let up = Loss::from_tail(lo, 128).round_up(hi & 1 == 1);
        (hi.wrapping_add(up as u128), ae + be + 1)
    } else {
        let w = (hi << 1) | (lo >> 127);
        let up = Loss::from_tail(lo, 127).round_up(w & 1 == 1);
        (w.wrapping_add(up as u128), ae + be)
    };
    if m == 0 {
        // The round-up carried out of the word.
        m = 1 << 127;
        e += 1;
    }
    (m, e)
}

#[test]
fn test_pow10_wide_exact() {
    for k in 0..=38u32 {
        let (m, e) = pow10_wide(k);
        assert_eq!(m >> 127, 1, "left-justified");
        // Shift back down; no bits may be lost for the exact range.
        let sh = (127 - e) as u32;
        assert_eq!(m & ((1u128 << sh) - 1), 0);
        assert_eq!(m >> sh, 10u128.pow(k));
    }
    // The squaring path must stay left-justified.
    for k in [39u32, 50, 100, 308, 5000] {
        let (m, _) = pow10_wide(k);
        assert_eq!(m >> 127, 1);
    }
}

#[test]
fn test_pow10_real() {
    // Powers up to 10^19 fit the 64-bit mantissa exactly.
    for k in 0..=19i32 {
        assert_eq!(Real::pow10(k).to_u64(), 10u64.pow(k as u32));
    }
    assert_eq!(Real::pow10(0), Real::one());
    assert_eq!(Real::pow10(300).to_f64(), 1e300);
    assert_eq!(Real::pow10(-300).to_f64(), 1e-300);

    // 10^k * 10^-k == 1 for exactly representable powers.
    for k in 1..=19i32 {
        let p = Real::mul(Real::pow10(k), Real::pow10(-k));
        assert_eq!(p, Real::one());
    }
}

#[test]
fn test_to_decimal_simple() {
    // 3.25 = 325 * 10^-2, widened to the 19-digit mantissa.
    let d = Real::from_f64(3.25).to_decimal();
    assert_eq!(d.mantissa(), 3_250_000_000_000_000_000);
    assert_eq!(d.exponent(), -18);
    assert!(!d.is_negative());

    let d = Real::from_u64(12345).to_decimal();
    assert_eq!(d.mantissa(), 1_234_500_000_000_000_000);
    assert_eq!(d.exponent(), -14);

    let d = Real::from_i64(-1).to_decimal();
    assert_eq!(d.mantissa(), 1_000_000_000_000_000_000);
    assert_eq!(d.exponent(), -18);
    assert!(d.is_negative());

    assert_eq!(Real::zero().to_decimal(), Decimal::zero());
}

#[test]
fn test_to_decimal_inexact() {
    // 1/3 rounds down on the last of the 19 digits.
    let third = Real::div(Real::one(), Real::from_u64(3));
    let d = third.to_decimal();
    assert_eq!(d.mantissa(), 3_333_333_333_333_333_333);
    assert_eq!(d.exponent(), -19);

    // 2/3 rounds up.
    let d = Real::div(Real::from_u64(2), Real::from_u64(3)).to_decimal();
    assert_eq!(d.mantissa(), 6_666_666_666_666_666_667);
    assert_eq!(d.exponent(), -19);
}

#[test]
fn test_to_binary_simple() {
    assert_eq!(Decimal::new(false, 325, -2).to_binary().to_f64(), 3.25);
    assert_eq!(Decimal::new(true, 5, -1).to_binary().to_f64(), -0.5);
    assert_eq!(Decimal::new(false, 12345, 0).to_binary().to_u64(), 12345);
    assert_eq!(Decimal::new(false, 5, 2).to_binary().to_u64(), 500);
    assert_eq!(Decimal::zero().to_binary(), Real::zero());
}

#[test]
fn test_to_binary_saturates() {
    // Exponents past the 31-bit range saturate instead of wrapping.
    let d = Decimal::new(false, 1, i32::MAX);
    assert_eq!(d.to_binary(), Real::huge(false));
    let d = Decimal::new(true, 1, i32::MAX);
    assert_eq!(d.to_binary(), Real::huge(true));
    let d = Decimal::new(false, 1, i32::MIN);
    assert_eq!(d.to_binary(), Real::zero());
}

#[test]
fn test_decimal_round_trip() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    // Doubles carry 53 bits, well under the 19 decimal digits, so the
    // binary -> decimal -> binary trip must reproduce the value.
    for _ in 0..5000 {
        let v = f64::from_bits(rng.next_u64());
        if !v.is_finite() {
            continue;
        }
        let r = Real::from_f64(v);
        assert_eq!(r.to_decimal().to_binary(), r, "value {}", v);
    }

    for v in [0.1, 0.2, 0.3, 1e-300, 1e300, 355. / 113.] {
        let r = Real::from_f64(v);
        assert_eq!(r.to_decimal().to_binary(), r);
    }
}
