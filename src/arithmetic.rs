use crate::real::Real;
use crate::wide::{div_rem_wide, Loss};
use core::ops::{Add, Div, Mul, Sub};

impl Real {
    /// Computes a+b. Dropped low bits of the smaller operand are rounded to
    /// nearest, ties to even.
    pub fn add(a: Self, b: Self) -> Self {
        Self::add_sub(a, b, false)
    }

    /// Computes a-b.
    pub fn sub(a: Self, b: Self) -> Self {
        Self::add_sub(a, b, true)
    }

    fn add_sub(a: Self, b: Self, subtract: bool) -> Self {
        if a.is_zero() {
            return if subtract { b.neg() } else { b };
        }
        if b.is_zero() {
            return a;
        }

        // Fold the operation into the sign of b: a - b == a + (-b).
        let b_sign = b.sign ^ subtract;

        // Pick the operand with the larger magnitude as the left side, so
        // that the mantissa subtraction below cannot underflow and the
        // result carries the correct sign.
        let a_mag = (a.exp, a.mantissa);
        let b_mag = (b.exp, b.mantissa);
        if a.sign != b_sign && a_mag == b_mag {
            // Full cancellation.
            return Real::zero();
        }
        let (sign, x, y) = if a_mag >= b_mag {
            (a.sign, a, b)
        } else {
            (b_sign, b, a)
        };

        // Align the smaller operand on the exponent of the larger one,
        // keeping 64 guard bits below the mantissa.
        let diff = x.exp as i64 - y.exp as i64;
        debug_assert!(diff >= 0);
        let xm = (x.mantissa as u128) << 64;
        let (ym, sticky) = if diff >= 128 {
            (0u128, true)
        } else {
            let wide = (y.mantissa as u128) << 64;
            let dropped = if diff == 0 {
                0
            } else {
                wide & ((1u128 << diff) - 1)
            };
            (wide >> diff, dropped != 0)
        };

        if a.sign == b_sign {
            let (sum, carry) = xm.overflowing_add(ym);
            if carry {
                // The implicit bit 128 moves the result one position up.
                let sticky = sticky || (sum & 1) != 0;
                let w = (1u128 << 127) | (sum >> 1);
                Real::from_wide(sign, x.exp as i64 + 1, w, sticky)
            } else {
                Real::from_wide(sign, x.exp as i64, sum, sticky)
            }
        } else {
            // Effective subtraction. Dropped bits of y borrow one unit from
            // the difference.
            let mut d = xm - ym;
            if sticky {
                d -= 1;
            }
            if sticky && d.leading_zeros() != 0 {
                // The difference lost its top bit while dropped bits remain
                // below it, so it cannot be renormalized by shifting. This
                // only happens when x.mantissa is exactly 2^63 and y sits
                // entirely under the guard bits, and then the result is
                // either x itself or the value one ulp below it.
                debug_assert_eq!(x.mantissa, 1 << 63);
                debug_assert_eq!(d.leading_zeros(), 1);
                return if ym < 1 << 62 {
                    // The subtrahend is under half an ulp of the smaller
                    // result spacing; round back up to x.
                    Real::norm(sign, x.exp as i64, 1 << 63, Loss::ExactlyZero)
                } else {
                    Real::norm(
                        sign,
                        x.exp as i64 - 1,
                        u64::MAX,
                        Loss::ExactlyZero,
                    )
                };
            }
            Real::from_wide(sign, x.exp as i64, d, sticky)
        }
    }

    /// Computes a*b. The 128-bit product is rounded to the 64-bit mantissa,
    /// nearest, ties to even.
    pub fn mul(a: Self, b: Self) -> Self {
        if a.is_zero() || b.is_zero() {
            return Real::zero();
        }
        let sign = a.sign ^ b.sign;
        let p = (a.mantissa as u128) * (b.mantissa as u128);
        // value = p * 2^(ea + eb - 126), so with the 128-bit convention of
        // from_wide the exponent is ea + eb + 1.
        Real::from_wide(sign, a.exp as i64 + b.exp as i64 + 1, p, false)
    }

    /// Computes a/b with a correctly rounded 64-bit quotient. Division by
    /// zero saturates: x/0 is [`Real::huge`] with the sign of x, and 0/0 is
    /// zero.
    pub fn div(a: Self, b: Self) -> Self {
        if b.is_zero() {
            return if a.is_zero() {
                Real::zero()
            } else {
                Real::huge(a.sign)
            };
        }
        if a.is_zero() {
            return Real::zero();
        }
        let sign = a.sign ^ b.sign;

        // Scale the dividend so the quotient lands left-justified in 128
        // bits: ma/mb is in [1, 2) after the conditional extra shift.
        let (hi, lo, exp) = if a.mantissa >= b.mantissa {
            // Numerator ma * 2^127.
            (
                (a.mantissa >> 1) as u128,
                (a.mantissa as u128) << 127,
                a.exp as i64 - b.exp as i64,
            )
        } else {
            // Numerator ma * 2^128.
            (a.mantissa as u128, 0, a.exp as i64 - b.exp as i64 - 1)
        };
        let (q, rem) = div_rem_wide(hi, lo, b.mantissa as u128);
        Real::from_wide(sign, exp, q, rem != 0)
    }
}

impl Add for Real {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Real::add(self, rhs)
    }
}

impl Sub for Real {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Real::sub(self, rhs)
    }
}

impl Mul for Real {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Real::mul(self, rhs)
    }
}

impl Div for Real {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Real::div(self, rhs)
    }
}

#[test]
fn test_addition() {
    fn add_helper(a: f64, b: f64) -> f64 {
        let a = Real::from_f64(a);
        let b = Real::from_f64(b);
        Real::add(a, b).to_f64()
    }

    assert_eq!(add_helper(0., -4.), -4.);
    assert_eq!(add_helper(-4., 0.), -4.);
    assert_eq!(add_helper(1., 1.), 2.);
    assert_eq!(add_helper(8., 4.), 12.);
    assert_eq!(add_helper(128., 2.), 130.);
    assert_eq!(add_helper(128., -8.), 120.);
    assert_eq!(add_helper(64., -60.), 4.);
    assert_eq!(add_helper(69., -65.), 4.);
    assert_eq!(add_helper(69., 69.), 138.);
    assert_eq!(add_helper(-128., -8.), -136.);
    assert_eq!(add_helper(64., -65.), -1.);
    assert_eq!(add_helper(-64., -65.), -129.);
    assert_eq!(add_helper(-15., -15.), -30.);
    assert_eq!(add_helper(-15., 15.), 0.);

    for i in -4..15 {
        for j in i..15 {
            assert_eq!(
                add_helper(f64::from(j), f64::from(i)),
                f64::from(i) + f64::from(j)
            );
        }
    }
}

#[test]
fn test_add_identity_and_commutativity() {
    use crate::utils::Rng;
    let mut rng = Rng::new();
    let zero = Real::zero();

    for _ in 0..10000 {
        let v = f64::from_bits(rng.next_u64());
        if !v.is_finite() {
            continue;
        }
        let a = Real::from_f64(v);
        let b = Real::from_f64(f64::from_bits(rng.next_u64()).fract());

        assert_eq!(Real::add(a, zero), a);
        assert_eq!(Real::add(zero, a), a);
        assert_eq!(Real::add(a, b), Real::add(b, a));
        assert_eq!(Real::sub(a, a), zero);
    }
}

#[test]
fn test_add_cancellation() {
    // 2^64 - 1 needs all 64 mantissa bits; subtracting 2^64 leaves -1.
    let big = Real::from_u64(u64::MAX);
    let pow = Real::add(big, Real::from_u64(1));
    assert_eq!(Real::sub(big, pow).to_i64(), -1);

    // Catastrophic cancellation leaves the low bits.
    let a = Real::from_u64(1 << 40);
    let b = Real::from_u64((1 << 40) + 1);
    assert_eq!(Real::sub(b, a), Real::one());
}

#[test]
fn test_add_exponent_alignment() {
    // The smaller operand is shifted out entirely and only affects the
    // result through rounding.
    let big = Real::from_f64(1e300);
    let tiny = Real::from_f64(1e-300);
    assert_eq!(Real::add(big, tiny).to_f64(), 1e300);
    assert_eq!(Real::sub(big, tiny).to_f64(), 1e300);
}

#[test]
fn test_sub_below_guard_bits() {
    let one = Real::one();

    // Subtracting far below the guard bits rounds back to one.
    let tiny = Real::from_f64(2f64.powi(-100));
    assert_eq!(Real::sub(one, tiny), one);

    // A subtrahend just past half the result spacing pulls the value down
    // to one ulp below one: (2^64 - 1) * 2^-64.
    let y = Real::add(
        Real::from_f64(2f64.powi(-65)),
        Real::from_f64(2f64.powi(-128)),
    );
    let r = Real::sub(one, y);
    assert_eq!(r.mantissa(), u64::MAX);
    assert_eq!(r.exponent(), -1);
}

#[test]
fn test_mul_simple() {
    fn mul_helper(a: f64, b: f64) -> f64 {
        let a = Real::from_f64(a);
        let b = Real::from_f64(b);
        Real::mul(a, b).to_f64()
    }

    // Products that are exact in 64 bits convert back exactly.
    assert_eq!(mul_helper(2.0, 3.0), 6.0);
    assert_eq!(mul_helper(-24.0, 0.5), -12.0);
    assert_eq!(mul_helper(1.5, 1.5), 2.25);
    assert_eq!(mul_helper(0., 17.5), 0.);
    assert_eq!(mul_helper(1e150, 1e150), 1e300);

    for i in 0..1000u64 {
        let a = Real::from_u64(i * 7919);
        let b = Real::from_u64(i + 1);
        assert_eq!(Real::mul(a, b).to_u64(), i * 7919 * (i + 1));
    }
}

#[test]
fn test_mul_identity_and_commutativity() {
    use crate::utils::Rng;
    let mut rng = Rng::new();
    let one = Real::one();

    for _ in 0..10000 {
        let v = f64::from_bits(rng.next_u64());
        if !v.is_finite() {
            continue;
        }
        let a = Real::from_f64(v);
        let b = Real::from_f64(f64::from_bits(rng.next_u64()).sin());

        assert_eq!(Real::mul(a, one), a);
        assert_eq!(Real::mul(one, a), a);
        assert_eq!(Real::mul(a, b), Real::mul(b, a));
    }
}

#[test]
fn test_div_simple() {
    fn div_helper(a: f64, b: f64) -> f64 {
        let a = Real::from_f64(a);
        let b = Real::from_f64(b);
        Real::div(a, b).to_f64()
    }

    assert_eq!(div_helper(8.0, 2.0), 4.0);
    assert_eq!(div_helper(1.0, 4.0), 0.25);
    assert_eq!(div_helper(-10.0, 4.0), -2.5);
    assert_eq!(div_helper(0.0, 7.0), 0.0);

    // 1/7 is inexact; the 64-bit quotient rounds down to the f64 value.
    assert_eq!(div_helper(1.0, 7.0), 1.0 / 7.0);
}

#[test]
fn test_div_inverse() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    for _ in 0..5000 {
        let n = rng.next_u64() >> 20;
        if n == 0 {
            continue;
        }
        let a = Real::from_u64(n);
        // n / n == 1, and (n / 1) == n.
        assert_eq!(Real::div(a, a), Real::one());
        assert_eq!(Real::div(a, Real::one()), a);
    }
}

#[test]
fn test_div_by_zero_saturates() {
    let one = Real::one();
    let zero = Real::zero();

    assert_eq!(Real::div(one, zero), Real::huge(false));
    assert_eq!(Real::div(one.neg(), zero), Real::huge(true));
    assert_eq!(Real::div(zero, zero), zero);
    // The saturated value behaves like an ordinary, very large number.
    assert!(Real::huge(false) > Real::from_f64(f64::MAX));
}

#[test]
fn test_operators() {
    let a = Real::from_f64(8.0);
    let b = Real::from_f64(2.0);
    assert_eq!((a + b).to_f64(), 10.0);
    assert_eq!((a - b).to_f64(), 6.0);
    assert_eq!((a * b).to_f64(), 16.0);
    assert_eq!((a / b).to_f64(), 4.0);
    assert_eq!((-a).to_f64(), -8.0);
}

#[test]
fn test_slow_sqrt_2() {
    // Find sqrt(2) using a binary search.
    let two = Real::from_u64(2);
    let mut high = Real::from_u64(2);
    let mut low = Real::one();

    for _ in 0..80 {
        let mid = Real::div(Real::add(high, low), two);
        if Real::mul(mid, mid) < two {
            low = mid;
        } else {
            high = mid;
        }
    }

    assert!(low.to_f64() < 1.4142135623730952);
    assert!(low.to_f64() > 1.4142135623730949);
}
