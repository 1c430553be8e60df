use crate::wide::Loss;
use core::cmp::Ordering;

/// The smallest exponent the type can carry. The exponent field is logically
/// 31 bits wide; results below this range flush to zero.
pub const EXP_MIN: i32 = -(1 << 30);
/// The largest exponent the type can carry. Results above this range saturate
/// to [`Real::huge`].
pub const EXP_MAX: i32 = (1 << 30) - 1;

/// An extended-precision real number with a 64-bit mantissa, a 31-bit signed
/// exponent and a sign.
///
/// The mantissa is kept left-justified with a base-2 exponent, so the value is
/// `(-1)^sign * mantissa * 2^(exponent - 63)`. Whenever the value is nonzero
/// the top mantissa bit is set. All arithmetic operates on this form; the
/// right-justified base-10 form used for printing is [`crate::Decimal`].
///
/// Zero is canonical: mantissa, exponent and sign are all zero, so derived
/// equality is well-defined. Out-of-range results saturate instead of
/// wrapping: exponent overflow produces the largest representable magnitude
/// and exponent underflow flushes to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Real {
    pub(crate) mantissa: u64,
    pub(crate) exp: i32,
    pub(crate) sign: bool,
}

impl Real {
    /// Returns the canonical zero.
    pub fn zero() -> Self {
        Real {
            mantissa: 0,
            exp: 0,
            sign: false,
        }
    }

    /// Returns the value one.
    pub fn one() -> Self {
        Real {
            mantissa: 1 << 63,
            exp: 0,
            sign: false,
        }
    }

    /// Returns the largest representable magnitude with the given sign. This
    /// is the saturation value for exponent overflow and division by zero.
    pub fn huge(sign: bool) -> Self {
        Real {
            mantissa: u64::MAX,
            exp: EXP_MAX,
            sign,
        }
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Returns true if the value is negative.
    pub fn is_negative(&self) -> bool {
        self.sign
    }

    /// Returns the left-justified mantissa.
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Returns the base-2 exponent.
    pub fn exponent(&self) -> i32 {
        self.exp
    }

    /// Returns the value with a flipped sign. Zero stays canonical.
    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        Real {
            mantissa: self.mantissa,
            exp: self.exp,
            sign: !self.sign,
        }
    }

    /// Returns the magnitude of the value.
    pub fn abs(&self) -> Self {
        Real {
            mantissa: self.mantissa,
            exp: self.exp,
            sign: false,
        }
    }

    /// Build a normalized value from a mantissa that may not be
    /// left-justified. The value is `mantissa * 2^(exp - 63)` plus the
    /// dropped bits described by `loss`. Rounds to nearest, ties to even,
    /// and saturates the exponent.
    pub(crate) fn norm(
        sign: bool,
        mut exp: i64,
        mut mantissa: u64,
        mut loss: Loss,
    ) -> Real {
        if mantissa == 0 {
            if !loss.is_mt_half() {
                return Real::zero();
            }
            // The dropped bits alone round up to one unit in the last place.
            mantissa = 1;
            loss = Loss::ExactlyZero;
        }

        let sh = mantissa.leading_zeros();
        if sh > 0 {
            debug_assert!(
                loss.is_exactly_zero(),
                "shifting would pull dropped bits back in"
            );
            mantissa <<= sh;
            exp -= sh as i64;
        } else if loss.round_up(mantissa & 1 == 1) {
            let (m, carry) = mantissa.overflowing_add(1);
            if carry {
                mantissa = 1 << 63;
                exp += 1;
            } else {
                mantissa = m;
            }
        }

        if exp > EXP_MAX as i64 {
            return Real::huge(sign);
        }
        if exp < EXP_MIN as i64 {
            return Real::zero();
        }
        Real {
            mantissa,
            exp: exp as i32,
            sign,
        }
    }

    /// Build a normalized value from a 128-bit intermediate `w`, where the
    /// value is `w * 2^(exp - 127)`. `sticky` marks dropped bits below the
    /// word. The word must already be left-justified when sticky bits exist.
    pub(crate) fn from_wide(
        sign: bool,
        mut exp: i64,
        mut w: u128,
        sticky: bool,
    ) -> Real {
        if w == 0 {
            return Real::zero();
        }
        let sh = w.leading_zeros();
        debug_assert!(
            sh == 0 || !sticky,
            "shifting would pull dropped bits back in"
        );
        w <<= sh;
        exp -= sh as i64;

        let m = (w >> 64) as u64;
        let loss = Loss::from_tail(w, 64).with_sticky(sticky);
        Real::norm(sign, exp, m, loss)
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if other.sign {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.sign {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {
                if self.sign != other.sign {
                    return if self.sign {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    };
                }
                // The left-justified form orders magnitudes by exponent
                // first, then mantissa.
                let mag = (self.exp, self.mantissa)
                    .cmp(&(other.exp, other.mantissa));
                if self.sign {
                    mag.reverse()
                } else {
                    mag
                }
            }
        }
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::ops::Neg for Real {
    type Output = Self;
    fn neg(self) -> Self {
        Real::neg(&self)
    }
}

#[test]
fn test_one_imm() {
    let one = Real::one();
    assert_eq!(one.mantissa(), 1 << 63);
    assert_eq!(one.exponent(), 0);
    assert_eq!(one.to_f64(), 1.0);
}

#[test]
fn test_canonical_zero() {
    // Negating zero keeps the canonical form, so equality stays simple.
    let z = Real::zero();
    assert_eq!(z.neg(), z);
    assert_eq!(Real::from_f64(-0.0), z);
    assert_eq!(Real::default(), z);
    assert!(!z.is_negative());
}

#[test]
fn test_norm_shifts_left() {
    let x = Real::norm(false, 63, 1, Loss::ExactlyZero);
    assert_eq!(x, Real::one());

    let x = Real::norm(false, 63, 12345, Loss::ExactlyZero);
    assert_eq!(x.mantissa().leading_zeros(), 0);
    assert_eq!(x.to_u64(), 12345);
}

#[test]
fn test_norm_rounds_ties_to_even() {
    // A mantissa of all ones plus a half rounds up and carries.
    let x = Real::norm(false, 0, u64::MAX, Loss::ExactlyHalf);
    assert_eq!(x.mantissa(), 1 << 63);
    assert_eq!(x.exponent(), 1);

    // An even mantissa plus an exact half stays put.
    let x = Real::norm(false, 0, u64::MAX - 1, Loss::ExactlyHalf);
    assert_eq!(x.mantissa(), u64::MAX - 1);
}

#[test]
fn test_norm_saturation() {
    let x = Real::norm(false, EXP_MAX as i64 + 5, 1 << 63, Loss::ExactlyZero);
    assert_eq!(x, Real::huge(false));

    let x = Real::norm(true, EXP_MIN as i64 - 5, 1 << 63, Loss::ExactlyZero);
    assert_eq!(x, Real::zero());
}

#[cfg(feature = "std")]
#[test]
fn test_comparisons() {
    use crate::utils;

    // Compare a bunch of special values, using the <,>,== operators and
    // check that they match the comparison on doubles.
    for first in utils::get_special_test_values() {
        for second in utils::get_special_test_values() {
            let a = Real::from_f64(first);
            let b = Real::from_f64(second);
            assert_eq!(first < second, a < b, "<");
            assert_eq!(first == second, a == b, "==");
            assert_eq!(first > second, a > b, ">");
        }
    }
}
