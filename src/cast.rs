//! Conversions between [`Real`] and the native machine types.

use crate::real::Real;
use crate::utils::mask;
use crate::wide::{round_shift, Loss};

impl Real {
    /// Convert an unsigned integer. Values up to 64 bits convert exactly.
    pub fn from_u64(val: u64) -> Self {
        Real::norm(false, 63, val, Loss::ExactlyZero)
    }

    /// Convert a signed integer. Values up to 64 bits convert exactly.
    pub fn from_i64(val: i64) -> Self {
        Real::norm(val < 0, 63, val.unsigned_abs(), Loss::ExactlyZero)
    }

    pub fn from_u32(val: u32) -> Self {
        Real::from_u64(val as u64)
    }

    pub fn from_i32(val: i32) -> Self {
        Real::from_i64(val as i64)
    }

    /// Convert an IEEE double. Every finite double converts exactly, since
    /// the 64-bit mantissa covers all 53 significant bits. Infinities map to
    /// the saturation value [`Real::huge`] and NaN maps to zero.
    pub fn from_f64(val: f64) -> Self {
        let bits = val.to_bits();
        let sign = (bits >> 63) != 0;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let frac = bits & mask(52);

        if biased == 0x7ff {
            return if frac == 0 {
                Real::huge(sign)
            } else {
                Real::zero()
            };
        }
        if biased == 0 {
            // Denormal: no implicit bit, fixed exponent of -1074 below the
            // fraction.
            return Real::norm(sign, -1011, frac, Loss::ExactlyZero);
        }
        Real::norm(sign, biased - 1012, frac | (1 << 52), Loss::ExactlyZero)
    }

    /// Convert to an IEEE double, rounding the 64-bit mantissa to 53 bits,
    /// nearest, ties to even. Out-of-range magnitudes become infinities.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let sign_bit = (self.sign as u64) << 63;
        let mut biased = self.exp as i64 + 1023;

        if biased <= 0 {
            // The result is denormal in f64. Shift the mantissa down to the
            // fixed denormal position; a carry out of the fraction lands in
            // the exponent field, which is exactly what we want.
            let sh = 12 - biased;
            let sh = if sh > 128 { 128 } else { sh as u32 };
            let frac = round_shift(self.mantissa as u128, sh, false) as u64;
            return f64::from_bits(sign_bit | frac);
        }

        let mut m53 = round_shift(self.mantissa as u128, 11, false) as u64;
        if m53 == 1 << 53 {
            // Rounding overflowed the 53-bit significand.
            m53 = 1 << 52;
            biased += 1;
        }
        if biased >= 0x7ff {
            return f64::from_bits(sign_bit | 0x7ff0_0000_0000_0000);
        }
        f64::from_bits(sign_bit | ((biased as u64) << 52) | (m53 & mask(52)))
    }

    /// Truncate toward zero into a u64. Negative values give zero and
    /// magnitudes past the range give `u64::MAX`.
    pub fn to_u64(&self) -> u64 {
        if self.is_zero() || self.sign {
            return 0;
        }
        match self.exp {
            i32::MIN..=-1 => 0,
            0..=63 => self.mantissa >> (63 - self.exp),
            _ => u64::MAX,
        }
    }

    /// Truncate toward zero into an i64, saturating at the type bounds.
    pub fn to_i64(&self) -> i64 {
        if self.is_zero() {
            return 0;
        }
        let mag = match self.exp {
            i32::MIN..=-1 => 0,
            0..=63 => self.mantissa >> (63 - self.exp),
            _ => u64::MAX,
        };
        if self.sign {
            if mag >= 1 << 63 {
                i64::MIN
            } else {
                -(mag as i64)
            }
        } else if mag >= 1 << 63 {
            i64::MAX
        } else {
            mag as i64
        }
    }

    /// Truncate toward zero into a u32, saturating at the type bounds.
    pub fn to_u32(&self) -> u32 {
        let v = self.to_u64();
        if v > u32::MAX as u64 {
            u32::MAX
        } else {
            v as u32
        }
    }

    /// Truncate toward zero into an i32, saturating at the type bounds.
    pub fn to_i32(&self) -> i32 {
        let v = self.to_i64();
        if v > i32::MAX as i64 {
            i32::MAX
        } else if v < i32::MIN as i64 {
            i32::MIN
        } else {
            v as i32
        }
    }
}

impl From<f64> for Real {
    fn from(v: f64) -> Self {
        Real::from_f64(v)
    }
}

impl From<u64> for Real {
    fn from(v: u64) -> Self {
        Real::from_u64(v)
    }
}

impl From<i64> for Real {
    fn from(v: i64) -> Self {
        Real::from_i64(v)
    }
}

impl From<Real> for f64 {
    fn from(v: Real) -> Self {
        v.to_f64()
    }
}

#[test]
fn test_integer_round_trip() {
    for v in [0u64, 1, 2, 3, 255, 256, 12345, u64::MAX - 1, u64::MAX] {
        assert_eq!(Real::from_u64(v).to_u64(), v);
    }
    for v in [0i64, 1, -1, 42, -42, i64::MAX, i64::MIN, i64::MIN + 1] {
        assert_eq!(Real::from_i64(v).to_i64(), v);
    }
    for v in [0i32, 1, -1, i32::MAX, i32::MIN] {
        assert_eq!(Real::from_i32(v).to_i32(), v);
    }
    for v in [0u32, 1, u32::MAX] {
        assert_eq!(Real::from_u32(v).to_u32(), v);
    }
}

#[test]
fn test_narrow_integer_saturation() {
    assert_eq!(Real::from_i64(1 << 40).to_i32(), i32::MAX);
    assert_eq!(Real::from_i64(-(1 << 40)).to_i32(), i32::MIN);
    assert_eq!(Real::from_i64(1 << 40).to_u32(), u32::MAX);
    assert_eq!(Real::from_i64(-5).to_u32(), 0);
}

#[test]
fn test_integer_truncation() {
    // Fractions truncate toward zero, for both signs.
    assert_eq!(Real::from_f64(2.99).to_u64(), 2);
    assert_eq!(Real::from_f64(2.99).to_i64(), 2);
    assert_eq!(Real::from_f64(-2.99).to_i64(), -2);
    assert_eq!(Real::from_f64(0.99).to_u64(), 0);
    assert_eq!(Real::from_f64(-0.5).to_u64(), 0);
}

#[test]
fn test_integer_saturation() {
    assert_eq!(Real::from_f64(1e300).to_u64(), u64::MAX);
    assert_eq!(Real::from_f64(1e300).to_i64(), i64::MAX);
    assert_eq!(Real::from_f64(-1e300).to_i64(), i64::MIN);
    assert_eq!(Real::from_f64(-1e300).to_u64(), 0);
    assert_eq!(Real::huge(false).to_u64(), u64::MAX);
}

#[test]
fn test_f64_exact_round_trip() {
    use crate::utils::Rng;
    let mut rng = Rng::new();

    // Every finite double fits in the 64-bit mantissa, so the round trip
    // must reproduce the value exactly.
    for _ in 0..50000 {
        let v = f64::from_bits(rng.next_u64());
        if !v.is_finite() {
            continue;
        }
        let r = Real::from_f64(v);
        // -0.0 collapses to canonical zero; compare by value.
        assert_eq!(r.to_f64(), v);
    }
}

#[cfg(feature = "std")]
#[test]
fn test_f64_special_values() {
    use crate::utils;

    for v in utils::get_special_test_values() {
        assert_eq!(Real::from_f64(v).to_f64(), v);
    }

    // Non-finite inputs follow the saturation policy.
    assert_eq!(Real::from_f64(f64::NAN), Real::zero());
    assert_eq!(Real::from_f64(f64::INFINITY), Real::huge(false));
    assert_eq!(Real::from_f64(f64::NEG_INFINITY), Real::huge(true));
    assert!(Real::huge(false).to_f64().is_infinite());
}

#[test]
fn test_f64_denormals() {
    let tiny = f64::from_bits(1); // smallest positive denormal
    assert_eq!(Real::from_f64(tiny).to_f64(), tiny);
    assert_eq!(Real::from_f64(-tiny).to_f64(), -tiny);
    assert_eq!(Real::from_f64(f64::MIN_POSITIVE).to_f64(), f64::MIN_POSITIVE);

    // A value between two denormals rounds to the nearest one on the way
    // out, but is held exactly inside the type.
    let r = Real::div(Real::from_f64(tiny), Real::from_f64(4.0));
    assert!(!r.is_zero());
    assert_eq!(r.to_f64(), 0.0);
}

#[test]
fn test_from_traits() {
    let a: Real = 4u64.into();
    let b: Real = (-4i64).into();
    let c: Real = 0.5f64.into();
    assert_eq!(f64::from(a), 4.0);
    assert_eq!(f64::from(b), -4.0);
    assert_eq!(f64::from(c), 0.5);
}
