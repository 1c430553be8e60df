//! This file contains simple helper functions and test helpers.

/// Returns a mask full of 1s, of `b` bits.
pub(crate) fn mask(b: u32) -> u64 {
    debug_assert!(b < 64);
    (1u64 << b) - 1
}

#[test]
fn test_masking() {
    assert_eq!(mask(0), 0x0);
    assert_eq!(mask(1), 0x1);
    assert_eq!(mask(8), 255);
    assert_eq!(mask(52), 0xf_ffff_ffff_ffff);
}

#[cfg(feature = "std")]
#[allow(dead_code)]
/// Returns a list of interesting values that various tests use to catch edge
/// cases. The list contains only finite values, since the extended real type
/// saturates instead of carrying infinities and NaNs.
pub(crate) fn get_special_test_values() -> [f64; 20] {
    [
        0.0,
        -0.0,
        1.0,
        -1.0,
        0.1,
        0.3,
        -0.00001,
        10.,
        -10.,
        256.,
        1e300,
        1e-300,
        f64::EPSILON,
        -f64::EPSILON,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        std::f64::consts::PI,
        std::f64::consts::E,
        355. / 113.,
    ]
}

/// A xorshift64* generator. We use this as a deterministic random number
/// source for tests and benchmarks.
pub struct Rng {
    state: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng {
    /// Create a generator with a fixed default seed.
    pub fn new() -> Rng {
        Rng::with_seed(0x193a_6754_a8a7_d469)
    }

    /// Create a generator that starts from `seed`.
    pub fn with_seed(seed: u64) -> Rng {
        // The all-zero state is the one fixed point of the shift sequence.
        Rng { state: seed | 1 }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }
}

impl Iterator for Rng {
    type Item = u64;
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_u64())
    }
}

#[test]
fn test_rng_balance() {
    let mut rng = Rng::new();

    // Count the number of bits, and the number of 1s.
    let mut items = 0u64;
    let mut ones = 0u64;

    for _ in 0..10000 {
        let mut u = rng.next_u64();
        for _ in 0..64 {
            items += 1;
            ones += u & 1;
            u >>= 1;
        }
    }
    // Make sure that we have around 50% ones and 50% zeros.
    assert!((ones as f64) < (0.55 * items as f64));
    assert!((ones as f64) > (0.45 * items as f64));
}

#[test]
fn test_rng_repetition() {
    let mut rng = Rng::new();
    let first = rng.next_u64();
    let second = rng.next_u64();

    // Make sure that the items don't repeat themselves too frequently.
    for _ in 0..30000 {
        assert_ne!(first, rng.next_u64());
        assert_ne!(second, rng.next_u64());
    }
}
