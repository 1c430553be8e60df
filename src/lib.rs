//! Extended-precision real arithmetic with printf-style formatting.
//!
//! The central type is [`Real`]: a software floating point value with a
//! 64-bit mantissa, a 31-bit base-2 exponent and a sign. That is eleven more
//! mantissa bits and a far wider exponent range than an IEEE double, so every
//! finite `f64` converts in exactly, and intermediate results that would
//! overflow a double do not.
//!
//! There are no NaNs and no infinities: out-of-range results saturate to the
//! largest representable magnitude or flush to zero, so every value compares
//! and orders like an ordinary number. All inexact operations round to
//! nearest, ties to even.
//!
//! Values move in and out of a base-10 companion form, [`Decimal`], which
//! backs parsing and the printf-style rendering of [`ConversionSpec`]:
//!
//! ```
//! use extreal::{ConversionSpec, Real, Style};
//!
//! let a: Real = "3.25".parse().unwrap();
//! let b = Real::from_u64(2);
//! let c = a * b;
//! assert_eq!(c.to_f64(), 6.5);
//!
//! let spec = ConversionSpec::new(Style::F).precision(1);
//! assert_eq!(c.render(&spec), "6.5");
//! ```
//!
//! The crate is `no_std` (with `alloc`) when the default `std` feature is
//! disabled.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod arithmetic;
mod cast;
mod radix;
mod real;
mod string;
pub mod utils;
mod wide;

pub use radix::Decimal;
pub use real::{Real, EXP_MAX, EXP_MIN};
pub use string::{ConversionSpec, ParseError, Style};
