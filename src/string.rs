//! printf-style rendering and parsing of numbers.
//!
//! Rendering goes through the base-10 form of [`crate::Decimal`]: the 19
//! significant digits are extracted once and then rounded, in decimal, to the
//! requested precision. Parsing is the reverse trip and reports how much of
//! the input it consumed.

use crate::radix::Decimal;
use crate::real::Real;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// The rendering style, mirroring the printf conversion letters: `Signed`
/// and `Unsigned` are the integer conversions (`%d`, `%u`, `%x`, `%o`), and
/// `E`, `F`, `G` are `%e`, `%f` and `%g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Signed,
    Unsigned,
    E,
    F,
    G,
}

/// A printf-style conversion description: flags, width, precision, base and
/// style. The flags carry the usual printf meanings: `-`, `+`, `0`, space,
/// and `#` (split here into the integer radix prefix and the float forced
/// decimal point).
#[derive(Debug, Clone, Copy)]
pub struct ConversionSpec {
    pub left_align: bool,
    pub force_sign: bool,
    pub zero_pad: bool,
    pub blank_sign: bool,
    pub radix_prefix: bool,
    pub force_point: bool,
    pub upper_case: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub base: u32,
    pub style: Style,
}

impl Default for ConversionSpec {
    fn default() -> Self {
        ConversionSpec::new(Style::G)
    }
}

impl ConversionSpec {
    pub fn new(style: Style) -> Self {
        ConversionSpec {
            left_align: false,
            force_sign: false,
            zero_pad: false,
            blank_sign: false,
            radix_prefix: false,
            force_point: false,
            upper_case: false,
            width: 0,
            precision: None,
            base: 10,
            style,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Set the base for the integer styles, between 2 and 36.
    pub fn base(mut self, base: u32) -> Self {
        debug_assert!((2..=36).contains(&base));
        self.base = base;
        self
    }

    pub fn left_align(mut self) -> Self {
        self.left_align = true;
        self
    }

    pub fn force_sign(mut self) -> Self {
        self.force_sign = true;
        self
    }

    pub fn zero_pad(mut self) -> Self {
        self.zero_pad = true;
        self
    }

    pub fn blank_sign(mut self) -> Self {
        self.blank_sign = true;
        self
    }

    pub fn radix_prefix(mut self) -> Self {
        self.radix_prefix = true;
        self
    }

    pub fn force_point(mut self) -> Self {
        self.force_point = true;
        self
    }

    pub fn upper_case(mut self) -> Self {
        self.upper_case = true;
        self
    }
}

impl Real {
    /// Render the value according to `spec`, following the printf rules for
    /// the matching conversion.
    pub fn render(&self, spec: &ConversionSpec) -> String {
        match spec.style {
            Style::Signed => self.render_int(spec, true),
            Style::Unsigned => self.render_int(spec, false),
            Style::E | Style::F | Style::G => self.render_float(spec),
        }
    }

    fn render_int(&self, spec: &ConversionSpec, signed: bool) -> String {
        let (mag, neg) = if signed {
            let v = self.to_i64();
            (v.unsigned_abs(), v < 0)
        } else {
            (self.to_u64(), false)
        };

        // Digits, most significant first. A zero with an explicit zero
        // precision renders as the empty string, like printf.
        let mut digits = Vec::new();
        if !(mag == 0 && spec.precision == Some(0)) {
            let mut m = mag;
            loop {
                digits.push(digit_char(
                    (m % spec.base as u64) as usize,
                    spec.upper_case,
                ));
                m /= spec.base as u64;
                if m == 0 {
                    break;
                }
            }
            digits.reverse();
        }

        let mut body = String::new();
        if let Some(p) = spec.precision {
            for _ in digits.len()..p {
                body.push('0');
            }
        }
        for d in &digits {
            body.push(*d);
        }

        let prefix = if spec.radix_prefix && mag != 0 {
            match spec.base {
                16 => {
                    if spec.upper_case {
                        "0X"
                    } else {
                        "0x"
                    }
                }
                8 => {
                    if body.starts_with('0') {
                        ""
                    } else {
                        "0"
                    }
                }
                _ => "",
            }
        } else {
            ""
        };
        let sign = sign_str(neg, signed && spec.force_sign, signed && spec.blank_sign);

        // printf ignores the zero flag when an integer precision is given.
        pad_number(spec, sign, prefix, &body, spec.precision.is_none())
    }

    fn render_float(&self, spec: &ConversionSpec) -> String {
        let prec = spec.precision.unwrap_or(6);
        let dec = self.to_decimal();

        // The full significant digits and the decimal place of the first
        // one: digit k of the buffer sits at place e - k.
        let (mut digits, mut e) = if dec.is_zero() {
            (alloc::vec![b'0'], 0i64)
        } else {
            let mut v = Vec::with_capacity(19);
            let mut m = dec.mantissa();
            while m != 0 {
                v.push(b'0' + (m % 10) as u8);
                m /= 10;
            }
            v.reverse();
            (v, dec.exponent() as i64 + 18)
        };

        let body = match spec.style {
            Style::E => {
                round_digits(&mut digits, &mut e, prec as i64 + 1);
                build_e(&digits, e, prec, spec.force_point, spec.upper_case)
            }
            Style::F => {
                let keep = e + 1 + prec as i64;
                round_digits(&mut digits, &mut e, keep);
                build_f(&digits, e, prec, spec.force_point)
            }
            _ => {
                // %g: round to the significant precision, then pick the
                // shorter of the two notations and drop trailing zeros.
                let p = prec.max(1);
                round_digits(&mut digits, &mut e, p as i64);
                let use_e = e < -4 || e >= p as i64;
                if spec.force_point {
                    if use_e {
                        build_e(&digits, e, p - 1, true, spec.upper_case)
                    } else {
                        build_f(&digits, e, (p as i64 - 1 - e) as usize, true)
                    }
                } else {
                    while digits.len() > 1 && digits.last() == Some(&b'0') {
                        digits.pop();
                    }
                    if use_e {
                        build_e(
                            &digits,
                            e,
                            digits.len() - 1,
                            false,
                            spec.upper_case,
                        )
                    } else {
                        let fprec = (digits.len() as i64 - 1 - e).max(0);
                        build_f(&digits, e, fprec as usize, false)
                    }
                }
            }
        };

        let sign =
            sign_str(self.is_negative(), spec.force_sign, spec.blank_sign);
        pad_number(spec, sign, "", &body, true)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ConversionSpec::default()))
    }
}

fn digit_char(d: usize, upper: bool) -> char {
    let c = b"0123456789abcdefghijklmnopqrstuvwxyz"[d] as char;
    if upper {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

fn sign_str(neg: bool, force: bool, blank: bool) -> &'static str {
    if neg {
        "-"
    } else if force {
        "+"
    } else if blank {
        " "
    } else {
        ""
    }
}

/// Round the digit buffer to `n` significant digits, nearest, ties to even.
/// A carry out of the top digit bumps the decimal place `e`.
fn round_digits(digits: &mut Vec<u8>, e: &mut i64, n: i64) {
    if n >= digits.len() as i64 {
        return;
    }
    if n <= 0 {
        // Nothing is kept. The value rounds to zero, or up to a single unit
        // one place above the first digit. The tie rounds down, since the
        // kept digit above is an (even) zero.
        let up = n == 0
            && (digits[0] > b'5'
                || (digits[0] == b'5'
                    && digits[1..].iter().any(|&d| d != b'0')));
        digits.clear();
        if up {
            digits.push(b'1');
            *e += 1;
        } else {
            digits.push(b'0');
            *e = 0;
        }
        return;
    }

    let n = n as usize;
    let first = digits[n];
    let tie = first == b'5' && digits[n + 1..].iter().all(|&d| d == b'0');
    let up = first > b'5'
        || (first == b'5' && !tie)
        || (tie && (digits[n - 1] - b'0') % 2 == 1);
    digits.truncate(n);
    if up {
        let mut i = n;
        loop {
            if i == 0 {
                // Carried all the way out: 999.. became 1000..
                digits.insert(0, b'1');
                digits.pop();
                *e += 1;
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }
}

fn build_f(digits: &[u8], e: i64, prec: usize, force_point: bool) -> String {
    let mut s = String::new();
    if e < 0 {
        s.push('0');
    } else {
        for i in 0..=e {
            let c = digits.get(i as usize).copied().unwrap_or(b'0');
            s.push(c as char);
        }
    }
    if prec > 0 || force_point {
        s.push('.');
    }
    for j in 1..=prec as i64 {
        let idx = e + j;
        let c = if idx >= 0 {
            digits.get(idx as usize).copied().unwrap_or(b'0')
        } else {
            b'0'
        };
        s.push(c as char);
    }
    s
}

fn build_e(
    digits: &[u8],
    e: i64,
    prec: usize,
    force_point: bool,
    upper: bool,
) -> String {
    let mut s = String::new();
    s.push(digits[0] as char);
    if prec > 0 || force_point {
        s.push('.');
    }
    for j in 1..=prec {
        s.push(digits.get(j).copied().unwrap_or(b'0') as char);
    }
    s.push(if upper { 'E' } else { 'e' });
    s.push(if e < 0 { '-' } else { '+' });

    // The exponent field is at least two digits wide.
    let mut mag = e.unsigned_abs();
    let mut ed = [0u8; 20];
    let mut n = 0;
    loop {
        ed[n] = b'0' + (mag % 10) as u8;
        n += 1;
        mag /= 10;
        if mag == 0 {
            break;
        }
    }
    while n < 2 {
        ed[n] = b'0';
        n += 1;
    }
    for i in (0..n).rev() {
        s.push(ed[i] as char);
    }
    s
}

fn pad_number(
    spec: &ConversionSpec,
    sign: &str,
    prefix: &str,
    body: &str,
    allow_zero_pad: bool,
) -> String {
    let len = sign.len() + prefix.len() + body.len();
    let mut out = String::with_capacity(spec.width.max(len));
    if len >= spec.width {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
        return out;
    }
    let fill = spec.width - len;
    if spec.left_align {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
        for _ in 0..fill {
            out.push(' ');
        }
    } else if spec.zero_pad && allow_zero_pad {
        out.push_str(sign);
        out.push_str(prefix);
        for _ in 0..fill {
            out.push('0');
        }
        out.push_str(body);
    } else {
        for _ in 0..fill {
            out.push(' ');
        }
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
    }
    out
}

impl Decimal {
    /// Parse a number from the start of `text` and return it together with
    /// the unconsumed rest of the input. Leading spaces and tabs are
    /// skipped. When no digits are found the result is zero and the rest is
    /// the whole input, so `rest.len() == text.len()` signals "no progress".
    ///
    /// The accepted form is `[+-]digits[.digits][(e|E)[+-]digits]`; an `e`
    /// is consumed only when an exponent digit actually follows it. Digits
    /// past the 64-bit mantissa capacity are dropped, with integer digits
    /// still counted into the exponent.
    pub fn parse(text: &str) -> (Decimal, &str) {
        let b = text.as_bytes();
        let mut i = 0;
        while i < b.len() && (b[i] == b' ' || b[i] == b'\t') {
            i += 1;
        }

        let mut sign = false;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            sign = b[i] == b'-';
            i += 1;
        }

        let mut mant: u64 = 0;
        let mut any = false;
        let mut extra_exp: i64 = 0;
        while i < b.len() && b[i].is_ascii_digit() {
            any = true;
            let d = (b[i] - b'0') as u64;
            if mant <= (u64::MAX - d) / 10 {
                mant = mant * 10 + d;
            } else {
                // The mantissa is full; this digit only shifts the scale.
                extra_exp += 1;
            }
            i += 1;
        }

        let mut frac_digits: i64 = 0;
        if i < b.len() && b[i] == b'.' {
            i += 1;
            while i < b.len() && b[i].is_ascii_digit() {
                any = true;
                let d = (b[i] - b'0') as u64;
                if extra_exp == 0 && mant <= (u64::MAX - d) / 10 {
                    mant = mant * 10 + d;
                    frac_digits += 1;
                }
                i += 1;
            }
        }

        if !any {
            return (Decimal::zero(), text);
        }

        let mut exp_part: i64 = 0;
        if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
            let mut j = i + 1;
            let mut esign = false;
            if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
                esign = b[j] == b'-';
                j += 1;
            }
            if j < b.len() && b[j].is_ascii_digit() {
                let mut v: i64 = 0;
                while j < b.len() && b[j].is_ascii_digit() {
                    v = (v * 10 + (b[j] - b'0') as i64).min(1 << 40);
                    j += 1;
                }
                exp_part = if esign { -v } else { v };
                i = j;
            }
        }

        let exp = (extra_exp - frac_digits + exp_part)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        (Decimal::new(sign, mant, exp), &text[i..])
    }
}

/// The reason a string failed to parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or all whitespace.
    Empty,
    /// The input did not start with a number.
    NoDigits,
    /// There were characters left over after the number.
    Trailing,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::Empty => "empty string",
            ParseError::NoDigits => "no digits found",
            ParseError::Trailing => "trailing characters after the number",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

impl FromStr for Real {
    type Err = ParseError;

    /// Parse a number, requiring the whole string to be consumed.
    fn from_str(s: &str) -> Result<Self, ParseError> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseError::Empty);
        }
        let (d, rest) = Decimal::parse(t);
        if rest.len() == t.len() {
            return Err(ParseError::NoDigits);
        }
        if !rest.is_empty() {
            return Err(ParseError::Trailing);
        }
        Ok(d.to_binary())
    }
}

#[cfg(test)]
fn fmt_helper(v: f64, spec: &ConversionSpec) -> String {
    Real::from_f64(v).render(spec)
}

#[test]
fn test_display_default() {
    use alloc::format;

    // The default rendering follows %g with a precision of six.
    assert_eq!(format!("{}", Real::from_f64(0.0)), "0");
    assert_eq!(format!("{}", Real::from_f64(100.0)), "100");
    assert_eq!(format!("{}", Real::from_f64(-1.5)), "-1.5");
    assert_eq!(format!("{}", Real::from_f64(0.1)), "0.1");
    assert_eq!(format!("{}", Real::from_f64(0.0001)), "0.0001");
    assert_eq!(format!("{}", Real::from_f64(0.00001)), "1e-05");
    assert_eq!(format!("{}", Real::from_f64(1234567.0)), "1.23457e+06");
    assert_eq!(format!("{}", Real::from_f64(0.3)), "0.3");
}

#[test]
fn test_style_f() {
    let spec = ConversionSpec::new(Style::F).precision(2);
    assert_eq!(fmt_helper(3.25, &spec), "3.25");
    assert_eq!(fmt_helper(-3.25, &spec), "-3.25");
    assert_eq!(fmt_helper(0.0, &spec), "0.00");
    assert_eq!(fmt_helper(12345.0, &spec), "12345.00");

    // Ties round to even on the decimal digits: 3.25 is exact in binary.
    let spec = ConversionSpec::new(Style::F).precision(1);
    assert_eq!(fmt_helper(3.25, &spec), "3.2");
    assert_eq!(fmt_helper(3.75, &spec), "3.8");
    assert_eq!(fmt_helper(0.06, &spec), "0.1");

    let spec = ConversionSpec::new(Style::F).precision(0);
    assert_eq!(fmt_helper(0.5, &spec), "0");
    assert_eq!(fmt_helper(1.5, &spec), "2");
    assert_eq!(fmt_helper(2.5, &spec), "2");
    assert_eq!(fmt_helper(0.6, &spec), "1");
    assert_eq!(fmt_helper(99.99, &spec), "100");

    // Carry across the whole digit string.
    let spec = ConversionSpec::new(Style::F).precision(1);
    assert_eq!(fmt_helper(9.99, &spec), "10.0");
}

#[test]
fn test_style_e() {
    let spec = ConversionSpec::new(Style::E).precision(2);
    assert_eq!(fmt_helper(12345.0, &spec), "1.23e+04");
    assert_eq!(fmt_helper(-12345.0, &spec), "-1.23e+04");
    assert_eq!(fmt_helper(0.00375, &spec), "3.75e-03");
    assert_eq!(fmt_helper(0.0, &spec), "0.00e+00");
    assert_eq!(fmt_helper(1e300, &spec), "1.00e+300");

    let spec = ConversionSpec::new(Style::E).precision(0);
    assert_eq!(fmt_helper(12345.0, &spec), "1e+04");
    let spec = ConversionSpec::new(Style::E).precision(0).force_point();
    assert_eq!(fmt_helper(12345.0, &spec), "1.e+04");

    let spec = ConversionSpec::new(Style::E).precision(3).upper_case();
    assert_eq!(fmt_helper(12345.0, &spec), "1.234E+04");
}

#[test]
fn test_style_g() {
    let spec = ConversionSpec::new(Style::G);
    assert_eq!(fmt_helper(100.0, &spec), "100");
    assert_eq!(fmt_helper(0.0001, &spec), "0.0001");
    assert_eq!(fmt_helper(0.00001, &spec), "1e-05");
    assert_eq!(fmt_helper(1234567.0, &spec), "1.23457e+06");
    assert_eq!(fmt_helper(123456.0, &spec), "123456");

    // Precision zero acts like one.
    let spec = ConversionSpec::new(Style::G).precision(0);
    assert_eq!(fmt_helper(1234.0, &spec), "1e+03");
    let spec = ConversionSpec::new(Style::G).precision(2);
    assert_eq!(fmt_helper(1234.0, &spec), "1.2e+03");
    assert_eq!(fmt_helper(12.0, &spec), "12");

    // The alternate form keeps trailing zeros.
    let spec = ConversionSpec::new(Style::G).precision(3).force_point();
    assert_eq!(fmt_helper(100.0, &spec), "100.");
    assert_eq!(fmt_helper(1.5, &spec), "1.50");
}

#[test]
fn test_float_padding() {
    let spec = ConversionSpec::new(Style::F).precision(1).width(8);
    assert_eq!(fmt_helper(-3.25, &spec), "    -3.2");
    let spec = ConversionSpec::new(Style::F).precision(1).width(8).zero_pad();
    assert_eq!(fmt_helper(-3.25, &spec), "-00003.2");
    let spec =
        ConversionSpec::new(Style::F).precision(1).width(8).left_align();
    assert_eq!(fmt_helper(-3.25, &spec), "-3.2    ");
    let spec = ConversionSpec::new(Style::F).precision(1).force_sign();
    assert_eq!(fmt_helper(3.25, &spec), "+3.2");
    let spec = ConversionSpec::new(Style::F).precision(1).blank_sign();
    assert_eq!(fmt_helper(3.25, &spec), " 3.2");
}

#[test]
fn test_int_rendering() {
    let spec = ConversionSpec::new(Style::Signed);
    assert_eq!(fmt_helper(42.0, &spec), "42");
    assert_eq!(fmt_helper(-42.0, &spec), "-42");
    assert_eq!(fmt_helper(42.99, &spec), "42");
    assert_eq!(fmt_helper(0.0, &spec), "0");

    let spec = ConversionSpec::new(Style::Signed).width(6);
    assert_eq!(fmt_helper(-42.0, &spec), "   -42");
    let spec = ConversionSpec::new(Style::Signed).width(6).zero_pad();
    assert_eq!(fmt_helper(-42.0, &spec), "-00042");
    let spec = ConversionSpec::new(Style::Signed).width(6).left_align();
    assert_eq!(fmt_helper(-42.0, &spec), "-42   ");
    let spec = ConversionSpec::new(Style::Signed).precision(4);
    assert_eq!(fmt_helper(42.0, &spec), "0042");

    // Zero with explicit zero precision prints nothing.
    let spec = ConversionSpec::new(Style::Signed).precision(0);
    assert_eq!(fmt_helper(0.0, &spec), "");

    // Negative values clamp to zero in the unsigned style.
    let spec = ConversionSpec::new(Style::Unsigned);
    assert_eq!(fmt_helper(-42.0, &spec), "0");
}

#[test]
fn test_int_bases() {
    let spec = ConversionSpec::new(Style::Unsigned).base(16);
    assert_eq!(fmt_helper(255.0, &spec), "ff");
    let spec = ConversionSpec::new(Style::Unsigned).base(16).radix_prefix();
    assert_eq!(fmt_helper(255.0, &spec), "0xff");
    assert_eq!(fmt_helper(0.0, &spec), "0");
    let spec = ConversionSpec::new(Style::Unsigned)
        .base(16)
        .radix_prefix()
        .upper_case();
    assert_eq!(fmt_helper(255.0, &spec), "0XFF");

    let spec = ConversionSpec::new(Style::Unsigned).base(8).radix_prefix();
    assert_eq!(fmt_helper(8.0, &spec), "010");
    let spec = ConversionSpec::new(Style::Unsigned).base(2);
    assert_eq!(fmt_helper(5.0, &spec), "101");
    let spec = ConversionSpec::new(Style::Unsigned).base(36);
    assert_eq!(fmt_helper(35.0, &spec), "z");
    assert_eq!(fmt_helper(36.0, &spec), "10");

    let spec = ConversionSpec::new(Style::Unsigned)
        .base(16)
        .width(10)
        .zero_pad()
        .radix_prefix();
    assert_eq!(fmt_helper(255.0, &spec), "0x000000ff");
}

#[test]
fn test_parse_basic() {
    fn parse_helper(s: &str) -> f64 {
        let (d, rest) = Decimal::parse(s);
        assert!(rest.is_empty(), "leftover {:?}", rest);
        d.to_binary().to_f64()
    }

    assert_eq!(parse_helper("0"), 0.0);
    assert_eq!(parse_helper("42"), 42.0);
    assert_eq!(parse_helper("-42"), -42.0);
    assert_eq!(parse_helper("+42"), 42.0);
    assert_eq!(parse_helper("3.25"), 3.25);
    assert_eq!(parse_helper("  3.25"), 3.25);
    assert_eq!(parse_helper(".5"), 0.5);
    assert_eq!(parse_helper("-.5"), -0.5);
    assert_eq!(parse_helper("1e3"), 1000.0);
    assert_eq!(parse_helper("1.5e-3"), 0.0015);
    assert_eq!(parse_helper("1.5E+3"), 1500.0);
    assert_eq!(parse_helper("2."), 2.0);
    assert_eq!(parse_helper("1e300"), 1e300);
    assert_eq!(parse_helper("1e-300"), 1e-300);
}

#[test]
fn test_parse_rest() {
    // The rest pointer lands on the first unconsumed character.
    let (d, rest) = Decimal::parse("3.25,next");
    assert_eq!(d.to_binary().to_f64(), 3.25);
    assert_eq!(rest, ",next");

    // An 'e' without exponent digits is not part of the number.
    let (d, rest) = Decimal::parse("1e");
    assert_eq!(d.to_binary().to_f64(), 1.0);
    assert_eq!(rest, "e");
    let (d, rest) = Decimal::parse("1e+x");
    assert_eq!(d.to_binary().to_f64(), 1.0);
    assert_eq!(rest, "e+x");

    // No digits means no progress: the rest is the entire input.
    let (d, rest) = Decimal::parse("hello");
    assert!(d.is_zero());
    assert_eq!(rest, "hello");
    let (d, rest) = Decimal::parse("-x");
    assert!(d.is_zero());
    assert_eq!(rest, "-x");
    let (_, rest) = Decimal::parse("");
    assert_eq!(rest, "");
}

#[test]
fn test_parse_long_mantissa() {
    // Digits past the 64-bit capacity are dropped but keep their weight.
    let (d, rest) = Decimal::parse("123456789012345678901234567890");
    assert!(rest.is_empty());
    assert_eq!(d.mantissa(), 12345678901234567890);
    assert_eq!(d.exponent(), 10);

    let (d, rest) = Decimal::parse("0.123456789012345678901234567890");
    assert!(rest.is_empty());
    assert_eq!(d.exponent(), -20);
}

#[test]
fn test_from_str() {
    let v: Real = "3.25".parse().unwrap();
    assert_eq!(v.to_f64(), 3.25);
    let v: Real = " -42 ".parse().unwrap();
    assert_eq!(v.to_f64(), -42.0);

    assert_eq!("".parse::<Real>(), Err(ParseError::Empty));
    assert_eq!("   ".parse::<Real>(), Err(ParseError::Empty));
    assert_eq!("abc".parse::<Real>(), Err(ParseError::NoDigits));
    assert_eq!("3.25x".parse::<Real>(), Err(ParseError::Trailing));
}

#[test]
fn test_end_to_end() {
    // Zero renders as "0" under the plain integer spec.
    let spec = ConversionSpec::new(Style::Signed);
    assert_eq!(Real::from_i32(0).render(&spec), "0");

    // Parsing with a decimal exponent lands on the same value as the
    // equivalent integer.
    let (d, rest) = Decimal::parse("123.45e2");
    assert!(rest.is_empty());
    assert_eq!(d.to_binary(), Real::from_f64(12345.0));

    let sum = Real::from_i64(1) + Real::from_i64(2);
    assert_eq!(sum.to_i64(), 3);

    let third = Real::from_i64(1) / Real::from_i64(3);
    let spec = ConversionSpec::new(Style::F).precision(5);
    assert_eq!(third.render(&spec), "0.33333");

    let spec = ConversionSpec::new(Style::Signed);
    assert_eq!(Real::from_i32(-5).render(&spec), "-5");
    let spec = ConversionSpec::new(Style::Signed).blank_sign();
    assert_eq!(Real::from_i32(5).render(&spec), " 5");
}

#[test]
fn test_int_text_round_trip() {
    use crate::utils::Rng;
    let mut rng = Rng::new();
    let spec = ConversionSpec::new(Style::Signed);

    for _ in 0..2000 {
        let n = rng.next_u64() as i64;
        let s = Real::from_i64(n).render(&spec);
        let back: Real = s.parse().unwrap();
        assert_eq!(back.to_i64(), n, "rendered {}", s);
    }
}

#[test]
fn test_render_parse_round_trip() {
    use crate::utils::Rng;
    let mut rng = Rng::new();
    let spec = ConversionSpec::new(Style::E).precision(18);

    // Rendering all 19 significant digits and parsing them back must
    // reproduce any value that started as a double.
    for _ in 0..2000 {
        let v = f64::from_bits(rng.next_u64());
        if !v.is_finite() {
            continue;
        }
        let r = Real::from_f64(v);
        let s = r.render(&spec);
        let back: Real = s.parse().unwrap();
        assert_eq!(back, r, "value {} rendered {}", v, s);
    }
}
