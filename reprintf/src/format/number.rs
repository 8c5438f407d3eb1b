use std::fmt::Write;

use super::{Spec, push_fill};

/// Default digits after the point for `%e` and `%f`.
const DEFAULT_PRECISION: usize = 6;

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

pub(super) fn integer(out: &mut String, spec: &Spec, n: i64, base: u32, verb: char) {
    let negative = n < 0;
    let magnitude = n.unsigned_abs();

    // Two ways to ask for leading zeros: `%.3d` and `%03d`. With both, the
    // precision wins and the width pads with spaces.
    let min_digits = match (spec.precision, spec.width) {
        (Some(0), _) if magnitude == 0 => {
            spec.without_zero().pad(out, "");
            return;
        }
        (Some(precision), _) => precision,
        (None, Some(width)) if spec.zero && !spec.minus => {
            if negative || spec.plus || spec.space {
                width.saturating_sub(1)
            } else {
                width
            }
        }
        _ => 0,
    };

    let mut digits = match base {
        2 => format!("{magnitude:b}"),
        8 => format!("{magnitude:o}"),
        16 if verb == 'X' => format!("{magnitude:X}"),
        16 => format!("{magnitude:x}"),
        _ => magnitude.to_string(),
    };
    if digits.len() < min_digits {
        digits.insert_str(0, &"0".repeat(min_digits - digits.len()));
    }

    let mut body = String::with_capacity(digits.len() + 3);
    if negative {
        body.push('-');
    } else if spec.plus {
        body.push('+');
    } else if spec.space {
        body.push(' ');
    }
    // `%#O` is `0o` followed by the octal `0`: `0o010`.
    if verb == 'O' {
        body.push_str("0o");
    }
    if spec.sharp {
        match base {
            2 => body.push_str("0b"),
            8 if !digits.starts_with('0') => body.push('0'),
            16 if verb == 'X' => body.push_str("0X"),
            16 => body.push_str("0x"),
            _ => {}
        }
    }
    body.push_str(&digits);

    // Zero padding has already been applied as leading digits.
    spec.without_zero().pad(out, &body);
}

/// `%U`: `U+0041`, or `U+0041 'A'` with `#`.
pub(super) fn unicode_point(out: &mut String, spec: &Spec, n: i64) {
    let code = n as u64;
    let min_digits = spec.precision.unwrap_or(4).max(4);
    let mut body = format!("U+{code:0min_digits$X}");
    if spec.sharp {
        let printable = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .filter(|c| super::text::is_printable(*c));
        if let Some(c) = printable {
            body.push_str(" '");
            body.push(c);
            body.push('\'');
        }
    }
    spec.without_zero().pad(out, &body);
}

// ---------------------------------------------------------------------------
// Floats
// ---------------------------------------------------------------------------

pub(super) fn float(out: &mut String, spec: &Spec, x: f64, verb: char) {
    if x.is_nan() {
        let body = if spec.plus {
            "+NaN"
        } else if spec.space {
            " NaN"
        } else {
            "NaN"
        };
        spec.without_zero().pad(out, body);
        return;
    }

    let sign = if x.is_sign_negative() {
        Some('-')
    } else if spec.plus {
        Some('+')
    } else if spec.space {
        Some(' ')
    } else {
        None
    };

    if x.is_infinite() {
        let body = match sign {
            Some(sign) => format!("{sign}Inf"),
            None => "+Inf".to_string(),
        };
        spec.without_zero().pad(out, &body);
        return;
    }

    let mut digits = float_digits(x.abs(), verb, spec.precision);
    if spec.sharp {
        digits = alternate_form(&digits, verb, spec.precision);
    }

    let Some(sign) = sign else {
        spec.pad(out, &digits);
        return;
    };

    let len = digits.chars().count() + 1;
    match spec.width {
        // The sign goes in front of the zero padding.
        Some(width) if spec.zero && width > len => {
            out.push(sign);
            push_fill(out, width - len, '0');
            out.push_str(&digits);
        }
        _ => {
            let mut body = String::with_capacity(len);
            body.push(sign);
            body.push_str(&digits);
            spec.pad(out, &body);
        }
    }
}

/// Unsigned rendering of a finite, non-negative float.
fn float_digits(x: f64, verb: char, precision: Option<usize>) -> String {
    match verb {
        'f' | 'F' => format!("{:.*}", precision.unwrap_or(DEFAULT_PRECISION), x),
        'e' | 'E' => {
            let precision = precision.unwrap_or(DEFAULT_PRECISION);
            let decimal = Decimal::parse(&format!("{:.*e}", precision, x));
            cased(decimal.exponent_form(precision), verb)
        }
        'x' | 'X' => cased(hex_float(x, precision), verb),
        'b' => binary_exponent(x),
        _ => cased(general(x, precision), verb),
    }
}

/// Significand bits and unbiased exponent of a finite `f64`, with the
/// implicit leading bit made explicit.
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    if biased == 0 {
        (fraction, 1 - 1023)
    } else {
        (fraction | (1 << 52), biased - 1023)
    }
}

/// `%b`: decimal significand and power-of-two exponent, `4503599627370496p-52`.
fn binary_exponent(x: f64) -> String {
    let (mantissa, exp) = decompose(x);
    format!("{mantissa}p{:+}", exp - 52)
}

/// `%x`: hexadecimal significand and binary exponent, `0x1.8p+01`.
/// Without a precision all significant hex digits are kept.
fn hex_float(x: f64, precision: Option<usize>) -> String {
    const LEAD: u64 = 1 << 60;

    let (mut mantissa, mut exp) = decompose(x);
    if mantissa == 0 {
        exp = 0;
    }
    // Leading 1 moves to bit 60, leaving four bits per hex digit below it.
    mantissa <<= 8;
    while mantissa != 0 && mantissa & LEAD == 0 {
        mantissa <<= 1;
        exp -= 1;
    }

    if let Some(precision) = precision.filter(|p| *p < 15) {
        let shift = precision as u32 * 4;
        let extra = (mantissa << shift) & (LEAD - 1);
        mantissa >>= 60 - shift;
        // Round half to even.
        if extra | (mantissa & 1) > LEAD >> 1 {
            mantissa += 1;
        }
        mantissa <<= 60 - shift;
        if mantissa & (LEAD << 1) != 0 {
            mantissa >>= 1;
            exp += 1;
        }
    }

    let mut s = String::from(if mantissa & LEAD != 0 { "0x1" } else { "0x0" });
    mantissa <<= 4;
    let fraction_digits = match precision {
        Some(precision) => precision,
        None if mantissa != 0 => (64 - mantissa.trailing_zeros() as usize).div_ceil(4),
        None => 0,
    };
    if fraction_digits > 0 {
        s.push('.');
        for _ in 0..fraction_digits {
            let _ = write!(s, "{:x}", mantissa >> 60);
            mantissa <<= 4;
        }
    }
    let _ = write!(s, "p{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs());
    s
}

fn cased(s: String, verb: char) -> String {
    if verb.is_ascii_uppercase() { s.to_ascii_uppercase() } else { s }
}

/// `%g`: exponent form for large or small exponents, plain otherwise, with
/// trailing zeros dropped. Without a precision the shortest digits that
/// round-trip are used.
fn general(x: f64, precision: Option<usize>) -> String {
    match precision {
        None => {
            let decimal = Decimal::parse(&format!("{x:e}"));
            let exp = decimal.point - 1;
            let count = decimal.digits.len();
            if exp < -4 || exp >= 6 {
                decimal.exponent_form(count - 1)
            } else {
                decimal.fixed_form((count as i32 - decimal.point).max(0) as usize)
            }
        }
        Some(precision) => {
            let precision = precision.max(1);
            let mut decimal = Decimal::parse(&format!("{:.*e}", precision - 1, x));
            decimal.trim_trailing_zeros();

            let count = decimal.digits.len();
            let point = decimal.point;
            let mut eprec = precision as i32;
            if eprec > count as i32 && count as i32 >= point {
                eprec = count as i32;
            }
            let exp = point - 1;
            if exp < -4 || exp >= eprec {
                decimal.exponent_form(precision.min(count) - 1)
            } else {
                let shown = if precision as i32 > point { count } else { precision };
                decimal.fixed_form((shown as i32 - point).max(0) as usize)
            }
        }
    }
}

/// `#` on floats: always print a point, and for `%g` keep trailing zeros.
fn alternate_form(num: &str, verb: char, precision: Option<usize>) -> String {
    if verb == 'b' {
        return num.to_string();
    }
    let mut wanted: i64 = match verb {
        'v' | 'g' | 'G' | 'x' => precision.map_or(DEFAULT_PRECISION as i64, |p| p as i64),
        _ => 0,
    };

    // Hex significands use `e` as a digit and `p` for the exponent.
    let marks = if matches!(verb, 'x' | 'X') { ['p', 'P'] } else { ['e', 'E'] };
    let (mantissa, tail) = match num.find(marks) {
        Some(at) => num.split_at(at),
        None => (num, ""),
    };

    let mut has_point = false;
    let mut seen_nonzero = false;
    for c in mantissa.chars() {
        if c == '.' {
            has_point = true;
            continue;
        }
        if c != '0' {
            seen_nonzero = true;
        }
        if seen_nonzero {
            wanted -= 1;
        }
    }

    let mut result = mantissa.to_string();
    if !has_point {
        if mantissa == "0" {
            wanted -= 1;
        }
        result.push('.');
    }
    while wanted > 0 {
        result.push('0');
        wanted -= 1;
    }
    result.push_str(tail);
    result
}

/// Decimal digits of a float with the position of the decimal point:
/// the value is `0.d1d2d3... * 10^point`.
#[derive(Debug)]
struct Decimal {
    digits: Vec<u8>,
    point: i32,
}

impl Decimal {
    /// Parse Rust's `{:e}` output, e.g. `1.2345e3` or `5e-7`.
    fn parse(scientific: &str) -> Self {
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
        if digits.is_empty() {
            digits.push(b'0');
        }
        Decimal {
            digits,
            point: exponent + 1,
        }
    }

    fn trim_trailing_zeros(&mut self) {
        while self.digits.len() > 1 && self.digits.last() == Some(&b'0') {
            self.digits.pop();
        }
    }

    fn digit(&self, index: i32) -> char {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.digits.get(i))
            .map_or('0', |d| char::from(*d))
    }

    /// `d.ddde±XX` with `precision` digits after the point.
    fn exponent_form(&self, precision: usize) -> String {
        let mut s = String::with_capacity(precision + 6);
        s.push(self.digit(0));
        if precision > 0 {
            s.push('.');
            for i in 1..=precision {
                s.push(self.digit(i as i32));
            }
        }
        let exp = if self.digits.iter().all(|d| *d == b'0') {
            0
        } else {
            self.point - 1
        };
        s.push('e');
        s.push(if exp < 0 { '-' } else { '+' });
        s.push_str(&format!("{:02}", exp.abs()));
        s
    }

    /// `ddd.ddd` with `precision` digits after the point.
    fn fixed_form(&self, precision: usize) -> String {
        let mut s = String::new();
        if self.point > 0 {
            for i in 0..self.point {
                s.push(self.digit(i));
            }
        } else {
            s.push('0');
        }
        if precision > 0 {
            s.push('.');
            for i in 1..=precision as i32 {
                s.push(self.digit(self.point + i - 1));
            }
        }
        s
    }
}
