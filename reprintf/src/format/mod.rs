//! printf-style rendering of typed values.
//!
//! Directives follow `%[flags][width][.precision]verb` with flags from
//! `+-# 0`, and `*` for a width or precision taken from the next value.
//! Problems never fail the call; they are written inline as `%!` markers:
//!
//! - `%!d(string=abc)`: the verb does not apply to the value's type
//! - `%!d(MISSING)`: no value left for the directive
//! - `%!(NOVERB)`: the format ends inside a directive
//! - `%!(BADWIDTH)` / `%!(BADPREC)`: a `*` value is not an integer or is
//!   out of range, or a `*` precision is negative
//! - `%!(EXTRA int=1, string=x)`: values left over at the end

mod number;
mod text;

use std::fmt::Write;

use crate::value::TypedValue;

/// Widths and precisions past this are rejected.
const MAX_WIDTH: usize = 1_000_000;

/// Flags, width and precision of one directive.
#[derive(Debug, Clone, Default)]
pub(crate) struct Spec {
    pub plus: bool,
    pub minus: bool,
    pub sharp: bool,
    pub space: bool,
    pub zero: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl Spec {
    /// Write `body` padded out to the width.
    pub fn pad(&self, out: &mut String, body: &str) {
        let len = body.chars().count();
        let fill = self.width.map_or(0, |width| width.saturating_sub(len));
        if self.minus {
            out.push_str(body);
            push_fill(out, fill, ' ');
        } else {
            push_fill(out, fill, if self.zero { '0' } else { ' ' });
            out.push_str(body);
        }
    }

    /// The same directive with zero padding switched off.
    pub fn without_zero(&self) -> Spec {
        Spec {
            zero: false,
            ..self.clone()
        }
    }
}

pub(crate) fn push_fill(out: &mut String, count: usize, fill: char) {
    out.extend(std::iter::repeat_n(fill, count));
}

/// Render `format`, substituting `values` into its directives left to right.
pub fn sprintf(format: &str, values: &[TypedValue]) -> String {
    let bytes = format.as_bytes();
    let mut out = String::with_capacity(format.len());
    let mut next = 0;
    let mut i = 0;

    while i < bytes.len() {
        let literal_start = i;
        while i < bytes.len() && bytes[i] != b'%' {
            i += 1;
        }
        out.push_str(&format[literal_start..i]);
        if i >= bytes.len() {
            break;
        }
        i += 1;

        let mut spec = Spec::default();
        while let Some(&b) = bytes.get(i) {
            match b {
                b'#' => spec.sharp = true,
                b'0' => spec.zero = !spec.minus,
                b'+' => spec.plus = true,
                b'-' => {
                    spec.minus = true;
                    spec.zero = false;
                }
                b' ' => spec.space = true,
                _ => break,
            }
            i += 1;
        }

        // Width
        if bytes.get(i) == Some(&b'*') {
            i += 1;
            match int_from_value(values, &mut next) {
                Some(width) => {
                    if width < 0 {
                        spec.minus = true;
                        spec.zero = false;
                    }
                    spec.width = Some(width.unsigned_abs() as usize);
                }
                None => out.push_str("%!(BADWIDTH)"),
            }
        } else {
            let (width, end) = parse_number(bytes, i);
            i = end;
            spec.width = width;
        }

        // Precision
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            if bytes.get(i) == Some(&b'*') {
                i += 1;
                match int_from_value(values, &mut next) {
                    Some(precision) if precision >= 0 => {
                        spec.precision = Some(precision as usize)
                    }
                    _ => out.push_str("%!(BADPREC)"),
                }
            } else {
                let (precision, end) = parse_number(bytes, i);
                i = end;
                spec.precision = Some(precision.unwrap_or(0));
            }
        }

        let Some(verb) = format[i..].chars().next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        i += verb.len_utf8();

        if verb == '%' {
            out.push('%');
            continue;
        }

        match values.get(next) {
            Some(value) => {
                next += 1;
                render(&mut out, &spec, verb, value);
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }

    if next < values.len() {
        out.push_str("%!(EXTRA ");
        for (n, value) in values[next..].iter().enumerate() {
            if n > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", value.type_name(), display(value));
        }
        out.push(')');
    }

    out
}

/// Plain `%v` rendering of a single value.
pub(crate) fn display(value: &TypedValue) -> String {
    let mut out = String::new();
    render(&mut out, &Spec::default(), 'v', value);
    out
}

fn render(out: &mut String, spec: &Spec, verb: char, value: &TypedValue) {
    match (value, verb) {
        (TypedValue::Integer(n), 'v' | 'd') => number::integer(out, spec, *n, 10, verb),
        (TypedValue::Integer(n), 'b') => number::integer(out, spec, *n, 2, verb),
        (TypedValue::Integer(n), 'o' | 'O') => number::integer(out, spec, *n, 8, verb),
        (TypedValue::Integer(n), 'x' | 'X') => number::integer(out, spec, *n, 16, verb),
        (TypedValue::Integer(n), 'U') => number::unicode_point(out, spec, *n),
        (TypedValue::Integer(n), 'c') => text::character(out, spec, *n),
        (TypedValue::Integer(n), 'q') => text::quoted_character(out, spec, *n),
        (TypedValue::Float(x), 'v' | 'b' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G' | 'x' | 'X') => {
            number::float(out, spec, *x, verb)
        }
        (TypedValue::Boolean(b), 'v' | 't') => spec.pad(out, if *b { "true" } else { "false" }),
        (TypedValue::String(s), 'v') if spec.sharp => text::quoted(out, spec, s),
        (TypedValue::String(s), 'v' | 's') => text::string(out, spec, s),
        (TypedValue::String(s), 'q') => text::quoted(out, spec, s),
        (TypedValue::String(s), 'x' | 'X') => text::hex(out, spec, s, verb),
        _ => {
            let _ = write!(out, "%!{verb}({}={})", value.type_name(), display(value));
        }
    }
}

/// Parse a run of ASCII digits starting at `start`.
///
/// A run that keeps going once past `MAX_WIDTH` is abandoned together with
/// the rest of the format, which then ends in `%!(NOVERB)`.
fn parse_number(bytes: &[u8], start: usize) -> (Option<usize>, usize) {
    let mut end = start;
    let mut number: Option<usize> = None;
    while let Some(digit) = bytes.get(end).filter(|b| b.is_ascii_digit()) {
        let value = number.unwrap_or(0);
        if value > MAX_WIDTH {
            return (None, bytes.len());
        }
        number = Some(value * 10 + usize::from(digit - b'0'));
        end += 1;
    }
    (number, end)
}

/// Take the next value as a `*` width or precision.
fn int_from_value(values: &[TypedValue], next: &mut usize) -> Option<i64> {
    let value = values.get(*next)?;
    *next += 1;
    match value {
        TypedValue::Integer(n) if n.unsigned_abs() <= MAX_WIDTH as u64 => Some(*n),
        _ => None,
    }
}
