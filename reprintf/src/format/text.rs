use std::fmt::Write;

use super::Spec;

pub(super) fn string(out: &mut String, spec: &Spec, s: &str) {
    spec.pad(out, truncate(spec, s));
}

/// `%q`: a double-quoted, escaped string. `#` prefers a raw backquoted
/// string when it needs no escapes, and `+` escapes everything non-ASCII.
pub(super) fn quoted(out: &mut String, spec: &Spec, s: &str) {
    let s = truncate(spec, s);
    let body = if spec.sharp && can_backquote(s) {
        format!("`{s}`")
    } else {
        quote(s, '"', spec.plus)
    };
    spec.pad(out, &body);
}

/// `%x` / `%X` on a string: hex-encode its bytes.
pub(super) fn hex(out: &mut String, spec: &Spec, s: &str, verb: char) {
    let bytes = &s.as_bytes()[..spec.precision.map_or(s.len(), |p| p.min(s.len()))];
    let prefix = if verb == 'X' { "0X" } else { "0x" };

    let mut body = String::with_capacity(bytes.len() * 5);
    if spec.sharp && !bytes.is_empty() {
        body.push_str(prefix);
    }
    for (i, byte) in bytes.iter().enumerate() {
        if spec.space && i > 0 {
            body.push(' ');
            if spec.sharp {
                body.push_str(prefix);
            }
        }
        let _ = if verb == 'X' {
            write!(body, "{byte:02X}")
        } else {
            write!(body, "{byte:02x}")
        };
    }
    spec.pad(out, &body);
}

/// `%c`
pub(super) fn character(out: &mut String, spec: &Spec, n: i64) {
    spec.pad(out, to_char(n).encode_utf8(&mut [0; 4]));
}

/// `%q` on an integer: a single-quoted character literal.
pub(super) fn quoted_character(out: &mut String, spec: &Spec, n: i64) {
    let c = to_char(n);
    spec.pad(out, &quote(c.encode_utf8(&mut [0; 4]), '\'', spec.plus));
}

fn to_char(n: i64) -> char {
    u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn truncate<'s>(spec: &Spec, s: &'s str) -> &'s str {
    match spec.precision.and_then(|p| s.char_indices().nth(p)) {
        Some((cut, _)) => &s[..cut],
        None => s,
    }
}

pub(super) fn is_printable(c: char) -> bool {
    c == ' ' || !(c.is_control() || c.is_whitespace() || c == '\u{feff}')
}

fn quote(s: &str, delimiter: char, ascii_only: bool) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(delimiter);
    for c in s.chars() {
        if c == delimiter || c == '\\' {
            quoted.push('\\');
            quoted.push(c);
            continue;
        }
        if is_printable(c) && (c.is_ascii() || !ascii_only) {
            quoted.push(c);
            continue;
        }
        let _ = match c {
            '\u{7}' => write!(quoted, "\\a"),
            '\u{8}' => write!(quoted, "\\b"),
            '\u{c}' => write!(quoted, "\\f"),
            '\n' => write!(quoted, "\\n"),
            '\r' => write!(quoted, "\\r"),
            '\t' => write!(quoted, "\\t"),
            '\u{b}' => write!(quoted, "\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => write!(quoted, "\\x{:02x}", c as u32),
            c if (c as u32) < 0x10000 => write!(quoted, "\\u{:04x}", c as u32),
            c => write!(quoted, "\\U{:08x}", c as u32),
        };
    }
    quoted.push(delimiter);
    quoted
}

fn can_backquote(s: &str) -> bool {
    s.chars().all(|c| {
        if c.len_utf8() > 1 {
            c != '\u{feff}'
        } else {
            !((c < ' ' && c != '\t') || c == '`' || c == '\u{7f}')
        }
    })
}
