use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// One printf directive: `%[flag][width][.precision]verb`, `%%` included.
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:[#+-])?(?:[0-9]+)?(?:\.[0-9]+)?[sdftv%xXobBeEfFgGqp]")
        .expect("directive grammar is a valid regex")
});

const LITERAL_PERCENT: &str = "%%";

/// A single value-bearing directive found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the directive within its template.
    pub span: Range<usize>,
    /// The directive text, e.g. `%05d`.
    pub directive: String,
    pub verb: char,
    pub has_flag: bool,
    pub has_width: bool,
    pub has_precision: bool,
}

impl Placeholder {
    fn parse(directive: &str, span: Range<usize>) -> Self {
        // The directive regex guarantees a leading '%' and an ASCII verb.
        let verb = directive.chars().last().unwrap_or('%');
        let modifiers = &directive[1..directive.len() - verb.len_utf8()];

        Placeholder {
            span,
            directive: directive.to_string(),
            verb,
            has_flag: modifiers.contains(['#', '+', '-']),
            // Any digit counts, so `%.2f` carries a width as well as a precision.
            has_width: modifiers.contains(|c: char| c.is_ascii_digit()),
            has_precision: modifiers.contains('.'),
        }
    }

    pub fn class(&self) -> VerbClass {
        VerbClass::of(self.verb)
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// The value family a verb selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbClass {
    /// `d`
    Decimal,
    /// `b`, `o`: captured and parsed as base-10 digit runs.
    Digits,
    /// `f`, `F`, `e`, `E`, `g`, `G`
    Float,
    /// `t`
    Boolean,
    /// `s`, `v`
    Text,
    /// `x`, `X`
    Hex,
    /// Everything else (`q`, `p`, `B`, ...).
    Generic,
}

impl VerbClass {
    pub fn of(verb: char) -> Self {
        match verb {
            'd' => VerbClass::Decimal,
            'b' | 'o' => VerbClass::Digits,
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => VerbClass::Float,
            't' => VerbClass::Boolean,
            's' | 'v' => VerbClass::Text,
            'x' | 'X' => VerbClass::Hex,
            _ => VerbClass::Generic,
        }
    }
}

/// A piece of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that must appear verbatim.
    Literal(String),
    /// A `%%` escape, standing for one literal `%`.
    Percent,
    Placeholder(Placeholder),
}

/// Split a template into literal text, `%%` escapes and placeholders, in order.
pub fn tokenize(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    for m in DIRECTIVE.find_iter(template) {
        if pos < m.start() {
            segments.push(Segment::Literal(template[pos..m.start()].to_string()));
        }
        if m.as_str() == LITERAL_PERCENT {
            segments.push(Segment::Percent);
        } else {
            segments.push(Segment::Placeholder(Placeholder::parse(m.as_str(), m.range())));
        }
        pos = m.end();
    }

    if pos < template.len() {
        segments.push(Segment::Literal(template[pos..].to_string()));
    }

    segments
}

/// Every real placeholder in `template`, left to right. `%%` is skipped.
pub fn scan(template: &str) -> Vec<Placeholder> {
    DIRECTIVE
        .find_iter(template)
        .filter(|m| m.as_str() != LITERAL_PERCENT)
        .map(|m| Placeholder::parse(m.as_str(), m.range()))
        .collect()
}

/// Number of real placeholders in `template`.
pub fn count_placeholders(template: &str) -> usize {
    DIRECTIVE
        .find_iter(template)
        .filter(|m| m.as_str() != LITERAL_PERCENT)
        .count()
}
