use regex::Regex;
use tracing::debug;

use crate::error::PatternError;
use crate::placeholder::{Placeholder, Segment, VerbClass, tokenize};

// ---------------------------------------------------------------------------
// Capture table
// ---------------------------------------------------------------------------

/// Which placeholder modifiers switch a rule over to its padded capture.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    WidthOrFlag,
    Width,
    Never,
}

struct CaptureRule {
    class: VerbClass,
    trigger: Trigger,
    padded: &'static str,
    plain: &'static str,
}

const GENERIC_CAPTURE: &str = r"(.+?)";

const CAPTURE_RULES: &[CaptureRule] = &[
    CaptureRule {
        class: VerbClass::Decimal,
        trigger: Trigger::WidthOrFlag,
        padded: r"([\t\n\f\r ]*[+-]?[0-9]+)",
        // Anything without ASCII whitespace, so `%d` still matches non-numeric
        // text such as `1\u{a0}000`.
        plain: r"([^\t\n\f\r ]+)",
    },
    CaptureRule {
        class: VerbClass::Float,
        trigger: Trigger::WidthOrFlag,
        padded: r"([\t\n\f\r ]*[+-]?[0-9]+(?:\.[0-9]+)?)",
        plain: r"(-?[0-9]+(?:\.[0-9]+)?)",
    },
    CaptureRule {
        class: VerbClass::Boolean,
        trigger: Trigger::Never,
        padded: r"(true|false)",
        plain: r"(true|false)",
    },
    CaptureRule {
        class: VerbClass::Text,
        trigger: Trigger::Width,
        padded: r"(.+?)",
        plain: r"(.*?)",
    },
    CaptureRule {
        class: VerbClass::Hex,
        trigger: Trigger::Never,
        padded: r"((?:0[xX])?[0-9a-fA-F]+)",
        plain: r"((?:0[xX])?[0-9a-fA-F]+)",
    },
    CaptureRule {
        class: VerbClass::Digits,
        trigger: Trigger::Never,
        padded: r"([0-9]+)",
        plain: r"([0-9]+)",
    },
];

/// The capture sub-pattern used to extract a placeholder's value.
pub fn capture_for(placeholder: &Placeholder) -> &'static str {
    let class = placeholder.class();
    let Some(rule) = CAPTURE_RULES.iter().find(|rule| rule.class == class) else {
        return GENERIC_CAPTURE;
    };

    let padded = match rule.trigger {
        Trigger::WidthOrFlag => placeholder.has_width || placeholder.has_flag,
        Trigger::Width => placeholder.has_width,
        Trigger::Never => false,
    };

    if padded { rule.padded } else { rule.plain }
}

// ---------------------------------------------------------------------------
// Compiled pattern
// ---------------------------------------------------------------------------

/// A template compiled into a regex anchored at both ends of the message.
///
/// Holds exactly one capture group per placeholder, in template order.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    segments: Vec<Segment>,
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let pattern = Self::from_segments(tokenize(template))?;
        debug!(
            %template,
            pattern = %pattern.source,
            captures = pattern.capture_count(),
            "compiled template pattern"
        );
        Ok(pattern)
    }

    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, PatternError> {
        let source = build_source(&segments, true);
        let regex = Regex::new(&source).map_err(|source_err| PatternError::Compile {
            pattern: source.clone(),
            source: source_err,
        })?;

        Ok(CompiledPattern {
            segments,
            source,
            regex,
        })
    }

    /// The regex source this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        })
    }

    pub fn capture_count(&self) -> usize {
        self.placeholders().count()
    }

    /// Match the whole message, returning one raw capture per placeholder.
    pub fn captures<'m>(&self, message: &'m str) -> Option<Vec<&'m str>> {
        let caps = self.regex.captures(message)?;
        Some(
            (1..=self.capture_count())
                .map(|i| caps.get(i).map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    /// Byte offset in `message` where it stops following the template.
    ///
    /// Probes successively shorter segment prefixes until one matches the
    /// start of the message, then walks into the next literal as far as the
    /// message agrees with it. Only meaningful when [`captures`](Self::captures)
    /// returned `None`.
    pub fn divergence(&self, message: &str) -> usize {
        for len in (0..=self.segments.len()).rev() {
            let source = build_source(&self.segments[..len], false);
            let Ok(prefix) = Regex::new(&source) else {
                continue;
            };
            if let Some(m) = prefix.find(message) {
                let rest = &message[m.end()..];
                return m.end() + agreeing_prefix(self.segments.get(len), rest);
            }
        }
        0
    }
}

fn build_source(segments: &[Segment], anchor_end: bool) -> String {
    let mut source = String::from("^");
    for segment in segments {
        match segment {
            Segment::Literal(text) => source.push_str(&regex::escape(text)),
            Segment::Percent => source.push('%'),
            Segment::Placeholder(placeholder) => source.push_str(capture_for(placeholder)),
        }
    }
    if anchor_end {
        source.push('$');
    }
    source
}

/// Length in bytes of the part of `rest` that agrees with `segment`.
fn agreeing_prefix(segment: Option<&Segment>, rest: &str) -> usize {
    match segment {
        Some(Segment::Literal(text)) => text
            .chars()
            .zip(rest.chars())
            .take_while(|(expected, actual)| expected == actual)
            .map(|(c, _)| c.len_utf8())
            .sum(),
        Some(Segment::Percent) if rest.starts_with('%') => 1,
        _ => 0,
    }
}
