use template::{CompiledPattern, Placeholder, VerbClass};
use tracing::trace;

use crate::apply::apply_values;
use crate::error::Error;
use crate::value::TypedValue;

/// A template scanned and compiled once, reusable across many messages.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: String,
    pattern: CompiledPattern,
}

impl CompiledTemplate {
    pub fn new(template: &str) -> Result<Self, Error> {
        Ok(CompiledTemplate {
            template: template.to_string(),
            pattern: CompiledPattern::compile(template)?,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Source of the regex messages are matched against.
    pub fn pattern(&self) -> &str {
        self.pattern.source()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.pattern.placeholders()
    }

    /// Extract values, or `None` if the message does not match.
    pub fn try_extract(&self, message: &str) -> Option<Vec<TypedValue>> {
        let captures = self.pattern.captures(message)?;
        Some(
            self.pattern
                .placeholders()
                .zip(captures)
                .map(|(placeholder, raw)| convert(raw, placeholder.verb))
                .collect(),
        )
    }

    /// Extract one typed value per placeholder, in template order.
    pub fn extract(&self, message: &str) -> Result<Vec<TypedValue>, Error> {
        self.try_extract(message)
            .ok_or_else(|| Error::TemplateMismatch {
                template: self.template.clone(),
                message: message.to_string(),
                offset: self.pattern.divergence(message),
            })
    }

    /// Extract values from `message` and substitute them into `translation`.
    pub fn translate(&self, message: &str, translation: &str) -> Result<String, Error> {
        let values = self.extract(message)?;
        Ok(apply_values(translation, &values))
    }
}

/// Extract the values that were formatted into `message` by `template`.
pub fn extract_values(template: &str, message: &str) -> Result<Vec<TypedValue>, Error> {
    CompiledTemplate::new(template)?.extract(message)
}

/// Convert captured text to the type its verb selects.
///
/// Surrounding whitespace is trimmed first. Text that does not parse stays a
/// string; this never fails.
pub fn convert(raw: &str, verb: char) -> TypedValue {
    let text = raw.trim();
    let converted = match VerbClass::of(verb) {
        VerbClass::Decimal | VerbClass::Digits => text.parse().ok().map(TypedValue::Integer),
        VerbClass::Float => text.parse().ok().map(TypedValue::Float),
        VerbClass::Boolean => parse_bool(text).map(TypedValue::Boolean),
        VerbClass::Hex => {
            let digits = text.strip_prefix("0x").unwrap_or(text);
            let digits = digits.strip_prefix("0X").unwrap_or(digits);
            i64::from_str_radix(digits, 16).ok().map(TypedValue::Integer)
        }
        VerbClass::Text | VerbClass::Generic => None,
    };

    converted.unwrap_or_else(|| {
        if !matches!(VerbClass::of(verb), VerbClass::Text | VerbClass::Generic) {
            trace!(%verb, text, "conversion failed, keeping captured text");
        }
        TypedValue::String(text.to_string())
    })
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
