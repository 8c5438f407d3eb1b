use std::fmt;

/// A value recovered from a message, typed by the verb of the placeholder
/// that captured it.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl TypedValue {
    /// The empty string used to fill placeholders no value was extracted for.
    pub fn empty() -> Self {
        TypedValue::String(String::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Integer(_) => "int",
            TypedValue::Float(_) => "float64",
            TypedValue::Boolean(_) => "bool",
            TypedValue::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way a `%v` directive would.
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::display(self))
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Integer(n)
    }
}

impl From<f64> for TypedValue {
    fn from(x: f64) -> Self {
        TypedValue::Float(x)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Boolean(b)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}
