pub mod error;
pub mod pattern;
pub mod placeholder;

pub use error::PatternError;
pub use pattern::{CompiledPattern, capture_for};
pub use placeholder::{Placeholder, Segment, VerbClass, count_placeholders, scan, tokenize};
