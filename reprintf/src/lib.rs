pub mod apply;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod format;
pub mod value;

pub use apply::{apply_values, reconcile};
pub use catalog::{Catalog, CatalogEntry};
pub use error::Error;
pub use extract::{CompiledTemplate, convert, extract_values};
pub use format::sprintf;
pub use template::{Placeholder, count_placeholders};
pub use value::TypedValue;

/// Re-render `message`, produced from `template`, through `translation`.
///
/// The values formatted into the message are recovered by matching it against
/// the template, then substituted positionally into the translation.
pub fn translate(template: &str, message: &str, translation: &str) -> Result<String, Error> {
    CompiledTemplate::new(template)?.translate(message, translation)
}
