use template::count_placeholders;
use tracing::debug;

use crate::format::sprintf;
use crate::value::TypedValue;

/// Substitute `values` positionally into `translation`.
///
/// The values are first fitted to the translation's placeholder count; see
/// [`reconcile`].
pub fn apply_values(translation: &str, values: &[TypedValue]) -> String {
    let slots = count_placeholders(translation);
    sprintf(translation, &reconcile(values, slots))
}

/// Fit `values` to exactly `slots` entries: extras are dropped from the end,
/// missing ones are filled with empty strings.
pub fn reconcile(values: &[TypedValue], slots: usize) -> Vec<TypedValue> {
    if values.len() > slots {
        debug!(
            dropped = values.len() - slots,
            slots, "translation has fewer placeholders than extracted values"
        );
    } else if values.len() < slots {
        debug!(
            padded = slots - values.len(),
            slots, "translation has more placeholders than extracted values"
        );
    }

    values
        .iter()
        .cloned()
        .chain(std::iter::repeat_with(TypedValue::empty))
        .take(slots)
        .collect()
}
