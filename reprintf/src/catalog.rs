use serde::Deserialize;
use tracing::debug;

use crate::apply::apply_values;
use crate::error::Error;
use crate::extract::CompiledTemplate;

/// One template and the translation its messages map to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub template: String,
    pub translation: String,
}

/// An ordered set of templates, each compiled once, tried in order against
/// incoming messages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(CompiledTemplate, String)>,
}

impl Catalog {
    /// Compile every entry. Fails on the first template that does not compile.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self, Error> {
        let entries = entries
            .into_iter()
            .map(|entry| -> Result<_, Error> {
                Ok((CompiledTemplate::new(&entry.template)?, entry.translation))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Catalog { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry whose template matches `message`, with its translation.
    pub fn lookup(&self, message: &str) -> Option<(&CompiledTemplate, &str)> {
        self.entries
            .iter()
            .find(|(template, _)| template.try_extract(message).is_some())
            .map(|(template, translation)| (template, translation.as_str()))
    }

    /// Translate `message` with the first matching entry.
    pub fn translate(&self, message: &str) -> Option<String> {
        let translated = self.entries.iter().find_map(|(template, translation)| {
            template
                .try_extract(message)
                .map(|values| apply_values(translation, &values))
        });
        if translated.is_none() {
            debug!(%message, "no catalog entry matches message");
        }
        translated
    }
}
