use std::path::{Path, PathBuf};

use reprintf::{Catalog, CatalogEntry};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Catalog file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "reprintf.toml";

/// On-disk catalog: a list of `[[entry]]` tables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub entry: Vec<CatalogEntry>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no catalog given and reprintf.toml not found")]
    NotFound,

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog '{}': {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: reprintf::Error,
    },
}

/// The explicit path, else the default file if it exists.
pub fn resolve(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            default.is_file().then_some(default)
        }
    }
}

pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog, ConfigError> {
    let path = resolve(explicit).ok_or(ConfigError::NotFound)?;
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file: CatalogFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), entries = file.entry.len(), "loaded catalog");
    Catalog::from_entries(file.entry).map_err(|source| ConfigError::Template { path, source })
}
