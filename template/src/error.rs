use thiserror::Error;

/// Failure to turn a template into a matching pattern.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("failed to compile pattern `{pattern}`: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
