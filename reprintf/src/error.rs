use codespan_reporting::diagnostic::{Diagnostic, Label};
use template::PatternError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The message's literal text or a captured value does not line up with
    /// the template.
    #[error("message does not match template (diverges at byte {offset})")]
    TemplateMismatch {
        template: String,
        message: String,
        /// Byte offset in `message` where matching first went wrong.
        offset: usize,
    },

    #[error(transparent)]
    PatternCompileFailure(#[from] PatternError),
}

impl Error {
    /// Convert to a codespan-reporting Diagnostic for display.
    ///
    /// `file_id` must refer to the message text in the caller's file database.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            Error::TemplateMismatch {
                template,
                message,
                offset,
            } => {
                let end = message
                    .get(*offset..)
                    .and_then(|rest| rest.chars().next())
                    .map_or(*offset, |c| offset + c.len_utf8());
                Diagnostic::error()
                    .with_message("message does not match template")
                    .with_labels(vec![
                        Label::primary(file_id, *offset..end)
                            .with_message("message diverges from the template here"),
                    ])
                    .with_notes(vec![format!("template: {template:?}")])
            }
            Error::PatternCompileFailure(err) => Diagnostic::error()
                .with_message("template could not be compiled into a matching pattern")
                .with_notes(vec![err.to_string()]),
        }
    }
}
