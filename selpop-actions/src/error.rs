//! Action error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("{name} URL template has no {{text}} placeholder: {template}")]
    MissingPlaceholder { name: &'static str, template: String },

    #[error("failed to access clipboard: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}
