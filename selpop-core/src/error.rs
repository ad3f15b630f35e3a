//! Popup error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("action already registered: {0}")]
    DuplicateAction(String),

    #[error("action {action} failed: {reason}")]
    ActionFailed { action: String, reason: String },

    #[error("popup has been torn down")]
    TornDown,

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
