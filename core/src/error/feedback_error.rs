// core/src/error/feedback_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback item \"{title}\" is valid but has no argument")]
    ValidWithoutArg { title: String },

    #[error("invalid feedback item")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write feedback")]
    Io(#[from] std::io::Error),
}
