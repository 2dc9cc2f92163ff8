// core/src/error/dispatch_error.rs
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("duplicate menu command \"{0}\"")]
    DuplicateCommand(String),

    #[error("menu command must not be empty or contain whitespace: \"{0}\"")]
    InvalidCommand(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown handler \"{0}\"")]
    UnknownHandler(String),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Failure of a looked-up action, carried back to the entry point instead of
/// unwinding through it.
#[derive(Debug, Error)]
pub enum ActionFailure {
    #[error("Invalid action \"{0}\"")]
    InvalidAction(String),

    #[error("Invalid command \"{0}\"")]
    InvalidCommand(String),

    #[error("Error: {0}")]
    Handler(#[source] anyhow::Error),
}
