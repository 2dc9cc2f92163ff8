// core/src/error/workflow_error.rs
use std::path::PathBuf;

use thiserror::Error;

use super::{ConfigError, FeedbackError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read workflow bundle {path}")]
    Bundle {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    #[error("workflow bundle is missing key \"{0}\"")]
    MissingKey(&'static str),

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("current directory is not accessible")]
    CurrentDir(#[source] std::io::Error),

    #[error("no write access to {0}")]
    NotWritable(PathBuf),

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error("io error")]
    Io(#[from] std::io::Error),
}
