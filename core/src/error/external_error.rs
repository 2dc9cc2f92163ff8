// core/src/error/external_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("failed to spawn script interpreter")]
    Spawn(#[source] std::io::Error),

    #[error("script interpreter reported an error: {0}")]
    Script(String),

    #[error("dialog unavailable on this platform")]
    Unsupported,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to run credential tool")]
    Spawn(#[source] std::io::Error),

    #[error("credential tool failed for account {account}: {message}")]
    Command { account: String, message: String },

    #[error("credential store unavailable on this platform")]
    Unsupported,
}
