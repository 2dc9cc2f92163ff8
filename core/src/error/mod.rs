mod config_error;
mod dispatch_error;
mod external_error;
mod feedback_error;
mod workflow_error;

pub use config_error::{ConfigError, UnknownLogLevel};
pub use dispatch_error::{ActionFailure, DispatchError, MenuError};
pub use external_error::{CredentialError, DialogError};
pub use feedback_error::FeedbackError;
pub use workflow_error::{CliError, WorkflowError};
