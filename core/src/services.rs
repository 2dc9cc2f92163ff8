//! Collaborators the core talks to but does not implement: modal dialogs and
//! the system credential store. Platform implementations live in the
//! plugins crate.

use crate::error::{CredentialError, DialogError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Result of a free-text prompt: the button pressed and the text entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub button: String,
    pub text: String,
}

impl UserInput {
    pub fn cancelled(&self) -> bool {
        self.button == "Cancel"
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputRequest<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub hidden: bool,
    pub default_value: Option<&'a str>,
    pub extra_buttons: Vec<&'a str>,
}

pub trait DialogHost {
    fn name(&self) -> &str;

    fn run_script(&self, script: &str) -> Result<ScriptOutput, DialogError>;

    /// Ask for a line of text. The button is `"Cancel"` with empty text when
    /// the user backs out.
    fn get_from_user(&self, request: &InputRequest<'_>) -> Result<UserInput, DialogError>;

    /// Let the user pick from `choices`. `None` when cancelled.
    fn get_selection_from_user(
        &self,
        title: &str,
        prompt: &str,
        choices: &[&str],
        default: Option<&str>,
        multiple: bool,
    ) -> Result<Option<String>, DialogError>;

    /// Returns the label of the pressed button.
    fn get_confirmation(
        &self,
        title: &str,
        prompt: &str,
        default_button: &str,
    ) -> Result<String, DialogError>;

    fn show_message(&self, title: &str, message: &str) -> Result<(), DialogError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub service: Option<String>,
    pub account: Option<String>,
    pub comment: Option<String>,
    pub password: Option<String>,
}

pub trait CredentialStore {
    fn service(&self) -> &str;

    fn get(&self, account: &str) -> Result<Option<Credential>, CredentialError>;

    fn set(&self, account: &str, password: &str, comment: Option<&str>)
        -> Result<(), CredentialError>;

    fn delete(&self, account: &str) -> Result<(), CredentialError>;
}

/// Stand-in used where no platform implementation is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl DialogHost for Unsupported {
    fn name(&self) -> &str {
        "unsupported"
    }

    fn run_script(&self, _script: &str) -> Result<ScriptOutput, DialogError> {
        Err(DialogError::Unsupported)
    }

    fn get_from_user(&self, _request: &InputRequest<'_>) -> Result<UserInput, DialogError> {
        Err(DialogError::Unsupported)
    }

    fn get_selection_from_user(
        &self,
        _title: &str,
        _prompt: &str,
        _choices: &[&str],
        _default: Option<&str>,
        _multiple: bool,
    ) -> Result<Option<String>, DialogError> {
        Err(DialogError::Unsupported)
    }

    fn get_confirmation(&self, _title: &str, _prompt: &str, _default: &str) -> Result<String, DialogError> {
        Err(DialogError::Unsupported)
    }

    fn show_message(&self, _title: &str, _message: &str) -> Result<(), DialogError> {
        Err(DialogError::Unsupported)
    }
}

impl CredentialStore for Unsupported {
    fn service(&self) -> &str {
        "unsupported"
    }

    fn get(&self, _account: &str) -> Result<Option<Credential>, CredentialError> {
        Err(CredentialError::Unsupported)
    }

    fn set(&self, _account: &str, _password: &str, _comment: Option<&str>) -> Result<(), CredentialError> {
        Err(CredentialError::Unsupported)
    }

    fn delete(&self, _account: &str) -> Result<(), CredentialError> {
        Err(CredentialError::Unsupported)
    }
}

pub struct Services {
    pub dialogs: Box<dyn DialogHost>,
    pub credentials: Box<dyn CredentialStore>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            dialogs: Box::new(Unsupported),
            credentials: Box::new(Unsupported),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("dialogs", &self.dialogs.name())
            .field("credentials", &self.credentials.service())
            .finish()
    }
}

pub trait ServicesFactory {
    fn build_services(&self) -> Services;
}
