//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `alfred_core::api` instead of reaching into internal modules.

pub use crate::config::{JsonFile, JsonFileOptions, DEFAULT_LOG_LEVEL, LOG_LEVEL_KEY};
pub use crate::context::WorkflowContext;
pub use crate::dispatch::{
    failure_message, resolve_menu, ActionRegistry, Dispatcher, Env, MenuOutcome,
};
pub use crate::error::{
    ActionFailure, CliError, ConfigError, CredentialError, DialogError, DispatchError,
    FeedbackError, MenuError, UnknownLogLevel, WorkflowError,
};
pub use crate::feedback::{to_xml, write_feedback, FeedbackItem, Icon, IconKind};
pub use crate::info::WorkflowInfo;
pub use crate::logging::{init_logging, LogHandle, LogLevel};
pub use crate::matcher::{
    filter_by, filter_display, fuzzy_filter, fuzzy_match, partial_filter, partial_match,
    MatchMode,
};
pub use crate::menu::{EntryKind, MenuEntry, MenuModel};
pub use crate::services::{
    Credential, CredentialStore, DialogHost, InputRequest, ScriptOutput, Services,
    ServicesFactory, Unsupported, UserInput,
};
