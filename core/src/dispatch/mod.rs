//! Query routing: menu resolution and the `tell`/`do` entry points.

mod menu;
mod registry;

pub use menu::{ambiguous_item, no_arguments_item, no_match_item, resolve_menu, MenuOutcome};
pub use registry::{failure_message, ActionRegistry, Dispatcher, DoHandler, Env, TellHandler};
