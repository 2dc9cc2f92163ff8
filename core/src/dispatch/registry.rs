use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::context::WorkflowContext;
use crate::error::{ActionFailure, DispatchError, FeedbackError};
use crate::feedback::{write_feedback, FeedbackItem};
use crate::menu::MenuModel;

use super::menu::{resolve_menu, MenuOutcome};

/// Produces feedback for a query. Receives the query and the command path
/// typed so far.
pub type TellHandler =
    dyn Fn(&mut Env<'_>, &str, Option<&str>) -> anyhow::Result<Vec<FeedbackItem>>;

/// Performs an action. Receives the query and an optional key modifier.
pub type DoHandler = dyn Fn(&mut Env<'_>, &str, Option<&str>) -> anyhow::Result<()>;

const MAX_MESSAGE_CHARS: usize = 120;

#[derive(Default)]
pub struct ActionRegistry {
    tell: BTreeMap<String, Box<TellHandler>>,
    act: BTreeMap<String, Box<DoHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tell<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Env<'_>, &str, Option<&str>) -> anyhow::Result<Vec<FeedbackItem>> + 'static,
    {
        let name = name.into();
        if self.tell.insert(name.clone(), Box::new(handler)).is_some() {
            tracing::warn!(target: "alfred.dispatch", action = %name, "replaced tell handler");
        }
        self
    }

    pub fn register_do<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Env<'_>, &str, Option<&str>) -> anyhow::Result<()> + 'static,
    {
        let name = name.into();
        if self.act.insert(name.clone(), Box::new(handler)).is_some() {
            tracing::warn!(target: "alfred.dispatch", action = %name, "replaced do handler");
        }
        self
    }

    pub fn tell_handler(&self, name: &str) -> Option<&TellHandler> {
        self.tell.get(name).map(|b| b.as_ref())
    }

    pub fn do_handler(&self, name: &str) -> Option<&DoHandler> {
        self.act.get(name).map(|b| b.as_ref())
    }

    pub fn tell_names(&self) -> impl Iterator<Item = &str> {
        self.tell.keys().map(String::as_str)
    }

    pub fn do_names(&self) -> impl Iterator<Item = &str> {
        self.act.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("tell", &self.tell.keys().collect::<Vec<_>>())
            .field("do", &self.act.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// What a handler sees while it runs.
pub struct Env<'a> {
    ctx: &'a mut WorkflowContext,
    registry: &'a ActionRegistry,
    out: &'a mut dyn Write,
}

impl<'a> Env<'a> {
    pub fn new(
        ctx: &'a mut WorkflowContext,
        registry: &'a ActionRegistry,
        out: &'a mut dyn Write,
    ) -> Self {
        Self { ctx, registry, out }
    }

    pub fn ctx(&self) -> &WorkflowContext {
        &*self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut WorkflowContext {
        &mut *self.ctx
    }

    /// Write plain text to the output stream.
    pub fn puts(&mut self, msg: &str) -> std::io::Result<()> {
        self.out.write_all(msg.as_bytes())?;
        self.out.flush()
    }

    /// Resolve `query` against `model`, following a delegation into the tell
    /// handler registered under the matched command word.
    pub fn menu(
        &mut self,
        model: &MenuModel,
        query: &str,
        prefix: Option<&str>,
    ) -> anyhow::Result<Vec<FeedbackItem>> {
        match resolve_menu(model, query, prefix) {
            MenuOutcome::Items(items) => Ok(items),
            MenuOutcome::Delegate {
                command,
                query,
                prefix,
            } => {
                let registry = self.registry;
                let handler = registry
                    .tell_handler(&command)
                    .ok_or_else(|| DispatchError::UnknownHandler(command.clone()))?;
                tracing::debug!(target: "alfred.dispatch", handler = %command, query = %query, "delegating");
                handler(self, &query, Some(&prefix))
            }
        }
    }
}

/// Routes `tell` and `do` invocations to registered handlers.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: ActionRegistry,
}

impl Dispatcher {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Run a tell action. The handler's [`Env::puts`] output is discarded;
    /// only the returned items reach the caller.
    pub fn tell(
        &self,
        ctx: &mut WorkflowContext,
        name: &str,
        query: &str,
    ) -> Result<Vec<FeedbackItem>, ActionFailure> {
        tracing::debug!(target: "alfred.dispatch", action = name, query, "tell");
        let handler = self
            .registry
            .tell_handler(name)
            .ok_or_else(|| ActionFailure::InvalidAction(name.to_string()))?;
        let mut sink = io::sink();
        let mut env = Env::new(ctx, &self.registry, &mut sink);
        handler(&mut env, query, None).map_err(|e| {
            tracing::error!(target: "alfred.dispatch", action = name, error = ?e, "error telling");
            ActionFailure::Handler(e)
        })
    }

    pub fn do_action(
        &self,
        ctx: &mut WorkflowContext,
        name: &str,
        query: &str,
        modifier: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<(), ActionFailure> {
        tracing::debug!(target: "alfred.dispatch", action = name, query, modifier, "do");
        let handler = self
            .registry
            .do_handler(name)
            .ok_or_else(|| ActionFailure::InvalidCommand(name.to_string()))?;
        let mut env = Env::new(ctx, &self.registry, out);
        handler(&mut env, query, modifier).map_err(|e| {
            tracing::error!(target: "alfred.dispatch", action = name, error = ?e, "error doing");
            ActionFailure::Handler(e)
        })
    }

    /// Run a tell action and write the feedback message. Failures become a
    /// single informational item.
    pub fn emit_tell(
        &self,
        ctx: &mut WorkflowContext,
        name: &str,
        query: &str,
        out: &mut dyn Write,
    ) -> Result<(), FeedbackError> {
        let items = match self.tell(ctx, name, query) {
            Ok(items) => items,
            Err(failure) => vec![FeedbackItem::new(failure_message(&failure))],
        };
        write_feedback(out, &items)
    }

    /// Run a do action. Failures are written as plain text.
    pub fn emit_do(
        &self,
        ctx: &mut WorkflowContext,
        name: &str,
        query: &str,
        modifier: Option<&str>,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        if let Err(failure) = self.do_action(ctx, name, query, modifier, out) {
            out.write_all(failure_message(&failure).as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

/// One readable line for the user, whatever went wrong.
pub fn failure_message(failure: &ActionFailure) -> String {
    let raw = match failure {
        ActionFailure::Handler(e) => format!("Error: {e:#}"),
        other => other.to_string(),
    };
    let line = raw.lines().next().unwrap_or_default();
    truncate_chars(line, MAX_MESSAGE_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => {
            let mut out = s[..end].to_string();
            out.push('…');
            out
        }
        None => s.to_string(),
    }
}
