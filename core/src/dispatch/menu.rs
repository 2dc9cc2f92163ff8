use crate::feedback::FeedbackItem;
use crate::matcher::{filter_by, MatchMode};
use crate::menu::MenuModel;

/// What a menu query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Items ready to serialize. Never empty.
    Items(Vec<FeedbackItem>),
    /// A navigation entry was fully typed; the handler registered under
    /// `command` takes over with the rest of the query.
    Delegate {
        command: String,
        query: String,
        prefix: String,
    },
}

pub fn no_match_item(query: &str) -> FeedbackItem {
    FeedbackItem::new(format!("No commands match \"{query}\""))
}

pub fn ambiguous_item(command: &str) -> FeedbackItem {
    FeedbackItem::new(format!("Multiple commands match \"{command}\""))
}

pub fn no_arguments_item(command: &str) -> FeedbackItem {
    FeedbackItem::new(format!("\"{command}\" command doesn't take arguments"))
}

fn join_prefix(prefix: Option<&str>, command: &str) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(p) => format!("{p} {command}"),
        None => command.to_string(),
    }
}

/// Route `query` through one level of `model`.
///
/// An empty query lists every entry. A single token is a partially typed
/// command word and narrows by prefix. Once a space follows the token the
/// command word must match an entry exactly; there is no prefix fallback at
/// that point.
pub fn resolve_menu(model: &MenuModel, query: &str, prefix: Option<&str>) -> MenuOutcome {
    let query = query.trim_start();
    tracing::debug!(target: "alfred.menu", query, prefix, "menu query");

    let mut items = model.to_feedback_items(prefix);

    if !query.is_empty() {
        match query.split_once(' ') {
            Some((command, args)) => {
                let args = args.trim_start();
                let matched = filter_by(command, items, MatchMode::Exact, |i| i.title_text());
                items = match matched.len() {
                    0 => Vec::new(),
                    1 => {
                        let item = &matched[0];
                        if item.arg_text().is_none() {
                            return MenuOutcome::Delegate {
                                command: command.to_string(),
                                query: args.to_string(),
                                prefix: join_prefix(prefix, command),
                            };
                        }
                        if args.trim().is_empty() {
                            matched
                        } else {
                            vec![no_arguments_item(command)]
                        }
                    }
                    _ => vec![ambiguous_item(command)],
                };
            }
            None => {
                items = filter_by(query, items, MatchMode::Partial, |i| i.title_text());
            }
        }
    }

    if items.is_empty() {
        items.push(no_match_item(query));
    }
    MenuOutcome::Items(items)
}
