//! Declarative command menus.
//!
//! A [`MenuModel`] is one level of a command hierarchy. Navigation entries
//! drill into a sub-handler; keyword entries are selectable right away.

use std::collections::HashSet;

use crate::error::MenuError;
use crate::feedback::FeedbackItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Pure navigation node. Selecting it narrows the menu further.
    Navigation,
    /// Immediately selectable entry carrying its own argument.
    Keyword { arg: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    command: String,
    description: String,
    kind: EntryKind,
}

impl MenuEntry {
    pub fn command(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            kind: EntryKind::Navigation,
        }
    }

    /// Same behaviour as [`MenuEntry::command`]; reads better for entries that
    /// open a nested menu.
    pub fn menu(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self::command(command, description)
    }

    /// A keyword whose argument is its own command word.
    pub fn keyword(command: impl Into<String>, description: impl Into<String>) -> Self {
        let command = command.into();
        let arg = command.clone();
        Self::keyword_with_arg(command, description, arg)
    }

    pub fn keyword_with_arg(
        command: impl Into<String>,
        description: impl Into<String>,
        arg: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let arg = arg.into();
        let arg = if arg.is_empty() { command.clone() } else { arg };
        Self {
            command,
            description: description.into(),
            kind: EntryKind::Keyword { arg },
        }
    }

    pub fn command_word(&self) -> &str {
        &self.command
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn takes_arguments(&self) -> bool {
        matches!(self.kind, EntryKind::Navigation)
    }

    /// Render this entry for the menu level reached through `prefix`.
    pub fn to_feedback_item(&self, prefix: Option<&str>) -> FeedbackItem {
        let mut ac = match prefix.filter(|p| !p.is_empty()) {
            Some(p) => format!("{p} "),
            None => String::new(),
        };
        ac.push_str(&self.command);
        ac.push(' ');

        let item = FeedbackItem::new(self.command.clone())
            .subtitle(self.description.clone())
            .autocomplete(ac);

        match &self.kind {
            EntryKind::Navigation => item,
            EntryKind::Keyword { arg } => item.arg(arg.clone()),
        }
    }
}

/// Ordered set of menu entries with unique command words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    pub fn new(entries: impl IntoIterator<Item = MenuEntry>) -> Result<Self, MenuError> {
        let entries: Vec<MenuEntry> = entries.into_iter().collect();
        let mut seen = HashSet::new();
        for entry in &entries {
            let cmd = entry.command_word();
            if cmd.is_empty() || cmd.chars().any(char::is_whitespace) {
                return Err(MenuError::InvalidCommand(cmd.to_string()));
            }
            if !seen.insert(cmd) {
                return Err(MenuError::DuplicateCommand(cmd.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn get(&self, command: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.command == command)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_feedback_items(&self, prefix: Option<&str>) -> Vec<FeedbackItem> {
        self.entries
            .iter()
            .map(|e| e.to_feedback_item(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_renders_as_navigation() {
        let item = MenuEntry::command("search", "Search items").to_feedback_item(None);
        assert_eq!(item.title_text(), "search");
        assert_eq!(item.subtitle_text(), Some("Search items"));
        assert!(!item.is_valid());
        assert_eq!(item.arg_text(), None);
        assert_eq!(item.full_autocomplete().as_deref(), Some("search "));
    }

    #[test]
    fn keyword_defaults_arg_to_command() {
        let item = MenuEntry::keyword("open", "Open result").to_feedback_item(Some("files"));
        assert!(item.is_valid());
        assert_eq!(item.arg_text(), Some("open"));
        assert_eq!(item.full_autocomplete().as_deref(), Some("files open "));
    }

    #[test]
    fn keyword_with_explicit_arg() {
        let item = MenuEntry::keyword_with_arg("dbg", "Debug", "loglevel:DEBUG").to_feedback_item(None);
        assert_eq!(item.arg_text(), Some("loglevel:DEBUG"));
    }

    #[test]
    fn menu_is_alias_of_command() {
        assert_eq!(MenuEntry::menu("a", "b"), MenuEntry::command("a", "b"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = MenuModel::new([
            MenuEntry::command("a", "first"),
            MenuEntry::keyword("a", "second"),
        ])
        .unwrap_err();
        assert_eq!(err, MenuError::DuplicateCommand("a".into()));
    }

    #[test]
    fn commands_must_be_single_words() {
        let err = MenuModel::new([MenuEntry::command("two words", "x")]).unwrap_err();
        assert_eq!(err, MenuError::InvalidCommand("two words".into()));
    }

    #[test]
    fn model_keeps_declared_order() {
        let model = MenuModel::new([
            MenuEntry::command("search", "Search items"),
            MenuEntry::keyword("open", "Open result"),
        ])
        .unwrap();
        let titles: Vec<_> = model
            .to_feedback_items(None)
            .iter()
            .map(|i| i.title_text().to_string())
            .collect();
        assert_eq!(titles, vec!["search", "open"]);
        assert!(model.get("open").is_some());
    }
}
