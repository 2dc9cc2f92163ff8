use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FeedbackError;

pub const DEFAULT_ICON: &str = "icon.png";

/// Icon shown next to a feedback item.
///
/// A plain path is rendered as element text; the typed variants add a `type`
/// attribute so the host resolves the icon of a file or of a file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Path(String),
    Typed {
        #[serde(rename = "type")]
        kind: IconKind,
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    /// Icon of the file at `path`.
    FileIcon,
    /// Icon registered for the uniform type identifier in `path`.
    FileType,
}

impl IconKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKind::FileIcon => "fileicon",
            IconKind::FileType => "filetype",
        }
    }
}

impl Icon {
    pub fn file_icon(path: impl Into<String>) -> Self {
        Icon::Typed {
            kind: IconKind::FileIcon,
            path: path.into(),
        }
    }

    pub fn file_type(path: impl Into<String>) -> Self {
        Icon::Typed {
            kind: IconKind::FileType,
            path: path.into(),
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Icon::Path(DEFAULT_ICON.to_string())
    }
}

impl From<&str> for Icon {
    fn from(path: &str) -> Self {
        Icon::Path(path.to_string())
    }
}

impl From<String> for Icon {
    fn from(path: String) -> Self {
        Icon::Path(path)
    }
}

/// One selectable (or purely informational) result in a feedback message.
///
/// Items are built fresh for every query and never mutated once handed to the
/// serializer. An item only becomes valid by receiving an argument, so a
/// valid item always carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackItem {
    title: String,
    subtitle: Option<String>,
    icon: Option<Icon>,
    valid: bool,
    arg: Option<String>,
    uid: Option<String>,
    autocomplete: Option<String>,
    prefix: Option<String>,
}

impl FeedbackItem {
    /// An informational, non-selectable item.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            icon: Some(Icon::default()),
            valid: false,
            arg: None,
            uid: None,
            autocomplete: None,
            prefix: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn without_icon(mut self) -> Self {
        self.icon = None;
        self
    }

    /// Attach the payload returned to the host on selection. This is what
    /// makes an item valid.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self.valid = true;
        self
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn autocomplete(mut self, text: impl Into<String>) -> Self {
        self.autocomplete = Some(text.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn title_text(&self) -> &str {
        &self.title
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn icon_ref(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn arg_text(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn uid_text(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn prefix_text(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Autocomplete text as the host should see it, with the prefix path
    /// already prepended.
    pub fn full_autocomplete(&self) -> Option<String> {
        let ac = self.autocomplete.as_deref().filter(|s| !s.is_empty())?;
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => Some(format!("{prefix} {ac}")),
            None => Some(ac.to_string()),
        }
    }

    /// Dictionary form used when items are cached as JSON.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(ItemRecord::from(self)).unwrap_or(Value::Null)
    }

    pub fn from_value(value: Value) -> Result<Self, FeedbackError> {
        let record: ItemRecord = serde_json::from_value(value)?;
        if record.valid && record.arg.is_none() {
            return Err(FeedbackError::ValidWithoutArg {
                title: record.title,
            });
        }
        Ok(Self {
            title: record.title,
            subtitle: record.subtitle,
            icon: record.icon,
            valid: record.valid,
            arg: record.arg,
            uid: record.uid,
            autocomplete: None,
            prefix: None,
        })
    }
}

impl fmt::Display for FeedbackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Item: title=\"{}\", valid={}, arg=\"{}\"}}",
            self.title,
            self.valid,
            self.arg.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemRecord {
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    icon: Option<Icon>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    arg: Option<String>,
}

impl From<&FeedbackItem> for ItemRecord {
    fn from(item: &FeedbackItem) -> Self {
        Self {
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            icon: item.icon.clone(),
            uid: item.uid.clone(),
            valid: item.valid,
            arg: item.arg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_item_is_informational_with_default_icon() {
        let item = FeedbackItem::new("hello");
        assert!(!item.is_valid());
        assert_eq!(item.arg_text(), None);
        assert_eq!(item.icon_ref(), Some(&Icon::Path("icon.png".into())));
    }

    #[test]
    fn arg_makes_item_valid() {
        let item = FeedbackItem::new("open").arg("open");
        assert!(item.is_valid());
        assert_eq!(item.arg_text(), Some("open"));
    }

    #[test]
    fn autocomplete_is_prefixed() {
        let item = FeedbackItem::new("level").autocomplete("level ").prefix("settings");
        assert_eq!(item.full_autocomplete().as_deref(), Some("settings level "));

        let bare = FeedbackItem::new("level").autocomplete("level ");
        assert_eq!(bare.full_autocomplete().as_deref(), Some("level "));
    }

    #[test]
    fn dictionary_form_keeps_core_fields() {
        let item = FeedbackItem::new("a")
            .subtitle("b")
            .icon(Icon::file_type("public.folder"))
            .uid("id-1")
            .arg("x");
        let value = item.to_value();
        assert_eq!(value["title"], json!("a"));
        assert_eq!(value["icon"], json!({"type": "filetype", "path": "public.folder"}));
        assert_eq!(value["valid"], json!(true));

        let back = FeedbackItem::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn dictionary_rejects_valid_item_without_arg() {
        let err = FeedbackItem::from_value(json!({"title": "t", "valid": true})).unwrap_err();
        assert!(matches!(err, FeedbackError::ValidWithoutArg { .. }));
    }

    #[test]
    fn display_summarises_item() {
        let item = FeedbackItem::new("open").arg("x");
        assert_eq!(item.to_string(), "{Item: title=\"open\", valid=true, arg=\"x\"}");
    }
}
