use std::io::Write;

use uuid::Uuid;

use super::item::{FeedbackItem, Icon};
use crate::error::FeedbackError;

const XML_DECL: &str = r#"<?xml version="1.0"?>"#;

/// Escape markup characters. Control characters XML 1.0 cannot carry are
/// dropped.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => out.push(c),
        }
    }
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_xml(value));
    out.push('"');
}

fn push_element(out: &mut String, name: &str, attr: Option<(&str, &str)>, text: &str) {
    out.push('<');
    out.push_str(name);
    if let Some((k, v)) = attr {
        push_attr(out, k, v);
    }
    out.push('>');
    out.push_str(&escape_xml(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Render a single `<item>` element.
///
/// A valid item without a caller-supplied uid gets a fresh one so the host
/// does not reorder results from stale history.
pub fn item_to_xml(item: &FeedbackItem) -> String {
    let mut out = String::from("<item");

    match item.uid_text() {
        Some(uid) if !uid.is_empty() => push_attr(&mut out, "uid", uid),
        _ if item.is_valid() => push_attr(&mut out, "uid", &Uuid::new_v4().to_string()),
        _ => {}
    }

    push_attr(&mut out, "valid", if item.is_valid() { "yes" } else { "no" });

    if let Some(ac) = item.full_autocomplete() {
        push_attr(&mut out, "autocomplete", &ac);
    }

    if let Some(arg) = item.arg_text() {
        push_attr(&mut out, "arg", arg);
    }
    out.push('>');

    push_element(&mut out, "title", None, item.title_text());

    if let Some(subtitle) = item.subtitle_text() {
        push_element(&mut out, "subtitle", None, subtitle);
    }

    match item.icon_ref() {
        Some(Icon::Path(path)) => push_element(&mut out, "icon", None, path),
        Some(Icon::Typed { kind, path }) => {
            push_element(&mut out, "icon", Some(("type", kind.as_str())), path)
        }
        None => {}
    }

    out.push_str("</item>");
    out
}

/// Convert a list of items into a complete feedback message.
pub fn to_xml(items: &[FeedbackItem]) -> String {
    let mut msg = String::from(XML_DECL);
    msg.push_str("<items>");
    for item in items {
        msg.push_str(&item_to_xml(item));
    }
    msg.push_str("</items>");
    msg
}

pub fn write_feedback<W: Write + ?Sized>(
    out: &mut W,
    items: &[FeedbackItem],
) -> Result<(), FeedbackError> {
    out.write_all(to_xml(items).as_bytes())?;
    out.flush()?;
    Ok(())
}
