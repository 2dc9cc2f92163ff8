//! AppleScript sources for the dialog host and parsing of their replies.

pub fn applescript_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn quoted_list(values: &[&str]) -> String {
    let inner: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", applescript_escape(v)))
        .collect();
    format!("{{{}}}", inner.join(", "))
}

fn app_icon(app: &str) -> String {
    format!(
        "set appPath to (path to application \"{app}\")\n    \
         set appIcon to path to resource \"appicon.icns\" in bundle (appPath as alias)"
    )
}

pub fn input_script(
    app: &str,
    title: &str,
    prompt: &str,
    hidden: bool,
    default_value: &str,
    extra_buttons: &[&str],
) -> String {
    let mut buttons: Vec<&str> = extra_buttons.to_vec();
    buttons.extend(["Cancel", "Ok"]);
    let hidden = if hidden { " with hidden answer" } else { "" };
    let app = applescript_escape(app);
    format!(
        r#"on run argv
  tell application "{app}"
    activate
    {icon}
    try
      display dialog "{prompt}:" with title "{title}" default answer "{value}" buttons {buttons} default button "Ok" with icon appIcon{hidden}
      set answer to (button returned of result) & "|" & (text returned of result)
    on error number -128
      set answer to "Cancel|"
    end try
  end tell
  return answer
end run"#,
        icon = app_icon(&app),
        prompt = applescript_escape(prompt),
        title = applescript_escape(title),
        value = applescript_escape(default_value),
        buttons = quoted_list(&buttons),
    )
}

pub fn selection_script(
    app: &str,
    title: &str,
    prompt: &str,
    choices: &[&str],
    default: Option<&str>,
    multiple: bool,
) -> String {
    let default_items = match default {
        Some(d) => format!(" default items {}", quoted_list(&[d])),
        None => String::new(),
    };
    let multiple = if multiple { "with" } else { "without" };
    format!(
        r#"on run argv
  tell application "{app}"
    activate
    set answer to choose from list {choices} with title "{title}" with prompt "{prompt}"{default_items} {multiple} multiple selections allowed
    if answer is false then
      return "Cancel|"
    end if
    set AppleScript's text item delimiters to ","
    return "Ok|" & (answer as text)
  end tell
end run"#,
        app = applescript_escape(app),
        choices = quoted_list(choices),
        title = applescript_escape(title),
        prompt = applescript_escape(prompt),
    )
}

pub fn confirmation_script(app: &str, title: &str, prompt: &str, default_button: &str) -> String {
    let app = applescript_escape(app);
    format!(
        r#"on run argv
  tell application "{app}"
    activate
    {icon}
    try
      display dialog "{prompt}" with title "{title}" buttons {{"No", "Yes"}} default button "{default}" with icon appIcon
      return button returned of result
    on error number -128
      return "No"
    end try
  end tell
end run"#,
        icon = app_icon(&app),
        prompt = applescript_escape(prompt),
        title = applescript_escape(title),
        default = applescript_escape(default_button),
    )
}

pub fn message_script(app: &str, title: &str, message: &str) -> String {
    let app = applescript_escape(app);
    format!(
        r#"on run argv
  tell application "{app}"
    activate
    {icon}
    display dialog "{message}" with title "{title}" buttons {{"Ok"}} default button "Ok" with icon appIcon
  end tell
end run"#,
        icon = app_icon(&app),
        message = applescript_escape(message),
        title = applescript_escape(title),
    )
}

/// `osascript -ss` prints results as AppleScript source; undo the string
/// quoting it adds.
pub fn unquote_result(stdout: &str) -> String {
    let s = stdout.trim_end_matches(['\n', '\r']);
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s);
    s.replace("\\\"", "\"").replace("\\\\", "\\")
}

/// Split a `button|text` reply.
pub fn split_reply(reply: &str) -> (String, String) {
    match reply.split_once('|') {
        Some((button, text)) => (button.to_string(), text.to_string()),
        None => (reply.to_string(), String::new()),
    }
}
