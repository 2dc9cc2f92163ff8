//! Modal dialogs driven through `osascript`.

pub mod script;

use std::io::Write;
use std::process::{Command, Stdio};

use alfred_core::api::{DialogError, DialogHost, InputRequest, ScriptOutput, UserInput};

pub const DEFAULT_HOST_APP: &str = "Alfred 2";

pub struct OsaScriptDialogs {
    app: String,
    interpreter: String,
    args: Vec<String>,
}

impl OsaScriptDialogs {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            interpreter: "osascript".to_string(),
            args: vec!["-ss".to_string(), "-".to_string()],
        }
    }

    /// Use a different interpreter; it is fed the script on stdin.
    pub fn with_interpreter<I, S>(mut self, interpreter: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interpreter = interpreter.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for OsaScriptDialogs {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_APP)
    }
}

impl DialogHost for OsaScriptDialogs {
    fn name(&self) -> &str {
        "osascript"
    }

    fn run_script(&self, script: &str) -> Result<ScriptOutput, DialogError> {
        tracing::debug!(target: "alfred.dialog", interpreter = %self.interpreter, bytes = script.len(), "running script");
        let mut child = Command::new(&self.interpreter)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(DialogError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(script.as_bytes())
                .map_err(DialogError::Spawn)?;
        }

        let output = child.wait_with_output().map_err(DialogError::Spawn)?;
        Ok(ScriptOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn get_from_user(&self, request: &InputRequest<'_>) -> Result<UserInput, DialogError> {
        let src = script::input_script(
            &self.app,
            request.title,
            request.prompt,
            request.hidden,
            request.default_value.unwrap_or(""),
            &request.extra_buttons,
        );
        let out = self.run_script(&src)?;
        let (button, text) = script::split_reply(&script::unquote_result(&out.stdout));
        Ok(UserInput { button, text })
    }

    fn get_selection_from_user(
        &self,
        title: &str,
        prompt: &str,
        choices: &[&str],
        default: Option<&str>,
        multiple: bool,
    ) -> Result<Option<String>, DialogError> {
        let src = script::selection_script(&self.app, title, prompt, choices, default, multiple);
        let out = self.run_script(&src)?;
        tracing::debug!(target: "alfred.dialog", stdout = %out.stdout, stderr = %out.stderr, "selection reply");
        let (button, value) = script::split_reply(&script::unquote_result(&out.stdout));
        if button == "Cancel" {
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn get_confirmation(
        &self,
        title: &str,
        prompt: &str,
        default_button: &str,
    ) -> Result<String, DialogError> {
        let src = script::confirmation_script(&self.app, title, prompt, default_button);
        let out = self.run_script(&src)?;
        if !out.stderr.trim().is_empty() {
            return Err(DialogError::Script(out.stderr.trim().to_string()));
        }
        Ok(script::unquote_result(&out.stdout))
    }

    fn show_message(&self, title: &str, message: &str) -> Result<(), DialogError> {
        let out = self.run_script(&script::message_script(&self.app, title, message))?;
        if !out.stderr.trim().is_empty() {
            tracing::warn!(target: "alfred.dialog", stderr = %out.stderr.trim(), "message dialog reported an error");
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn canned(reply: &str) -> OsaScriptDialogs {
        let cmd = format!("cat > /dev/null; printf '%s\\n' '{reply}'");
        OsaScriptDialogs::default().with_interpreter("sh", ["-c".to_string(), cmd])
    }

    #[test]
    fn input_reply_is_split() {
        let host = canned("\"Ok|hunter2\"");
        let reply = host
            .get_from_user(&InputRequest {
                title: "t",
                prompt: "p",
                hidden: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(reply.button, "Ok");
        assert_eq!(reply.text, "hunter2");
        assert!(!reply.cancelled());
    }

    #[test]
    fn cancelled_selection_is_none() {
        let host = canned("\"Cancel|\"");
        assert_eq!(
            host.get_selection_from_user("t", "p", &["a"], None, false).unwrap(),
            None
        );
    }

    #[test]
    fn confirmation_returns_button() {
        let host = canned("\"Yes\"");
        assert_eq!(host.get_confirmation("t", "p", "No").unwrap(), "Yes");
    }

    #[test]
    fn missing_interpreter_is_a_spawn_error() {
        let host = OsaScriptDialogs::default()
            .with_interpreter("/nonexistent/osascript", Vec::<String>::new());
        assert!(matches!(host.run_script("1"), Err(DialogError::Spawn(_))));
    }
}
