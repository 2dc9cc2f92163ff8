//! Generic passwords in the macOS keychain via the `security` tool.

use std::process::{Command, Output};
use std::sync::OnceLock;

use alfred_core::api::{Credential, CredentialError, CredentialStore};
use regex::Regex;

pub const DEFAULT_SERVICE: &str = "alfred-workflow";

pub struct SecurityKeychain {
    service: String,
    program: String,
}

impl SecurityKeychain {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            program: "security".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, account: &str, args: &[&str]) -> Result<Output, CredentialError> {
        tracing::debug!(target: "alfred.keychain", command = args.first().copied().unwrap_or(""), account, service = %self.service, "running security");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(CredentialError::Spawn)?;
        Ok(output)
    }
}

impl Default for SecurityKeychain {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl CredentialStore for SecurityKeychain {
    fn service(&self) -> &str {
        &self.service
    }

    fn get(&self, account: &str) -> Result<Option<Credential>, CredentialError> {
        let output = self.run(
            account,
            &["find-generic-password", "-g", "-a", account, "-s", &self.service],
        )?;
        if !output.status.success() {
            // Exit status 44 is "item not found"; any failure reads as absent.
            return Ok(None);
        }
        // `-g` prints the password on stderr and the attributes on stdout.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(Some(parse_item(&text)))
    }

    /// The password travels as a `-w` argument, so it is briefly visible to
    /// other local users in the process list while `security` runs.
    fn set(
        &self,
        account: &str,
        password: &str,
        comment: Option<&str>,
    ) -> Result<(), CredentialError> {
        let label = format!("{}.{}", self.service, account);
        let args = add_args(&self.service, account, password, &label, comment);
        let output = self.run(account, &args)?;
        check(account, &output)
    }

    fn delete(&self, account: &str) -> Result<(), CredentialError> {
        let output = self.run(
            account,
            &["delete-generic-password", "-a", account, "-s", &self.service],
        )?;
        check(account, &output)
    }
}

fn add_args<'a>(
    service: &'a str,
    account: &'a str,
    password: &'a str,
    label: &'a str,
    comment: Option<&'a str>,
) -> Vec<&'a str> {
    let mut args = vec![
        "add-generic-password",
        "-a",
        account,
        "-s",
        service,
        "-U",
        "-l",
        label,
    ];
    if let Some(c) = comment {
        args.extend(["-j", c]);
    }
    args.extend(["-w", password]);
    args
}

fn check(account: &str, output: &Output) -> Result<(), CredentialError> {
    if output.status.success() {
        return Ok(());
    }
    Err(CredentialError::Command {
        account: account.to_string(),
        message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

fn attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s+"(\w{4})"<[^>]*>=(.*)$"#).expect("static regex"))
}

/// Parse the human readable dump printed by `security find-generic-password -g`.
pub fn parse_item(text: &str) -> Credential {
    let mut item = Credential {
        service: None,
        account: None,
        comment: None,
        password: None,
    };

    for line in text.lines() {
        if let Some(pass) = line.strip_prefix("password: ") {
            item.password = Some(pass.trim().trim_matches('"').to_string());
            continue;
        }
        let Some(cap) = attribute_re().captures(line) else {
            continue;
        };
        let value = cap[2].trim();
        if value == "<NULL>" {
            continue;
        }
        let value = Some(value.trim_matches('"').to_string());
        match &cap[1] {
            "svce" => item.service = value,
            "acct" => item.account = value,
            "icmt" => item.comment = value,
            _ => {}
        }
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DUMP: &str = r#"keychain: "/Users/me/Library/Keychains/login.keychain-db"
version: 512
class: "genp"
attributes:
    0x00000007 <blob>="alfred-workflow.me@example.com"
    0x00000008 <blob>=<NULL>
    "acct"<blob>="me@example.com"
    "cdat"<timedate>=0x32303134303130313030303030305A00  "20140101000000Z\000"
    "icmt"<blob>=<NULL>
    "svce"<blob>="alfred-workflow"
password: "s3cret"
"#;

    #[test]
    fn parses_security_dump() {
        let item = parse_item(DUMP);
        assert_eq!(
            item,
            Credential {
                service: Some("alfred-workflow".into()),
                account: Some("me@example.com".into()),
                comment: None,
                password: Some("s3cret".into()),
            }
        );
    }

    #[test]
    fn comment_is_read_when_present() {
        let item = parse_item("    \"icmt\"<blob>=\"token for api\"\n");
        assert_eq!(item.comment.as_deref(), Some("token for api"));
        assert_eq!(item.password, None);
    }

    #[test]
    fn add_updates_in_place_with_password_last() {
        let args = add_args("svc", "me", "pw", "svc.me", Some("note"));
        assert_eq!(
            args,
            vec![
                "add-generic-password",
                "-a",
                "me",
                "-s",
                "svc",
                "-U",
                "-l",
                "svc.me",
                "-j",
                "note",
                "-w",
                "pw"
            ]
        );
        assert!(!add_args("svc", "me", "pw", "svc.me", None).contains(&"-j"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_lookup_reads_as_absent() {
        let store = SecurityKeychain::default().with_program("false");
        assert_eq!(store.get("nobody").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn failing_delete_is_an_error() {
        let store = SecurityKeychain::default().with_program("false");
        assert!(matches!(
            store.delete("nobody"),
            Err(CredentialError::Command { .. })
        ));
    }
}
