use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use regex::Regex;
use tempfile::TempDir;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>bundleid</key>
	<string>com.example.cli</string>
	<key>name</key>
	<string>CLI Test</string>
</dict>
</plist>
"#;

fn workflow_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("info.plist"), INFO_PLIST).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_alfred"))
        .args(args)
        .env("ALFRED_WORKFLOW_DIR", dir)
        .env("ALFRED_DATA_DIR", dir.join("data"))
        .env("ALFRED_CACHE_DIR", dir.join("cache"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn alfred(dir: &Path, args: &[&str]) -> String {
    String::from_utf8(run(dir, args).stdout).unwrap()
}

fn titles(xml: &str) -> Vec<String> {
    let re = Regex::new(r"<title>(.*?)</title>").unwrap();
    re.captures_iter(xml).map(|c| c[1].to_string()).collect()
}

#[test]
fn tell_settings_prints_feedback() {
    let dir = workflow_dir();
    let xml = alfred(dir.path(), &["tell", "settings"]);
    assert!(xml.starts_with(r#"<?xml version="1.0"?><items>"#), "{xml}");
    assert_eq!(titles(&xml), vec!["loglevel", "show-log", "reset"]);

    let xml = alfred(dir.path(), &["tell", "settings", "loglevel in"]);
    assert_eq!(titles(&xml), vec!["INFO"]);
}

#[test]
fn do_settings_persists_level() {
    let dir = workflow_dir();
    let out = alfred(dir.path(), &["do", "settings", "loglevel:INFO"]);
    assert_eq!(out, "Log level set to INFO");

    let config = std::fs::read_to_string(dir.path().join("data").join("config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(value["loglevel"], "INFO");
    assert!(dir.path().join("cache").join("workflow.log").exists());
}

#[test]
fn unknown_actions_are_reported_not_fatal() {
    let dir = workflow_dir();
    let xml = alfred(dir.path(), &["tell", "nope"]);
    assert_eq!(titles(&xml), vec!["Invalid action &quot;nope&quot;"]);

    let out = alfred(dir.path(), &["do", "nope", "x"]);
    assert_eq!(out, "Invalid command \"nope\"");
}

#[test]
fn do_takes_modifier_as_third_argument() {
    let dir = workflow_dir();
    let out = alfred(dir.path(), &["do", "settings", "loglevel:INFO", "cmd"]);
    assert_eq!(out, "Log level set to INFO");
}

#[test]
fn corrupt_config_is_recovered_and_logged() {
    let dir = workflow_dir();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("config.json"), "{{{").unwrap();

    let output = run(dir.path(), &["tell", "settings"]);
    let xml = String::from_utf8(output.stdout).unwrap();
    assert_eq!(titles(&xml), vec!["loglevel", "show-log", "reset"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error loading config file"), "{stderr}");
    let log = std::fs::read_to_string(dir.path().join("cache").join("workflow.log")).unwrap();
    assert!(log.contains("error loading config file"), "{log}");
}
