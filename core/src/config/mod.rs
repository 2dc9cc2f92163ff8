mod json_file;

pub use json_file::{JsonFile, JsonFileOptions};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_LEVEL_KEY: &str = "loglevel";
pub const DEFAULT_LOG_LEVEL: &str = "DEBUG";
