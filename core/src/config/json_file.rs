use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct JsonFileOptions {
    /// Data used when the file does not exist yet. Written out immediately
    /// when non-empty.
    pub default_data: Option<Map<String, Value>>,
    /// Start from an empty store instead of failing on a corrupt file.
    pub ignore_errors: bool,
    /// Comment lines written above the JSON body as `// <line>`.
    pub header: Vec<String>,
}

/// A JSON object persisted to disk after every mutation.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    data: Map<String, Value>,
    header: Vec<String>,
}

impl JsonFile {
    pub fn open(path: impl Into<PathBuf>, opts: JsonFileOptions) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut file = Self {
            path,
            data: Map::new(),
            header: opts.header,
        };

        if file.path.exists() {
            match read_data(&file.path) {
                Ok(data) => file.data = data,
                Err(err @ (ConfigError::Corrupt { .. } | ConfigError::NotAnObject { .. }))
                    if opts.ignore_errors =>
                {
                    tracing::warn!(
                        target: "alfred.config",
                        path = %file.path.display(),
                        error = %err,
                        "ignoring corrupt json file"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        target: "alfred.config",
                        path = %file.path.display(),
                        "corrupt json file"
                    );
                    return Err(err);
                }
            }
        } else if let Some(defaults) = opts.default_data.filter(|d| !d.is_empty()) {
            file.data = defaults;
            file.save()?;
        }

        Ok(file)
    }

    /// An empty store that will be written to `path` on first mutation,
    /// replacing whatever is there.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Map::new(),
            header: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn set_header(&mut self, header: &str) -> Result<(), ConfigError> {
        self.header = header.lines().map(str::to_string).collect();
        self.save()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.data.get(key).cloned().unwrap_or(default)
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.data.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.data.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.data.insert(key.into(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, ConfigError> {
        let old = self.data.remove(key);
        if old.is_some() {
            self.save()?;
        }
        Ok(old)
    }

    pub fn clear(&mut self) -> Result<(), ConfigError> {
        self.data.clear();
        self.save()
    }

    fn render(&self) -> Result<String, ConfigError> {
        let mut out = String::new();
        for line in &self.header {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&serde_json::to_string_pretty(&self.data)?);
        Ok(out)
    }

    fn save(&self) -> Result<(), ConfigError> {
        let body = self.render()?;
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(target: "alfred.config", path = %self.path.display(), keys = self.data.len(), "saved json file");
        Ok(())
    }
}

fn read_data(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let body: String = raw
        .lines()
        .filter(|l| !l.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");

    if body.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ConfigError::Corrupt {
            path: path.to_path_buf(),
            source,
        }),
    }
}
