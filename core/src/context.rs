use std::path::{Path, PathBuf};

use crate::config::{JsonFile, JsonFileOptions, DEFAULT_LOG_LEVEL, LOG_LEVEL_KEY};
use crate::error::{ConfigError, WorkflowError};
use crate::info::WorkflowInfo;
use crate::logging::{LogHandle, LogLevel, LOG_FILE_NAME};
use crate::services::Services;

/// Everything a handler may touch, initialised once per process.
#[derive(Debug)]
pub struct WorkflowContext {
    info: WorkflowInfo,
    config: JsonFile,
    services: Services,
    log: Option<LogHandle>,
    config_error: Option<ConfigError>,
}

impl WorkflowContext {
    /// Prepare the workflow's directories and open its configuration.
    ///
    /// With `recover_config` a corrupt configuration file is replaced by an
    /// empty store; otherwise the error is returned. A recovered error is
    /// logged again by [`WorkflowContext::attach_logging`].
    pub fn load(info: WorkflowInfo, recover_config: bool) -> Result<Self, WorkflowError> {
        ensure_dir_writable(info.data_dir())?;
        ensure_dir_writable(info.cache_dir())?;

        let config_path = info.config_file();
        let (config, config_error) =
            match JsonFile::open(&config_path, JsonFileOptions::default()) {
                Ok(cfg) => (cfg, None),
                Err(err) if recover_config => {
                    log_config_error(&config_path, &err);
                    (JsonFile::empty(config_path), Some(err))
                }
                Err(err) => return Err(err.into()),
            };

        Ok(Self {
            info,
            config,
            services: Services::default(),
            log: None,
            config_error,
        })
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    /// Install `handle` and report a configuration error recovered during
    /// [`WorkflowContext::load`], which ran before any subscriber existed.
    pub fn attach_logging(&mut self, handle: LogHandle) {
        self.log = Some(handle);
        if let Some(err) = &self.config_error {
            log_config_error(&self.info.config_file(), err);
        }
    }

    /// The configuration error replaced by an empty store at load time.
    pub fn take_config_error(&mut self) -> Option<ConfigError> {
        self.config_error.take()
    }

    pub fn info(&self) -> &WorkflowInfo {
        &self.info
    }

    pub fn bundle_id(&self) -> &str {
        self.info.bundle_id()
    }

    pub fn data_dir(&self) -> &Path {
        self.info.data_dir()
    }

    pub fn cache_dir(&self) -> &Path {
        self.info.cache_dir()
    }

    pub fn log_file(&self) -> PathBuf {
        self.info.cache_dir().join(LOG_FILE_NAME)
    }

    pub fn config(&self) -> &JsonFile {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut JsonFile {
        &mut self.config
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Configured log level; unknown values fall back to the default.
    pub fn log_level(&self) -> LogLevel {
        let raw = self.config.get_str(LOG_LEVEL_KEY, DEFAULT_LOG_LEVEL);
        raw.parse().unwrap_or_else(|e| {
            tracing::warn!(target: "alfred.context", error = %e, "falling back to default log level");
            default_log_level()
        })
    }

    /// Persist `level` and apply it to the running subscriber.
    pub fn set_log_level(&mut self, level: LogLevel) -> Result<(), WorkflowError> {
        self.config.set(LOG_LEVEL_KEY, level.as_str())?;
        if let Some(handle) = &self.log {
            handle.set_level(level)?;
        }
        tracing::info!(target: "alfred.context", level = %level, "log level changed");
        Ok(())
    }
}

fn log_config_error(path: &Path, err: &ConfigError) {
    tracing::error!(
        target: "alfred.context",
        path = %path.display(),
        error = %err,
        "error loading config file, starting with an empty configuration"
    );
}

fn default_log_level() -> LogLevel {
    DEFAULT_LOG_LEVEL.parse().unwrap_or(LogLevel::Debug)
}

fn ensure_dir_writable(path: &Path) -> Result<(), WorkflowError> {
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|source| WorkflowError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    // Probe with a real file; permission bits alone miss ACLs and read-only mounts.
    tempfile::tempfile_in(path).map_err(|_| WorkflowError::NotWritable(path.to_path_buf()))?;
    Ok(())
}
