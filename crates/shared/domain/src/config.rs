use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub iam: IamConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Permission-group dataset settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IamConfig {
    /// Definitions document to load at start-up and on reload.
    pub definitions: PathBuf,
    /// Module identifiers accepted in `AccessLevels` in addition to the built-in registry.
    pub extra_modules: Vec<String>,
}

/// Logging settings consumed by the logger bootstrap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file prefix and subscriber name.
    pub name: String,
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; file logging is off when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
    /// Extra `EnvFilter` directives, e.g. `ccentral_iam=debug`.
    pub filter: Option<String>,
}

// --- Default ---

impl Default for IamConfig {
    fn default() -> Self {
        Self { definitions: PathBuf::from("permission_groups.json"), extra_modules: Vec::new() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "ccentral".to_owned(),
            level: "info".to_owned(),
            console: true,
            directory: None,
            json: false,
            max_files: 10,
            filter: None,
        }
    }
}
