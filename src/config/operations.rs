//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{HostError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use std::time::Duration;

/// Environment variable that replaces the configured interpreter.
pub const INTERPRETER_ENV: &str = "PROGHOST_INTERPRETER";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(HostError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            HostError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective configuration.
    ///
    /// Reads `path` when given (defaults otherwise), then applies environment
    /// overrides and validates the result.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| HostError::ConfigError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| HostError::ConfigError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Replace values with their environment overrides, when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(interpreter) = std::env::var(INTERPRETER_ENV)
            && !interpreter.trim().is_empty()
        {
            self.interpreter = interpreter;
        }
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - both timeouts must be positive
    /// - `interpreter` must split into at least one word
    /// - every `ignore_globs` entry must compile
    pub fn validate(&self) -> Result<()> {
        if self.inspect_timeout_secs == 0 {
            return Err(HostError::ConfigError(
                "inspect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.execute_timeout_secs == 0 {
            return Err(HostError::ConfigError(
                "execute_timeout_secs must be greater than 0".to_string(),
            ));
        }

        self.interpreter_command()?;
        self.ignore_globset()?;

        for name in &self.ignore_dirs {
            if name.is_empty() {
                return Err(HostError::ConfigError(
                    "ignore_dirs entries must be non-empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Split the interpreter setting into program and leading arguments.
    pub fn interpreter_command(&self) -> Result<Vec<String>> {
        let words = shell_words::split(&self.interpreter).map_err(|e| {
            HostError::ConfigError(format!(
                "failed to parse interpreter '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.interpreter, e
            ))
        })?;

        if words.is_empty() {
            return Err(HostError::ConfigError(
                "interpreter must not be empty".to_string(),
            ));
        }

        Ok(words)
    }

    /// Compile `ignore_globs` into a matcher for directory names.
    pub fn ignore_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_globs {
            let glob = Glob::new(pattern).map_err(|e| {
                HostError::ConfigError(format!("invalid ignore glob '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| HostError::ConfigError(format!("failed to build ignore globs: {}", e)))
    }

    pub fn inspect_timeout(&self) -> Duration {
        Duration::from_secs(self.inspect_timeout_secs)
    }

    pub fn execute_timeout(&self) -> Duration {
        Duration::from_secs(self.execute_timeout_secs)
    }
}
