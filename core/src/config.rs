use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ManifestError, Result};

/// Environment variable overriding the tool binary.
pub const TOOL_ENV_VAR: &str = "CMANIFEST_TOOL";

/// Default container tool.
pub const DEFAULT_TOOL: &str = "podman";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Container tool invocation settings
    pub tool: ToolConfig,

    /// Log level
    pub log_level: LogLevel,
}

impl ManifestConfig {
    /// Default config file location (~/.cmanifest/config.yaml).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".cmanifest"))
            .unwrap_or_else(|| PathBuf::from(".cmanifest"))
            .join("config.yaml")
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ManifestError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist; the default path is optional.
    /// `CMANIFEST_TOOL` overrides the file's tool binary.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(tool) = std::env::var(TOOL_ENV_VAR) {
            config.apply_tool_override(&tool);
        }

        Ok(config)
    }

    /// Replace the tool binary if the override is non-empty.
    pub fn apply_tool_override(&mut self, tool: &str) {
        let tool = tool.trim();
        if !tool.is_empty() {
            tracing::debug!(tool, "Overriding container tool");
            self.tool.binary = tool.to_string();
        }
    }
}

/// Container tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Binary name or path (podman, or a compatible wrapper)
    pub binary: String,

    /// Arguments prepended to every invocation (e.g. `--storage-driver vfs`)
    pub global_args: Vec<String>,

    /// Extra environment variables for the tool process
    pub env: HashMap<String, String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TOOL.to_string(),
            global_args: Vec::new(),
            env: HashMap::new(),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string for an `EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
