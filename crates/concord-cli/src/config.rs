//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use concord_llm::ollama::DEFAULT_MODEL;
use concord_orchestrator::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// The pipeline sections sit at the top level of the file, next to the
/// CLI's own `[settings]` and `[ollama]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pipeline configuration
    #[serde(flatten)]
    pub pipeline: PipelineConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Language model connection
    #[serde(default)]
    pub ollama: OllamaSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Ollama connection settings.
///
/// Without a `url` the pipeline runs fully offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaSettings {
    /// Endpoint, e.g. `http://localhost:11434`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Generation model
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model; hashing embeddings are used without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,

    /// Output dimension of the embedding model
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".concord").join("concord.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path falls back to the
    /// defaults when no file has been written yet.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::load_from(&path)
    }

    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the pipeline sections.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate().map_err(CliError::Config)?;
        if self.ollama.embedding_dimension == 0 {
            return Err(CliError::Config(
                "[ollama] embedding_dimension must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a file, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            url: None,
            model: default_model(),
            embedding_model: None,
            embedding_dimension: default_embedding_dimension(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_embedding_dimension() -> usize {
    768
}
