//! Layered configuration: built-in defaults, an optional TOML file, the
//! process environment, then command-line overrides applied by the caller.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::search::EmbedderConfig;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DOCUMENTS_DIR_VAR: &str = "FINRAG_DOCUMENTS_DIR";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY not found in environment variables")]
    MissingApiKey,

    #[error("invalid chunking: chunk_size={chunk_size}, overlap={overlap} (need 0 <= overlap < chunk_size)")]
    InvalidChunking { chunk_size: usize, overlap: usize },

    #[error("unknown embedding model '{0}'")]
    UnknownEmbeddingModel(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub documents_dir: PathBuf,
    pub chunking: ChunkingConfig,
    pub search: SearchOptionsConfig,
    pub embedder: EmbedderConfig,
    pub generation: GenerationConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("documents"),
            chunking: ChunkingConfig::default(),
            search: SearchOptionsConfig::default(),
            embedder: EmbedderConfig::default(),
            generation: GenerationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            overlap: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptionsConfig {
    pub top_k: usize,
}

impl Default for SearchOptionsConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    /// Only ever taken from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
            max_retries: 2,
            backoff_base_ms: 500,
            api_key: None,
        }
    }
}

impl GenerationConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub default: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then the TOML file if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR) {
            self.generation.api_key = Some(key);
        }
        if let Some(dir) = lookup(DOCUMENTS_DIR_VAR) {
            self.documents_dir = PathBuf::from(dir);
        }
        if let Some(model) = lookup(MODEL_VAR) {
            self.generation.model = model;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.documents_dir, PathBuf::from("documents"));
        assert_eq!(config.chunking.chunk_size, 1500);
        assert_eq!(config.chunking.overlap, 100);
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.max_retries, 2);
        assert!(config.generation.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env(env(&[
            (API_KEY_VAR, "secret"),
            (DOCUMENTS_DIR_VAR, "/tmp/pdfs"),
            (MODEL_VAR, "gemini-2.0-flash"),
        ]));

        assert_eq!(config.generation.require_api_key().unwrap(), "secret");
        assert_eq!(config.documents_dir, PathBuf::from("/tmp/pdfs"));
        assert_eq!(config.generation.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_missing_api_key() {
        let config = Config::default().with_env(env(&[]));
        assert!(matches!(
            config.generation.require_api_key(),
            Err(ConfigError::MissingApiKey)
        ));

        let blank = Config::default().with_env(env(&[(API_KEY_VAR, "  ")]));
        assert!(blank.generation.require_api_key().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finrag.toml");
        fs::write(
            &path,
            "documents_dir = \"statements\"\n\n[chunking]\nchunk_size = 800\n\n[search]\ntop_k = 5\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.documents_dir, PathBuf::from("statements"));
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.overlap, 100);
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_api_key_not_read_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finrag.toml");
        fs::write(&path, "[generation]\napi_key = \"leaked\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.generation.api_key.is_none());
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "chunking = 3").unwrap();
        assert!(matches!(
            Config::from_file(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }
}
