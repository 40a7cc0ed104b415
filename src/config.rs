use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_KNOWLEDGE_DIR: &str = "knowledge";
const DEFAULT_DATA_DIR: &str = "data";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration shared by the ingestion CLI and the serving binaries.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding loose PDFs and the `contributions` folder.
    pub knowledge_dir: PathBuf,
    /// Output directory for `<id>.md` documents and the `accents.json` registry.
    pub data_dir: PathBuf,
    /// Directory with curated dialect vocabulary JSON files.
    pub dialects_dir: PathBuf,
    /// Raw `SERVER_PORT`; only the HTTP binary parses it.
    server_port: Option<String>,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, applying defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let knowledge_dir = optional("ACCENTS_KNOWLEDGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KNOWLEDGE_DIR));
        let data_dir = optional("ACCENTS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let dialects_dir = optional("ACCENTS_DIALECTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("dialects"));

        Self {
            knowledge_dir,
            data_dir,
            dialects_dir,
            server_port: optional("SERVER_PORT"),
        }
    }

    /// HTTP port override from `SERVER_PORT`, if set.
    pub fn server_port(&self) -> Result<Option<u16>, ConfigError> {
        self.server_port
            .as_deref()
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
            })
            .transpose()
    }
}

/// Load configuration from the environment, after applying any `.env` file.
///
/// Call after [`crate::logging::init_tracing`] so the resolved settings are logged.
pub fn init_config() -> Config {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    tracing::debug!(
        knowledge_dir = %config.knowledge_dir.display(),
        data_dir = %config.data_dir.display(),
        dialects_dir = %config.dialects_dir.display(),
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    config
}
