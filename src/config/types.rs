use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Errors that make a component unusable until its configuration is fixed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No OMDb key in `omdb.api_key` or the `OMDB_API_KEY` environment variable.
    #[error("OMDb API key not found (set OMDB_API_KEY or omdb.api_key)")]
    MissingApiKey,

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub omdb: OmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file holding users and movies
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("popcorn.sqlite")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    /// API key; `OMDB_API_KEY` from the environment takes precedence
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_omdb_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_omdb_timeout")]
    pub timeout_secs: u64,
}

fn default_omdb_url() -> String {
    "http://www.omdbapi.com/".to_string()
}
fn default_omdb_timeout() -> u64 {
    10
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_omdb_url(),
            timeout_secs: default_omdb_timeout(),
        }
    }
}

impl std::fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
