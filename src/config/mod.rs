mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable holding the OMDb API key.
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./popcorn.toml",
        "./config.toml",
        "~/.config/popcorn/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env(&mut config);
    Ok(config)
}

/// Fill in settings that come from the process environment.
pub fn apply_env(config: &mut Config) {
    apply_env_from(config, |key| std::env::var(key).ok());
}

fn apply_env_from(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(key) = var(OMDB_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.omdb.api_key = Some(key);
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.omdb.timeout_secs == 0 {
        anyhow::bail!("OMDb timeout must be at least one second");
    }

    if config.omdb.base_url.trim().is_empty() {
        anyhow::bail!("OMDb base URL cannot be empty");
    }

    Ok(())
}
