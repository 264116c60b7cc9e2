//! # Configuration
//!
//! The only real setting is the backend base address. Override hierarchy:
//! defaults → config file → env var → CLI flag.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover the options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Concrete values, no Options.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and returns
/// `ParleyConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# parley configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [server]
# base_url = "http://localhost:8000/api"   # Or set PARLEY_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Resolve the final config by collapsing: defaults → config file → env →
/// CLI. `cli_base_url` is the `--base-url` flag (None = not specified).
pub fn resolve(config: &ParleyConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // A trailing slash would double up against the "/init" paths.
    let base_url = base_url.trim_end_matches('/').to_string();

    ResolvedConfig { base_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ParleyConfig::default();
        assert!(config.server.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_default_when_empty() {
        let config = ParleyConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_config_value_overrides_default() {
        let config = ParleyConfig {
            server: ServerConfig {
                base_url: Some("http://10.0.0.5:8000/api".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ParleyConfig {
            server: ServerConfig {
                base_url: Some("http://config-host/api".to_string()),
            },
        };
        let resolved = resolve(&config, Some("http://cli-host/api"));
        assert_eq!(resolved.base_url, "http://cli-host/api");
    }

    #[test]
    fn test_resolve_strips_trailing_slash() {
        let config = ParleyConfig::default();
        let resolved = resolve(&config, Some("http://localhost:8000/api/"));
        assert_eq!(resolved.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: ParleyConfig = toml::from_str("").unwrap();
        assert!(config.server.base_url.is_none());

        let config: ParleyConfig = toml::from_str(
            r#"
[server]
base_url = "http://192.168.1.100:8000/api"
"#,
        )
        .unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://192.168.1.100:8000/api")
        );
    }
}
