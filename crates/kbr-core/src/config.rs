// Configuration loading and parsing (config/client.toml + environment).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "KBR_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_LEAGUE_NAME: &str = "Brasileirão Fantasy";

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 20;
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 30;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub setup: SetupDefaults,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend API base, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Initial values of the setup screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SetupDefaults {
    pub league_name: String,
    pub teams: usize,
    pub rounds: u32,
}

impl Default for SetupDefaults {
    fn default() -> Self {
        SetupDefaults {
            league_name: DEFAULT_LEAGUE_NAME.to_string(),
            teams: 4,
            rounds: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where CSV exports are saved. Defaults to the user's download folder.
    pub dir: Option<PathBuf>,
}

impl ExportConfig {
    /// Resolve the export directory: configured dir, else the platform
    /// download dir, else `./exports`.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }
        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("exports"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/client.toml` under `base_dir` (optional;
/// defaults apply when it is missing), then apply `api_url_override`.
pub fn load_config_from(
    base_dir: &Path,
    api_url_override: Option<String>,
) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("client.toml");

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?
    } else {
        Config::default()
    };

    if let Some(url) = api_url_override.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory and honours `KBR_API_URL`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::ReadError {
        path: PathBuf::from("."),
        source,
    })?;
    load_config_from(&cwd, std::env::var(API_URL_ENV).ok())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.api.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got {url:?}"),
        });
    }

    if config.api.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.connect_timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let teams = config.setup.teams;
    if !(MIN_TEAMS..=MAX_TEAMS).contains(&teams) {
        return Err(ConfigError::ValidationError {
            field: "setup.teams".into(),
            message: format!("must be between {MIN_TEAMS} and {MAX_TEAMS}, got {teams}"),
        });
    }

    let rounds = config.setup.rounds;
    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
        return Err(ConfigError::ValidationError {
            field: "setup.rounds".into(),
            message: format!("must be between {MIN_ROUNDS} and {MAX_ROUNDS}, got {rounds}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
