// Configuration loading and parsing (app.toml, match.toml).
//
// `app.toml` holds infrastructure settings (service URL, backend mode);
// `match.toml` holds the sample loadout and duel pairing the console works
// with. Missing files are bootstrapped from `defaults/`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::client::DEFAULT_BASE_URL;
use crate::model::{DuelRequest, Loadout};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "CHESSRPG_API_URL";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub backend: BackendConfig,
    pub loadout: Loadout,
    pub duel: DuelConfig,
}

impl Config {
    /// Build the duel request from the configured pairing.
    ///
    /// Returns `None` if a pairing id does not name a loadout piece; that
    /// cannot happen for a validated config.
    pub fn duel_request(&self) -> Option<DuelRequest> {
        let find = |id: &str| self.loadout.pieces.iter().find(|p| p.id == id).cloned();
        Some(DuelRequest {
            a: find(&self.duel.a)?,
            b: find(&self.duel.b)?,
            rng_seed: self.duel.rng_seed,
        })
    }
}

// ---------------------------------------------------------------------------
// app.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for app.toml. Both sections may be omitted,
/// in which case the defaults below apply.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,
}

/// Which backend the console talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    #[default]
    Remote,
    Local,
}

// ---------------------------------------------------------------------------
// match.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for match.toml.
#[derive(Debug, Clone, Deserialize)]
struct MatchFile {
    loadout: Loadout,
    duel: DuelConfig,
}

/// The configured duel pairing: two loadout piece ids and an optional seed.
#[derive(Debug, Clone, Deserialize)]
pub struct DuelConfig {
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/app.toml` and
/// `config/match.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults or consult the environment. Prefer `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- app.toml (required) ---
    let app_path = config_dir.join("app.toml");
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    // --- match.toml (required) ---
    let match_path = config_dir.join("match.toml");
    let match_text = read_file(&match_path)?;
    let match_file: MatchFile =
        toml::from_str(&match_text).map_err(|e| ConfigError::ParseError {
            path: match_path.clone(),
            source: e,
        })?;

    let config = Config {
        api: app_file.api,
        backend: app_file.backend,
        loadout: match_file.loadout,
        duel: match_file.duel,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        // If config/ also doesn't exist, loading is going to fail anyway;
        // report the missing defaults directory with a clear message.
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, keep it.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, bootstrapping defaults and applying the `CHESSRPG_API_URL`
/// environment override.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    config.api.base_url = resolve_base_url(config.api.base_url, std::env::var(API_URL_ENV).ok());
    Ok(config)
}

/// Apply the environment override: a non-empty env value wins over the
/// configured URL.
pub(crate) fn resolve_base_url(configured: String, env_value: Option<String>) -> String {
    match env_value {
        Some(url) if !url.trim().is_empty() => url,
        _ => configured,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Schema-level checks only: stat bounds and referential integrity of the
/// duel pairing. The match *rules* (king count, budget) are deliberately
/// left to the backend so the console exercises the service's verdicts.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if !(0..=500).contains(&config.loadout.points_pool) {
        return Err(ConfigError::ValidationError {
            field: "loadout.points_pool".into(),
            message: format!("must be within 0..=500, got {}", config.loadout.points_pool),
        });
    }

    for (index, piece) in config.loadout.pieces.iter().enumerate() {
        if piece.id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("loadout.pieces[{index}].id"),
                message: "must not be empty".into(),
            });
        }
        if !(1..=500).contains(&piece.hp) {
            return Err(ConfigError::ValidationError {
                field: format!("loadout.pieces[{index}].hp"),
                message: format!("must be within 1..=500, got {}", piece.hp),
            });
        }
        let attributes: [(&str, i32); 3] =
            [("atk", piece.atk), ("defn", piece.defn), ("spd", piece.spd)];
        for (name, value) in attributes {
            if !(0..=200).contains(&value) {
                return Err(ConfigError::ValidationError {
                    field: format!("loadout.pieces[{index}].{name}"),
                    message: format!("must be within 0..=200, got {value}"),
                });
            }
        }
        if config.loadout.pieces[..index].iter().any(|p| p.id == piece.id) {
            return Err(ConfigError::ValidationError {
                field: format!("loadout.pieces[{index}].id"),
                message: format!("duplicate piece id `{}`", piece.id),
            });
        }
    }

    for (field, id) in [("duel.a", &config.duel.a), ("duel.b", &config.duel.b)] {
        if !config.loadout.pieces.iter().any(|p| &p.id == id) {
            return Err(ConfigError::ValidationError {
                field: field.into(),
                message: format!("`{id}` does not name a loadout piece"),
            });
        }
    }
    if config.duel.a == config.duel.b {
        return Err(ConfigError::ValidationError {
            field: "duel.b".into(),
            message: "duel pieces must be distinct".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
