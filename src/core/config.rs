//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tarefa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The log file and level are themselves configured here, so loading and
//! resolving run before the logger exists. Their messages are collected as
//! [`ConfigNote`]s and replayed with [`ConfigNote::log`] once it does.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::TASK_KEY;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TarefaConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// "file" or "memory"
    pub backend: Option<String>,
    pub dir: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "tarefa.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: Backend,
    /// Directory for the file backend. `None` if no home directory was found
    /// and nothing was configured.
    pub storage_dir: Option<PathBuf>,
    pub key: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub storage_dir: Option<PathBuf>,
    pub key: Option<String>,
    pub ephemeral: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

// ============================================================================
// Deferred Log Messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNote {
    pub level: Level,
    pub message: String,
}

impl ConfigNote {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Send to the logger.
    pub fn log(&self) {
        log::log!(self.level, "{}", self.message);
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.tarefa`.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tarefa"))
}

/// Returns the path to `~/.tarefa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tarefa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TarefaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut Vec<ConfigNote>) -> Result<TarefaConfig, ConfigError> {
    let Some(path) = config_path() else {
        notes.push(ConfigNote::new(
            Level::Warn,
            "Could not determine home directory, using default config",
        ));
        return Ok(TarefaConfig::default());
    };
    load_config_from(&path, notes)
}

pub fn load_config_from(
    path: &Path,
    notes: &mut Vec<ConfigNote>,
) -> Result<TarefaConfig, ConfigError> {
    if !path.exists() {
        notes.push(ConfigNote::new(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        ));
        if let Err(e) = generate_default_config(path) {
            notes.push(ConfigNote::new(
                Level::Warn,
                format!("Failed to write default config: {}", e),
            ));
        }
        return Ok(TarefaConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TarefaConfig = toml::from_str(&contents)?;
    notes.push(ConfigNote::new(
        Level::Info,
        format!("Loaded config from {}", path.display()),
    ));
    notes.push(ConfigNote::new(Level::Debug, format!("Config: {:?}", config)));
    Ok(config)
}

fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# tarefa configuration
# All settings are optional. Override hierarchy: defaults → this file → env vars → CLI flags.

# [storage]
# backend = "file"                 # "file" or "memory" (nothing survives a restart)
# dir = "/home/me/.tarefa/storage" # Or set TAREFA_STORAGE_DIR
# key = "task"                     # Or set TAREFA_KEY

# [logging]
# file = "tarefa.log"              # Or set TAREFA_LOG_FILE
# level = "debug"                  # off, error, warn, info, debug, trace
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &TarefaConfig,
    cli: &CliOverrides,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok(), notes)
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env(
    config: &TarefaConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig {
    // Backend: CLI flag → config → default
    let backend = if cli.ephemeral {
        Backend::Memory
    } else {
        match config.storage.backend.as_deref() {
            Some("memory") => Backend::Memory,
            Some("file") | None => Backend::File,
            Some(other) => {
                notes.push(ConfigNote::new(
                    Level::Warn,
                    format!("Unknown storage backend {:?}, using file", other),
                ));
                Backend::File
            }
        }
    };

    // Storage dir: CLI → env → config → ~/.tarefa/storage
    let storage_dir = cli
        .storage_dir
        .clone()
        .or_else(|| env("TAREFA_STORAGE_DIR").map(PathBuf::from))
        .or_else(|| config.storage.dir.as_ref().map(PathBuf::from))
        .or_else(|| home_dir().map(|d| d.join("storage")));

    // Key: CLI → env → config → "task"
    let key = cli
        .key
        .clone()
        .or_else(|| env("TAREFA_KEY"))
        .or_else(|| config.storage.key.clone())
        .unwrap_or_else(|| TASK_KEY.to_string());

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("TAREFA_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("TAREFA_LOG_LEVEL"))
        .or_else(|| config.logging.level.clone())
        .and_then(|s| parse_level(&s, notes))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        backend,
        storage_dir,
        key,
        log_file,
        log_level,
    }
}

fn parse_level(s: &str, notes: &mut Vec<ConfigNote>) -> Option<LevelFilter> {
    match s.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            notes.push(ConfigNote::new(
                Level::Warn,
                format!("Unknown log level {:?}, using default", s),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(
            &TarefaConfig::default(),
            &CliOverrides::default(),
            no_env,
            &mut Vec::new(),
        );
        assert_eq!(resolved.backend, Backend::File);
        assert_eq!(resolved.key, "task");
        assert_eq!(resolved.log_file, PathBuf::from("tarefa.log"));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TarefaConfig {
            storage: StorageConfig {
                backend: Some("memory".to_string()),
                dir: Some("/tmp/tarefa".to_string()),
                key: Some("tasks-v2".to_string()),
            },
            logging: LoggingConfig {
                file: Some("/tmp/t.log".to_string()),
                level: Some("warn".to_string()),
            },
        };
        let resolved =
            resolve_with_env(&config, &CliOverrides::default(), no_env, &mut Vec::new());
        assert_eq!(resolved.backend, Backend::Memory);
        assert_eq!(resolved.storage_dir, Some(PathBuf::from("/tmp/tarefa")));
        assert_eq!(resolved.key, "tasks-v2");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = TarefaConfig {
            storage: StorageConfig {
                key: Some("from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| (name == "TAREFA_KEY").then(|| "from-env".to_string());

        let resolved =
            resolve_with_env(&config, &CliOverrides::default(), env, &mut Vec::new());
        assert_eq!(resolved.key, "from-env");

        let cli = CliOverrides {
            key: Some("from-cli".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env, &mut Vec::new());
        assert_eq!(resolved.key, "from-cli");
    }

    #[test]
    fn test_ephemeral_flag_forces_memory() {
        let config = TarefaConfig {
            storage: StorageConfig {
                backend: Some("file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            ephemeral: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, no_env, &mut Vec::new());
        assert_eq!(resolved.backend, Backend::Memory);
    }

    #[test]
    fn test_bad_level_falls_back() {
        let cli = CliOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        let mut notes = Vec::new();
        let resolved = resolve_with_env(&TarefaConfig::default(), &cli, no_env, &mut notes);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, Level::Warn);
        assert!(notes[0].message.contains("loud"));
    }

    #[test]
    fn test_bad_backend_is_noted() {
        let config = TarefaConfig {
            storage: StorageConfig {
                backend: Some("cloud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut notes = Vec::new();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env, &mut notes);
        assert_eq!(resolved.backend, Backend::File);
        assert!(notes.iter().any(|n| n.level == Level::Warn && n.message.contains("cloud")));
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let mut notes = Vec::new();
        resolve_with_env(&TarefaConfig::default(), &CliOverrides::default(), no_env, &mut notes);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[storage]
key = "todo"
"#;
        let config: TarefaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.key.as_deref(), Some("todo"));
        assert!(config.storage.backend.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut notes = Vec::new();
        let config = load_config_from(&path, &mut notes).unwrap();
        assert!(config.storage.key.is_none());
        assert!(path.exists());
        assert!(notes.iter().any(|n| n.message.contains("generating default")));

        // The generated file is all comments, so it parses back to defaults
        let reparsed = load_config_from(&path, &mut Vec::new()).unwrap();
        assert!(reparsed.storage.backend.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage\nkey = ").unwrap();
        assert!(matches!(
            load_config_from(&path, &mut Vec::new()),
            Err(ConfigError::Parse(_))
        ));
    }
}
