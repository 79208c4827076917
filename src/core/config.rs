//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.plu/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::store::{DEFAULT_CODE_FILE, DEFAULT_NAME_FILE};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PluConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub custom_data: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub code_file: Option<String>,
    pub name_file: Option<String>,
}

/// Settings that only come from the command line.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    /// Forces read-only mode regardless of config or platform.
    pub ephemeral: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "plu.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Custom catalogs need a writable working folder, which desktop targets
/// have and mobile ones do not.
pub fn platform_supports_custom_data() -> bool {
    cfg!(any(target_os = "windows", target_os = "macos", target_os = "linux"))
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub custom_data: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub code_path: PathBuf,
    pub name_path: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

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

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.plu/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".plu").join("config.toml"))
}

/// Load config from `path`, or `~/.plu/config.toml` when `path` is None.
///
/// A missing default config is generated (commented out) and treated as
/// empty. A missing explicit path is an error. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<PluConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(PluConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(PluConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PluConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# PLU Lookup Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# custom_data = true          # Or PLU_CUSTOM_DATA; false = read-only defaults
# log_level = "info"          # Or PLU_LOG_LEVEL: "off", "error", "warn", "info", "debug", "trace"
# log_file = "plu.log"

# [storage]
# data_dir = "."              # Or PLU_DATA_DIR / --data-dir
# code_file = "codeToName.json"
# name_file = "nameToCode.json"
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

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PluConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Custom data: CLI can only switch it off → env → config → platform
    let custom_data = !cli.ephemeral
        && std::env::var("PLU_CUSTOM_DATA")
            .ok()
            .and_then(|v| parse_flag(&v))
            .or(config.general.custom_data)
            .unwrap_or_else(platform_supports_custom_data);

    // Log level: env → config → default
    let log_level = std::env::var("PLU_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level '{level}', using {DEFAULT_LOG_LEVEL}");
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = PathBuf::from(
        config
            .general
            .log_file
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILE),
    );

    // Data dir: CLI → env → config → current directory
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("PLU_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.storage.data_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let code_file = config
        .storage
        .code_file
        .as_deref()
        .unwrap_or(DEFAULT_CODE_FILE);
    let name_file = config
        .storage
        .name_file
        .as_deref()
        .unwrap_or(DEFAULT_NAME_FILE);

    ResolvedConfig {
        custom_data,
        log_level,
        log_file,
        code_path: data_dir.join(code_file),
        name_path: data_dir.join(name_file),
    }
}

/// Accepts the usual spellings of a boolean env var.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("Ignoring unrecognized PLU_CUSTOM_DATA value '{other}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sparse() {
        let config = PluConfig::default();
        assert!(config.general.custom_data.is_none());
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&PluConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.custom_data, platform_supports_custom_data());
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from("plu.log"));
        assert_eq!(resolved.code_path, Path::new(".").join("codeToName.json"));
        assert_eq!(resolved.name_path, Path::new(".").join("nameToCode.json"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PluConfig {
            general: GeneralConfig {
                custom_data: Some(false),
                log_level: Some("debug".to_string()),
                log_file: Some("lookup.log".to_string()),
            },
            storage: StorageConfig {
                data_dir: Some("/srv/plu".to_string()),
                code_file: Some("codes.json".to_string()),
                name_file: Some("names.json".to_string()),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert!(!resolved.custom_data);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("lookup.log"));
        assert_eq!(resolved.code_path, Path::new("/srv/plu").join("codes.json"));
        assert_eq!(resolved.name_path, Path::new("/srv/plu").join("names.json"));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = PluConfig {
            general: GeneralConfig {
                custom_data: Some(true),
                ..Default::default()
            },
            storage: StorageConfig {
                data_dir: Some("/from/config".to_string()),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            data_dir: Some(PathBuf::from("/from/cli")),
            ephemeral: true,
        };
        let resolved = resolve(&config, &cli);
        assert!(!resolved.custom_data);
        assert_eq!(
            resolved.code_path,
            Path::new("/from/cli").join("codeToName.json")
        );
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = PluConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
custom_data = false
log_level = "warn"

[storage]
data_dir = "~/produce"
code_file = "codes.json"
"#;
        let config: PluConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.custom_data, Some(false));
        assert_eq!(config.general.log_level.as_deref(), Some("warn"));
        assert_eq!(config.storage.data_dir.as_deref(), Some("~/produce"));
        assert_eq!(config.storage.code_file.as_deref(), Some("codes.json"));
        assert!(config.storage.name_file.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[storage]
data_dir = "data"
"#;
        let config: PluConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.data_dir.as_deref(), Some("data"));
        assert!(config.general.custom_data.is_none());
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\ncustom_data = true\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.general.custom_data, Some(true));
    }

    #[test]
    fn test_load_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ncustom_data = ").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_config_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_flag_spellings() {
        assert_eq!(parse_flag(" Yes "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
