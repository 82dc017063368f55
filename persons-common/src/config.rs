//! Configuration loading and CSV source resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default HTTP port for the persons service
pub const DEFAULT_PORT: u16 = 5780;

/// Default CSV source file, relative to the working directory
pub const DEFAULT_CSV_FILE: &str = "persons.csv";

/// Environment variable overriding the CSV source file
pub const ENV_CSV_FILE: &str = "PERSONS_CSV_FILE";

/// Environment variable overriding the HTTP port
pub const ENV_PORT: &str = "PERSONS_PORT";

/// Optional settings from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub csv_file: Option<PathBuf>,
    pub port: Option<u16>,
}

/// Resolve the CSV source file following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_csv_file(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_CSV_FILE) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = load_config().csv_file {
        return path;
    }

    // Priority 4: Compiled default
    PathBuf::from(DEFAULT_CSV_FILE)
}

/// Resolve the HTTP port following the same priority order as
/// [`resolve_csv_file`]. An unparseable environment value is skipped
/// with a warning rather than aborting startup.
pub fn resolve_port(cli_arg: Option<u16>) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }

    if let Ok(value) = std::env::var(ENV_PORT) {
        match value.parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring unparseable {} value: {}", ENV_PORT, value),
        }
    }

    if let Some(port) = load_config().port {
        return port;
    }

    DEFAULT_PORT
}

/// Parse a config file into [`TomlConfig`]
pub fn read_config(path: &Path) -> Result<TomlConfig> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Load the platform config file, degrading to defaults when it is
/// missing or invalid. A missing config file never aborts startup.
fn load_config() -> TomlConfig {
    let Some(path) = config_file_path() else {
        return TomlConfig::default();
    };
    if !path.exists() {
        return TomlConfig::default();
    }

    match read_config(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using defaults: {}", e);
            TomlConfig::default()
        }
    }
}

/// Platform config file location: `<config dir>/persons-api/config.toml`
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("persons-api").join("config.toml"))
}
