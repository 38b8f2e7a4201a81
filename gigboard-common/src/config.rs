//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Default TCP port for the web service
pub const DEFAULT_PORT: u16 = 5780;

/// Environment variable overriding the data folder
pub const DATA_ENV_VAR: &str = "GIGBOARD_DATA";

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `GIGBOARD_DATA` environment variable
/// 3. `data_folder` key in the TOML config file
/// 4. OS-dependent default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    default_data_folder()
}

/// Path of the SQLite database inside the data folder
pub fn database_path(data_folder: &Path) -> PathBuf {
    data_folder.join("gigboard.db")
}

/// Create the data folder if it does not exist yet
pub fn ensure_data_folder(data_folder: &Path) -> Result<()> {
    std::fs::create_dir_all(data_folder)?;
    Ok(())
}

/// Locate the platform config file (`<config dir>/gigboard/config.toml`)
fn config_file_path() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("gigboard").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gigboard"))
        .unwrap_or_else(|| PathBuf::from("./gigboard_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let folder = resolve_data_folder(Some(Path::new("/tmp/gigboard-test")));
        assert_eq!(folder, PathBuf::from("/tmp/gigboard-test"));
    }

    #[test]
    fn test_database_path_is_inside_data_folder() {
        let db = database_path(Path::new("/var/lib/gigboard"));
        assert_eq!(db, PathBuf::from("/var/lib/gigboard/gigboard.db"));
    }

    #[test]
    fn test_ensure_data_folder_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_data_folder(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
