//! Locating and reading the TOML configuration file.
//!
//! An explicit `--config` path must exist. Without one, `erato/config.toml`
//! under the working directory wins over `config.toml` in the platform
//! configuration directory; when neither exists the defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use erato::{SieveError, config::AppConfig};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SieveError {
    fn from(err: ConfigError) -> Self {
        SieveError::Config(err.to_string())
    }
}

/// Implicit configuration locations, most specific first.
fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![Path::new("erato").join(CONFIG_FILE_NAME)];

    match ProjectDirs::from("com", "erato", "erato") {
        Some(dirs) => candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME)),
        None => debug!("No platform configuration directory"),
    }

    candidates
}

/// Load the configuration for this invocation.
///
/// # Errors
///
/// Returns [`SieveError::Config`] if `explicit_path` does not exist or the
/// chosen file is not valid TOML for [`AppConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SieveError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration");
        return load_config_file(path);
    }

    match candidate_paths().into_iter().find(|path| path.exists()) {
        Some(path) => {
            info!(path = path.display().to_string(); "Loading configuration");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn load_config_file(path: &Path) -> Result<AppConfig, SieveError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[animation]\nstep_delay_ms = 0\n\n[layout]\nmax_cell_size = 8\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.animation().step_delay(), Duration::ZERO);
        assert_eq!(config.layout().max_cell_size(), 8);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, SieveError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[animation\nstep_delay_ms = ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_local_directory_is_searched_first() {
        let candidates = candidate_paths();
        assert_eq!(candidates[0], Path::new("erato").join("config.toml"));
        assert!(candidates.iter().all(|path| path.ends_with(CONFIG_FILE_NAME)));
    }
}
