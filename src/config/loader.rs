//! Configuration file discovery and loading.

use crate::config::schema::EnvGuardConfig;
use crate::error::{EnvGuardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".envguard";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Find the configuration by walking up from `start`.
///
/// Returns the path of the first `.envguard/config.yml` found, or None.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<EnvGuardConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvGuardError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvGuardError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse config content.
///
/// `path` is used for error reporting only.
pub fn parse_config(content: &str, path: &Path) -> Result<EnvGuardConfig> {
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(EnvGuardConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| EnvGuardError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the configuration for a project.
///
/// An explicit path wins; otherwise the config is discovered from
/// `project_root` upwards.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no config exists.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<(PathBuf, EnvGuardConfig)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_config(project_root).ok_or_else(|| EnvGuardError::ConfigNotFound {
            path: project_root.join(CONFIG_DIR).join(CONFIG_FILE),
        })?,
    };

    tracing::debug!("Loading config from {}", path.display());
    let config = load_config_file(&path)?;
    Ok((path, config))
}
