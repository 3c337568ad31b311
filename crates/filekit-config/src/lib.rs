#![doc = include_str!("../README.md")]

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "filekit.toml";

const DEFAULT_ENCODING: &str = "utf-8";

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

/// Settings threaded through every filekit I/O operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Log writes, copies and deletes but leave the filesystem untouched.
    #[serde(default)]
    pub no_write: bool,

    /// Skip the working-directory safety checks on delete.
    #[serde(default)]
    pub force: bool,

    /// Default encoding label for text reads and writes.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Keep a leading byte-order mark when decoding text.
    #[serde(default)]
    pub preserve_bom: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            no_write: false,
            force: false,
            encoding: default_encoding(),
            preserve_bom: false,
        }
    }
}

/// Failure to load `filekit.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(filekit::config_read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    #[diagnostic(code(filekit::config_parse), help("check the keys and value types in filekit.toml"))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot determine the current directory")]
    #[diagnostic(code(filekit::current_dir))]
    CurrentDir(#[source] std::io::Error),
}

/// Find the nearest `filekit.toml` starting from `start_dir`, walking upward.
pub fn find_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Parse the settings file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Settings`].
pub fn load_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load the nearest `filekit.toml` above `start_dir`, if there is one.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn find_and_load(start_dir: &Path) -> Result<Option<Settings>, ConfigError> {
    find_config_path(start_dir)
        .map(|path| load_file(&path))
        .transpose()
}

/// Load settings for the current working directory, falling back to defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load() -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Ok(find_and_load(&cwd)?.unwrap_or_default())
}
