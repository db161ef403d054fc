//! Configuration options

use crate::{geometry::Padding, utils::deserialize_shellexpand};
use anyhow::{Context, Result};
use colored::Colorize;
use directories::{BaseDirs, ProjectDirs};
use format_serde_error::SerdeError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Configuration file name
const CONFIG_FILE: &str = "xzones.yml";

// =============== GlobalSettings ================= [[[

/// Global configuration settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub(crate) struct GlobalSettings {
    /// Whether logs should be written to a file
    #[serde(alias = "log-to-file")]
    pub(crate) log_to_file: bool,

    /// The directory to write the log to
    #[serde(alias = "log-dir", deserialize_with = "deserialize_shellexpand")]
    pub(crate) log_dir: Option<PathBuf>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self { log_to_file: false, log_dir: None }
    }
}

// ]]] === GlobalSettings ===

// ================ ZoneSettings ================== [[[

/// The grid of zones cut into each monitor
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub(crate) struct ZoneSettings {
    /// Number of zone rows per monitor
    pub(crate) rows: u32,

    /// Number of zone columns per monitor
    pub(crate) columns: u32,

    /// Gap between neighboring zones
    pub(crate) spacing: u32,

    /// Top, right, bottom, left space kept free on every monitor
    pub(crate) padding: Padding,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            rows:    2,
            columns: 2,
            spacing: 0,
            padding: Padding::default(),
        }
    }
}

// ]]] === ZoneSettings ===

// ============== ExclusionSettings =============== [[[

/// Apps which are never snapped into a zone
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub(crate) struct ExclusionSettings {
    /// App names matched against both halves of `WM_CLASS`
    pub(crate) classes: Vec<String>,

    /// Binaries matched against the window's process path
    pub(crate) binaries: Vec<String>,

    /// Regexes matched against both halves of `WM_CLASS`
    pub(crate) patterns: Vec<String>,
}

// ]]] === ExclusionSettings ===

// =================== Config ===================== [[[

/// Configuration file to parse
#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct Config {
    /// Global settings
    #[serde(flatten)]
    pub(crate) global: GlobalSettings,

    /// The zone grid cut into each monitor
    #[serde(default)]
    pub(crate) zones: ZoneSettings,

    /// Apps kept out of zones
    #[serde(default)]
    pub(crate) exclusions: ExclusionSettings,
}

impl Config {
    /// Create the default configuration file
    pub(crate) fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("creating configuration path: {}", path.display());
            fs::create_dir_all(path).context("unable to create configuration directory")?;
        }

        let path = path.join(CONFIG_FILE);
        log::debug!("{}: {}", "Configuration path".bright_blue(), path.display());

        if !path.is_file() {
            let initialization = include_str!("../example/xzones.yml");

            let mut config_file: fs::File = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .open(&path)
                .with_context(|| {
                    format!("could not create xzones config: '{}'", path.display())
                })?;

            config_file
                .write_all(initialization.as_bytes())
                .with_context(|| {
                    format!("could not create xzones config: '{}'", path.display())
                })?;
            config_file.flush()?;
        }

        Self::load(path)
    }

    /// Load the configuration file from a given path
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = fs::read_to_string(path).context("failed to read config file")?;
        let res = serde_yaml::from_str(&file).map_err(|e| SerdeError::new(file, e))?;

        Ok(res)
    }

    /// Load the default configuration file
    pub(crate) fn load_default() -> Result<Self> {
        let path = PROJECT_DIRS.config_dir();
        log::debug!("loading default config: {}", path.display());
        Self::create_default(path)
    }
} // ]]] === Config ===

// ================ Project Dirs ================== [[[

/// Get the base [`XzonesDirs`]
pub(crate) static PROJECT_DIRS: Lazy<XzonesDirs> =
    Lazy::new(|| XzonesDirs::new().expect("failed to get `XzonesDirs`"));

/// Get all user project directories
pub(crate) fn get_project_dirs() -> ProjectDirs {
    log::trace!("determining project default folders");
    ProjectDirs::from("org", "xzones", "xzones")
        .expect("could not detect user home directory to place program files")
}

/// The project directories relevant to [`xzones`]
#[derive(Debug, Clone)]
pub(crate) struct XzonesDirs {
    /// User's `$XDG_CONFIG_HOME/xzones` directory
    config_dir: PathBuf,
    /// User's `$XDG_DATA_HOME/xzones` directory
    data_dir:   PathBuf,
}

impl XzonesDirs {
    /// Create a new [`XzonesDirs`]
    fn new() -> Option<Self> {
        let dirs = get_project_dirs();

        Some(Self {
            config_dir: Self::get_dir("XZONES_CONFIG_DIR", "XDG_CONFIG_HOME", ".config", dirs.config_dir())?,
            data_dir:   Self::get_dir("XZONES_DATA_DIR", "XDG_DATA_HOME", ".local/share", dirs.data_dir())?,
        })
    }

    /// Wrapper function that makes it easier to get directories
    fn get_dir(env_var: &str, var: &str, join: &str, dirf: &Path) -> Option<PathBuf> {
        env::var_os(env_var).map(PathBuf::from).map_or_else(
            || {
                env::var_os(var)
                    .map(PathBuf::from)
                    .filter(|p| p.is_absolute())
                    .map(|p| p.join(env!("CARGO_PKG_NAME")))
                    .or_else(|| {
                        BaseDirs::new()
                            .map(|b| b.home_dir().join(join).join(env!("CARGO_PKG_NAME")))
                    })
                    .or_else(|| Some(dirf.to_path_buf()))
            },
            Some,
        )
    }

    /// Get configuration directory
    #[must_use]
    pub(crate) fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get local data directory
    #[must_use]
    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// ]]] === Project Dirs ===

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::geometry::Padding;

    #[test]
    fn empty_config_fills_defaults() {
        let config = serde_yaml::from_str::<Config>("{}").expect("empty config must parse");

        assert!(!config.global.log_to_file);
        assert_eq!(config.zones.rows, 2);
        assert_eq!(config.zones.columns, 2);
        assert!(config.exclusions.classes.is_empty());
    }

    #[test]
    fn kebab_case_aliases_are_accepted() {
        let config = serde_yaml::from_str::<Config>(
            "log-to-file: true\n\
             zones:\n  rows: 3\n  columns: 1\n  spacing: 8\n  \
             padding: { top: 4, right: 4, bottom: 4, left: 4 }\n",
        )
        .expect("aliased config must parse");

        assert!(config.global.log_to_file);
        assert_eq!(config.zones.rows, 3);
        assert_eq!(config.zones.padding, Padding::new(4, 4, 4, 4));
    }

    #[test]
    fn shipped_example_parses() {
        let example = serde_yaml::from_str::<Config>(include_str!("../example/xzones.yml"));

        assert!(example.is_ok());
    }
}
