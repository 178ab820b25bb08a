//! TOML-based configuration persistence for the session viewer.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\DeskView\config.toml`
//! - Linux:    `~/.config/deskview/config.toml`
//! - macOS:    `~/Library/Application Support/DeskView/config.toml`
//!
//! An explicit path (the `--config` flag) bypasses the platform lookup.
//!
//! # Example file
//!
//! ```toml
//! [viewer]
//! log_level = "debug"
//! display_mode = "fit"
//!
//! [pointer]
//! mapping = "scaled"
//!
//! [session]
//! remote_width = 2560
//! remote_height = 1440
//! visible_width = 1280.0
//! visible_height = 720.0
//! ```
//!
//! # Serde default values (for beginners)
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  Whole sections
//! carry `#[serde(default)]`, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use deskview_core::{DisplayInfo, DisplayMode, MappingMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Presentation and diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `"native"` scrolls over the remote pixels; `"fit"` scales to the window.
    #[serde(default)]
    pub display_mode: DisplayMode,
}

/// Pointer mapping settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PointerConfig {
    /// `"scaled"` corrects for letterboxing; `"passthrough"` forwards box-local
    /// coordinates unchanged.
    #[serde(default)]
    pub mapping: MappingMode,
}

/// The remote display and the local window it is shown in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Identifier of the remote session.  Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Name of the remote monitor, used in logs.
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_remote_width")]
    pub remote_width: u32,
    #[serde(default = "default_remote_height")]
    pub remote_height: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u8,
    #[serde(default = "default_visible_width")]
    pub visible_width: f64,
    #[serde(default = "default_visible_height")]
    pub visible_height: f64,
}

impl SessionConfig {
    /// Describes the configured remote monitor.
    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            id: "0".to_string(),
            name: self.display_name.clone(),
            width: self.remote_width,
            height: self.remote_height,
            frame_rate: self.frame_rate,
            is_primary: true,
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_display_name() -> String {
    "Primary".to_string()
}
fn default_remote_width() -> u32 {
    1920
}
fn default_remote_height() -> u32 {
    1080
}
fn default_frame_rate() -> u8 {
    30
}
fn default_visible_width() -> f64 {
    960.0
}
fn default_visible_height() -> f64 {
    540.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            display_mode: DisplayMode::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            display_name: default_display_name(),
            remote_width: default_remote_width(),
            remote_height: default_remote_height(),
            frame_rate: default_frame_rate(),
            visible_width: default_visible_width(),
            visible_height: default_visible_height(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the platform config file.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the `DeskView` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("DeskView"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("deskview"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("DeskView"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
