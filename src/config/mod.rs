use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::core::Theme;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: Option<Theme>,
    pub sidebar: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// TOML seed file; the built-in dataset is used when unset
    pub seed: Option<PathBuf>,
    /// Simulated fetch latency for the built-in dataset
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub data: DataConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .with_context(|| format!("failed to parse {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

/// Load the config from `explicit`, or from the default location.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = explicit.map(Path::to_path_buf).or_else(config_path);
    let config = match path.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    Ok((config, path))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("AGENCIA_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("agencia").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("agencia").join("config.toml"));
    }

    directories::ProjectDirs::from("br", "agencia", "agencia")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("agencia"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("agencia"));
    }
    directories::ProjectDirs::from("br", "agencia", "agencia")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn export_dir() -> PathBuf {
    data_dir()
        .unwrap_or_else(|| PathBuf::from(".agencia"))
        .join("exports")
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("agencia.log"))
}
