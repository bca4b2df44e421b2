// Settings: read-only shell configuration.
// Uses platform-native config dir: e.g. ~/Library/Application Support/tessel/settings.json
// on macOS, ~/.config/tessel/settings.json on Linux. TESSEL_CONFIG overrides the path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessel_core::{Size, SplitDirection, Viewport};
use thiserror::Error;

pub const CONFIG_ENV: &str = "TESSEL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesselSettings {
    pub screen: Size,
    pub status_bar_height: f32,
    pub dock_height: f32,
    /// Split direction new windows use until a `split` command changes it.
    pub default_split: SplitDirection,
    pub resize_step: f64,
    pub floating_min_size: Size,
    pub floating_default_size: Size,
    /// Display names for workspaces 1 to 10, in order.
    pub workspace_names: Vec<String>,
}

impl Default for TesselSettings {
    fn default() -> Self {
        Self {
            screen: Size::new(1280.0, 800.0),
            status_bar_height: 28.0,
            dock_height: 28.0,
            default_split: SplitDirection::Horizontal,
            resize_step: 0.05,
            floating_min_size: Size::new(220.0, 140.0),
            floating_default_size: Size::new(400.0, 300.0),
            workspace_names: Vec::new(),
        }
    }
}

impl TesselSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.screen, self.status_bar_height, self.dock_height)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "screen",
                reason: "width and height must be positive",
            });
        }
        if self.status_bar_height < 0.0 || self.dock_height < 0.0 {
            return Err(ConfigError::Invalid {
                field: "status_bar_height/dock_height",
                reason: "must not be negative",
            });
        }
        if !(self.resize_step > 0.0 && self.resize_step < 1.0) {
            return Err(ConfigError::Invalid {
                field: "resize_step",
                reason: "must lie strictly between 0 and 1",
            });
        }
        Ok(self)
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tessel").join("settings.json"))
}

/// Read and validate settings from `path`.
pub fn read_settings(path: &Path) -> Result<TesselSettings, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&data, path)
}

pub fn parse_settings(data: &str, path: &Path) -> Result<TesselSettings, ConfigError> {
    let settings: TesselSettings =
        serde_json::from_str(data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate()
}

/// Load settings, falling back to defaults when the file is missing or bad.
pub fn load_settings() -> TesselSettings {
    let path = match settings_path() {
        Some(p) => p,
        None => return TesselSettings::default(),
    };

    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return TesselSettings::default();
    }

    match read_settings(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{e}; using default settings");
            TesselSettings::default()
        }
    }
}
