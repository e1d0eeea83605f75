//! Settings file handling
//!
//! The settings file carries the two tables that must match between the
//! storefront and the fulfilment side: pricing rates and fabrication
//! dimensions. Files are TOML or JSON, chosen by extension; any section or
//! field left out takes its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use slabkit_cutsheet::CutSheetOptions;
use slabkit_pricing::PricingRates;

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "slabkit";
/// Settings file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Rates used for every quote.
    pub pricing: PricingRates,
    /// Cut-sheet drawing constants.
    pub fabrication: CutSheetOptions,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the settings file, e.g.
    /// `~/.config/slabkit/config.toml` on Linux.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Like [`Config::load_or_default`], but `None` (no settings location on
    /// this platform) also yields defaults.
    pub fn load_optional(path: Option<&Path>) -> SettingsResult<Self> {
        match path {
            Some(path) => Self::load_or_default(path),
            None => {
                info!("No settings location, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> SettingsResult<()> {
        self.pricing.validate()?;
        self.fabrication.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("a/b.toml")).unwrap(),
            FileFormat::Toml
        );
        assert_eq!(
            FileFormat::from_path(Path::new("b.json")).unwrap(),
            FileFormat::Json
        );
        assert!(matches!(
            FileFormat::from_path(Path::new("b.yaml")),
            Err(SettingsError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
        assert!(FileFormat::from_path(Path::new("settings")).is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_file() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with(Path::new(APP_DIR).join(CONFIG_FILE)));
        }
    }

    #[test]
    fn test_validate_reports_fabrication_errors() {
        let mut config = Config::new();
        config.fabrication.text_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Fabrication(_))
        ));
    }
}
