use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::{
    composition::preview::PreviewConfig,
    error::{ConfigError, Result},
    layout::LayoutParameters,
};

/// Main configuration for the thumbnail compositor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Starting values for the layout controls
    pub layout: LayoutParameters,

    /// Compositing settings
    pub render: RenderConfig,

    /// Preview surface settings
    pub preview: PreviewConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.render.validate()?;
        self.preview.validate()?;
        Ok(())
    }
}

/// Resampling filters allowed for layer scaling
///
/// Nearest-neighbour is intentionally absent: every resize must keep colour fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Compositing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Border kept around the center image, in pixels
    pub margin: u32,

    /// Base logo width as a percentage of the target rectangle width
    pub logo_width_percent: u32,

    /// Filter used for every resize
    pub filter: ResampleFilter,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: 28,
            logo_width_percent: 40,
            filter: ResampleFilter::Lanczos3,
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<()> {
        if self.logo_width_percent == 0 || self.logo_width_percent > 100 {
            return Err(ConfigError::InvalidValue {
                key: "render.logo_width_percent".to_string(),
                value: self.logo_width_percent.to_string()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.render.margin, 28);
        assert_eq!(config.preview.width, 960);
        assert_eq!(config.preview.height, 540);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.layout.logo_rotation = -35;
        original_config.render.filter = ResampleFilter::CatmullRom;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[layout]\nbanner_size = 60\n\n[render]\nfilter = \"gaussian\"\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.layout.banner_size, 60);
        assert_eq!(config.layout.logo_size, 100);
        assert_eq!(config.render.filter, ResampleFilter::Gaussian);
        assert_eq!(config.render.margin, 28);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let result = Config::from_file(dir.path().join("nope.toml"));
        assert!(matches!(
            result,
            Err(crate::error::CompositorError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_nearest_filter_is_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str("[render]\nfilter = \"nearest\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_invalid_logo_width_percent() {
        let mut config = Config::default();
        config.render.logo_width_percent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_layout_default() {
        let mut config = Config::default();
        config.layout.logo_opacity = 150;
        assert!(config.validate().is_err());
    }
}
