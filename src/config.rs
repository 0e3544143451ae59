//! Window manager tunables, loadable from TOML.
//!
//! Every field has a default, so a partial file (or none at all) works. Units
//! are whatever the host's viewport uses: pixels for a graphical shell,
//! cells for the terminal host.

use std::path::Path;
use std::time::Duration;

use indoc::indoc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chrome::ChromeMetrics;
use crate::constants::*;
use crate::error::ConfigError;
use crate::geometry::Size;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WmConfig {
    pub default_width: i32,
    pub default_height: i32,
    pub cascade_origin: i32,
    pub cascade_step: i32,
    /// Cascade slots before the stagger wraps; `0` never wraps.
    pub cascade_wrap: u32,
    pub min_width: i32,
    pub min_height: i32,
    /// `0` disables edge snapping while dragging.
    pub snap_threshold: i32,
    pub double_click_ms: u64,
    pub z_index_base: u64,
    pub chrome: ChromeMetrics,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
            cascade_origin: CASCADE_ORIGIN,
            cascade_step: CASCADE_STEP,
            cascade_wrap: CASCADE_WRAP,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            snap_threshold: SNAP_THRESHOLD,
            double_click_ms: DOUBLE_CLICK_MS,
            z_index_base: Z_INDEX_BASE,
            chrome: ChromeMetrics::default(),
        }
    }
}

impl WmConfig {
    /// Defaults scaled for a character-cell viewport.
    pub fn terminal() -> Self {
        Self {
            default_width: 40,
            default_height: 12,
            cascade_origin: 2,
            cascade_step: 2,
            cascade_wrap: 8,
            min_width: 16,
            min_height: 5,
            snap_threshold: 1,
            double_click_ms: DOUBLE_CLICK_MS,
            z_index_base: Z_INDEX_BASE,
            chrome: ChromeMetrics {
                title_bar_height: 1,
                button_width: 3,
                resize_handle: 1,
            },
        }
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    pub fn double_click(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WmConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields `base` unchanged.
    pub fn load_or(path: &Path, base: WmConfig) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(base);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.min_width <= 0 || self.min_height <= 0 {
            errors.push("min_width and min_height must be positive".to_string());
        }
        if self.default_width < self.min_width || self.default_height < self.min_height {
            errors.push("default size must not be smaller than the minimum size".to_string());
        }
        if self.cascade_step < 0 {
            errors.push("cascade_step must not be negative".to_string());
        }
        if self.snap_threshold < 0 {
            errors.push("snap_threshold must not be negative".to_string());
        }
        let chrome = &self.chrome;
        if chrome.title_bar_height <= 0 || chrome.button_width < 0 || chrome.resize_handle < 0 {
            errors.push("chrome metrics must be non-negative with a visible title bar".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            for e in &errors {
                warn!("config validation: {e}");
            }
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }
}

/// Commented TOML listing every tunable at its default value.
pub fn default_config_toml() -> &'static str {
    indoc! {r#"
        # desk-wm configuration. Every key is optional.
        default_width = 420
        default_height = 300
        cascade_origin = 100
        cascade_step = 20
        # Number of windows before the cascade wraps (0 = never).
        cascade_wrap = 8
        min_width = 100
        min_height = 80
        # Distance from a viewport edge that snaps a dragged window (0 = off).
        snap_threshold = 20
        double_click_ms = 500
        z_index_base = 100

        [chrome]
        title_bar_height = 24
        button_width = 24
        resize_handle = 6
    "#}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed = WmConfig::from_toml_str(default_config_toml()).unwrap();
        assert_eq!(parsed, WmConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let toml = "snap_threshold = 0\n[chrome]\nbutton_width = 30\n";
        let parsed = WmConfig::from_toml_str(toml).unwrap();
        assert_eq!(parsed.snap_threshold, 0);
        assert_eq!(parsed.chrome.button_width, 30);
        assert_eq!(parsed.chrome.title_bar_height, TITLE_BAR_HEIGHT);
        assert_eq!(parsed.min_width, MIN_WINDOW_WIDTH);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            WmConfig::from_toml_str("snap = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = WmConfig::from_toml_str("min_width = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("min_width")));
    }

    #[test]
    fn terminal_preset_is_valid() {
        WmConfig::terminal().validate().unwrap();
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = WmConfig::load_or(&path, WmConfig::terminal()).unwrap();
        assert_eq!(config, WmConfig::terminal());
    }
}
