//! Runtime configuration
//!
//! All settings have defaults matching the stock front-end; a TOML document
//! only needs to name the values it overrides.

use crate::raster::StrokeStyle;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper limit for any zoom setting
pub const MAX_ZOOM_PERCENT: u32 = 1000;

/// Top-level configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
}

impl Config {
    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value has the wrong type
    ///
    /// # Example
    ///
    /// ```
    /// use signdesk_core::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_str(r#"
    ///     [app]
    ///     loading_delay_ms = 0
    /// "#)?;
    /// assert_eq!(config.app.loading_delay_ms, 0);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        let p = &self.placement;
        if p.min_zoom_percent == 0
            || p.min_zoom_percent > p.max_zoom_percent
            || p.max_zoom_percent > MAX_ZOOM_PERCENT
        {
            anyhow::bail!(
                "Invalid zoom range: {}%..{}%",
                p.min_zoom_percent,
                p.max_zoom_percent
            );
        }
        if p.zoom_step_percent == 0 || p.zoom_step_percent > MAX_ZOOM_PERCENT {
            anyhow::bail!(
                "Zoom step must be between 1% and {}%",
                MAX_ZOOM_PERCENT
            );
        }
        if p.preview_pages == 0 {
            anyhow::bail!("Preview must have at least one page");
        }
        let width = self.capture.line_width;
        if !(width.is_finite() && width > 0.0) {
            anyhow::bail!("Stroke width must be a positive number, got {}", width);
        }
        Ok(())
    }
}

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated loading time for detail pages (default: 500)
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u32,
    /// Maximum tracing level forwarded to the console (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.loading_delay_ms))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: default_loading_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_loading_delay_ms() -> u32 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Stroke style for the signature surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Line width in pixels (default: 2.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Stroke colour as RGB (default: black)
    #[serde(default)]
    pub stroke_rgb: [u8; 3],
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            stroke_rgb: [0, 0, 0],
        }
    }
}

impl CaptureConfig {
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            line_width: self.line_width,
            rgb: self.stroke_rgb,
        }
    }
}

fn default_line_width() -> f64 {
    2.0
}

/// Placement overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Lower zoom bound in percent (default: 50)
    #[serde(default = "default_min_zoom")]
    pub min_zoom_percent: u32,
    /// Upper zoom bound in percent (default: 200)
    #[serde(default = "default_max_zoom")]
    pub max_zoom_percent: u32,
    /// Zoom increment in percent (default: 10)
    #[serde(default = "default_zoom_step")]
    pub zoom_step_percent: u32,
    /// Page count of the simulated preview (default: 1)
    #[serde(default = "default_preview_pages")]
    pub preview_pages: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_zoom_percent: default_min_zoom(),
            max_zoom_percent: default_max_zoom(),
            zoom_step_percent: default_zoom_step(),
            preview_pages: default_preview_pages(),
        }
    }
}

fn default_min_zoom() -> u32 {
    50
}

fn default_max_zoom() -> u32 {
    200
}

fn default_zoom_step() -> u32 {
    10
}

fn default_preview_pages() -> u32 {
    1
}
