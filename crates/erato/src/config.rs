//! Configuration types for the sieve animation.
//!
//! This module provides configuration structures that control how the grid
//! is laid out, how fast it animates and which colors it uses. All types
//! implement [`serde::Deserialize`] for flexible loading from external
//! sources; every field falls back to its default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Maximum cell size and optional display size overrides.
//! - [`AnimationConfig`] - Delay between visual steps.
//! - [`StyleConfig`] - Colors for prime cells, composite cells and labels.
//!
//! # Example
//!
//! ```
//! # use erato::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().max_cell_size(), 50);
//! assert_eq!(config.animation().step_delay().as_millis(), 10);
//! assert!(config.style().palette().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use erato_core::color::Color;

use crate::{SieveError, engine::Palette};

/// Largest cell edge, in display units, unless configured otherwise.
pub const DEFAULT_MAX_CELL_SIZE: u32 = 50;

/// Delay between two visual steps unless configured otherwise.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Animation configuration section.
    #[serde(default)]
    animation: AnimationConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, animation: AnimationConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            animation,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Grid layout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Upper limit on the edge of a single cell.
    max_cell_size: u32,

    /// Width to lay the grid out for, instead of asking the display.
    display_width: Option<u32>,

    /// Height the canvas must fit in, instead of asking the display.
    display_height: Option<u32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_cell_size: DEFAULT_MAX_CELL_SIZE,
            display_width: None,
            display_height: None,
        }
    }
}

impl LayoutConfig {
    pub fn new(
        max_cell_size: u32,
        display_width: Option<u32>,
        display_height: Option<u32>,
    ) -> Self {
        Self {
            max_cell_size,
            display_width,
            display_height,
        }
    }

    pub fn max_cell_size(&self) -> u32 {
        self.max_cell_size
    }

    pub fn display_width(&self) -> Option<u32> {
        self.display_width
    }

    pub fn display_height(&self) -> Option<u32> {
        self.display_height
    }
}

/// Animation pacing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds to wait before each visual step.
    step_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
        }
    }
}

impl AnimationConfig {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay_ms: step_delay.as_millis() as u64,
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// Visual styling configuration, as CSS color strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    prime_color: String,
    composite_color: String,
    text_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            prime_color: "blue".to_string(),
            composite_color: "red".to_string(),
            text_color: "white".to_string(),
        }
    }
}

impl StyleConfig {
    /// Parse the configured colors into a [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Config`] naming the first color string that
    /// cannot be parsed.
    pub fn palette(&self) -> Result<Palette, SieveError> {
        let parse = |field: &str, value: &str| {
            Color::new(value)
                .map_err(|err| SieveError::Config(format!("Invalid {field} in config: {err}")))
        };

        Ok(Palette::new(
            parse("prime_color", &self.prime_color)?,
            parse("composite_color", &self.composite_color)?,
            parse("text_color", &self.text_color)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.layout().max_cell_size(), DEFAULT_MAX_CELL_SIZE);
        assert_eq!(config.layout().display_width(), None);
        assert_eq!(config.layout().display_height(), None);
        assert_eq!(config.animation().step_delay(), DEFAULT_STEP_DELAY);

        let palette = config.style().palette().unwrap();
        assert_eq!(palette.prime(), &Color::new("blue").unwrap());
        assert_eq!(palette.composite(), &Color::new("red").unwrap());
        assert_eq!(palette.text(), &Color::new("white").unwrap());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            display_width = 120
            display_height = 40

            [animation]
            step_delay_ms = 250

            [style]
            prime_color = "#00ff00"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().max_cell_size(), DEFAULT_MAX_CELL_SIZE);
        assert_eq!(config.layout().display_width(), Some(120));
        assert_eq!(config.layout().display_height(), Some(40));
        assert_eq!(config.animation().step_delay(), Duration::from_millis(250));

        let palette = config.style().palette().unwrap();
        assert_eq!(palette.prime().to_rgb8(), (0, 255, 0));
        assert_eq!(palette.composite(), &Color::new("red").unwrap());
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            text_color = "not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().palette().unwrap_err();
        assert!(matches!(err, SieveError::Config(_)));
        assert!(err.to_string().contains("text_color"));
    }
}
