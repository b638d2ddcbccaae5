//! UI Theme - Shared colors, metrics and their RON config file
//!
//! Every panel carries a copy of the theme it was built with. Layout reads
//! the metrics at insertion time, drawing reads the palette every frame.

use std::path::Path;

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

use crate::error::{GuiError, GuiResult};

/// An 8-bit RGBA color, the unit the color picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_channels(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba(self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for Color {
    fn from(value: Rgba) -> Self {
        value.to_color()
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Metrics and palette shared by a panel and its elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Standard content text size
    pub font_size: f32,
    /// Height of one text row (buttons, sliders, checkboxes)
    pub line_height: f32,
    /// Gap between elements and around the panel body
    pub padding: f32,
    /// Height of the draggable panel header band
    pub header_height: f32,
    /// Panels are positioned and sized in multiples of this, and snap to it
    pub grid_size: f32,
    /// Corner radius for element bodies
    pub corner_radius: f32,

    pub panel_bg: Rgba,
    pub panel_border: Rgba,
    pub header: Rgba,
    pub header_hover: Rgba,
    pub element: Rgba,
    pub element_hover: Rgba,
    pub element_click: Rgba,
    pub text: Rgba,
    pub text_dim: Rgba,
    pub text_light: Rgba,
    /// Highlight for active fields, accent buttons and checked boxes
    pub accent: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 18.0,
            padding: 5.0,
            header_height: 20.0,
            grid_size: 20.0,
            corner_radius: 3.0,
            panel_bg: Rgba::rgb(30, 30, 30),
            panel_border: Rgba::rgb(80, 80, 80),
            header: Rgba::rgb(45, 45, 52),
            header_hover: Rgba::rgb(58, 58, 68),
            element: Rgba::rgb(50, 50, 50),
            element_hover: Rgba::rgb(60, 60, 60),
            element_click: Rgba::rgb(10, 10, 10),
            text: Rgba::rgb(150, 150, 150),
            text_dim: Rgba::rgb(100, 100, 110),
            text_light: Rgba::rgb(220, 220, 225),
            accent: Rgba::rgb(0, 191, 230),
        }
    }
}

impl Theme {
    /// Parse a theme from RON text; missing fields keep their defaults
    pub fn from_ron_str(text: &str) -> GuiResult<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a theme file
    pub fn load(path: &Path) -> GuiResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let theme = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded theme");
        Ok(theme)
    }

    pub fn to_ron_string(&self) -> GuiResult<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config).map_err(GuiError::from)
    }

    /// Header band offset for panels that have one
    pub fn header_offset(&self, has_header: bool) -> f32 {
        if has_header {
            self.padding + self.header_height
        } else {
            self.padding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let theme = Theme::from_ron_str("(padding: 8.0, accent: (r: 255, g: 0, b: 0, a: 255))").unwrap();
        assert_eq!(theme.padding, 8.0);
        assert_eq!(theme.accent, Rgba::rgb(255, 0, 0));
        assert_eq!(theme.font_size, Theme::default().font_size);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut theme = Theme::default();
        theme.grid_size = 32.0;
        let text = theme.to_ron_string().unwrap();
        assert_eq!(Theme::from_ron_str(&text).unwrap(), theme);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(header_height: 24.0)").unwrap();
        let theme = Theme::load(file.path()).unwrap();
        assert_eq!(theme.header_height, 24.0);
    }

    #[test]
    fn test_malformed_theme_is_an_error() {
        let err = Theme::from_ron_str("(padding: \"wide\")").unwrap_err();
        assert!(matches!(err, GuiError::Theme(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Theme::load(Path::new("/nonexistent/theme.ron")).unwrap_err();
        assert!(matches!(err, GuiError::Io(_)));
    }
}
