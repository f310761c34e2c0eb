//! Configuration loading and CLI override merging
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! TOML config file (`./docviz.toml`, then the user config dir), and
//! command-line arguments, which take precedence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ============================================================
// Constants
// ============================================================

/// Default rasterization resolution (DPI)
pub const DEFAULT_RESOLUTION: u32 = 72;

/// Default number of report table columns
pub const DEFAULT_COLUMNS: usize = 3;

/// Default bounded wait for the external rasterizer (seconds)
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 60;

/// Local config file name
pub const LOCAL_CONFIG_FILE: &str = "docviz.toml";

/// Config file name under the user config dir
pub const USER_CONFIG_FILE: &str = "docviz/config.toml";

// ============================================================
// Colors & Styles
// ============================================================

/// An RGBA color with components in 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbaColor(pub [u8; 4]);

impl RgbaColor {
    /// Fully transparent black
    pub const TRANSPARENT: RgbaColor = RgbaColor([0, 0, 0, 0]);

    /// Opaque black
    pub const BLACK: RgbaColor = RgbaColor([0, 0, 0, 255]);

    /// Alpha component
    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// Whether drawing this color would have any effect
    pub fn is_visible(&self) -> bool {
        self.alpha() > 0
    }
}

impl From<RgbaColor> for image::Rgba<u8> {
    fn from(c: RgbaColor) -> Self {
        image::Rgba(c.0)
    }
}

/// Fill and outline colors for one element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Semi-transparent region shading
    pub fill: RgbaColor,
    /// Border color; fully transparent suppresses the border
    pub outline: RgbaColor,
}

/// Style applied to element types without a palette entry
pub const DEFAULT_STYLE: Style = Style {
    fill: RgbaColor([128, 128, 128, 100]),
    outline: RgbaColor::TRANSPARENT,
};

/// Immutable mapping from lower-cased element type label to box style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: HashMap<String, Style>,
}

impl StyleMap {
    /// Look up the style for a type label (case-insensitive).
    ///
    /// Unknown labels fall back to [`DEFAULT_STYLE`]; this never fails.
    pub fn style_for(&self, label: &str) -> Style {
        self.entries
            .get(&label.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_STYLE)
    }

    /// Labels with an explicit palette entry
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        const RED: RgbaColor = RgbaColor([255, 0, 0, 255]);
        let entries = [
            ("table", RgbaColor([240, 128, 128, 100])),
            ("caption", RgbaColor([243, 156, 18, 100])),
            ("citation", RgbaColor([14, 210, 234, 100])),
            ("picture", RgbaColor([255, 236, 204, 100])),
            ("formula", RgbaColor([128, 139, 150, 100])),
            ("subtitle-level-1", RgbaColor([204, 51, 102, 100])),
            ("paragraph", RgbaColor([234, 234, 43, 100])),
        ]
        .into_iter()
        .map(|(label, fill)| (label.to_string(), Style { fill, outline: RED }))
        .collect();

        Self { entries }
    }
}

// ============================================================
// Config
// ============================================================

/// Visualization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rasterization resolution in DPI
    pub resolution: u32,
    /// Number of columns in the report table
    pub columns: usize,
    /// Use the rasterized PDF page as the background
    pub show_page_image: bool,
    /// Bounded wait for the external rasterizer, in seconds
    pub render_timeout_secs: u64,
    /// Element type palette
    pub styles: StyleMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            columns: DEFAULT_COLUMNS,
            show_page_image: true,
            render_timeout_secs: DEFAULT_RENDER_TIMEOUT_SECS,
            styles: StyleMap::default(),
        }
    }
}

impl Config {
    /// Load config from the default locations: `./docviz.toml`, then the
    /// user config dir. Missing files yield the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG_FILE);
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }
        Ok(Self::default())
    }

    /// Load config from an explicit path
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge CLI overrides on top of this config (CLI takes precedence)
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Self {
        if let Some(resolution) = overrides.resolution {
            self.resolution = resolution;
        }
        if let Some(columns) = overrides.columns {
            self.columns = columns;
        }
        if let Some(show) = overrides.show_page_image {
            self.show_page_image = show;
        }
        if let Some(secs) = overrides.render_timeout_secs {
            self.render_timeout_secs = secs;
        }
        self
    }
}

/// Explicitly-set CLI values that override the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub resolution: Option<u32>,
    pub columns: Option<usize>,
    pub show_page_image: Option<bool>,
    pub render_timeout_secs: Option<u64>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_entries() {
        let styles = StyleMap::default();
        let table = styles.style_for("table");
        assert_eq!(table.fill, RgbaColor([240, 128, 128, 100]));
        assert_eq!(table.outline, RgbaColor([255, 0, 0, 255]));
        assert!(styles.labels().count() >= 7);
    }

    #[test]
    fn test_style_lookup_case_insensitive() {
        let styles = StyleMap::default();
        assert_eq!(styles.style_for("Table"), styles.style_for("table"));
        assert_eq!(styles.style_for("PARAGRAPH"), styles.style_for("paragraph"));
    }

    #[test]
    fn test_style_fallback_for_unknown_label() {
        let styles = StyleMap::default();
        let style = styles.style_for("no-such-label");
        assert_eq!(style, DEFAULT_STYLE);
        assert!(!style.outline.is_visible());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.resolution, 72);
        assert_eq!(config.columns, 3);
        assert!(config.show_page_image);
        assert_eq!(config.render_timeout_secs, 60);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            resolution = 150
            columns = 2

            [styles.table]
            fill = [1, 2, 3, 4]
            outline = [5, 6, 7, 8]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolution, 150);
        assert_eq!(config.columns, 2);
        // Unspecified fields keep their defaults
        assert!(config.show_page_image);
        let table = config.styles.style_for("table");
        assert_eq!(table.fill, RgbaColor([1, 2, 3, 4]));
        // A palette in the file replaces the default palette wholesale
        assert_eq!(config.styles.style_for("caption"), DEFAULT_STYLE);
    }

    #[test]
    fn test_merge_with_cli() {
        let overrides = CliOverrides {
            resolution: Some(300),
            columns: None,
            show_page_image: Some(false),
            render_timeout_secs: Some(10),
        };
        let merged = Config::default().merge_with_cli(&overrides);
        assert_eq!(merged.resolution, 300);
        assert_eq!(merged.columns, DEFAULT_COLUMNS);
        assert!(!merged.show_page_image);
        assert_eq!(merged.render_timeout_secs, 10);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docviz.toml");
        std::fs::write(&path, "columns = 4\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.columns, 4);
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
    }
}
