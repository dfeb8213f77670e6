use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::default::Default;
use std::path::Path;

use crate::ass::styles::{to_ass_color, StyleRoles};
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the document configuration: canvas, placement behaviour
/// and the style presets, including loading a partial JSON file over the defaults.
/// Represents the document configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Canvas width
    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    /// Canvas height
    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,

    /// Text wrap mode written to the script header
    #[serde(default = "default_wrap_style")]
    pub wrap_style: u8,

    /// Alternate consecutive lead lines between the top and bottom slot
    #[serde(default = "default_true")]
    pub alternate_positions: bool,

    /// How long before its start a line may already be shown
    #[serde(default = "default_next_show_before_seconds")]
    pub next_show_before_seconds: f64,

    /// Fill in missing transliterations for Japanese text
    #[serde(default = "default_true")]
    pub romanize: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Style presets keyed by role key
    #[serde(default = "default_styles")]
    pub styles: BTreeMap<String, StyleConfig>,
}

/// A named visual preset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleConfig {
    // @field: Style name as written to the style table
    pub name: String,

    // @field: Font family
    #[serde(default = "default_fontname")]
    pub fontname: String,

    // @field: Font size in canvas pixels
    #[serde(default = "default_fontsize")]
    pub fontsize: u32,

    // @field: Colors, `#RRGGBB` or `&H`-prefixed
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_black")]
    pub outline_color: String,
    #[serde(default = "default_black")]
    pub shadow_color: String,

    #[serde(default)]
    pub bold: i32,
    #[serde(default)]
    pub italic: i32,
    #[serde(default)]
    pub underline: i32,
    #[serde(default)]
    pub strikeout: i32,

    #[serde(default = "default_scale")]
    pub scale_x: u32,
    #[serde(default = "default_scale")]
    pub scale_y: u32,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub angle: f64,

    #[serde(default = "default_border_style")]
    pub border_style: u8,
    #[serde(default = "default_outline")]
    pub outline: f64,
    #[serde(default = "default_shadow")]
    pub shadow: f64,

    // @field: Numpad alignment, 1-3 bottom row, 4-6 middle, 7-9 top
    #[serde(default = "default_alignment")]
    pub alignment: u8,

    #[serde(default = "default_margin_h")]
    pub margin_l: i32,
    #[serde(default = "default_margin_h")]
    pub margin_r: i32,
    #[serde(default = "default_margin_v")]
    pub margin_v: i32,

    #[serde(default = "default_encoding")]
    pub encoding: i32,

    // @field: Fade durations in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_in_ms: u32,
    #[serde(default = "default_fade_ms")]
    pub fade_out_ms: u32,
}

impl StyleConfig {
    /// Default preset with the given name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_fontsize(mut self, fontsize: u32) -> Self {
        self.fontsize = fontsize;
        self
    }

    pub fn with_margin_v(mut self, margin_v: i32) -> Self {
        self.margin_v = margin_v;
        self
    }

    /// Fade-out duration in seconds
    pub fn fade_out_secs(&self) -> f64 {
        f64::from(self.fade_out_ms) / 1000.0
    }

    pub fn has_fade(&self) -> bool {
        self.fade_in_ms > 0 || self.fade_out_ms > 0
    }

    /// Every color of the preset, in style-table order
    pub fn colors(&self) -> [&str; 4] {
        [
            &self.primary_color,
            &self.secondary_color,
            &self.outline_color,
            &self.shadow_color,
        ]
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            fontname: default_fontname(),
            fontsize: default_fontsize(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            outline_color: default_black(),
            shadow_color: default_black(),
            bold: 0,
            italic: 0,
            underline: 0,
            strikeout: 0,
            scale_x: default_scale(),
            scale_y: default_scale(),
            spacing: 0.0,
            angle: 0.0,
            border_style: default_border_style(),
            outline: default_outline(),
            shadow: default_shadow(),
            alignment: default_alignment(),
            margin_l: default_margin_h(),
            margin_r: default_margin_h(),
            margin_v: default_margin_v(),
            encoding: default_encoding(),
            fade_in_ms: default_fade_ms(),
            fade_out_ms: default_fade_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_play_res_x() -> u32 {
    1920
}

fn default_play_res_y() -> u32 {
    1080
}

fn default_wrap_style() -> u8 {
    2
}

fn default_next_show_before_seconds() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

fn default_fontname() -> String {
    "Roboto".to_string()
}

fn default_fontsize() -> u32 {
    48
}

fn default_primary_color() -> String {
    "#FFD86B".to_string()
}

fn default_secondary_color() -> String {
    "#FFFFFF".to_string()
}

fn default_black() -> String {
    "#000000".to_string()
}

fn default_scale() -> u32 {
    100
}

fn default_border_style() -> u8 {
    1
}

fn default_outline() -> f64 {
    3.0
}

fn default_shadow() -> f64 {
    2.0
}

fn default_alignment() -> u8 {
    2
}

fn default_margin_h() -> i32 {
    120
}

fn default_margin_v() -> i32 {
    80
}

fn default_encoding() -> i32 {
    1
}

fn default_fade_ms() -> u32 {
    150
}

fn default_styles() -> BTreeMap<String, StyleConfig> {
    let mut styles = BTreeMap::new();
    styles.insert(
        "latin_bottom".to_string(),
        StyleConfig::named("LatinBottom").with_margin_v(70),
    );
    styles.insert(
        "latin_top".to_string(),
        StyleConfig::named("LatinTop").with_margin_v(120),
    );
    styles.insert(
        "original_below_bottom".to_string(),
        StyleConfig::named("OriginalBelowBottom").with_fontsize(34).with_margin_v(40),
    );
    styles.insert(
        "original_below_top".to_string(),
        StyleConfig::named("OriginalBelowTop").with_fontsize(34).with_margin_v(90),
    );
    styles.insert(
        "background".to_string(),
        StyleConfig::named("Background").with_fontsize(40).with_margin_v(210),
    );
    styles
}

// Overlay a partial JSON style object onto a complete preset
fn merge_style(base: &StyleConfig, patch: &Value, keep_name: bool) -> Result<StyleConfig> {
    let mut merged = serde_json::to_value(base).context("Failed to serialize base style")?;
    if let (Some(target), Some(fields)) = (merged.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            if keep_name && key == "name" {
                continue;
            }
            target.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(merged).context("Invalid style definition")
}

impl Config {
    /// Parse a configuration from JSON text, filling everything it leaves out
    /// from the defaults. Style objects are merged field by field onto the
    /// default preset with the same key.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(content).context("Config is not valid JSON")?;
        let mut config = Config::default();

        if let Some(v) = raw.get("play_res_x") {
            config.play_res_x = serde_json::from_value(v.clone()).context("Invalid play_res_x")?;
        }
        if let Some(v) = raw.get("play_res_y") {
            config.play_res_y = serde_json::from_value(v.clone()).context("Invalid play_res_y")?;
        }
        if let Some(v) = raw.get("wrap_style") {
            config.wrap_style = serde_json::from_value(v.clone()).context("Invalid wrap_style")?;
        }
        if let Some(v) = raw.get("alternate_positions") {
            config.alternate_positions =
                serde_json::from_value(v.clone()).context("Invalid alternate_positions")?;
        }
        if let Some(v) = raw.get("next_show_before_seconds") {
            config.next_show_before_seconds =
                serde_json::from_value(v.clone()).context("Invalid next_show_before_seconds")?;
        }
        if let Some(v) = raw.get("romanize") {
            config.romanize = serde_json::from_value(v.clone()).context("Invalid romanize")?;
        }
        if let Some(v) = raw.get("log_level") {
            config.log_level = serde_json::from_value(v.clone()).context("Invalid log_level")?;
        }

        if let Some(styles) = raw.get("styles").and_then(Value::as_object) {
            for (key, patch) in styles {
                let style = match config.styles.get(key) {
                    Some(base) => merge_style(base, patch, true),
                    None => {
                        let base = StyleConfig::named(key);
                        merge_style(&base, patch, false)
                    }
                }
                .with_context(|| format!("Invalid style '{}'", key))?;
                config.styles.insert(key.clone(), style);
            }
        }

        Ok(config)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values.
    /// Runs before any output is produced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.play_res_x == 0 || self.play_res_y == 0 {
            return Err(ConfigError::InvalidValue(format!(
                "canvas must be non-empty, got {}x{}",
                self.play_res_x, self.play_res_y
            )));
        }

        if !self.next_show_before_seconds.is_finite() || self.next_show_before_seconds < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "next_show_before_seconds must be >= 0, got {}",
                self.next_show_before_seconds
            )));
        }

        for style in self.styles.values() {
            for color in style.colors() {
                to_ass_color(color)?;
            }
        }

        StyleRoles::resolve(&self.styles)?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            wrap_style: default_wrap_style(),
            alternate_positions: true,
            next_show_before_seconds: default_next_show_before_seconds(),
            romanize: true,
            log_level: LogLevel::default(),
            styles: default_styles(),
        }
    }
}
