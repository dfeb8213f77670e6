/*!
 * Style presets as the layout engine sees them.
 *
 * Roles are looked up through ordered lists of candidate keys: the first key
 * present in the style map wins. Only the two primary roles are required.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::app_config::{Config, StyleConfig};
use crate::ass::placement::Slot;
use crate::errors::ConfigError;

static HEX_DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]+$").unwrap());

pub const PRIMARY_TOP_KEYS: &[&str] = &["latin_top", "current_upper", "current_top", "current"];
pub const PRIMARY_BOTTOM_KEYS: &[&str] = &["latin_bottom", "current_lower", "current_bottom", "current"];
pub const ORIGINAL_TOP_KEYS: &[&str] = &[
    "original_below_top",
    "original_below_upper",
    "original_above_upper",
    "original",
];
pub const ORIGINAL_BOTTOM_KEYS: &[&str] = &[
    "original_below_bottom",
    "original_below_lower",
    "original_above_lower",
    "original",
];
pub const BACKGROUND_KEYS: &[&str] = &["background", "original_top"];

/// Column list of the style table
pub const STYLE_FORMAT: &str = "Format: Name,Fontname,Fontsize,PrimaryColour,SecondaryColour,OutlineColour,BackColour,\
Bold,Italic,Underline,StrikeOut,ScaleX,ScaleY,Spacing,Angle,BorderStyle,Outline,Shadow,\
Alignment,MarginL,MarginR,MarginV,Encoding";

/// First style whose key is present, in candidate order
pub fn find_style<'a>(styles: &'a BTreeMap<String, StyleConfig>, keys: &[&str]) -> Option<&'a StyleConfig> {
    keys.iter().find_map(|key| styles.get(*key))
}

fn require_style<'a>(
    styles: &'a BTreeMap<String, StyleConfig>,
    role: &'static str,
    keys: &[&'static str],
) -> Result<&'a StyleConfig, ConfigError> {
    find_style(styles, keys).ok_or_else(|| ConfigError::MissingStyle {
        role,
        keys: keys.to_vec(),
    })
}

/// Styles resolved for every role the layout uses
#[derive(Debug, Clone, Copy)]
pub struct StyleRoles<'a> {
    pub primary_top: &'a StyleConfig,
    pub primary_bottom: &'a StyleConfig,
    pub original_top: Option<&'a StyleConfig>,
    pub original_bottom: Option<&'a StyleConfig>,
    pub background: Option<&'a StyleConfig>,
}

impl<'a> StyleRoles<'a> {
    pub fn resolve(styles: &'a BTreeMap<String, StyleConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            primary_top: require_style(styles, "primary-top", PRIMARY_TOP_KEYS)?,
            primary_bottom: require_style(styles, "primary-bottom", PRIMARY_BOTTOM_KEYS)?,
            original_top: find_style(styles, ORIGINAL_TOP_KEYS),
            original_bottom: find_style(styles, ORIGINAL_BOTTOM_KEYS),
            background: find_style(styles, BACKGROUND_KEYS),
        })
    }

    pub fn primary(&self, slot: Slot) -> &'a StyleConfig {
        match slot {
            Slot::Top => self.primary_top,
            Slot::Bottom => self.primary_bottom,
        }
    }

    pub fn original(&self, slot: Slot) -> Option<&'a StyleConfig> {
        match slot {
            Slot::Top => self.original_top,
            Slot::Bottom => self.original_bottom,
        }
    }
}

/// Convert `RRGGBB`, `#RRGGBB`, `&HBBGGRR` or `&HAABBGGRR` into `&HAABBGGRR`
pub fn to_ass_color(value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidColor {
        value: value.to_string(),
    };
    let trimmed = value.trim();

    if trimmed.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("&h")) {
        let raw = &trimmed[2..];
        if !HEX_DIGITS_REGEX.is_match(raw) {
            return Err(invalid());
        }
        return match raw.len() {
            6 => Ok(format!("&H00{}", raw.to_uppercase())),
            8 => Ok(format!("&H{}", raw.to_uppercase())),
            _ => Err(invalid()),
        };
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !HEX_DIGITS_REGEX.is_match(hex) {
        return Err(invalid());
    }
    let (r, g, b) = (&hex[0..2], &hex[2..4], &hex[4..6]);
    Ok(format!("&H00{}{}{}", b, g, r).to_uppercase())
}

// Whole numbers keep one decimal, like "3.0"
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// One style table row, without the `Style: ` prefix
pub fn style_line(style: &StyleConfig) -> Result<String, ConfigError> {
    let mut fields = vec![
        style.name.clone(),
        style.fontname.clone(),
        style.fontsize.to_string(),
    ];
    for color in style.colors() {
        fields.push(to_ass_color(color)?);
    }
    fields.extend([
        style.bold.to_string(),
        style.italic.to_string(),
        style.underline.to_string(),
        style.strikeout.to_string(),
        style.scale_x.to_string(),
        style.scale_y.to_string(),
        format_decimal(style.spacing),
        format_decimal(style.angle),
        style.border_style.to_string(),
        format_decimal(style.outline),
        format_decimal(style.shadow),
        style.alignment.to_string(),
        style.margin_l.to_string(),
        style.margin_r.to_string(),
        style.margin_v.to_string(),
        style.encoding.to_string(),
    ]);
    Ok(fields.join(","))
}

/// Horizontal anchor implied by the alignment code and margins
pub fn anchor_x(style: &StyleConfig, config: &Config) -> i32 {
    match style.alignment {
        1 | 4 | 7 => style.margin_l,
        3 | 6 | 9 => config.play_res_x as i32 - style.margin_r,
        _ => (config.play_res_x / 2) as i32,
    }
}

/// Vertical anchor implied by the alignment code and margins
pub fn anchor_y(style: &StyleConfig, config: &Config) -> i32 {
    match style.alignment {
        7..=9 => style.margin_v,
        1..=3 => config.play_res_y as i32 - style.margin_v,
        _ => (config.play_res_y / 2) as i32,
    }
}
