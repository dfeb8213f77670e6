/*!
 * Assembly of the complete subtitle document.
 *
 * Placement decides where and when each line is visible; this module turns
 * those decisions into `Dialogue` rows and wraps them with the script header
 * and the style table.
 */

use log::{debug, info};
use std::fmt;

use crate::app_config::{Config, StyleConfig};
use crate::ass::background::{place_background_lines, BackgroundPlacement};
use crate::ass::placement::{place_lead_lines, LeadPlacement};
use crate::ass::styles::{style_line, StyleRoles, STYLE_FORMAT};
use crate::ass::text::{build_text, RenderMode, TextSource};
use crate::ass::timing::format_time;
use crate::errors::ConfigError;
use crate::lyrics::model::Lyrics;

/// Column list of the events section
pub const EVENT_FORMAT: &str = "Format: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text";

/// Stacking layer of a dialogue row. Layer 0 is left unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Primary = 1,
    Original = 2,
    Background = 3,
}

/// One event row of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Dialogue<'a> {
    pub layer: Layer,
    pub start: f64,
    pub end: f64,
    pub style: &'a StyleConfig,
    /// Payload including override tags
    pub text: String,
}

impl<'a> Dialogue<'a> {
    fn positioned(
        layer: Layer,
        start: f64,
        end: f64,
        style: &'a StyleConfig,
        position: (i32, i32),
        body: String,
    ) -> Self {
        Self {
            layer,
            start,
            end,
            style,
            text: format!("{}{}", override_block(style, position), body),
        }
    }
}

impl fmt::Display for Dialogue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dialogue: {},{},{},{},,{},{},{},,{}",
            self.layer as u8,
            format_time(self.start),
            format_time(self.end),
            self.style.name,
            self.style.margin_l,
            self.style.margin_r,
            self.style.margin_v,
            self.text
        )
    }
}

fn override_block(style: &StyleConfig, (x, y): (i32, i32)) -> String {
    if style.has_fade() {
        format!(
            "{{\\pos({},{})\\fad({},{})}}",
            x, y, style.fade_in_ms, style.fade_out_ms
        )
    } else {
        format!("{{\\pos({},{})}}", x, y)
    }
}

fn lead_dialogues<'a>(lyrics: &Lyrics, placed: &[LeadPlacement<'a>]) -> Vec<Dialogue<'a>> {
    let mut events = Vec::with_capacity(placed.len() * 2);

    for placement in placed {
        let line = &lyrics.lead_lines[placement.line_index];
        let source = if placement.use_transliteration {
            TextSource::Transliterated
        } else {
            TextSource::Original
        };

        events.push(Dialogue::positioned(
            Layer::Primary,
            placement.display_start,
            placement.effective_end,
            placement.style,
            placement.position,
            build_text(&line.syllables, source, RenderMode::Karaoke, placement.offset_cs),
        ));

        if let Some(overlay) = &placement.overlay {
            events.push(Dialogue::positioned(
                Layer::Original,
                placement.display_start,
                overlay.effective_end,
                overlay.style,
                overlay.position,
                build_text(
                    &line.syllables,
                    TextSource::Original,
                    RenderMode::Karaoke,
                    placement.offset_cs,
                ),
            ));
        }
    }

    events
}

fn background_dialogues<'a>(lyrics: &Lyrics, placed: &[BackgroundPlacement<'a>]) -> Vec<Dialogue<'a>> {
    placed
        .iter()
        .map(|placement| {
            let line = &lyrics.background_lines[placement.line_index];
            Dialogue::positioned(
                Layer::Background,
                placement.display_start,
                placement.effective_end,
                placement.style,
                placement.position,
                build_text(
                    &line.syllables,
                    TextSource::Original,
                    RenderMode::Karaoke,
                    placement.offset_cs,
                ),
            )
        })
        .collect()
}

// Only styles some event refers to, in role order.
// Names are deduplicated, first occurrence wins.
fn style_table<'a>(roles: &StyleRoles<'a>, events: &[Dialogue<'a>]) -> Vec<&'a StyleConfig> {
    let referenced = |style: &StyleConfig| events.iter().any(|e| e.style.name == style.name);
    let candidates = [
        Some(roles.primary_top),
        Some(roles.primary_bottom),
        roles.original_top,
        roles.original_bottom,
        roles.background,
    ];

    let mut table: Vec<&StyleConfig> = Vec::new();
    for style in candidates.into_iter().flatten().filter(|s| referenced(*s)) {
        if !table.iter().any(|s| s.name == style.name) {
            table.push(style);
        }
    }
    table
}

/// Generate a complete subtitle document for `lyrics`.
///
/// The configuration is validated first; no partial document is produced on
/// error.
pub fn generate_ass(lyrics: &Lyrics, config: &Config) -> Result<String, ConfigError> {
    config.validate()?;
    let roles = StyleRoles::resolve(&config.styles)?;

    let lead = place_lead_lines(&lyrics.lead_lines, config, &roles);
    let mut events = lead_dialogues(lyrics, &lead);

    match roles.background {
        Some(style) => {
            let background = place_background_lines(&lyrics.background_lines, &lead, config, style);
            events.extend(background_dialogues(lyrics, &background));
        }
        None if !lyrics.background_lines.is_empty() => {
            debug!(
                "No background style configured, ignoring {} background lines",
                lyrics.background_lines.len()
            );
        }
        None => {}
    }

    events.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.layer.cmp(&b.layer)));

    let mut out = Vec::with_capacity(events.len() + 16);
    out.push("[Script Info]".to_string());
    out.push("ScriptType: v4.00+".to_string());
    out.push(format!("PlayResX: {}", config.play_res_x));
    out.push(format!("PlayResY: {}", config.play_res_y));
    out.push("ScaledBorderAndShadow: yes".to_string());
    out.push(format!("WrapStyle: {}", config.wrap_style));
    out.push("Timer: 100.0000".to_string());
    out.push(String::new());

    out.push("[V4+ Styles]".to_string());
    out.push(STYLE_FORMAT.to_string());
    for style in style_table(&roles, &events) {
        out.push(format!("Style: {}", style_line(style)?));
    }
    out.push(String::new());

    out.push("[Events]".to_string());
    out.push(EVENT_FORMAT.to_string());
    out.extend(events.iter().map(Dialogue::to_string));

    info!(
        "Generated {} events from {} lead and {} background lines",
        events.len(),
        lyrics.lead_lines.len(),
        lyrics.background_lines.len()
    );

    let mut document = out.join("\n");
    document.push('\n');
    Ok(document)
}
