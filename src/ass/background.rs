/*!
 * Placement of background vocal lines.
 *
 * Background lines have no slot of their own. Each one starts at its style's
 * anchor and is raised above whatever other text is visible at the same time:
 * original-script overlays of lead lines and earlier background lines that
 * have not faded out yet.
 */

use log::debug;

use crate::app_config::{Config, StyleConfig};
use crate::ass::placement::{overlaps, LeadPlacement};
use crate::ass::styles::{anchor_x, anchor_y};
use crate::ass::timing::{to_centiseconds, NEGLIGIBLE_DURATION_SECS};
use crate::lyrics::model::Line;

/// Final timing and position of one background line
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPlacement<'a> {
    /// Index into the background lines this was placed from
    pub line_index: usize,
    pub style: &'a StyleConfig,
    pub display_start: f64,
    pub effective_end: f64,
    pub offset_cs: i64,
    pub position: (i32, i32),
}

fn scaled_padding(style: &StyleConfig, factor: f64, min: i32) -> i32 {
    ((f64::from(style.fontsize) * factor).round() as i32).max(min)
}

/// Place background lines in order, given the already placed lead lines
pub fn place_background_lines<'a>(
    lines: &[Line],
    lead: &[LeadPlacement<'_>],
    config: &Config,
    style: &'a StyleConfig,
) -> Vec<BackgroundPlacement<'a>> {
    let x = anchor_x(style, config);
    let base_y = anchor_y(style, config);
    let overlay_padding = scaled_padding(style, 0.9, 10);
    let stack_padding = scaled_padding(style, 1.1, 12);

    // (effective end, anchor) of background lines that may still be visible
    let mut active: Vec<(f64, i32)> = Vec::new();
    let mut placements = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        let display_start = (line.start - config.next_show_before_seconds).max(0.0);
        if line.end - display_start <= NEGLIGIBLE_DURATION_SECS {
            debug!("Skipping background line {}: no visible time", index);
            continue;
        }
        let effective_end = line.end + style.fade_out_secs();
        let window = (display_start, effective_end);

        active.retain(|(end, _)| *end > display_start);

        let mut y = base_y;
        for placed in lead {
            let Some(overlay) = placed.overlay.as_ref() else {
                continue;
            };
            if overlaps(window, (placed.display_start, overlay.effective_end)) {
                y = y.min(overlay.position.1 - overlay_padding);
            }
        }
        if let Some(highest) = active.iter().map(|(_, anchor)| *anchor).min() {
            y = y.min(highest - stack_padding);
        }
        let y = y.max(0);

        debug!(
            "Background line {} shown {:.2}s..{:.2}s at ({}, {})",
            index, display_start, effective_end, x, y
        );

        active.push((effective_end, y));
        placements.push(BackgroundPlacement {
            line_index: index,
            style,
            display_start,
            effective_end,
            offset_cs: to_centiseconds(line.start - display_start),
            position: (x, y),
        });
    }

    placements
}
