/*!
 * Placement of lead lines.
 *
 * Lead lines alternate between two vertical slots. A line may be shown ahead
 * of its start as static preview text, but never before the previous line in
 * the same slot has faded out. Top-slot lines are pushed upward when a
 * concurrently visible neighbour occupies the bottom slot.
 *
 * The pass runs in two steps. `plan_lines` folds the alternation state over
 * the lines and fixes slot, styles and preview window for each of them. The
 * placement fold then carries per-slot occupancy forward and consults the
 * plans of the direct neighbours, which are complete by then.
 */

use log::debug;

use crate::app_config::{Config, StyleConfig};
use crate::ass::styles::{anchor_x, anchor_y, StyleRoles};
use crate::ass::text::is_non_latin;
use crate::ass::timing::{to_centiseconds, NEGLIGIBLE_DURATION_SECS};
use crate::lyrics::model::Line;

/// Vertical display slot of a lead line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Top,
    Bottom,
}

impl Slot {
    pub fn flipped(self) -> Self {
        match self {
            Slot::Top => Slot::Bottom,
            Slot::Bottom => Slot::Top,
        }
    }
}

/// Alternation state carried from one lead line to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotState {
    pub slot: Slot,
    pub prev_end: Option<f64>,
}

impl SlotState {
    pub fn initial() -> Self {
        Self {
            slot: Slot::Top,
            prev_end: None,
        }
    }

    /// State after assigning a slot to a line spanning `start..end`.
    ///
    /// A gap longer than the pre-show window starts a fresh section at the top.
    pub fn next(self, start: f64, end: f64, pre_show: f64, alternate: bool) -> Self {
        let slot = match self.prev_end {
            None => Slot::Top,
            Some(prev_end) if start - prev_end > pre_show => Slot::Top,
            Some(_) if alternate => self.slot.flipped(),
            Some(_) => self.slot,
        };
        Self {
            slot,
            prev_end: Some(end),
        }
    }
}

/// Latest effective end time per slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotOccupancy {
    pub top_end: f64,
    pub bottom_end: f64,
}

impl SlotOccupancy {
    pub fn end_of(&self, slot: Slot) -> f64 {
        match slot {
            Slot::Top => self.top_end,
            Slot::Bottom => self.bottom_end,
        }
    }

    pub fn occupied(self, slot: Slot, until: f64) -> Self {
        match slot {
            Slot::Top => Self {
                top_end: self.top_end.max(until),
                ..self
            },
            Slot::Bottom => Self {
                bottom_end: self.bottom_end.max(until),
                ..self
            },
        }
    }
}

/// Original-script text shown beneath a transliterated lead line
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlacement<'a> {
    pub style: &'a StyleConfig,
    pub position: (i32, i32),
    pub effective_end: f64,
}

/// Final timing and position of one lead line
#[derive(Debug, Clone, PartialEq)]
pub struct LeadPlacement<'a> {
    /// Index into the lead lines this was placed from
    pub line_index: usize,
    pub slot: Slot,
    pub style: &'a StyleConfig,
    pub display_start: f64,
    /// End plus fade-out of the primary text
    pub effective_end: f64,
    /// Lead-in before highlighting starts; negative when shown late
    pub offset_cs: i64,
    /// Primary text uses the transliterated form
    pub use_transliteration: bool,
    pub position: (i32, i32),
    pub overlay: Option<OverlayPlacement<'a>>,
}

impl LeadPlacement<'_> {
    /// Moment the line and its overlay stop occupying their slot
    pub fn occupied_until(&self) -> f64 {
        self.overlay
            .as_ref()
            .map_or(self.effective_end, |o| o.effective_end.max(self.effective_end))
    }
}

#[derive(Debug, Clone)]
struct LinePlan<'a> {
    index: usize,
    slot: Slot,
    style: &'a StyleConfig,
    overlay_style: Option<&'a StyleConfig>,
    use_transliteration: bool,
    preview_start: f64,
    preview_end: f64,
    anchor: (i32, i32),
}

/// Gap between a line's anchor and the original-script overlay beneath it
pub fn overlay_offset(overlay: &StyleConfig) -> i32 {
    ((f64::from(overlay.fontsize) * 0.6).round() as i32).max(8)
}

// Clearance kept between a top-slot line and a bottom-slot neighbour
fn neighbor_padding(style: &StyleConfig) -> i32 {
    ((f64::from(style.fontsize) * 0.3).round() as i32).max(14)
}

pub(crate) fn overlaps(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Slot of every line, in order. The first line always starts at the top.
pub fn assign_slots(lines: &[Line], config: &Config) -> Vec<Slot> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .scan(SlotState::initial(), |state, line| {
            *state = state.next(
                line.start,
                line.end,
                config.next_show_before_seconds,
                config.alternate_positions,
            );
            Some(state.slot)
        })
        .collect()
}

fn plan_lines<'a>(lines: &[Line], config: &Config, roles: &StyleRoles<'a>) -> Vec<LinePlan<'a>> {
    let slots = assign_slots(lines, config);
    let non_empty = lines.iter().enumerate().filter(|(_, line)| !line.is_empty());

    non_empty
        .zip(slots)
        .map(|((index, line), slot)| {
            let style = roles.primary(slot);
            let use_transliteration = is_non_latin(line) && line.has_transliteration();
            let overlay_style = roles.original(slot).filter(|_| use_transliteration);
            let fade_out = overlay_style.map_or(style.fade_out_secs(), |o| o.fade_out_secs().max(style.fade_out_secs()));

            LinePlan {
                index,
                slot,
                style,
                overlay_style,
                use_transliteration,
                preview_start: (line.start - config.next_show_before_seconds).max(0.0),
                preview_end: line.end + fade_out,
                anchor: (anchor_x(style, config), anchor_y(style, config)),
            }
        })
        .collect()
}

/// Place every non-empty lead line. Lines left with no visible time before
/// their end are dropped and leave their slot untouched.
pub fn place_lead_lines<'a>(lines: &[Line], config: &Config, roles: &StyleRoles<'a>) -> Vec<LeadPlacement<'a>> {
    let plans = plan_lines(lines, config, roles);
    let mut occupancy = SlotOccupancy::default();
    let mut placements = Vec::with_capacity(plans.len());

    for (i, plan) in plans.iter().enumerate() {
        let line = &lines[plan.index];
        let display_start = plan.preview_start.max(occupancy.end_of(plan.slot));

        if line.end - display_start <= NEGLIGIBLE_DURATION_SECS {
            debug!(
                "Skipping lead line {}: no visible time left after {:.2}s",
                plan.index, display_start
            );
            continue;
        }

        let offset_cs = to_centiseconds(line.start - display_start);
        let effective_end = line.end + plan.style.fade_out_secs();
        let overlay_end = plan.overlay_style.map(|s| line.end + s.fade_out_secs());
        let occupied_until = overlay_end.map_or(effective_end, |e| e.max(effective_end));
        let below = plan.overlay_style.map_or(0, overlay_offset);

        let (x, mut y) = plan.anchor;
        if plan.slot == Slot::Top {
            let padding = neighbor_padding(plan.style);
            let neighbors = [i.checked_sub(1), Some(i + 1)]
                .into_iter()
                .flatten()
                .filter_map(|j| plans.get(j));

            for neighbor in neighbors {
                if neighbor.slot == Slot::Bottom
                    && overlaps(
                        (display_start, occupied_until),
                        (neighbor.preview_start, neighbor.preview_end),
                    )
                {
                    let top_edge = neighbor.anchor.1 - neighbor.style.fontsize as i32;
                    y = y.min(top_edge - padding - below);
                }
            }
        }
        if plan.overlay_style.is_some() {
            // Overlay must stay on canvas at its full offset below the primary
            y = y.min(config.play_res_y as i32 - below);
        }
        y = y.max(0);

        let overlay = plan.overlay_style.zip(overlay_end).map(|(style, end)| OverlayPlacement {
            style,
            position: (x, y + below),
            effective_end: end,
        });

        debug!(
            "Lead line {} -> {:?} slot, shown {:.2}s..{:.2}s at ({}, {})",
            plan.index, plan.slot, display_start, occupied_until, x, y
        );

        occupancy = occupancy.occupied(plan.slot, occupied_until);
        placements.push(LeadPlacement {
            line_index: plan.index,
            slot: plan.slot,
            style: plan.style,
            display_start,
            effective_end,
            offset_cs,
            use_transliteration: plan.use_transliteration,
            position: (x, y),
            overlay,
        });
    }

    placements
}
