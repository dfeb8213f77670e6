/*!
 * Karaoke subtitle layout and emission.
 *
 * This module turns timed lyrics into an ASS document:
 * - `timing`: centisecond conversion, per-character segment distribution
 * - `text`: spacing, escaping and karaoke payload building
 * - `styles`: role lookup, color conversion, style table rows
 * - `placement`: slot alternation and positioning of lead lines
 * - `background`: stacking of background vocal lines
 * - `writer`: header, style table and event list assembly
 *
 * Everything here is a single synchronous forward pass over the lines; the
 * per-line placement state only lives for one `generate_ass` call.
 */

pub mod timing;
pub mod text;
pub mod styles;
pub mod placement;
pub mod background;
pub mod writer;

// Re-export main types
pub use placement::{LeadPlacement, Slot};
pub use background::BackgroundPlacement;
pub use styles::{to_ass_color, StyleRoles};
pub use writer::generate_ass;
