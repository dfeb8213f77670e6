/*!
 * # lyricass - karaoke subtitles from timed lyric transcripts
 *
 * A Rust library that turns syllable-timed lyrics into ASS subtitle documents
 * with per-character karaoke highlighting.
 *
 * ## Features
 *
 * - Read `lyric.json` transcripts with lead and background vocals
 * - Per-character `\k` timing that sums exactly to each syllable's duration
 * - Alternating top/bottom slots with static preview ahead of each line
 * - Fade-aware slot occupancy so lines never collide in the same slot
 * - Original-script overlays beneath transliterated lines
 * - Automatic Hepburn romanization of Kana and Kanji
 * - Configurable canvas and style presets
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `lyrics`: Transcript model, parser and romanization:
 *   - `lyrics::model`: Syllables, lines and the lead/background split
 *   - `lyrics::parser`: `lyric.json` reader
 *   - `lyrics::romanize`: Transliteration enrichment
 * - `ass`: Layout-and-timing engine and document writer:
 *   - `ass::timing`: Centisecond conversion and segment distribution
 *   - `ass::text`: Spacing, escaping and karaoke payloads
 *   - `ass::styles`: Style roles and the style table
 *   - `ass::placement`: Lead-line slot placement
 *   - `ass::background`: Background vocal stacking
 *   - `ass::writer`: Document assembly
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod ass;
pub mod lyrics;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, StyleConfig};
pub use ass::generate_ass;
pub use lyrics::{Line, Lyrics, Syllable};
pub use app_controller::Controller;
pub use errors::{AppError, ConfigError, LyricsError};
