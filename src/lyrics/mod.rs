/*!
 * Timed lyric transcripts.
 *
 * - `model`: syllables, lines and the lead/background split
 * - `parser`: reads the `lyric.json` transcript layout
 * - `romanize`: optional transliteration enrichment
 */

pub mod model;
pub mod parser;
pub mod romanize;

// Re-export main types
pub use model::{Line, Lyrics, Syllable};
pub use parser::{load_lyrics, parse_lyrics};
pub use romanize::{auto_romanize, JapaneseRomanizer, KanaRomanizer, Transliterator};
