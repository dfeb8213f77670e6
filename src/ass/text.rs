/*!
 * Text payloads for dialogue events.
 *
 * Joins syllables with the right separators, escapes override-block
 * characters, and in karaoke mode splits every syllable into per-character
 * `\k` segments.
 */

use std::fmt::Write;

use crate::ass::timing::{distribute, to_centiseconds, unit_duration_cs};
use crate::lyrics::model::{Line, Syllable};

/// No separator is inserted before text starting with one of these
pub const TRAILING_PUNCTUATION: &[char] = &[
    ',', '.', '!', '?', ':', ';', ')', ']', '}', '%', '"', '\'', '\u{2014}', '\u{2026}',
];

// CJK, Kana and Hangul blocks treated as non-Latin outright
const NON_LATIN_RANGES: &[(u32, u32)] = &[
    (0x3040, 0x309F), // Hiragana
    (0x30A0, 0x30FF), // Katakana
    (0x31F0, 0x31FF), // Katakana phonetic extensions
    (0x3400, 0x4DBF), // CJK extension A
    (0x4E00, 0x9FFF), // CJK unified ideographs
    (0xAC00, 0xD7AF), // Hangul syllables
    (0xF900, 0xFAFF), // CJK compatibility ideographs
    (0xFF66, 0xFF9D), // Half-width Katakana
];

/// Which text field of a syllable to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Original,
    Transliterated,
}

/// Plain text or per-character karaoke timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Static,
    Karaoke,
}

fn starts_with_punctuation(text: &str) -> bool {
    text.chars().next().is_some_and(|c| TRAILING_PUNCTUATION.contains(&c))
}

/// Separator between two syllables of original-script text
pub fn original_separator(prev: &Syllable, current_text: &str) -> &'static str {
    if prev.is_part_of_word || starts_with_punctuation(current_text) {
        ""
    } else {
        " "
    }
}

/// Separator between two syllables of transliterated text.
/// Word boundaries get a double space so transliterated words stay apart.
pub fn transliterated_separator(prev: &Syllable, current_text: &str) -> &'static str {
    if starts_with_punctuation(current_text) {
        ""
    } else if prev.is_part_of_word {
        " "
    } else {
        "  "
    }
}

/// Escape the characters that would otherwise open or close override blocks
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '{' => out.push_str("\\{"),
        '}' => out.push_str("\\}"),
        _ => out.push(c),
    }
}

fn is_non_latin_char(c: char) -> bool {
    let code = c as u32;
    NON_LATIN_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&code)) || (code > 0x7F && c.is_alphabetic())
}

/// Whether a line's original text contains non-Latin script
pub fn is_non_latin(line: &Line) -> bool {
    line.syllables.iter().any(|s| s.text.chars().any(is_non_latin_char))
}

fn karaoke_marker(out: &mut String, cs: u32) {
    let _ = write!(out, "{{\\k{}}}", cs);
}

// Highlight time that already elapsed before the event appeared
struct KaraokeClock {
    late_cs: u32,
}

impl KaraokeClock {
    fn absorb(&mut self, cs: u32) -> u32 {
        let absorbed = cs.min(self.late_cs);
        self.late_cs -= absorbed;
        cs - absorbed
    }
}

/// Build a dialogue payload from a sequence of syllables.
///
/// In karaoke mode a positive `offset_cs` is an unhighlighted lead-in before
/// the first syllable. A negative one means the event appears after the line
/// started: that much highlight time is consumed from the front, so elapsed
/// characters get `\k0` and the rest stays in sync. Static text ignores it.
pub fn build_text(syllables: &[Syllable], source: TextSource, mode: RenderMode, offset_cs: i64) -> String {
    let mut out = String::new();
    let mut prev: Option<&Syllable> = None;
    let mut clock = KaraokeClock {
        late_cs: u32::try_from(offset_cs.min(0).unsigned_abs()).unwrap_or(u32::MAX),
    };

    if mode == RenderMode::Karaoke && offset_cs > 0 {
        karaoke_marker(&mut out, u32::try_from(offset_cs).unwrap_or(u32::MAX));
    }

    for syllable in syllables {
        let text = match source {
            TextSource::Transliterated => syllable.transliteration().unwrap_or(&syllable.text),
            TextSource::Original => &syllable.text,
        };
        let separator = match (prev, source) {
            (None, _) => "",
            (Some(p), TextSource::Original) => original_separator(p, text),
            (Some(p), TextSource::Transliterated) => transliterated_separator(p, text),
        };

        match mode {
            RenderMode::Static => {
                out.push_str(separator);
                out.push_str(&escape_text(text));
            }
            RenderMode::Karaoke => {
                if let Some(p) = prev {
                    let gap_cs = to_centiseconds(syllable.start - p.end);
                    if gap_cs > 0 {
                        let remaining = clock.absorb(gap_cs as u32);
                        if remaining > 0 {
                            karaoke_marker(&mut out, remaining);
                        }
                    }
                }

                // Whitespace is never highlighted on its own
                let with_separator = format!("{}{}", separator, text);
                let body = with_separator.trim_start_matches(' ');
                out.push_str(&with_separator[..with_separator.len() - body.len()]);

                let chars: Vec<char> = body.chars().collect();
                let segments = distribute(unit_duration_cs(syllable.start, syllable.end), chars.len());
                for (c, segment) in chars.into_iter().zip(segments) {
                    karaoke_marker(&mut out, clock.absorb(segment));
                    push_escaped(&mut out, c);
                }
            }
        }

        prev = Some(syllable);
    }

    out
}
