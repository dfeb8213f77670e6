/*!
 * Normalized in-memory representation of a timed lyric transcript.
 *
 * Values are produced once by the parser, optionally enriched once with a
 * transliteration, and only read afterwards.
 */

use serde::{Deserialize, Serialize};

/// Smallest timed unit of text, usually one syllable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    // @field: Original-script text
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: No separator may precede the next syllable
    pub is_part_of_word: bool,

    // @field: Transliterated form, if an enrichment step supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliterated: Option<String>,
}

impl Syllable {
    pub fn new(text: impl Into<String>, start: f64, end: f64, is_part_of_word: bool) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            is_part_of_word,
            transliterated: None,
        }
    }

    /// Copy of this syllable carrying the given transliteration
    pub fn with_transliteration(&self, transliterated: Option<String>) -> Self {
        Self {
            transliterated,
            ..self.clone()
        }
    }

    /// Usable transliteration; an empty string counts as absent
    pub fn transliteration(&self) -> Option<&str> {
        self.transliterated.as_deref().filter(|t| !t.is_empty())
    }
}

/// One displayed utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub syllables: Vec<Syllable>,
    pub start: f64,
    pub end: f64,
}

impl Line {
    pub fn new(syllables: Vec<Syllable>, start: f64, end: f64) -> Self {
        Self { syllables, start, end }
    }

    /// Build a line whose bounds are taken from its first and last syllable
    pub fn from_syllables(syllables: Vec<Syllable>) -> Option<Self> {
        let start = syllables.first()?.start;
        let end = syllables.last()?.end;
        Some(Self::new(syllables, start, end))
    }

    /// Concatenated original text, without separators
    pub fn text(&self) -> String {
        self.syllables.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Whether at least one syllable carries a usable transliteration
    pub fn has_transliteration(&self) -> bool {
        self.syllables.iter().any(|s| s.transliteration().is_some())
    }
}

/// Lead and background vocal lines of a song
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lyrics {
    pub lead_lines: Vec<Line>,
    pub background_lines: Vec<Line>,
}

impl Lyrics {
    pub fn new(lead_lines: Vec<Line>, background_lines: Vec<Line>) -> Self {
        Self {
            lead_lines,
            background_lines,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lead_lines.len() + self.background_lines.len()
    }
}
