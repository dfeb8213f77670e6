/*!
 * Reader for the `lyric.json` transcript layout.
 *
 * The transcript wraps its content in `queries[0].result.data.Content`; every
 * vocal item has a `Lead` line and an optional list of `Background` lines, each
 * made of timed `Syllables`.
 */

use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::errors::{AppError, LyricsError};
use crate::lyrics::model::{Line, Lyrics, Syllable};

#[derive(Debug, Deserialize)]
struct RawTranscript {
    #[serde(default)]
    queries: Vec<RawQuery>,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuery {
    #[serde(default)]
    result: RawResult,
}

#[derive(Debug, Default, Deserialize)]
struct RawResult {
    #[serde(default)]
    data: RawData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawData {
    #[serde(default)]
    content: Option<Vec<RawContent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawContent {
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(default)]
    lead: Option<RawLine>,
    #[serde(default)]
    background: Option<Vec<RawLine>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawLine {
    #[serde(default)]
    start_time: Option<f64>,
    #[serde(default)]
    end_time: Option<f64>,
    #[serde(default)]
    syllables: Vec<RawSyllable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSyllable {
    #[serde(default)]
    text: String,
    #[serde(default)]
    start_time: f64,
    #[serde(default)]
    end_time: f64,
    #[serde(default)]
    is_part_of_word: bool,
}

impl RawLine {
    // Lines without syllables contribute nothing and are dropped
    fn into_line(self) -> Option<Line> {
        let syllables: Vec<Syllable> = self
            .syllables
            .into_iter()
            .map(|s| Syllable::new(s.text, s.start_time, s.end_time, s.is_part_of_word))
            .collect();

        let first_start = syllables.first()?.start;
        let last_end = syllables.last()?.end;
        let start = self.start_time.unwrap_or(first_start);
        let end = self.end_time.unwrap_or(last_end);
        Some(Line::new(syllables, start, end))
    }
}

/// Parse transcript JSON text into lead and background lines
pub fn parse_lyrics(content: &str) -> Result<Lyrics, LyricsError> {
    let raw: RawTranscript = serde_json::from_str(content)?;
    let query = raw.queries.into_iter().next().ok_or(LyricsError::NoQueries)?;

    let mut lyrics = Lyrics::default();
    let items = query.result.data.content.unwrap_or_default();

    for item in items {
        if item.kind.as_deref() != Some("Vocal") {
            continue;
        }
        let Some(lead) = item.lead else {
            continue;
        };

        if let Some(line) = lead.into_line() {
            lyrics.lead_lines.push(line);
        }

        for background in item.background.unwrap_or_default() {
            if let Some(line) = background.into_line() {
                lyrics.background_lines.push(line);
            }
        }
    }

    debug!(
        "Parsed {} lead and {} background lines",
        lyrics.lead_lines.len(),
        lyrics.background_lines.len()
    );

    Ok(lyrics)
}

/// Read and parse a transcript file
pub fn load_lyrics<P: AsRef<Path>>(path: P) -> Result<Lyrics, AppError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::File(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(parse_lyrics(&content)?)
}
