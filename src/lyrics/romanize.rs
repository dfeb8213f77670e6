/*!
 * Transliteration enrichment.
 *
 * The layout engine only needs to know whether a syllable has a transliterated
 * form; how it was produced is up to the `Transliterator` in use.
 *
 * `KanaRomanizer` covers Hiragana and Katakana with a Hepburn table and gives
 * up on Kanji. `JapaneseRomanizer` tries the table first and falls back to the
 * kakasi dictionary for text with Kanji.
 */

use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::lyrics::model::{Line, Lyrics};

/// Produces a Latin-script rendering of a piece of text
pub trait Transliterator {
    /// `None` when no transliteration is available for `text`
    fn transliterate(&self, text: &str) -> Option<String>;
}

/// Hepburn romanization for Japanese kana
#[derive(Debug, Default, Clone, Copy)]
pub struct KanaRomanizer;

static HIRAGANA_ROMAJI: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    [
        ('あ', "a"), ('い', "i"), ('う', "u"), ('え', "e"), ('お', "o"),
        ('か', "ka"), ('き', "ki"), ('く', "ku"), ('け', "ke"), ('こ', "ko"),
        ('が', "ga"), ('ぎ', "gi"), ('ぐ', "gu"), ('げ', "ge"), ('ご', "go"),
        ('さ', "sa"), ('し', "shi"), ('す', "su"), ('せ', "se"), ('そ', "so"),
        ('ざ', "za"), ('じ', "ji"), ('ず', "zu"), ('ぜ', "ze"), ('ぞ', "zo"),
        ('た', "ta"), ('ち', "chi"), ('つ', "tsu"), ('て', "te"), ('と', "to"),
        ('だ', "da"), ('ぢ', "ji"), ('づ', "zu"), ('で', "de"), ('ど', "do"),
        ('な', "na"), ('に', "ni"), ('ぬ', "nu"), ('ね', "ne"), ('の', "no"),
        ('は', "ha"), ('ひ', "hi"), ('ふ', "fu"), ('へ', "he"), ('ほ', "ho"),
        ('ば', "ba"), ('び', "bi"), ('ぶ', "bu"), ('べ', "be"), ('ぼ', "bo"),
        ('ぱ', "pa"), ('ぴ', "pi"), ('ぷ', "pu"), ('ぺ', "pe"), ('ぽ', "po"),
        ('ま', "ma"), ('み', "mi"), ('む', "mu"), ('め', "me"), ('も', "mo"),
        ('や', "ya"), ('ゆ', "yu"), ('よ', "yo"),
        ('ら', "ra"), ('り', "ri"), ('る', "ru"), ('れ', "re"), ('ろ', "ro"),
        ('わ', "wa"), ('ゐ', "wi"), ('ゑ', "we"), ('を', "wo"), ('ん', "n"),
        ('ぁ', "a"), ('ぃ', "i"), ('ぅ', "u"), ('ぇ', "e"), ('ぉ', "o"),
        ('ゃ', "ya"), ('ゅ', "yu"), ('ょ', "yo"), ('ゎ', "wa"), ('ゔ', "vu"),
        ('、', ","), ('。', "."), ('！', "!"), ('？', "?"), ('　', " "),
    ]
    .into_iter()
    .collect()
});

const SOKUON: char = 'っ';
const LONG_VOWEL_MARK: char = 'ー';

/// Whether any character falls in a Japanese kana or ideograph block
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese)
}

fn is_japanese(c: char) -> bool {
    matches!(
        c as u32,
        0x3040..=0x309F | 0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9D | 0x4E00..=0x9FFF
    )
}

// Katakana shares its layout with Hiragana, shifted by 0x60
fn to_hiragana(c: char) -> char {
    match c as u32 {
        code @ 0x30A1..=0x30F6 => char::from_u32(code - 0x60).unwrap_or(c),
        _ => c,
    }
}

fn small_y_vowel(c: char) -> Option<char> {
    match c {
        'ゃ' => Some('a'),
        'ゅ' => Some('u'),
        'ょ' => Some('o'),
        _ => None,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

impl Transliterator for KanaRomanizer {
    fn transliterate(&self, text: &str) -> Option<String> {
        let chars: Vec<char> = text.chars().map(to_hiragana).collect();
        let mut out = String::with_capacity(text.len() * 2);
        let mut geminate = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;

            if c == SOKUON {
                geminate = true;
                continue;
            }
            if c == LONG_VOWEL_MARK {
                if let Some(vowel) = out.chars().rev().find(|ch| is_vowel(*ch)) {
                    out.push(vowel);
                }
                continue;
            }

            let mut romaji = match HIRAGANA_ROMAJI.get(&c) {
                Some(r) => (*r).to_string(),
                None if is_japanese(c) => return None,
                None => c.to_string(),
            };

            // Yoon: ki + small ya -> kya, shi + small ya -> sha
            if let Some(vowel) = chars.get(i).copied().and_then(small_y_vowel) {
                if romaji.len() > 1 && romaji.ends_with('i') {
                    romaji.pop();
                    if !(romaji.ends_with("sh") || romaji.ends_with("ch") || romaji.ends_with('j')) {
                        romaji.push('y');
                    }
                    romaji.push(vowel);
                    i += 1;
                }
            }

            if geminate {
                if romaji.starts_with("ch") {
                    out.push('t');
                } else if let Some(first) = romaji.chars().next().filter(|f| f.is_ascii_alphabetic() && !is_vowel(*f)) {
                    out.push(first);
                }
                geminate = false;
            }

            out.push_str(&romaji);
        }

        Some(out)
    }
}

/// Kana table first, kakasi dictionary for whatever the table cannot convert
#[derive(Debug, Default, Clone, Copy)]
pub struct JapaneseRomanizer;

impl Transliterator for JapaneseRomanizer {
    fn transliterate(&self, text: &str) -> Option<String> {
        if let Some(romaji) = KanaRomanizer.transliterate(text) {
            return Some(romaji);
        }

        let converted = kakasi::convert(text).romaji;
        let romaji = converted.trim();
        if romaji.is_empty() || contains_japanese(romaji) {
            debug!("No dictionary reading for '{}'", text);
            return None;
        }
        Some(romaji.to_string())
    }
}

fn romanize_line(line: &Line, transliterator: &dyn Transliterator) -> Line {
    let syllables = line
        .syllables
        .iter()
        .map(|s| {
            if s.transliterated.is_none() && contains_japanese(&s.text) {
                s.with_transliteration(transliterator.transliterate(&s.text))
            } else {
                s.clone()
            }
        })
        .collect();
    Line::new(syllables, line.start, line.end)
}

/// Fill in transliterations for Japanese syllables that do not have one yet
pub fn auto_romanize(lyrics: &Lyrics, transliterator: &dyn Transliterator) -> Lyrics {
    let result = Lyrics::new(
        lyrics.lead_lines.iter().map(|l| romanize_line(l, transliterator)).collect(),
        lyrics.background_lines.iter().map(|l| romanize_line(l, transliterator)).collect(),
    );

    let enriched = result
        .lead_lines
        .iter()
        .chain(result.background_lines.iter())
        .flat_map(|l| l.syllables.iter())
        .filter(|s| s.transliteration().is_some())
        .count();
    debug!("Transliteration available for {} syllables", enriched);

    result
}
