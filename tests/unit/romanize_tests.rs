/*!
 * Tests for automatic transliteration
 */

use lyricass::lyrics::romanize::contains_japanese;
use lyricass::lyrics::{auto_romanize, JapaneseRomanizer, KanaRomanizer, Lyrics, Syllable, Transliterator};
use lyricass::lyrics::Line;

struct UpperCase;

impl Transliterator for UpperCase {
    fn transliterate(&self, text: &str) -> Option<String> {
        Some(text.to_uppercase())
    }
}

fn line(syllables: Vec<Syllable>) -> Line {
    Line::from_syllables(syllables).unwrap()
}

#[test]
fn test_containsJapanese_shouldDetectKanaAndKanji() {
    assert!(contains_japanese("きみ"));
    assert!(contains_japanese("ロック"));
    assert!(contains_japanese("愛"));
    assert!(!contains_japanese("love"));
    assert!(!contains_japanese("사랑"));
}

#[test]
fn test_autoRomanize_shouldFillOnlyMissingJapaneseSyllables() {
    let lyrics = Lyrics::new(
        vec![line(vec![
            Syllable::new("きみ", 0.0, 0.5, false),
            Syllable::new("love", 0.5, 1.0, false),
            Syllable::new("あい", 1.0, 1.5, false).with_transliteration(Some("AI!".to_string())),
            Syllable::new("愛", 1.5, 2.0, false),
        ])],
        vec![line(vec![Syllable::new("ラララ", 3.0, 4.0, false)])],
    );

    let enriched = auto_romanize(&lyrics, &KanaRomanizer);
    let lead = &enriched.lead_lines[0].syllables;

    assert_eq!(lead[0].transliteration(), Some("kimi"));
    assert_eq!(lead[1].transliteration(), None);
    assert_eq!(lead[2].transliteration(), Some("AI!"));
    assert_eq!(lead[3].transliteration(), None);
    assert_eq!(enriched.background_lines[0].syllables[0].transliteration(), Some("rarara"));

    // Timing and text are untouched
    assert_eq!(enriched.lead_lines[0].start, 0.0);
    assert_eq!(lead[3].text, "愛");
    // Input is not modified
    assert!(lyrics.lead_lines[0].syllables[0].transliterated.is_none());
}

#[test]
fn test_autoRomanize_withCustomTransliterator_shouldUseIt() {
    let lyrics = Lyrics::new(vec![line(vec![Syllable::new("愛", 0.0, 1.0, false)])], Vec::new());

    let enriched = auto_romanize(&lyrics, &UpperCase);
    assert_eq!(enriched.lead_lines[0].syllables[0].transliteration(), Some("愛"));
    assert!(enriched.lead_lines[0].has_transliteration());
}

#[test]
fn test_kanaRomanizer_withPunctuationAndSmallKana_shouldConvert() {
    let romanizer = KanaRomanizer;
    assert_eq!(romanizer.transliterate("じゃあ、ね。").as_deref(), Some("jaa,ne."));
    assert_eq!(romanizer.transliterate("チョコ").as_deref(), Some("choko"));
    assert_eq!(romanizer.transliterate("ん").as_deref(), Some("n"));
}

#[test]
fn test_autoRomanize_withDictionaryRomanizer_shouldCoverKanji() {
    let lyrics = Lyrics::new(
        vec![line(vec![
            Syllable::new("愛", 0.0, 0.5, false),
            Syllable::new("して", 0.5, 1.0, false),
            Syllable::new("love", 1.0, 1.5, false),
        ])],
        Vec::new(),
    );

    let enriched = auto_romanize(&lyrics, &JapaneseRomanizer);
    let lead = &enriched.lead_lines[0].syllables;

    assert_eq!(lead[1].transliteration(), Some("shite"));
    let kanji = lead[0].transliteration().unwrap();
    assert!(kanji.is_ascii() && !kanji.is_empty());
    assert!(!contains_japanese(kanji));
    assert_eq!(lead[2].transliteration(), None);
}
