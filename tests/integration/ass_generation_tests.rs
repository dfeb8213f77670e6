/*!
 * End-to-end document generation tests
 */

use anyhow::Result;
use lyricass::app_config::Config;
use lyricass::ass::generate_ass;
use lyricass::ass::timing::to_centiseconds;
use lyricass::lyrics::{auto_romanize, parse_lyrics, KanaRomanizer, Lyrics};
use crate::common::{self, dialogue_rows, words};

fn sample_document() -> Result<String> {
    let lyrics = parse_lyrics(common::SAMPLE_TRANSCRIPT)?;
    let enriched = auto_romanize(&lyrics, &KanaRomanizer);
    Ok(generate_ass(&enriched, &Config::default())?)
}

#[test]
fn test_generateAss_withSampleTranscript_shouldProduceExpectedEvents() -> Result<()> {
    let document = sample_document()?;

    assert_eq!(
        dialogue_rows(&document),
        vec![
            "Dialogue: 1,0:00:02.00,0:00:07.15,LatinTop,,120,120,120,,{\\pos(960,948)\\fad(150,150)}{\\k300}{\\k17}H{\\k17}e{\\k16}l{\\k25}l{\\k25}o {\\k20}w{\\k20}o{\\k20}r{\\k20}l{\\k20}d",
            "Dialogue: 3,0:00:03.00,0:00:07.65,Background,,120,120,210,,{\\pos(960,870)\\fad(150,150)}{\\k300}{\\k50}o{\\k50}o{\\k50}h",
            "Dialogue: 1,0:00:05.00,0:00:09.15,LatinBottom,,120,120,70,,{\\pos(960,1010)\\fad(150,150)}{\\k300}{\\k20}k{\\k20}o {\\k15}k{\\k15}o{\\k15}r{\\k15}o",
            "Dialogue: 2,0:00:05.00,0:00:09.15,OriginalBelowBottom,,120,120,40,,{\\pos(960,1030)\\fad(150,150)}{\\k300}{\\k40}こ{\\k30}こ{\\k30}ろ",
        ]
    );
    Ok(())
}

#[test]
fn test_generateAss_withSampleTranscript_shouldListReferencedStylesInRoleOrder() -> Result<()> {
    let document = sample_document()?;

    let names: Vec<&str> = document
        .lines()
        .filter_map(|l| l.strip_prefix("Style: "))
        .filter_map(|l| l.split(',').next())
        .collect();
    assert_eq!(names, vec!["LatinTop", "LatinBottom", "OriginalBelowBottom", "Background"]);

    let sections: Vec<&str> = document.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(sections, vec!["[Script Info]", "[V4+ Styles]", "[Events]"]);
    Ok(())
}

#[test]
fn test_generateAss_withoutRomanization_shouldKeepKanaAsPrimary() -> Result<()> {
    let lyrics = parse_lyrics(common::SAMPLE_TRANSCRIPT)?;
    let document = generate_ass(&lyrics, &Config::default())?;

    let rows = dialogue_rows(&document);
    assert_eq!(rows.len(), 3);
    assert!(rows[2].ends_with("{\\k300}{\\k40}こ{\\k30}こ{\\k30}ろ"));
    assert!(!document.contains("OriginalBelow"));
    Ok(())
}

#[test]
fn test_generateAss_withHiThere_shouldSplitEachWordEvenly() -> Result<()> {
    let config = Config {
        next_show_before_seconds: 0.0,
        ..Config::default()
    };
    let lyrics = Lyrics::new(vec![words(&[("Hi", 0.0, 1.0), ("there", 1.0, 2.0)])], Vec::new());
    let document = generate_ass(&lyrics, &config)?;

    let rows = dialogue_rows(&document);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].ends_with("}{\\k50}H{\\k50}i {\\k20}t{\\k20}h{\\k20}e{\\k20}r{\\k20}e"));
    Ok(())
}

#[test]
fn test_generateAss_withManyLines_shouldKeepEventsSortedAndPositive() -> Result<()> {
    let lead: Vec<_> = (0..30)
        .map(|i| {
            let start = f64::from(i) * 1.1;
            words(&[("la", start, start + 0.9), ("da", start + 0.9, start + 1.6)])
        })
        .collect();
    let background: Vec<_> = (0..10)
        .map(|i| {
            let start = f64::from(i) * 3.3 + 0.5;
            words(&[("ah", start, start + 2.5)])
        })
        .collect();
    let document = generate_ass(&Lyrics::new(lead, background), &Config::default())?;

    let mut previous = (i64::MIN, 0u8);
    for row in dialogue_rows(&document) {
        let fields: Vec<&str> = row["Dialogue: ".len()..].splitn(10, ',').collect();
        let layer: u8 = fields[0].parse()?;
        let start = parse_time(fields[1]);
        let end = parse_time(fields[2]);

        assert!(end > start, "non-positive duration in {}", row);
        assert!((start, layer) >= previous, "unsorted row {}", row);
        previous = (start, layer);
    }
    Ok(())
}

fn parse_time(value: &str) -> i64 {
    let parts: Vec<f64> = value.split(':').map(|p| p.parse().unwrap()).collect();
    to_centiseconds(parts[0] * 3600.0 + parts[1] * 60.0 + parts[2])
}

#[test]
fn test_generateAss_withCustomCanvas_shouldReflectInHeaderAndAnchors() -> Result<()> {
    let config = Config::from_json_str(r#"{ "play_res_x": 1280, "play_res_y": 720, "wrap_style": 0 }"#)?;
    let lyrics = Lyrics::new(vec![words(&[("la", 5.0, 6.0)])], Vec::new());
    let document = generate_ass(&lyrics, &config)?;

    assert!(document.contains("PlayResX: 1280\nPlayResY: 720\n"));
    assert!(document.contains("WrapStyle: 0\n"));
    assert!(dialogue_rows(&document)[0].contains("\\pos(640,600)"));
    Ok(())
}

#[test]
fn test_generateAss_withLateDisplayStart_shouldKeepHighlightInSync() -> Result<()> {
    let config = Config {
        alternate_positions: false,
        ..Config::default()
    };
    // Second line starts at 3.0 but the slot is busy until 4.15
    let lyrics = Lyrics::new(
        vec![words(&[("la", 0.0, 4.0)]), words(&[("la", 3.0, 6.0)])],
        Vec::new(),
    );
    let document = generate_ass(&lyrics, &config)?;

    let rows = dialogue_rows(&document);
    assert_eq!(rows.len(), 2);
    assert!(rows[1].contains(",0:00:04.15,0:00:06.15,"));
    // 1.15s already elapsed: "l" keeps 0.35s of its 1.5s
    assert!(rows[1].ends_with("}{\\k35}l{\\k150}a"));
    Ok(())
}
