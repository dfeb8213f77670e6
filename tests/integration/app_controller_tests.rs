/*!
 * Controller workflow tests against real files
 */

use std::fs;
use anyhow::Result;
use lyricass::app_config::Config;
use lyricass::app_controller::{Controller, FolderSummary, RunOutcome};
use lyricass::lyrics::Transliterator;
use crate::common;

struct NoTransliteration;

impl Transliterator for NoTransliteration {
    fn transliterate(&self, _text: &str) -> Option<String> {
        None
    }
}

#[test]
fn test_run_withSingleFile_shouldWriteDocumentBesideInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "lyric.json")?;
    let controller = Controller::new_for_test()?;

    let outcome = controller.run(input, None, false)?;
    let expected = temp_dir.path().join("lyric.ass");
    assert_eq!(outcome, RunOutcome::Written(expected.clone()));

    let document = fs::read_to_string(&expected)?;
    assert!(document.starts_with("[Script Info]\n"));
    assert_eq!(common::dialogue_rows(&document).len(), 4);
    assert!(document.contains("OriginalBelowBottom"));
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "lyric.json")?;
    let output = common::create_test_file(temp_dir.path(), "custom.ass", "keep me")?;
    let controller = Controller::new_for_test()?;

    let outcome = controller.run(input.clone(), Some(output.clone()), false)?;
    assert_eq!(outcome, RunOutcome::Skipped(output.clone()));
    assert_eq!(fs::read_to_string(&output)?, "keep me");

    let outcome = controller.run(input, Some(output.clone()), true)?;
    assert_eq!(outcome, RunOutcome::Written(output.clone()));
    assert!(fs::read_to_string(&output)?.contains("[Events]"));
    Ok(())
}

#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    assert!(controller.run(temp_dir.path().join("absent.json"), None, false).is_err());
    Ok(())
}

#[test]
fn test_convert_withRomanizationDisabled_shouldNotAddOverlay() -> Result<()> {
    let config = Config {
        romanize: false,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let lyrics = lyricass::lyrics::parse_lyrics(common::SAMPLE_TRANSCRIPT)?;

    let document = controller.convert(&lyrics)?;
    assert_eq!(common::dialogue_rows(&document).len(), 3);
    Ok(())
}

#[test]
fn test_convert_withCustomTransliterator_shouldUseIt() -> Result<()> {
    let controller = Controller::new_for_test()?.with_transliterator(Box::new(NoTransliteration));
    let lyrics = lyricass::lyrics::parse_lyrics(common::SAMPLE_TRANSCRIPT)?;

    let document = controller.convert(&lyrics)?;
    assert!(!document.contains("OriginalBelow"));
    Ok(())
}

#[test]
fn test_withConfig_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.styles.clear();
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_runFolder_shouldConvertEveryTranscriptAndCountFailures() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("album"))?;
    common::create_test_transcript(root, "first.json")?;
    common::create_test_transcript(&root.join("album"), "second.json")?;
    common::create_test_file(root, "broken.json", "{ not json")?;
    common::create_test_file(root, "first.ass", "existing")?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run_folder(root.to_path_buf(), false)?;

    assert_eq!(
        summary,
        FolderSummary {
            processed: 1,
            skipped: 1,
            errors: 1,
        }
    );
    assert!(root.join("album").join("second.ass").exists());
    assert_eq!(fs::read_to_string(root.join("first.ass"))?, "existing");
    Ok(())
}

#[test]
fn test_runFolder_withoutTranscripts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.txt", "")?;

    let controller = Controller::new_for_test()?;
    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).is_err());
    Ok(())
}

#[test]
fn test_runPath_withDirectory_shouldDispatchToFolderMode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "song.json")?;

    let controller = Controller::new_for_test()?;
    controller.run_path(temp_dir.path(), None, false)?;
    assert!(temp_dir.path().join("song.ass").exists());

    assert!(controller.run_path(&temp_dir.path().join("missing"), None, false).is_err());
    Ok(())
}
