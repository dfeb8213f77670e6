/*!
 * Tests for error types and conversions
 */

use lyricass::errors::{AppError, ConfigError, LyricsError};

#[test]
fn test_configError_missingStyle_shouldListCandidateKeys() {
    let error = ConfigError::MissingStyle {
        role: "primary-top",
        keys: vec!["latin_top", "current"],
    };
    let display = format!("{}", error);
    assert!(display.contains("primary-top"));
    assert!(display.contains("latin_top, current"));
}

#[test]
fn test_configError_invalidColor_shouldDisplayValue() {
    let error = ConfigError::InvalidColor { value: "#XYZ".to_string() };
    assert_eq!(error.to_string(), "Invalid color: #XYZ");
}

#[test]
fn test_lyricsError_fromSerdeJson_shouldWrap() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: LyricsError = json_error.into();
    assert!(error.to_string().starts_with("Failed to parse lyric transcript"));
}

#[test]
fn test_appError_fromConfigError_shouldKeepSource() {
    let error: AppError = ConfigError::InvalidValue("pre-show".to_string()).into();
    assert!(matches!(error, AppError::Config(ConfigError::InvalidValue(_))));
    assert!(error.to_string().contains("pre-show"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "lyric.json missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("lyric.json missing")));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(error.to_string(), "Unknown error: something odd");
}

#[test]
fn test_appError_intoAnyhow_shouldPreserveMessage() {
    let error = anyhow::Error::new(AppError::from(LyricsError::NoQueries));
    assert!(format!("{}", error).contains("No queries"));
}
