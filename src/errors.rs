/*!
 * Error types for the lyricass application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors caused by an unusable document configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// None of the candidate keys for a required style role is configured
    #[error("Missing style for role '{role}' (tried: {})", keys.join(", "))]
    MissingStyle {
        /// Logical role that was being resolved
        role: &'static str,
        /// Candidate keys, in lookup order
        keys: Vec<&'static str>,
    },

    /// A color string that is neither `RRGGBB`, `#RRGGBB` nor `&H`-prefixed hex
    #[error("Invalid color: {value}")]
    InvalidColor {
        /// The rejected input
        value: String,
    },

    /// Any other out-of-range configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Errors that can occur while reading a lyric transcript
#[derive(Error, Debug)]
pub enum LyricsError {
    /// The transcript has no query results at all
    #[error("No queries in lyric transcript")]
    NoQueries,

    /// The transcript is not valid JSON or has the wrong shape
    #[error("Failed to parse lyric transcript: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from transcript parsing
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
