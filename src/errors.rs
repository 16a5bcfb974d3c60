/*!
 * Error types for the karasub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors caused by unusable ingestion input
///
/// Any of these aborts processing for the project; no partial subtitle set
/// is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The reference text contains no words after normalization
    #[error("Reference text contains no words")]
    EmptyText,

    /// The audio duration is zero, negative or not a number
    #[error("Invalid audio duration: {0}")]
    InvalidDuration(f64),

    /// The reference text bytes are not valid UTF-8
    #[error("Reference text is not valid UTF-8: {0}")]
    UndecodableText(String),
}

/// Errors reported by a speech recognizer implementation
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// The recognizer could not read its input
    #[error("Recognizer I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The recognizer output could not be parsed
    #[error("Failed to parse recognizer output: {0}")]
    ParseError(String),

    /// The recognizer produced no usable result
    #[error("Recognizer produced no result: {0}")]
    NoResult(String),
}

/// Errors raised while rendering a subtitle set to text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// A timestamp that would be printed is negative or not finite
    #[error("Invalid timestamp {value} in segment {segment} (word {word:?})")]
    InvalidTimestamp {
        /// Segment index
        segment: usize,
        /// Word index, when the bad value belongs to a word
        word: Option<usize>,
        /// The offending value
        value: f64,
    },

    /// The requested export format is unknown
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Errors from the project registry
#[derive(Error, Debug)]
pub enum ProjectError {
    /// No project is registered under this id
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Another ingestion for the same project is still running
    #[error("Project {0} is already being processed")]
    AlreadyProcessing(String),

    /// The project has no subtitles yet
    #[error("Project {0} has no subtitles")]
    NoSubtitles(String),

    /// Ingestion input was rejected
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The injected recognizer failed
    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    /// Rendering failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from ingestion input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from a recognizer
    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    /// Error from an exporter
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Error from the project registry
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

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
