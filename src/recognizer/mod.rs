/*!
 * Speech recognizer capability.
 *
 * The recognition engine itself is an external black box. This module defines
 * the contract it must satisfy and the shape of its output, so the aligner can
 * take any implementation by injection:
 * - `transcript_file`: reads recognizer output saved as JSON
 * - `mock`: deterministic stub for tests
 */

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RecognizerError;

/// One word as reported by the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    /// Word text, possibly misspelled or oddly cased
    #[serde(alias = "word")]
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Recognition confidence
    #[serde(default = "default_confidence", alias = "probability")]
    pub confidence: f64,
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }
}

/// One segment of the recognizer's own segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSegment {
    pub start: f64,
    pub end: f64,

    /// Raw segment text as transcribed
    pub text: String,

    #[serde(default)]
    pub words: Vec<RecognizedWord>,
}

impl RecognizedSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>, words: Vec<RecognizedWord>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words,
        }
    }
}

fn default_confidence() -> f64 {
    1.0
}

/// Common trait for speech recognizers
///
/// Implementations turn an audio file into time-aligned segments with
/// word-level timestamps. The call may be slow; scheduling it is the caller's
/// concern.
pub trait Recognizer: Send + Sync + Debug {
    /// Transcribe the given audio file
    ///
    /// # Arguments
    /// * `audio` - Path to the audio file
    ///
    /// # Returns
    /// * `Result<Vec<RecognizedSegment>, RecognizerError>` - Ordered segments or an error
    fn transcribe(&self, audio: &Path) -> Result<Vec<RecognizedSegment>, RecognizerError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

pub mod transcript_file;
pub mod mock;

pub use mock::StubRecognizer;
pub use transcript_file::TranscriptFileRecognizer;
