/*!
 * Recognizer backed by a saved transcript.
 *
 * Speech engines usually run out of process and write their result as JSON.
 * This adapter reads that file and hands the segments to the aligner. Both a
 * bare array of segments and a Whisper-style `{"segments": [...]}` object are
 * accepted.
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::errors::RecognizerError;
use crate::recognizer::{RecognizedSegment, Recognizer};

/// Top-level transcript layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Wrapped { segments: Vec<RecognizedSegment> },
    Bare(Vec<RecognizedSegment>),
}

/// Recognizer that returns the contents of a transcript JSON file
#[derive(Debug, Clone)]
pub struct TranscriptFileRecognizer {
    transcript_path: PathBuf,
}

impl TranscriptFileRecognizer {
    /// Create a recognizer reading from the given transcript file
    pub fn new<P: AsRef<Path>>(transcript_path: P) -> Self {
        Self {
            transcript_path: transcript_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the transcript file
    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    /// Parse transcript JSON content into segments
    pub fn parse(content: &str) -> Result<Vec<RecognizedSegment>, RecognizerError> {
        let document: TranscriptDocument = serde_json::from_str(content)
            .map_err(|e| RecognizerError::ParseError(e.to_string()))?;

        Ok(match document {
            TranscriptDocument::Wrapped { segments } => segments,
            TranscriptDocument::Bare(segments) => segments,
        })
    }
}

impl Recognizer for TranscriptFileRecognizer {
    fn transcribe(&self, audio: &Path) -> Result<Vec<RecognizedSegment>, RecognizerError> {
        debug!(
            "Loading transcript for {} from {}",
            audio.display(),
            self.transcript_path.display()
        );

        let content = fs::read_to_string(&self.transcript_path)?;
        let segments = Self::parse(&content)?;

        if segments.is_empty() {
            return Err(RecognizerError::NoResult(format!(
                "transcript {} contains no segments",
                self.transcript_path.display()
            )));
        }

        Ok(segments)
    }

    fn name(&self) -> &str {
        "transcript-file"
    }
}
