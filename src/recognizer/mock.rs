/*!
 * Stub recognizer for testing.
 *
 * - `StubRecognizer::returning(segments)` - Always returns the given segments
 * - `StubRecognizer::failing()` - Always fails with an error
 */

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::RecognizerError;
use crate::recognizer::{RecognizedSegment, Recognizer};

/// Behavior mode for the stub recognizer
#[derive(Debug, Clone, PartialEq)]
pub enum StubBehavior {
    /// Returns a fixed transcription
    Returning(Vec<RecognizedSegment>),
    /// Always fails
    Failing,
}

/// Deterministic recognizer for tests
#[derive(Debug, Clone)]
pub struct StubRecognizer {
    behavior: StubBehavior,
    call_count: Arc<AtomicUsize>,
}

impl StubRecognizer {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a stub that returns the given segments
    pub fn returning(segments: Vec<RecognizedSegment>) -> Self {
        Self::new(StubBehavior::Returning(segments))
    }

    /// Create a stub that always fails
    pub fn failing() -> Self {
        Self::new(StubBehavior::Failing)
    }

    /// Number of times `transcribe` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Recognizer for StubRecognizer {
    fn transcribe(&self, audio: &Path) -> Result<Vec<RecognizedSegment>, RecognizerError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            StubBehavior::Returning(segments) => Ok(segments.clone()),
            StubBehavior::Failing => Err(RecognizerError::NoResult(format!(
                "stub recognizer refused {}",
                audio.display()
            ))),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}
