/*!
 * Uniform-time fallback segmentation.
 *
 * Used when no recognizer output exists: every word of the reference text
 * gets an equal share of the audio duration and words are grouped into
 * fixed-size segments. No acoustic signal is consulted.
 */

use log::debug;

use crate::errors::InputError;
use crate::subtitle::model::{round1, Segment, SubtitleSet, Word};
use crate::subtitle::normalize::split_words;

/// Number of words that closes a segment
pub const DEFAULT_WORDS_PER_SEGMENT: usize = 7;

/// Confidence assigned to uniformly timed words
pub const FALLBACK_CONFIDENCE: f64 = 0.8;

/// Settings for the uniform segmenter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackOptions {
    /// Words per segment (the last segment may hold fewer)
    pub words_per_segment: usize,
    /// Confidence stamped on every generated word
    pub confidence: f64,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            words_per_segment: DEFAULT_WORDS_PER_SEGMENT,
            confidence: FALLBACK_CONFIDENCE,
        }
    }
}

/// Build a uniformly timed subtitle set, rejecting unusable input
///
/// Fails with `InputError::InvalidDuration` for a non-positive or non-finite
/// duration and with `InputError::EmptyText` when the text has no words.
pub fn segment_uniform(text: &str, duration: f64, options: &FallbackOptions) -> Result<SubtitleSet, InputError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(InputError::InvalidDuration(duration));
    }

    let words = split_words(text);
    if words.is_empty() {
        return Err(InputError::EmptyText);
    }

    Ok(build_segments(&words, duration, options))
}

/// Build a uniformly timed subtitle set with default options
///
/// Text without words yields an empty set.
pub fn build_fallback(text: &str, duration: f64) -> Result<SubtitleSet, InputError> {
    match segment_uniform(text, duration, &FallbackOptions::default()) {
        Err(InputError::EmptyText) => Ok(SubtitleSet::new()),
        other => other,
    }
}

fn build_segments(words: &[&str], duration: f64, options: &FallbackOptions) -> SubtitleSet {
    let per_segment = options.words_per_segment.max(1);
    let total = words.len();
    let time_per_word = duration / total as f64;

    let mut segments = Vec::with_capacity(total.div_ceil(per_segment));
    let mut current: Vec<Word> = Vec::with_capacity(per_segment);

    for (i, text) in words.iter().enumerate() {
        let is_last = i == total - 1;
        let start = i as f64 * time_per_word;
        // The last word ends exactly at the audio duration
        let end = if is_last { duration } else { (i + 1) as f64 * time_per_word };

        current.push(Word::new(*text, round1(start), round1(end), options.confidence));

        if current.len() >= per_segment || is_last {
            let closed = std::mem::replace(&mut current, Vec::with_capacity(per_segment));
            if let Some(segment) = Segment::from_words(closed) {
                segments.push(segment);
            }
        }
    }

    debug!(
        "Uniform segmentation: {} words, {:.4}s per word, {} segments",
        total,
        time_per_word,
        segments.len()
    );

    SubtitleSet::from_segments(segments)
}
