/*!
 * Transcript alignment.
 *
 * Reconciles a recognizer's noisy transcription with the clean reference
 * text. Timing always comes from the recognizer; only per-word text is
 * corrected against the reference. Segment display text stays the
 * recognizer's raw text.
 */

use std::path::Path;

use log::{debug, info};

use crate::errors::{InputError, ProjectError};
use crate::recognizer::{RecognizedSegment, Recognizer};
use crate::subtitle::model::{round1, Segment, SubtitleSet, Word};
use crate::subtitle::normalize::{comparison_key, split_words};

/// Find the reference word a recognizer word corresponds to
///
/// Scans `reference_words` in order and returns the first one that contains
/// the recognizer word, or is contained in it, comparing case-insensitively
/// after normalization. A word that normalizes to nothing matches nothing.
///
/// The first match wins, so a reference text that repeats a word always
/// resolves to its first occurrence.
pub fn match_word<'a, S: AsRef<str>>(recognizer_word: &str, reference_words: &'a [S]) -> Option<&'a str> {
    let needle = comparison_key(recognizer_word);
    if needle.is_empty() {
        return None;
    }

    reference_words
        .iter()
        .map(|candidate| candidate.as_ref())
        .find(|candidate| {
            let candidate_key = candidate.to_lowercase();
            candidate_key.contains(&needle) || needle.contains(&candidate_key)
        })
}

/// Align recognizer segments against normalized reference text
///
/// Segments without words are dropped. Unmatched words keep the recognizer's
/// text; this is a degradation, never an error.
pub fn align(segments: &[RecognizedSegment], reference: &str) -> SubtitleSet {
    let reference_words = split_words(reference);
    let mut unmatched = 0usize;
    let mut dropped = 0usize;

    let aligned: Vec<Segment> = segments
        .iter()
        .filter(|segment| {
            let keep = !segment.words.is_empty();
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|segment| {
            let words = segment
                .words
                .iter()
                .map(|word| {
                    let text = match match_word(&word.text, &reference_words) {
                        Some(reference_word) => reference_word.to_string(),
                        None => {
                            unmatched += 1;
                            debug!("No reference match for '{}', keeping recognizer text", word.text);
                            word.text.clone()
                        }
                    };

                    Word::new(
                        text,
                        round1(word.start),
                        round1(word.end),
                        word.confidence.clamp(0.0, 1.0),
                    )
                })
                .collect();

            Segment::new(round1(segment.start), round1(segment.end), segment.text.clone(), words)
        })
        .collect();

    debug!(
        "Aligned {} segments against {} reference words ({} unmatched words, {} empty segments dropped)",
        aligned.len(),
        reference_words.len(),
        unmatched,
        dropped
    );

    SubtitleSet::from_segments(aligned)
}

/// Transcribe audio with the injected recognizer and align the result
///
/// Fails with `InputError::EmptyText` when the reference has no words, or
/// with the recognizer's own error.
pub fn align_with(recognizer: &dyn Recognizer, audio: &Path, reference: &str) -> Result<SubtitleSet, ProjectError> {
    if split_words(reference).is_empty() {
        return Err(InputError::EmptyText.into());
    }

    let segments = recognizer.transcribe(audio)?;
    info!(
        "Recognizer '{}' returned {} segments for {}",
        recognizer.name(),
        segments.len(),
        audio.display()
    );

    Ok(align(&segments, reference))
}
