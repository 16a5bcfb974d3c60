/*!
 * Manual timing corrections.
 *
 * A correction overwrites one word's start and end, addressed by zero-based
 * segment and word index. Values are written verbatim. Segment bounds and
 * word ordering are not re-derived, so a correction can leave a segment whose
 * `start`/`end` no longer match its words.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::subtitle::model::SubtitleSet;

/// One caller-supplied timing override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Zero-based segment index; negative values are never in range
    pub segment_index: i64,

    /// Zero-based word index within the segment
    pub word_index: i64,

    /// New start time in seconds
    #[serde(alias = "new_start_time")]
    pub new_start: f64,

    /// New end time in seconds
    #[serde(alias = "new_end_time")]
    pub new_end: f64,
}

impl Correction {
    pub fn new(segment_index: i64, word_index: i64, new_start: f64, new_end: f64) -> Self {
        Self {
            segment_index,
            word_index,
            new_start,
            new_end,
        }
    }
}

/// Outcome of applying a correction batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// Number of entries written to the set
    pub applied: usize,

    /// Batch positions of entries skipped for being out of range
    pub skipped: Vec<usize>,
}

impl CorrectionReport {
    /// Total entries seen
    pub fn total(&self) -> usize {
        self.applied + self.skipped.len()
    }
}

/// Apply a batch of corrections in order
///
/// Out-of-range entries are skipped individually; the batch as a whole never
/// fails.
pub fn apply_corrections(set: &mut SubtitleSet, corrections: &[Correction]) -> CorrectionReport {
    let mut report = CorrectionReport::default();

    for (position, correction) in corrections.iter().enumerate() {
        let target = match (
            usize::try_from(correction.segment_index),
            usize::try_from(correction.word_index),
        ) {
            (Ok(segment_index), Ok(word_index)) => set
                .segments_mut()
                .get_mut(segment_index)
                .and_then(|segment| segment.words.get_mut(word_index)),
            _ => None,
        };

        match target {
            Some(word) => {
                word.start = correction.new_start;
                word.end = correction.new_end;
                report.applied += 1;
            }
            None => {
                debug!(
                    "Skipping correction {}: no word at segment {}, index {}",
                    position, correction.segment_index, correction.word_index
                );
                report.skipped.push(position);
            }
        }
    }

    report
}
