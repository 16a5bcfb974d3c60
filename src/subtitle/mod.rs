/*!
 * Subtitle timing engine.
 *
 * - `model`: words, segments, subtitle sets and their record form
 * - `normalize`: reference text canonicalization
 * - `fallback`: uniform-time segmentation without a recognizer
 * - `align`: reconciliation of recognizer output with the reference text
 * - `correction`: indexed word timing overrides
 */

pub mod model;
pub mod normalize;
pub mod fallback;
pub mod align;
pub mod correction;

pub use model::{round1, Segment, SegmentRecord, SubtitleRecord, SubtitleSet, Word, WordRecord};
pub use normalize::{decode_reference, normalize_text, split_words};
pub use fallback::{build_fallback, segment_uniform, FallbackOptions};
pub use align::{align, align_with, match_word};
pub use correction::{apply_corrections, Correction, CorrectionReport};
