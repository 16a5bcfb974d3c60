/*!
 * Tests for segmentation, alignment and correction
 */

use karasub::recognizer::StubRecognizer;
use karasub::subtitle::{
    align, align_with, apply_corrections, build_fallback, match_word, normalize_text, round1, segment_uniform, Correction,
    FallbackOptions, SubtitleSet,
};
use karasub::{InputError, ProjectError};
use std::path::Path;

use crate::common::{hello_world_transcript, NINE_WORDS};

/// Fallback output must cover [0, duration] for many shapes of input
#[test]
fn test_segment_uniform_withManySizes_shouldSpanWholeDuration() {
    let options = FallbackOptions::default();

    for count in 1..=30usize {
        for duration in [0.3, 2.0, 14.0, 61.7, 245.35] {
            let text = (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            let set = segment_uniform(&text, duration, &options).unwrap();

            let first = &set.segments()[0];
            let last = set.segments().last().unwrap();
            assert_eq!(first.start, 0.0);
            assert_eq!(last.end, round1(duration));
            assert_eq!(last.end, last.words.last().unwrap().end);
            assert_eq!(set.word_count(), count);
            assert_eq!(set.len(), count.div_ceil(7));
            assert!(set.iter().all(|s| s.is_consistent()));
            assert!(set
                .iter()
                .flat_map(|s| &s.words)
                .all(|w| w.start >= 0.0 && w.end >= 0.0));
        }
    }
}

/// The reference scenario from the lyrics editor
#[test]
fn test_build_fallback_withNineWordsIn14Seconds_shouldProduceTwoSegments() {
    let set = build_fallback(NINE_WORDS, 14.0).unwrap();

    let bounds: Vec<(f64, f64, usize)> = set.iter().map(|s| (s.start, s.end, s.words.len())).collect();
    assert_eq!(bounds, vec![(0.0, 10.9, 7), (10.9, 14.0, 2)]);
}

/// Messy lyrics are normalized before splitting
#[test]
fn test_normalize_text_withMessyLyrics_shouldKeepWordsAndPunctuation() {
    let normalized = normalize_text("  Ночь,  улица… «фонарь»\n\tаптека!  ");
    assert_eq!(normalized, "Ночь, улица фонарь аптека!");
}

/// Unmatched recognizer words keep their own text
#[test]
fn test_match_word_withNoMatch_shouldLeaveRecognizerWord() {
    assert_eq!(match_word("helo", &["hello", "world"]), None);

    let transcript = vec![karasub::recognizer::RecognizedSegment::new(
        0.0,
        1.0,
        "helo",
        vec![karasub::recognizer::RecognizedWord::new("helo", 0.0, 1.0, 0.5)],
    )];
    let set = align(&transcript, "hello world");
    assert_eq!(set.word(0, 0).unwrap().text, "helo");
}

/// Alignment rounds times, clamps confidence and drops empty segments
#[test]
fn test_align_withNoisyTranscript_shouldUseReferenceWords() {
    let set = align(&hello_world_transcript(), "Hello, world! Goodbye.");

    assert_eq!(set.len(), 2);
    let words: Vec<(&str, f64, f64)> = set
        .iter()
        .flat_map(|s| &s.words)
        .map(|w| (w.text.as_str(), w.start, w.end))
        .collect();
    assert_eq!(
        words,
        vec![("Hello,", 0.0, 0.8), ("world!", 0.8, 2.0), ("Goodbye.", 2.6, 3.1)]
    );
    assert_eq!(set.word(1, 0).unwrap().confidence, 1.0);
    assert_eq!(set.segments()[0].text, " hello world");
}

/// An empty reference fails before the recognizer runs
#[test]
fn test_align_with_withEmptyReference_shouldFailWithoutCallingRecognizer() {
    let recognizer = StubRecognizer::returning(hello_world_transcript());

    let result = align_with(&recognizer, Path::new("song.wav"), "   ");

    assert!(matches!(result, Err(ProjectError::Input(InputError::EmptyText))));
    assert_eq!(recognizer.call_count(), 0);
}

/// A valid correction changes exactly one word
#[test]
fn test_apply_corrections_withValidIndex_shouldChangeOnlyThatWord() {
    let original = build_fallback(NINE_WORDS, 14.0).unwrap();
    let mut set = original.clone();

    let report = apply_corrections(&mut set, &[Correction::new(1, 1, 12.0, 13.5)]);

    assert_eq!(report.applied, 1);
    for (si, segment) in set.iter().enumerate() {
        for (wi, word) in segment.words.iter().enumerate() {
            let before = original.word(si, wi).unwrap();
            if (si, wi) == (1, 1) {
                assert_eq!((word.start, word.end), (12.0, 13.5));
                assert_eq!(word.text, before.text);
            } else {
                assert_eq!(word, before);
            }
        }
    }
    // Segment bounds are left as they were
    assert_eq!(set.segments()[1].end, 14.0);
}

/// Invalid corrections are skipped without failing the batch
#[test]
fn test_apply_corrections_withInvalidIndices_shouldChangeNothing() {
    let original = build_fallback(NINE_WORDS, 14.0).unwrap();
    let mut set = original.clone();

    let report = apply_corrections(
        &mut set,
        &[
            Correction::new(2, 0, 1.0, 2.0),
            Correction::new(0, 7, 1.0, 2.0),
            Correction::new(-1, 0, 1.0, 2.0),
            Correction::new(0, -3, 1.0, 2.0),
        ],
    );

    assert_eq!(report.applied, 0);
    assert_eq!(report.skipped, vec![0, 1, 2, 3]);
    assert_eq!(set, original);
}

/// Record conversion reproduces the set exactly
#[test]
fn test_subtitle_record_withCorrectedSet_shouldRoundTrip() {
    let mut set = align(&hello_world_transcript(), "Hello, world! Goodbye.");
    apply_corrections(&mut set, &[Correction::new(0, 0, 0.123, 0.456)]);

    let restored = SubtitleSet::from_record(set.to_record());
    assert_eq!(restored, set);

    let json = serde_json::to_string(&set).unwrap();
    let from_json: SubtitleSet = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, set);
}
