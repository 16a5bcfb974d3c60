/*!
 * Tests for recognizer adapters
 */

use anyhow::Result;

use karasub::recognizer::{Recognizer, StubRecognizer, TranscriptFileRecognizer};
use karasub::RecognizerError;

use crate::common;

/// Whisper-style output with `word`/`probability` keys is accepted
#[test]
fn test_transcript_file_withWhisperLayout_shouldParseWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let transcript = common::create_test_file(
        temp_dir.path(),
        "song.transcript.json",
        r#"{
            "text": " hello world",
            "segments": [
                {"start": 0.0, "end": 1.2, "text": " hello world",
                 "words": [
                    {"word": " hello", "start": 0.0, "end": 0.5, "probability": 0.91},
                    {"word": " world", "start": 0.5, "end": 1.2}
                 ]}
            ]
        }"#,
    )?;

    let recognizer = TranscriptFileRecognizer::new(&transcript);
    let segments = recognizer.transcribe(&temp_dir.path().join("song.wav"))?;

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].words[0].text, " hello");
    assert_eq!(segments[0].words[0].confidence, 0.91);
    assert_eq!(segments[0].words[1].confidence, 1.0);
    assert_eq!(recognizer.name(), "transcript-file");
    Ok(())
}

/// A bare segment array is accepted too
#[test]
fn test_transcript_parse_withBareArray_shouldParseSegments() {
    let segments = TranscriptFileRecognizer::parse(
        r#"[{"start": 1.0, "end": 2.0, "text": "la", "words": [{"text": "la", "start": 1.0, "end": 2.0, "confidence": 0.5}]},
            {"start": 2.0, "end": 3.0, "text": "instrumental"}]"#,
    )
    .unwrap();

    assert_eq!(segments.len(), 2);
    assert!(segments[1].words.is_empty());
}

/// Missing, malformed and empty transcripts are distinct errors
#[test]
fn test_transcript_file_withBadInput_shouldReportErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = temp_dir.path().join("song.wav");

    let missing = TranscriptFileRecognizer::new(temp_dir.path().join("none.json"));
    assert!(matches!(missing.transcribe(&audio), Err(RecognizerError::Io(_))));

    let malformed = common::create_test_file(temp_dir.path(), "bad.json", "{not json")?;
    assert!(matches!(
        TranscriptFileRecognizer::new(malformed).transcribe(&audio),
        Err(RecognizerError::ParseError(_))
    ));

    let empty = common::create_test_file(temp_dir.path(), "empty.json", r#"{"segments": []}"#)?;
    assert!(matches!(
        TranscriptFileRecognizer::new(empty).transcribe(&audio),
        Err(RecognizerError::NoResult(_))
    ));
    Ok(())
}

/// The stub counts calls across clones
#[test]
fn test_stub_recognizer_withClones_shouldShareCallCount() {
    let stub = StubRecognizer::returning(common::hello_world_transcript());
    let clone = stub.clone();

    assert_eq!(stub.transcribe(std::path::Path::new("a.wav")).unwrap().len(), 3);
    assert!(clone.transcribe(std::path::Path::new("b.wav")).is_ok());
    assert_eq!(stub.call_count(), 2);

    assert!(StubRecognizer::failing().transcribe(std::path::Path::new("a.wav")).is_err());
}
