/*!
 * Common test utilities for the karasub test suite
 */

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use karasub::recognizer::{RecognizedSegment, RecognizedWord};

/// Lyrics used across tests: nine words, two fallback segments
pub const NINE_WORDS: &str = "one two three four five six seven eight nine";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a silent mono 16-bit WAV file of the given length
pub fn create_test_wav(dir: &Path, filename: &str, seconds: u32) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(&file_path, spec)?;
    for _ in 0..spec.sample_rate * seconds {
        writer.write_sample(0i16)?;
    }
    writer.finalize()?;
    Ok(file_path)
}

/// Recognizer output for "Hello, world! Goodbye." with lowercase noise
pub fn hello_world_transcript() -> Vec<RecognizedSegment> {
    vec![
        RecognizedSegment::new(
            0.04,
            1.96,
            " hello world",
            vec![
                RecognizedWord::new("hello", 0.04, 0.81, 0.93),
                RecognizedWord::new("world", 0.81, 1.96, 0.88),
            ],
        ),
        RecognizedSegment::new(2.0, 2.4, " [music]", Vec::new()),
        RecognizedSegment::new(
            2.56,
            3.14,
            " goodbye",
            vec![RecognizedWord::new("goodbye", 2.56, 3.14, 1.4)],
        ),
    ]
}
