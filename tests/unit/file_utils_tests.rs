/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::PathBuf;

use karasub::file_utils::{FileManager, FileType, PROJECT_SUFFIX};

use crate::common;

/// Test file existence check
#[test]
fn test_file_exists_withExistingAndMissingFiles_shouldDetectCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "lyrics.txt", "la la")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test nested writes create parent directories
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a/b/c/out.lrc");

    FileManager::write_to_file(&path, "[ti:x]\n")?;

    assert_eq!(FileManager::read_to_string(&path)?, "[ti:x]\n");
    assert_eq!(FileManager::read_bytes(&path)?, b"[ti:x]\n");
    Ok(())
}

/// Test output path generation
#[test]
fn test_generate_output_path_withSuffix_shouldJoinStem() {
    let path = FileManager::generate_output_path("/tmp/projects", "abc", PROJECT_SUFFIX);
    assert_eq!(path, PathBuf::from("/tmp/projects/abc.project.json"));
}

/// Test file type detection for every known kind
#[test]
fn test_detect_file_type_withKnownNames_shouldClassify() {
    let cases = [
        ("song.txt", FileType::ReferenceText),
        ("SONG.WAV", FileType::Audio),
        ("song.transcript.json", FileType::Transcript),
        ("1234.project.json", FileType::Project),
        ("lyrics.docx", FileType::Document),
        ("config.json", FileType::Unknown),
        ("noext", FileType::Unknown),
    ];

    for (name, expected) in cases {
        assert_eq!(FileManager::detect_file_type(name), expected, "{}", name);
    }
}

/// Test recursive search returns sorted results
#[test]
fn test_find_files_withNestedDirectories_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    FileManager::ensure_dir(temp_dir.path().join("b"))?;
    common::create_test_file(&temp_dir.path().join("b"), "two.txt", "")?;
    common::create_test_file(temp_dir.path(), "one.txt", "")?;
    common::create_test_file(temp_dir.path(), "one.wav", "")?;

    let found = FileManager::find_files(temp_dir.path(), "txt")?;

    assert_eq!(found, vec![temp_dir.path().join("b/two.txt"), temp_dir.path().join("one.txt")]);
    Ok(())
}
