use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Suffix of recognizer transcript files next to the audio
pub const TRANSCRIPT_SUFFIX: &str = ".transcript.json";

// @const: Suffix of saved project records
pub const PROJECT_SUFFIX: &str = ".project.json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path `<dir>/<stem><suffix>`
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, stem: &str, suffix: &str) -> PathBuf {
        output_dir.as_ref().join(format!("{}{}", stem, suffix))
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let wanted = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify an input file by its name
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let name = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(TRANSCRIPT_SUFFIX) {
            FileType::Transcript
        } else if name.ends_with(PROJECT_SUFFIX) {
            FileType::Project
        } else if name.ends_with(".txt") {
            FileType::ReferenceText
        } else if name.ends_with(".wav") {
            FileType::Audio
        } else if name.ends_with(".docx") {
            FileType::Document
        } else {
            FileType::Unknown
        }
    }

    /// Transcript file expected next to an audio file (`song.wav` -> `song.transcript.json`)
    pub fn transcript_path_for<P: AsRef<Path>>(audio: P) -> PathBuf {
        let audio = audio.as_ref();
        let stem = audio.file_stem().unwrap_or_default().to_string_lossy();
        audio.with_file_name(format!("{}{}", stem, TRANSCRIPT_SUFFIX))
    }
}

/// Enum representing the input file kinds the tool deals with
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    /// Plain UTF-8 reference text
    ReferenceText,
    /// WAV audio
    Audio,
    /// Saved recognizer output
    Transcript,
    /// Saved project record
    Project,
    /// Word-processor document; text extraction is not supported
    Document,
    /// Unknown file type
    Unknown,
}
