use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::export::ExportFormat;
use crate::subtitle::FallbackOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default project language code (ISO)
    #[serde(default = "default_language")]
    pub language: String,

    /// Fallback segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Audio probing settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Folder mode settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the uniform fallback segmenter
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Words per subtitle segment
    #[serde(default = "default_words_per_segment")]
    pub words_per_segment: usize,

    /// Confidence assigned to uniformly timed words (0.0 to 1.0)
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            words_per_segment: default_words_per_segment(),
            fallback_confidence: default_fallback_confidence(),
        }
    }
}

/// Audio probing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AudioConfig {
    /// Duration assumed when the WAV header cannot be read.
    /// `null` turns an unreadable header into a processing error instead.
    #[serde(default = "default_fallback_duration_secs")]
    pub fallback_duration_secs: Option<f64>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            fallback_duration_secs: default_fallback_duration_secs(),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Directory for project records and exports
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Formats written after processing
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            formats: default_formats(),
        }
    }
}

/// Folder mode settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of projects processed at the same time
    #[serde(default = "default_max_concurrent_projects")]
    pub max_concurrent_projects: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_projects: default_max_concurrent_projects(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "ru".to_string()
}

fn default_words_per_segment() -> usize {
    7
}

fn default_fallback_confidence() -> f64 {
    0.8
}

fn default_fallback_duration_secs() -> Option<f64> {
    Some(120.0) // two minutes
}

fn default_output_directory() -> String {
    "projects".to_string()
}

fn default_formats() -> Vec<ExportFormat> {
    ExportFormat::ALL.to_vec()
}

fn default_max_concurrent_projects() -> usize {
    2
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.language)?;

        if self.segmentation.words_per_segment == 0 {
            return Err(anyhow!("segmentation.words_per_segment must be at least 1"));
        }

        let confidence = self.segmentation.fallback_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(anyhow!("segmentation.fallback_confidence must be within 0.0..=1.0, got {}", confidence));
        }

        if let Some(duration) = self.audio.fallback_duration_secs {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(anyhow!("audio.fallback_duration_secs must be positive, got {}", duration));
            }
        }

        if self.output.formats.is_empty() {
            return Err(anyhow!("output.formats must name at least one format"));
        }

        if self.batch.max_concurrent_projects == 0 {
            return Err(anyhow!("batch.max_concurrent_projects must be at least 1"));
        }

        Ok(())
    }

    /// Options for the fallback segmenter
    pub fn fallback_options(&self) -> FallbackOptions {
        FallbackOptions {
            words_per_segment: self.segmentation.words_per_segment,
            confidence: self.segmentation.fallback_confidence,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            segmentation: SegmentationConfig::default(),
            audio: AudioConfig::default(),
            output: OutputConfig::default(),
            batch: BatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
