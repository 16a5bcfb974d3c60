/*!
 * Project records.
 *
 * A project is one ingestion unit: a reference text, an audio file and the
 * subtitles produced from them. Records serialize to pretty JSON for the
 * persistence layer.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::subtitle::{Correction, CorrectionReport, SubtitleSet};

/// Processing state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Ingestion has not finished yet
    Processing,
    /// Subtitles are available
    Completed,
    /// Ingestion failed; see `error_message`
    Error,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectStatus::Processing => "processing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Parameters for creating a new project
#[derive(Debug, Clone)]
pub struct ProjectCreateParams {
    /// Display name, also used for export file names
    pub name: String,
    /// ISO 639 language code
    pub language: String,
    /// Audio file name as uploaded
    pub audio_filename: String,
    /// Reference text file name as uploaded
    pub text_filename: String,
}

impl ProjectCreateParams {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        audio_filename: impl Into<String>,
        text_filename: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            audio_filename: audio_filename.into(),
            text_filename: text_filename.into(),
        }
    }
}

/// One applied correction batch, kept as an audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionBatch {
    /// When the batch was applied
    pub applied_at: DateTime<Utc>,
    /// The batch as submitted
    pub corrections: Vec<Correction>,
    /// What happened to each entry
    pub report: CorrectionReport,
}

/// A karaoke subtitle project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// ISO 639 language code
    pub language: String,
    /// Audio file name
    pub audio_filename: String,
    /// Reference text file name
    pub text_filename: String,
    /// Processing state
    pub status: ProjectStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Audio duration in seconds, once known
    #[serde(default)]
    pub audio_duration: Option<f64>,
    /// Timed subtitles, once ingestion completed
    #[serde(default)]
    pub subtitles: Option<SubtitleSet>,
    /// Applied correction batches, oldest first
    #[serde(default)]
    pub corrections: Vec<CorrectionBatch>,
    /// Reason for the `error` status
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Project {
    /// Create a project in the `processing` state with a fresh id
    pub fn new(params: ProjectCreateParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            language: params.language,
            audio_filename: params.audio_filename,
            text_filename: params.text_filename,
            status: ProjectStatus::Processing,
            created_at: Utc::now(),
            audio_duration: None,
            subtitles: None,
            corrections: Vec::new(),
            error_message: None,
        }
    }

    /// Record successful ingestion
    pub fn complete(&mut self, subtitles: SubtitleSet, audio_duration: f64) {
        self.subtitles = Some(subtitles);
        self.audio_duration = Some(audio_duration);
        self.status = ProjectStatus::Completed;
        self.error_message = None;
    }

    /// Record failed ingestion; any previous subtitles are discarded
    pub fn fail(&mut self, message: impl Into<String>) {
        self.subtitles = None;
        self.status = ProjectStatus::Error;
        self.error_message = Some(message.into());
    }

    /// Short id used in log lines
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    /// Number of correction entries ever applied
    pub fn applied_corrections(&self) -> usize {
        self.corrections.iter().map(|batch| batch.report.applied).sum()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.subtitles.as_ref().map_or(0, SubtitleSet::len);
        write!(
            f,
            "[{}] {} ({}, {} segments, {})",
            self.short_id(),
            self.name,
            self.language,
            segments,
            self.status
        )
    }
}
