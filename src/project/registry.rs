/*!
 * In-memory project registry.
 *
 * Each project lives behind its own `RwLock`: corrections take the write
 * lock, exports and snapshots take the read lock. Ingestion additionally
 * marks the project as in flight so that a second ingestion of the same
 * project fails fast instead of racing the first one.
 */

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, error, info, warn};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{InputError, ProjectError};
use crate::export::ExportFormat;
use crate::file_utils::{FileManager, PROJECT_SUFFIX};
use crate::recognizer::Recognizer;
use crate::subtitle::{
    align_with, apply_corrections, decode_reference, normalize_text, segment_uniform, Correction, CorrectionReport,
    FallbackOptions, SubtitleSet,
};

use super::models::{CorrectionBatch, Project, ProjectCreateParams};

/// Where the timing of an ingestion comes from
#[derive(Clone, Copy)]
pub enum TimingSource<'a> {
    /// Uniform time allocation over the audio duration
    Fallback,
    /// An injected recognizer run on the given audio file
    Recognizer {
        recognizer: &'a dyn Recognizer,
        audio: &'a Path,
    },
}

/// Marks a project as being ingested until dropped
pub struct IngestGuard<'a> {
    registry: &'a ProjectRegistry,
    id: String,
}

impl Drop for IngestGuard<'_> {
    fn drop(&mut self) {
        self.registry.in_flight.lock().remove(&self.id);
        debug!("Project {} released", self.id);
    }
}

/// Shared handle to one project
pub type ProjectHandle = Arc<RwLock<Project>>;

/// Registry of projects addressed by id
#[derive(Default)]
pub struct ProjectRegistry {
    projects: RwLock<HashMap<String, ProjectHandle>>,
    in_flight: Mutex<HashSet<String>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register a new project in the `processing` state and return its id
    pub fn create(&self, params: ProjectCreateParams) -> String {
        let project = Project::new(params);
        info!("Created project {}", project);
        self.insert(project)
    }

    /// Register an existing project record, replacing any with the same id
    pub fn insert(&self, project: Project) -> String {
        let id = project.id.clone();
        self.projects.write().insert(id.clone(), Arc::new(RwLock::new(project)));
        id
    }

    /// Shared handle to a project
    pub fn get(&self, id: &str) -> Result<ProjectHandle, ProjectError> {
        self.projects
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    /// Copy of the current project state
    pub fn snapshot(&self, id: &str) -> Result<Project, ProjectError> {
        Ok(self.get(id)?.read().clone())
    }

    /// Snapshots of every project, oldest first
    pub fn list(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .read()
            .values()
            .map(|handle| handle.read().clone())
            .collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        projects
    }

    /// Remove a project, returning its last state
    pub fn remove(&self, id: &str) -> Result<Project, ProjectError> {
        let handle = self
            .projects
            .write()
            .remove(id)
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))?;
        let project = handle.read().clone();
        Ok(project)
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Mark a project as in flight
    ///
    /// Fails with `ProjectError::AlreadyProcessing` while another guard for
    /// the same project is alive.
    pub fn begin_ingest(&self, id: &str) -> Result<IngestGuard<'_>, ProjectError> {
        self.get(id)?;
        if !self.in_flight.lock().insert(id.to_string()) {
            return Err(ProjectError::AlreadyProcessing(id.to_string()));
        }
        Ok(IngestGuard {
            registry: self,
            id: id.to_string(),
        })
    }

    /// Whether an ingestion is running for the project
    pub fn is_processing(&self, id: &str) -> bool {
        self.in_flight.lock().contains(id)
    }

    /// Build subtitles for a project from reference text bytes and timing
    ///
    /// A recognizer that fails or yields nothing usable is replaced by the
    /// uniform segmenter. Input errors move the project to `error` and are
    /// returned; no partial subtitles are stored.
    pub fn ingest(
        &self,
        id: &str,
        reference: &[u8],
        audio_duration: f64,
        source: TimingSource<'_>,
        options: &FallbackOptions,
    ) -> Result<SubtitleSet, ProjectError> {
        let _guard = self.begin_ingest(id)?;
        let handle = self.get(id)?;

        // Timing is computed without holding the project lock
        match build_subtitles(reference, audio_duration, source, options) {
            Ok(subtitles) => {
                let mut project = handle.write();
                project.complete(subtitles.clone(), audio_duration);
                info!(
                    "Project {} completed: {} segments, {} words",
                    project.short_id(),
                    subtitles.len(),
                    subtitles.word_count()
                );
                Ok(subtitles)
            }
            Err(e) => {
                let mut project = handle.write();
                project.audio_duration = Some(audio_duration);
                project.fail(e.to_string());
                error!("Project {} failed: {}", project.short_id(), e);
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Corrections and export
    // =========================================================================

    /// Apply a correction batch under the project's write lock
    pub fn apply_corrections(&self, id: &str, corrections: &[Correction]) -> Result<CorrectionReport, ProjectError> {
        let handle = self.get(id)?;
        let mut project = handle.write();

        let subtitles = project
            .subtitles
            .as_mut()
            .ok_or_else(|| ProjectError::NoSubtitles(id.to_string()))?;
        let report = apply_corrections(subtitles, corrections);

        info!(
            "Project {}: applied {} of {} corrections",
            project.short_id(),
            report.applied,
            report.total()
        );
        project.corrections.push(CorrectionBatch {
            applied_at: Utc::now(),
            corrections: corrections.to_vec(),
            report: report.clone(),
        });

        Ok(report)
    }

    /// Render a project's subtitles under its read lock
    pub fn export(&self, id: &str, format: ExportFormat) -> Result<String, ProjectError> {
        let handle = self.get(id)?;
        let project = handle.read();

        let subtitles = project
            .subtitles
            .as_ref()
            .ok_or_else(|| ProjectError::NoSubtitles(id.to_string()))?;
        let rendered = format.render(subtitles, &project.name)?;
        debug!("Project {} exported as {}", project.short_id(), format);
        Ok(rendered)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write a project record to `<dir>/<id>.project.json`
    pub fn save(&self, id: &str, dir: &Path) -> Result<PathBuf> {
        let project = self.snapshot(id)?;
        let path = FileManager::generate_output_path(dir, &project.id, PROJECT_SUFFIX);
        save_project(&project, &path)?;
        Ok(path)
    }

    /// Load a project record from disk and register it
    pub fn load(&self, path: &Path) -> Result<String> {
        let project = load_project(path)?;
        debug!("Loaded project {} from {}", project, path.display());
        Ok(self.insert(project))
    }
}

/// Write a project record as pretty JSON
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(project).context("Failed to serialize project")?;
    FileManager::write_to_file(path, &json)?;
    debug!("Saved project {} to {}", project.short_id(), path.display());
    Ok(())
}

/// Read a project record
pub fn load_project(path: &Path) -> Result<Project> {
    let content = FileManager::read_to_string(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse project record: {}", path.display()))
}

fn build_subtitles(
    reference: &[u8],
    audio_duration: f64,
    source: TimingSource<'_>,
    options: &FallbackOptions,
) -> Result<SubtitleSet, InputError> {
    if !audio_duration.is_finite() || audio_duration <= 0.0 {
        return Err(InputError::InvalidDuration(audio_duration));
    }
    let text = normalize_text(&decode_reference(reference)?);

    if let TimingSource::Recognizer { recognizer, audio } = source {
        match align_with(recognizer, audio, &text) {
            Ok(set) if !set.is_empty() => return Ok(set),
            Ok(_) => warn!("Recognizer '{}' returned no timed words, using uniform timing", recognizer.name()),
            Err(ProjectError::Input(e)) => return Err(e),
            Err(e) => warn!("Recognizer '{}' failed ({}), using uniform timing", recognizer.name(), e),
        }
    }

    segment_uniform(&text, audio_duration, options)
}
