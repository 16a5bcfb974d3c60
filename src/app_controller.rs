use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::export::ExportFormat;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::media;
use crate::project::{save_project, Project, ProjectCreateParams, ProjectRegistry, TimingSource};
use crate::recognizer::TranscriptFileRecognizer;
use crate::errors::ProjectError;
use crate::subtitle::{Correction, CorrectionReport, SubtitleSet};

// @module: Application controller for karaoke subtitle projects

/// Inputs of one ingestion run
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Reference lyrics (UTF-8 text)
    pub text_file: PathBuf,
    /// Audio file (WAV)
    pub audio_file: PathBuf,
    /// Saved recognizer output; looked up next to the audio when absent
    pub transcript_file: Option<PathBuf>,
    /// Display name; defaults to the text file stem
    pub name: Option<String>,
    /// Language code; defaults to the configured language
    pub language: Option<String>,
    /// Where the project record and exports are written
    pub output_dir: PathBuf,
    /// Keep the project registered after the run; folder mode turns this off
    pub retain_project: bool,
}

impl ProcessRequest {
    pub fn new<P: Into<PathBuf>>(text_file: P, audio_file: P, output_dir: P) -> Self {
        Self {
            text_file: text_file.into(),
            audio_file: audio_file.into(),
            transcript_file: None,
            name: None,
            language: None,
            output_dir: output_dir.into(),
            retain_project: true,
        }
    }
}

/// Result of a successful ingestion run
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Final project state
    pub project: Project,
    /// Saved project record
    pub project_path: PathBuf,
    /// Exported subtitle files, in configured format order
    pub exports: Vec<PathBuf>,
}

/// Counts reported after folder mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Correction file body: a bare list or `{"corrections": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum CorrectionDocument {
    Wrapped { corrections: Vec<Correction> },
    Bare(Vec<Correction>),
}

impl CorrectionDocument {
    fn into_corrections(self) -> Vec<Correction> {
        match self {
            CorrectionDocument::Wrapped { corrections } => corrections,
            CorrectionDocument::Bare(corrections) => corrections,
        }
    }
}

/// Main application controller
#[derive(Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Projects touched by this controller
    registry: Arc<ProjectRegistry>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self {
            config,
            registry: Arc::new(ProjectRegistry::new()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// Run one ingestion on the blocking pool
    pub async fn run(&self, request: ProcessRequest) -> Result<ProcessOutcome> {
        let start_time = std::time::Instant::now();
        let controller = self.clone();

        let outcome = tokio::task::spawn_blocking(move || controller.process_project(&request))
            .await
            .context("Processing task panicked")??;

        info!(
            "Project '{}' processed in {}.",
            outcome.project.name,
            Self::format_duration(start_time.elapsed())
        );
        Ok(outcome)
    }

    /// Ingest a text/audio pair, save the project record and write exports
    ///
    /// A failed ingestion still saves the project record in the `error` state.
    pub fn process_project(&self, request: &ProcessRequest) -> Result<ProcessOutcome> {
        match FileManager::detect_file_type(&request.text_file) {
            FileType::Document => {
                return Err(anyhow!(
                    "Text extraction from documents is not supported, provide a .txt file: {}",
                    request.text_file.display()
                ));
            }
            FileType::ReferenceText => {}
            other => warn!("Reference text {} looks like {:?}, reading it as UTF-8 text", request.text_file.display(), other),
        }

        if !FileManager::file_exists(&request.text_file) {
            return Err(anyhow!("Text file does not exist: {}", request.text_file.display()));
        }
        if !FileManager::file_exists(&request.audio_file) {
            return Err(anyhow!("Audio file does not exist: {}", request.audio_file.display()));
        }

        let language = request.language.as_deref().unwrap_or(&self.config.language);
        let language = language_utils::normalize_language_code(language)?;
        let name = request.name.clone().unwrap_or_else(|| file_stem(&request.text_file));

        let audio_duration = self.audio_duration(&request.audio_file)?;
        let reference = FileManager::read_bytes(&request.text_file)?;

        let id = self.registry.create(ProjectCreateParams::new(
            name,
            language,
            file_name(&request.audio_file),
            file_name(&request.text_file),
        ));

        let transcript = request
            .transcript_file
            .clone()
            .or_else(|| Some(FileManager::transcript_path_for(&request.audio_file)))
            .filter(|path| FileManager::file_exists(path));

        let options = self.config.fallback_options();
        let ingested = match &transcript {
            Some(path) => {
                info!("Using transcript {}", path.display());
                let recognizer = TranscriptFileRecognizer::new(path);
                let source = TimingSource::Recognizer {
                    recognizer: &recognizer,
                    audio: &request.audio_file,
                };
                self.registry.ingest(&id, &reference, audio_duration, source, &options)
            }
            None => {
                debug!("No transcript for {}, using uniform timing", request.audio_file.display());
                self.registry.ingest(&id, &reference, audio_duration, TimingSource::Fallback, &options)
            }
        };

        let outcome = self.finish_ingestion(&id, ingested, request);
        if !request.retain_project && self.registry.remove(&id).is_ok() {
            debug!("Released project {} from the registry", id);
        }
        outcome
    }

    // Save the record (also after a failed ingestion), then write exports
    fn finish_ingestion(
        &self,
        id: &str,
        ingested: std::result::Result<SubtitleSet, ProjectError>,
        request: &ProcessRequest,
    ) -> Result<ProcessOutcome> {
        let project_path = self.registry.save(id, &request.output_dir)?;
        if let Err(e) = ingested {
            return Err(anyhow!(e).context(format!("Failed to process {}", request.text_file.display())));
        }

        let exports = self.write_exports(id, &request.output_dir)?;
        let project = self.registry.snapshot(id)?;
        info!("Success: {}", project_path.display());

        Ok(ProcessOutcome {
            project,
            project_path,
            exports,
        })
    }

    /// Apply a correction file to a saved project and rewrite the record
    pub fn correct(&self, project_file: &Path, corrections_file: &Path) -> Result<CorrectionReport> {
        let id = self.registry.load(project_file)?;

        let content = FileManager::read_to_string(corrections_file)?;
        let corrections = serde_json::from_str::<CorrectionDocument>(&content)
            .with_context(|| format!("Failed to parse corrections: {}", corrections_file.display()))?
            .into_corrections();

        let report = self.registry.apply_corrections(&id, &corrections)?;
        if !report.skipped.is_empty() {
            warn!("Skipped {} out-of-range corrections: {:?}", report.skipped.len(), report.skipped);
        }

        save_project(&self.registry.snapshot(&id)?, project_file)?;
        Ok(report)
    }

    /// Export a saved project; the default output sits next to the record
    pub fn export(&self, project_file: &Path, format: ExportFormat, output: Option<&Path>) -> Result<PathBuf> {
        let id = self.registry.load(project_file)?;
        let rendered = self.registry.export(&id, format)?;

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => {
                let project = self.registry.snapshot(&id)?;
                let dir = project_file.parent().unwrap_or_else(|| Path::new("."));
                dir.join(format.file_name(&project.name))
            }
        };

        FileManager::write_to_file(&output_path, &rendered)?;
        info!("Exported {} to {}", format, output_path.display());
        Ok(output_path)
    }

    /// Run the workflow in folder mode over every `<stem>.txt` + `<stem>.wav` pair
    /// Pairs whose exports already exist are skipped unless forced
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();

        if !input_dir.is_dir() {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut summary = BatchSummary::default();
        let mut requests = Vec::new();
        for text_file in FileManager::find_files(&input_dir, "txt")? {
            let audio_file = text_file.with_extension("wav");
            if !FileManager::file_exists(&audio_file) {
                warn!("Skipping {}, no matching {}", text_file.display(), audio_file.display());
                summary.skipped += 1;
                continue;
            }

            let output_dir = text_file.parent().map_or_else(|| input_dir.clone(), Path::to_path_buf);
            if !force_overwrite && self.exports_exist(&output_dir, &file_stem(&text_file)) {
                warn!("Skipping {}, subtitles already exist (use -f to force overwrite)", text_file.display());
                summary.skipped += 1;
                continue;
            }

            let mut request = ProcessRequest::new(text_file, audio_file, output_dir);
            request.retain_project = false;
            requests.push(request);
        }

        if requests.is_empty() && summary.skipped == 0 {
            return Err(anyhow!("No text/audio pairs found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(requests.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} projects ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing projects");

        let concurrency = self.config.batch.max_concurrent_projects.max(1);
        let mut results = stream::iter(requests)
            .map(|request| {
                let controller = self.clone();
                async move {
                    let text_file = request.text_file.clone();
                    let result = tokio::task::spawn_blocking(move || controller.process_project(&request))
                        .await
                        .map_err(|e| anyhow!("Processing task failed: {}", e))
                        .and_then(|result| result);
                    (text_file, result)
                }
            })
            .buffer_unordered(concurrency);

        while let Some((text_file, result)) = results.next().await {
            match result {
                Ok(outcome) => {
                    folder_pb.set_message(format!("Done: {}", outcome.project.name));
                    summary.processed += 1;
                }
                Err(e) => {
                    error!("Error processing {}: {:#}", text_file.display(), e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Write every configured export format for a project
    fn write_exports(&self, id: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let project = self.registry.snapshot(id)?;
        let mut written = Vec::with_capacity(self.config.output.formats.len());

        for format in &self.config.output.formats {
            let rendered = self.registry.export(id, *format)?;
            let path = output_dir.join(format.file_name(&project.name));
            FileManager::write_to_file(&path, &rendered)?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    fn exports_exist(&self, output_dir: &Path, name: &str) -> bool {
        self.config
            .output
            .formats
            .iter()
            .all(|format| FileManager::file_exists(output_dir.join(format.file_name(name))))
    }

    fn audio_duration(&self, audio_file: &Path) -> Result<f64> {
        match self.config.audio.fallback_duration_secs {
            Some(fallback) => Ok(media::wav_duration_or(audio_file, fallback)),
            None => media::wav_duration(audio_file),
        }
    }

    // Format elapsed time for log lines
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
