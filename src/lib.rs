/*!
 * # karasub - karaoke subtitle timing
 *
 * A Rust library that turns reference lyrics and an audio track into
 * word-timed karaoke subtitles.
 *
 * ## Features
 *
 * - Uniform-time segmentation when no speech recognizer output exists
 * - Alignment of recognizer transcripts against the clean reference text
 * - Indexed word timing corrections
 * - TTML and enhanced (word-level) LRC export
 * - Per-project locking for concurrent processing
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle`: Timing engine:
 *   - `subtitle::model`: Words, segments, subtitle sets and record forms
 *   - `subtitle::normalize`: Reference text canonicalization
 *   - `subtitle::fallback`: Uniform-time segmentation
 *   - `subtitle::align`: Transcript alignment
 *   - `subtitle::correction`: Timing overrides
 * - `export`: TTML and LRC serializers
 * - `recognizer`: Speech recognizer capability and implementations
 * - `project`: Project records, registry and persistence
 * - `media`: Audio duration probing
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod project;
pub mod recognizer;
pub mod subtitle;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ExportError, InputError, ProjectError, RecognizerError};
pub use export::ExportFormat;
pub use project::{Project, ProjectRegistry, ProjectStatus};
pub use subtitle::{Correction, CorrectionReport, Segment, SubtitleSet, Word};
