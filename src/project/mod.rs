/*!
 * Project management.
 *
 * This module provides:
 * - Project records and their lifecycle (`processing` -> `completed`/`error`)
 * - A registry serializing ingestion, corrections and exports per project
 * - JSON persistence of project records
 */

pub mod models;
pub mod registry;

// Re-export main types
pub use models::{CorrectionBatch, Project, ProjectCreateParams, ProjectStatus};
pub use registry::{load_project, save_project, IngestGuard, ProjectHandle, ProjectRegistry, TimingSource};
