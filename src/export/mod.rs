/*!
 * Subtitle serializers.
 *
 * Pure, deterministic renderers from a subtitle set to file text:
 * - `ttml`: Timed Text Markup Language, one paragraph per segment
 * - `lrc`: enhanced LRC with per-word karaoke timing
 *
 * Negative or non-finite timestamps are rejected with
 * `ExportError::InvalidTimestamp` rather than clamped.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::subtitle::SubtitleSet;

pub mod ttml;
pub mod lrc;

pub use lrc::to_lrc;
pub use ttml::to_ttml;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Ttml,
    Lrc,
}

impl ExportFormat {
    /// All formats, in export order
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Ttml, ExportFormat::Lrc];

    // @returns: File extension without dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ttml => "ttml",
            Self::Lrc => "lrc",
        }
    }

    // @returns: MIME type for downloads
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Ttml => "application/xml",
            Self::Lrc => "text/plain",
        }
    }

    /// Render a subtitle set in this format
    pub fn render(&self, set: &SubtitleSet, display_name: &str) -> Result<String, ExportError> {
        match self {
            Self::Ttml => to_ttml(set, display_name),
            Self::Lrc => to_lrc(set, display_name),
        }
    }

    /// Output file name for a project display name
    pub fn file_name(&self, display_name: &str) -> String {
        format!("{}.{}", display_name, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ttml" | "xml" => Ok(Self::Ttml),
            "lrc" => Ok(Self::Lrc),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render a subtitle set in the given format
pub fn render(format: ExportFormat, set: &SubtitleSet, display_name: &str) -> Result<String, ExportError> {
    format.render(set, display_name)
}

/// Reject timestamps a serializer cannot print
pub(crate) fn check_timestamp(value: f64, segment: usize, word: Option<usize>) -> Result<f64, ExportError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ExportError::InvalidTimestamp { segment, word, value })
    }
}
