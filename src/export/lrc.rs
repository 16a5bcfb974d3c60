use std::fmt::Write;

use crate::errors::ExportError;
use crate::export::check_timestamp;
use crate::subtitle::SubtitleSet;

// @module: Enhanced LRC (karaoke) serializer

// @const: Fixed artist tag
pub const LRC_ARTIST: &str = "Generated by Karaoke Subtitles";

// @const: Fixed album tag
pub const LRC_ALBUM: &str = "Karaoke";

// @const: Fixed creator tag
pub const LRC_CREATOR: &str = "Auto-Timing";

/// Render a subtitle set as enhanced LRC
///
/// Output layout:
/// ```text
/// [ti:<display name>]
/// [ar:Generated by Karaoke Subtitles]
/// [al:Karaoke]
/// [by:Auto-Timing]
///
/// [00:00.00]segment text
/// [00:00.00]<00:00.00>word <00:00.60>word
/// ```
/// The word line is only written for segments that have words, and uses the
/// segment's own timestamp as its line tag.
pub fn to_lrc(set: &SubtitleSet, display_name: &str) -> Result<String, ExportError> {
    let mut out = String::with_capacity(128 + set.word_count() * 24);

    out.push_str(&format!("[ti:{}]\n", display_name));
    out.push_str(&format!("[ar:{}]\n", LRC_ARTIST));
    out.push_str(&format!("[al:{}]\n", LRC_ALBUM));
    out.push_str(&format!("[by:{}]\n\n", LRC_CREATOR));

    for (index, segment) in set.iter().enumerate() {
        let stamp = format_timestamp(check_timestamp(segment.start, index, None)?);
        out.push_str(&format!("[{}]{}\n", stamp, segment.text));

        if segment.words.is_empty() {
            continue;
        }

        let mut word_line = String::new();
        for (word_index, word) in segment.words.iter().enumerate() {
            let word_stamp = format_timestamp(check_timestamp(word.start, index, Some(word_index))?);
            let _ = write!(word_line, "<{}>{} ", word_stamp, word.text);
        }
        out.push_str(&format!("[{}]{}\n", stamp, word_line.trim_end()));
    }

    Ok(out)
}

/// Format seconds as `MM:SS.ss`
///
/// Minutes are zero-padded to two digits and grow beyond that for long media
/// (`125:00.00`); they are never wrapped into hours.
pub fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = seconds % 60.0;
    format!("{:02}:{:05.2}", minutes, remainder)
}
