use anyhow::{anyhow, Context, Result};
use log::warn;
use std::path::Path;

// @module: Audio header probing

/// Duration in seconds of a WAV file, read from its header
pub fn wav_duration<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let sample_rate = reader.spec().sample_rate;
    if sample_rate == 0 {
        return Err(anyhow!("WAV file reports a zero sample rate: {}", path.display()));
    }

    // duration() counts frames, i.e. samples per channel
    Ok(reader.duration() as f64 / sample_rate as f64)
}

/// Duration of a WAV file, or `fallback_secs` when the header can't be read
pub fn wav_duration_or<P: AsRef<Path>>(path: P, fallback_secs: f64) -> f64 {
    match wav_duration(&path) {
        Ok(duration) => duration,
        Err(e) => {
            warn!("Could not read audio duration ({}), assuming {:.1}s", e, fallback_secs);
            fallback_secs
        }
    }
}
