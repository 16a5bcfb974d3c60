/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use karasub::app_config::{Config, LogLevel};
use karasub::export::ExportFormat;
use karasub::subtitle::FallbackOptions;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.language, "ru");
    assert_eq!(config.segmentation.words_per_segment, 7);
    assert_eq!(config.segmentation.fallback_confidence, 0.8);
    assert_eq!(config.audio.fallback_duration_secs, Some(120.0));
    assert_eq!(config.output.directory, "projects");
    assert_eq!(config.output.formats, vec![ExportFormat::Ttml, ExportFormat::Lrc]);
    assert_eq!(config.batch.max_concurrent_projects, 2);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.fallback_options(), FallbackOptions::default());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.language = "eng".to_string();
    assert!(config.validate().is_ok());

    config.segmentation.words_per_segment = 0;
    assert!(config.validate().is_err());
    config.segmentation.words_per_segment = 4;

    config.segmentation.fallback_confidence = 1.5;
    assert!(config.validate().is_err());
    config.segmentation.fallback_confidence = 0.8;

    config.audio.fallback_duration_secs = Some(0.0);
    assert!(config.validate().is_err());
    config.audio.fallback_duration_secs = None;
    assert!(config.validate().is_ok());

    config.output.formats.clear();
    assert!(config.validate().is_err());
    config.output.formats = vec![ExportFormat::Lrc];

    config.batch.max_concurrent_projects = 0;
    assert!(config.validate().is_err());
}

/// Missing sections fall back to defaults
#[test]
fn test_config_from_json_withPartialFile_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{
            "language": "en",
            "segmentation": { "words_per_segment": 5 },
            "output": { "formats": ["lrc"] },
            "log_level": "debug"
        }"#,
    )?;

    assert_eq!(config.language, "en");
    assert_eq!(config.segmentation.words_per_segment, 5);
    assert_eq!(config.segmentation.fallback_confidence, 0.8);
    assert_eq!(config.output.directory, "projects");
    assert_eq!(config.output.formats, vec![ExportFormat::Lrc]);
    assert_eq!(config.batch.max_concurrent_projects, 2);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

/// Saved configuration loads back unchanged
#[test]
fn test_config_save_withCustomValues_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.language = "en".to_string();
    config.batch.max_concurrent_projects = 8;
    config.audio.fallback_duration_secs = None;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);

    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("\"formats\": [\n      \"ttml\",\n      \"lrc\"\n    ]"));
    Ok(())
}

/// Unknown format names are rejected when parsing
#[test]
fn test_config_from_json_withUnknownFormat_shouldFail() {
    let result = serde_json::from_str::<Config>(r#"{ "output": { "formats": ["srt"] } }"#);
    assert!(result.is_err());
}
