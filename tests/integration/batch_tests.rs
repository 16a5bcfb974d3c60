/*!
 * Integration tests for folder mode
 */

use anyhow::Result;

use karasub::app_config::Config;
use karasub::app_controller::{BatchSummary, Controller};

use crate::common::{self, NINE_WORDS};

/// Every complete pair is processed; orphans and bad input are counted
#[tokio::test]
async fn test_run_folder_withMixedPairs_shouldProcessCompletePairs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let nested = dir.join("album");
    std::fs::create_dir_all(&nested)?;

    common::create_test_file(dir, "first.txt", NINE_WORDS)?;
    common::create_test_wav(dir, "first.wav", 14)?;
    common::create_test_file(&nested, "second.txt", "la la la")?;
    common::create_test_wav(&nested, "second.wav", 3)?;
    common::create_test_file(dir, "orphan.txt", "no audio here")?;
    common::create_test_file(dir, "silent.txt", "   ")?;
    common::create_test_wav(dir, "silent.wav", 1)?;

    let mut config = Config::default();
    config.batch.max_concurrent_projects = 3;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(dir.to_path_buf(), false).await?;

    assert_eq!(summary, BatchSummary { processed: 2, skipped: 1, failed: 1 });
    assert!(dir.join("first.lrc").is_file());
    assert!(dir.join("first.ttml").is_file());
    assert!(nested.join("second.lrc").is_file());
    assert!(!dir.join("silent.lrc").exists());
    assert!(controller.registry().is_empty());
    Ok(())
}

/// Existing exports are skipped unless overwriting is forced
#[tokio::test]
async fn test_run_folder_withExistingExports_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "song.txt", NINE_WORDS)?;
    common::create_test_wav(dir, "song.wav", 14)?;

    let controller = Controller::new_for_test()?;

    let first = controller.run_folder(dir.to_path_buf(), false).await?;
    assert_eq!(first.processed, 1);

    let second = controller.run_folder(dir.to_path_buf(), false).await?;
    assert_eq!(second, BatchSummary { processed: 0, skipped: 1, failed: 0 });

    let forced = controller.run_folder(dir.to_path_buf(), true).await?;
    assert_eq!(forced.processed, 1);
    Ok(())
}

/// A directory with nothing to do is an error
#[tokio::test]
async fn test_run_folder_withoutPairs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).await.is_err());
    assert!(controller.run_folder(temp_dir.path().join("missing"), false).await.is_err());
    Ok(())
}
