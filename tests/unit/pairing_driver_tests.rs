/*!
 * Tests for pairing planning and the combination driver
 */

use anyhow::Result;
use vidvox::errors::{CombinerError, PipelineError};
use vidvox::pairing_driver::{CombinationDriver, VideoInput, plan_pairings};

use crate::common;
use crate::common::mock_collaborators::MockCombiner;

fn make_videos(count: usize) -> Vec<VideoInput> {
    (0..count)
        .map(|i| VideoInput {
            name: format!("video_{}.mp4", i),
            extension: "mp4".to_string(),
            bytes: format!("payload-{}", i).into_bytes(),
        })
        .collect()
}

/// Test the modulo rebalancing pattern for fewer videos than audios
#[test]
fn test_planPairings_withThreeVideosFiveAudios_shouldWrapVideos() {
    let pairings = plan_pairings(3, 5).unwrap();

    assert_eq!(pairings.len(), 5);
    let video_pattern: Vec<usize> = pairings.iter().map(|p| p.video_index).collect();
    let audio_pattern: Vec<usize> = pairings.iter().map(|p| p.audio_index).collect();
    assert_eq!(video_pattern, vec![0, 1, 2, 0, 1]);
    assert_eq!(audio_pattern, vec![0, 1, 2, 3, 4]);
}

/// Test the modulo rebalancing pattern for fewer audios than videos
#[test]
fn test_planPairings_withFiveVideosTwoAudios_shouldWrapAudios() {
    let pairings = plan_pairings(5, 2).unwrap();

    assert_eq!(pairings.len(), 5);
    let audio_pattern: Vec<usize> = pairings.iter().map(|p| p.audio_index).collect();
    assert_eq!(audio_pattern, vec![0, 1, 0, 1, 0]);
}

/// Test that each output index appears exactly once
#[test]
fn test_planPairings_withAnyCounts_shouldNumberOutputsSequentially() {
    let pairings = plan_pairings(4, 7).unwrap();
    let output_indices: Vec<usize> = pairings.iter().map(|p| p.output_index).collect();
    assert_eq!(output_indices, (0..7).collect::<Vec<_>>());
}

/// Test that empty video input is rejected
#[test]
fn test_planPairings_withZeroVideos_shouldReturnEmptyInputError() {
    let result = plan_pairings(0, 3);
    assert!(matches!(result, Err(PipelineError::EmptyInput(_))));
}

/// Test that empty audio input is rejected
#[test]
fn test_planPairings_withZeroAudios_shouldReturnEmptyInputError() {
    let result = plan_pairings(3, 0);
    assert!(matches!(result, Err(PipelineError::EmptyInput(_))));
}

/// Test that the driver writes one sequentially named output per pairing
#[tokio::test]
async fn test_combineAll_withWorkingCombiner_shouldProduceAllOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir)?;

    let videos = make_videos(2);
    let audios = vec![
        common::create_test_audio(&audio_dir, "section_1.wav")?,
        common::create_test_audio(&audio_dir, "section_2.wav")?,
        common::create_test_audio(&audio_dir, "section_3.wav")?,
    ];

    let output_dir = temp_dir.path().join("output");
    let driver = CombinationDriver::new(MockCombiner::working(), "mp4");
    let report = driver
        .combine_all(&videos, &audios, &output_dir, |_, _| {})
        .await?;

    assert_eq!(report.outputs.len(), 3);
    assert!(report.failures.is_empty());
    for i in 1..=3 {
        let path = output_dir.join(format!("output_video_{}.mp4", i));
        assert!(path.exists(), "missing output {}", i);
        assert!(std::fs::metadata(&path)?.len() > 0);
    }

    Ok(())
}

/// Test best-effort batch semantics: a failure on pairing index 2 of 5
/// still yields the other four outputs and reports the failure
#[tokio::test]
async fn test_combineAll_withFailureOnThirdPairing_shouldContinueBatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir)?;

    let videos = make_videos(3);
    let audios = (1..=5)
        .map(|i| common::create_test_audio(&audio_dir, &format!("section_{}.wav", i)))
        .collect::<Result<Vec<_>>>()?;

    let output_dir = temp_dir.path().join("output");
    let driver = CombinationDriver::new(MockCombiner::failing_on(&[2]), "mp4");
    let report = driver
        .combine_all(&videos, &audios, &output_dir, |_, _| {})
        .await?;

    assert_eq!(report.outputs.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].output_index, 2);
    assert!(!output_dir.join("output_video_3.mp4").exists());
    assert!(output_dir.join("output_video_5.mp4").exists());

    Ok(())
}

/// Test that a combiner claiming success without output is caught by the
/// driver's destination verification
#[tokio::test]
async fn test_combineAll_withSilentCombiner_shouldRecordMissingOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir)?;

    let videos = make_videos(1);
    let audios = vec![common::create_test_audio(&audio_dir, "section_1.wav")?];

    let output_dir = temp_dir.path().join("output");
    let driver = CombinationDriver::new(MockCombiner::silent(), "mp4");
    let report = driver
        .combine_all(&videos, &audios, &output_dir, |_, _| {})
        .await?;

    assert!(report.outputs.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        CombinerError::MissingOutput(_)
    ));

    Ok(())
}

/// Test that the progress callback sees every pairing
#[tokio::test]
async fn test_combineAll_withProgressCallback_shouldReportEachPairing() -> Result<()> {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir)?;

    let videos = make_videos(2);
    let audios = (1..=4)
        .map(|i| common::create_test_audio(&audio_dir, &format!("section_{}.wav", i)))
        .collect::<Result<Vec<_>>>()?;

    let calls = AtomicUsize::new(0);
    let driver = CombinationDriver::new(MockCombiner::working(), "mp4");
    driver
        .combine_all(&videos, &audios, &temp_dir.path().join("out"), |completed, total| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(total, 4);
            assert!(completed >= 1 && completed <= 4);
        })
        .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 4);

    Ok(())
}

/// Test that the combiner is invoked once per pairing, never skipping a
/// repeated source
#[tokio::test]
async fn test_combineAll_withUnevenCounts_shouldInvokeOncePerOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir)?;

    let videos = make_videos(5);
    let audios = vec![
        common::create_test_audio(&audio_dir, "section_1.wav")?,
        common::create_test_audio(&audio_dir, "section_2.wav")?,
    ];

    let combiner = MockCombiner::working();
    let driver = CombinationDriver::new(combiner, "mp4");
    let report = driver
        .combine_all(&videos, &audios, &temp_dir.path().join("out"), |_, _| {})
        .await?;

    assert_eq!(report.outputs.len(), 5);

    Ok(())
}
