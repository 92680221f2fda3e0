use async_trait::async_trait;
use log::{debug, error};
use std::fmt::Debug;
use std::path::Path;
use tokio::process::Command;

use crate::app_config::CombinerConfig;
use crate::errors::CombinerError;

// @module: External media tool invocation

/// Common trait for media combiners
///
/// A combiner muxes one video resource and one audio resource into a single
/// destination file: the video stream is copied unchanged, the audio stream
/// is encoded into the output container, and the result is truncated to the
/// shorter of the two input durations.
#[async_trait]
pub trait MediaCombiner: Send + Sync + Debug {
    /// Combine `video_path` and `audio_path` into `dest_path`
    async fn combine(
        &self,
        video_path: &Path,
        audio_path: &Path,
        dest_path: &Path,
    ) -> Result<(), CombinerError>;
}

/// Combiner backed by the ffmpeg command line tool
#[derive(Debug)]
pub struct FfmpegCombiner {
    // @field: ffmpeg command or path
    ffmpeg_path: String,

    // @field: Per-invocation timeout in seconds
    timeout_secs: u64,
}

impl FfmpegCombiner {
    // @creates: Combiner from the combiner section of the app config
    pub fn new(config: &CombinerConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Strip ffmpeg's banner and stream metadata from stderr, keeping only
    /// lines that carry diagnostic value
    fn filter_stderr(stderr: &str) -> String {
        let noise_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "Output #",
            "  Metadata:",
            "  Duration:",
            "  Stream #",
            "Stream mapping:",
            "Press [q]",
            "size=",
            "frame=",
            "video:",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                !line.trim().is_empty()
                    && !noise_prefixes.iter().any(|prefix| line.starts_with(prefix))
            })
            .collect();

        if meaningful.is_empty() {
            stderr.lines().last().unwrap_or("unknown failure").to_string()
        } else {
            meaningful.join("; ")
        }
    }
}

#[async_trait]
impl MediaCombiner for FfmpegCombiner {
    async fn combine(
        &self,
        video_path: &Path,
        audio_path: &Path,
        dest_path: &Path,
    ) -> Result<(), CombinerError> {
        debug!(
            "Combining {:?} + {:?} -> {:?}",
            video_path, audio_path, dest_path
        );

        // Copy the video stream, transcode the audio stream, trim to the
        // shortest input, map first video of input 0 and first audio of
        // input 1
        let ffmpeg_future = Command::new(&self.ffmpeg_path)
            .args([
                "-y",
                "-i",
                video_path.to_str().unwrap_or_default(),
                "-i",
                audio_path.to_str().unwrap_or_default(),
                "-c:v",
                "copy",
                "-c:a",
                "aac",
                "-map",
                "0:v:0",
                "-map",
                "1:a:0",
                "-shortest",
                dest_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout = std::time::Duration::from_secs(self.timeout_secs);
        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| CombinerError::LaunchFailed {
                    command: self.ffmpeg_path.clone(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(CombinerError::TimedOut(self.timeout_secs));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = Self::filter_stderr(&stderr);
            error!("Combination failed: {}", filtered);
            return Err(CombinerError::NonZeroExit(filtered));
        }

        Ok(())
    }
}
