/*!
 * Pairing and combination driver.
 *
 * Pairs video inputs with audio artifacts by index modulo count and invokes
 * the media combiner once per pairing. When the counts differ, sources are
 * deliberately reused via modulo wraparound; that is the defined rebalancing
 * policy, not an error. A failed pairing is recorded and the batch continues,
 * so one bad combination never aborts the remaining ones.
 */

use anyhow::Result;
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

use crate::errors::{CombinerError, PipelineError};
use crate::file_utils::FileManager;
use crate::media_combiner::MediaCombiner;

/// One uploaded video held in memory
#[derive(Debug, Clone)]
pub struct VideoInput {
    /// Original filename, for diagnostics
    pub name: String,

    /// Container extension of the source, used for staging
    pub extension: String,

    /// Raw video bytes
    pub bytes: Vec<u8>,
}

impl VideoInput {
    /// Read a video file fully into memory
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = FileManager::read_bytes(path)?;

        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "mp4".to_string());

        Ok(Self {
            name,
            extension,
            bytes,
        })
    }
}

/// An (output, video, audio) index tuple selected by modulo rebalancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    /// 0-based output index; the output file is named from `output_index + 1`
    pub output_index: usize,

    /// Index into the video sequence
    pub video_index: usize,

    /// Index into the audio sequence
    pub audio_index: usize,
}

/// Plan the full pairing sequence for the given input counts.
///
/// Produces `max(video_count, audio_count)` pairings where pairing `i` maps
/// to `(i mod video_count, i mod audio_count)`. Every output index has
/// exactly one pairing and none is skipped even when it repeats a source.
pub fn plan_pairings(video_count: usize, audio_count: usize) -> Result<Vec<Pairing>, PipelineError> {
    if video_count == 0 {
        return Err(PipelineError::EmptyInput("no video inputs"));
    }
    if audio_count == 0 {
        return Err(PipelineError::EmptyInput("no audio artifacts"));
    }

    let count = video_count.max(audio_count);
    Ok((0..count)
        .map(|i| Pairing {
            output_index: i,
            video_index: i % video_count,
            audio_index: i % audio_count,
        })
        .collect())
}

/// A pairing that did not produce an output video
#[derive(Debug)]
pub struct PairingFailure {
    /// 0-based output index of the failed pairing
    pub output_index: usize,

    /// What went wrong
    pub error: CombinerError,
}

/// Outcome of a full combination batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files that were produced and verified, in output order
    pub outputs: Vec<PathBuf>,

    /// Pairings that failed, in output order
    pub failures: Vec<PairingFailure>,
}

impl BatchReport {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} output video(s) produced, {} pairing(s) failed",
            self.outputs.len(),
            self.failures.len()
        )
    }
}

/// Drives the pairing loop against a media combiner
#[derive(Debug)]
pub struct CombinationDriver<C: MediaCombiner> {
    // @field: Combiner used for every pairing
    combiner: C,

    // @field: Container extension for output files
    output_extension: String,
}

impl<C: MediaCombiner> CombinationDriver<C> {
    // @creates: Driver around the given combiner
    pub fn new(combiner: C, output_extension: &str) -> Self {
        Self {
            combiner,
            output_extension: output_extension.to_string(),
        }
    }

    /// Combine every pairing of `videos` and `audios` into `output_dir`.
    ///
    /// Writes files named `output_video_{n}.{ext}` with 1-based output
    /// ordinals. `on_progress` is called with (completed, total) after each
    /// pairing. Per-pairing failures are reported in the returned
    /// [`BatchReport`], never silently dropped.
    pub async fn combine_all<F>(
        &self,
        videos: &[VideoInput],
        audios: &[PathBuf],
        output_dir: &Path,
        on_progress: F,
    ) -> Result<BatchReport>
    where
        F: Fn(usize, usize),
    {
        let pairings = plan_pairings(videos.len(), audios.len())?;
        FileManager::ensure_dir(output_dir)?;

        let total = pairings.len();
        let mut report = BatchReport::default();

        for pairing in pairings {
            let dest_path = output_dir.join(format!(
                "output_video_{}.{}",
                pairing.output_index + 1,
                self.output_extension
            ));

            let video = &videos[pairing.video_index];
            let audio = &audios[pairing.audio_index];

            match self.combine_one(video, audio, &dest_path).await {
                Ok(()) => {
                    debug!(
                        "Pairing {} done: video '{}' + audio {:?}",
                        pairing.output_index + 1,
                        video.name,
                        audio.file_name().unwrap_or_default()
                    );
                    report.outputs.push(dest_path);
                }
                Err(error) => {
                    warn!(
                        "Pairing {} failed, continuing with remaining pairings: {}",
                        pairing.output_index + 1,
                        error
                    );
                    report.failures.push(PairingFailure {
                        output_index: pairing.output_index,
                        error,
                    });
                }
            }

            on_progress(pairing.output_index + 1, total);
        }

        Ok(report)
    }

    /// Stage one pairing into temporary files and run the combiner.
    ///
    /// Both staged files live only for the duration of this call; dropping
    /// the [`NamedTempFile`] handles removes them on success and failure
    /// paths alike.
    async fn combine_one(
        &self,
        video: &VideoInput,
        audio: &Path,
        dest_path: &Path,
    ) -> Result<(), CombinerError> {
        let staged_video = Self::stage_bytes(&video.bytes, &video.extension)?;

        let audio_bytes = FileManager::read_bytes(audio)
            .map_err(|e| CombinerError::Staging(e.to_string()))?;
        let staged_audio = Self::stage_bytes(&audio_bytes, "wav")?;

        self.combiner
            .combine(staged_video.path(), staged_audio.path(), dest_path)
            .await?;

        // The combiner claiming success is not enough; the step only counts
        // when the destination actually materialized
        if !FileManager::non_empty_file(dest_path) {
            return Err(CombinerError::MissingOutput(
                dest_path.display().to_string(),
            ));
        }

        Ok(())
    }

    /// Write bytes into a fresh uniquely named temporary file
    fn stage_bytes(bytes: &[u8], extension: &str) -> Result<NamedTempFile, CombinerError> {
        let mut staged = Builder::new()
            .prefix("vidvox-")
            .suffix(&format!(".{}", extension))
            .tempfile()
            .map_err(|e| CombinerError::Staging(e.to_string()))?;

        staged
            .write_all(bytes)
            .and_then(|_| staged.flush())
            .map_err(|e| CombinerError::Staging(e.to_string()))?;

        Ok(staged)
    }
}
