use anyhow::{Context, Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::app_config::Config;
use crate::archiver;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::media_combiner::{FfmpegCombiner, MediaCombiner};
use crate::pairing_driver::{BatchReport, CombinationDriver, VideoInput};
use crate::pdf_extractor::PdfExtractor;
use crate::section_splitter::split_numbered_sections;
use crate::speech_synthesizer::{EspeakSynthesizer, SpeechSynthesizer};

// @module: Application controller for the narration pipeline

/// Outcome of one successful pipeline run
#[derive(Debug)]
pub struct RunSummary {
    /// Number of sections the document was split into
    pub section_count: usize,

    /// Number of output videos inside the bundle
    pub output_count: usize,

    /// Number of pairings that failed and were skipped
    pub failure_count: usize,

    /// Where the bundle was written
    pub bundle_path: PathBuf,
}

/// Main application controller for the PDF-to-narrated-video pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller carries a usable configuration
    pub fn is_initialized(&self) -> bool {
        self.config.validate().is_ok()
    }

    /// Run the full pipeline: extract, split, synthesize, combine, bundle.
    ///
    /// All intermediate artifacts live in a run-scoped working directory
    /// that is removed when the run ends, on success and failure alike. On
    /// any fatal error no bundle is written.
    pub async fn run(
        &self,
        video_paths: &[PathBuf],
        pdf_path: &Path,
        bundle_path: &Path,
    ) -> Result<RunSummary> {
        // The synthesizer is the scoped engine resource for this run; both
        // collaborators are dropped when the run returns
        let synthesizer = EspeakSynthesizer::new(&self.config.synthesis);
        let combiner = FfmpegCombiner::new(&self.config.combiner);

        self.run_with_collaborators(&synthesizer, combiner, video_paths, pdf_path, bundle_path)
            .await
    }

    /// Run the pipeline with explicitly provided collaborators.
    ///
    /// [`run`](Self::run) wires in the espeak-ng and ffmpeg implementations;
    /// this entry point takes any [`SpeechSynthesizer`] and [`MediaCombiner`]
    /// so the pipeline can be exercised without the external tools installed.
    pub async fn run_with_collaborators<S, C>(
        &self,
        synthesizer: &S,
        combiner: C,
        video_paths: &[PathBuf],
        pdf_path: &Path,
        bundle_path: &Path,
    ) -> Result<RunSummary>
    where
        S: SpeechSynthesizer,
        C: MediaCombiner,
    {
        let start_time = std::time::Instant::now();

        let workdir = tempfile::Builder::new()
            .prefix("vidvox-run-")
            .tempdir()
            .context("Failed to create working directory")?;

        let result = self
            .run_stages(synthesizer, combiner, video_paths, pdf_path, bundle_path, &workdir)
            .await;

        // The working directory must go away even when a stage failed; a
        // removal problem is a warning, never fatal
        if let Err(e) = workdir.close() {
            warn!("Could not remove working directory: {}", e);
        }

        let summary = result?;

        info!(
            "Run complete in {}: {} section(s), {} output video(s), {} failure(s)",
            Self::format_duration(start_time.elapsed()),
            summary.section_count,
            summary.output_count,
            summary.failure_count,
        );

        Ok(summary)
    }

    /// The pipeline stages proper, with the working directory owned by the caller
    async fn run_stages<S, C>(
        &self,
        synthesizer: &S,
        combiner: C,
        video_paths: &[PathBuf],
        pdf_path: &Path,
        bundle_path: &Path,
        workdir: &TempDir,
    ) -> Result<RunSummary>
    where
        S: SpeechSynthesizer,
        C: MediaCombiner,
    {
        if video_paths.is_empty() {
            return Err(PipelineError::EmptyInput("no video inputs").into());
        }
        if !FileManager::file_exists(pdf_path) {
            return Err(anyhow!("PDF file does not exist: {:?}", pdf_path));
        }

        // Read all inputs into memory up front
        let mut videos = Vec::with_capacity(video_paths.len());
        for path in video_paths {
            if !FileManager::file_exists(path) {
                return Err(anyhow!("Video file does not exist: {:?}", path));
            }
            if !FileManager::is_video_path(path) {
                return Err(anyhow!("Not a supported video container: {:?}", path));
            }
            videos.push(VideoInput::from_file(path)?);
        }
        let pdf_bytes = FileManager::read_bytes(pdf_path)?;

        // Keep a staged copy of the document next to the other run artifacts
        let staged_pdf = workdir.path().join("document.pdf");
        FileManager::write_bytes(&staged_pdf, &pdf_bytes)?;

        info!("Extracting text from {:?}", pdf_path);
        let text = PdfExtractor::extract_text(&pdf_bytes).map_err(PipelineError::from)?;

        let sections = split_numbered_sections(&text);
        if sections.is_empty() {
            return Err(PipelineError::EmptyInput("no sections in document").into());
        }
        info!("Document split into {} section(s)", sections.len());

        let multi_progress = MultiProgress::new();

        // Synthesis is all-or-nothing: pairing only starts once every
        // requested artifact exists
        let audio_dir = workdir.path().join("audio");
        FileManager::ensure_dir(&audio_dir)?;

        let synthesis_pb = Self::add_progress_bar(&multi_progress, sections.len() as u64);
        synthesis_pb.set_message("Synthesizing speech");

        let audio_files = synthesizer
            .synthesize_all(&sections, &audio_dir)
            .await
            .map_err(PipelineError::from)?;
        synthesis_pb.finish_and_clear();

        info!("Synthesized {} audio artifact(s)", audio_files.len());

        // Pair and combine
        let output_dir = workdir.path().join("output");
        let expected = videos.len().max(audio_files.len());

        let combine_pb = Self::add_progress_bar(&multi_progress, expected as u64);
        combine_pb.set_message("Combining videos");

        let driver = CombinationDriver::new(combiner, &self.config.combiner.output_extension);

        let pb = combine_pb.clone();
        let report = driver
            .combine_all(&videos, &audio_files, &output_dir, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await?;
        combine_pb.finish_and_clear();

        self.report_failures(&report);

        if report.outputs.is_empty() {
            return Err(anyhow!(
                "Every pairing failed; nothing to bundle ({} attempted)",
                expected
            ));
        }

        // Bundle whatever the output directory holds at this point
        archiver::bundle_directory(&output_dir, bundle_path).map_err(PipelineError::from)?;
        info!("Bundle written to {}", bundle_path.display());

        Ok(RunSummary {
            section_count: sections.len(),
            output_count: report.outputs.len(),
            failure_count: report.failures.len(),
            bundle_path: bundle_path.to_path_buf(),
        })
    }

    /// Surface per-pairing failures in the final summary instead of losing them
    fn report_failures(&self, report: &BatchReport) {
        if report.failures.is_empty() {
            return;
        }

        warn!("{}", report.summary());
        for failure in &report.failures {
            warn!(
                "  output_video_{}: {}",
                failure.output_index + 1,
                failure.error
            );
        }
    }

    /// Create a styled progress bar attached to the shared MultiProgress
    fn add_progress_bar(multi_progress: &MultiProgress, len: u64) -> ProgressBar {
        let progress_bar = multi_progress.add(ProgressBar::new(len));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
