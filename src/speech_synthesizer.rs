/*!
 * Speech synthesis collaborators.
 *
 * The synthesizer turns an ordered sequence of text sections into one audio
 * artifact per section. Implementations may schedule their internal work as
 * they like, but `synthesize_all` only returns once every requested artifact
 * exists, so callers observe synthesis as a single all-or-nothing step.
 */

use async_trait::async_trait;
use log::debug;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::app_config::SynthesisConfig;
use crate::errors::SynthesisError;
use crate::file_utils::FileManager;

/// Common trait for speech synthesis engines
///
/// A synthesizer value models the engine as a scoped resource: it is
/// constructed once per pipeline run, emits all artifacts, and is dropped
/// deterministically at run end.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize one WAV artifact per section into `output_dir`.
    ///
    /// Artifacts are named `section_{n}.wav` with 1-based ordinals matching
    /// the section order. The returned paths are in section order. Any
    /// per-section failure aborts the batch.
    async fn synthesize_all(
        &self,
        sections: &[String],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, SynthesisError>;
}

/// Synthesizer backed by the espeak-ng command line tool
#[derive(Debug)]
pub struct EspeakSynthesizer {
    // @field: Engine command, e.g. "espeak-ng"
    engine: String,

    // @field: Voice identifier
    voice: String,

    // @field: Speech rate in words per minute
    rate_wpm: u32,
}

impl EspeakSynthesizer {
    // @creates: Synthesizer from the synthesis section of the app config
    pub fn new(config: &SynthesisConfig) -> Self {
        Self {
            engine: config.engine.clone(),
            voice: config.voice.clone(),
            rate_wpm: config.rate_wpm,
        }
    }

    /// Synthesize a single section to the given path
    async fn synthesize_section(
        &self,
        ordinal: usize,
        text: &str,
        artifact_path: &Path,
    ) -> Result<(), SynthesisError> {
        let output = Command::new(&self.engine)
            .arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(self.rate_wpm.to_string())
            .arg("-w")
            .arg(artifact_path)
            .arg(text)
            .output()
            .await
            .map_err(|e| SynthesisError::LaunchFailed {
                command: self.engine.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SynthesisError::EngineFailed {
                section: ordinal,
                message: stderr.trim().to_string(),
            });
        }

        if !FileManager::non_empty_file(artifact_path) {
            return Err(SynthesisError::ArtifactMissing(ordinal));
        }

        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn synthesize_all(
        &self,
        sections: &[String],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, SynthesisError> {
        let mut artifacts = Vec::with_capacity(sections.len());

        for (i, section) in sections.iter().enumerate() {
            let ordinal = i + 1;
            let artifact_path = output_dir.join(format!("section_{}.wav", ordinal));

            self.synthesize_section(ordinal, section, &artifact_path)
                .await?;

            debug!("Synthesized section {} to {:?}", ordinal, artifact_path);
            artifacts.push(artifact_path);
        }

        Ok(artifacts)
    }
}
