/*!
 * Error types for the vidvox application.
 *
 * This module contains custom error types for each stage of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The PDF could not be parsed at all
    #[error("Document cannot be read: {0}")]
    UnreadableDocument(String),

    /// The PDF parsed but contained no extractable text
    #[error("Document contains no extractable text")]
    NoText,
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The synthesis engine binary could not be started
    #[error("Failed to launch speech engine '{command}': {message}")]
    LaunchFailed {
        /// Engine command that was invoked
        command: String,
        /// Underlying OS error
        message: String,
    },

    /// The engine ran but reported a failure for one section
    #[error("Speech engine failed on section {section}: {message}")]
    EngineFailed {
        /// 1-based section ordinal
        section: usize,
        /// Engine stderr, trimmed
        message: String,
    },

    /// The engine claimed success but the audio file is missing or empty
    #[error("Audio artifact for section {0} is missing or empty")]
    ArtifactMissing(usize),
}

/// Errors that can occur for a single video/audio combination
#[derive(Error, Debug)]
pub enum CombinerError {
    /// Staging the input bytes into temporary files failed
    #[error("Failed to stage inputs for combination: {0}")]
    Staging(String),

    /// The media tool binary could not be started
    #[error("Failed to launch media tool '{command}': {message}")]
    LaunchFailed {
        /// Tool command that was invoked
        command: String,
        /// Underlying OS error
        message: String,
    },

    /// The media tool exited with a non-zero status
    #[error("Media tool reported an error: {0}")]
    NonZeroExit(String),

    /// The media tool exceeded the configured time budget
    #[error("Media tool timed out after {0} seconds")]
    TimedOut(u64),

    /// The tool exited cleanly but the destination file is missing or empty
    #[error("Combined output is missing or empty: {0}")]
    MissingOutput(String),
}

/// Errors that can occur while bundling the output directory
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive file itself could not be created or finalized
    #[error("Failed to create archive: {0}")]
    CreateFailed(String),

    /// A single entry could not be added to the archive
    #[error("Failed to add entry '{name}' to archive: {message}")]
    EntryFailed {
        /// Entry base filename
        name: String,
        /// Underlying error
        message: String,
    },
}

/// Errors raised by the pipeline orchestration itself
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage received an empty input sequence it cannot work with
    #[error("Nothing to process: {0}")]
    EmptyInput(&'static str),

    /// Error from the text extractor
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from the speech synthesizer
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Error from the archiver
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error for a single combination step
    #[error("Combiner error: {0}")]
    Combiner(#[from] CombinerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
