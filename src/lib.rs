/*!
 * # vidvox - PDF-narrated video combiner
 *
 * A Rust library for turning a PDF document and a set of video files into
 * narrated videos.
 *
 * ## Features
 *
 * - Extract text from PDF documents
 * - Split text into sections on numbered lines
 * - Synthesize one speech clip per section (espeak-ng)
 * - Pair clips with videos round-robin and mux them with ffmpeg
 * - Bundle the results into a single zip archive
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pdf_extractor`: PDF text extraction
 * - `section_splitter`: Digit-leading-line section heuristic
 * - `speech_synthesizer`: Text-to-speech collaborators
 * - `pairing_driver`: Round-robin pairing and combination loop
 * - `media_combiner`: External media tool invocation
 * - `archiver`: Output bundling
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod archiver;
pub mod errors;
pub mod file_utils;
pub mod media_combiner;
pub mod pairing_driver;
pub mod pdf_extractor;
pub mod section_splitter;
pub mod speech_synthesizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ArchiveError, CombinerError, ExtractionError, PipelineError, SynthesisError};
pub use pairing_driver::{BatchReport, CombinationDriver, Pairing, VideoInput, plan_pairings};
pub use section_splitter::split_numbered_sections;
