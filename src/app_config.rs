use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Speech synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Media combination settings
    #[serde(default)]
    pub combiner: CombinerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            combiner: CombinerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.synthesis.engine.trim().is_empty() {
            return Err(anyhow!("Speech engine command must not be empty"));
        }
        if !(80..=450).contains(&self.synthesis.rate_wpm) {
            return Err(anyhow!(
                "Speech rate must be between 80 and 450 words per minute, got {}",
                self.synthesis.rate_wpm
            ));
        }
        if self.combiner.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("Media tool command must not be empty"));
        }
        if self.combiner.timeout_secs == 0 {
            return Err(anyhow!("Combiner timeout must be greater than zero"));
        }
        if self.combiner.output_extension.trim().is_empty()
            || self.combiner.output_extension.starts_with('.')
        {
            return Err(anyhow!(
                "Output extension must be a bare extension like 'mp4', got '{}'",
                self.combiner.output_extension
            ));
        }
        Ok(())
    }
}

/// Speech synthesis engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Synthesis engine command (espeak-ng compatible)
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Voice identifier passed to the engine
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speech rate in words per minute
    #[serde(default = "default_rate_wpm")]
    pub rate_wpm: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            voice: default_voice(),
            rate_wpm: default_rate_wpm(),
        }
    }
}

/// External media tool configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CombinerConfig {
    /// Path or command name for ffmpeg
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Timeout for a single combination, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Container extension for the muxed output files
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: default_timeout_secs(),
            output_extension: default_output_extension(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operation messages
    #[default]
    Info,
    /// Verbose debugging
    Debug,
    /// Very verbose tracing
    Trace,
}

fn default_engine() -> String {
    "espeak-ng".to_string()
}

fn default_voice() -> String {
    "en".to_string()
}

fn default_rate_wpm() -> u32 {
    175
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_output_extension() -> String {
    "mp4".to_string()
}
