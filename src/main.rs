// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod archiver;
mod errors;
mod file_utils;
mod media_combiner;
mod pairing_driver;
mod pdf_extractor;
mod section_splitter;
mod speech_synthesizer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine videos with PDF-to-speech narration (default command)
    #[command(alias = "narrate")]
    Narrate(NarrateArgs),

    /// Generate shell completions for vidvox
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct NarrateArgs {
    /// Video files to narrate
    #[arg(value_name = "VIDEO")]
    videos: Vec<PathBuf>,

    /// PDF document to narrate from
    #[arg(short, long, value_name = "PDF")]
    pdf: PathBuf,

    /// Output bundle path
    #[arg(short, long, default_value = "output_videos.zip")]
    output: PathBuf,

    /// Voice identifier for the speech engine
    #[arg(long)]
    voice: Option<String>,

    /// Speech rate in words per minute
    #[arg(long)]
    rate: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// vidvox - PDF-narrated video combiner
///
/// Converts a PDF's text to speech section-by-section, pairs each clip with
/// a video file (round-robin if counts differ), muxes each pair with ffmpeg
/// and zips the results.
#[derive(Parser, Debug)]
#[command(name = "vidvox")]
#[command(version = "0.1.0")]
#[command(about = "Combine videos with PDF-to-speech narration")]
#[command(long_about = "vidvox converts a PDF's text to speech section-by-section, pairs each clip
with a video file and muxes each pair into a narrated video.

EXAMPLES:
    vidvox clip.mp4 --pdf notes.pdf                # One video, default output
    vidvox a.mp4 b.avi c.mov --pdf notes.pdf       # Round-robin over three videos
    vidvox clip.mp4 --pdf notes.pdf -o bundle.zip  # Custom bundle path
    vidvox clip.mp4 --pdf notes.pdf --voice en-gb  # Different voice
    vidvox --log-level debug clip.mp4 --pdf n.pdf  # Verbose logging
    vidvox completions bash > vidvox.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

REQUIREMENTS:
    ffmpeg and espeak-ng must be available on PATH (or configured in
    conf.json).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video files to narrate
    #[arg(value_name = "VIDEO")]
    videos: Vec<PathBuf>,

    /// PDF document to narrate from
    #[arg(short, long, value_name = "PDF")]
    pdf: Option<PathBuf>,

    /// Output bundle path
    #[arg(short, long, default_value = "output_videos.zip")]
    output: PathBuf,

    /// Voice identifier for the speech engine
    #[arg(long)]
    voice: Option<String>,

    /// Speech rate in words per minute
    #[arg(long)]
    rate: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vidvox", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Narrate(args)) => run_narrate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let pdf = cli
                .pdf
                .ok_or_else(|| anyhow!("--pdf is required when no subcommand is specified"))?;

            let narrate_args = NarrateArgs {
                videos: cli.videos,
                pdf,
                output: cli.output,
                voice: cli.voice,
                rate: cli.rate,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_narrate(narrate_args).await
        }
    }
}

async fn run_narrate(options: NarrateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(voice) = &options.voice {
            config.synthesis.voice = voice.clone();
        }

        if let Some(rate) = options.rate {
            config.synthesis.rate_wpm = rate;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(voice) = &options.voice {
            config.synthesis.voice = voice.clone();
        }

        if let Some(rate) = options.rate {
            config.synthesis.rate_wpm = rate;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    if options.videos.is_empty() {
        return Err(anyhow!("At least one VIDEO input is required"));
    }

    // Create controller and run the pipeline
    let controller = Controller::with_config(config)?;
    let summary = controller
        .run(&options.videos, &options.pdf, &options.output)
        .await?;

    log::info!(
        "Success: {} ({} video(s))",
        summary.bundle_path.display(),
        summary.output_count
    );

    Ok(())
}
