// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use karasub::app_config::{self, Config};
use karasub::app_controller::{Controller, ProcessRequest};
use karasub::export::ExportFormat;

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

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliExportFormat {
    Ttml,
    Lrc,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Ttml => ExportFormat::Ttml,
            CliExportFormat::Lrc => ExportFormat::Lrc,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a project from lyrics and audio, then write its subtitles
    Process(ProcessArgs),

    /// Apply a batch of word timing corrections to a saved project
    Correct {
        /// Saved project record (<id>.project.json)
        #[arg(value_name = "PROJECT_FILE")]
        project_file: PathBuf,

        /// JSON list of {segment_index, word_index, new_start, new_end}
        #[arg(value_name = "CORRECTIONS_FILE")]
        corrections_file: PathBuf,
    },

    /// Export a saved project as TTML or LRC
    Export {
        /// Saved project record (<id>.project.json)
        #[arg(value_name = "PROJECT_FILE")]
        project_file: PathBuf,

        /// Output format
        #[arg(short = 't', long, value_enum)]
        format: CliExportFormat,

        /// Output file; defaults to `<name>.<ext>` next to the record
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Process every <stem>.txt + <stem>.wav pair in a directory
    Batch {
        /// Directory to scan (recursive)
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,

        /// Reprocess pairs whose subtitles already exist
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for karasub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Reference lyrics (UTF-8 .txt)
    #[arg(value_name = "TEXT")]
    text_file: PathBuf,

    /// Audio file (.wav)
    #[arg(value_name = "AUDIO")]
    audio_file: PathBuf,

    /// Recognizer transcript JSON; `<audio stem>.transcript.json` is used when present
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Project display name (defaults to the text file name)
    #[arg(short, long)]
    name: Option<String>,

    /// Lyrics language code (e.g., 'ru', 'en')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Directory for the project record and exports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// karasub - karaoke subtitle timing
///
/// Builds word-timed karaoke subtitles from reference lyrics and audio,
/// applies manual corrections, and exports TTML or enhanced LRC.
#[derive(Parser, Debug)]
#[command(name = "karasub")]
#[command(version)]
#[command(about = "Karaoke subtitle timing and export tool")]
#[command(long_about = "karasub aligns reference lyrics with audio and exports word-timed karaoke subtitles.

Without a recognizer transcript, each word gets an equal share of the audio
duration and words are grouped seven per line.

EXAMPLES:
    karasub process song.txt song.wav                    # Uniform timing
    karasub process song.txt song.wav --transcript t.json # Align recognizer output
    karasub correct projects/<id>.project.json fixes.json
    karasub export projects/<id>.project.json -t lrc
    karasub batch /music/ --log-level debug
    karasub completions bash > karasub.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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
        // The logger accepts everything; the global max level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "karasub", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    let cli_log_level: Option<app_config::LogLevel> = cli.log_level.clone().map(Into::into);
    if let Some(level) = &cli_log_level {
        log::set_max_level(level.to_level_filter());
    }

    let config = load_or_create_config(&cli.config_path, cli_log_level)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Process(args) => {
            let output_dir = args
                .output_dir
                .unwrap_or_else(|| PathBuf::from(&controller.config().output.directory));
            let request = ProcessRequest {
                text_file: args.text_file,
                audio_file: args.audio_file,
                transcript_file: args.transcript,
                name: args.name,
                language: args.language,
                output_dir,
                retain_project: true,
            };

            let outcome = controller.run(request).await?;
            println!("{}", outcome.project_path.display());
            for export in &outcome.exports {
                println!("{}", export.display());
            }
        }
        Commands::Correct {
            project_file,
            corrections_file,
        } => {
            let report = controller.correct(&project_file, &corrections_file)?;
            info!(
                "Applied {} corrections, skipped {}",
                report.applied,
                report.skipped.len()
            );
        }
        Commands::Export {
            project_file,
            format,
            output,
        } => {
            let path = controller.export(&project_file, format.into(), output.as_deref())?;
            println!("{}", path.display());
        }
        Commands::Batch {
            input_dir,
            force_overwrite,
        } => {
            let summary = controller.run_folder(input_dir, force_overwrite).await?;
            if summary.failed > 0 {
                warn!("{} projects failed", summary.failed);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the config file, or write a default one when it is missing
fn load_or_create_config(config_path: &str, cli_log_level: Option<app_config::LogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();
        if let Some(log_level) = &cli_log_level {
            config.log_level = log_level.clone();
        }
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = cli_log_level {
        config.log_level = log_level;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
