// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use lyricass::app_config::{Config, LogLevel};
use lyricass::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert lyric transcripts to karaoke subtitles (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for lyricass
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Input lyric.json file or directory of transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (single input only, defaults to <input stem>.ass)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file path; created with defaults when missing
    #[arg(short, long, value_name = "CONFIG", env = "LYRICASS_CONFIG")]
    config_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not romanize Japanese lines that lack a transliteration
    #[arg(long)]
    no_romanize: bool,
}

/// lyricass - karaoke subtitles from timed lyrics
///
/// Converts syllable-timed lyric transcripts into ASS subtitles with
/// per-character highlighting and collision-free line placement.
#[derive(Parser, Debug)]
#[command(name = "lyricass")]
#[command(version)]
#[command(about = "Karaoke ASS subtitle generator for timed lyrics")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "lyricass converts syllable-timed lyric transcripts (lyric.json) into ASS subtitles.

EXAMPLES:
    lyricass lyric.json                        # Writes lyric.ass next to the input
    lyricass -o song.ass lyric.json            # Explicit output file
    lyricass -c style.json lyric.json          # Use (or create) a config file
    lyricass -f --log-level debug ./songs/     # Convert a whole directory
    lyricass completions bash > lyricass.bash  # Generate bash completions

CONFIGURATION:
    Without --config the built-in defaults are used. If the given config file
    doesn't exist, a default one is written there. Style entries in the file
    are merged over the default preset with the same key.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
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
        // The instance accepts everything; `set_max_level` does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lyricass", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        None => run_generate(cli.generate),
    }
}

// Loads the config file, writing the defaults there first when it is missing
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return Config::load(path);
    }

    warn!("Config file not found at {:?}, creating default config.", path);
    let config = Config::default();
    config
        .save(path)
        .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
    Ok(config)
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = &options.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input_path = options
        .input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let mut config = match &options.config_path {
        Some(path) => load_or_create_config(path)?,
        None => Config::default(),
    };

    if options.no_romanize {
        config.romanize = false;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    controller.run_path(&input_path, options.output, options.force_overwrite)
}
