use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::ass::generate_ass;
use crate::file_utils::FileManager;
use crate::lyrics::{auto_romanize, load_lyrics, JapaneseRomanizer, Lyrics, Transliterator};

// @module: Application controller for lyric conversion

/// Result of converting a single transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Document written to the given path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counts reported after a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller: load, enrich, lay out, write
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Fills in missing transliterations when romanization is enabled
    transliterator: Box<dyn Transliterator>,
}

impl Controller {
    /// Create a controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            transliterator: Box::new(JapaneseRomanizer),
        })
    }

    /// Replace the built-in romanizer
    pub fn with_transliterator(mut self, transliterator: Box<dyn Transliterator>) -> Self {
        self.transliterator = transliterator;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce the subtitle document for already loaded lyrics
    pub fn convert(&self, lyrics: &Lyrics) -> Result<String> {
        let document = if self.config.romanize {
            let enriched = auto_romanize(lyrics, self.transliterator.as_ref());
            generate_ass(&enriched, &self.config)?
        } else {
            generate_ass(lyrics, &self.config)?
        };
        Ok(document)
    }

    /// Convert one transcript file. Without an explicit output path the
    /// document lands beside the input as `<stem>.ass`.
    pub fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>, force_overwrite: bool) -> Result<RunOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_file.unwrap_or_else(|| FileManager::output_path_for(&input_file, None));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(RunOutcome::Skipped(output_path));
        }

        let lyrics = load_lyrics(&input_file)
            .with_context(|| format!("Failed to load lyrics from {:?}", input_file))?;
        debug!(
            "Loaded {} lead and {} background lines from {:?}",
            lyrics.lead_lines.len(),
            lyrics.background_lines.len(),
            input_file
        );

        let document = self.convert(&lyrics)?;
        FileManager::write_to_file(&output_path, &document)?;

        info!(
            "Wrote {:?} in {}",
            output_path,
            Self::format_duration(start_time.elapsed())
        );
        Ok(RunOutcome::Written(output_path))
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Convert every `.json` transcript under a directory, writing each
    /// document beside its input. Failures are logged and counted.
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(&input_dir, "json")?;
        if files.is_empty() {
            return Err(anyhow::anyhow!("No lyric files found in directory: {:?}", input_dir));
        }

        let progress = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        for file in &files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(file_name.clone());

            match self.run(file.clone(), None, force_overwrite) {
                Ok(RunOutcome::Written(_)) => summary.processed += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.errors += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );
        Ok(summary)
    }

    /// Dispatch on the kind of input path
    pub fn run_path(&self, input: &Path, output_file: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
        if input.is_file() {
            self.run(input.to_path_buf(), output_file, force_overwrite)?;
        } else if input.is_dir() {
            if output_file.is_some() {
                warn!("Ignoring output path for directory input, writing beside each transcript");
            }
            self.run_folder(input.to_path_buf(), force_overwrite)?;
        } else {
            return Err(anyhow::anyhow!("Input path does not exist: {:?}", input));
        }
        Ok(())
    }
}
