use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::caption_processor::{CaptionProcessor, Cell, ParseOutcome};
use crate::file_utils::{FileManager, FileType};
use crate::segmenter::TitleAbbreviationPolicy;

// @module: Application controller for caption conversion

/// Receives the finished cell sequence as a single load event.
///
/// This is the engine's only outward handoff: the whole transcript is
/// delivered at once, never incrementally. The CLI ships a JSON-file
/// implementation; an interactive editor would supply its own.
pub trait TranscriptSink {
    fn load_cells(&mut self, cells: Vec<Cell>) -> Result<()>;
}

/// Sink that writes the cell sequence to a JSON file.
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    pub fn new(path: PathBuf, pretty: bool) -> Self {
        JsonFileSink { path, pretty }
    }
}

impl TranscriptSink for JsonFileSink {
    fn load_cells(&mut self, cells: Vec<Cell>) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&cells)
        } else {
            serde_json::to_string(&cells)
        }
        .context("Failed to serialize cells to JSON")?;

        FileManager::write_to_file(&self.path, &json)?;
        info!("Success: {}", self.path.display());
        Ok(())
    }
}

/// Main application controller for caption conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared caption processor, cheap to hand to worker tasks
    processor: Arc<CaptionProcessor>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let policy =
            TitleAbbreviationPolicy::new(config.segmentation.abbreviations.clone());
        let processor = Arc::new(CaptionProcessor::with_policy(Arc::new(policy)));

        Ok(Self { config, processor })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.segmentation.abbreviations.is_empty()
            && !self.config.output.extension.is_empty()
    }

    /// Convert a single caption file and hand the cells to a JSON sink
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.output.extension,
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Refuse input that does not look like caption text at all
        let file_type = FileManager::detect_file_type(&input_file)?;
        if file_type != FileType::Caption {
            return Err(anyhow::anyhow!(
                "Input does not look like a caption file: {:?}",
                input_file
            ));
        }

        let outcome = self.parse_on_worker(&input_file).await?;
        self.report_diagnostics(&input_file, &outcome);

        let mut sink = JsonFileSink::new(output_path, self.config.output.pretty);
        sink.load_cells(outcome.cells)?;

        Ok(())
    }

    /// Convert every caption file found under a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        // Check if the input directory exists
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let caption_files = FileManager::find_files(&input_dir, "vtt")?;
        if caption_files.is_empty() {
            warn!("No caption files found in directory: {:?}", input_dir);
            return Ok(());
        }

        info!("Found {} caption file(s) to convert", caption_files.len());

        let progress_bar = ProgressBar::new(caption_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        let mut converted_count = 0;
        for file in &caption_files {
            progress_bar.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let output_dir = file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();

            match self.run(file.clone(), output_dir, force_overwrite).await {
                Ok(()) => converted_count += 1,
                Err(e) => error!("Error converting {:?}: {}", file, e),
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Finished converting {}/{} caption file(s)",
            converted_count,
            caption_files.len()
        );
        Ok(())
    }

    /// Run the synchronous parse pass on a blocking worker so large
    /// inputs do not stall the runtime. Cancellation simply discards the
    /// result; the pass has no side effects until the sink handoff.
    async fn parse_on_worker(&self, input_file: &Path) -> Result<ParseOutcome> {
        let content = FileManager::read_to_string(input_file)?;
        let processor = Arc::clone(&self.processor);

        tokio::task::spawn_blocking(move || processor.parse_str(&content))
            .await
            .context("Caption parsing task failed")
    }

    fn report_diagnostics(&self, input_file: &Path, outcome: &ParseOutcome) {
        debug!(
            "Converted {:?} into {} cell(s)",
            input_file,
            outcome.cells.len()
        );
        for diagnostic in &outcome.diagnostics {
            warn!("{:?}: {}", input_file, diagnostic);
        }
    }
}
