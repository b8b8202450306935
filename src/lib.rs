pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExportConfig, ExtractConfig, PreviewConfig};
pub use error::{CheckerError, Result, UserFriendlyError};

// Core functionality re-exports
pub use analysis::{compute_difference, CategoryCounts, DifferenceResult};
pub use export::{AnalysisReport, DocumentSummary, OutputManager, Preview, PreviewBounds};
pub use extractor::{
    extract_usernames, parse_usernames, ExportShape, Extraction, ExtractionStats,
    UsernameExtractor, UsernameSet,
};
pub use ui::{OutputFormatter, OutputMode, PreviewOptions, ProgressManager};

use indicatif::ProgressBar;
use std::path::Path;
use std::time::Instant;

/// Main library interface for comparing followers and following exports
pub struct FollowChecker {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    force_overwrite: bool,
}

impl FollowChecker {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Create FollowChecker instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
            .with_force_overwrite(cli_args.force))
    }

    /// Load both exports, compare them and write the export files if enabled.
    ///
    /// Both documents are extracted before anything is compared, so a
    /// malformed document never produces a partial result.
    pub fn analyze<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        followers_path: P,
        following_path: Q,
    ) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let followers_path = followers_path.as_ref();
        let following_path = following_path.as_ref();

        let spinner = self.progress_manager.create_spinner("Analyzing your files...");

        let loaded = self
            .load_document(&spinner, followers_path, ExportShape::Followers)
            .and_then(|followers| {
                self.load_document(&spinner, following_path, ExportShape::Following)
                    .map(|following| (followers, following))
            });

        let (followers, following) = match loaded {
            Ok(documents) => documents,
            Err(e) => {
                spinner.abandon_with_message("Analysis failed");
                return Err(e);
            }
        };

        let result = compute_difference(&followers.usernames, &following.usernames);
        ui::progress::finish_progress_with_summary(&spinner, "Files analyzed", start_time.elapsed());

        self.output_formatter.info(&format!(
            "{} followers, {} following, {} mutual",
            followers.usernames.len(),
            following.usernames.len(),
            result.mutual_count
        ));

        let mut report = AnalysisReport::new(
            DocumentSummary {
                path: followers_path.display().to_string(),
                usernames: followers.usernames.len(),
                stats: followers.stats,
            },
            DocumentSummary {
                path: following_path.display().to_string(),
                usernames: following.usernames.len(),
                stats: following.stats,
            },
            result,
        );

        if self.config.export.enabled {
            self.export_results(&mut report)?;
        }

        Ok(report)
    }

    fn load_document(
        &self,
        spinner: &ProgressBar,
        path: &Path,
        shape: ExportShape,
    ) -> Result<Extraction> {
        spinner.suspend(|| {
            self.output_formatter
                .debug(&format!("Reading {} export from {}", shape, path.display()))
        });

        let extraction = UsernameExtractor::new(&self.config.extract).load_file(path, shape)?;

        // Messages must not interleave with the spinner's redraws.
        spinner.suspend(|| {
            self.output_formatter
                .debug(&format!("{}: {}", shape, extraction.stats.display_summary()));

            if extraction.usernames.is_empty() {
                self.output_formatter.warning(&format!(
                    "No usernames found in the {} export ({})",
                    shape,
                    path.display()
                ));
            }
        });

        Ok(extraction)
    }

    fn export_results(&self, report: &mut AnalysisReport) -> Result<()> {
        let output_manager =
            OutputManager::new(&self.config.export).with_force_overwrite(self.force_overwrite);

        let written = output_manager.write_exports(report)?;

        self.output_formatter.success(&format!(
            "Saved {} files to {}",
            written.len(),
            output_manager.get_output_directory().display()
        ));

        Ok(())
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            count: self.config.preview.count,
            bounds: PreviewBounds::from(&self.config.preview),
        }
    }

    /// Print the report using the configured preview size.
    pub fn print_report(&self, report: &AnalysisReport) {
        self.output_formatter
            .print_analysis_report(report, self.preview_options());
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CheckerError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Compare two exports with default settings and no console output.
pub fn check_followers<P: AsRef<Path>, Q: AsRef<Path>>(
    followers_path: P,
    following_path: Q,
) -> Result<DifferenceResult> {
    let checker = FollowChecker::new(Config::default(), OutputMode::Plain, 0, true);
    checker
        .analyze(followers_path, following_path)
        .map(|report| report.result)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
