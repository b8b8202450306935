use crate::analysis::{CategoryCounts, DifferenceResult};
use crate::config::ExportConfig;
use crate::error::{CheckerError, Result};
use crate::export::formats::{to_csv, to_text};
use crate::extractor::ExtractionStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const NOT_FOLLOWING_BACK_TXT: &str = "not_following_back.txt";
pub const NOT_FOLLOWING_BACK_CSV: &str = "not_following_back.csv";
pub const DONT_FOLLOW_BACK_TXT: &str = "dont_follow_back.txt";
pub const DONT_FOLLOW_BACK_CSV: &str = "dont_follow_back.csv";
pub const REPORT_JSON: &str = "report.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub path: String,
    pub usernames: usize,
    pub stats: ExtractionStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub followers: DocumentSummary,
    pub following: DocumentSummary,
    pub counts: CategoryCounts,
    pub result: DifferenceResult,
    pub generated_at: DateTime<Utc>,
    pub exported_files: Vec<String>,
}

impl AnalysisReport {
    pub fn new(followers: DocumentSummary, following: DocumentSummary, result: DifferenceResult) -> Self {
        Self {
            followers,
            following,
            counts: result.category_counts(),
            result,
            generated_at: Utc::now(),
            exported_files: Vec::new(),
        }
    }
}

pub struct OutputManager {
    output_directory: PathBuf,
    csv_header: String,
    include_dont_follow_back: bool,
    write_report: bool,
    force_overwrite: bool,
}

impl OutputManager {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_directory: config.base_directory.clone(),
            csv_header: config.csv_header.clone(),
            include_dont_follow_back: config.include_dont_follow_back,
            write_report: config.write_report,
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// File names this manager writes, in write order.
    pub fn planned_files(&self) -> Vec<&'static str> {
        let mut files = vec![NOT_FOLLOWING_BACK_TXT, NOT_FOLLOWING_BACK_CSV];
        if self.include_dont_follow_back {
            files.extend([DONT_FOLLOW_BACK_TXT, DONT_FOLLOW_BACK_CSV]);
        }
        if self.write_report {
            files.push(REPORT_JSON);
        }
        files
    }

    pub fn initialize(&self) -> Result<()> {
        if !self.output_directory.exists() {
            fs::create_dir_all(&self.output_directory).map_err(|e| CheckerError::Permission {
                path: format!(
                    "Cannot create output directory {}: {}",
                    self.output_directory.display(),
                    e
                ),
            })?;
        }

        if !self.force_overwrite {
            for name in self.planned_files() {
                let path = self.output_directory.join(name);
                if path.exists() {
                    return Err(CheckerError::OutputFileExists {
                        path: path.display().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Writes every export and records the written paths on the report.
    pub fn write_exports(&self, report: &mut AnalysisReport) -> Result<Vec<PathBuf>> {
        self.initialize()?;

        let mut written = Vec::new();
        let result = &report.result;

        written.push(self.write_file(NOT_FOLLOWING_BACK_TXT, &to_text(&result.not_following_back))?);
        written.push(self.write_file(
            NOT_FOLLOWING_BACK_CSV,
            &to_csv(&result.not_following_back, &self.csv_header),
        )?);

        if self.include_dont_follow_back {
            written.push(self.write_file(DONT_FOLLOW_BACK_TXT, &to_text(&result.dont_follow_back))?);
            written.push(self.write_file(
                DONT_FOLLOW_BACK_CSV,
                &to_csv(&result.dont_follow_back, &self.csv_header),
            )?);
        }

        report.exported_files = written.iter().map(|p| p.display().to_string()).collect();

        if self.write_report {
            let report_path = self.output_directory.join(REPORT_JSON);
            report.exported_files.push(report_path.display().to_string());
            let json_content = serde_json::to_string_pretty(&*report).map_err(|e| CheckerError::Config {
                message: format!("Failed to serialize report to JSON: {}", e),
            })?;
            written.push(self.write_file(REPORT_JSON, &json_content)?);
        }

        Ok(written)
    }

    fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_directory.join(name);
        fs::write(&path, content.as_bytes()).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => CheckerError::Permission {
                path: path.display().to_string(),
            },
            _ => CheckerError::Io(e),
        })?;
        Ok(path)
    }
}
