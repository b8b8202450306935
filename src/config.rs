use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Field names used to walk an Instagram connections export.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub following_key: String,
    pub pairs_key: String,
    pub value_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub count: usize,
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub base_directory: PathBuf,
    pub include_dont_follow_back: bool,
    pub write_report: bool,
    pub csv_header: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            following_key: "relationships_following".to_string(),
            pairs_key: "string_list_data".to_string(),
            value_key: "value".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            count: 10,
            min: 5,
            max: 50,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_directory: PathBuf::from("."),
            include_dont_follow_back: true,
            write_report: true,
            csv_header: "username".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CheckerError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CheckerError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["igchecker.toml", ".igchecker.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(count) = cli_args.preview_count {
            self.preview.count = count;
        }

        // An explicit output directory implies the user wants the files.
        if let Some(ref output_dir) = cli_args.output_dir {
            self.export.base_directory = output_dir.clone();
            self.export.enabled = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CheckerError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CheckerError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("extract.following_key", &self.extract.following_key),
            ("extract.pairs_key", &self.extract.pairs_key),
            ("extract.value_key", &self.extract.value_key),
            ("export.csv_header", &self.export.csv_header),
        ];
        for (name, value) in keys {
            if value.trim().is_empty() {
                return Err(CheckerError::Config {
                    message: format!("{} must not be empty", name),
                });
            }
        }

        if self.preview.min == 0 {
            return Err(CheckerError::Config {
                message: "Minimum preview size must be greater than 0".to_string(),
            });
        }

        if self.preview.min > self.preview.max {
            return Err(CheckerError::Config {
                message: format!(
                    "Preview minimum ({}) exceeds preview maximum ({})",
                    self.preview.min, self.preview.max
                ),
            });
        }

        if self.export.enabled {
            if let Some(parent) = self.export.base_directory.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(CheckerError::Config {
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub preview_count: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_count(mut self, count: Option<usize>) -> Self {
        self.preview_count = count;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
