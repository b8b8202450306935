use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "igchecker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "See who doesn't follow you back on Instagram")]
#[command(
    long_about = "igchecker compares the followers and following lists from an Instagram \
                  data export and lists the accounts that do not follow you back."
)]
#[command(before_help = "📸 igchecker - Instagram Follower Checker")]
#[command(after_help = "GETTING YOUR DATA:\n  \
    Instagram > Profile > Menu > Your activity > Download your information.\n  \
    Choose the JSON format and the \"Followers and following\" data, then unzip\n  \
    the archive to find followers_1.json and following.json.\n\n\
EXAMPLES:\n  \
    igchecker followers_1.json following.json\n  \
    igchecker followers_1.json following.json --preview 25\n  \
    igchecker followers_1.json following.json --output results --force\n  \
    igchecker followers_1.json following.json --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Followers export (followers_1.json)
    #[arg(value_parser = validate_json_path, required_unless_present = "generate_config")]
    pub followers: Option<PathBuf>,

    /// Following export (following.json)
    #[arg(value_parser = validate_json_path, required_unless_present = "generate_config")]
    pub following: Option<PathBuf>,

    /// Number of usernames to preview per list
    #[arg(short = 'n', long, help = "Usernames to preview per list (clamped to the configured bounds)")]
    pub preview: Option<usize>,

    /// Directory to write the full results to
    #[arg(short, long, help = "Write the full lists as TXT and CSV files into this directory")]
    pub output: Option<PathBuf>,

    /// Overwrite existing result files
    #[arg(long, help = "Overwrite existing result files in the output directory")]
    pub force: bool,

    /// Configuration file path
    #[arg(short, long, env = "IGCHECKER_CONFIG", help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_preview_count(self.preview)
            .with_output_dir(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_json_path(s: &str) -> std::result::Result<PathBuf, String> {
    let path = Path::new(s);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(format!(
            "{} is not a .json file. Download your Instagram data in JSON format, not HTML.",
            s
        ));
    }

    if !path.exists() {
        return Err(format!("{} does not exist", s));
    }

    if !path.is_file() {
        return Err(format!("{} is not a file", s));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_cli() -> Cli {
        Cli {
            followers: Some(PathBuf::from("followers_1.json")),
            following: Some(PathBuf::from("following.json")),
            preview: None,
            output: None,
            force: false,
            config: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_validate_json_path() {
        let temp_dir = TempDir::new().unwrap();
        let json = temp_dir.path().join("followers_1.json");
        let html = temp_dir.path().join("followers_1.html");
        fs::write(&json, "[]").unwrap();
        fs::write(&html, "<html></html>").unwrap();

        assert!(validate_json_path(json.to_str().unwrap()).is_ok());
        assert!(validate_json_path(html.to_str().unwrap()).is_err());
        assert!(validate_json_path(temp_dir.path().join("missing.json").to_str().unwrap()).is_err());

        let dir_named_json = temp_dir.path().join("folder.json");
        fs::create_dir(&dir_named_json).unwrap();
        assert!(validate_json_path(dir_named_json.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("FOLLOWING.JSON");
        fs::write(&path, "{}").unwrap();
        assert!(validate_json_path(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let mut cli = create_test_cli();
        cli.preview = Some(20);
        cli.output = Some(PathBuf::from("results"));

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.preview_count, Some(20));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("results")));
    }

    #[test]
    fn test_verbosity_level() {
        let mut cli = create_test_cli();
        cli.verbose = 2;
        assert_eq!(cli.verbosity_level(), 2);

        cli.quiet = true;
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_generate_config_needs_no_inputs() {
        let cli = Cli::try_parse_from(["igchecker", "--generate-config"]).unwrap();
        assert!(cli.generate_config);
        assert!(cli.followers.is_none());
    }

    #[test]
    fn test_inputs_required_otherwise() {
        assert!(Cli::try_parse_from(["igchecker", "--preview", "10"]).is_err());
    }
}
