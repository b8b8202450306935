use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed {document} document: {message}")]
    MalformedInput { document: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input path: {path}")]
    InvalidPath { path: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },
}

impl CheckerError {
    pub fn malformed<D: Into<String>, M: Into<String>>(document: D, message: M) -> Self {
        CheckerError::MalformedInput {
            document: document.into(),
            message: message.into(),
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CheckerError {
    fn user_message(&self) -> String {
        match self {
            CheckerError::MalformedInput { document, message } => {
                format!("Could not read your {} file: {}", document, message)
            }
            CheckerError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            CheckerError::InvalidPath { path } => {
                format!("Cannot use input file: {}", path)
            }
            CheckerError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            CheckerError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CheckerError::MalformedInput { .. } => Some(
                "Re-download your data from Instagram choosing the JSON format (not HTML), then pass followers_1.json and following.json again.".to_string()
            ),
            CheckerError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            CheckerError::InvalidPath { .. } => Some(
                "Pass the followers_1.json and following.json files extracted from your Instagram export ZIP.".to_string()
            ),
            CheckerError::OutputFileExists { .. } => Some(
                "Remove the existing files, choose a different directory with --output, or use --force to overwrite.".to_string()
            ),
            CheckerError::Permission { .. } => Some(
                "Ensure you have the necessary read/write permissions for the target directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CheckerError {
    fn from(error: toml::de::Error) -> Self {
        CheckerError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
