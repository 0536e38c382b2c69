use std::io;
use thiserror::Error;

/// Result type for packaging operations
pub type Result<T> = std::result::Result<T, ScormError>;

/// Unified error type for all packaging operations
#[derive(Debug, Error)]
pub enum ScormError {
    // Input errors
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("No input file selected")]
    NoInputSelected,

    // Archive errors
    #[error("No HTML entry point found in archive")]
    NoEntryPointFound,

    #[error("Failed to read archive: {0}")]
    ArchiveReadError(String),

    #[error("Entry is not valid UTF-8 text: {path}")]
    EncodingError { path: String },

    // Output errors
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    TomlError(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScormError {
    /// Single sentence suitable for showing to the person who picked the file.
    ///
    /// The `Display` form carries the diagnostic detail and is meant for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScormError::UnsupportedFileType(_) => {
                "Invalid file type. Please upload an HTML file or a ZIP archive."
            }
            ScormError::NoInputSelected => "Please select an HTML file first.",
            ScormError::NoEntryPointFound => "The archive does not contain any HTML page.",
            ScormError::ArchiveReadError(_) => "The archive could not be read. It may be corrupt.",
            ScormError::EncodingError { .. } => {
                "A text file in the upload is not valid UTF-8 and cannot be packaged."
            }
            ScormError::InvalidConfig(_) | ScormError::TomlError(_) => {
                "The packager configuration is invalid."
            }
            ScormError::ConversionFailed(_) | ScormError::Io(_) | ScormError::JsonError(_) => {
                "An error occurred during conversion. Please check the logs."
            }
        }
    }
}

impl From<toml::de::Error> for ScormError {
    fn from(err: toml::de::Error) -> Self {
        ScormError::TomlError(err.to_string())
    }
}
