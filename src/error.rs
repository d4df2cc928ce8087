//! Error types and exit codes for tagger

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for tagger operations
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("path '{path}' is not inside '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Usage: {message}")]
    Usage { message: String },

    #[error("Invalid tag name: {message}")]
    InvalidTag { message: String },

    #[error("Corrupt database {path}: {message}")]
    CorruptDatabase { path: PathBuf, message: String },

    #[error("No tag ids left to allocate (last allocated id {last})")]
    TagIdsExhausted { last: u32 },

    #[error(
        "Unsupported database version {} (expected {})",
        dotted(.found),
        dotted(.expected)
    )]
    UnsupportedVersion { found: [u32; 3], expected: [u32; 3] },

    #[error("Failed to persist {path}: {source}")]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some paths of a batch failed. The successes are already saved;
    /// `output` is their normal report and `failures` one line per bad path.
    #[error("{failed} of {total} paths could not be tagged")]
    PartialFailure {
        failed: usize,
        total: usize,
        output: String,
        failures: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaggerError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: Path / argument errors
    /// - 2: Unreadable or incompatible database
    /// - 3: Database could not be written
    /// - 4: Configuration or server startup errors
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Numeric form of [`TaggerError::exit_code`].
    pub fn code(&self) -> u8 {
        match self {
            Self::OutsideRoot { .. } => 1,
            Self::NotFound { .. } => 1,
            Self::Usage { .. } => 1,
            Self::InvalidTag { .. } => 1,
            Self::PartialFailure { .. } => 1,
            Self::Io(_) => 1,
            Self::CorruptDatabase { .. } => 2,
            Self::TagIdsExhausted { .. } => 2,
            Self::UnsupportedVersion { .. } => 2,
            Self::PersistenceFailure { .. } => 3,
            Self::ConfigError { .. } => 4,
            Self::ServerError { .. } => 4,
        }
    }
}

/// Result type alias for tagger operations
pub type Result<T> = std::result::Result<T, TaggerError>;

fn dotted(version: &[u32; 3]) -> String {
    format!("{}.{}.{}", version[0], version[1], version[2])
}
