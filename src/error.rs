//! Error types for typofix.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypofixError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Model errors
    #[error("Model file not found at {path}")]
    ModelNotFound { path: String },

    #[error("Failed to parse model: {message}")]
    ModelParse { message: String },

    #[error("Model format version mismatch: expected {expected}, got {actual}")]
    ModelVersion { expected: u32, actual: u32 },

    #[error("Failed to write model: {message}")]
    ModelWrite { message: String },

    // Training errors
    #[error("Alphabet file {path} contains no letters")]
    AlphabetEmpty { path: String },

    #[error("Training corpus {path} produced no sentences")]
    CorpusEmpty { path: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, TypofixError>;
