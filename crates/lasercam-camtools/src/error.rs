//! Error types for the CAM tools crate.
//!
//! Document and rule problems have their own enums; [`CamToolError`] wraps
//! them for the pipeline facade.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during toolpath generation and emission.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The source document could not be read.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// The emission rule could not be resolved.
    #[error("Emission rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Errors reading a source document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file does not exist.
    #[error("Input document not found: {0}")]
    NotFound(PathBuf),

    /// The document has neither a `viewBox` nor numeric dimensions.
    #[error("Document has no usable viewBox or width/height")]
    MissingViewBox,

    /// Malformed XML.
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// I/O error reading the document.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Errors resolving an emission rule.
#[derive(Error, Debug)]
pub enum RuleError {
    /// No rule file and no built-in rule with this name.
    #[error("Emission rule '{name}' not found in {dir} and not built in")]
    NotFound { name: String, dir: PathBuf },

    /// The rule text contains no sections.
    #[error("Emission rule '{0}' defines no sections")]
    Empty(String),

    /// I/O error reading the rule file.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
