//! Error types for fixture generation and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while generating or rendering bundles.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The schema itself failed to compile.
    #[error("Invalid schema: {reason}")]
    InvalidSchema {
        /// Compiler message.
        reason: String,
    },

    /// The instance violated the schema. One entry per violation.
    #[error("Schema validation failed with {} error(s): {}", .errors.len(), .errors.join("; "))]
    SchemaValidation {
        /// `<instance path>: <message>` per violation.
        errors: Vec<String>,
    },

    /// Image encode/decode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A raster buffer could not be allocated or converted.
    #[error("Raster error: {reason}")]
    Raster {
        /// What failed.
        reason: String,
    },

    /// A bundle does not contain the requested document type.
    #[error("Document type not found for {applicant_id}: {document_type}")]
    DocumentNotFound {
        /// Applicant searched.
        applicant_id: String,
        /// Type that was missing.
        document_type: String,
    },

    /// The gemimg command exited with a failure status.
    #[error("gemimg failed for {document_id}: {message}")]
    GemimgFailed {
        /// Document being generated.
        document_id: String,
        /// Generator stderr, or stdout when stderr was empty.
        message: String,
    },

    /// The gemimg command did not finish in time.
    #[error("gemimg timed out after {seconds}s for {document_id}")]
    GemimgTimeout {
        /// Document being generated.
        document_id: String,
        /// Configured timeout.
        seconds: u64,
    },

    /// The gemimg command claimed success without producing a usable image.
    #[error("gemimg reported success but output not found: {}", .path.display())]
    GemimgMissingOutput {
        /// Requested destination.
        path: PathBuf,
    },

    /// The configured gemimg command line is empty.
    #[error("gemimg command line is empty")]
    GemimgCommandEmpty,
}
