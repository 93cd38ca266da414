//! Error handling for finscore.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while creating a project.
///
/// `InvalidContext` is raised before anything touches the filesystem.
/// Every other variant comes out of the generation step.
#[derive(Error, Debug)]
pub enum Error {
    /// The `--extra-context` value is not a JSON object
    #[error("Invalid JSON string for --extra-context: {0}")]
    InvalidContext(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Template rendering error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during template processing
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Represents errors that occur while reading the template manifest
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template directory does not exist: {template_dir}")]
    TemplateDoesNotExistError { template_dir: String },

    #[error("Output directory already exists: {output_dir}")]
    OutputDirectoryExistsError { output_dir: String },

    /// A declared variable has neither a supplied value nor a default
    #[error("Missing value for template variable '{name}'")]
    MissingVariable { name: String },

    /// Represents errors in processing the ignore file
    #[error("Ignore file error: {0}")]
    IgnoreError(String),
}

impl Error {
    /// Returns true when the failure happened while validating `--extra-context`.
    pub fn is_invalid_context(&self) -> bool {
        matches!(self, Error::InvalidContext(_))
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
