//! Error handling for craft.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for craft operations.
///
/// Every failure aborts the whole generation run, so each variant carries
/// enough context (fragment, destination, generator) to diagnose it without
/// a partial output map.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template fragment could not be resolved in the template store.
    #[error("Failed to load template fragment '{fragment}': {reason}.")]
    TemplateLoadError { fragment: String, reason: String },

    /// A template fragment is malformed or conflicts with an earlier fragment.
    #[error("Failed to parse template fragment '{fragment}': {reason}.")]
    TemplateParseError { fragment: String, reason: String },

    /// A render instruction listed no fragments at all.
    #[error("No template fragments given for '{name}'.")]
    EmptyTemplateSetError { name: String },

    /// Executing a composed template against its data failed.
    #[error("Failed to render '{name}': {reason}.")]
    RenderError { name: String, reason: String },

    #[error("Unsupported CLI framework: '{framework}' (expected one of: cobra, urfave).")]
    UnsupportedFrameworkError { framework: String },

    #[error("Unsupported license: '{license}'.")]
    UnsupportedLicenseError { license: String },

    /// Wraps a composition or rendering failure with the generator and
    /// destination it happened for.
    #[error("Generator '{generator}' failed to produce '{destination}': {source}")]
    GenerationError {
        generator: String,
        destination: String,
        #[source]
        source: Box<Error>,
    },

    /// Two render instructions targeted the same destination.
    #[error("Destination '{destination}' is produced by both '{first}' and '{second}'.")]
    DestinationCollisionError { destination: String, first: String, second: String },

    #[error("Generator '{generator}' produced an invalid destination: '{destination}'.")]
    InvalidDestinationError { generator: String, destination: String },

    #[error("Unknown generator: '{name}'.")]
    UnknownGeneratorError { name: String },

    #[error("Generation was cancelled.")]
    CancelledError,

    /// Represents errors that occur during configuration parsing or processing.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents validation failures in user input or data.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },
}

/// Convenience type alias for Results with craft's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
