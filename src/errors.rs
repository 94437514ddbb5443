/*!
 * Error types for the cellscribe application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Note that the caption engine itself is best-effort and non-throwing on
 * malformed input; these types cover I/O, configuration, and the CLI shell.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error when reading or writing the config file fails
    #[error("Config file error: {0}")]
    FileError(String),

    /// Error when parsing the config file fails
    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    /// Error when the configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur around caption processing (I/O and handoff; the
/// parse pass itself never fails)
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Error when reading a caption file fails
    #[error("Failed to read caption file: {0}")]
    ReadFailed(String),

    /// Error when the input does not look like a caption file at all
    #[error("Not a caption file: {0}")]
    NotACaptionFile(String),

    /// Error when delivering cells to a sink fails
    #[error("Failed to hand off cells: {0}")]
    HandoffFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from caption processing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
