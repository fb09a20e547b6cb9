//! Error types for world data loading.

use thiserror::Error;

/// Errors that can occur when loading level or enemy data.
#[derive(Debug, Error, PartialEq)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A tunable is out of range or not finite.
    #[error("Invalid value in '{path}': {field} = {value}")]
    InvalidValue {
        path: String,
        field: &'static str,
        value: f32,
    },

    /// The requested level is not in the registry.
    #[error("Unknown level '{0}'")]
    UnknownLevel(String),
}
