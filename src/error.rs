use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a results CSV into a [`ResultFile`].
///
/// Every variant is recoverable at the file boundary: the caller logs it
/// and moves on to the next expected file.
///
/// [`ResultFile`]: crate::data::model::ResultFile
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be opened or read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural CSV problem (ragged row, bad quoting, invalid UTF-8)
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data cell that does not parse as a floating point number
    #[error("{path}: row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// The header lacks the x-axis column
    #[error("{path}: missing '{column}' column")]
    MissingColumn { path: PathBuf, column: String },
}

/// Errors raised while rendering a figure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The plotting capability itself is unavailable; affects every file
    #[error("plotting unavailable: {reason}")]
    Environment { reason: String, hint: String },

    /// The drawing backend rejected an operation
    #[error("drawing failed: {0}")]
    Draw(String),

    /// Creating the output directory failed
    #[error("cannot create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing the PNG failed
    #[error("cannot write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl RenderError {
    /// Whether this error aborts the whole run rather than one file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Environment { .. })
    }

    /// Remediation text for environment failures.
    pub fn hint(&self) -> Option<&str> {
        match self {
            RenderError::Environment { hint, .. } => Some(hint.as_str()),
            _ => None,
        }
    }
}
