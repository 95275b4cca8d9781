//! Conversion error types.

use icalpo_core::UnknownDuplicateStyle;
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort a conversion.
///
/// Components that are only partially identified are not errors; see
/// [`icalpo_core::MalformedComponent`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input holds no calendar structure at all.
    #[error("input contains no calendar data")]
    EmptyInput,

    /// The calendar grammar rejected the input.
    #[error("failed to parse calendar: {message}")]
    CalendarParse { message: String },

    /// The template cannot be used; nothing was written.
    #[error("unusable template: {message}")]
    TemplateMismatch { message: String },

    /// The duplicate style option is not recognized.
    #[error(transparent)]
    UnknownDuplicateStyle(#[from] UnknownDuplicateStyle),

    /// A stream did not contain UTF-8 text.
    #[error("{what} is not valid UTF-8: {source}")]
    Encoding {
        what: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// IO error while reading or writing a stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Creates a template mismatch error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::TemplateMismatch {
            message: message.into(),
        }
    }

    /// Returns true if the input had no calendar structure.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}
