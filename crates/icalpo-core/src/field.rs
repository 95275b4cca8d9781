//! Translatable calendar fields.
//!
//! The set of iCalendar properties that carry human-readable text is a closed
//! vocabulary, kept here as data ([`TranslatableField::ALL`]) so that callers
//! can narrow or reorder it without touching the extraction code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar property whose value is extracted for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TranslatableField {
    /// Short title of the event.
    Summary,
    /// Long free-form description.
    Description,
    /// Where the event takes place.
    Location,
    /// Non-processing comment attached to the event.
    Comment,
}

impl TranslatableField {
    /// Every translatable field, in extraction order.
    pub const ALL: [Self; 4] = [
        Self::Summary,
        Self::Description,
        Self::Location,
        Self::Comment,
    ];

    /// Returns the iCalendar property name for this field.
    pub fn property_name(&self) -> &'static str {
        match self {
            Self::Summary => "SUMMARY",
            Self::Description => "DESCRIPTION",
            Self::Location => "LOCATION",
            Self::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for TranslatableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}

/// Returned when a string does not name a translatable field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown translatable field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for TranslatableField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.property_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
