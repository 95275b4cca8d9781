//! Translation catalog types.
//!
//! A [`Catalog`] is the output of a conversion: provenance notes plus the
//! ordered [`CatalogEntry`] list that a PO writer serializes.

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedUnit;

/// One translation unit of the output catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Text to translate. Never empty.
    pub source_text: String,
    /// Translation, empty until a merge fills it.
    pub target_text: String,
    /// Occurrence references, in first-seen order. Never empty.
    pub locations: Vec<String>,
    /// Extracted comments of the occurrences that had one.
    pub comments: Vec<String>,
    /// Disambiguating context (`msgctxt`).
    pub context_key: Option<String>,
    /// Disambiguating KDE-style msgid comment (`_: ...`).
    pub msgid_comment: Option<String>,
    /// Whether the translation needs review.
    pub is_fuzzy: bool,
}

impl CatalogEntry {
    /// Creates an untranslated entry for a single occurrence.
    pub fn from_unit(unit: ExtractedUnit) -> Self {
        let ExtractedUnit {
            location,
            source_text,
            context_comment,
        } = unit;

        Self {
            source_text,
            locations: vec![location],
            comments: context_comment.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the context key.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_key = Some(context.into());
        self
    }

    /// Sets the msgid comment.
    pub fn with_msgid_comment(mut self, comment: impl Into<String>) -> Self {
        self.msgid_comment = Some(comment.into());
        self
    }

    /// Adds another occurrence of the same source text.
    pub fn absorb(&mut self, unit: ExtractedUnit) {
        self.locations.push(unit.location);
        self.comments.extend(unit.context_comment);
    }

    /// Returns true if the entry has a translation.
    pub fn is_translated(&self) -> bool {
        !self.target_text.is_empty()
    }
}

/// An ordered set of catalog entries with provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Notes for the header, e.g. `extracted from calendar.ics`.
    pub notes: Vec<String>,
    /// Entries in output order.
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog from entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            notes: Vec::new(),
            entries,
        }
    }

    /// Adds a header note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Returns true if there is nothing to translate.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries that carry a translation.
    pub fn translated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_translated()).count()
    }
}
