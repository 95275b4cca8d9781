//! Field extraction.
//!
//! [`FieldExtractor`] turns calendar components into [`ExtractedUnit`]s, one
//! per present and non-empty translatable field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CalendarDocument, Component};
use crate::field::TranslatableField;
use crate::identity::{start_comment, unit_location};

/// One translatable occurrence found in a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedUnit {
    /// `[UID]FIELD` identity of the occurrence.
    pub location: String,
    /// The raw field text.
    pub source_text: String,
    /// `Start date: ...`, absent when the component has no start.
    pub context_comment: Option<String>,
}

/// Extracts translatable units from calendar components.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    fields: Vec<TranslatableField>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(TranslatableField::ALL.to_vec())
    }
}

impl FieldExtractor {
    /// Creates an extractor examining `fields`, in that order.
    pub fn new(fields: Vec<TranslatableField>) -> Self {
        Self { fields }
    }

    /// Returns the fields examined on each component.
    pub fn fields(&self) -> &[TranslatableField] {
        &self.fields
    }

    /// Extracts the units of one component.
    ///
    /// Never fails: a component without UID or start still yields units.
    pub fn extract_component(&self, component: &Component) -> Vec<ExtractedUnit> {
        let uid = component.uid.as_deref();
        let comment = component.start.as_ref().map(start_comment);

        self.fields
            .iter()
            .filter_map(|&field| {
                component.field(field).map(|text| ExtractedUnit {
                    location: unit_location(uid, field),
                    source_text: text.to_string(),
                    context_comment: comment.clone(),
                })
            })
            .collect()
    }

    /// Extracts the units of every component, in document order.
    pub fn extract_document(&self, document: &CalendarDocument) -> Vec<ExtractedUnit> {
        let mut units = Vec::new();
        for (index, component) in document.components.iter().enumerate() {
            let extracted = self.extract_component(component);
            if !extracted.is_empty() {
                for issue in component.diagnose(index) {
                    debug!(%issue, "Extracting from partially identified component");
                }
            }
            units.extend(extracted);
        }

        debug!(
            components = document.len(),
            units = units.len(),
            "Extracted translatable units"
        );
        units
    }
}
