//! Calendar document model.
//!
//! This module defines the parsed form of an iCalendar document as the
//! extraction engine sees it:
//! - [`CalendarDocument`]: the ordered list of events
//! - [`Component`]: one event with its identity and translatable text
//! - [`StartTime`]: when the event starts, either a UTC instant or a date
//!
//! Nothing here knows about the iCalendar grammar; readers build these types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::TranslatableField;

/// The start of a calendar component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum StartTime {
    /// A specific datetime in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    Date(NaiveDate),
}

impl StartTime {
    /// Creates a StartTime from a UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a StartTime from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is an all-day start.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Renders the start as it appears in extracted comments.
    ///
    /// Datetimes always carry an explicit `+00:00` offset, e.g.
    /// `1997-07-14 17:00:00+00:00`; dates render as `1997-07-14`.
    pub fn display(&self) -> String {
        match self {
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Why a component could only be partially interpreted.
///
/// Extraction never aborts on these; the affected units are emitted with
/// whatever identity information is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedComponent {
    /// The component has no UID, locations fall back to `[]FIELD`.
    #[error("component #{index} has no UID")]
    MissingUid { index: usize },

    /// The component has no usable DTSTART, the start date comment is omitted.
    #[error("component #{index} has no start time")]
    MissingStart { index: usize },
}

/// One calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// The component UID, if present.
    pub uid: Option<String>,
    /// The component start, if present and understood.
    pub start: Option<StartTime>,
    /// Raw text of the translatable properties present on the component.
    pub fields: BTreeMap<TranslatableField, String>,
}

impl Component {
    /// Creates an empty component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets the start time.
    pub fn with_start(mut self, start: StartTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the value of a translatable field.
    pub fn with_field(mut self, field: TranslatableField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Returns the value of `field`, ignoring empty values.
    pub fn field(&self, field: TranslatableField) -> Option<&str> {
        self.fields
            .get(&field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Lists what is missing for this component to be fully identified.
    pub fn diagnose(&self, index: usize) -> Vec<MalformedComponent> {
        let mut issues = Vec::new();
        if self.uid.as_deref().is_none_or(str::is_empty) {
            issues.push(MalformedComponent::MissingUid { index });
        }
        if self.start.is_none() {
            issues.push(MalformedComponent::MissingStart { index });
        }
        issues
    }
}

/// A parsed calendar: its events in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDocument {
    pub components: Vec<Component>,
}

impl CalendarDocument {
    /// Creates a document from components in document order.
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Returns true if the document has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_display_has_explicit_offset() {
        let start = StartTime::from_datetime(Utc.with_ymd_and_hms(1997, 7, 14, 17, 0, 0).unwrap());
        assert_eq!(start.display(), "1997-07-14 17:00:00+00:00");
        assert!(!start.is_all_day());
    }

    #[test]
    fn date_display() {
        let start = StartTime::from_date(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
        assert_eq!(start.display(), "2025-02-10");
        assert!(start.is_all_day());
    }

    #[test]
    fn empty_field_values_are_absent() {
        let component = Component::new()
            .with_field(TranslatableField::Summary, "Standup")
            .with_field(TranslatableField::Location, "");

        assert_eq!(component.field(TranslatableField::Summary), Some("Standup"));
        assert_eq!(component.field(TranslatableField::Location), None);
        assert_eq!(component.field(TranslatableField::Comment), None);
    }

    #[test]
    fn diagnose_reports_missing_identity() {
        let component = Component::new().with_field(TranslatableField::Summary, "x");
        assert_eq!(
            component.diagnose(3),
            vec![
                MalformedComponent::MissingUid { index: 3 },
                MalformedComponent::MissingStart { index: 3 },
            ]
        );

        let complete = Component::new()
            .with_uid("uid1@example.com")
            .with_start(StartTime::from_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(complete.diagnose(0).is_empty());
    }
}
