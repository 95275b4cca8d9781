//! Duplicate reconciliation.
//!
//! Calendars routinely repeat the same text ("Team meeting", a room name) in
//! many events. A PO catalog cannot hold two entries with the same msgid
//! unless they are disambiguated, so [`reconcile`] groups units by source text
//! and applies a [`DuplicateStyle`] to every group with more than one member.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::CatalogEntry;
use crate::extract::ExtractedUnit;

/// How entries sharing the same source text are kept apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStyle {
    /// One entry per occurrence, each with `msgctxt` set to its location.
    #[default]
    Msgctxt,
    /// One entry for the whole group, listing every location.
    Merge,
    /// One entry per occurrence, each with a `_: location` msgid comment.
    MsgidComment,
}

impl DuplicateStyle {
    /// Every recognized style.
    pub const ALL: [Self; 3] = [Self::Msgctxt, Self::Merge, Self::MsgidComment];

    /// Returns the option value naming this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msgctxt => "msgctxt",
            Self::Merge => "merge",
            Self::MsgidComment => "msgid_comment",
        }
    }
}

impl fmt::Display for DuplicateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a duplicate style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duplicate style '{0}' (expected msgctxt, merge or msgid_comment)")]
pub struct UnknownDuplicateStyle(pub String);

impl FromStr for DuplicateStyle {
    type Err = UnknownDuplicateStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownDuplicateStyle(s.to_string()))
    }
}

/// Collapses units that share a location; the later unit wins but keeps the
/// position of the first one.
fn collapse_locations(units: Vec<ExtractedUnit>) -> Vec<ExtractedUnit> {
    let mut collapsed: Vec<ExtractedUnit> = Vec::with_capacity(units.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for unit in units {
        match positions.entry(unit.location.clone()) {
            Entry::Occupied(slot) => {
                warn!(
                    location = %unit.location,
                    "Location appears more than once, keeping the last occurrence"
                );
                collapsed[*slot.get()] = unit;
            }
            Entry::Vacant(slot) => {
                slot.insert(collapsed.len());
                collapsed.push(unit);
            }
        }
    }

    collapsed
}

/// Builds catalog entries from extracted units.
///
/// Entries come out in the order their first contributing unit was seen.
pub fn reconcile(units: Vec<ExtractedUnit>, style: DuplicateStyle) -> Vec<CatalogEntry> {
    let units = collapse_locations(units);

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for unit in &units {
        *occurrences.entry(unit.source_text.clone()).or_default() += 1;
    }

    let mut entries: Vec<CatalogEntry> = Vec::with_capacity(units.len());
    let mut merged: HashMap<String, usize> = HashMap::new();

    for unit in units {
        if occurrences[&unit.source_text] == 1 {
            entries.push(CatalogEntry::from_unit(unit));
            continue;
        }

        match style {
            DuplicateStyle::Msgctxt => {
                let context = unit.location.clone();
                entries.push(CatalogEntry::from_unit(unit).with_context(context));
            }
            DuplicateStyle::MsgidComment => {
                let comment = unit.location.clone();
                entries.push(CatalogEntry::from_unit(unit).with_msgid_comment(comment));
            }
            DuplicateStyle::Merge => match merged.get(&unit.source_text) {
                Some(&index) => entries[index].absorb(unit),
                None => {
                    merged.insert(unit.source_text.clone(), entries.len());
                    entries.push(CatalogEntry::from_unit(unit));
                }
            },
        }
    }

    debug!(
        style = %style,
        entries = entries.len(),
        duplicated_texts = occurrences.values().filter(|&&n| n > 1).count(),
        "Reconciled duplicates"
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(uid: &str, text: &str, day: u32) -> ExtractedUnit {
        ExtractedUnit {
            location: format!("[{uid}]SUMMARY"),
            source_text: text.to_string(),
            context_comment: Some(format!("Start date: 1997-07-{day} 17:00:00+00:00")),
        }
    }

    fn duplicated_value() -> Vec<ExtractedUnit> {
        vec![
            unit("uid1@example.com", "Value", 14),
            unit("uid2@example.com", "Value", 15),
        ]
    }

    #[test]
    fn parse_styles() {
        assert_eq!("msgctxt".parse::<DuplicateStyle>(), Ok(DuplicateStyle::Msgctxt));
        assert_eq!("merge".parse::<DuplicateStyle>(), Ok(DuplicateStyle::Merge));
        assert_eq!("msgid_comment".parse::<DuplicateStyle>(), Ok(DuplicateStyle::MsgidComment));
        assert_eq!(
            "keep".parse::<DuplicateStyle>(),
            Err(UnknownDuplicateStyle("keep".to_string()))
        );
        assert_eq!(DuplicateStyle::default(), DuplicateStyle::Msgctxt);
    }

    #[test]
    fn unique_text_has_no_disambiguation() {
        for style in DuplicateStyle::ALL {
            let entries = reconcile(vec![unit("uid1", "Alone", 14)], style);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].context_key, None);
            assert_eq!(entries[0].msgid_comment, None);
            assert_eq!(entries[0].locations, ["[uid1]SUMMARY"]);
        }
    }

    #[test]
    fn msgctxt_style_keeps_every_occurrence() {
        let entries = reconcile(duplicated_value(), DuplicateStyle::Msgctxt);

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].context_key.as_deref(),
            Some("[uid1@example.com]SUMMARY")
        );
        assert_eq!(
            entries[1].context_key.as_deref(),
            Some("[uid2@example.com]SUMMARY")
        );
        assert!(entries.iter().all(|e| e.locations.len() == 1));
        assert!(entries.iter().all(|e| e.target_text.is_empty()));
    }

    #[test]
    fn merge_style_folds_group() {
        let entries = reconcile(duplicated_value(), DuplicateStyle::Merge);

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].locations,
            ["[uid1@example.com]SUMMARY", "[uid2@example.com]SUMMARY"]
        );
        assert_eq!(
            entries[0].comments,
            [
                "Start date: 1997-07-14 17:00:00+00:00",
                "Start date: 1997-07-15 17:00:00+00:00",
            ]
        );
        assert_eq!(entries[0].context_key, None);
    }

    #[test]
    fn msgid_comment_style() {
        let entries = reconcile(duplicated_value(), DuplicateStyle::MsgidComment);

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].msgid_comment.as_deref(),
            Some("[uid2@example.com]SUMMARY")
        );
        assert_eq!(entries[1].context_key, None);
    }

    #[test]
    fn first_seen_order_for_every_style() {
        let units = vec![
            unit("a", "x", 1),
            unit("b", "y", 2),
            unit("c", "x", 3),
            unit("d", "z", 4),
        ];

        let sources = |entries: Vec<CatalogEntry>| -> Vec<String> {
            entries.into_iter().map(|e| e.source_text).collect()
        };

        assert_eq!(
            sources(reconcile(units.clone(), DuplicateStyle::Msgctxt)),
            ["x", "y", "x", "z"]
        );
        assert_eq!(
            sources(reconcile(units.clone(), DuplicateStyle::MsgidComment)),
            ["x", "y", "x", "z"]
        );
        assert_eq!(
            sources(reconcile(units, DuplicateStyle::Merge)),
            ["x", "y", "z"]
        );
    }

    #[test]
    fn repeated_location_last_write_wins() {
        let units = vec![
            unit("a", "Old title", 1),
            unit("b", "Other", 2),
            unit("a", "New title", 3),
        ];

        let entries = reconcile(units, DuplicateStyle::Msgctxt);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_text, "New title");
        assert_eq!(entries[0].locations, ["[a]SUMMARY"]);
        assert_eq!(entries[1].source_text, "Other");
    }
}
