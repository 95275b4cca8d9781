//! Translation merge.
//!
//! After reconciliation every catalog entry is untranslated. [`merge_translations`]
//! fills entries from a [`TranslationSource`]:
//!
//! - [`LocationIndex`]: a translated calendar, matched by `[UID]FIELD` location
//! - [`TemplateCatalog`]: a previously translated PO catalog, matched by source
//!   text and context
//!
//! Candidates are looked up once per location of an entry. The first
//! non-empty candidate wins; when candidates disagree (a `merge`-style entry
//! grouping occurrences that were translated differently) the entry is marked
//! fuzzy so a reviewer picks the right one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogEntry;
use crate::extract::ExtractedUnit;

/// A translation found for one occurrence of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorTranslation<'a> {
    pub text: &'a str,
    pub fuzzy: bool,
}

/// Anything translations can be carried forward from.
pub trait TranslationSource {
    /// Returns the prior translation of `entry` at `location`, if any.
    fn lookup(&self, entry: &CatalogEntry, location: &str) -> Option<PriorTranslation<'_>>;
}

/// Translations taken from a translated calendar, keyed by location.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    translations: HashMap<String, String>,
}

impl LocationIndex {
    /// Indexes the units of a translated calendar.
    ///
    /// When a location repeats, the last unit wins.
    pub fn from_units(units: impl IntoIterator<Item = ExtractedUnit>) -> Self {
        let translations = units
            .into_iter()
            .map(|unit| (unit.location, unit.source_text))
            .collect();
        Self { translations }
    }

    /// Returns the number of indexed locations.
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl TranslationSource for LocationIndex {
    fn lookup(&self, _entry: &CatalogEntry, location: &str) -> Option<PriorTranslation<'_>> {
        self.translations.get(location).map(|text| PriorTranslation {
            text,
            fuzzy: false,
        })
    }
}

/// An entry read from a previously translated catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub source_text: String,
    pub target_text: String,
    pub locations: Vec<String>,
    pub context_key: Option<String>,
    pub msgid_comment: Option<String>,
    pub is_fuzzy: bool,
}

impl TemplateEntry {
    /// Creates a context-free template entry.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_text: source.into(),
            target_text: target.into(),
            ..Self::default()
        }
    }

    /// Sets the context key.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_key = Some(context.into());
        self
    }

    /// Adds a location reference.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Marks the entry fuzzy.
    pub fn fuzzy(mut self) -> Self {
        self.is_fuzzy = true;
        self
    }

    /// Returns whichever disambiguator the entry carries.
    pub fn disambiguator(&self) -> Option<&str> {
        self.context_key.as_deref().or(self.msgid_comment.as_deref())
    }

    fn prior(&self) -> PriorTranslation<'_> {
        PriorTranslation {
            text: &self.target_text,
            fuzzy: self.is_fuzzy,
        }
    }
}

/// A previously translated catalog used as a merge template.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: Vec<TemplateEntry>,
    by_source: HashMap<String, Vec<usize>>,
}

impl TemplateCatalog {
    /// Indexes template entries by source text.
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        let mut by_source: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            by_source
                .entry(entry.source_text.clone())
                .or_default()
                .push(index);
        }
        Self { entries, by_source }
    }

    /// Returns the template entries in file order.
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the template has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationSource for TemplateCatalog {
    fn lookup(&self, entry: &CatalogEntry, location: &str) -> Option<PriorTranslation<'_>> {
        let candidates: Vec<&TemplateEntry> = self
            .by_source
            .get(&entry.source_text)?
            .iter()
            .map(|&index| &self.entries[index])
            .collect();

        // A disambiguated template entry only ever matches its own location.
        if let Some(exact) = candidates
            .iter()
            .copied()
            .find(|candidate| candidate.disambiguator() == Some(location))
        {
            return Some(exact.prior());
        }

        let mut context_free = candidates
            .iter()
            .copied()
            .filter(|candidate| candidate.disambiguator().is_none());
        context_free
            .clone()
            .find(|candidate| candidate.locations.iter().any(|l| l == location))
            .or_else(|| context_free.next())
            .map(|candidate| candidate.prior())
    }
}

/// Options controlling [`merge_translations`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Leave every translation empty, producing a template (POT).
    pub blank_msgstr: bool,
}

/// What a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entries that received a translation.
    pub translated: usize,
    /// Translated entries marked fuzzy.
    pub fuzzy: usize,
    /// Entries left without translation.
    pub untranslated: usize,
}

/// Carries translations from `source` into `entries`.
///
/// A missing source, or `blank_msgstr`, leaves every entry untouched.
pub fn merge_translations(
    entries: &mut [CatalogEntry],
    source: Option<&dyn TranslationSource>,
    options: MergeOptions,
) -> MergeStats {
    let mut stats = MergeStats::default();

    let Some(source) = source.filter(|_| !options.blank_msgstr) else {
        stats.untranslated = entries.len();
        return stats;
    };

    for entry in entries.iter_mut() {
        let mut chosen: Option<PriorTranslation<'_>> = None;
        let mut conflict = false;

        for location in &entry.locations {
            let Some(prior) = source.lookup(entry, location) else {
                continue;
            };
            if prior.text.is_empty() {
                continue;
            }
            match chosen {
                None => chosen = Some(prior),
                Some(first) if first.text != prior.text => conflict = true,
                Some(_) => {}
            }
        }

        match chosen {
            Some(first) => {
                entry.target_text = first.text.to_string();
                entry.is_fuzzy = conflict || first.fuzzy;
                stats.translated += 1;
                if entry.is_fuzzy {
                    stats.fuzzy += 1;
                }
            }
            None => stats.untranslated += 1,
        }
    }

    debug!(
        translated = stats.translated,
        fuzzy = stats.fuzzy,
        untranslated = stats.untranslated,
        "Merged translations"
    );
    stats
}
