//! Core types and engine: calendar model, extraction, duplicate
//! reconciliation and translation merge

pub mod calendar;
pub mod catalog;
pub mod extract;
pub mod field;
pub mod identity;
pub mod merge;
pub mod reconcile;
pub mod tracing;

pub use calendar::{CalendarDocument, Component, MalformedComponent, StartTime};
pub use catalog::{Catalog, CatalogEntry};
pub use extract::{ExtractedUnit, FieldExtractor};
pub use field::{TranslatableField, UnknownFieldError};
pub use identity::{start_comment, unit_location};
pub use merge::{
    LocationIndex, MergeOptions, MergeStats, PriorTranslation, TemplateCatalog, TemplateEntry,
    TranslationSource, merge_translations,
};
pub use reconcile::{DuplicateStyle, UnknownDuplicateStyle, reconcile};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
