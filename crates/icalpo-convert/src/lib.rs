//! Calendar to PO conversion.
//!
//! This crate reads iCalendar input, merges it against an optional template
//! and writes a gettext PO catalog:
//!
//! - [`ics`]: iCalendar parsing into [`icalpo_core::CalendarDocument`]
//! - [`po`]: PO template reading and catalog serialization
//! - [`driver`]: the end-to-end conversion

pub mod driver;
pub mod error;
pub mod ics;
pub mod po;

pub use driver::{ConvertOptions, Converter, TemplateFormat, convert_ical};
pub use error::{ConvertError, ConvertResult};
pub use ics::{looks_like_calendar, parse_calendar};
pub use po::{parse_template, render_catalog, write_catalog};
