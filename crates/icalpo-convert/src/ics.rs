//! ICS/iCalendar reading.
//!
//! This module parses iCalendar (RFC 5545) data with the `icalendar` crate and
//! converts its events to a [`CalendarDocument`].

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component as _, DatePerhapsTime, Event,
};
use icalpo_core::{CalendarDocument, Component, StartTime, TranslatableField};
use tracing::{debug, warn};

use crate::error::{ConvertError, ConvertResult};

/// Returns true if `text` starts like an iCalendar stream.
pub fn looks_like_calendar(text: &str) -> bool {
    text.trim_start()
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
}

/// Returns true if any line opens a component.
fn has_calendar_structure(text: &str) -> bool {
    text.lines().any(|line| {
        line.trim_start()
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:"))
    })
}

/// Parses ICS content into a calendar document.
///
/// Only VEVENT components are kept, in document order.
///
/// # Errors
///
/// [`ConvertError::EmptyInput`] when the text holds no component at all,
/// [`ConvertError::CalendarParse`] when the grammar rejects it.
pub fn parse_calendar(ics: &str) -> ConvertResult<CalendarDocument> {
    if !has_calendar_structure(ics) {
        return Err(ConvertError::EmptyInput);
    }

    let calendar = ics
        .trim()
        .parse::<Calendar>()
        .map_err(|e| ConvertError::CalendarParse {
            message: e.to_string(),
        })?;

    let components: Vec<Component> = calendar
        .components
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(parse_event(event)),
            _ => None,
        })
        .collect();

    debug!(events = components.len(), "Parsed calendar");
    Ok(CalendarDocument::new(components))
}

/// Converts a single VEVENT into a Component.
fn parse_event(event: &Event) -> Component {
    let mut component = Component::new();

    if let Some(uid) = event.get_uid() {
        component = component.with_uid(uid);
    }

    let start = event.get_start().map(convert_date_time).or_else(|| {
        event
            .property_value("DTSTART")
            .and_then(parse_icalendar_datetime)
    });
    match start {
        Some(start) => component = component.with_start(start),
        None if event.property_value("DTSTART").is_some() => {
            warn!(uid = ?component.uid, "Unrecognized DTSTART value");
        }
        None => {}
    }

    for field in TranslatableField::ALL {
        if let Some(value) = property_text(event, field) {
            component = component.with_field(field, value);
        }
    }

    debug!(
        uid = ?component.uid,
        start = ?component.start,
        fields = component.fields.len(),
        "Parsed event from ICS"
    );

    component
}

/// Returns the text of a field.
///
/// Properties that may repeat (COMMENT) are kept apart by the parser; the
/// first occurrence is used.
fn property_text(event: &Event, field: TranslatableField) -> Option<&str> {
    let name = field.property_name();
    event.property_value(name).or_else(|| {
        event
            .multi_properties()
            .get(name)
            .and_then(|values| values.first())
            .map(|property| property.value())
    })
}

/// Converts icalendar DatePerhapsTime to StartTime.
fn convert_date_time(dt: DatePerhapsTime) -> StartTime {
    match dt {
        DatePerhapsTime::Date(date) => StartTime::from_date(date),
        DatePerhapsTime::DateTime(cdt) => {
            let utc_dt = match cdt {
                CalendarDateTime::Utc(dt) => dt,
                CalendarDateTime::Floating(naive) => Utc.from_utc_datetime(&naive),
                // Zone definitions are not resolved; the wall time is taken as UTC.
                CalendarDateTime::WithTimezone { date_time, tzid: _ } => {
                    Utc.from_utc_datetime(&date_time)
                }
            };
            StartTime::from_datetime(utc_dt)
        }
    }
}

/// Parses a raw iCalendar datetime value.
///
/// Handles formats like:
/// - 20250205T100000Z (UTC)
/// - 20250205T100000 (floating, taken as UTC)
/// - 20250205 (date only)
pub fn parse_icalendar_datetime(s: &str) -> Option<StartTime> {
    let s = s.trim();

    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        let date = NaiveDate::parse_from_str(s, "%Y%m%d").ok()?;
        return Some(StartTime::from_date(date));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    let dt = NaiveDateTime::parse_from_str(naive, "%Y%m%dT%H%M%S").ok()?;
    Some(StartTime::from_datetime(Utc.from_utc_datetime(&dt)))
}
