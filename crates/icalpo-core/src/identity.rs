//! Stable identities for extracted units.
//!
//! A unit's location is `[UID]FIELD`. It depends only on the component UID and
//! the property name, so unchanged calendars always yield the same locations
//! regardless of event order.

use crate::calendar::StartTime;
use crate::field::TranslatableField;

/// Builds the location key of `field` on the component identified by `uid`.
///
/// A missing UID renders as `[]FIELD`.
pub fn unit_location(uid: Option<&str>, field: TranslatableField) -> String {
    format!("[{}]{}", uid.unwrap_or_default(), field.property_name())
}

/// Builds the extracted comment describing when a component starts.
pub fn start_comment(start: &StartTime) -> String {
    format!("Start date: {}", start.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn location_uses_uid_and_property_name() {
        assert_eq!(
            unit_location(Some("uid1@example.com"), TranslatableField::Summary),
            "[uid1@example.com]SUMMARY"
        );
        assert_eq!(
            unit_location(Some("uid1@example.com"), TranslatableField::Comment),
            "[uid1@example.com]COMMENT"
        );
    }

    #[test]
    fn location_without_uid() {
        assert_eq!(
            unit_location(None, TranslatableField::Description),
            "[]DESCRIPTION"
        );
    }

    #[test]
    fn start_comment_format() {
        let start = StartTime::from_datetime(Utc.with_ymd_and_hms(1997, 7, 15, 17, 0, 0).unwrap());
        assert_eq!(start_comment(&start), "Start date: 1997-07-15 17:00:00+00:00");
    }
}
