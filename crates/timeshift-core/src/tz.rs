//! Timezone resolution.
//!
//! A [`TimestampValue`](crate::TimestampValue) carries an opaque
//! [`TimezoneResolver`] handle alongside its `TZID`. The arithmetic engine never
//! consults it; it is only used when a value is built from a local time in a
//! named zone, or when the caller asks for the zone's offset explicitly.

use std::fmt::Debug;

use chrono::{Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::{Result, TimeshiftError};

/// Maps a timezone identifier to the UTC offset in force at a local time.
pub trait TimezoneResolver: Debug + Send + Sync {
    fn offset_at(&self, tzid: &str, local: NaiveDateTime) -> Result<FixedOffset>;
}

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use timeshift_core::tz::parse_tz;
///
/// let tz = parse_tz("Europe/Berlin").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Berlin");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TimeshiftError::InvalidTimezone(name.to_string()))
}

/// Resolves IANA identifiers through the chrono-tz database.
///
/// Ambiguous local times (DST fall back) use the earlier occurrence.
/// Nonexistent local times (DST spring forward) use the offset in force
/// before the transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzResolver;

impl TimezoneResolver for ChronoTzResolver {
    fn offset_at(&self, tzid: &str, local: NaiveDateTime) -> Result<FixedOffset> {
        let tz = parse_tz(tzid)?;

        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.offset().fix()),
            LocalResult::Ambiguous(earlier, _) => Ok(earlier.offset().fix()),
            LocalResult::None => {
                // Read as UTC shifted by the later offset, the local time
                // lands before the transition instant.
                let after = tz.offset_from_utc_datetime(&(local + Duration::days(1))).fix();
                let probe = local - Duration::seconds(i64::from(after.local_minus_utc()));
                Ok(tz.offset_from_utc_datetime(&probe).fix())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parse_valid_timezone() {
        let tz = parse_tz("Europe/Berlin").unwrap();
        assert_eq!(tz.to_string(), "Europe/Berlin");
    }

    #[test]
    fn parse_invalid_timezone() {
        let result = parse_tz("Invalid/Timezone");
        assert_eq!(
            result.unwrap_err(),
            TimeshiftError::InvalidTimezone("Invalid/Timezone".to_string())
        );
    }

    #[test]
    fn resolves_standard_and_daylight_offsets() {
        let resolver = ChronoTzResolver;
        let winter = resolver
            .offset_at("Europe/Berlin", local(2026, 1, 15, 12, 0))
            .unwrap();
        let summer = resolver
            .offset_at("Europe/Berlin", local(2026, 7, 15, 12, 0))
            .unwrap();
        assert_eq!(winter.local_minus_utc(), 3600);
        assert_eq!(summer.local_minus_utc(), 7200);
    }

    #[test]
    fn ambiguous_time_uses_earlier_offset() {
        // 02:30 occurs twice in Berlin on 2026-10-25.
        let offset = ChronoTzResolver
            .offset_at("Europe/Berlin", local(2026, 10, 25, 2, 30))
            .unwrap();
        assert_eq!(offset.local_minus_utc(), 7200);
    }

    #[test]
    fn nonexistent_time_uses_offset_before_gap() {
        // 02:30 is skipped in Berlin on 2026-03-29.
        let offset = ChronoTzResolver
            .offset_at("Europe/Berlin", local(2026, 3, 29, 2, 30))
            .unwrap();
        assert_eq!(offset.local_minus_utc(), 3600);
    }

    #[test]
    fn unknown_timezone_is_passed_through() {
        let err = ChronoTzResolver
            .offset_at("Mars/Olympus", local(2026, 1, 1, 0, 0))
            .unwrap_err();
        assert_eq!(err, TimeshiftError::InvalidTimezone("Mars/Olympus".to_string()));
    }
}
