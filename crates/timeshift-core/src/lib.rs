//! # timeshift-core
//!
//! Calendar arithmetic for iCalendar (RFC 5545) DATE-TIME values.
//!
//! This library models a single immutable timestamp, [`TimestampValue`], and an
//! [`Engine`] that derives new timestamps from it: relative advances, field
//! overrides and period-boundary queries, with explicit month-overflow,
//! leap-year and ISO week/year semantics.
//!
//! ## Features
//!
//! - **Month clamping**: advancing Jan 31 by one month lands on the last day of
//!   February, never in March.
//! - **Cascading resets**: overriding the hour resets minutes and seconds
//!   unless they are given too.
//! - **Week starts**: week and ISO-year queries take any weekday as `WKST`.
//! - **Calendar reform**: dates before the Gregorian reform are Julian-calendar
//!   dates; the reform day is configurable via [`CalendarStart`].
//! - **IANA Timezones**: `TZID` offsets resolved through chrono-tz.
//!
//! ## Example
//!
//! ```rust
//! use timeshift_core::prelude::*;
//!
//! let engine = Engine::default();
//! let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
//!
//! let end = engine.end_of_month(&source).unwrap();
//! assert_eq!(end.to_string(), "2024-01-31T23:59:59+00:00");
//!
//! let feb = engine.in_month(&source, 2).unwrap();
//! assert_eq!(feb.to_string(), "2024-02-29T10:15:45+00:00");
//! ```

pub mod calendar;
pub mod error;
pub mod machine;
pub mod tz;
pub mod value;

// Re-export commonly used types at the crate root
pub use calendar::{CalendarStart, CalendarUtility, CivilDate, CivilDateTime, ReformCalendar};
pub use error::{Result, TimeshiftError};
pub use machine::{AdvanceRequest, Boundary, ChangeRequest, Engine};
pub use tz::{ChronoTzResolver, TimezoneResolver};
pub use value::{Params, TimestampValue};

/// Prelude module for convenient imports.
///
/// ```
/// use timeshift_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::calendar::{CalendarStart, CalendarUtility, CivilDate, ReformCalendar};
    pub use crate::error::{Result, TimeshiftError};
    pub use crate::machine::{AdvanceRequest, Boundary, ChangeRequest, Engine};
    pub use crate::tz::{ChronoTzResolver, TimezoneResolver, parse_tz};
    pub use crate::value::TimestampValue;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn end_to_end_example() {
        let engine = Engine::default();
        let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();

        let advanced = engine
            .advance(&source, &AdvanceRequest::new().months(1))
            .unwrap();
        assert_eq!(advanced.to_string(), "2024-02-29T10:15:45+00:00");

        let end = engine.end_of_month(&source).unwrap();
        assert_eq!(end.to_string(), "2024-01-31T23:59:59+00:00");

        let midnight = engine
            .change(&source, &ChangeRequest::new().hour(0))
            .unwrap();
        assert_eq!(midnight.to_string(), "2024-01-31T00:00:00+00:00");

        // The source is untouched.
        assert_eq!(source.to_string(), "2024-01-31T10:15:45+00:00");
    }

    #[test]
    fn zoned_workflow_keeps_resolver_and_tzid() {
        let resolver: Arc<dyn TimezoneResolver> = Arc::new(ChronoTzResolver);
        let source = TimestampValue::zoned(
            resolver,
            "Europe/Berlin",
            2026,
            3,
            28,
            12,
            0,
            0,
            CalendarStart::ITALY,
        )
        .unwrap();
        assert_eq!(source.utc_offset().local_minus_utc(), 3600);

        // The engine keeps the stored offset; the resolver reports the zone's.
        let next_day = Engine::default()
            .advance(&source, &AdvanceRequest::new().days(1))
            .unwrap();
        assert_eq!(next_day.tzid(), Some("Europe/Berlin"));
        assert_eq!(next_day.utc_offset().local_minus_utc(), 3600);
        assert_eq!(
            next_day.resolved_offset().unwrap().map(|o| o.local_minus_utc()),
            Some(7200)
        );
    }

    #[test]
    fn prelude_exports() {
        use crate::prelude::*;

        let _tz = parse_tz("UTC").unwrap();
        let _engine: Engine = Engine::new(ReformCalendar);
        let _start = CalendarStart::default();
    }
}
