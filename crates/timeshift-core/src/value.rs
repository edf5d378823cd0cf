//! The DATE-TIME value type.
//!
//! [`TimestampValue`] is an immutable civil timestamp with its UTC offset,
//! calendar reform marker, optional `TZID` and property parameters. Every
//! operation in [`crate::machine`] returns a new value; none mutate the source.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc, Weekday};
use serde::{Serialize, Serializer};

use crate::calendar::{
    CE_TO_JD, CalendarStart, CalendarUtility, CivilDate, CivilDateTime, ReformCalendar,
    weekday_of_julian_day,
};
use crate::error::{Result, TimeshiftError};
use crate::tz::TimezoneResolver;

/// Property parameters attached to a value (e.g. `VALUE=DATE-TIME`).
pub type Params = BTreeMap<String, String>;

/// An immutable RFC 5545 DATE-TIME value.
///
/// Equality compares the date/time fields, offset, calendar start, `TZID` and
/// parameters. The resolver handle is not part of a value's identity.
#[derive(Debug, Clone)]
pub struct TimestampValue {
    civil: CivilDateTime,
    tzid: Option<String>,
    params: Params,
    resolver: Option<Arc<dyn TimezoneResolver>>,
}

impl TimestampValue {
    /// Build a value from civil fields using the [`ReformCalendar`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCalendarDate`](TimeshiftError::InvalidCalendarDate)
    /// if the fields do not denote a real date/time under `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::FixedOffset;
    /// use timeshift_core::{CalendarStart, TimestampValue};
    ///
    /// let offset = FixedOffset::east_opt(0).unwrap();
    /// let value = TimestampValue::civil(2024, 1, 31, 10, 15, 45, offset, CalendarStart::ITALY)
    ///     .unwrap();
    /// assert_eq!(value.to_string(), "2024-01-31T10:15:45+00:00");
    ///
    /// assert!(TimestampValue::civil(2024, 2, 30, 0, 0, 0, offset, CalendarStart::ITALY).is_err());
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn civil(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset: FixedOffset,
        start: CalendarStart,
    ) -> Result<Self> {
        ReformCalendar
            .civil(year, month, day, hour, minute, second, offset, start)
            .map(Self::from_civil)
    }

    /// A value at UTC offset zero under the default calendar start.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self::civil(
            year,
            month,
            day,
            hour,
            minute,
            second,
            Utc.fix(),
            CalendarStart::default(),
        )
    }

    /// A local time in the zone `tzid`, with the offset supplied by `resolver`.
    ///
    /// The resolver is kept with the value and shared by everything derived
    /// from it.
    #[allow(clippy::too_many_arguments)]
    pub fn zoned(
        resolver: Arc<dyn TimezoneResolver>,
        tzid: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        start: CalendarStart,
    ) -> Result<Self> {
        let tzid = tzid.into();
        let floating = Self::civil(year, month, day, hour, minute, second, Utc.fix(), start)?;
        let local = floating.to_naive_local().ok_or_else(|| {
            TimeshiftError::InvalidCalendarDate(floating.civil_string())
        })?;
        let offset = resolver.offset_at(&tzid, local)?;

        Ok(Self::civil(year, month, day, hour, minute, second, offset, start)?
            .with_tzid(tzid)
            .with_resolver(resolver))
    }

    pub fn from_civil(civil: CivilDateTime) -> Self {
        Self {
            civil,
            tzid: None,
            params: Params::new(),
            resolver: None,
        }
    }

    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn TimezoneResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// A new value at `civil` carrying this value's `TZID`, an owned copy of
    /// its parameters and the same resolver handle.
    pub(crate) fn derive(&self, civil: CivilDateTime) -> Self {
        Self {
            civil,
            tzid: self.tzid.clone(),
            params: self.params.clone(),
            resolver: self.resolver.clone(),
        }
    }

    pub fn civil_date_time(&self) -> &CivilDateTime {
        &self.civil
    }

    pub fn date(&self) -> CivilDate {
        self.civil.date()
    }

    pub fn year(&self) -> i32 {
        self.civil.date().year
    }

    pub fn month(&self) -> u32 {
        self.civil.date().month
    }

    pub fn day(&self) -> u32 {
        self.civil.date().day
    }

    pub fn hour(&self) -> u32 {
        self.civil.hour()
    }

    pub fn minute(&self) -> u32 {
        self.civil.minute()
    }

    pub fn second(&self) -> u32 {
        self.civil.second()
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.civil.offset()
    }

    pub fn calendar_start(&self) -> CalendarStart {
        self.civil.start()
    }

    pub fn tzid(&self) -> Option<&str> {
        self.tzid.as_deref()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn resolver(&self) -> Option<&Arc<dyn TimezoneResolver>> {
        self.resolver.as_ref()
    }

    /// Julian day number of the local date.
    pub fn julian_day(&self) -> i64 {
        self.civil.julian_day()
    }

    pub fn weekday(&self) -> Weekday {
        weekday_of_julian_day(self.civil.julian_day())
    }

    /// The local date/time on chrono's proleptic Gregorian timeline.
    ///
    /// Dates before the reform are converted through their Julian day number,
    /// so a Julian-calendar date maps to the same day. Returns `None` outside
    /// chrono's supported range.
    pub fn to_naive_local(&self) -> Option<NaiveDateTime> {
        let days = i32::try_from(self.julian_day() - CE_TO_JD).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)?.and_hms_opt(
            self.hour(),
            self.minute(),
            self.second(),
        )
    }

    /// The instant this value denotes, with its UTC offset.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let local = self.to_naive_local()?;
        self.utc_offset().from_local_datetime(&local).single()
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.to_datetime().map(|dt| dt.with_timezone(&Utc))
    }

    /// Ask the carried resolver for the `TZID` offset at this local time.
    ///
    /// Returns `Ok(None)` when the value has no `TZID` or no resolver.
    pub fn resolved_offset(&self) -> Result<Option<FixedOffset>> {
        let (Some(tzid), Some(resolver)) = (self.tzid.as_deref(), self.resolver.as_ref()) else {
            return Ok(None);
        };
        let local = self.to_naive_local().ok_or_else(|| {
            TimeshiftError::InvalidCalendarDate(self.civil_string())
        })?;
        resolver.offset_at(tzid, local).map(Some)
    }

    fn civil_string(&self) -> String {
        format!(
            "{}T{:02}:{:02}:{:02}",
            self.date(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl PartialEq for TimestampValue {
    fn eq(&self, other: &Self) -> bool {
        self.civil == other.civil && self.tzid == other.tzid && self.params == other.params
    }
}

impl Eq for TimestampValue {}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.civil_string(), self.utc_offset())
    }
}

#[derive(Serialize)]
struct SerializedValue<'a> {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    utc_offset: String,
    calendar_start: CalendarStart,
    #[serde(skip_serializing_if = "Option::is_none")]
    tzid: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: &'a Params,
}

impl Serialize for TimestampValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SerializedValue {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            utc_offset: self.utc_offset().to_string(),
            calendar_start: self.calendar_start(),
            tzid: self.tzid(),
            params: &self.params,
        }
        .serialize(serializer)
    }
}
