//! Calendar arithmetic on [`TimestampValue`]s.
//!
//! The [`Engine`] derives new values from a source value: relative advances
//! ("add 3 months"), field overrides ("set hour to 0"), period boundaries
//! ("end of month") and wkst-relative ISO week/year queries. Every operation is
//! a pure function of its inputs; the source value is never modified.
//!
//! ## Field overrides
//!
//! [`Engine::change`] applies a sparse [`ChangeRequest`]. Overriding a coarser
//! time field resets the finer ones the caller did not specify: setting `hour`
//! alone yields minute 0 and second 0, setting `minute` alone yields second 0.
//!
//! ## Advances
//!
//! [`Engine::advance`] applies an [`AdvanceRequest`] in a fixed order: months
//! (clamping the day to the end of shorter months), then days, then the
//! original time of day is re-anchored on the new date, and finally hours,
//! minutes and seconds are added as a continuous offset.
//!
//! ## Example
//!
//! ```rust
//! use timeshift_core::prelude::*;
//!
//! let engine = Engine::default();
//! let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
//!
//! let next_month = engine.advance(&source, &AdvanceRequest::new().months(1)).unwrap();
//! assert_eq!(next_month.to_string(), "2024-02-29T10:15:45+00:00");
//!
//! let midnight = engine.change(&source, &ChangeRequest::new().hour(0)).unwrap();
//! assert_eq!(midnight.to_string(), "2024-01-31T00:00:00+00:00");
//! ```

use std::fmt;

use chrono::{FixedOffset, Weekday};
use tracing::trace;

use crate::calendar::{CalendarStart, CalendarUtility, CivilDate, ReformCalendar};
use crate::error::{Result, TimeshiftError};
use crate::value::TimestampValue;

const SECONDS_PER_DAY: i64 = 86_400;

/// A sparse set of field overrides. Unset fields keep the source's value,
/// subject to the cascading reset described in [`Engine::change`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub utc_offset: Option<FixedOffset>,
    pub calendar_start: Option<CalendarStart>,
}

impl ChangeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn second(mut self, second: u32) -> Self {
        self.second = Some(second);
        self
    }

    pub fn utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    pub fn calendar_start(mut self, start: CalendarStart) -> Self {
        self.calendar_start = Some(start);
        self
    }

    /// Override year, month and day together.
    pub fn date(self, date: CivilDate) -> Self {
        self.year(date.year).month(date.month).day(date.day)
    }

    /// Fill unset fields from `source`, then reset the time fields finer than
    /// an overridden one unless they were given too.
    fn resolve(&self, source: &TimestampValue) -> Fields {
        let mut fields = Fields {
            year: self.year.unwrap_or(source.year()),
            month: self.month.unwrap_or(source.month()),
            day: self.day.unwrap_or(source.day()),
            hour: self.hour.unwrap_or(source.hour()),
            minute: self.minute.unwrap_or(source.minute()),
            second: self.second.unwrap_or(source.second()),
            offset: self.utc_offset.unwrap_or(source.utc_offset()),
            start: self.calendar_start.unwrap_or(source.calendar_start()),
        };

        if self.hour.is_some() && self.minute.is_none() {
            fields.minute = 0;
        }
        if (self.hour.is_some() || self.minute.is_some()) && self.second.is_none() {
            fields.second = 0;
        }
        fields
    }
}

/// Signed deltas for [`Engine::advance`]. Unset fields count as zero.
///
/// Time deltas may be fractional; their sum is rounded to the nearest second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvanceRequest {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub weeks: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub seconds: Option<f64>,
}

impl AdvanceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, years: i64) -> Self {
        self.years = Some(years);
        self
    }

    pub fn months(mut self, months: i64) -> Self {
        self.months = Some(months);
        self
    }

    pub fn weeks(mut self, weeks: i64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn minutes(mut self, minutes: f64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Years and months as one month count, or `None` on overflow.
    fn month_delta(&self) -> Option<i64> {
        self.years
            .unwrap_or(0)
            .checked_mul(12)?
            .checked_add(self.months.unwrap_or(0))
    }

    /// Weeks and days as one day count, or `None` on overflow.
    fn day_delta(&self) -> Option<i64> {
        self.weeks
            .unwrap_or(0)
            .checked_mul(7)?
            .checked_add(self.days.unwrap_or(0))
    }

    /// Hours, minutes and seconds as whole seconds, or `None` when the sum is
    /// not finite or does not fit an `i64`.
    fn second_delta(&self) -> Option<i64> {
        let seconds = (self.seconds.unwrap_or(0.0)
            + self.minutes.unwrap_or(0.0) * 60.0
            + self.hours.unwrap_or(0.0) * 3600.0)
            .round();
        // `i64::MAX as f64` rounds up to 2^63.
        if seconds.is_finite() && seconds >= i64::MIN as f64 && seconds < i64::MAX as f64 {
            Some(seconds as i64)
        } else {
            None
        }
    }
}

/// The period-boundary queries, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    StartOfMinute,
    EndOfMinute,
    StartOfHour,
    EndOfHour,
    StartOfDay,
    EndOfDay,
    StartOfWeek,
    EndOfWeek,
    StartOfMonth,
    EndOfMonth,
    StartOfYear,
    EndOfYear,
    StartOfIsoYear,
    EndOfIsoYear,
}

impl Boundary {
    pub const ALL: [Boundary; 14] = [
        Boundary::StartOfMinute,
        Boundary::EndOfMinute,
        Boundary::StartOfHour,
        Boundary::EndOfHour,
        Boundary::StartOfDay,
        Boundary::EndOfDay,
        Boundary::StartOfWeek,
        Boundary::EndOfWeek,
        Boundary::StartOfMonth,
        Boundary::EndOfMonth,
        Boundary::StartOfYear,
        Boundary::EndOfYear,
        Boundary::StartOfIsoYear,
        Boundary::EndOfIsoYear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Boundary::StartOfMinute => "start-of-minute",
            Boundary::EndOfMinute => "end-of-minute",
            Boundary::StartOfHour => "start-of-hour",
            Boundary::EndOfHour => "end-of-hour",
            Boundary::StartOfDay => "start-of-day",
            Boundary::EndOfDay => "end-of-day",
            Boundary::StartOfWeek => "start-of-week",
            Boundary::EndOfWeek => "end-of-week",
            Boundary::StartOfMonth => "start-of-month",
            Boundary::EndOfMonth => "end-of-month",
            Boundary::StartOfYear => "start-of-year",
            Boundary::EndOfYear => "end-of-year",
            Boundary::StartOfIsoYear => "start-of-iso-year",
            Boundary::EndOfIsoYear => "end-of-iso-year",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The eight primitive fields a value is rebuilt from.
#[derive(Debug, Clone, Copy)]
struct Fields {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    offset: FixedOffset,
    start: CalendarStart,
}

impl Fields {
    fn of(value: &TimestampValue) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
            second: value.second(),
            offset: value.utc_offset(),
            start: value.calendar_start(),
        }
    }
}

/// The calendar arithmetic engine.
///
/// Generic over the [`CalendarUtility`] used for month/day shifting, day
/// counts and ISO week math. `Engine::default()` uses [`ReformCalendar`].
#[derive(Debug, Clone, Copy)]
pub struct Engine<C = ReformCalendar> {
    calendar: C,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ReformCalendar)
    }
}

impl<C: CalendarUtility> Engine<C> {
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Build a value from `fields`, carrying `source`'s `TZID`, parameters and
    /// resolver.
    fn rebuild(&self, source: &TimestampValue, fields: Fields) -> Result<TimestampValue> {
        let civil = self.calendar.civil(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.offset,
            fields.start,
        )?;
        Ok(source.derive(civil))
    }

    /// Apply sparse field overrides.
    ///
    /// Fields not in `request` keep the source's value, except that
    /// overriding `hour` without `minute` resets the minute to 0, and
    /// overriding `hour` or `minute` without `second` resets the second to 0.
    ///
    /// # Errors
    ///
    /// [`TimeshiftError::InvalidCalendarDate`] if the resulting fields are not
    /// a real date/time, e.g. day 31 in April.
    pub fn change(&self, source: &TimestampValue, request: &ChangeRequest) -> Result<TimestampValue> {
        trace!(%source, ?request, "change");
        self.rebuild(source, request.resolve(source))
    }

    /// Shift by signed calendar and clock deltas.
    ///
    /// Months (including years) are applied first and clamp the day to the
    /// last day of a shorter month. Days (including weeks) follow. The
    /// source's time of day is then placed on the shifted date, and finally
    /// hours, minutes and seconds are added as one continuous offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeshift_core::prelude::*;
    ///
    /// let engine = Engine::default();
    /// let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
    /// let request = AdvanceRequest::new().months(1).days(1).hours(14.0);
    /// let shifted = engine.advance(&source, &request).unwrap();
    /// assert_eq!(shifted.to_string(), "2024-03-02T00:15:45+00:00");
    /// ```
    pub fn advance(&self, source: &TimestampValue, request: &AdvanceRequest) -> Result<TimestampValue> {
        trace!(%source, ?request, "advance");
        let out_of_range = || TimeshiftError::InvalidCalendarDate(source.to_string());
        let start = source.calendar_start();
        let mut date = source.date();

        let months = request.month_delta().ok_or_else(out_of_range)?;
        let days = request.day_delta().ok_or_else(out_of_range)?;
        let seconds = request.second_delta().ok_or_else(out_of_range)?;

        if months != 0 {
            date = self.calendar.shift_months(date, months, start)?;
        }
        if days != 0 {
            date = self.calendar.shift_days(date, days, start)?;
        }

        let mut fields = Fields::of(source);
        fields.year = date.year;
        fields.month = date.month;
        fields.day = date.day;
        let advanced_by_date = self.rebuild(source, fields)?;

        match seconds {
            0 => Ok(advanced_by_date),
            seconds => self.add_seconds(&advanced_by_date, seconds),
        }
    }

    /// Move along the local timeline by `seconds`, keeping the offset.
    fn add_seconds(&self, source: &TimestampValue, seconds: i64) -> Result<TimestampValue> {
        let out_of_range = || TimeshiftError::InvalidCalendarDate(source.to_string());
        let start = source.calendar_start();
        let total = source
            .julian_day()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|t| t.checked_add(source.civil_date_time().seconds_of_day()))
            .and_then(|t| t.checked_add(seconds))
            .ok_or_else(out_of_range)?;

        let date = self
            .calendar
            .civil_from_julian_day(total.div_euclid(SECONDS_PER_DAY), start)
            .ok_or_else(out_of_range)?;
        let seconds_of_day = total.rem_euclid(SECONDS_PER_DAY);

        let mut fields = Fields::of(source);
        fields.year = date.year;
        fields.month = date.month;
        fields.day = date.day;
        fields.hour = (seconds_of_day / 3600) as u32;
        fields.minute = (seconds_of_day % 3600 / 60) as u32;
        fields.second = (seconds_of_day % 60) as u32;
        self.rebuild(source, fields)
    }

    /// Replace one primitive field, copying the other seven verbatim.
    fn replace(&self, source: &TimestampValue, edit: impl FnOnce(&mut Fields)) -> Result<TimestampValue> {
        let mut fields = Fields::of(source);
        edit(&mut fields);
        self.rebuild(source, fields)
    }

    /// Replace the second only. Unlike [`Engine::change`], none of the
    /// single-field `change_*` methods reset finer fields.
    pub fn change_second(&self, source: &TimestampValue, second: u32) -> Result<TimestampValue> {
        self.replace(source, |f| f.second = second)
    }

    pub fn change_minute(&self, source: &TimestampValue, minute: u32) -> Result<TimestampValue> {
        self.replace(source, |f| f.minute = minute)
    }

    /// Replace the hour, keeping minute and second.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeshift_core::prelude::*;
    ///
    /// let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
    /// let result = Engine::default().change_hour(&source, 5).unwrap();
    /// assert_eq!(result.to_string(), "2024-01-31T05:15:45+00:00");
    /// ```
    pub fn change_hour(&self, source: &TimestampValue, hour: u32) -> Result<TimestampValue> {
        self.replace(source, |f| f.hour = hour)
    }

    /// Replace the day of the month. Fails if the day does not exist in the
    /// source's month; there is no clamping.
    pub fn change_day(&self, source: &TimestampValue, day: u32) -> Result<TimestampValue> {
        self.replace(source, |f| f.day = day)
    }

    pub fn change_month(&self, source: &TimestampValue, month: u32) -> Result<TimestampValue> {
        self.replace(source, |f| f.month = month)
    }

    pub fn change_year(&self, source: &TimestampValue, year: i32) -> Result<TimestampValue> {
        self.replace(source, |f| f.year = year)
    }

    /// Second 0 of the source's minute.
    pub fn start_of_minute(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().second(0))
    }

    /// Second 59 of the source's minute. Leap seconds are never produced.
    pub fn end_of_minute(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().second(59))
    }

    /// 00:00 into the source's hour.
    pub fn start_of_hour(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().minute(0).second(0))
    }

    /// 59:59 into the source's hour.
    pub fn end_of_hour(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().minute(59).second(59))
    }

    /// Midnight at the start of the source's date, at the source's offset.
    pub fn start_of_day(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().hour(0).minute(0).second(0))
    }

    /// 23:59:59 on the source's date.
    pub fn end_of_day(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(source, &ChangeRequest::new().hour(23).minute(59).second(59))
    }

    /// Midnight on the first day of the source's month.
    pub fn start_of_month(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(
            source,
            &ChangeRequest::new().day(1).hour(0).minute(0).second(0),
        )
    }

    /// 23:59:59 on the last day of the source's month.
    ///
    /// The last day follows the source's calendar: February 1500 ends on the
    /// 29th under the Julian rules that apply before the Italian reform.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeshift_core::prelude::*;
    ///
    /// let source = TimestampValue::utc(2024, 2, 10, 8, 0, 0).unwrap();
    /// let result = Engine::default().end_of_month(&source).unwrap();
    /// assert_eq!(result.to_string(), "2024-02-29T23:59:59+00:00");
    /// ```
    pub fn end_of_month(&self, source: &TimestampValue) -> Result<TimestampValue> {
        let last_day = self.days_in_month(source);
        self.change(
            source,
            &ChangeRequest::new().day(last_day).hour(23).minute(59).second(59),
        )
    }

    /// Midnight on January 1 of the source's year.
    pub fn start_of_year(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(
            source,
            &ChangeRequest::new().month(1).day(1).hour(0).minute(0).second(0),
        )
    }

    /// 23:59:59 on December 31 of the source's year.
    pub fn end_of_year(&self, source: &TimestampValue) -> Result<TimestampValue> {
        self.change(
            source,
            &ChangeRequest::new().month(12).day(31).hour(23).minute(59).second(59),
        )
    }

    /// Last valid day of the source's month.
    pub fn days_in_month(&self, source: &TimestampValue) -> u32 {
        self.calendar
            .days_in_month(source.year(), source.month(), source.calendar_start())
    }

    /// The date of `wkst` on or before the source date.
    pub fn start_of_week_date(&self, source: &TimestampValue, wkst: Weekday) -> Result<CivilDate> {
        self.calendar
            .start_of_week(source.date(), wkst, source.calendar_start())
    }

    /// The source's time of day on the first day of its week.
    pub fn start_of_week(&self, source: &TimestampValue, wkst: Weekday) -> Result<TimestampValue> {
        let date = self.start_of_week_date(source, wkst)?;
        self.change(source, &ChangeRequest::new().date(date))
    }

    /// The last second of the week containing the source.
    ///
    /// # Arguments
    ///
    /// * `source` - The value whose week is used
    /// * `wkst` - The first day of the week
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Weekday;
    /// use timeshift_core::prelude::*;
    ///
    /// // A Wednesday.
    /// let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
    /// let engine = Engine::default();
    ///
    /// let monday_weeks = engine.end_of_week(&source, Weekday::Mon).unwrap();
    /// assert_eq!(monday_weeks.to_string(), "2024-02-04T23:59:59+00:00");
    ///
    /// let sunday_weeks = engine.end_of_week(&source, Weekday::Sun).unwrap();
    /// assert_eq!(sunday_weeks.to_string(), "2024-02-03T23:59:59+00:00");
    /// ```
    pub fn end_of_week(&self, source: &TimestampValue, wkst: Weekday) -> Result<TimestampValue> {
        let week_start = self.start_of_week(source, wkst)?;
        let last_day = self.advance(&week_start, &AdvanceRequest::new().days(6))?;
        self.end_of_day(&last_day)
    }

    /// Whether the source date lies within the seven days starting at `date`.
    pub fn in_week_starting(&self, source: &TimestampValue, date: CivilDate) -> Result<bool> {
        let week_start = self.calendar.julian_day(date, source.calendar_start())?;
        Ok((week_start..=week_start + 6).contains(&source.julian_day()))
    }

    /// The source's time of day on the first day of its ISO year.
    pub fn at_start_of_iso_year(&self, source: &TimestampValue, wkst: Weekday) -> Result<TimestampValue> {
        let date = self
            .calendar
            .iso_year_start(source.date(), wkst, source.calendar_start())?;
        self.change(source, &ChangeRequest::new().date(date))
    }

    /// The source's time of day on the last day of its ISO year.
    pub fn at_end_of_iso_year(&self, source: &TimestampValue, wkst: Weekday) -> Result<TimestampValue> {
        let weeks = self.iso_weeks_in_year(source, wkst)?;
        let year_start = self.at_start_of_iso_year(source, wkst)?;
        self.advance(
            &year_start,
            &AdvanceRequest::new().weeks(i64::from(weeks) - 1).days(6),
        )
    }

    /// The source's time of day on the first day of the following ISO year.
    pub fn at_start_of_next_iso_year(
        &self,
        source: &TimestampValue,
        wkst: Weekday,
    ) -> Result<TimestampValue> {
        let weeks = self.iso_weeks_in_year(source, wkst)?;
        let year_start = self.at_start_of_iso_year(source, wkst)?;
        self.advance(&year_start, &AdvanceRequest::new().weeks(i64::from(weeks)))
    }

    /// The last second of the ISO year containing the source.
    pub fn end_of_iso_year(&self, source: &TimestampValue, wkst: Weekday) -> Result<TimestampValue> {
        let last_day = self.at_end_of_iso_year(source, wkst)?;
        self.end_of_day(&last_day)
    }

    pub fn iso_weeks_in_year(&self, source: &TimestampValue, wkst: Weekday) -> Result<u32> {
        self.calendar
            .iso_weeks_in_year(source.date(), wkst, source.calendar_start())
    }

    pub fn iso_week_number(&self, source: &TimestampValue, wkst: Weekday) -> Result<u32> {
        self.calendar
            .iso_week_number(source.date(), wkst, source.calendar_start())
    }

    pub fn iso_year(&self, source: &TimestampValue, wkst: Weekday) -> Result<i32> {
        self.calendar
            .iso_year_and_week_one_start(source.date(), wkst, source.calendar_start())
            .map(|(year, _)| year)
    }

    /// The same day of the month in `month` of the source's year, clamped to
    /// the last day of `month`. The time of day is kept.
    ///
    /// # Errors
    ///
    /// [`TimeshiftError::InvalidCalendarDate`] if `month` is not 1 to 12.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeshift_core::prelude::*;
    ///
    /// let engine = Engine::default();
    /// let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
    ///
    /// let february = engine.in_month(&source, 2).unwrap();
    /// assert_eq!(february.to_string(), "2024-02-29T10:15:45+00:00");
    ///
    /// let july = engine.in_month(&source, 7).unwrap();
    /// assert_eq!(july.to_string(), "2024-07-31T10:15:45+00:00");
    /// ```
    pub fn in_month(&self, source: &TimestampValue, month: u32) -> Result<TimestampValue> {
        let first = self.change(source, &ChangeRequest::new().day(1).month(month))?;
        let day = self.days_in_month(&first).min(source.day());
        self.change(&first, &ChangeRequest::new().day(day))
    }

    /// Dispatch a named period-boundary query. `wkst` is used by the week
    /// and ISO-year boundaries only.
    ///
    /// Every boundary is a full instant: the `start-*` names land on
    /// 00:00:00 and the `end-*` names on 23:59:59 (or the end of the minute
    /// or hour). This includes [`Boundary::StartOfWeek`] and
    /// [`Boundary::StartOfIsoYear`], which therefore differ from
    /// [`Engine::start_of_week`] and [`Engine::at_start_of_iso_year`]: those
    /// move the date only and keep the source's time of day.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Weekday;
    /// use timeshift_core::prelude::*;
    ///
    /// let engine = Engine::default();
    /// let source = TimestampValue::utc(2024, 1, 31, 10, 15, 45).unwrap();
    ///
    /// let named = engine.boundary(&source, Boundary::StartOfWeek, Weekday::Mon).unwrap();
    /// assert_eq!(named.to_string(), "2024-01-29T00:00:00+00:00");
    ///
    /// let date_only = engine.start_of_week(&source, Weekday::Mon).unwrap();
    /// assert_eq!(date_only.to_string(), "2024-01-29T10:15:45+00:00");
    /// ```
    pub fn boundary(
        &self,
        source: &TimestampValue,
        boundary: Boundary,
        wkst: Weekday,
    ) -> Result<TimestampValue> {
        match boundary {
            Boundary::StartOfMinute => self.start_of_minute(source),
            Boundary::EndOfMinute => self.end_of_minute(source),
            Boundary::StartOfHour => self.start_of_hour(source),
            Boundary::EndOfHour => self.end_of_hour(source),
            Boundary::StartOfDay => self.start_of_day(source),
            Boundary::EndOfDay => self.end_of_day(source),
            Boundary::StartOfWeek => {
                let week_start = self.start_of_week(source, wkst)?;
                self.start_of_day(&week_start)
            }
            Boundary::EndOfWeek => self.end_of_week(source, wkst),
            Boundary::StartOfMonth => self.start_of_month(source),
            Boundary::EndOfMonth => self.end_of_month(source),
            Boundary::StartOfYear => self.start_of_year(source),
            Boundary::EndOfYear => self.end_of_year(source),
            Boundary::StartOfIsoYear => {
                let year_start = self.at_start_of_iso_year(source, wkst)?;
                self.start_of_day(&year_start)
            }
            Boundary::EndOfIsoYear => self.end_of_iso_year(source, wkst),
        }
    }
}
