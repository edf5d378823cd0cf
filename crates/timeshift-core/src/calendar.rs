//! Civil calendar utilities.
//!
//! This module provides the low-level date math the arithmetic engine is built
//! on: Julian day numbers, month and day shifting, day-of-week, and the
//! wkst-relative ISO week/year numbering used by RFC 5545 recurrence rules.
//!
//! Dates are interpreted relative to a [`CalendarStart`], the day the Julian
//! calendar was replaced by the Gregorian one. Everything is expressed through
//! two primitives on [`CalendarUtility`], so an alternative calendar only has to
//! map civil dates to and from Julian day numbers.

use std::fmt;

use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::{Result, TimeshiftError};

/// Offset between chrono's day count from the common era and Julian day numbers.
pub(crate) const CE_TO_JD: i64 = 1_721_425;

/// Julian day number of the Gregorian reform in Italy (1582-10-15).
const ITALY_JD: i64 = 2_299_161;

/// Julian day number of the Gregorian reform in England (1752-09-14).
const ENGLAND_JD: i64 = 2_361_222;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The day the Gregorian calendar takes over from the Julian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarStart {
    /// Proleptic Gregorian calendar, no reform.
    Gregorian,
    /// Proleptic Julian calendar, never reformed.
    Julian,
    /// The first Julian day number that uses the Gregorian calendar.
    Reform(i64),
}

impl CalendarStart {
    /// Reform as adopted in Italy on 1582-10-15.
    pub const ITALY: CalendarStart = CalendarStart::Reform(ITALY_JD);

    /// Reform as adopted in England on 1752-09-14.
    pub const ENGLAND: CalendarStart = CalendarStart::Reform(ENGLAND_JD);

    /// First Julian day number on the Gregorian side of the reform.
    pub fn reform_jd(self) -> i64 {
        match self {
            CalendarStart::Gregorian => i64::MIN,
            CalendarStart::Julian => i64::MAX,
            CalendarStart::Reform(jd) => jd,
        }
    }
}

impl Default for CalendarStart {
    fn default() -> Self {
        CalendarStart::ITALY
    }
}

impl fmt::Display for CalendarStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CalendarStart::Gregorian => write!(f, "gregorian"),
            CalendarStart::Julian => write!(f, "julian"),
            CalendarStart::ITALY => write!(f, "italy"),
            CalendarStart::ENGLAND => write!(f, "england"),
            CalendarStart::Reform(jd) => write!(f, "reform:{}", jd),
        }
    }
}

impl Serialize for CalendarStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A calendar date. Validity depends on the [`CalendarStart`] it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A validated civil date and time of day with its UTC offset.
///
/// Only obtainable through [`CalendarUtility::civil`], so the fields always
/// denote a real date/time under `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilDateTime {
    date: CivilDate,
    hour: u32,
    minute: u32,
    second: u32,
    offset: FixedOffset,
    start: CalendarStart,
    jd: i64,
}

impl CivilDateTime {
    pub fn date(&self) -> CivilDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn start(&self) -> CalendarStart {
        self.start
    }

    /// Julian day number of the local date.
    pub fn julian_day(&self) -> i64 {
        self.jd
    }

    /// Seconds elapsed since local midnight.
    pub fn seconds_of_day(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second)
    }
}

/// Day of the week of a Julian day number. Julian day 0 was a Monday.
pub(crate) fn weekday_of_julian_day(jd: i64) -> Weekday {
    WEEKDAYS[jd.rem_euclid(7) as usize]
}

fn invalid_date(date: CivilDate) -> TimeshiftError {
    TimeshiftError::InvalidCalendarDate(date.to_string())
}

/// Civil calendar operations used by the arithmetic engine.
///
/// Implementors provide the mapping between civil dates and Julian day numbers;
/// everything else is derived from it.
pub trait CalendarUtility {
    /// Julian day number of a civil date, or `None` when the date does not
    /// exist under `start` (including days skipped by the reform).
    fn julian_day_opt(
        &self,
        year: i32,
        month: u32,
        day: u32,
        start: CalendarStart,
    ) -> Option<i64>;

    /// Civil date of a Julian day number, or `None` when it is out of range.
    fn civil_from_julian_day(&self, jd: i64, start: CalendarStart) -> Option<CivilDate>;

    fn julian_day(&self, date: CivilDate, start: CalendarStart) -> Result<i64> {
        self.julian_day_opt(date.year, date.month, date.day, start)
            .ok_or_else(|| invalid_date(date))
    }

    /// Last valid day of the month, or 0 if the month does not exist.
    fn days_in_month(&self, year: i32, month: u32, start: CalendarStart) -> u32 {
        (1..=31)
            .rev()
            .find(|&day| self.julian_day_opt(year, month, day, start).is_some())
            .unwrap_or(0)
    }

    /// Shift a date by `months`, clamping the day to the last valid day of the
    /// resulting month.
    fn shift_months(&self, date: CivilDate, months: i64, start: CalendarStart) -> Result<CivilDate> {
        let total = (i64::from(date.year) * 12 + i64::from(date.month) - 1)
            .checked_add(months)
            .ok_or_else(|| invalid_date(date))?;
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| invalid_date(date))?;
        let month = total.rem_euclid(12) as u32 + 1;

        (1..=date.day)
            .rev()
            .find(|&day| self.julian_day_opt(year, month, day, start).is_some())
            .map(|day| CivilDate::new(year, month, day))
            .ok_or_else(|| invalid_date(CivilDate::new(year, month, date.day)))
    }

    fn shift_days(&self, date: CivilDate, days: i64, start: CalendarStart) -> Result<CivilDate> {
        let jd = self.julian_day(date, start)?;
        jd.checked_add(days)
            .and_then(|jd| self.civil_from_julian_day(jd, start))
            .ok_or_else(|| invalid_date(date))
    }

    fn weekday(&self, date: CivilDate, start: CalendarStart) -> Result<Weekday> {
        self.julian_day(date, start).map(weekday_of_julian_day)
    }

    /// The date of `wkst` on or before `date`.
    fn start_of_week(&self, date: CivilDate, wkst: Weekday, start: CalendarStart) -> Result<CivilDate> {
        let weekday = self.weekday(date, start)?;
        let back = (i64::from(weekday.num_days_from_monday())
            - i64::from(wkst.num_days_from_monday()))
        .rem_euclid(7);
        self.shift_days(date, -back, start)
    }

    /// First day of ISO week one of `year`: the week starting on `wkst` that
    /// contains January 4th.
    fn iso_week_one(&self, year: i32, wkst: Weekday, start: CalendarStart) -> Result<CivilDate> {
        self.start_of_week(CivilDate::new(year, 1, 4), wkst, start)
    }

    /// The ISO year containing `date` together with the first day of its week one.
    fn iso_year_and_week_one_start(
        &self,
        date: CivilDate,
        wkst: Weekday,
        start: CalendarStart,
    ) -> Result<(i32, CivilDate)> {
        let jd = self.julian_day(date, start)?;
        let year = date.year;
        let week_one = self.iso_week_one(year, wkst, start)?;

        if jd < self.julian_day(week_one, start)? {
            let previous = year - 1;
            return Ok((previous, self.iso_week_one(previous, wkst, start)?));
        }

        let next = year + 1;
        let next_week_one = self.iso_week_one(next, wkst, start)?;
        if jd >= self.julian_day(next_week_one, start)? {
            Ok((next, next_week_one))
        } else {
            Ok((year, week_one))
        }
    }

    fn iso_year_start(&self, date: CivilDate, wkst: Weekday, start: CalendarStart) -> Result<CivilDate> {
        self.iso_year_and_week_one_start(date, wkst, start)
            .map(|(_, week_one)| week_one)
    }

    /// Number of weeks (52 or 53) in the ISO year containing `date`.
    fn iso_weeks_in_year(&self, date: CivilDate, wkst: Weekday, start: CalendarStart) -> Result<u32> {
        let (iso_year, week_one) = self.iso_year_and_week_one_start(date, wkst, start)?;
        let next_week_one = self.iso_week_one(iso_year + 1, wkst, start)?;
        let days = self.julian_day(next_week_one, start)? - self.julian_day(week_one, start)?;
        Ok((days / 7) as u32)
    }

    /// One-based ISO week number of `date`.
    fn iso_week_number(&self, date: CivilDate, wkst: Weekday, start: CalendarStart) -> Result<u32> {
        let (_, week_one) = self.iso_year_and_week_one_start(date, wkst, start)?;
        let days = self.julian_day(date, start)? - self.julian_day(week_one, start)?;
        Ok((days / 7) as u32 + 1)
    }

    /// Validate and assemble a civil date/time.
    ///
    /// Fails with [`TimeshiftError::InvalidCalendarDate`] instead of clamping
    /// when any field is out of range for the calendar.
    #[allow(clippy::too_many_arguments)]
    fn civil(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset: FixedOffset,
        start: CalendarStart,
    ) -> Result<CivilDateTime> {
        let date = CivilDate::new(year, month, day);
        let invalid = || {
            TimeshiftError::InvalidCalendarDate(format!(
                "{} {:02}:{:02}:{:02}",
                date, hour, minute, second
            ))
        };

        if hour > 23 || minute > 59 || second > 59 {
            return Err(invalid());
        }
        let jd = self
            .julian_day_opt(year, month, day, start)
            .ok_or_else(invalid)?;

        Ok(CivilDateTime {
            date,
            hour,
            minute,
            second,
            offset,
            start,
            jd,
        })
    }
}

/// Julian calendar before the reform day, Gregorian from it onwards.
///
/// Gregorian day numbers come from chrono's proleptic Gregorian dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReformCalendar;

impl ReformCalendar {
    fn gregorian_jd(year: i32, month: u32, day: u32) -> Option<i64> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| i64::from(date.num_days_from_ce()) + CE_TO_JD)
    }

    fn gregorian_from_jd(jd: i64) -> Option<CivilDate> {
        i32::try_from(jd - CE_TO_JD)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(CivilDate::from)
    }

    fn julian_calendar_jd(year: i32, month: u32, day: u32) -> Option<i64> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let a = (14 - i64::from(month)) / 12;
        let y = i64::from(year) + 4800 - a;
        let m = i64::from(month) + 12 * a - 3;
        let jd = i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083;

        // Day numbers past the end of the month roll into the next one.
        (Self::julian_calendar_from_jd(jd)? == CivilDate::new(year, month, day)).then_some(jd)
    }

    fn julian_calendar_from_jd(jd: i64) -> Option<CivilDate> {
        let c = jd.checked_add(32082)?;
        let d = c.checked_mul(4)?.checked_add(3)?.div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2) / 153;
        let day = e - (153 * m + 2) / 5 + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = d - 4800 + m / 10;

        Some(CivilDate::new(
            i32::try_from(year).ok()?,
            month as u32,
            day as u32,
        ))
    }
}

impl CalendarUtility for ReformCalendar {
    fn julian_day_opt(&self, year: i32, month: u32, day: u32, start: CalendarStart) -> Option<i64> {
        let reform = start.reform_jd();
        if let Some(jd) = Self::gregorian_jd(year, month, day).filter(|&jd| jd >= reform) {
            return Some(jd);
        }
        Self::julian_calendar_jd(year, month, day).filter(|&jd| jd < reform)
    }

    fn civil_from_julian_day(&self, jd: i64, start: CalendarStart) -> Option<CivilDate> {
        if jd >= start.reform_jd() {
            Self::gregorian_from_jd(jd)
        } else {
            Self::julian_calendar_from_jd(jd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: ReformCalendar = ReformCalendar;
    const ITALY: CalendarStart = CalendarStart::ITALY;

    fn date(year: i32, month: u32, day: u32) -> CivilDate {
        CivilDate::new(year, month, day)
    }

    #[test]
    fn julian_day_of_j2000() {
        assert_eq!(CAL.julian_day(date(2000, 1, 1), ITALY).unwrap(), 2_451_545);
    }

    #[test]
    fn reform_gap_does_not_exist() {
        assert_eq!(CAL.julian_day(date(1582, 10, 4), ITALY).unwrap(), 2_299_160);
        assert_eq!(CAL.julian_day(date(1582, 10, 15), ITALY).unwrap(), 2_299_161);
        for day in 5..=14 {
            assert!(CAL.julian_day(date(1582, 10, day), ITALY).is_err());
        }
        // The gap exists only under the Italian reform.
        assert!(CAL.julian_day(date(1582, 10, 10), CalendarStart::Gregorian).is_ok());
    }

    #[test]
    fn julian_leap_rules_apply_before_reform() {
        assert!(CAL.julian_day(date(1500, 2, 29), ITALY).is_ok());
        assert!(CAL.julian_day(date(1500, 2, 29), CalendarStart::Gregorian).is_err());
        assert!(CAL.julian_day(date(1900, 2, 29), ITALY).is_err());
        assert!(CAL.julian_day(date(1900, 2, 29), CalendarStart::Julian).is_ok());
    }

    #[test]
    fn civil_from_julian_day_crosses_reform() {
        assert_eq!(
            CAL.civil_from_julian_day(2_299_160, ITALY),
            Some(date(1582, 10, 4))
        );
        assert_eq!(
            CAL.civil_from_julian_day(2_299_161, ITALY),
            Some(date(1582, 10, 15))
        );
        assert_eq!(
            CAL.shift_days(date(1582, 10, 4), 1, ITALY).unwrap(),
            date(1582, 10, 15)
        );
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(CAL.days_in_month(2024, 2, ITALY), 29);
        assert_eq!(CAL.days_in_month(2023, 2, ITALY), 28);
        assert_eq!(CAL.days_in_month(1900, 2, ITALY), 28);
        assert_eq!(CAL.days_in_month(2000, 2, ITALY), 29);
        assert_eq!(CAL.days_in_month(2024, 4, ITALY), 30);
        assert_eq!(CAL.days_in_month(2024, 12, ITALY), 31);
        assert_eq!(CAL.days_in_month(2024, 13, ITALY), 0);
    }

    #[test]
    fn shift_months_clamps_to_month_end() {
        assert_eq!(
            CAL.shift_months(date(2024, 1, 31), 1, ITALY).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            CAL.shift_months(date(2023, 1, 31), 1, ITALY).unwrap(),
            date(2023, 2, 28)
        );
        assert_eq!(
            CAL.shift_months(date(2024, 3, 31), -1, ITALY).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            CAL.shift_months(date(2024, 11, 15), 14, ITALY).unwrap(),
            date(2026, 1, 15)
        );
        assert_eq!(
            CAL.shift_months(date(2024, 1, 15), -13, ITALY).unwrap(),
            date(2022, 12, 15)
        );
    }

    #[test]
    fn extreme_day_numbers_have_no_civil_date() {
        assert_eq!(CAL.civil_from_julian_day(i64::MIN, ITALY), None);
        assert_eq!(CAL.civil_from_julian_day(i64::MAX, ITALY), None);
        assert!(CAL.shift_days(date(2024, 1, 31), i64::MIN, ITALY).is_err());
    }

    #[test]
    fn shift_months_overflow_is_an_error() {
        assert!(CAL.shift_months(date(2024, 1, 31), i64::MAX, ITALY).is_err());
        assert!(CAL.shift_months(date(2024, 1, 31), i64::MIN, ITALY).is_err());
    }

    #[test]
    fn weekday_from_julian_day() {
        assert_eq!(CAL.weekday(date(2000, 1, 1), ITALY).unwrap(), Weekday::Sat);
        assert_eq!(CAL.weekday(date(2024, 1, 31), ITALY).unwrap(), Weekday::Wed);
        // Thursday 4 October 1582 was followed by Friday 15 October.
        assert_eq!(CAL.weekday(date(1582, 10, 4), ITALY).unwrap(), Weekday::Thu);
        assert_eq!(CAL.weekday(date(1582, 10, 15), ITALY).unwrap(), Weekday::Fri);
    }

    #[test]
    fn start_of_week_respects_wkst() {
        // 2024-01-31 is a Wednesday.
        let wed = date(2024, 1, 31);
        assert_eq!(
            CAL.start_of_week(wed, Weekday::Mon, ITALY).unwrap(),
            date(2024, 1, 29)
        );
        assert_eq!(
            CAL.start_of_week(wed, Weekday::Sun, ITALY).unwrap(),
            date(2024, 1, 28)
        );
        assert_eq!(CAL.start_of_week(wed, Weekday::Wed, ITALY).unwrap(), wed);
        assert_eq!(
            CAL.start_of_week(wed, Weekday::Thu, ITALY).unwrap(),
            date(2024, 1, 25)
        );
    }

    #[test]
    fn iso_year_boundaries_with_monday_start() {
        // ISO 2021 week one starts Monday 2021-01-04; 2021-01-03 is in ISO 2020.
        assert_eq!(
            CAL.iso_year_and_week_one_start(date(2021, 1, 3), Weekday::Mon, ITALY)
                .unwrap(),
            (2020, date(2019, 12, 30))
        );
        assert_eq!(
            CAL.iso_year_start(date(2021, 1, 4), Weekday::Mon, ITALY).unwrap(),
            date(2021, 1, 4)
        );
        // 2024-12-30 already belongs to ISO 2025.
        assert_eq!(
            CAL.iso_year_and_week_one_start(date(2024, 12, 30), Weekday::Mon, ITALY)
                .unwrap(),
            (2025, date(2024, 12, 30))
        );
    }

    #[test]
    fn iso_weeks_in_year_counts_long_years() {
        assert_eq!(
            CAL.iso_weeks_in_year(date(2020, 6, 1), Weekday::Mon, ITALY).unwrap(),
            53
        );
        assert_eq!(
            CAL.iso_weeks_in_year(date(2024, 6, 1), Weekday::Mon, ITALY).unwrap(),
            52
        );
        assert_eq!(
            CAL.iso_weeks_in_year(date(2015, 6, 1), Weekday::Mon, ITALY).unwrap(),
            53
        );
    }

    #[test]
    fn iso_week_number_matches_chrono() {
        for (y, m, d) in [(2021, 1, 3), (2024, 1, 31), (2024, 12, 30), (2026, 10, 19)] {
            let naive = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(
                CAL.iso_week_number(date(y, m, d), Weekday::Mon, ITALY).unwrap(),
                naive.iso_week().week()
            );
        }
    }

    #[test]
    fn civil_rejects_out_of_range_fields() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert!(CAL.civil(2024, 2, 30, 0, 0, 0, utc, ITALY).is_err());
        assert!(CAL.civil(2024, 4, 31, 0, 0, 0, utc, ITALY).is_err());
        assert!(CAL.civil(2024, 1, 1, 24, 0, 0, utc, ITALY).is_err());
        assert!(CAL.civil(2024, 1, 1, 0, 60, 0, utc, ITALY).is_err());
        assert!(CAL.civil(2024, 1, 1, 0, 0, 60, utc, ITALY).is_err());

        let err = CAL.civil(2023, 2, 29, 10, 0, 0, utc, ITALY).unwrap_err();
        assert_eq!(
            err,
            TimeshiftError::InvalidCalendarDate("2023-02-29 10:00:00".to_string())
        );
    }

    #[test]
    fn civil_keeps_fields() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let dt = CAL.civil(2024, 1, 31, 10, 15, 45, offset, ITALY).unwrap();
        assert_eq!(dt.date(), date(2024, 1, 31));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 15, 45));
        assert_eq!(dt.offset(), offset);
        assert_eq!(dt.julian_day(), 2_460_341);
        assert_eq!(dt.seconds_of_day(), 36_945);
    }

    #[test]
    fn calendar_start_display() {
        assert_eq!(CalendarStart::ITALY.to_string(), "italy");
        assert_eq!(CalendarStart::ENGLAND.to_string(), "england");
        assert_eq!(CalendarStart::Gregorian.to_string(), "gregorian");
        assert_eq!(CalendarStart::Reform(2_300_000).to_string(), "reform:2300000");
        assert_eq!(CalendarStart::default(), CalendarStart::ITALY);
    }
}
