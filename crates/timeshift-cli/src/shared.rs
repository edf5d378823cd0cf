use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use timeshift_core::{
    Boundary, CalendarStart, ChronoTzResolver, TimestampValue, TimezoneResolver,
};
use tracing::debug;

use crate::cli::InputArgs;
use crate::error::{CliError, CliResult, OutputFormat};

pub fn parse_calendar_start(s: &str) -> CliResult<CalendarStart> {
    match s.to_lowercase().as_str() {
        "italy" => Ok(CalendarStart::ITALY),
        "england" => Ok(CalendarStart::ENGLAND),
        "gregorian" => Ok(CalendarStart::Gregorian),
        "julian" => Ok(CalendarStart::Julian),
        _ => Err(CliError::input(format!(
            "Invalid calendar_start '{}'. Expected: italy, england, gregorian, julian",
            s
        ))),
    }
}

/// Accepts RFC 5545 two-letter codes (`MO`) as well as chrono's weekday names.
pub fn parse_wkst(s: &str) -> CliResult<Weekday> {
    match s.to_lowercase().as_str() {
        "mo" => Ok(Weekday::Mon),
        "tu" => Ok(Weekday::Tue),
        "we" => Ok(Weekday::Wed),
        "th" => Ok(Weekday::Thu),
        "fr" => Ok(Weekday::Fri),
        "sa" => Ok(Weekday::Sat),
        "su" => Ok(Weekday::Sun),
        other => other.parse::<Weekday>().map_err(|_| {
            CliError::input(format!(
                "Invalid wkst '{}'. Expected: mo, tu, we, th, fr, sa, su",
                s
            ))
        }),
    }
}

pub fn parse_boundary(s: &str) -> CliResult<Boundary> {
    let name = s.to_lowercase().replace('_', "-");
    Boundary::ALL
        .into_iter()
        .find(|boundary| boundary.name() == name)
        .ok_or_else(|| {
            let expected: Vec<&str> = Boundary::ALL.iter().map(|b| b.name()).collect();
            CliError::input(format!(
                "Invalid query '{}'. Expected one of: {}",
                s,
                expected.join(", ")
            ))
        })
}

pub fn parse_tz_or_input_error(name: &str) -> CliResult<()> {
    timeshift_core::tz::parse_tz(name)
        .map(|_| ())
        .map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

/// How input lines are turned into values.
#[derive(Debug)]
pub struct InputContext {
    zone: Option<(String, Arc<dyn TimezoneResolver>)>,
    start: CalendarStart,
}

impl InputContext {
    pub fn from_args(args: &InputArgs) -> CliResult<Self> {
        let start = parse_calendar_start(&args.calendar_start)?;
        let zone = match &args.tz {
            Some(name) => {
                parse_tz_or_input_error(name)?;
                let resolver: Arc<dyn TimezoneResolver> = Arc::new(ChronoTzResolver);
                Some((name.clone(), resolver))
            }
            None => None,
        };
        Ok(Self { zone, start })
    }

    /// Parse one timestamp.
    ///
    /// Accepted forms are RFC 5545 basic (`20240131T101545` with optional `Z`)
    /// and extended (`2024-01-31T10:15:45` with optional `Z` or `±HH:MM`).
    /// Times with an explicit offset keep it; local times are placed in the
    /// `--tz` zone, or at offset zero without a zone.
    pub fn parse_value(&self, input: &str) -> CliResult<TimestampValue> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            let local = dt.naive_local();
            let (y, mo, d, h, mi, s) = fields(&local);
            return TimestampValue::civil(y, mo, d, h, mi, s, *dt.offset(), self.start)
                .map_err(CliError::from);
        }

        let (local, utc) = parse_naive(input)?;
        let (y, mo, d, h, mi, s) = fields(&local);

        match (&self.zone, utc) {
            (Some((tzid, resolver)), false) => {
                TimestampValue::zoned(resolver.clone(), tzid.clone(), y, mo, d, h, mi, s, self.start)
                    .map_err(CliError::from)
            }
            _ => {
                let offset = chrono::FixedOffset::east_opt(0)
                    .ok_or_else(|| CliError::runtime("UTC offset unavailable"))?;
                TimestampValue::civil(y, mo, d, h, mi, s, offset, self.start)
                    .map_err(CliError::from)
            }
        }
    }
}

fn fields(local: &NaiveDateTime) -> (i32, u32, u32, u32, u32, u32) {
    (
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        local.second(),
    )
}

/// Parse a timestamp without a numeric offset. The flag is true for a
/// trailing `Z`.
fn parse_naive(input: &str) -> CliResult<(NaiveDateTime, bool)> {
    let (body, utc) = match input.strip_suffix('Z') {
        Some(body) => (body, true),
        None => (input, false),
    };
    let formats = ["%Y%m%dT%H%M%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(body, fmt) {
            return Ok((dt, utc));
        }
    }

    Err(CliError::input(format!(
        "Invalid timestamp '{}'. Expected: YYYYMMDDTHHMMSS[Z] or YYYY-MM-DDTHH:MM:SS[Z|+HH:MM]",
        input
    )))
}

/// Read non-empty, trimmed input lines from a file or stdin.
pub fn read_input_lines(path: &str) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open file '{}'", path))?;
        Box::new(BufReader::new(file))
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    debug!(count = lines.len(), path, "read input lines");
    Ok(lines)
}

/// Parse every input line and hand the value to `apply`.
pub fn for_each_value(
    args: &InputArgs,
    mut apply: impl FnMut(&str, &TimestampValue) -> CliResult<()>,
) -> CliResult<()> {
    let context = InputContext::from_args(args)?;
    let lines = read_input_lines(&args.input).map_err(|e| CliError::runtime(format!("{e:#}")))?;

    for line in &lines {
        let value = context.parse_value(line).map_err(|e| e.for_input(line))?;
        debug!(input = %line, %value, "parsed");
        apply(line, &value).map_err(|e| e.for_input(line))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ShiftResult<'a> {
    pub input: &'a str,
    pub operation: &'a str,
    pub result: &'a TimestampValue,
}

pub fn print_shift(
    input: &str,
    operation: &str,
    result: &TimestampValue,
    output_format: OutputFormat,
) -> CliResult<()> {
    match output_format {
        OutputFormat::Json => {
            let record = ShiftResult {
                input,
                operation,
                result,
            };
            let json = serde_json::to_string(&record)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => match result.tzid() {
            Some(tzid) => println!("{} -> {} ({})", input, result, tzid),
            None => println!("{} -> {}", input, result),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tz: Option<&str>) -> InputArgs {
        InputArgs {
            input: "-".to_string(),
            tz: tz.map(str::to_string),
            calendar_start: "italy".to_string(),
            output_format: "text".to_string(),
        }
    }

    #[test]
    fn parses_basic_and_extended_forms() {
        let ctx = InputContext::from_args(&args(None)).unwrap();
        let basic = ctx.parse_value("20240131T101545Z").unwrap();
        let extended = ctx.parse_value("2024-01-31T10:15:45Z").unwrap();
        assert_eq!(basic, extended);
        assert_eq!(basic.to_string(), "2024-01-31T10:15:45+00:00");

        let offset = ctx.parse_value("2024-01-31T10:15:45+05:30").unwrap();
        assert_eq!(offset.to_string(), "2024-01-31T10:15:45+05:30");
    }

    #[test]
    fn local_times_use_tz() {
        let ctx = InputContext::from_args(&args(Some("Europe/Berlin"))).unwrap();
        let value = ctx.parse_value("20260715T120000").unwrap();
        assert_eq!(value.tzid(), Some("Europe/Berlin"));
        assert_eq!(value.to_string(), "2026-07-15T12:00:00+02:00");

        // An explicit Z is not a local time.
        let utc = ctx.parse_value("20260715T120000Z").unwrap();
        assert_eq!(utc.tzid(), None);
    }

    #[test]
    fn rejects_garbage() {
        let ctx = InputContext::from_args(&args(None)).unwrap();
        assert!(ctx.parse_value("yesterday").is_err());
        assert!(ctx.parse_value("20240230T000000").is_err());
        assert!(InputContext::from_args(&args(Some("Nowhere/City"))).is_err());
    }

    #[test]
    fn wkst_codes() {
        assert_eq!(parse_wkst("MO").unwrap(), Weekday::Mon);
        assert_eq!(parse_wkst("su").unwrap(), Weekday::Sun);
        assert_eq!(parse_wkst("wednesday").unwrap(), Weekday::Wed);
        assert!(parse_wkst("xx").is_err());
    }

    #[test]
    fn boundary_names() {
        assert_eq!(parse_boundary("end-of-month").unwrap(), Boundary::EndOfMonth);
        assert_eq!(
            parse_boundary("START_OF_ISO_YEAR").unwrap(),
            Boundary::StartOfIsoYear
        );
        assert!(parse_boundary("middle-of-week").is_err());
    }

    #[test]
    fn calendar_start_names() {
        assert_eq!(parse_calendar_start("England").unwrap(), CalendarStart::ENGLAND);
        assert!(parse_calendar_start("mars").is_err());
    }
}
