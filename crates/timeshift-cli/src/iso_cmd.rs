use std::process::ExitCode;

use serde::Serialize;
use timeshift_core::{CalendarUtility, Engine};

use crate::cli::IsoArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{for_each_value, parse_wkst};

#[derive(Debug, Serialize)]
struct IsoWeekInfo<'a> {
    input: &'a str,
    wkst: String,
    iso_year: i32,
    week: u32,
    weeks_in_year: u32,
    year_start: String,
}

pub fn run_iso(args: IsoArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let wkst = parse_wkst(&args.wkst)?;
    let engine = Engine::default();

    for_each_value(&args.input, |line, value| {
        let info = IsoWeekInfo {
            input: line,
            wkst: wkst.to_string(),
            iso_year: engine.iso_year(value, wkst)?,
            week: engine.iso_week_number(value, wkst)?,
            weeks_in_year: engine.iso_weeks_in_year(value, wkst)?,
            year_start: engine
                .calendar()
                .iso_year_start(value.date(), wkst, value.calendar_start())?
                .to_string(),
        };

        match output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string(&info)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!(
                    "{} -> iso_year={} week={} weeks_in_year={} year_start={}",
                    info.input, info.iso_year, info.week, info.weeks_in_year, info.year_start
                );
            }
        }
        Ok(())
    })?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
