use std::process::ExitCode;

use timeshift_core::{AdvanceRequest, Engine};

use crate::cli::AdvanceArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{for_each_value, print_shift};

pub fn run_advance(args: AdvanceArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let request = advance_request(&args);
    let engine = Engine::default();

    for_each_value(&args.input, |line, value| {
        let result = engine.advance(value, &request)?;
        print_shift(line, "advance", &result, output_format)
    })?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn advance_request(args: &AdvanceArgs) -> AdvanceRequest {
    AdvanceRequest {
        years: args.years,
        months: args.months,
        weeks: args.weeks,
        days: args.days,
        hours: args.hours,
        minutes: args.minutes,
        seconds: args.seconds,
    }
}
