use std::process::ExitCode;

use timeshift_core::Engine;

use crate::cli::InMonthArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{for_each_value, print_shift};

pub fn run_in_month(args: InMonthArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    if !(1..=12).contains(&args.month) {
        return Err(CliError::input(format!(
            "Invalid month '{}'. Expected: 1-12",
            args.month
        )));
    }
    let engine = Engine::default();

    for_each_value(&args.input, |line, value| {
        let result = engine.in_month(value, args.month)?;
        print_shift(line, "in-month", &result, output_format)
    })?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
