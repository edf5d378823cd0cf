use std::process::ExitCode;

use timeshift_core::{ChangeRequest, Engine};

use crate::cli::ChangeArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{for_each_value, print_shift};

pub fn run_change(args: ChangeArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let request = ChangeRequest {
        year: args.year,
        month: args.month,
        day: args.day,
        hour: args.hour,
        minute: args.minute,
        second: args.second,
        ..ChangeRequest::default()
    };
    if request == ChangeRequest::default() {
        return Err(CliError::input(
            "Nothing to change. Pass at least one of --year, --month, --day, --hour, --minute, --second",
        ));
    }
    let engine = Engine::default();

    for_each_value(&args.input, |line, value| {
        let result = engine.change(value, &request)?;
        print_shift(line, "change", &result, output_format)
    })?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
