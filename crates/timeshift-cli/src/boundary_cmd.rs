use std::process::ExitCode;

use timeshift_core::Engine;

use crate::cli::BoundaryArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{for_each_value, parse_boundary, parse_wkst, print_shift};

pub fn run_boundary(args: BoundaryArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let boundary = parse_boundary(&args.query)?;
    let wkst = parse_wkst(&args.wkst)?;
    let engine = Engine::default();

    for_each_value(&args.input, |line, value| {
        let result = engine.boundary(value, boundary, wkst)?;
        print_shift(line, boundary.name(), &result, output_format)
    })?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
