use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod advance_cmd;
mod boundary_cmd;
mod change_cmd;
mod cli;
mod error;
mod in_month_cmd;
mod iso_cmd;
mod shared;

use advance_cmd::run_advance;
use boundary_cmd::run_boundary;
use change_cmd::run_change;
use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use in_month_cmd::run_in_month;
use iso_cmd::run_iso;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch<A>(
    args: A,
    output_format: &str,
    run: impl FnOnce(A, OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let fallback = output_format_hint(output_format);
    let output_format = match parse_output_format(output_format) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(args, output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    match cli.command {
        Commands::Advance(args) => {
            let format = args.input.output_format.clone();
            dispatch(args, &format, run_advance)
        }
        Commands::Change(args) => {
            let format = args.input.output_format.clone();
            dispatch(args, &format, run_change)
        }
        Commands::Boundary(args) => {
            let format = args.input.output_format.clone();
            dispatch(args, &format, run_boundary)
        }
        Commands::InMonth(args) => {
            let format = args.input.output_format.clone();
            dispatch(args, &format, run_in_month)
        }
        Commands::Iso(args) => {
            let format = args.input.output_format.clone();
            dispatch(args, &format, run_iso)
        }
    }
}
