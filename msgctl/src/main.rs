//! CLI entrypoint for `msgctl`.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use msgctl::cli::Args;
use msgctl::commands;
use msgctl::error::MsgctlError;
use msgctl::telemetry;

fn main() -> Result<ExitCode, MsgctlError> {
    telemetry::initialise()?;
    let args = Args::parse();
    let report = commands::run(&args)?;
    let mut stdout = io::stdout().lock();
    for line in &report.lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
