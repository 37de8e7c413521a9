//! `infodemics` binary.
//!
//! Arguments are parsed before logging starts because `--log-format` decides
//! how diagnostics are rendered. Reports go to stdout; everything else goes
//! to stderr and a failure yields a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use infodemics_cli::{
    cli::{Cli, CliError, render, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn execute(cli: Cli) -> Result<()> {
    let execution = run_cli(cli).context("command did not complete")?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render(&execution, &mut stdout).context("could not write the report")?;
    stdout.flush().context("could not flush stdout")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(cli.log_format) {
        logging_unavailable(&err);
        return ExitCode::FAILURE;
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().and_then(CliError::code);
            error!(
                error = %format_args!("{err:#}"),
                code = code.map(field::display),
                "command execution failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "no subscriber exists to carry this message"
)]
fn logging_unavailable(err: &LoggingError) {
    eprintln!("infodemics: cannot start logging: {err}");
}
