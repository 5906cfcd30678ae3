//! sigfetch CLI entrypoint.
//!
//! Downloads release artefacts and keeps them only if their detached
//! signature verifies against the configured keyring.

use clap::Parser;
use sigfetch_cli::cli::{Cli, Command};
use sigfetch_cli::error::Result;
use sigfetch_cli::fetch::{run_fetch, run_fingerprint};
use sigfetch_cli::output::write_stderr_line;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Fetch(args) => run_fetch(args, stdout, stderr).map(|_| ()),
        Command::Fingerprint(args) => run_fingerprint(args, stdout),
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
