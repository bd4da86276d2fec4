//! Release checker CLI entrypoint.
//!
//! Checks one release archive and prints each defect as a line on standard
//! output. Log output goes to standard error.

use clap::Parser;
use log::info;
use release_checker::cli::Cli;
use release_checker::defect::LineSink;
use release_checker::error::{CheckError, Result};
use release_checker::layout::ReleaseLayout;
use release_checker::release::ReleaseChecker;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Outcome of a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    defects: usize,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, cli.strict, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the flags.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli)));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed; keep it.
    }
}

fn default_log_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        return "error";
    }
    match cli.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<RunSummary> {
    let layout = cli
        .layout
        .as_deref()
        .map_or_else(|| Ok(ReleaseLayout::default()), ReleaseLayout::load)?;
    let checker = ReleaseChecker::new(layout);

    let mut sink = LineSink::new(stdout);
    checker.check_file(&cli.archive, &cli.release, &mut sink)?;
    let defects = sink.count();
    sink.finish().map_err(CheckError::Output)?;

    info!("{defects} defect(s) found in {}", cli.archive);
    Ok(RunSummary { defects })
}

fn exit_code_for_run_result(
    result: Result<RunSummary>,
    strict: bool,
    stderr: &mut dyn Write,
) -> i32 {
    match result {
        Ok(summary) if strict && summary.defects > 0 => 1,
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
