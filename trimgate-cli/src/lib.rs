//! Invocation surface for the trimgate dependency-trim gate.
//!
//! Wires the command line to a check session: assemble the build
//! context, run the requested mode, print the report, and exit with
//! the tool's status.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cli;
pub mod error;
pub mod gate;

pub use cli::{Cli, Command, JobArgs};
pub use error::CliError;

use trimgate_runner::{report, CheckSession, ProcessBackend, TrimRunner};

/// Run one gate job and return the process exit code.
///
/// The report goes to stderr so that stdout stays reserved for the
/// optional JSON record, the pipeline's machine-readable channel.
pub async fn run(cli: Cli) -> i32 {
    let mode = cli.command.mode();
    let args = cli.command.job_args();

    let context = match args.load_context() {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(error = %e, "cannot assemble build context");
            return gate::FAULT_EXIT_CODE;
        }
    };

    let runner = TrimRunner::with_tool(ProcessBackend::new(), args.tool_spec());
    let session = CheckSession::new(runner, context);

    let manifest_path = session.context().manifest_file();
    let manifest_before = if mode.is_mutating() {
        tokio::fs::read_to_string(&manifest_path).await.ok()
    } else {
        None
    };

    let record = match session.run(mode).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(error = %e, mode = %mode, "trim job could not run");
            return gate::exit_code_for(&e);
        }
    };

    eprint!("{}", report::render(&record));

    if record.manifest_mutated() {
        if let Some(before) = &manifest_before {
            if let Ok(after) = tokio::fs::read_to_string(&manifest_path).await {
                if let Some(rendered) = report::manifest_diff(before, &after) {
                    eprintln!("---- manifest diff ----");
                    eprint!("{rendered}");
                }
            }
        }
    }

    if args.report_json {
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "cannot serialize job record"),
        }
    }

    match trimgate_runner::ensure_clean(&record) {
        Ok(()) => 0,
        Err(e) => {
            tracing::warn!(error = %e, "gate failed");
            gate::exit_code_for(&e)
        }
    }
}
