//! Workspace maintenance commands (`cargo xtask`).
//!
//! A thin CLI layer over a small runtime: [`runtime`] owns error reporting, TOML config loading,
//! and process execution, while each command family in [`commands`] owns its own policy.

pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::lint_commit::LintCommitCommand;
use crate::commands::verify::VerifyCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Contract shared by top-level command families.
///
/// [`XtaskCommand::parse`] only translates arguments into typed options; side effects belong in
/// [`XtaskCommand::run`].
pub trait XtaskCommand {
    /// Typed options produced from raw arguments.
    type Options;

    /// Parses command-line arguments.
    fn parse(args: &[String]) -> XtaskResult<Self::Options>;

    /// Executes the command with the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Runs `xtask` with the current process arguments.
pub fn execute_from_env() -> XtaskResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    let ctx = CommandContext::new()?;

    match parsed {
        TopLevelCommand::Verify(args) => VerifyCommand::run(&ctx, VerifyCommand::parse(&args)?),
        TopLevelCommand::LintCommit(args) => {
            LintCommitCommand::run(&ctx, LintCommitCommand::parse(&args)?)
        }
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Maps a command result to the process exit code, printing failures to stderr.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
