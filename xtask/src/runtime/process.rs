//! Child process execution with echoed command lines.

use std::path::Path;
use std::process::Command;

use crate::runtime::error::{XtaskError, XtaskResult};

/// Runs commands from the workspace root, echoing each as `+ program args`.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// New runner.
    pub fn new() -> Self {
        Self
    }

    /// Prints the command line without running it.
    pub fn announce(&self, program: &str, args: &[String]) {
        println!("+ {}", command_line(program, args));
    }

    /// Runs the command to completion with inherited stdio.
    pub fn run(&self, cwd: &Path, program: &str, args: &[String]) -> XtaskResult<()> {
        self.announce(program, args);
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|err| {
                XtaskError::process_launch(format!("failed to start `{program}`: {err}"))
                    .with_hint(format!("make sure `{program}` is installed and on PATH"))
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(XtaskError::process_exit(format!(
                "`{}` exited with {status}",
                command_line(program, args)
            )))
        }
    }
}

/// Shell-like rendering of a command for logs. Arguments containing whitespace are quoted.
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.chars().any(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
