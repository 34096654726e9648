//! Top-level argument dispatch and usage text.

use crate::runtime::error::{XtaskError, XtaskResult};

/// Top-level `xtask` command families with their remaining arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    /// `verify [profile]`
    Verify(Vec<String>),
    /// `lint-commit <file>`
    LintCommit(Vec<String>),
    /// Usage text.
    Help,
}

/// Selects the command family from raw arguments.
pub fn parse(args: Vec<String>) -> XtaskResult<TopLevelCommand> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(TopLevelCommand::Help);
    };
    let rest = rest.to_vec();

    match command.as_str() {
        "verify" => Ok(TopLevelCommand::Verify(rest)),
        "lint-commit" => Ok(TopLevelCommand::LintCommit(rest)),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        other => Err(XtaskError::validation(format!("unknown xtask command: {other}"))
            .with_hint("run `cargo xtask help` for the command list")),
    }
}

/// Prints the top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
           verify [profile] [--list] [--dry-run]\n\
                              Run the format, lint, and test stages of a verify profile\n\
           lint-commit <file> | --message <text>\n\
                              Check a commit message against tools/automation/commit_lint.toml\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_arguments_show_help() {
        assert_eq!(parse(Vec::new()).expect("parse"), TopLevelCommand::Help);
    }

    #[test]
    fn families_receive_their_remaining_arguments() {
        assert_eq!(
            parse(args(&["verify", "fast"])).expect("parse"),
            TopLevelCommand::Verify(args(&["fast"]))
        );
        assert_eq!(
            parse(args(&["lint-commit", ".git/COMMIT_EDITMSG"])).expect("parse"),
            TopLevelCommand::LintCommit(args(&[".git/COMMIT_EDITMSG"]))
        );
    }

    #[test]
    fn unknown_commands_are_validation_errors() {
        let err = parse(args(&["deploy"])).expect_err("unknown command");
        assert!(err.to_string().contains("unknown xtask command: deploy"));
    }
}
