//! `cargo xtask lint-commit`: conventional commit message checks.
//!
//! Headers take the form `type(scope)?: subject` (a `!` before the colon marks a breaking change).
//! Allowed types, optional scopes, and the subject length limit come from
//! `tools/automation/commit_lint.toml`.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::runtime::config::ConfigLoader;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;

/// Rules file location relative to the workspace root.
pub const COMMIT_LINT_FILE: &str = "tools/automation/commit_lint.toml";

fn default_max_subject_length() -> usize {
    72
}

/// Parsed `commit_lint.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct CommitLintRules {
    /// Accepted header types.
    pub types: Vec<String>,
    /// Accepted scopes. Empty accepts any scope.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Maximum header length in characters.
    #[serde(default = "default_max_subject_length")]
    pub max_subject_length: usize,
}

/// A single rule violation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LintViolation {
    EmptyMessage,
    MalformedHeader,
    UnknownType(String),
    UnknownScope(String),
    EmptySubject,
    SubjectTooLong { length: usize, max: usize },
    TrailingPeriod,
    MissingBlankLine,
}

impl fmt::Display for LintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => f.write_str("commit message is empty"),
            Self::MalformedHeader => {
                f.write_str("header must look like `type(scope): subject` or `type: subject`")
            }
            Self::UnknownType(kind) => write!(f, "unknown commit type `{kind}`"),
            Self::UnknownScope(scope) => write!(f, "unknown commit scope `{scope}`"),
            Self::EmptySubject => f.write_str("subject is empty"),
            Self::SubjectTooLong { length, max } => {
                write!(f, "header is {length} characters; the limit is {max}")
            }
            Self::TrailingPeriod => f.write_str("subject must not end with a period"),
            Self::MissingBlankLine => f.write_str("header and body must be separated by a blank line"),
        }
    }
}

/// Checks `message` against `rules`. Lines starting with `#` are ignored, as git does.
pub fn lint_message(message: &str, rules: &CommitLintRules) -> Vec<LintViolation> {
    let lines: Vec<&str> = message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim_end)
        .collect();
    let first = lines.iter().position(|line| !line.trim().is_empty());
    let Some(first) = first else {
        return vec![LintViolation::EmptyMessage];
    };
    let header = lines[first];
    let mut violations = Vec::new();

    let length = header.chars().count();
    if length > rules.max_subject_length {
        violations.push(LintViolation::SubjectTooLong {
            length,
            max: rules.max_subject_length,
        });
    }

    match parse_header(header) {
        Some(parsed) => {
            if !rules.types.iter().any(|kind| kind == parsed.kind) {
                violations.push(LintViolation::UnknownType(parsed.kind.to_string()));
            }
            if let Some(scope) = parsed.scope {
                if !rules.scopes.is_empty() && !rules.scopes.iter().any(|known| known == scope) {
                    violations.push(LintViolation::UnknownScope(scope.to_string()));
                }
            }
            let subject = parsed.subject.trim();
            if subject.is_empty() {
                violations.push(LintViolation::EmptySubject);
            } else if subject.ends_with('.') {
                violations.push(LintViolation::TrailingPeriod);
            }
        }
        None => violations.push(LintViolation::MalformedHeader),
    }

    if lines
        .get(first + 1)
        .is_some_and(|line| !line.trim().is_empty())
    {
        violations.push(LintViolation::MissingBlankLine);
    }

    violations
}

struct Header<'a> {
    kind: &'a str,
    scope: Option<&'a str>,
    subject: &'a str,
}

fn parse_header(header: &str) -> Option<Header<'_>> {
    let (prefix, subject) = header.split_once(": ")?;
    let prefix = prefix.strip_suffix('!').unwrap_or(prefix);
    let (kind, scope) = match prefix.split_once('(') {
        Some((kind, rest)) => {
            let scope = rest.strip_suffix(')')?;
            if scope.is_empty() || scope.contains(['(', ')']) {
                return None;
            }
            (kind, Some(scope))
        }
        None => (prefix, None),
    };
    let well_formed = !kind.is_empty() && kind.chars().all(|ch| ch.is_ascii_lowercase());
    well_formed.then_some(Header {
        kind,
        scope,
        subject,
    })
}

/// Where the message comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageSource {
    File(PathBuf),
    Inline(String),
}

/// `lint-commit` command family.
pub struct LintCommitCommand;

impl XtaskCommand for LintCommitCommand {
    type Options = MessageSource;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        match args {
            [flag, text] if flag == "--message" || flag == "-m" => {
                Ok(MessageSource::Inline(text.clone()))
            }
            [path] if !path.starts_with('-') => Ok(MessageSource::File(PathBuf::from(path))),
            _ => Err(XtaskError::validation(
                "usage: cargo xtask lint-commit <file> | --message <text>",
            )),
        }
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        let rules = ConfigLoader::<CommitLintRules>::new(ctx.root(), COMMIT_LINT_FILE).load()?;
        let message = match options {
            MessageSource::Inline(text) => text,
            MessageSource::File(path) => fs::read_to_string(&path)
                .map_err(|err| XtaskError::io(err.to_string()).with_path(&path))?,
        };

        let violations = lint_message(&message, &rules);
        if violations.is_empty() {
            println!("commit message ok");
            return Ok(());
        }
        for violation in &violations {
            eprintln!("  - {violation}");
        }
        Err(XtaskError::validation(format!(
            "commit message has {} problem(s)",
            violations.len()
        ))
        .with_hint(format!("allowed types: {}", rules.types.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::config::test_support::scratch_dir;

    fn rules() -> CommitLintRules {
        CommitLintRules {
            types: vec!["feat".into(), "fix".into(), "docs".into()],
            scopes: Vec::new(),
            max_subject_length: 50,
        }
    }

    #[test]
    fn accepts_conventional_headers() {
        assert_eq!(lint_message("feat(grid): add inline row entry", &rules()), Vec::new());
        assert_eq!(lint_message("fix: clamp page after refresh\n", &rules()), Vec::new());
        assert_eq!(
            lint_message("feat(grid)!: drop legacy density names", &rules()),
            Vec::new()
        );
    }

    #[test]
    fn body_needs_a_blank_line_but_comments_are_ignored() {
        let ok = "# Please enter the commit message\nfix: keep selection on refresh\n\nRows that survive a refresh stay selected.\n# comment";
        assert_eq!(lint_message(ok, &rules()), Vec::new());
        assert_eq!(
            lint_message("fix: keep selection\nbody right away", &rules()),
            vec![LintViolation::MissingBlankLine]
        );
    }

    #[test]
    fn reports_type_and_subject_problems() {
        assert_eq!(
            lint_message("chore: tidy up.", &rules()),
            vec![
                LintViolation::UnknownType("chore".into()),
                LintViolation::TrailingPeriod
            ]
        );
        assert_eq!(
            lint_message("Update the grid", &rules()),
            vec![LintViolation::MalformedHeader]
        );
        assert_eq!(
            lint_message("feat(): empty scope", &rules()),
            vec![LintViolation::MalformedHeader]
        );
        assert_eq!(lint_message("# only comments\n\n", &rules()), vec![LintViolation::EmptyMessage]);
    }

    #[test]
    fn enforces_length_and_known_scopes() {
        let mut rules = rules();
        rules.scopes = vec!["grid".into(), "xtask".into()];
        let long = format!("feat(grid): {}", "x".repeat(60));
        assert_eq!(
            lint_message(&long, &rules),
            vec![LintViolation::SubjectTooLong { length: 72, max: 50 }]
        );
        assert_eq!(
            lint_message("docs(site): explain routes", &rules),
            vec![LintViolation::UnknownScope("site".into())]
        );
    }

    #[test]
    fn parse_takes_a_file_or_inline_message() {
        let file = LintCommitCommand::parse(&[".git/COMMIT_EDITMSG".to_string()]).expect("file");
        assert_eq!(file, MessageSource::File(PathBuf::from(".git/COMMIT_EDITMSG")));
        let inline = LintCommitCommand::parse(&["-m".to_string(), "fix: x".to_string()])
            .expect("inline");
        assert_eq!(inline, MessageSource::Inline("fix: x".into()));
        assert!(LintCommitCommand::parse(&[]).is_err());
    }

    #[test]
    fn rules_default_the_subject_limit() {
        let root = scratch_dir("commit-lint");
        fs::create_dir_all(root.join("tools/automation")).expect("mkdir");
        fs::write(root.join(COMMIT_LINT_FILE), "types = [\"feat\"]\n").expect("write");
        let loaded = ConfigLoader::<CommitLintRules>::new(&root, COMMIT_LINT_FILE)
            .load()
            .expect("load");
        assert_eq!(loaded.max_subject_length, 72);
        assert!(loaded.scopes.is_empty());

        let ctx = CommandContext::with_root(root);
        let err = LintCommitCommand::run(&ctx, MessageSource::Inline("fix: nope".into()))
            .expect_err("fix is not allowed");
        assert!(err.to_string().contains("allowed types: feat"));
    }
}
