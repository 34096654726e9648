//! Categorized error type for xtask commands.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result alias used throughout xtask.
pub type XtaskResult<T> = Result<T, XtaskError>;

/// Broad failure category, used to pick the message prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    /// Missing or malformed configuration file.
    Config,
    /// The workspace or host environment is not usable.
    Environment,
    /// A child process could not be started.
    ProcessLaunch,
    /// A child process exited unsuccessfully.
    ProcessExit,
    /// User input or checked content was rejected.
    Validation,
    /// Filesystem failure.
    Io,
}

impl ErrorCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Environment => "environment",
            Self::ProcessLaunch => "process launch",
            Self::ProcessExit => "process exit",
            Self::Validation => "validation",
            Self::Io => "io",
        }
    }
}

/// Error reported to the user with optional path and remediation hint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    category: ErrorCategory,
    message: String,
    path: Option<PathBuf>,
    hint: Option<String>,
}

impl XtaskError {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            path: None,
            hint: None,
        }
    }

    /// Configuration failure.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Config, message)
    }

    /// Environment failure.
    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Environment, message)
    }

    /// Child process could not be spawned.
    pub fn process_launch(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ProcessLaunch, message)
    }

    /// Child process returned a failing status.
    pub fn process_exit(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ProcessExit, message)
    }

    /// Rejected input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    /// Filesystem failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Io, message)
    }

    /// Attaches the file or directory involved.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Failure category.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }
}

impl fmt::Display for XtaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.label(), self.message)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

impl From<io::Error> for XtaskError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_path_and_hint() {
        let err = XtaskError::config("missing default profile")
            .with_path("tools/automation/verify_profiles.toml")
            .with_hint("add `default = \"full\"`");
        assert_eq!(
            err.to_string(),
            "config: missing default profile (tools/automation/verify_profiles.toml)\n  hint: add `default = \"full\"`"
        );
    }

    #[test]
    fn io_errors_convert_to_io_category() {
        let err: XtaskError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.to_string(), "io: gone");
    }
}
