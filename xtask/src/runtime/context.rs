//! Per-invocation context handed to commands.

use std::path::{Path, PathBuf};

use crate::runtime::error::{XtaskError, XtaskResult};
use crate::runtime::process::ProcessRunner;

/// Workspace root plus the process runner.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    process: ProcessRunner,
}

impl CommandContext {
    /// Resolves the workspace root as the parent of the xtask manifest directory.
    pub fn new() -> XtaskResult<Self> {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let root = manifest_dir.parent().map(Path::to_path_buf).ok_or_else(|| {
            XtaskError::environment("xtask manifest has no parent directory")
                .with_path(&manifest_dir)
        })?;
        Ok(Self::with_root(root))
    }

    /// Context rooted at an explicit directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            root,
            process: ProcessRunner::new(),
        }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared process runner.
    pub fn process(&self) -> &ProcessRunner {
        &self.process
    }
}
