//! Command families.

pub mod lint_commit;
pub mod verify;
