//! Shared runtime used by every command family.

pub mod config;
pub mod context;
pub mod error;
pub mod process;
