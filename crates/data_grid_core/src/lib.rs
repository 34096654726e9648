//! Headless interactive data-grid engine.
//!
//! The crate owns everything about a data grid that is independent of a UI runtime: the row and
//! column contract, density tokens, configuration, search/filter/sort/paginate derivation, the
//! reducer that drives interaction state, export artifacts, cell view models, and the
//! editable-cell and inline-add state machines.
//!
//! Renderers feed [`GridAction`] values through [`reduce_grid`] and execute the returned
//! [`GridEffect`] intents; [`GridCallbacks::notify`] and [`settle_commit`] cover the parts of
//! that execution that need no browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod actions;
pub mod callbacks;
pub mod cells;
pub mod column;
pub mod config;
pub mod density;
pub mod derive;
pub mod editing;
mod error;
pub mod export;
pub mod inline_add;
pub mod model;
pub mod reducer;
pub mod skeleton;
pub mod state;
pub mod toolbar;

pub use actions::{ActionDisabled, ActionTone, BulkAction, RowAction};
pub use callbacks::{settle_commit, GridCallbacks, RowUpdateFuture};
pub use cells::{cell_view, CellKind, CellView, CurrencyError, CurrencyFormatter};
pub use column::{derive_columns, ColumnDef};
pub use config::DataGridConfig;
pub use density::{Density, DensityTokens, ThemeMode};
pub use derive::DerivedRows;
pub use editing::{EditKey, EditOutcome, EditableCellState};
pub use error::GridError;
pub use export::{ExportArtifact, ExportFormat, ExportTarget};
pub use inline_add::{InlineAddKey, InlineAddState};
pub use model::{CellValue, GridRow, Record, RowId};
pub use reducer::{reduce_grid, GridAction, GridEffect};
pub use skeleton::SkeletonLayout;
pub use state::{DataGridState, DerivationKey, DerivedIds, GridSchema};
pub use toolbar::{toolbar_model, ToolbarModel};
