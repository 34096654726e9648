//! Grid engine error types.

use thiserror::Error;

use crate::model::RowId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised by derivation and reducer transitions.
pub enum GridError {
    /// Two rows produced the same identifier.
    #[error("duplicate row id `{0}`; row ids must be unique within the data set")]
    DuplicateRowId(RowId),
    /// A caller column uses the field reserved for the synthetic actions column.
    #[error("column field `{0}` collides with the synthetic actions column")]
    ActionsColumnCollision(String),
    /// Two columns declare the same field.
    #[error("duplicate column field `{0}`")]
    DuplicateColumn(String),
    /// A transition referenced a column that does not exist.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    /// Header activation on a column that cannot sort.
    #[error("column `{0}` is not sortable")]
    NotSortable(String),
    /// A transition referenced a row that is not in the data set.
    #[error("row `{0}` not found")]
    RowNotFound(RowId),
    /// Row-level editing allows one row in edit mode at a time.
    #[error("row `{editing}` is being edited; finish it before editing `{requested}`")]
    EditInProgress {
        /// Row currently in edit mode.
        editing: RowId,
        /// Row the caller tried to edit.
        requested: RowId,
    },
    /// The row is not in edit mode.
    #[error("row `{0}` is not being edited")]
    NotEditing(RowId),
    /// A commit for the row has not settled yet.
    #[error("row `{0}` has a commit in flight")]
    CommitPending(RowId),
    /// The column is not editable.
    #[error("column `{0}` is not editable")]
    NotEditable(String),
    /// Editing is turned off in configuration.
    #[error("editing is disabled")]
    EditingDisabled,
    /// A row rejected a field write.
    #[error("field `{field}` rejected value: {reason}")]
    InvalidFieldValue {
        /// Field being written.
        field: String,
        /// Rejection reason.
        reason: String,
    },
    /// A row or bulk action id is not registered.
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    /// The row action is disabled for this row.
    #[error("action `{action}` is disabled for row `{row}`")]
    ActionDisabled {
        /// Action id.
        action: String,
        /// Row id.
        row: RowId,
    },
    /// Export serialization failed.
    #[error("export failed: {0}")]
    ExportFailed(String),
}

impl GridError {
    /// Whether the error signals a caller configuration problem rather than a rejected
    /// interaction.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRowId(_)
                | Self::ActionsColumnCollision(_)
                | Self::DuplicateColumn(_)
        )
    }
}
