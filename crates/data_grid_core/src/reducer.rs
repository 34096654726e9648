//! Grid actions, side-effect intents, and transition logic.

use crate::column::ColumnDef;
use crate::density::Density;
use crate::export::{build_artifact, ExportArtifact, ExportFormat};
use crate::model::{
    CellValue, EditMode, FieldErrors, FilterModel, GridRow, Record, RowId, RowMode, SortDirection,
};
use crate::state::{DataGridState, GridSchema, PendingCommit};
use crate::GridError;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_grid`] to mutate [`DataGridState`].
pub enum GridAction<R> {
    /// Swap in a new caller snapshot.
    ReplaceRows(Vec<R>),
    /// Toggle the loading skeleton.
    SetLoading(bool),
    /// Request fresh data from the caller.
    Refresh,
    /// Update the free-text search.
    SetSearch(String),
    /// Replace the structured filter model.
    SetFilterModel(FilterModel),
    /// Open or close the filter panel.
    ToggleFilterPanel,
    /// Header activation on a sortable column.
    ToggleSort {
        /// Column field.
        field: String,
    },
    /// Jump to a zero-based page.
    SetPage(usize),
    /// Change rows per page; resets to the first page.
    SetPageSize(usize),
    /// Flip selection membership of one row.
    ToggleRowSelection(RowId),
    /// Select every filtered row, or deselect them when all are already selected.
    ToggleSelectAll,
    /// Reset to an empty inclusion set.
    ClearSelection,
    /// Track the row under the pointer.
    SetHoveredRow(Option<RowId>),
    /// Switch density.
    SetDensity(Density),
    /// Advance to the next density preset.
    CycleDensity,
    /// Show or hide a column.
    ToggleColumnVisibility(String),
    /// Row activation outside action cells.
    RowClicked(RowId),
    /// Enter row edit mode.
    StartRowEdit(RowId),
    /// Write one field of a row draft.
    UpdateDraft {
        /// Row being edited.
        id: RowId,
        /// Field written.
        field: String,
        /// New value.
        value: CellValue,
    },
    /// Leave row edit mode without saving.
    CancelRowEdit(RowId),
    /// Validate and submit a row draft.
    CommitRowEdit(RowId),
    /// Validate and submit a single-cell edit.
    CommitCellEdit {
        /// Edited row.
        id: RowId,
        /// Edited field.
        field: String,
        /// New value.
        value: CellValue,
    },
    /// Settle an update with the caller's verdict.
    ResolveRowCommit {
        /// Row whose update settled.
        id: RowId,
        /// Authoritative row, or a rejection message.
        outcome: Result<R, String>,
    },
    /// Hide a row's commit error.
    DismissRowError(RowId),
    /// Open the inline-add draft row.
    ActivateInlineAdd,
    /// Write one inline-add field.
    UpdateInlineAddField {
        /// Field written.
        field: String,
        /// New value.
        value: CellValue,
    },
    /// Validate and emit the inline-add record.
    SubmitInlineAdd,
    /// Discard the inline-add draft.
    CancelInlineAdd,
    /// Invoke a row action.
    InvokeRowAction {
        /// Action id.
        action_id: String,
        /// Target row.
        id: RowId,
    },
    /// Invoke a bulk action over the selection.
    InvokeBulkAction {
        /// Action id.
        action_id: String,
    },
    /// Export the filtered rows.
    RequestExport(ExportFormat),
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_grid`] for the embedding runtime to execute.
pub enum GridEffect<R> {
    /// Materialized selected ids.
    SelectionChanged(Vec<RowId>),
    /// Sort state for one column.
    SortChanged {
        /// Column field.
        field: String,
        /// New direction; `None` when the sort was cleared.
        direction: Option<SortDirection>,
    },
    /// Search or structured filter changed.
    FilterChanged {
        /// Structured filter model.
        model: FilterModel,
        /// Free-text search.
        search: String,
    },
    /// Page or page size changed.
    PageChanged {
        /// Zero-based page.
        page: usize,
        /// Rows per page.
        page_size: usize,
    },
    /// Density changed.
    DensityChanged(Density),
    /// Hand an update to the caller and feed the verdict back as
    /// [`GridAction::ResolveRowCommit`].
    UpdateRow {
        /// Row id.
        id: RowId,
        /// Proposed row.
        new_row: R,
        /// Row before the edit.
        old_row: R,
    },
    /// The caller accepted an update.
    RowCommitted {
        /// Row id.
        id: RowId,
        /// Authoritative row.
        row: R,
    },
    /// The caller rejected an update; the row was reverted.
    CommitFailed {
        /// Row id.
        id: RowId,
        /// Rejection message.
        message: String,
    },
    /// A validated inline-add record.
    AddRow(Record),
    /// Deliver an export artifact.
    Export(ExportArtifact),
    /// The caller should reload data.
    RefreshRequested,
    /// Row activation.
    RowClicked {
        /// Row id.
        id: RowId,
        /// Activated row.
        row: R,
    },
    /// Run a row action handler.
    RunRowAction {
        /// Action id.
        action_id: String,
        /// Target row.
        row: R,
    },
    /// Run a bulk action handler with the materialized selection.
    RunBulkAction {
        /// Action id.
        action_id: String,
        /// Selected rows.
        rows: Vec<R>,
    },
}

/// Applies `action` to `state`.
///
/// This function is the only place grid interaction state changes. Callback invocations are
/// returned as [`GridEffect`] values rather than performed here.
///
/// # Errors
///
/// Returns [`GridError`] when an action references unknown rows, columns, or actions, or when
/// it violates an editing rule. The state is left unchanged in that case.
pub fn reduce_grid<R: GridRow>(
    state: &mut DataGridState<R>,
    schema: &GridSchema<R>,
    action: GridAction<R>,
) -> Result<Vec<GridEffect<R>>, GridError> {
    let mut effects = Vec::new();
    match action {
        GridAction::ReplaceRows(rows) => {
            let page = state.pagination.page;
            state.replace_data(rows, schema)?;
            push_page_change(state, page, &mut effects);
        }
        GridAction::SetLoading(loading) => {
            state.loading = loading;
        }
        GridAction::Refresh => {
            effects.push(GridEffect::RefreshRequested);
        }
        GridAction::SetSearch(search) => {
            if state.search != search {
                state.search = search;
                reset_page(state, &mut effects);
                effects.push(filter_changed(state));
            }
        }
        GridAction::SetFilterModel(model) => {
            if state.filter != model {
                state.filter = model;
                reset_page(state, &mut effects);
                effects.push(filter_changed(state));
            }
        }
        GridAction::ToggleFilterPanel => {
            state.filter_panel_open = !state.filter_panel_open;
        }
        GridAction::ToggleSort { field } => {
            let column = find_column(schema, &field)?;
            if !state.config.sorting.enabled || !column.sortable {
                return Err(GridError::NotSortable(field));
            }
            let direction = state.sort.toggle(&field);
            effects.push(GridEffect::SortChanged { field, direction });
        }
        GridAction::SetPage(page) => {
            let before = state.pagination.page;
            state.pagination.page = page;
            state.clamp_page();
            push_page_change(state, before, &mut effects);
        }
        GridAction::SetPageSize(page_size) => {
            let page_size = page_size.max(1);
            if state.pagination.page_size != page_size || state.pagination.page != 0 {
                state.pagination.page_size = page_size;
                state.pagination.page = 0;
                effects.push(page_changed(state));
            }
        }
        GridAction::ToggleRowSelection(id) => {
            ensure_row(state, &id)?;
            if state.config.selection.enabled {
                state.selection.toggle(&id);
                effects.push(GridEffect::SelectionChanged(state.selected_ids()));
            }
        }
        GridAction::ToggleSelectAll => {
            if state.config.selection.enabled {
                let filtered = state.filtered_ids();
                let (all, _) = state.filtered_selection();
                for id in &filtered {
                    state.selection.set(id, !all);
                }
                effects.push(GridEffect::SelectionChanged(state.selected_ids()));
            }
        }
        GridAction::ClearSelection => {
            state.selection.clear();
            effects.push(GridEffect::SelectionChanged(Vec::new()));
        }
        GridAction::SetHoveredRow(id) => {
            state.hovered = id;
        }
        GridAction::SetDensity(density) => {
            if state.density != density {
                state.density = density;
                effects.push(GridEffect::DensityChanged(density));
            }
        }
        GridAction::CycleDensity => {
            state.density = state.density.next();
            effects.push(GridEffect::DensityChanged(state.density));
        }
        GridAction::ToggleColumnVisibility(field) => {
            find_column(schema, &field)?;
            if !state.hidden_columns.remove(&field) {
                state.hidden_columns.insert(field);
            }
        }
        GridAction::RowClicked(id) => {
            let row = ensure_row(state, &id)?.clone();
            effects.push(GridEffect::RowClicked { id, row });
        }
        GridAction::StartRowEdit(id) => {
            ensure_editing(state)?;
            let row = ensure_row(state, &id)?.clone();
            if state.is_pending(&id) {
                return Err(GridError::CommitPending(id));
            }
            if state.row_mode(&id) == RowMode::Edit {
                return Ok(effects);
            }
            if state.config.editing.mode == EditMode::Row {
                if let Some(editing) = editing_row(state) {
                    return Err(GridError::EditInProgress {
                        editing,
                        requested: id,
                    });
                }
            }
            state.row_errors.remove(&id);
            state.edit_errors.remove(&id);
            state.drafts.insert(id.clone(), row);
            state.row_modes.insert(id, RowMode::Edit);
        }
        GridAction::UpdateDraft { id, field, value } => {
            let column = find_column(schema, &field)?;
            if !column.is_editable() {
                return Err(GridError::NotEditable(field));
            }
            let draft = state
                .drafts
                .get_mut(&id)
                .ok_or_else(|| GridError::NotEditing(id.clone()))?;
            draft.set_field(&field, value)?;
            if let Some(errors) = state.edit_errors.get_mut(&id) {
                errors.remove(&field);
            }
        }
        GridAction::CancelRowEdit(id) => {
            if state.drafts.remove(&id).is_none() {
                return Err(GridError::NotEditing(id));
            }
            state.row_modes.remove(&id);
            state.edit_errors.remove(&id);
        }
        GridAction::CommitRowEdit(id) => {
            let draft = state
                .drafts
                .get(&id)
                .cloned()
                .ok_or_else(|| GridError::NotEditing(id.clone()))?;
            if state.is_pending(&id) {
                return Err(GridError::CommitPending(id));
            }
            let errors = validate_row(schema, &draft);
            if !errors.is_empty() {
                state.edit_errors.insert(id, errors);
                return Ok(effects);
            }
            let old_row = ensure_row(state, &id)?.clone();
            state.drafts.remove(&id);
            state.row_modes.remove(&id);
            state.edit_errors.remove(&id);
            if draft != old_row {
                begin_commit(state, id, draft, old_row, &mut effects);
            }
        }
        GridAction::CommitCellEdit { id, field, value } => {
            ensure_editing(state)?;
            let column = find_column(schema, &field)?;
            if !column.is_editable() {
                return Err(GridError::NotEditable(field));
            }
            let old_row = ensure_row(state, &id)?.clone();
            if state.is_pending(&id) {
                return Err(GridError::CommitPending(id));
            }
            if let Some(message) = column.validate(&value, &old_row) {
                state
                    .edit_errors
                    .entry(id)
                    .or_default()
                    .insert(field, message);
                return Ok(effects);
            }
            let mut new_row = old_row.clone();
            new_row.set_field(&field, value)?;
            if let Some(errors) = state.edit_errors.get_mut(&id) {
                errors.remove(&field);
            }
            state.row_errors.remove(&id);
            if new_row != old_row {
                begin_commit(state, id, new_row, old_row, &mut effects);
            }
        }
        GridAction::ResolveRowCommit { id, outcome } => {
            // Stale verdicts for rows dropped by a data replacement are ignored.
            if state.pending.remove(&id).is_some() {
                match outcome {
                    Ok(row) => {
                        state.commit_row(&id, row.clone());
                        effects.push(GridEffect::RowCommitted { id, row });
                    }
                    Err(message) => {
                        state.row_errors.insert(id.clone(), message.clone());
                        effects.push(GridEffect::CommitFailed { id, message });
                    }
                }
            }
        }
        GridAction::DismissRowError(id) => {
            state.row_errors.remove(&id);
        }
        GridAction::ActivateInlineAdd => {
            if state.config.inline_add.enabled {
                state.inline_add.activate();
            }
        }
        GridAction::UpdateInlineAddField { field, value } => {
            state.inline_add.set_field(&field, value);
        }
        GridAction::SubmitInlineAdd => {
            let config = state.config.inline_add.clone();
            if let Some(record) = state
                .inline_add
                .submit(&config, schema.inline_add_validator())
            {
                effects.push(GridEffect::AddRow(record));
            }
        }
        GridAction::CancelInlineAdd => {
            state.inline_add.cancel();
        }
        GridAction::InvokeRowAction { action_id, id } => {
            let action = schema
                .row_action(&action_id)
                .ok_or_else(|| GridError::UnknownAction(action_id.clone()))?;
            let row = ensure_row(state, &id)?.clone();
            if action.is_disabled(&row) {
                return Err(GridError::ActionDisabled {
                    action: action_id,
                    row: id,
                });
            }
            effects.push(GridEffect::RunRowAction { action_id, row });
        }
        GridAction::InvokeBulkAction { action_id } => {
            if schema.bulk_action(&action_id).is_none() {
                return Err(GridError::UnknownAction(action_id));
            }
            effects.push(GridEffect::RunBulkAction {
                action_id,
                rows: state.selected_rows(),
            });
        }
        GridAction::RequestExport(format) => {
            let rows = state.rows();
            let derived = state.derive();
            let filtered = derived
                .filtered
                .iter()
                .map(|&index| rows[index])
                .collect::<Vec<_>>();
            let columns = state
                .visible_columns(schema)
                .into_iter()
                .filter(|column| column.is_exportable())
                .collect::<Vec<_>>();
            let artifact = build_artifact(
                format,
                &columns,
                &filtered,
                &state.config.export,
                state.config.toolbar.title.as_deref(),
            )?;
            effects.push(GridEffect::Export(artifact));
        }
    }
    Ok(effects)
}

fn find_column<'a, R: GridRow>(
    schema: &'a GridSchema<R>,
    field: &str,
) -> Result<&'a ColumnDef<R>, GridError> {
    schema
        .column(field)
        .ok_or_else(|| GridError::UnknownColumn(field.to_string()))
}

fn ensure_row<'a, R: GridRow>(
    state: &'a DataGridState<R>,
    id: &RowId,
) -> Result<&'a R, GridError> {
    state
        .row(id)
        .ok_or_else(|| GridError::RowNotFound(id.clone()))
}

fn ensure_editing<R: GridRow>(state: &DataGridState<R>) -> Result<(), GridError> {
    if state.config.editing.enabled {
        Ok(())
    } else {
        Err(GridError::EditingDisabled)
    }
}

fn editing_row<R: GridRow>(state: &DataGridState<R>) -> Option<RowId> {
    state
        .row_modes
        .iter()
        .find(|(_, mode)| **mode == RowMode::Edit)
        .map(|(id, _)| id.clone())
}

fn validate_row<R: GridRow>(schema: &GridSchema<R>, row: &R) -> FieldErrors {
    schema
        .columns()
        .iter()
        .filter(|column| column.is_editable())
        .filter_map(|column| {
            column
                .validate(&column.value(row), row)
                .map(|message| (column.field.clone(), message))
        })
        .collect()
}

fn begin_commit<R: GridRow>(
    state: &mut DataGridState<R>,
    id: RowId,
    new_row: R,
    old_row: R,
    effects: &mut Vec<GridEffect<R>>,
) {
    state.pending.insert(
        id.clone(),
        PendingCommit {
            old_row: old_row.clone(),
            new_row: new_row.clone(),
        },
    );
    effects.push(GridEffect::UpdateRow {
        id,
        new_row,
        old_row,
    });
}

fn filter_changed<R>(state: &DataGridState<R>) -> GridEffect<R> {
    GridEffect::FilterChanged {
        model: state.filter.clone(),
        search: state.search.clone(),
    }
}

fn page_changed<R>(state: &DataGridState<R>) -> GridEffect<R> {
    GridEffect::PageChanged {
        page: state.pagination.page,
        page_size: state.pagination.page_size,
    }
}

fn reset_page<R: GridRow>(state: &mut DataGridState<R>, effects: &mut Vec<GridEffect<R>>) {
    let before = state.pagination.page;
    state.pagination.page = 0;
    push_page_change(state, before, effects);
}

fn push_page_change<R: GridRow>(
    state: &DataGridState<R>,
    before: usize,
    effects: &mut Vec<GridEffect<R>>,
) {
    if state.pagination.page != before {
        effects.push(page_changed(state));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actions::{BulkAction, RowAction};
    use crate::config::DataGridConfig;
    use crate::export::ExportTarget;

    fn columns() -> Vec<ColumnDef<Record>> {
        vec![
            ColumnDef::new("name", "Name").editable(true),
            ColumnDef::new("email", "Email")
                .editable(true)
                .validator(|value, _| {
                    (!value.display().contains('@')).then(|| "Invalid email".to_string())
                }),
            ColumnDef::new("role", "Role").sortable(false),
        ]
    }

    fn people(count: usize) -> Vec<Record> {
        (0..count)
            .map(|n| {
                Record::new()
                    .with("id", n as u32)
                    .with("name", format!("Person {n:02}"))
                    .with("email", format!("p{n}@example.com"))
                    .with("role", if n % 2 == 0 { "admin" } else { "viewer" })
            })
            .collect()
    }

    fn grid(config: DataGridConfig, count: usize) -> (DataGridState<Record>, GridSchema<Record>) {
        let schema = GridSchema::builder(columns())
            .row_actions(vec![
                RowAction::new("open", "Open", "open", |_| {}),
                RowAction::new("delete", "Delete", "delete", |_| {})
                    .disabled_when(|row: &Record| row.field("role") == CellValue::from("admin")),
            ])
            .bulk_actions(vec![BulkAction::new("archive", "Archive", "archive", |_| {})])
            .build(&config)
            .expect("schema");
        let state = DataGridState::with_rows(config, &schema, people(count)).expect("state");
        (state, schema)
    }

    fn id(n: u32) -> RowId {
        RowId::from(n)
    }

    #[test]
    fn selection_survives_page_changes() {
        let (mut state, schema) = grid(DataGridConfig::default(), 60);
        reduce_grid(&mut state, &schema, GridAction::ToggleRowSelection(id(3))).expect("select");
        reduce_grid(&mut state, &schema, GridAction::SetPage(2)).expect("page");
        assert!(!state.page_ids().contains(&id(3)));
        reduce_grid(&mut state, &schema, GridAction::SetPage(0)).expect("page");
        assert!(state.is_selected(&id(3)));
    }

    #[test]
    fn select_all_covers_filtered_rows_only() {
        let (mut state, schema) = grid(DataGridConfig::default(), 10);
        reduce_grid(&mut state, &schema, GridAction::SetSearch("viewer".into())).expect("search");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::ToggleSelectAll).expect("select all");
        let expected = vec![id(1), id(3), id(5), id(7), id(9)];
        assert_eq!(effects, vec![GridEffect::SelectionChanged(expected.clone())]);

        reduce_grid(&mut state, &schema, GridAction::SetSearch(String::new())).expect("search");
        assert_eq!(state.selected_ids(), expected);

        reduce_grid(&mut state, &schema, GridAction::SetSearch("viewer".into())).expect("search");
        reduce_grid(&mut state, &schema, GridAction::ToggleSelectAll).expect("deselect all");
        assert!(state.selected_ids().is_empty());
    }

    #[test]
    fn clear_selection_always_notifies() {
        let (mut state, schema) = grid(DataGridConfig::default(), 3);
        let effects = reduce_grid(&mut state, &schema, GridAction::ClearSelection).expect("clear");
        assert_eq!(effects, vec![GridEffect::SelectionChanged(Vec::new())]);
    }

    #[test]
    fn sort_cycle_emits_direction_and_rejects_unsortable_columns() {
        let (mut state, schema) = grid(DataGridConfig::default(), 3);
        let toggle = |state: &mut DataGridState<Record>| {
            reduce_grid(
                state,
                &schema,
                GridAction::ToggleSort {
                    field: "name".into(),
                },
            )
            .expect("sort")
        };
        assert_eq!(
            toggle(&mut state),
            vec![GridEffect::SortChanged {
                field: "name".into(),
                direction: Some(SortDirection::Asc),
            }]
        );
        toggle(&mut state);
        assert_eq!(
            toggle(&mut state),
            vec![GridEffect::SortChanged {
                field: "name".into(),
                direction: None,
            }]
        );
        assert_eq!(
            reduce_grid(
                &mut state,
                &schema,
                GridAction::ToggleSort {
                    field: "role".into(),
                },
            ),
            Err(GridError::NotSortable("role".into()))
        );
        assert_eq!(
            reduce_grid(
                &mut state,
                &schema,
                GridAction::ToggleSort {
                    field: "actions".into(),
                },
            ),
            Err(GridError::NotSortable("actions".into()))
        );
    }

    #[test]
    fn search_resets_page_and_page_is_clamped() {
        let (mut state, schema) = grid(DataGridConfig::default(), 60);
        let effects = reduce_grid(&mut state, &schema, GridAction::SetPage(9)).expect("page");
        assert_eq!(
            effects,
            vec![GridEffect::PageChanged {
                page: 2,
                page_size: 25,
            }]
        );
        let effects =
            reduce_grid(&mut state, &schema, GridAction::SetSearch("Person 0".into()))
                .expect("search");
        assert_eq!(state.pagination.page, 0);
        assert_eq!(effects.len(), 2);
        assert_eq!(state.derive().total(), 10);
    }

    #[test]
    fn out_of_range_page_clamps_to_last_page() {
        let (mut state, schema) = grid(DataGridConfig::default(), 60);
        let effects =
            reduce_grid(&mut state, &schema, GridAction::SetPage(usize::MAX)).expect("page");
        assert_eq!(state.pagination.page, 2);
        assert_eq!(
            effects,
            vec![GridEffect::PageChanged {
                page: 2,
                page_size: 25,
            }]
        );
        assert_eq!(state.page_ids().len(), 10);
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let (mut state, schema) = grid(DataGridConfig::default(), 60);
        reduce_grid(&mut state, &schema, GridAction::SetPage(1)).expect("page");
        let effects = reduce_grid(&mut state, &schema, GridAction::SetPageSize(50)).expect("size");
        assert_eq!(
            effects,
            vec![GridEffect::PageChanged {
                page: 0,
                page_size: 50,
            }]
        );
    }

    #[test]
    fn cell_commit_is_optimistic_until_resolved() {
        let (mut state, schema) = grid(DataGridConfig::default(), 3);
        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::CommitCellEdit {
                id: id(1),
                field: "name".into(),
                value: "Renamed".into(),
            },
        )
        .expect("commit");
        let (new_row, old_row) = match effects.as_slice() {
            [GridEffect::UpdateRow {
                new_row, old_row, ..
            }] => (new_row.clone(), old_row.clone()),
            other => panic!("unexpected effects {other:?}"),
        };
        assert_eq!(old_row.field("name"), CellValue::from("Person 01"));
        assert!(state.is_pending(&id(1)));
        assert_eq!(
            state.row(&id(1)).map(|row| row.field("name")),
            Some(CellValue::from("Renamed"))
        );

        let authoritative = new_row.with("name", "RENAMED");
        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::ResolveRowCommit {
                id: id(1),
                outcome: Ok(authoritative.clone()),
            },
        )
        .expect("resolve");
        assert_eq!(
            effects,
            vec![GridEffect::RowCommitted {
                id: id(1),
                row: authoritative.clone(),
            }]
        );
        assert_eq!(state.row(&id(1)), Some(&authoritative));
    }

    #[test]
    fn rejected_commit_reverts_and_keeps_grid_interactive() {
        let (mut state, schema) = grid(DataGridConfig::default(), 3);
        reduce_grid(
            &mut state,
            &schema,
            GridAction::CommitCellEdit {
                id: id(0),
                field: "name".into(),
                value: "Bad".into(),
            },
        )
        .expect("commit");
        assert_eq!(
            reduce_grid(
                &mut state,
                &schema,
                GridAction::CommitCellEdit {
                    id: id(0),
                    field: "name".into(),
                    value: "Again".into(),
                },
            ),
            Err(GridError::CommitPending(id(0)))
        );

        // Other rows stay editable while one commit is in flight.
        let other = reduce_grid(
            &mut state,
            &schema,
            GridAction::CommitCellEdit {
                id: id(2),
                field: "name".into(),
                value: "Fine".into(),
            },
        )
        .expect("other row");
        assert_eq!(other.len(), 1);

        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::ResolveRowCommit {
                id: id(0),
                outcome: Err("name taken".into()),
            },
        )
        .expect("resolve");
        assert_eq!(
            effects,
            vec![GridEffect::CommitFailed {
                id: id(0),
                message: "name taken".into(),
            }]
        );
        assert_eq!(
            state.row(&id(0)).map(|row| row.field("name")),
            Some(CellValue::from("Person 00"))
        );
        assert_eq!(state.row_errors.get(&id(0)).map(String::as_str), Some("name taken"));

        reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(0))).expect("edit again");
        assert!(state.row_errors.get(&id(0)).is_none());
    }

    #[test]
    fn cell_validator_records_error_without_commit() {
        let (mut state, schema) = grid(DataGridConfig::default(), 2);
        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::CommitCellEdit {
                id: id(1),
                field: "email".into(),
                value: "nope".into(),
            },
        )
        .expect("validated");
        assert!(effects.is_empty());
        assert_eq!(
            state
                .edit_errors
                .get(&id(1))
                .and_then(|errors| errors.get("email"))
                .map(String::as_str),
            Some("Invalid email")
        );
        assert!(!state.is_pending(&id(1)));
    }

    #[test]
    fn row_mode_allows_one_row_at_a_time() {
        let mut config = DataGridConfig::default();
        config.editing.mode = EditMode::Row;
        let (mut state, schema) = grid(config, 3);
        reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(0))).expect("edit");
        assert_eq!(
            reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(1))),
            Err(GridError::EditInProgress {
                editing: id(0),
                requested: id(1),
            })
        );

        reduce_grid(
            &mut state,
            &schema,
            GridAction::UpdateDraft {
                id: id(0),
                field: "email".into(),
                value: "broken".into(),
            },
        )
        .expect("draft");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::CommitRowEdit(id(0))).expect("commit");
        assert!(effects.is_empty());
        assert_eq!(state.row_mode(&id(0)), RowMode::Edit);

        reduce_grid(&mut state, &schema, GridAction::CancelRowEdit(id(0))).expect("cancel");
        assert_eq!(state.row_mode(&id(0)), RowMode::View);
        reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(1))).expect("edit next");
    }

    #[test]
    fn cell_mode_allows_concurrent_row_edits() {
        let (mut state, schema) = grid(DataGridConfig::default(), 3);
        reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(0))).expect("edit");
        reduce_grid(&mut state, &schema, GridAction::StartRowEdit(id(1))).expect("edit");
        assert_eq!(state.row_mode(&id(1)), RowMode::Edit);
    }

    #[test]
    fn disabled_row_action_is_rejected() {
        let (mut state, schema) = grid(DataGridConfig::default(), 2);
        assert_eq!(
            reduce_grid(
                &mut state,
                &schema,
                GridAction::InvokeRowAction {
                    action_id: "delete".into(),
                    id: id(0),
                },
            ),
            Err(GridError::ActionDisabled {
                action: "delete".into(),
                row: id(0),
            })
        );
        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::InvokeRowAction {
                action_id: "delete".into(),
                id: id(1),
            },
        )
        .expect("invoke");
        assert!(matches!(effects.as_slice(), [GridEffect::RunRowAction { .. }]));
    }

    #[test]
    fn bulk_action_receives_selected_rows() {
        let (mut state, schema) = grid(DataGridConfig::default(), 5);
        reduce_grid(&mut state, &schema, GridAction::ToggleRowSelection(id(4))).expect("select");
        reduce_grid(&mut state, &schema, GridAction::ToggleRowSelection(id(2))).expect("select");
        let effects = reduce_grid(
            &mut state,
            &schema,
            GridAction::InvokeBulkAction {
                action_id: "archive".into(),
            },
        )
        .expect("bulk");
        let rows = people(5);
        assert_eq!(
            effects,
            vec![GridEffect::RunBulkAction {
                action_id: "archive".into(),
                rows: vec![rows[2].clone(), rows[4].clone()],
            }]
        );
    }

    #[test]
    fn json_export_contains_filtered_rows_only() {
        let (mut state, schema) = grid(DataGridConfig::default(), 10);
        reduce_grid(&mut state, &schema, GridAction::SetSearch("Person 0".into())).expect("search");
        reduce_grid(&mut state, &schema, GridAction::SetSearch("p1@".into())).expect("search");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::RequestExport(ExportFormat::Json))
                .expect("export");
        let [GridEffect::Export(artifact)] = effects.as_slice() else {
            panic!("unexpected effects {effects:?}");
        };
        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&artifact.contents).expect("json array");
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            artifact.target,
            ExportTarget::Download {
                file_name: "export.json".into(),
                mime_type: "application/json",
            }
        );
    }

    #[test]
    fn export_of_three_matching_rows_out_of_ten() {
        let mut rows = people(10);
        for row in rows.iter_mut().take(3) {
            row.insert("name", "Needle");
        }
        let (mut state, schema) = grid(DataGridConfig::default(), 0);
        reduce_grid(&mut state, &schema, GridAction::ReplaceRows(rows)).expect("rows");
        reduce_grid(&mut state, &schema, GridAction::SetSearch("needle".into())).expect("search");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::RequestExport(ExportFormat::Json))
                .expect("export");
        let [GridEffect::Export(artifact)] = effects.as_slice() else {
            panic!("unexpected effects {effects:?}");
        };
        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&artifact.contents).expect("json array");
        assert_eq!(parsed.len(), 3);
        assert_eq!(artifact.row_count, 3);
    }

    #[test]
    fn json_export_keeps_integers_and_field_order() {
        let rows: Vec<Record> =
            serde_json::from_str(r#"[{"id": 1, "name": "Ada", "score": 36, "ratio": 0.5}]"#)
                .expect("rows");
        let (mut state, schema) = grid(DataGridConfig::default(), 0);
        reduce_grid(&mut state, &schema, GridAction::ReplaceRows(rows)).expect("rows");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::RequestExport(ExportFormat::Json))
                .expect("export");
        let [GridEffect::Export(artifact)] = effects.as_slice() else {
            panic!("unexpected effects {effects:?}");
        };
        assert_eq!(
            artifact.contents,
            "[\n  {\n    \"id\": 1,\n    \"name\": \"Ada\",\n    \"score\": 36,\n    \"ratio\": 0.5\n  }\n]"
        );
    }

    #[test]
    fn clipboard_export_skips_hidden_and_action_columns() {
        let (mut state, schema) = grid(DataGridConfig::default(), 1);
        reduce_grid(
            &mut state,
            &schema,
            GridAction::ToggleColumnVisibility("role".into()),
        )
        .expect("hide");
        let effects =
            reduce_grid(&mut state, &schema, GridAction::RequestExport(ExportFormat::Clipboard))
                .expect("export");
        let [GridEffect::Export(artifact)] = effects.as_slice() else {
            panic!("unexpected effects {effects:?}");
        };
        assert_eq!(artifact.contents, "Name\tEmail\nPerson 00\tp0@example.com");
    }

    #[test]
    fn inline_add_emits_merged_record() {
        let mut config = DataGridConfig::default();
        config.inline_add.enabled = true;
        config.inline_add.required_fields = vec!["email".into()];
        config.inline_add.default_values = Record::new().with("role", "viewer");
        let (mut state, schema) = grid(config, 1);

        reduce_grid(&mut state, &schema, GridAction::ActivateInlineAdd).expect("activate");
        reduce_grid(
            &mut state,
            &schema,
            GridAction::UpdateInlineAddField {
                field: "name".into(),
                value: "New".into(),
            },
        )
        .expect("field");
        assert!(reduce_grid(&mut state, &schema, GridAction::SubmitInlineAdd)
            .expect("submit")
            .is_empty());
        reduce_grid(
            &mut state,
            &schema,
            GridAction::UpdateInlineAddField {
                field: "email".into(),
                value: "new@x.io".into(),
            },
        )
        .expect("field");
        let effects = reduce_grid(&mut state, &schema, GridAction::SubmitInlineAdd).expect("submit");
        assert_eq!(
            effects,
            vec![GridEffect::AddRow(
                Record::new()
                    .with("email", "new@x.io")
                    .with("name", "New")
                    .with("role", "viewer")
            )]
        );
        assert!(!state.inline_add.is_active());
    }

    #[test]
    fn density_cycle_emits_change() {
        let (mut state, schema) = grid(DataGridConfig::default(), 1);
        let effects = reduce_grid(&mut state, &schema, GridAction::CycleDensity).expect("cycle");
        assert_eq!(effects, vec![GridEffect::DensityChanged(Density::Comfortable)]);
    }

    #[test]
    fn unknown_row_is_an_error() {
        let (mut state, schema) = grid(DataGridConfig::default(), 1);
        assert_eq!(
            reduce_grid(&mut state, &schema, GridAction::RowClicked(id(99))),
            Err(GridError::RowNotFound(id(99)))
        );
    }
}
