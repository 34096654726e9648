//! Double-click-to-edit cell used in cell editing mode.

use data_grid_core::{
    cell_view, CellKind, EditKey, EditOutcome, EditableCellState, GridAction, GridRow, RowId,
};
use leptos::ev::{FocusEvent, KeyboardEvent};
use leptos::*;

use super::cells::{field_error, render_cell};
use super::context::DataGridContext;
use crate::primitives::bool_token;
use crate::{FieldVariant, TextField};

#[component]
pub(crate) fn EditableCell<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    field: String,
    kind: CellKind,
) -> impl IntoView {
    let raw = grid.select({
        let id = id.clone();
        let field = field.clone();
        move |state| {
            state
                .display_row(&id)
                .map(|row| row.field(&field).display())
                .unwrap_or_default()
        }
    });
    let cell = grid.select({
        let id = id.clone();
        let field = field.clone();
        move |state| {
            state.display_row(&id).and_then(|row| {
                grid.with_schema(|schema| schema.column(&field).map(|column| cell_view(column, row)))
            })
        }
    });
    let error = grid.select({
        let id = id.clone();
        let field = field.clone();
        move |state| {
            state
                .edit_errors
                .get(&id)
                .and_then(|errors| errors.get(&field).cloned())
        }
    });
    let label = grid.with_schema(|schema| {
        schema
            .column(&field)
            .map(|column| format!("Edit {}", column.header))
            .unwrap_or_else(|| format!("Edit {field}"))
    });

    let local = create_rw_signal(EditableCellState::new(raw.get_untracked()));
    let editing = create_memo(move |_| local.with(EditableCellState::is_editing));

    // Updates arriving mid-edit are held by the state machine until the edit ends.
    create_effect(move |_| {
        let value = raw.get();
        local.update(|state| state.sync(value));
    });

    let save = Callback::new(move |outcome: EditOutcome| {
        if let EditOutcome::Saved(text) = outcome {
            grid.dispatch_action(GridAction::CommitCellEdit {
                id: id.clone(),
                field: field.clone(),
                value: kind.parse_input(&text),
            });
        }
    });
    let on_input = Callback::new(move |text: String| local.update(|state| state.input(text)));
    let on_keydown = Callback::new(move |ev: KeyboardEvent| {
        let key = EditKey::from_key(&ev.key());
        if key == EditKey::Enter {
            ev.prevent_default();
        }
        if let Some(outcome) = local.try_update(|state| state.key(key)) {
            save.call(outcome);
        }
    });
    let on_blur = Callback::new(move |_: FocusEvent| {
        if let Some(outcome) = local.try_update(EditableCellState::commit) {
            save.call(outcome);
        }
    });

    view! {
        <div
            data-ui-slot="editable-cell"
            data-ui-editing=move || bool_token(editing.get())
            title="Double-click to edit"
            on:dblclick=move |_| local.update(EditableCellState::begin)
        >
            {move || {
                if editing.get() {
                    let draft = local
                        .with_untracked(|state| state.draft().unwrap_or_default().to_string());
                    view! {
                        <TextField
                            ui_slot="cell-editor"
                            variant=FieldVariant::Inset
                            autofocus=true
                            aria_label=label.clone()
                            value=draft
                            aria_invalid=Signal::derive(move || error.with(Option::is_some))
                            on_input
                            on_keydown
                            on_blur
                        />
                    }
                        .into_view()
                } else {
                    (move || cell.get().map(render_cell)).into_view()
                }
            }}
            {move || error.get().map(field_error)}
        </div>
    }
}
