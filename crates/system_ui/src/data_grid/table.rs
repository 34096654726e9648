//! Table region: header row, keyed body rows, inline-add row, and the empty state.

use data_grid_core::config::InlineAddPosition;
use data_grid_core::model::{EditMode, RowMode, SortDirection};
use data_grid_core::{DerivedIds, GridAction, GridRow, RowId};
use leptos::ev::MouseEvent;
use leptos::*;

use super::cells::GridCell;
use super::column_style;
use super::context::DataGridContext;
use super::inline_add::InlineAddRow;
use crate::primitives::bool_token;
use crate::{
    Button, ButtonSize, ButtonVariant, CheckboxField, Cluster, DataTable, EmptyState, Icon,
    IconButton, IconName, IconSize, Text, TextRole, TextTone,
};

#[component]
pub(crate) fn GridTable<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let (selectable, inline_add, position, empty_message, label) =
        grid.state.with_untracked(|state| {
            let config = &state.config;
            (
                config.selection.enabled && config.selection.checkbox,
                config.inline_add.enabled,
                config.inline_add.position,
                config.empty_message.clone(),
                config
                    .toolbar
                    .title
                    .clone()
                    .unwrap_or_else(|| "Data grid".to_string()),
            )
        });

    let empty_message = store_value(empty_message);

    let fields = grid.select(move |state| {
        grid.with_schema(|schema| {
            state
                .visible_columns(schema)
                .into_iter()
                .map(|column| column.field.clone())
                .collect::<Vec<_>>()
        })
    });
    let page_ids = create_memo(move |_| grid.derived.with(|derived| derived.page.clone()));
    let total = create_memo(move |_| grid.derived.with(DerivedIds::total));
    let busy = grid.select(|state| !state.pending.is_empty());
    let colspan = Signal::derive(move || fields.with(Vec::len) + usize::from(selectable));

    let inline_row = move |at: InlineAddPosition| {
        (inline_add && position == at).then(|| view! { <InlineAddRow grid colspan /> })
    };

    view! {
        <DataTable
            layout_class="ui-data-grid-table"
            aria_label=label
            aria_rowcount=total
            aria_busy=busy
        >
            <thead>
                <GridHeader grid fields selectable />
            </thead>
            <tbody>
                {inline_row(InlineAddPosition::Top)}
                <For
                    each=move || page_ids.get()
                    key=|id| id.clone()
                    children=move |id| view! { <GridBodyRow grid id fields selectable colspan /> }
                />
                <Show when=move || page_ids.with(Vec::is_empty)>
                    <tr data-ui-slot="empty-row">
                        <td colspan=move || colspan.get()>
                            <EmptyState>{empty_message.get_value()}</EmptyState>
                        </td>
                    </tr>
                </Show>
                {inline_row(InlineAddPosition::Bottom)}
            </tbody>
        </DataTable>
    }
}

#[component]
fn GridHeader<R: GridRow>(
    grid: DataGridContext<R>,
    fields: Memo<Vec<String>>,
    selectable: bool,
) -> impl IntoView {
    let selection = create_memo(move |_| {
        grid.derived
            .with(|derived| grid.state.with(|state| state.selection_over(&derived.filtered)))
    });

    view! {
        <tr data-ui-slot="header-row">
            {selectable
                .then(|| {
                    view! {
                        <th scope="col" data-ui-slot="select-cell">
                            <CheckboxField
                                aria_label="Select all rows"
                                checked=Signal::derive(move || selection.get().0)
                                indeterminate=Signal::derive(move || {
                                    let (all, some) = selection.get();
                                    some && !all
                                })
                                on_toggle=Callback::new(move |_| {
                                    grid.dispatch_action(GridAction::ToggleSelectAll)
                                })
                            />
                        </th>
                    }
                })}
            <For
                each=move || fields.get()
                key=|field| field.clone()
                children=move |field| view! { <HeaderCell grid field /> }
            />
        </tr>
    }
}

struct HeaderMeta {
    header: String,
    kind: &'static str,
    style: Option<String>,
    pinned: Option<&'static str>,
    sortable: bool,
    numeric: bool,
}

#[component]
fn HeaderCell<R: GridRow>(grid: DataGridContext<R>, field: String) -> impl IntoView {
    let sorting = grid.state.with_untracked(|state| state.config.sorting.enabled);
    let Some(meta) = grid.with_schema(|schema| {
        schema.column(&field).map(|column| HeaderMeta {
            header: column.header.clone(),
            kind: column.kind.token(),
            style: column_style(column.width, column.flex),
            pinned: column.pinned.map(|pin| pin.token()),
            sortable: sorting && column.sortable && !column.is_actions(),
            numeric: column.kind.is_numeric(),
        })
    }) else {
        return ().into_view();
    };

    let direction = grid.select({
        let field = field.clone();
        move |state| state.sort.direction_for(&field)
    });
    let HeaderMeta {
        header,
        kind,
        style,
        pinned,
        sortable,
        numeric,
    } = meta;

    let content = if sortable {
        let label = format!("Sort by {header}");
        view! {
            <Button
                variant=ButtonVariant::Quiet
                size=ButtonSize::Sm
                ui_slot="sort-trigger"
                aria_label=label
                on_click=Callback::new(move |_| {
                    grid.dispatch_action(GridAction::ToggleSort {
                        field: field.clone(),
                    })
                })
            >
                {header}
                {move || view! { <Icon icon=sort_icon(direction.get()) size=IconSize::Xs /> }}
            </Button>
        }
        .into_view()
    } else {
        header.into_view()
    };

    view! {
        <th
            scope="col"
            data-ui-slot="header-cell"
            data-ui-kind=kind
            data-ui-pinned=pinned
            data-ui-align=if numeric { "end" } else { "start" }
            aria-sort=move || aria_sort(direction.get())
            style=style
        >
            {content}
        </th>
    }
    .into_view()
}

#[component]
fn GridBodyRow<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    fields: Memo<Vec<String>>,
    selectable: bool,
    colspan: Signal<usize>,
) -> impl IntoView {
    let row_editing = grid.state.with_untracked(|state| {
        state.config.editing.enabled && state.config.editing.mode == EditMode::Row
    });

    let watch = |project: fn(&data_grid_core::DataGridState<R>, &RowId) -> bool| {
        let id = id.clone();
        grid.select(move |state| project(state, &id))
    };
    let selected = watch(|state, id| state.is_selected(id));
    let hovered = watch(|state, id| state.hovered.as_ref() == Some(id));
    let pending = watch(|state, id| state.is_pending(id));
    let editing = watch(|state, id| state.row_mode(id) == RowMode::Edit);
    let row_error = grid.select({
        let id = id.clone();
        move |state| state.row_errors.get(&id).cloned()
    });

    let on_enter = {
        let id = id.clone();
        move |_: MouseEvent| {
            if !hovered.get_untracked() {
                grid.dispatch_action(GridAction::SetHoveredRow(Some(id.clone())));
            }
        }
    };
    let on_click = {
        let id = id.clone();
        move |_: MouseEvent| grid.dispatch_action(GridAction::RowClicked(id.clone()))
    };
    let on_dblclick = {
        let id = id.clone();
        move |_: MouseEvent| {
            if row_editing && !editing.get_untracked() {
                grid.dispatch_action(GridAction::StartRowEdit(id.clone()));
            }
        }
    };

    let select_cell = selectable.then(|| {
        let id = id.clone();
        view! {
            <td data-ui-slot="select-cell">
                <CheckboxField
                    aria_label=format!("Select row {id}")
                    checked=selected
                    on_toggle=Callback::new(move |_| {
                        grid.dispatch_action(GridAction::ToggleRowSelection(id.clone()))
                    })
                />
            </td>
        }
    });

    let cell_id = id.clone();
    let controls_id = id.clone();
    let error_id = id.clone();

    view! {
        <tr
            data-ui-slot="row"
            data-row-id=id.to_string()
            data-ui-selected=move || bool_token(selected.get())
            data-ui-hovered=move || bool_token(hovered.get())
            data-ui-pending=move || bool_token(pending.get())
            data-ui-mode=move || if editing.get() { "edit" } else { "view" }
            aria-selected=move || bool_token(selected.get())
            on:mouseenter=on_enter
            on:click=on_click
            on:dblclick=on_dblclick
        >
            {select_cell}
            <For
                each=move || fields.get()
                key=|field| field.clone()
                children=move |field| view! { <GridCell grid id=cell_id.clone() field /> }
            />
        </tr>
        <Show when=move || editing.get()>
            <RowEditControls grid id=controls_id.clone() colspan />
        </Show>
        {move || {
            row_error
                .get()
                .map(|message| {
                    let id = error_id.clone();
                    view! {
                        <tr data-ui-slot="row-error">
                            <td colspan=move || colspan.get()>
                                <Cluster>
                                    <Icon icon=IconName::Warning size=IconSize::Xs />
                                    <Text role=TextRole::Caption tone=TextTone::Danger>
                                        {message}
                                    </Text>
                                    <IconButton
                                        icon=IconName::Dismiss
                                        aria_label="Dismiss error"
                                        size=ButtonSize::Sm
                                        on_click=Callback::new(move |ev: MouseEvent| {
                                            ev.stop_propagation();
                                            grid.dispatch_action(GridAction::DismissRowError(id.clone()));
                                        })
                                    />
                                </Cluster>
                            </td>
                        </tr>
                    }
                })
        }}
    }
}

#[component]
fn RowEditControls<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    colspan: Signal<usize>,
) -> impl IntoView {
    let invalid = grid.select({
        let id = id.clone();
        move |state| state.edit_errors.get(&id).map_or(0, |errors| errors.len())
    });
    let cancel_id = id.clone();

    view! {
        <tr data-ui-slot="row-edit-controls">
            <td colspan=move || colspan.get()>
                <Cluster>
                    <Button
                        variant=ButtonVariant::Primary
                        size=ButtonSize::Sm
                        leading_icon=IconName::Checkmark
                        on_click=Callback::new(move |_| {
                            grid.dispatch_action(GridAction::CommitRowEdit(id.clone()))
                        })
                    >
                        "Save"
                    </Button>
                    <Button
                        variant=ButtonVariant::Quiet
                        size=ButtonSize::Sm
                        on_click=Callback::new(move |_| {
                            grid.dispatch_action(GridAction::CancelRowEdit(cancel_id.clone()))
                        })
                    >
                        "Cancel"
                    </Button>
                    {move || {
                        let count = invalid.get();
                        (count > 0)
                            .then(|| {
                                view! {
                                    <Text role=TextRole::Caption tone=TextTone::Danger>
                                        {format!("{count} field(s) need attention")}
                                    </Text>
                                }
                            })
                    }}
                </Cluster>
            </td>
        </tr>
    }
}

/// `aria-sort` token for a header.
pub(crate) fn aria_sort(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "ascending",
        Some(SortDirection::Desc) => "descending",
        None => "none",
    }
}

/// Sort indicator glyph; unsorted headers show the neutral arrow pair.
pub(crate) fn sort_icon(direction: Option<SortDirection>) -> IconName {
    match direction {
        Some(SortDirection::Asc) => IconName::ArrowUp,
        Some(SortDirection::Desc) => IconName::ArrowDown,
        None => IconName::ArrowSort,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sort_state_maps_to_aria_and_glyph() {
        assert_eq!(aria_sort(Some(SortDirection::Asc)), "ascending");
        assert_eq!(aria_sort(Some(SortDirection::Desc)), "descending");
        assert_eq!(aria_sort(None), "none");
        assert_eq!(sort_icon(Some(SortDirection::Desc)), IconName::ArrowDown);
        assert_eq!(sort_icon(None), IconName::ArrowSort);
    }
}
