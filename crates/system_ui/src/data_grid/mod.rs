//! Interactive data grid: the orchestrator component and its leaf renderers.
//!
//! [`DataGrid`] owns one [`DataGridContext`]: the reducer state, the schema, and the effect
//! queue. Leaf components read the state through memoized projections and report every
//! interaction as a [`data_grid_core::GridAction`].

use std::cell::Cell;
use std::rc::Rc;

use data_grid_core::inline_add::RecordValidator;
use data_grid_core::model::RowIdFn;
use data_grid_core::{
    BulkAction, ColumnDef, DataGridConfig, DensityTokens, GridAction, GridCallbacks, GridRow,
    GridSchema, Record, RowAction,
};
use leptos::*;

use crate::primitives::merge_layout_class;
use crate::{EmptyState, TextTone};

mod actions_cell;
mod browser;
mod cells;
mod context;
mod editable_cell;
mod effect_executor;
mod filter_panel;
mod inline_add;
mod pager;
mod skeleton;
mod table;
mod toolbar;

pub use context::DataGridContext;

use filter_panel::FilterPanel;
use pager::GridPager;
use skeleton::GridSkeleton;
use table::GridTable;
use toolbar::DataGridToolbar;

#[component]
/// Interactive data grid over caller-owned rows.
///
/// Rows are treated as immutable snapshots: edits, additions, and actions are reported through
/// `callbacks`, and the caller answers by updating `rows`.
pub fn DataGrid<R>(
    /// Caller rows. A new value replaces the grid's data wholesale.
    #[prop(into)]
    rows: MaybeSignal<Vec<R>>,
    /// Declared columns; an actions column is appended when `row_actions` is non-empty.
    columns: Vec<ColumnDef<R>>,
    /// Configuration surface; omitted sections use their defaults.
    #[prop(optional)]
    config: DataGridConfig,
    /// Renders the loading skeleton while true.
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    /// Row identifier; defaults to the `id` field.
    #[prop(optional)]
    row_id: Option<RowIdFn<R>>,
    /// Per-row actions.
    #[prop(optional)]
    row_actions: Vec<RowAction<R>>,
    /// Actions over the selected rows.
    #[prop(optional)]
    bulk_actions: Vec<BulkAction<R>>,
    /// Extra inline-add validation run after required-field checks.
    #[prop(optional)]
    inline_add_validator: Option<RecordValidator>,
    /// Caller listeners.
    #[prop(optional)]
    callbacks: GridCallbacks<R>,
    /// Extra class appended to the root element.
    #[prop(optional)]
    layout_class: Option<&'static str>,
) -> impl IntoView
where
    R: GridRow,
{
    let mut builder = GridSchema::builder(columns)
        .row_actions(row_actions)
        .bulk_actions(bulk_actions);
    if let Some(row_id) = row_id {
        builder = builder.row_id(move |row: &R| row_id(row));
    }
    if let Some(validator) = inline_add_validator {
        builder = builder.inline_add_validator(move |record: &Record| validator(record));
    }

    let schema = match builder.build(&config) {
        Ok(schema) => schema,
        Err(err) => {
            logging::warn!("data grid configuration error: {err}");
            return view! {
                <EmptyState tone=TextTone::Danger role="alert" layout_class="ui-data-grid-error">
                    {format!("Grid configuration error: {err}")}
                </EmptyState>
            }
            .into_view();
        }
    };

    let theme = config.theme;
    let show_toolbar = config.toolbar.visible;
    let show_pager = config.pagination.enabled;
    let grid = DataGridContext::new(config, schema, callbacks);

    let alive = Rc::new(Cell::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.set(false)
    });
    effect_executor::install(grid, alive);

    create_effect(move |_| grid.dispatch_action(GridAction::ReplaceRows(rows.get())));
    create_effect(move |_| grid.dispatch_action(GridAction::SetLoading(loading.get())));

    let density = grid.select(|state| state.density);
    let loading = grid.select(|state| state.loading);
    let filter_open = grid.select(|state| state.filter_panel_open);

    view! {
        <div
            class=merge_layout_class("ui-data-grid", layout_class)
            data-ui-primitive="true"
            data-ui-kind="data-grid"
            data-ui-density=move || density.get().token()
            data-ui-theme=theme.token()
            style=move || density_style(density.get().tokens())
            on:mouseleave=move |_| grid.dispatch_action(GridAction::SetHoveredRow(None))
        >
            {show_toolbar.then(|| view! { <DataGridToolbar grid /> })}
            <Show when=move || filter_open.get()>
                <FilterPanel grid />
            </Show>
            {move || {
                grid.error
                    .get()
                    .map(|message| {
                        view! {
                            <EmptyState tone=TextTone::Danger role="alert">
                                {message}
                            </EmptyState>
                        }
                    })
            }}
            <Show when=move || !loading.get() fallback=move || view! { <GridSkeleton grid /> }>
                <GridTable grid />
            </Show>
            {show_pager.then(|| view! { <GridPager grid /> })}
        </div>
    }
    .into_view()
}

/// CSS custom properties carrying one density preset.
pub(crate) fn density_style(tokens: &DensityTokens) -> String {
    format!(
        "--grid-row-height: {}px; --grid-header-height: {}px; --grid-font-size: {}px; \
         --grid-icon-size: {}px; --grid-avatar-size: {}px; --grid-cell-padding-x: {}px; \
         --grid-chip-height: {}px",
        tokens.row_height,
        tokens.header_height,
        tokens.font_size,
        tokens.icon_size,
        tokens.avatar_size,
        tokens.cell_padding_x,
        tokens.chip_height,
    )
}

/// Inline sizing for a column: fixed width wins over flex.
pub(crate) fn column_style(width: Option<u32>, flex: Option<f32>) -> Option<String> {
    match (width, flex) {
        (Some(width), _) => Some(format!("width: {width}px; min-width: {width}px")),
        (None, Some(flex)) if flex > 0.0 => Some(format!("flex: {flex} 1 0")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use data_grid_core::Density;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn density_style_exposes_row_and_header_heights() {
        let style = density_style(Density::Compact.tokens());
        assert!(style.starts_with("--grid-row-height: 36px; --grid-header-height: 40px;"));
        assert!(style.contains("--grid-font-size: 13px"));
    }

    #[test]
    fn fixed_width_takes_precedence_over_flex() {
        assert_eq!(
            column_style(Some(120), Some(1.0)).as_deref(),
            Some("width: 120px; min-width: 120px")
        );
        assert_eq!(column_style(None, Some(2.0)).as_deref(), Some("flex: 2 1 0"));
        assert_eq!(column_style(None, Some(0.0)), None);
        assert_eq!(column_style(None, None), None);
    }
}
