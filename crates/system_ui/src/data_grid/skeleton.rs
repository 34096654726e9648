//! Loading placeholder sized from the active density and container height.

use data_grid_core::{GridRow, SkeletonLayout};
use leptos::*;

use super::context::DataGridContext;

#[component]
pub(crate) fn GridSkeleton<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let layout = grid.select(move |state| {
        let columns = grid.with_schema(|schema| state.visible_columns(schema).len());
        SkeletonLayout::new(state.density, state.config.container_height, columns)
    });

    view! {
        <div
            data-ui-slot="skeleton"
            role="status"
            aria-busy="true"
            aria-label="Loading rows"
        >
            {move || {
                let layout = layout.get();
                let height = format!("height: {}px", layout.row_height);
                layout
                    .widths()
                    .into_iter()
                    .map(|row| {
                        view! {
                            <div data-ui-slot="skeleton-row" style=height.clone()>
                                {row
                                    .into_iter()
                                    .map(|width| {
                                        view! {
                                            <span
                                                data-ui-slot="skeleton-bar"
                                                style=format!("width: {width}%")
                                            ></span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
