//! Page navigation and page-size selection.

use data_grid_core::{GridAction, GridRow};
use leptos::*;

use super::context::DataGridContext;
use crate::{
    ButtonSize, Cluster, IconButton, IconName, LayoutJustify, SelectField, Text, TextRole,
    TextTone,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageStatus {
    page: usize,
    page_size: usize,
    page_count: usize,
    total: usize,
}

#[component]
pub(crate) fn GridPager<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let configured = grid
        .state
        .with_untracked(|state| state.config.pagination.page_size_options.clone());
    let pagination = grid.select(|state| state.pagination);
    let status = create_memo(move |_| {
        let pagination = pagination.get();
        grid.derived.with(|derived| PageStatus {
            page: pagination.page,
            page_size: pagination.page_size,
            page_count: derived.page_count,
            total: derived.total(),
        })
    });
    let options = size_options(&configured, status.get_untracked().page_size);

    view! {
        <Cluster layout_class="ui-data-grid-pager" justify=LayoutJustify::End>
            <Text role=TextRole::Caption tone=TextTone::Secondary>
                {move || {
                    let status = status.get();
                    range_label(status.page, status.page_size, status.total)
                }}
            </Text>
            <SelectField
                aria_label="Rows per page"
                ui_slot="page-size"
                options
                value=Signal::derive(move || status.get().page_size.to_string())
                on_change=Callback::new(move |value: String| {
                    if let Ok(size) = value.parse::<usize>() {
                        grid.dispatch_action(GridAction::SetPageSize(size));
                    }
                })
            />
            <IconButton
                icon=IconName::ChevronLeft
                aria_label="Previous page"
                size=ButtonSize::Sm
                disabled=Signal::derive(move || status.get().page == 0)
                on_click=Callback::new(move |_| {
                    let page = status.get_untracked().page;
                    grid.dispatch_action(GridAction::SetPage(page.saturating_sub(1)));
                })
            />
            <Text role=TextRole::Caption>
                {move || {
                    let status = status.get();
                    page_label(status.page, status.page_count)
                }}
            </Text>
            <IconButton
                icon=IconName::ChevronRight
                aria_label="Next page"
                size=ButtonSize::Sm
                disabled=Signal::derive(move || {
                    let status = status.get();
                    status.page + 1 >= status.page_count
                })
                on_click=Callback::new(move |_| {
                    let page = status.get_untracked().page;
                    grid.dispatch_action(GridAction::SetPage(page + 1));
                })
            />
        </Cluster>
    }
}

/// Page-size choices: configured options plus the active size, ascending.
fn size_options(configured: &[usize], current: usize) -> Vec<(String, String)> {
    let mut sizes: Vec<usize> = configured.iter().copied().filter(|size| *size > 0).collect();
    sizes.push(current);
    sizes.sort_unstable();
    sizes.dedup();
    sizes
        .into_iter()
        .map(|size| (size.to_string(), format!("{size} / page")))
        .collect()
}

fn page_label(page: usize, page_count: usize) -> String {
    format!("Page {} of {}", page + 1, page_count.max(1))
}

fn range_label(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "0 rows".to_string();
    }
    let start = page * page_size + 1;
    let end = ((page + 1) * page_size).min(total);
    format!("{start}-{end} of {total}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn size_options_include_active_size_once() {
        let options = size_options(&[25, 10, 50], 10);
        assert_eq!(
            options.iter().map(|(value, _)| value.as_str()).collect::<Vec<_>>(),
            vec!["10", "25", "50"]
        );
        assert_eq!(size_options(&[], 15)[0].1, "15 / page");
    }

    #[test]
    fn labels_are_one_based_and_clamped() {
        assert_eq!(page_label(0, 0), "Page 1 of 1");
        assert_eq!(page_label(2, 5), "Page 3 of 5");
        assert_eq!(range_label(1, 10, 15), "11-15 of 15");
        assert_eq!(range_label(0, 10, 0), "0 rows");
    }
}
