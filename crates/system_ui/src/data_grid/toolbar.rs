//! Toolbar above the table: title or selection indicator plus the standard affordances.

use data_grid_core::toolbar::{ToolbarCounts, ToolbarLead};
use data_grid_core::{toolbar_model, ExportFormat, GridAction, GridRow};
use leptos::ev::MouseEvent;
use leptos::*;

use super::context::DataGridContext;
use crate::{
    Button, ButtonSize, ButtonVariant, Cluster, Heading, IconButton, IconName, LayoutGap,
    LayoutJustify, MenuItem, MenuSurface, Stack, Text, TextField, TextRole, TextTone, ToolBar,
};

#[derive(Clone)]
struct BulkButton {
    id: String,
    label: String,
    tooltip: String,
    icon: IconName,
    variant: ButtonVariant,
}

#[component]
pub(crate) fn DataGridToolbar<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let bulk: Vec<BulkButton> = grid.with_schema(|schema| {
        schema
            .bulk_actions()
            .iter()
            .map(|action| BulkButton {
                id: action.id.clone(),
                label: action.label.clone(),
                tooltip: action.tooltip_text().to_string(),
                icon: IconName::from_token_or_more(&action.icon),
                variant: ButtonVariant::from(action.tone),
            })
            .collect()
    });
    let has_bulk = !bulk.is_empty();

    let model = create_memo(move |_| {
        grid.derived.with(|derived| {
            grid.state.with(|state| {
                let counts = ToolbarCounts {
                    selected: state.selected_count(&derived.filtered),
                    filtered: derived.total(),
                };
                toolbar_model(&state.config, &state.search, state.density, counts, has_bulk)
            })
        })
    });
    let lead = create_memo(move |_| model.with(|model| model.lead.clone()));
    let show_bulk = create_memo(move |_| model.with(|model| model.show_bulk_actions));
    let search_placeholder = create_memo(move |_| model.with(|model| model.search_placeholder.clone()));
    let show_add = create_memo(move |_| model.with(|model| model.show_add));
    let show_columns = create_memo(move |_| model.with(|model| model.show_columns));
    let show_filters = create_memo(move |_| model.with(|model| model.show_filters));
    let density = create_memo(move |_| model.with(|model| model.density));
    let export_formats = create_memo(move |_| model.with(|model| model.export_formats.clone()));
    let show_refresh = create_memo(move |_| model.with(|model| model.show_refresh));
    let selecting = Signal::derive(move || matches!(lead.get(), ToolbarLead::Selection { .. }));

    let search = grid.select(|state| state.search.clone());
    let filter_open = grid.select(|state| state.filter_panel_open);

    view! {
        <ToolBar layout_class="ui-data-grid-toolbar" aria_label="Grid toolbar" emphasized=selecting>
            <Cluster justify=LayoutJustify::Between layout_class="ui-data-grid-toolbar-row">
                {move || match lead.get() {
                    ToolbarLead::Title { title, subtitle } => {
                        view! {
                            <Stack gap=LayoutGap::None>
                                {title.map(|title| view! { <Heading>{title}</Heading> })}
                                {subtitle
                                    .map(|subtitle| {
                                        view! {
                                            <Text role=TextRole::Caption tone=TextTone::Secondary>
                                                {subtitle}
                                            </Text>
                                        }
                                    })}
                            </Stack>
                        }
                            .into_view()
                    }
                    ToolbarLead::Selection { label, .. } => {
                        view! {
                            <Cluster>
                                <IconButton
                                    icon=IconName::Dismiss
                                    aria_label="Clear selection"
                                    size=ButtonSize::Sm
                                    on_click=Callback::new(move |_| {
                                        grid.dispatch_action(GridAction::ClearSelection)
                                    })
                                />
                                <Text role=TextRole::Label>{label}</Text>
                            </Cluster>
                        }
                            .into_view()
                    }
                }}
                <Cluster gap=LayoutGap::Sm>
                    {move || {
                        show_bulk
                            .get()
                            .then(|| {
                                bulk.clone()
                                    .into_iter()
                                    .map(|button| bulk_button(grid, button))
                                    .collect_view()
                            })
                    }}
                    {move || {
                        search_placeholder
                            .get()
                            .map(|placeholder| {
                                view! {
                                    <TextField
                                        ui_slot="grid-search"
                                        input_type="search"
                                        aria_label="Search rows"
                                        placeholder
                                        value=search
                                        on_input=Callback::new(move |text: String| {
                                            grid.dispatch_action(GridAction::SetSearch(text))
                                        })
                                    />
                                }
                            })
                    }}
                    <Show when=move || show_add.get()>
                        <IconButton
                            icon=IconName::Add
                            aria_label="Add row"
                            size=ButtonSize::Sm
                            on_click=Callback::new(move |_| {
                                grid.dispatch_action(GridAction::ActivateInlineAdd)
                            })
                        />
                    </Show>
                    <Show when=move || show_columns.get()>
                        <ColumnsMenu grid />
                    </Show>
                    <Show when=move || show_filters.get()>
                        <IconButton
                            icon=IconName::Filter
                            aria_label="Toggle filters"
                            size=ButtonSize::Sm
                            pressed=filter_open
                            on_click=Callback::new(move |_| {
                                grid.dispatch_action(GridAction::ToggleFilterPanel)
                            })
                        />
                    </Show>
                    {move || {
                        density
                            .get()
                            .map(|density| {
                                view! {
                                    <Button
                                        variant=ButtonVariant::Quiet
                                        size=ButtonSize::Sm
                                        ui_slot="density-toggle"
                                        leading_icon=IconName::Density
                                        aria_label=format!("Density: {}", density.label())
                                        on_click=Callback::new(move |_| {
                                            grid.dispatch_action(GridAction::CycleDensity)
                                        })
                                    >
                                        {density.label()}
                                    </Button>
                                }
                            })
                    }}
                    <Show when=move || export_formats.with(|formats| !formats.is_empty())>
                        <ExportMenu grid formats=export_formats />
                    </Show>
                    <Show when=move || show_refresh.get()>
                        <IconButton
                            icon=IconName::Refresh
                            aria_label="Refresh"
                            size=ButtonSize::Sm
                            on_click=Callback::new(move |_| grid.dispatch_action(GridAction::Refresh))
                        />
                    </Show>
                </Cluster>
            </Cluster>
        </ToolBar>
    }
}

fn bulk_button<R: GridRow>(grid: DataGridContext<R>, button: BulkButton) -> impl IntoView {
    let BulkButton {
        id,
        label,
        tooltip,
        icon,
        variant,
    } = button;

    view! {
        <Button
            variant
            size=ButtonSize::Sm
            ui_slot="bulk-action"
            leading_icon=icon
            title=tooltip
            on_click=Callback::new(move |_| {
                grid.dispatch_action(GridAction::InvokeBulkAction {
                    action_id: id.clone(),
                })
            })
        >
            {label}
        </Button>
    }
}

#[component]
fn ColumnsMenu<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let open = create_rw_signal(false);
    let columns: Vec<(String, String)> = grid.with_schema(|schema| {
        schema
            .columns()
            .iter()
            .filter(|column| !column.is_actions())
            .map(|column| (column.field.clone(), column.header.clone()))
            .collect()
    });

    view! {
        <div data-ui-slot="columns-menu">
            <IconButton
                icon=IconName::Columns
                aria_label="Show or hide columns"
                size=ButtonSize::Sm
                aria_haspopup="menu"
                aria_expanded=open
                on_click=Callback::new(move |_| open.update(|open| *open = !*open))
            />
            <MenuSurface
                open
                aria_label="Columns"
                on_dismiss=Callback::new(move |_| open.set(false))
            >
                {columns
                    .into_iter()
                    .map(|(field, header)| {
                        let visible = grid.select({
                            let field = field.clone();
                            move |state| state.is_column_visible(&field)
                        });
                        view! {
                            <MenuItem
                                icon=IconName::Checkmark
                                selected=visible
                                on_click=Callback::new(move |_| {
                                    grid.dispatch_action(
                                        GridAction::ToggleColumnVisibility(field.clone()),
                                    )
                                })
                            >
                                {header}
                            </MenuItem>
                        }
                    })
                    .collect_view()}
            </MenuSurface>
        </div>
    }
}

#[component]
fn ExportMenu<R: GridRow>(
    grid: DataGridContext<R>,
    formats: Memo<Vec<ExportFormat>>,
) -> impl IntoView {
    let open = create_rw_signal(false);

    view! {
        <div data-ui-slot="export-menu">
            <IconButton
                icon=IconName::Download
                aria_label="Export"
                size=ButtonSize::Sm
                aria_haspopup="menu"
                aria_expanded=open
                on_click=Callback::new(move |_| open.update(|open| *open = !*open))
            />
            <MenuSurface
                open
                aria_label="Export formats"
                on_dismiss=Callback::new(move |_| open.set(false))
            >
                {move || {
                    formats
                        .get()
                        .into_iter()
                        .map(|format| {
                            view! {
                                <MenuItem
                                    icon=export_icon(format)
                                    on_click=Callback::new(move |_: MouseEvent| {
                                        open.set(false);
                                        grid.dispatch_action(GridAction::RequestExport(format));
                                    })
                                >
                                    {format.label()}
                                </MenuItem>
                            }
                        })
                        .collect_view()
                }}
            </MenuSurface>
        </div>
    }
}

fn export_icon(format: ExportFormat) -> IconName {
    match format {
        ExportFormat::Clipboard => IconName::Copy,
        ExportFormat::Csv | ExportFormat::Json => IconName::Download,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clipboard_export_uses_copy_glyph() {
        assert_eq!(export_icon(ExportFormat::Clipboard), IconName::Copy);
        assert_eq!(export_icon(ExportFormat::Csv), IconName::Download);
    }
}
