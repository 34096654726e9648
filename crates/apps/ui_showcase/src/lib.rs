//! Showcase page for the design-system primitives and the interactive data grid.
//!
//! Everything renders through `system_ui` components so visual and behavioral changes can be
//! reviewed on one surface. The grids own no data: callbacks write back into page-level signals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod sample;

use std::rc::Rc;

use data_grid_core::config::ActionDisplay;
use data_grid_core::model::EditMode;
use data_grid_core::{
    BulkAction, CellValue, Density, GridCallbacks, GridRow, Record, RowAction, RowId, ThemeMode,
};
use leptos::*;
use system_ui::prelude::*;

type Reporter = Callback<String>;

fn directory_callbacks(rows: RwSignal<Vec<Record>>, report: Reporter) -> GridCallbacks<Record> {
    GridCallbacks::new()
        .on_selection_change(move |ids| report.call(format!("{} row(s) selected", ids.len())))
        .on_sort_change(move |field, direction| {
            report.call(format!("Sort on {field}: {direction:?}"))
        })
        .on_filter_change(move |model, search| {
            report.call(format!(
                "Search \"{search}\" with {} filter(s)",
                model.items.len()
            ))
        })
        .on_page_change(move |page, page_size| {
            report.call(format!("Page {} at {page_size} rows", page + 1))
        })
        .on_density_change(move |density| report.call(format!("Density {}", density.label())))
        .on_row_update_sync(move |new_row, _old_row| {
            sample::check_update(&new_row)?;
            rows.update(|rows| sample::apply_update(rows, &new_row));
            report.call(format!("Saved {}", new_row.field("name").display()));
            Ok(new_row)
        })
        .on_row_add(move |record| {
            let mut added = None;
            rows.update(|rows| added = Some(sample::append_record(rows, record)));
            if let Some(id) = added {
                report.call(format!("Added row {id}"));
            }
        })
        .on_row_click(move |row| report.call(format!("Clicked {}", row.field("name").display())))
        .on_export(move |format| report.call(format!("Exported as {}", format.label())))
        .on_refresh(move || {
            rows.set(sample::team_rows());
            report.call("Reloaded sample data".to_string());
        })
}

fn directory_row_actions(rows: RwSignal<Vec<Record>>, report: Reporter) -> Vec<RowAction<Record>> {
    vec![
        RowAction::new("open", "Open profile", "open", move |row: &Record| {
            report.call(format!("Opened {}", row.field("name").display()))
        }),
        RowAction::new("email", "Send email", "mail", move |row: &Record| {
            report.call(format!("Emailing {}", row.field("email").display()))
        })
        .disabled_when(|row: &Record| row.field("status") == CellValue::from("suspended")),
        RowAction::new("remove", "Remove", "delete", move |row: &Record| {
            let id = sample::row_id(row);
            rows.update(|rows| sample::remove_rows(rows, &[id.clone()]));
            report.call(format!("Removed row {id}"));
        })
        .danger()
        .in_menu(),
    ]
}

fn directory_bulk_actions(
    rows: RwSignal<Vec<Record>>,
    report: Reporter,
) -> Vec<BulkAction<Record>> {
    vec![
        BulkAction::new("copy-emails", "Copy emails", "copy", move |selected: &[Record]| {
            let emails = selected
                .iter()
                .map(|row| row.field("email").display())
                .collect::<Vec<_>>();
            report.call(format!("Emails: {}", emails.join(", ")))
        })
        .tooltip("List the selected email addresses"),
        BulkAction::new("archive", "Archive", "archive", move |selected: &[Record]| {
            let ids = selected.iter().map(sample::row_id).collect::<Vec<RowId>>();
            rows.update(|rows| sample::remove_rows(rows, &ids));
            report.call(format!("Archived {} row(s)", ids.len()));
        })
        .tooltip("Remove the selected people from the directory")
        .danger(),
    ]
}

#[component]
/// Showcase page contents.
pub fn UiShowcaseApp() -> impl IntoView {
    let last_event = create_rw_signal("Interact with a grid to see its callbacks.".to_string());
    let report = Callback::new(move |message: String| last_event.set(message));

    let directory_rows = create_rw_signal(sample::team_rows());
    let review_rows = create_rw_signal(sample::team_rows());
    let review_loading = create_rw_signal(false);

    let mut review_config = sample::grid_config();
    review_config.density = Density::Compact;
    review_config.theme = ThemeMode::Dark;
    review_config.editing.mode = EditMode::Row;
    review_config.row_actions.display = ActionDisplay::Hover;
    review_config.inline_add.enabled = false;
    review_config.toolbar.title = Some("Quarterly review".to_string());
    review_config.toolbar.subtitle = Some("Double-click a row to edit every field".to_string());

    let note = create_rw_signal("Primitives share one token set.".to_string());
    let team_size = create_rw_signal("10".to_string());
    let notify = create_rw_signal(true);

    view! {
        <Stack gap=LayoutGap::Lg padding=LayoutPadding::Md layout_class="ui-showcase">
            <Surface elevation=Elevation::Raised>
                <Stack gap=LayoutGap::Md>
                    <Heading>"Primitives"</Heading>
                    <Cluster gap=LayoutGap::Sm>
                        <Button variant=ButtonVariant::Primary leading_icon=IconName::Add>
                            "Primary"
                        </Button>
                        <Button>"Standard"</Button>
                        <Button variant=ButtonVariant::Quiet>"Quiet"</Button>
                        <Button variant=ButtonVariant::Danger leading_icon=IconName::Delete>
                            "Danger"
                        </Button>
                        <Button disabled=true>"Disabled"</Button>
                        <IconButton icon=IconName::Refresh aria_label="Refresh" />
                        <IconButton icon=IconName::Star aria_label="Favorite" pressed=true />
                    </Cluster>
                    <Cluster gap=LayoutGap::Sm align=LayoutAlign::Center>
                        <TextField
                            aria_label="Note"
                            value=note
                            on_input=Callback::new(move |text| note.set(text))
                        />
                        <SelectField
                            aria_label="Team size"
                            options=vec![
                                ("5".to_string(), "Five".to_string()),
                                ("10".to_string(), "Ten".to_string()),
                                ("25".to_string(), "Twenty-five".to_string()),
                            ]
                            value=team_size
                            on_change=Callback::new(move |value| team_size.set(value))
                        />
                        <CheckboxField
                            aria_label="Notify me"
                            checked=notify
                            on_toggle=Callback::new(move |_| notify.update(|on| *on = !*on))
                        />
                        <Text role=TextRole::Caption tone=TextTone::Secondary>
                            {move || format!("{} / {} / notify {}", note.get(), team_size.get(), notify.get())}
                        </Text>
                    </Cluster>
                    <Cluster gap=LayoutGap::Sm>
                        <Badge tone=TextTone::Success>"Active"</Badge>
                        <Badge tone=TextTone::Warning>"On leave"</Badge>
                        <Badge tone=TextTone::Danger>"Suspended"</Badge>
                        <Badge tone=TextTone::Info>"Pending"</Badge>
                        <ProgressBar percent=64.0 label="Onboarding" />
                    </Cluster>
                </Stack>
            </Surface>

            <Surface role="status" variant=SurfaceVariant::Inset padding=LayoutPadding::Sm>
                <Text role=TextRole::Caption>{move || last_event.get()}</Text>
            </Surface>

            <DataGrid
                rows=directory_rows
                columns=sample::team_columns()
                config=sample::grid_config()
                row_actions=directory_row_actions(directory_rows, report)
                bulk_actions=directory_bulk_actions(directory_rows, report)
                inline_add_validator=Rc::new(sample::validate_new_member)
                callbacks=directory_callbacks(directory_rows, report)
            />

            <Cluster gap=LayoutGap::Sm>
                <Button
                    variant=ButtonVariant::Quiet
                    on_click=Callback::new(move |_| review_loading.update(|on| *on = !*on))
                >
                    {move || if review_loading.get() { "Show rows" } else { "Show loading skeleton" }}
                </Button>
            </Cluster>

            <DataGrid
                rows=review_rows
                columns=sample::team_columns()
                config=review_config
                loading=review_loading
                row_actions=directory_row_actions(review_rows, report)
                callbacks=directory_callbacks(review_rows, report)
            />
        </Stack>
    }
}
