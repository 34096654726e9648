//! Structured filter editor shown below the toolbar.

use data_grid_core::model::{FilterItem, FilterModel, FilterOperator};
use data_grid_core::{CellValue, GridAction, GridRow};
use leptos::*;

use super::context::DataGridContext;
use crate::{
    Button, ButtonSize, ButtonVariant, Cluster, LayoutGap, LayoutJustify, LayoutPadding,
    SelectField, Stack, Surface, SurfaceVariant, Text, TextField, TextRole,
};

const OPERATORS: [(FilterOperator, &str, &str); 8] = [
    (FilterOperator::Contains, "contains", "Contains"),
    (FilterOperator::Equals, "equals", "Equals"),
    (FilterOperator::StartsWith, "starts-with", "Starts with"),
    (FilterOperator::EndsWith, "ends-with", "Ends with"),
    (FilterOperator::IsEmpty, "is-empty", "Is empty"),
    (FilterOperator::IsNotEmpty, "is-not-empty", "Is not empty"),
    (FilterOperator::GreaterThan, "greater-than", "Greater than"),
    (FilterOperator::LessThan, "less-than", "Less than"),
];

fn operator_token(operator: FilterOperator) -> &'static str {
    OPERATORS
        .iter()
        .find(|(candidate, _, _)| *candidate == operator)
        .map_or("contains", |(_, token, _)| token)
}

fn parse_operator(token: &str) -> FilterOperator {
    OPERATORS
        .iter()
        .find(|(_, candidate, _)| *candidate == token)
        .map_or(FilterOperator::Contains, |(operator, _, _)| *operator)
}

/// Replaces the item for `field`. Value-taking operators with blank input drop the item.
fn with_filter(
    model: &FilterModel,
    field: &str,
    operator: FilterOperator,
    value: &str,
) -> FilterModel {
    let mut next = model.clone();
    next.items.retain(|item| item.field != field);
    if !operator.takes_value() || !value.trim().is_empty() {
        next.items.push(FilterItem {
            field: field.to_string(),
            operator,
            value: CellValue::from(value),
        });
    }
    next
}

#[component]
pub(crate) fn FilterPanel<R: GridRow>(grid: DataGridContext<R>) -> impl IntoView {
    let columns: Vec<(String, String)> = grid.with_schema(|schema| {
        schema
            .columns()
            .iter()
            .filter(|column| column.filterable && column.kind.holds_data())
            .map(|column| (column.field.clone(), column.header.clone()))
            .collect()
    });
    let model = grid.select(|state| state.filter.clone());

    view! {
        <Surface
            variant=SurfaceVariant::Muted
            padding=LayoutPadding::Sm
            layout_class="ui-data-grid-filters"
            role="region"
            aria_label="Filters"
        >
            <Stack gap=LayoutGap::Sm>
                {columns
                    .into_iter()
                    .map(|(field, header)| view! { <FilterRow grid field header model /> })
                    .collect_view()}
                <Cluster justify=LayoutJustify::End>
                    <Button
                        variant=ButtonVariant::Quiet
                        size=ButtonSize::Sm
                        disabled=Signal::derive(move || model.with(FilterModel::is_empty))
                        on_click=Callback::new(move |_| {
                            grid.dispatch_action(GridAction::SetFilterModel(FilterModel::default()))
                        })
                    >
                        "Clear filters"
                    </Button>
                </Cluster>
            </Stack>
        </Surface>
    }
}

#[component]
fn FilterRow<R: GridRow>(
    grid: DataGridContext<R>,
    field: String,
    header: String,
    model: Memo<FilterModel>,
) -> impl IntoView {
    let current = create_memo({
        let field = field.clone();
        move |_| {
            model.with(|model| {
                model
                    .items
                    .iter()
                    .find(|item| item.field == field)
                    .map(|item| (item.operator, item.value.display()))
            })
        }
    });
    let initial = current
        .get_untracked()
        .map(|(_, value)| value)
        .unwrap_or_default();
    let options = OPERATORS
        .iter()
        .map(|(_, token, label)| (token.to_string(), label.to_string()))
        .collect::<Vec<_>>();

    let update = store_value(field);
    let apply = move |operator: FilterOperator, value: String| {
        let next = update.with_value(|field| {
            model.with_untracked(|model| with_filter(model, field, operator, &value))
        });
        grid.dispatch_action(GridAction::SetFilterModel(next));
    };

    let operator_label = format!("{header} operator");
    let value_label = format!("{header} value");

    view! {
        <Cluster gap=LayoutGap::Sm layout_class="ui-data-grid-filter-row">
            <Text role=TextRole::Label>{header.clone()}</Text>
            <SelectField
                aria_label=operator_label
                options
                value=Signal::derive(move || {
                    operator_token(current.get().map_or(FilterOperator::Contains, |(op, _)| op))
                        .to_string()
                })
                on_change=Callback::new(move |token: String| {
                    let value = current.get_untracked().map(|(_, value)| value).unwrap_or_default();
                    apply(parse_operator(&token), value);
                })
            />
            <TextField
                aria_label=value_label
                placeholder="Value"
                value=initial
                disabled=Signal::derive(move || {
                    current.get().is_some_and(|(op, _)| !op.takes_value())
                })
                on_input=Callback::new(move |text: String| {
                    let operator = current
                        .get_untracked()
                        .map_or(FilterOperator::Contains, |(op, _)| op);
                    apply(operator, text);
                })
            />
        </Cluster>
    }
}
