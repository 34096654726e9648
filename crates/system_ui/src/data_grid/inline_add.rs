//! Inline-add row: a placeholder affordance that expands into an input per eligible field.

use data_grid_core::inline_add::eligible_fields;
use data_grid_core::{CellKind, GridAction, GridRow, InlineAddKey};
use leptos::ev::KeyboardEvent;
use leptos::*;

use super::cells::field_error;
use super::context::DataGridContext;
use crate::primitives::bool_token;
use crate::{
    Button, ButtonSize, ButtonVariant, Cluster, FieldVariant, LayoutAlign, LayoutGap, Stack, Text,
    TextField, TextRole, TextTone,
};

#[derive(Clone)]
struct InlineInput {
    field: String,
    header: String,
    kind: CellKind,
}

#[component]
pub(crate) fn InlineAddRow<R: GridRow>(
    grid: DataGridContext<R>,
    colspan: Signal<usize>,
) -> impl IntoView {
    let placeholder = grid
        .state
        .with_untracked(|state| state.config.inline_add.placeholder.clone());
    let inputs = grid.with_schema(|schema| {
        let fields = grid
            .state
            .with_untracked(|state| eligible_fields(schema.columns(), &state.config.inline_add));
        fields
            .into_iter()
            .filter_map(|field| {
                schema.column(&field).map(|column| InlineInput {
                    header: column.header.clone(),
                    kind: column.kind.clone(),
                    field,
                })
            })
            .collect::<Vec<_>>()
    });
    let active = grid.select(|state| state.inline_add.is_active());

    view! {
        <tr data-ui-slot="inline-add" data-ui-active=move || bool_token(active.get())>
            <td colspan=move || colspan.get()>
                {move || {
                    if active.get() {
                        view! { <InlineAddForm grid inputs=inputs.clone() /> }.into_view()
                    } else {
                        let placeholder = placeholder.clone();
                        view! {
                            <Button
                                variant=ButtonVariant::Quiet
                                size=ButtonSize::Sm
                                ui_slot="inline-add-trigger"
                                on_click=Callback::new(move |_| {
                                    grid.dispatch_action(GridAction::ActivateInlineAdd)
                                })
                            >
                                {placeholder.clone()}
                            </Button>
                        }
                            .into_view()
                    }
                }}
            </td>
        </tr>
    }
}

#[component]
fn InlineAddForm<R: GridRow>(grid: DataGridContext<R>, inputs: Vec<InlineInput>) -> impl IntoView {
    let on_keydown = Callback::new(move |ev: KeyboardEvent| {
        match InlineAddKey::classify(&ev.key(), ev.ctrl_key() || ev.meta_key()) {
            InlineAddKey::Submit => {
                ev.prevent_default();
                grid.dispatch_action(GridAction::SubmitInlineAdd);
            }
            InlineAddKey::Cancel => grid.dispatch_action(GridAction::CancelInlineAdd),
            InlineAddKey::None => {}
        }
    });

    let fields = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| view! { <InlineAddInput grid input autofocus={index == 0} on_keydown /> })
        .collect_view();

    view! {
        <Stack gap=LayoutGap::Sm>
            <Cluster gap=LayoutGap::Sm align=LayoutAlign::Start>
                {fields}
            </Cluster>
            <Cluster gap=LayoutGap::Sm>
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Sm
                    on_click=Callback::new(move |_| grid.dispatch_action(GridAction::SubmitInlineAdd))
                >
                    "Save"
                </Button>
                <Button
                    variant=ButtonVariant::Quiet
                    size=ButtonSize::Sm
                    on_click=Callback::new(move |_| grid.dispatch_action(GridAction::CancelInlineAdd))
                >
                    "Cancel"
                </Button>
                <Text role=TextRole::Caption tone=TextTone::Secondary>
                    "Ctrl+Enter to save, Esc to cancel"
                </Text>
            </Cluster>
        </Stack>
    }
}

#[component]
fn InlineAddInput<R: GridRow>(
    grid: DataGridContext<R>,
    input: InlineInput,
    autofocus: bool,
    on_keydown: Callback<KeyboardEvent>,
) -> impl IntoView {
    let InlineInput {
        field,
        header,
        kind,
    } = input;
    let initial = grid.state.with_untracked(|state| {
        state
            .inline_add
            .draft()
            .and_then(|draft| draft.get(&field))
            .map(|value| value.display())
            .unwrap_or_default()
    });
    let error = grid.select({
        let field = field.clone();
        move |state| {
            state
                .inline_add
                .errors()
                .and_then(|errors| errors.get(&field).cloned())
        }
    });

    view! {
        <Stack gap=LayoutGap::None>
            <TextField
                ui_slot="inline-add-field"
                variant=FieldVariant::Inset
                placeholder=header.clone()
                aria_label=header
                autofocus
                value=initial
                aria_invalid=Signal::derive(move || error.with(Option::is_some))
                on_input=Callback::new(move |text: String| {
                    grid.dispatch_action(GridAction::UpdateInlineAddField {
                        field: field.clone(),
                        value: kind.parse_input(&text),
                    })
                })
                on_keydown
            />
            {move || error.get().map(field_error)}
        </Stack>
    }
}
