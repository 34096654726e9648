//! Synthetic row-actions column: inline icon buttons plus the overflow menu.

use data_grid_core::cells::{actions_view, ActionButtonView, ActionsView};
use data_grid_core::{ActionTone, GridAction, GridRow, RowId};
use leptos::ev::MouseEvent;
use leptos::*;

use super::context::DataGridContext;
use crate::primitives::bool_token;
use crate::{
    ButtonSize, ButtonVariant, IconButton, IconName, MenuItem, MenuSeparator, MenuSurface,
};

#[component]
pub(crate) fn ActionsCell<R: GridRow>(grid: DataGridContext<R>, id: RowId) -> impl IntoView {
    let display = grid
        .state
        .with_untracked(|state| state.config.row_actions.display.token());
    let layout = grid.select({
        let id = id.clone();
        move |state| {
            let hovered = state.hovered.as_ref() == Some(&id);
            state
                .display_row(&id)
                .map(|row| {
                    grid.with_schema(|schema| {
                        actions_view(schema.row_actions(), &state.config.row_actions, row, hovered)
                    })
                })
                .unwrap_or_default()
        }
    });
    let has_overflow = create_memo(move |_| layout.with(ActionsView::has_overflow));
    let menu_open = create_rw_signal(false);
    let overflow_id = id.clone();

    view! {
        <div
            data-ui-slot="row-actions"
            data-ui-display=display
            data-ui-revealed=move || bool_token(layout.with(|view| view.revealed))
            on:click=|ev| ev.stop_propagation()
            on:dblclick=|ev| ev.stop_propagation()
        >
            {move || {
                layout
                    .with(|view| view.inline.clone())
                    .into_iter()
                    .map(|button| inline_button(grid, id.clone(), button))
                    .collect_view()
            }}
            <Show when=move || has_overflow.get()>
                <OverflowMenu grid id=overflow_id.clone() layout menu_open />
            </Show>
        </div>
    }
}

#[component]
fn OverflowMenu<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    layout: Memo<ActionsView>,
    menu_open: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <div data-ui-slot="row-actions-overflow">
            <IconButton
                icon=IconName::More
                aria_label="More actions"
                size=ButtonSize::Sm
                aria_haspopup="menu"
                aria_expanded=menu_open
                on_click=Callback::new(move |_| menu_open.update(|open| *open = !*open))
            />
            <MenuSurface
                open=menu_open
                aria_label="Row actions"
                on_dismiss=Callback::new(move |_| menu_open.set(false))
            >
                {move || {
                    let overflow = layout.with(|view| view.overflow.clone());
                    let first_danger = danger_split(&overflow);
                    overflow
                        .into_iter()
                        .enumerate()
                        .map(|(index, button)| {
                            let separator = (Some(index) == first_danger)
                                .then(|| view! { <MenuSeparator/> });
                            view! {
                                {separator}
                                {menu_button(grid, id.clone(), button, menu_open)}
                            }
                        })
                        .collect_view()
                }}
            </MenuSurface>
        </div>
    }
}

fn invoke<R: GridRow>(
    grid: DataGridContext<R>,
    action_id: String,
    id: RowId,
) -> Callback<MouseEvent> {
    Callback::new(move |ev: MouseEvent| {
        ev.stop_propagation();
        grid.dispatch_action(GridAction::InvokeRowAction {
            action_id: action_id.clone(),
            id: id.clone(),
        });
    })
}

fn inline_button<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    button: ActionButtonView,
) -> impl IntoView {
    let ActionButtonView {
        id: action_id,
        label,
        icon,
        tone,
        disabled,
    } = button;

    view! {
        <IconButton
            icon=IconName::from_token_or_more(&icon)
            aria_label=label
            variant=ButtonVariant::from(tone)
            size=ButtonSize::Sm
            ui_slot="row-action"
            disabled=disabled
            on_click=invoke(grid, action_id, id)
        />
    }
}

fn menu_button<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    button: ActionButtonView,
    menu_open: RwSignal<bool>,
) -> impl IntoView {
    let ActionButtonView {
        id: action_id,
        label,
        icon,
        tone,
        disabled,
    } = button;
    let run = invoke(grid, action_id, id);

    view! {
        <MenuItem
            icon=IconName::from_token_or_more(&icon)
            variant=ButtonVariant::from(tone)
            disabled=disabled
            on_click=Callback::new(move |ev: MouseEvent| {
                menu_open.set(false);
                run.call(ev);
            })
        >
            {label}
        </MenuItem>
    }
}

/// Index of the first destructive entry when it follows non-destructive ones.
fn danger_split(buttons: &[ActionButtonView]) -> Option<usize> {
    buttons
        .iter()
        .position(|button| button.tone == ActionTone::Danger)
        .filter(|index| *index > 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn button(id: &str, tone: ActionTone) -> ActionButtonView {
        ActionButtonView {
            id: id.into(),
            label: id.into(),
            icon: "more".into(),
            tone,
            disabled: false,
        }
    }

    #[test]
    fn destructive_entries_are_separated_from_the_rest() {
        let mixed = [
            button("email", ActionTone::Standard),
            button("remove", ActionTone::Danger),
        ];
        assert_eq!(danger_split(&mixed), Some(1));
        assert_eq!(danger_split(&[button("remove", ActionTone::Danger)]), None);
        assert_eq!(danger_split(&[button("email", ActionTone::Standard)]), None);
    }
}
