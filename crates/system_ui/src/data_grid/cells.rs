//! Body cell dispatch and the per-kind renderers.

use data_grid_core::cells::{AvatarView, ProgressView, RatingView, StarFill};
use data_grid_core::model::{EditMode, RowMode};
use data_grid_core::{cell_view, CellKind, CellView, EditKey, GridAction, GridRow, RowId};
use leptos::ev::KeyboardEvent;
use leptos::*;

use super::actions_cell::ActionsCell;
use super::column_style;
use super::context::DataGridContext;
use super::editable_cell::EditableCell;
use crate::{
    Badge, Cluster, FieldVariant, Icon, IconName, IconSize, LayoutGap, ProgressBar, Stack, Text,
    TextField, TextRole, TextTone,
};

struct CellMeta {
    kind: CellKind,
    style: Option<String>,
    pinned: Option<&'static str>,
    editable: bool,
    actions: bool,
}

#[component]
pub(crate) fn GridCell<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    field: String,
) -> impl IntoView {
    let (editing_enabled, edit_mode) = grid
        .state
        .with_untracked(|state| (state.config.editing.enabled, state.config.editing.mode));
    let Some(meta) = grid.with_schema(|schema| {
        schema.column(&field).map(|column| CellMeta {
            kind: column.kind.clone(),
            style: column_style(column.width, column.flex),
            pinned: column.pinned.map(|pin| pin.token()),
            editable: editing_enabled && column.is_editable(),
            actions: column.is_actions(),
        })
    }) else {
        return ().into_view();
    };

    let kind_token = meta.kind.token();
    let align = if meta.kind.is_numeric() { "end" } else { "start" };

    let body = if meta.actions {
        view! { <ActionsCell grid id /> }.into_view()
    } else if meta.editable && edit_mode == EditMode::Cell {
        view! { <EditableCell grid id field kind=meta.kind /> }.into_view()
    } else {
        let cell = grid.select({
            let id = id.clone();
            let field = field.clone();
            move |state| {
                state.display_row(&id).and_then(|row| {
                    grid.with_schema(|schema| schema.column(&field).map(|column| cell_view(column, row)))
                })
            }
        });
        let read_only = move || cell.get().map(render_cell);

        if meta.editable {
            let row_editing = grid.select({
                let id = id.clone();
                move |state| state.row_mode(&id) == RowMode::Edit
            });
            let kind = meta.kind;
            (move || {
                if row_editing.get() {
                    view! { <RowEditor grid id=id.clone() field=field.clone() kind=kind.clone() /> }
                        .into_view()
                } else {
                    read_only.into_view()
                }
            })
            .into_view()
        } else {
            read_only.into_view()
        }
    };

    view! {
        <td
            data-ui-slot="cell"
            data-ui-kind=kind_token
            data-ui-align=align
            data-ui-pinned=meta.pinned
            style=meta.style
        >
            {body}
        </td>
    }
    .into_view()
}

/// Draft input for one field of a row in edit mode.
#[component]
fn RowEditor<R: GridRow>(
    grid: DataGridContext<R>,
    id: RowId,
    field: String,
    kind: CellKind,
) -> impl IntoView {
    let initial = grid.state.with_untracked(|state| {
        state
            .drafts
            .get(&id)
            .map(|row| row.field(&field).display())
            .unwrap_or_default()
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
            .map(|column| column.header.clone())
            .unwrap_or_else(|| field.clone())
    });
    let key_id = id.clone();
    let on_input = Callback::new(move |text: String| {
        grid.dispatch_action(GridAction::UpdateDraft {
            id: id.clone(),
            field: field.clone(),
            value: kind.parse_input(&text),
        })
    });
    let on_keydown = Callback::new(move |ev: KeyboardEvent| match EditKey::from_key(&ev.key()) {
        EditKey::Enter => {
            ev.prevent_default();
            grid.dispatch_action(GridAction::CommitRowEdit(key_id.clone()));
        }
        EditKey::Escape => grid.dispatch_action(GridAction::CancelRowEdit(key_id.clone())),
        EditKey::Other => {}
    });

    view! {
        <Stack gap=LayoutGap::None>
            <TextField
                ui_slot="row-editor"
                variant=FieldVariant::Inset
                aria_label=label
                value=initial
                aria_invalid=Signal::derive(move || error.with(Option::is_some))
                on_input
                on_keydown
            />
            {move || error.get().map(field_error)}
        </Stack>
    }
}

pub(crate) fn field_error(message: String) -> impl IntoView {
    view! {
        <Text role=TextRole::Caption tone=TextTone::Danger ui_slot="field-error">
            {message}
        </Text>
    }
}

/// Renders a read-only cell view model.
pub(crate) fn render_cell(cell: CellView) -> View {
    match cell {
        CellView::Text(text) => view! { <span data-ui-slot="cell-text">{text}</span> }.into_view(),
        CellView::Number(text) | CellView::Currency(text) => {
            view! { <span data-ui-slot="cell-number">{text}</span> }.into_view()
        }
        CellView::Status { label, tone } => {
            view! { <Badge tone=TextTone::from(tone)>{label}</Badge> }.into_view()
        }
        CellView::Avatar(avatar) => render_avatar(avatar).into_view(),
        CellView::Progress(ProgressView { percent, label }) => {
            view! { <ProgressBar percent label ui_slot="cell-progress" /> }.into_view()
        }
        CellView::Rating(rating) => render_rating(rating).into_view(),
        CellView::TwoLine { primary, secondary } => view! {
            <Stack gap=LayoutGap::None>
                <span data-ui-slot="cell-primary">{primary}</span>
                {secondary
                    .map(|text| {
                        view! {
                            <Text role=TextRole::Caption tone=TextTone::Secondary>
                                {text}
                            </Text>
                        }
                    })}
            </Stack>
        }
        .into_view(),
        CellView::DragHandle => view! {
            <span data-ui-slot="drag-handle" aria-label="Drag to reorder">
                <Icon icon=IconName::DragHandle size=IconSize::Xs />
            </span>
        }
        .into_view(),
        CellView::Actions => ().into_view(),
    }
}

fn render_avatar(avatar: AvatarView) -> impl IntoView {
    let AvatarView {
        name,
        initials,
        secondary,
        image,
    } = avatar;
    let badge = match image {
        Some(src) => view! { <img src=src alt="" /> }.into_view(),
        None => initials.into_view(),
    };

    view! {
        <Cluster gap=LayoutGap::Sm>
            <span data-ui-slot="avatar" aria-hidden="true">
                {badge}
            </span>
            <Stack gap=LayoutGap::None>
                <span data-ui-slot="avatar-name">{name}</span>
                {secondary
                    .map(|text| {
                        view! {
                            <Text role=TextRole::Caption tone=TextTone::Secondary>
                                {text}
                            </Text>
                        }
                    })}
            </Stack>
        </Cluster>
    }
}

fn render_rating(rating: RatingView) -> impl IntoView {
    let label = rating_label(rating.value, rating.max);
    view! {
        <span data-ui-slot="rating" role="img" aria-label=label>
            {rating
                .stars
                .into_iter()
                .map(|fill| {
                    view! {
                        <span data-ui-fill=fill.token()>
                            <Icon icon=star_icon(fill) size=IconSize::Xs />
                        </span>
                    }
                })
                .collect_view()}
        </span>
    }
}

pub(crate) fn star_icon(fill: StarFill) -> IconName {
    match fill {
        StarFill::Full => IconName::Star,
        StarFill::Half => IconName::StarHalf,
        StarFill::Empty => IconName::StarEmpty,
    }
}

pub(crate) fn rating_label(value: f64, max: u8) -> String {
    let value = (value * 10.0).round() / 10.0;
    format!("{value} out of {max} stars")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn star_fill_selects_matching_glyph() {
        assert_eq!(star_icon(StarFill::Full), IconName::Star);
        assert_eq!(star_icon(StarFill::Half), IconName::StarHalf);
        assert_eq!(star_icon(StarFill::Empty), IconName::StarEmpty);
    }

    #[test]
    fn rating_label_rounds_to_one_decimal() {
        assert_eq!(rating_label(3.0, 5), "3 out of 5 stars");
        assert_eq!(rating_label(4.25, 5), "4.3 out of 5 stars");
    }
}
