//! Row-action layout for the synthetic actions column.

use crate::actions::{ActionTone, RowAction};
use crate::config::{ActionDisplay, RowActionsConfig};
use crate::model::GridRow;

/// One resolved action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButtonView {
    /// Action id used to dispatch the invocation.
    pub id: String,
    /// Tooltip and `aria-label`.
    pub label: String,
    /// Icon token.
    pub icon: String,
    /// Visual emphasis.
    pub tone: ActionTone,
    /// Resolved disabled state for this row.
    pub disabled: bool,
}

/// Split of a row's actions into inline buttons and overflow menu items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionsView {
    /// Icon buttons rendered directly in the cell.
    pub inline: Vec<ActionButtonView>,
    /// Items rendered inside the overflow menu.
    pub overflow: Vec<ActionButtonView>,
    /// Whether the buttons are currently revealed.
    pub revealed: bool,
}

impl ActionsView {
    /// Whether the overflow trigger should render.
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

fn button<R: GridRow>(action: &RowAction<R>, row: &R) -> ActionButtonView {
    ActionButtonView {
        id: action.id.clone(),
        label: action.label.clone(),
        icon: action.icon.clone(),
        tone: action.tone,
        disabled: action.is_disabled(row),
    }
}

/// Lays out `actions` for `row`.
///
/// In menu mode the first `max_inline` actions not flagged for the menu render inline and the
/// rest go to the overflow menu. Hover and always modes render every action inline; hover mode
/// only reveals them while the row is hovered.
pub fn actions_view<R: GridRow>(
    actions: &[RowAction<R>],
    config: &RowActionsConfig,
    row: &R,
    hovered: bool,
) -> ActionsView {
    match config.display {
        ActionDisplay::Menu => {
            let mut view = ActionsView {
                revealed: true,
                ..ActionsView::default()
            };
            for action in actions {
                if !action.show_in_menu && view.inline.len() < config.max_inline {
                    view.inline.push(button(action, row));
                } else {
                    view.overflow.push(button(action, row));
                }
            }
            view
        }
        ActionDisplay::Hover | ActionDisplay::Always => ActionsView {
            inline: actions.iter().map(|action| button(action, row)).collect(),
            overflow: Vec::new(),
            revealed: config.display == ActionDisplay::Always || hovered,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CellValue, Record};

    fn actions() -> Vec<RowAction<Record>> {
        vec![
            RowAction::new("view", "View", "eye", |_| {}),
            RowAction::new("edit", "Edit", "edit", |_| {})
                .disabled_when(|row: &Record| row.field("locked") == CellValue::Bool(true)),
            RowAction::new("archive", "Archive", "archive", |_| {}),
            RowAction::new("delete", "Delete", "delete", |_| {}).in_menu().danger(),
        ]
    }

    fn ids(buttons: &[ActionButtonView]) -> Vec<&str> {
        buttons.iter().map(|button| button.id.as_str()).collect()
    }

    #[test]
    fn menu_mode_splits_after_max_inline() {
        let view = actions_view(&actions(), &RowActionsConfig::default(), &Record::new(), false);
        assert_eq!(ids(&view.inline), vec!["view", "edit"]);
        assert_eq!(ids(&view.overflow), vec!["archive", "delete"]);
        assert!(view.revealed);
    }

    #[test]
    fn flagged_actions_stay_in_menu_even_with_room() {
        let config = RowActionsConfig {
            max_inline: 10,
            ..RowActionsConfig::default()
        };
        let view = actions_view(&actions(), &config, &Record::new(), false);
        assert_eq!(ids(&view.inline), vec!["view", "edit", "archive"]);
        assert_eq!(ids(&view.overflow), vec!["delete"]);
    }

    #[test]
    fn hover_mode_reveals_only_on_hover() {
        let config = RowActionsConfig {
            display: ActionDisplay::Hover,
            ..RowActionsConfig::default()
        };
        let row = Record::new();
        assert!(!actions_view(&actions(), &config, &row, false).revealed);
        let hovered = actions_view(&actions(), &config, &row, true);
        assert!(hovered.revealed);
        assert_eq!(hovered.inline.len(), 4);
        assert!(!hovered.has_overflow());
    }

    #[test]
    fn disabled_predicate_is_evaluated_per_row() {
        let locked = Record::new().with("locked", true);
        let view = actions_view(&actions(), &RowActionsConfig::default(), &locked, false);
        assert!(view.inline[1].disabled);
        assert!(!view.inline[0].disabled);
    }
}
