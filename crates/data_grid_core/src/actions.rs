//! Row and bulk action definitions.

use std::fmt;
use std::rc::Rc;

use crate::model::GridRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Visual emphasis for an action button.
pub enum ActionTone {
    /// Neutral action.
    #[default]
    Standard,
    /// Destructive action.
    Danger,
}

impl ActionTone {
    /// Stable `data-ui-tone` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Danger => "danger",
        }
    }
}

/// Disabled state for a row action: a static flag or a per-row predicate.
pub enum ActionDisabled<R> {
    /// Fixed state.
    Static(bool),
    /// Evaluated against each row.
    When(Rc<dyn Fn(&R) -> bool>),
}

impl<R> Clone for ActionDisabled<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(*value),
            Self::When(predicate) => Self::When(predicate.clone()),
        }
    }
}

impl<R> ActionDisabled<R> {
    /// Resolves the disabled state for `row`.
    pub fn resolve(&self, row: &R) -> bool {
        match self {
            Self::Static(value) => *value,
            Self::When(predicate) => predicate(row),
        }
    }
}

/// Operation invoked against a single row.
pub struct RowAction<R> {
    /// Stable action id.
    pub id: String,
    /// Label used for tooltips, menu items, and `aria-label`.
    pub label: String,
    /// Icon token resolved by the renderer.
    pub icon: String,
    /// Visual emphasis.
    pub tone: ActionTone,
    /// Always render inside the overflow menu.
    pub show_in_menu: bool,
    /// Disabled state.
    pub disabled: ActionDisabled<R>,
    /// Invoked with the row.
    pub handler: Rc<dyn Fn(&R)>,
}

impl<R> Clone for RowAction<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            tone: self.tone,
            show_in_menu: self.show_in_menu,
            disabled: self.disabled.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<R> fmt::Debug for RowAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("show_in_menu", &self.show_in_menu)
            .finish()
    }
}

impl<R: GridRow> RowAction<R> {
    /// Creates an enabled inline action.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        handler: impl Fn(&R) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            tone: ActionTone::Standard,
            show_in_menu: false,
            disabled: ActionDisabled::Static(false),
            handler: Rc::new(handler),
        }
    }

    /// Forces the action into the overflow menu.
    pub fn in_menu(mut self) -> Self {
        self.show_in_menu = true;
        self
    }

    /// Marks the action destructive.
    pub fn danger(mut self) -> Self {
        self.tone = ActionTone::Danger;
        self
    }

    /// Sets a static disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = ActionDisabled::Static(disabled);
        self
    }

    /// Sets a per-row disabled predicate.
    pub fn disabled_when(mut self, predicate: impl Fn(&R) -> bool + 'static) -> Self {
        self.disabled = ActionDisabled::When(Rc::new(predicate));
        self
    }

    /// Whether the action is disabled for `row`.
    pub fn is_disabled(&self, row: &R) -> bool {
        self.disabled.resolve(row)
    }
}

/// Operation invoked once against every selected row.
pub struct BulkAction<R> {
    /// Stable action id.
    pub id: String,
    /// Button label.
    pub label: String,
    /// Icon token resolved by the renderer.
    pub icon: String,
    /// Tooltip text; falls back to the label.
    pub tooltip: Option<String>,
    /// Visual emphasis.
    pub tone: ActionTone,
    /// Invoked with the materialized selected rows.
    pub handler: Rc<dyn Fn(&[R])>,
}

impl<R> Clone for BulkAction<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            tooltip: self.tooltip.clone(),
            tone: self.tone,
            handler: self.handler.clone(),
        }
    }
}

impl<R> fmt::Debug for BulkAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish()
    }
}

impl<R: GridRow> BulkAction<R> {
    /// Creates a bulk action.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        handler: impl Fn(&[R]) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            tooltip: None,
            tone: ActionTone::Standard,
            handler: Rc::new(handler),
        }
    }

    /// Sets the tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Marks the action destructive.
    pub fn danger(mut self) -> Self {
        self.tone = ActionTone::Danger;
        self
    }

    /// Tooltip text, falling back to the label.
    pub fn tooltip_text(&self) -> &str {
        self.tooltip.as_deref().unwrap_or(&self.label)
    }
}
