//! Structural, control, overlay, and data-display primitives shared by the grid and showcase.

use data_grid_core::cells::StatusTone;
use data_grid_core::ActionTone;
use leptos::ev::{FocusEvent, KeyboardEvent, MouseEvent};
use leptos::*;

use crate::{Icon, IconName, IconSize};

mod controls;
mod data_display;
mod layout;
mod navigation;
mod overlays;

pub use controls::{Button, CheckboxField, IconButton, ProgressBar, SelectField, TextField};
pub use data_display::{Badge, DataTable, EmptyState, Heading, Surface, Text};
pub use layout::{Cluster, Stack};
pub use navigation::ToolBar;
pub use overlays::{MenuItem, MenuSeparator, MenuSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Semantic surface variants for structural primitives.
pub enum SurfaceVariant {
    /// Primary surface.
    Standard,
    /// Secondary or muted surface.
    Muted,
    /// Inset surface.
    Inset,
}

impl Default for SurfaceVariant {
    fn default() -> Self {
        Self::Standard
    }
}

impl SurfaceVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Muted => "muted",
            Self::Inset => "inset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Semantic elevation levels.
pub enum Elevation {
    /// Flat surface.
    Flat,
    /// Raised surface.
    Raised,
    /// Floating overlay.
    Overlay,
}

impl Default for Elevation {
    fn default() -> Self {
        Self::Flat
    }
}

impl Elevation {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Raised => "raised",
            Self::Overlay => "overlay",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Button emphasis.
pub enum ButtonVariant {
    /// Standard action.
    Standard,
    /// Primary call to action.
    Primary,
    /// Borderless toolbar/menu action.
    Quiet,
    /// Destructive action.
    Danger,
}

impl Default for ButtonVariant {
    fn default() -> Self {
        Self::Standard
    }
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Danger => "danger",
        }
    }
}

impl From<ActionTone> for ButtonVariant {
    fn from(tone: ActionTone) -> Self {
        match tone {
            ActionTone::Standard => Self::Quiet,
            ActionTone::Danger => Self::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Button sizing tokens, usually chosen from the grid density.
pub enum ButtonSize {
    /// Dense button.
    Sm,
    /// Default button.
    Md,
    /// Roomy button.
    Lg,
}

impl Default for ButtonSize {
    fn default() -> Self {
        Self::Md
    }
}

impl ButtonSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Input-field variants.
pub enum FieldVariant {
    /// Standalone input.
    Standard,
    /// Input embedded in a table cell.
    Inset,
}

impl Default for FieldVariant {
    fn default() -> Self {
        Self::Standard
    }
}

impl FieldVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Inset => "inset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Text roles.
pub enum TextRole {
    /// Body text.
    Body,
    /// Label text.
    Label,
    /// Caption text.
    Caption,
    /// Title text.
    Title,
}

impl Default for TextRole {
    fn default() -> Self {
        Self::Body
    }
}

impl TextRole {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Label => "label",
            Self::Caption => "caption",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Semantic text and badge tones.
pub enum TextTone {
    /// Primary text.
    Primary,
    /// Secondary text.
    Secondary,
    /// Positive state.
    Success,
    /// Attention state.
    Warning,
    /// Failure state.
    Danger,
    /// Informational state.
    Info,
}

impl Default for TextTone {
    fn default() -> Self {
        Self::Primary
    }
}

impl TextTone {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

impl From<StatusTone> for TextTone {
    fn from(tone: StatusTone) -> Self {
        match tone {
            StatusTone::Success => Self::Success,
            StatusTone::Warning => Self::Warning,
            StatusTone::Error => Self::Danger,
            StatusTone::Info => Self::Info,
            StatusTone::Default => Self::Secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Layout gap tokens.
pub enum LayoutGap {
    /// No gap.
    None,
    /// Small gap.
    Sm,
    /// Default gap.
    Md,
    /// Large gap.
    Lg,
}

impl Default for LayoutGap {
    fn default() -> Self {
        Self::Md
    }
}

impl LayoutGap {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Layout padding tokens.
pub enum LayoutPadding {
    /// No padding.
    None,
    /// Compact padding.
    Sm,
    /// Default padding.
    Md,
}

impl Default for LayoutPadding {
    fn default() -> Self {
        Self::Md
    }
}

impl LayoutPadding {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Cross-axis alignment tokens.
pub enum LayoutAlign {
    /// Stretch/fill alignment.
    Stretch,
    /// Start alignment.
    Start,
    /// Center alignment.
    Center,
}

impl Default for LayoutAlign {
    fn default() -> Self {
        Self::Stretch
    }
}

impl LayoutAlign {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Stretch => "stretch",
            Self::Start => "start",
            Self::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Main-axis justification tokens.
pub enum LayoutJustify {
    /// Pack at the start.
    Start,
    /// Space between items.
    Between,
    /// Pack at the end.
    End,
}

impl Default for LayoutJustify {
    fn default() -> Self {
        Self::Start
    }
}

impl LayoutJustify {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Between => "between",
            Self::End => "end",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_appends_only_non_empty_values() {
        assert_eq!(merge_layout_class("ui-button", None), "ui-button");
        assert_eq!(merge_layout_class("ui-button", Some("")), "ui-button");
        assert_eq!(
            merge_layout_class("ui-button", Some("grid-toolbar-add")),
            "ui-button grid-toolbar-add"
        );
    }

    #[test]
    fn grid_tones_map_onto_primitive_tokens() {
        assert_eq!(TextTone::from(StatusTone::Error).token(), "danger");
        assert_eq!(TextTone::from(StatusTone::Default).token(), "secondary");
        assert_eq!(ButtonVariant::from(ActionTone::Danger).token(), "danger");
        assert_eq!(ButtonVariant::from(ActionTone::Standard).token(), "quiet");
    }
}
