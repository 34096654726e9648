//! Centralized icon names, sizing tokens, and the `Icon` primitive.
//!
//! Row and bulk actions name their icons with plain string tokens so headless configuration stays
//! renderer-agnostic; [`IconName::from_token`] resolves those tokens here.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Closed set of icons used by the primitive library and the data grid.
pub enum IconName {
    /// Plus sign.
    Add,
    /// Archive box.
    Archive,
    /// Ascending sort arrow.
    ArrowUp,
    /// Descending sort arrow.
    ArrowDown,
    /// Unsorted header affordance.
    ArrowSort,
    /// Checkmark.
    Checkmark,
    /// Downward chevron.
    ChevronDown,
    /// Leftward chevron.
    ChevronLeft,
    /// Rightward chevron.
    ChevronRight,
    /// Column visibility.
    Columns,
    /// Clipboard copy.
    Copy,
    /// Trash can.
    Delete,
    /// Density selector.
    Density,
    /// Close/dismiss cross.
    Dismiss,
    /// Download arrow.
    Download,
    /// Vertical grip for drag handles.
    DragHandle,
    /// Pencil.
    Edit,
    /// Email envelope.
    Mail,
    /// Eye.
    Eye,
    /// Funnel.
    Filter,
    /// Horizontal ellipsis for overflow menus.
    More,
    /// Open in a new surface.
    Open,
    /// Circular refresh arrow.
    Refresh,
    /// Magnifier.
    Search,
    /// Filled star.
    Star,
    /// Half-filled star.
    StarHalf,
    /// Outlined star.
    StarEmpty,
    /// Warning triangle.
    Warning,
}

impl IconName {
    /// Resolves a configuration token such as `"edit"` or `"delete"`.
    pub fn from_token(token: &str) -> Option<Self> {
        let icon = match token.trim().to_ascii_lowercase().as_str() {
            "add" | "plus" => Self::Add,
            "archive" => Self::Archive,
            "arrow-up" | "sort-asc" => Self::ArrowUp,
            "arrow-down" | "sort-desc" => Self::ArrowDown,
            "sort" => Self::ArrowSort,
            "check" | "checkmark" => Self::Checkmark,
            "chevron-down" => Self::ChevronDown,
            "chevron-left" => Self::ChevronLeft,
            "chevron-right" => Self::ChevronRight,
            "columns" => Self::Columns,
            "copy" | "clipboard" => Self::Copy,
            "delete" | "trash" | "remove" => Self::Delete,
            "density" => Self::Density,
            "close" | "dismiss" => Self::Dismiss,
            "download" | "export" => Self::Download,
            "drag" | "drag-handle" => Self::DragHandle,
            "edit" | "pencil" => Self::Edit,
            "mail" | "email" => Self::Mail,
            "eye" | "view" => Self::Eye,
            "filter" => Self::Filter,
            "more" | "overflow" => Self::More,
            "open" | "launch" => Self::Open,
            "refresh" | "reload" => Self::Refresh,
            "search" => Self::Search,
            "star" => Self::Star,
            "star-half" => Self::StarHalf,
            "star-empty" => Self::StarEmpty,
            "warning" => Self::Warning,
            _ => return None,
        };
        Some(icon)
    }

    /// Resolves a token, falling back to the overflow glyph for unknown names.
    pub fn from_token_or_more(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Self::More)
    }

    /// Stable `data-ui-icon` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Archive => "archive",
            Self::ArrowUp => "arrow-up",
            Self::ArrowDown => "arrow-down",
            Self::ArrowSort => "sort",
            Self::Checkmark => "checkmark",
            Self::ChevronDown => "chevron-down",
            Self::ChevronLeft => "chevron-left",
            Self::ChevronRight => "chevron-right",
            Self::Columns => "columns",
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Density => "density",
            Self::Dismiss => "dismiss",
            Self::Download => "download",
            Self::DragHandle => "drag-handle",
            Self::Edit => "edit",
            Self::Mail => "mail",
            Self::Eye => "eye",
            Self::Filter => "filter",
            Self::More => "more",
            Self::Open => "open",
            Self::Refresh => "refresh",
            Self::Search => "search",
            Self::Star => "star",
            Self::StarHalf => "star-half",
            Self::StarEmpty => "star-empty",
            Self::Warning => "warning",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Archive => "\u{1f5c3}",
            Self::ArrowUp => "\u{2191}",
            Self::ArrowDown => "\u{2193}",
            Self::ArrowSort => "\u{2195}",
            Self::Checkmark => "\u{2713}",
            Self::ChevronDown => "\u{2304}",
            Self::ChevronLeft => "\u{2039}",
            Self::ChevronRight => "\u{203a}",
            Self::Columns => "\u{2016}",
            Self::Copy => "\u{2398}",
            Self::Delete => "\u{1f5d1}",
            Self::Density => "\u{2261}",
            Self::Dismiss => "\u{2715}",
            Self::Download => "\u{2913}",
            Self::DragHandle => "\u{22ee}",
            Self::Edit => "\u{270e}",
            Self::Mail => "\u{2709}",
            Self::Eye => "\u{25c9}",
            Self::Filter => "\u{29e9}",
            Self::More => "\u{22ef}",
            Self::Open => "\u{2197}",
            Self::Refresh => "\u{21bb}",
            Self::Search => "\u{2315}",
            Self::Star => "\u{2605}",
            Self::StarHalf => "\u{2bea}",
            Self::StarEmpty => "\u{2606}",
            Self::Warning => "\u{26a0}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Icon sizing tokens.
pub enum IconSize {
    /// Extra small inline glyph.
    Xs,
    /// Default inline glyph.
    Sm,
    /// Button glyph.
    Md,
    /// Prominent glyph.
    Lg,
}

impl Default for IconSize {
    fn default() -> Self {
        Self::Sm
    }
}

impl IconSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[component]
/// Decorative icon glyph. Accessible names belong on the owning control.
pub fn Icon(icon: IconName, #[prop(default = IconSize::Sm)] size: IconSize) -> impl IntoView {
    view! {
        <span
            class="ui-icon"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="icon"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
        >
            {icon.glyph()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn action_tokens_resolve_case_insensitively() {
        assert_eq!(IconName::from_token("Edit"), Some(IconName::Edit));
        assert_eq!(IconName::from_token(" trash "), Some(IconName::Delete));
        assert_eq!(IconName::from_token("rocket"), None);
        assert_eq!(IconName::from_token_or_more("rocket"), IconName::More);
    }

    #[test]
    fn tokens_round_trip_through_resolution() {
        for icon in [
            IconName::Archive,
            IconName::DragHandle,
            IconName::StarHalf,
            IconName::Refresh,
        ] {
            assert_eq!(IconName::from_token(icon.token()), Some(icon));
        }
    }
}
