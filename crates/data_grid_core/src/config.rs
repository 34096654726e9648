//! Serializable grid configuration with documented defaults.
//!
//! Every section is independently optional: fields missing from a deserialized payload fall back
//! to the section's [`Default`] implementation.

use serde::{Deserialize, Serialize};

use crate::density::{Density, ThemeMode};
use crate::export::ExportFormat;
use crate::model::{EditMode, FilterModel, Record, SelectionMode, SortItem};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Default page-size choices offered by the pager.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
/// Field name reserved for the synthetic actions column.
pub const ACTIONS_FIELD: &str = "actions";
/// Default container height used to size the loading skeleton.
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Row selection options.
pub struct SelectionConfig {
    /// Whether rows can be selected at all.
    pub enabled: bool,
    /// Initial membership semantics.
    pub mode: SelectionMode,
    /// Render a leading checkbox column.
    pub checkbox: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SelectionMode::Include,
            checkbox: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Pager options.
pub struct PaginationConfig {
    /// Whether rows are paginated; when disabled every filtered row renders.
    pub enabled: bool,
    /// Initial page size.
    pub page_size: usize,
    /// Page-size choices.
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Header sorting options.
pub struct SortingConfig {
    /// Whether header activation sorts.
    pub enabled: bool,
    /// Sort applied on mount.
    pub initial: Option<SortItem>,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Search and structured filter options.
pub struct FilteringConfig {
    /// Whether structured filters are available.
    pub enabled: bool,
    /// Whether the free-text search box is available.
    pub search: bool,
    /// Filter model applied on mount.
    pub initial: FilterModel,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search: true,
            initial: FilterModel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Editing options.
pub struct EditingConfig {
    /// Whether editable columns accept edits.
    pub enabled: bool,
    /// Cell-level or one-row-at-a-time editing.
    pub mode: EditMode,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: EditMode::Cell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How row actions are presented in the actions column.
pub enum ActionDisplay {
    /// Up to `max_inline` icon buttons plus an overflow menu.
    #[default]
    Menu,
    /// Every action as an icon button revealed on row hover.
    Hover,
    /// Every action as an always-visible icon button.
    Always,
}

impl ActionDisplay {
    /// Stable `data-ui-variant` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Hover => "hover",
            Self::Always => "always",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Column pinning side.
pub enum ColumnPin {
    /// Pinned to the leading edge.
    Left,
    /// Pinned to the trailing edge.
    #[default]
    Right,
}

impl ColumnPin {
    /// Stable `data-ui-pinned` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Synthetic actions column options.
pub struct RowActionsConfig {
    /// Presentation mode.
    pub display: ActionDisplay,
    /// Inline icon buttons shown before the overflow menu in [`ActionDisplay::Menu`] mode.
    pub max_inline: usize,
    /// Column width in pixels.
    pub column_width: u32,
    /// Pinning side; `None` leaves the column unpinned.
    pub pinned: Option<ColumnPin>,
    /// Header label.
    pub header: String,
}

impl Default for RowActionsConfig {
    fn default() -> Self {
        Self {
            display: ActionDisplay::Menu,
            max_inline: 2,
            column_width: 120,
            pinned: Some(ColumnPin::Right),
            header: "Actions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Where the inline-add row renders.
pub enum InlineAddPosition {
    /// Above the first body row.
    Top,
    /// Below the last body row.
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Inline row creation options.
pub struct InlineAddConfig {
    /// Whether the inline-add affordance renders.
    pub enabled: bool,
    /// Allow-list of fields offered as inputs; `None` offers every eligible column.
    pub fields: Option<Vec<String>>,
    /// Fields never offered as inputs.
    pub exclude_fields: Vec<String>,
    /// Fields that must be non-blank on submit.
    pub required_fields: Vec<String>,
    /// Values merged underneath entered values on submit.
    pub default_values: Record,
    /// Placeholder affordance label.
    pub placeholder: String,
    /// Row position.
    pub position: InlineAddPosition,
}

impl Default for InlineAddConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            fields: None,
            exclude_fields: Vec::new(),
            required_fields: Vec::new(),
            default_values: Record::new(),
            placeholder: "Add new row".to_string(),
            position: InlineAddPosition::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Toolbar visibility and copy.
pub struct ToolbarConfig {
    /// Whether the toolbar renders at all.
    pub visible: bool,
    /// Title shown when nothing is selected.
    pub title: Option<String>,
    /// Subtitle shown under the title.
    pub subtitle: Option<String>,
    /// Search box.
    pub show_search: bool,
    /// Add-row button.
    pub show_add: bool,
    /// Column-visibility toggle.
    pub show_columns: bool,
    /// Filter-panel toggle.
    pub show_filters: bool,
    /// Density selector.
    pub show_density: bool,
    /// Export menu.
    pub show_export: bool,
    /// Refresh button.
    pub show_refresh: bool,
    /// Search box placeholder.
    pub search_placeholder: String,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            visible: true,
            title: None,
            subtitle: None,
            show_search: true,
            show_add: true,
            show_columns: true,
            show_filters: true,
            show_density: true,
            show_export: true,
            show_refresh: true,
            search_placeholder: "Search...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Export menu options.
pub struct ExportConfig {
    /// Formats offered by the export menu.
    pub formats: Vec<ExportFormat>,
    /// Base file name; falls back to the toolbar title, then `export`.
    pub file_name: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Clipboard],
            file_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Full grid configuration surface. Every section is optional.
pub struct DataGridConfig {
    /// Initial density.
    pub density: Density,
    /// Light/dark flag forwarded to the root element.
    pub theme: ThemeMode,
    /// Selection section.
    pub selection: SelectionConfig,
    /// Pagination section.
    pub pagination: PaginationConfig,
    /// Sorting section.
    pub sorting: SortingConfig,
    /// Filtering section.
    pub filtering: FilteringConfig,
    /// Editing section.
    pub editing: EditingConfig,
    /// Row-actions section.
    pub row_actions: RowActionsConfig,
    /// Inline-add section.
    pub inline_add: InlineAddConfig,
    /// Toolbar section.
    pub toolbar: ToolbarConfig,
    /// Export section.
    pub export: ExportConfig,
    /// Container height used to size the loading skeleton.
    pub container_height: u32,
    /// Message shown when the filtered set is empty.
    pub empty_message: String,
}

impl Default for DataGridConfig {
    fn default() -> Self {
        Self {
            density: Density::Standard,
            theme: ThemeMode::Light,
            selection: SelectionConfig::default(),
            pagination: PaginationConfig::default(),
            sorting: SortingConfig::default(),
            filtering: FilteringConfig::default(),
            editing: EditingConfig::default(),
            row_actions: RowActionsConfig::default(),
            inline_add: InlineAddConfig::default(),
            toolbar: ToolbarConfig::default(),
            export: ExportConfig::default(),
            container_height: DEFAULT_CONTAINER_HEIGHT,
            empty_message: "No rows".to_string(),
        }
    }
}

impl DataGridConfig {
    /// Parses a JSON configuration payload, filling omitted sections with defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed payloads.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DataGridConfig::default();
        assert_eq!(config.density, Density::Standard);
        assert_eq!(config.pagination.page_size, 25);
        assert_eq!(config.selection.mode, SelectionMode::Include);
        assert_eq!(config.editing.mode, EditMode::Cell);
        assert_eq!(config.row_actions.display, ActionDisplay::Menu);
    }

    #[test]
    fn partial_json_fills_missing_sections() {
        let config = DataGridConfig::from_json(
            r#"{
                "density": "compact",
                "editing": { "mode": "row" },
                "row_actions": { "display": "hover" },
                "inline_add": { "enabled": true, "required_fields": ["email"] }
            }"#,
        )
        .expect("parse config");

        assert_eq!(config.density, Density::Compact);
        assert_eq!(config.editing.mode, EditMode::Row);
        assert!(config.editing.enabled);
        assert_eq!(config.row_actions.display, ActionDisplay::Hover);
        assert_eq!(config.row_actions.max_inline, 2);
        assert_eq!(config.inline_add.required_fields, vec!["email".to_string()]);
        assert_eq!(config.pagination, PaginationConfig::default());
    }
}
