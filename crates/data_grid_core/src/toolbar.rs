//! Toolbar state derived from grid configuration and live counts.

use crate::config::DataGridConfig;
use crate::density::Density;
use crate::export::ExportFormat;

/// Leading region of the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarLead {
    /// Title and subtitle when nothing is selected.
    Title {
        /// Heading.
        title: Option<String>,
        /// Secondary line.
        subtitle: Option<String>,
    },
    /// Selection indicator that replaces the title while rows are selected.
    Selection {
        /// Selected row count.
        count: usize,
        /// `N selected` label.
        label: String,
    },
}

/// Everything the toolbar renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarModel {
    /// Leading region.
    pub lead: ToolbarLead,
    /// Search placeholder when the search box is shown.
    pub search_placeholder: Option<String>,
    /// Current search text.
    pub search: String,
    /// Add-row button.
    pub show_add: bool,
    /// Column visibility toggle.
    pub show_columns: bool,
    /// Filter panel toggle.
    pub show_filters: bool,
    /// Density selector, with the active preset.
    pub density: Option<Density>,
    /// Export formats; empty hides the menu.
    pub export_formats: Vec<ExportFormat>,
    /// Refresh button.
    pub show_refresh: bool,
    /// Bulk-action buttons render in selection mode.
    pub show_bulk_actions: bool,
    /// Filtered row count.
    pub filtered_count: usize,
}

/// `N selected` indicator text.
pub fn selection_label(count: usize) -> String {
    format!("{count} selected")
}

/// Live counts fed into [`toolbar_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarCounts {
    /// Materialized selected rows.
    pub selected: usize,
    /// Rows surviving search and filters.
    pub filtered: usize,
}

/// Derives the toolbar model. Standard affordances hide while rows are selected.
pub fn toolbar_model(
    config: &DataGridConfig,
    search: &str,
    density: Density,
    counts: ToolbarCounts,
    has_bulk_actions: bool,
) -> ToolbarModel {
    let toolbar = &config.toolbar;
    let selecting = counts.selected > 0;
    let standard = !selecting;

    let lead = if selecting {
        ToolbarLead::Selection {
            count: counts.selected,
            label: selection_label(counts.selected),
        }
    } else {
        ToolbarLead::Title {
            title: toolbar.title.clone(),
            subtitle: toolbar.subtitle.clone(),
        }
    };

    ToolbarModel {
        lead,
        search_placeholder: (standard && toolbar.show_search && config.filtering.search)
            .then(|| toolbar.search_placeholder.clone()),
        search: search.to_string(),
        show_add: standard && toolbar.show_add && config.inline_add.enabled,
        show_columns: standard && toolbar.show_columns,
        show_filters: standard && toolbar.show_filters && config.filtering.enabled,
        density: (standard && toolbar.show_density).then_some(density),
        export_formats: if standard && toolbar.show_export {
            config.export.formats.clone()
        } else {
            Vec::new()
        },
        show_refresh: standard && toolbar.show_refresh,
        show_bulk_actions: selecting && has_bulk_actions,
        filtered_count: counts.filtered,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn selection_replaces_title_and_standard_affordances() {
        let mut config = DataGridConfig::default();
        config.toolbar.title = Some("Users".to_string());
        config.inline_add.enabled = true;

        let idle = toolbar_model(
            &config,
            "",
            Density::Standard,
            ToolbarCounts {
                selected: 0,
                filtered: 10,
            },
            true,
        );
        assert_eq!(
            idle.lead,
            ToolbarLead::Title {
                title: Some("Users".to_string()),
                subtitle: None,
            }
        );
        assert!(idle.show_add);
        assert!(!idle.show_bulk_actions);
        assert_eq!(idle.search_placeholder.as_deref(), Some("Search..."));

        let selecting = toolbar_model(
            &config,
            "",
            Density::Standard,
            ToolbarCounts {
                selected: 3,
                filtered: 10,
            },
            true,
        );
        assert_eq!(
            selecting.lead,
            ToolbarLead::Selection {
                count: 3,
                label: "3 selected".to_string(),
            }
        );
        assert!(selecting.show_bulk_actions);
        assert!(selecting.export_formats.is_empty());
        assert_eq!(selecting.density, None);
    }

    #[test]
    fn flags_hide_individual_affordances() {
        let mut config = DataGridConfig::default();
        config.toolbar.show_refresh = false;
        config.toolbar.show_search = false;
        let model = toolbar_model(&config, "x", Density::Compact, ToolbarCounts::default(), false);
        assert!(!model.show_refresh);
        assert_eq!(model.search_placeholder, None);
        assert!(!model.show_add);
        assert_eq!(model.density, Some(Density::Compact));
    }
}
