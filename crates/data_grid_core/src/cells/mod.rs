//! Cell renderer set: a closed column-kind tag plus per-kind view models.
//!
//! [`cell_view`] maps a column and row to the inputs a renderer needs. Renderers stay pure
//! functions of the returned [`CellView`]; the actions column is laid out separately by
//! [`actions_view`] because it depends on hover state and the configured actions.

mod actions;
mod avatar;
mod currency;
mod metrics;
mod status;

pub use actions::{actions_view, ActionButtonView, ActionsView};
pub use avatar::{avatar_view, initials, AvatarOptions, AvatarView};
pub use currency::{CurrencyError, CurrencyFormatter, DEFAULT_CURRENCY, DEFAULT_LOCALE};
pub use metrics::{progress_percent, progress_view, rating_view, ProgressView, RatingView, StarFill};
pub use status::{StatusPalette, StatusTone};

use crate::column::ColumnDef;
use crate::model::{CellValue, GridRow};

/// Default maximum for progress columns.
pub const DEFAULT_PROGRESS_MAX: f64 = 100.0;
/// Default star count for rating columns.
pub const DEFAULT_RATING_MAX: u8 = 5;

/// Column type tag selecting the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellKind {
    /// Plain text.
    #[default]
    Text,
    /// Right-aligned numeric text.
    Number,
    /// Status badge colored through a palette.
    Status(StatusPalette),
    /// Avatar with initials plus a label.
    Avatar(AvatarOptions),
    /// Progress bar over `value / max`.
    Progress {
        /// Value representing a full bar.
        max: f64,
    },
    /// Star rating.
    Rating {
        /// Star count.
        max: u8,
    },
    /// Locale-aware currency.
    Currency(CurrencyFormatter),
    /// Primary text with an optional secondary line.
    TwoLine {
        /// Field holding the secondary line.
        secondary_field: String,
    },
    /// Drag handle affordance; carries no data.
    DragHandle,
    /// Synthetic row-actions column.
    Actions,
}

impl CellKind {
    /// Progress column with the default maximum.
    pub fn progress() -> Self {
        Self::Progress {
            max: DEFAULT_PROGRESS_MAX,
        }
    }

    /// Rating column with the default star count.
    pub fn rating() -> Self {
        Self::Rating {
            max: DEFAULT_RATING_MAX,
        }
    }

    /// Stable `data-ui-kind` token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Status(_) => "status",
            Self::Avatar(_) => "avatar",
            Self::Progress { .. } => "progress",
            Self::Rating { .. } => "rating",
            Self::Currency(_) => "currency",
            Self::TwoLine { .. } => "two-line",
            Self::DragHandle => "drag-handle",
            Self::Actions => "actions",
        }
    }

    /// Whether cells of this kind read a row field.
    pub fn holds_data(&self) -> bool {
        !matches!(self, Self::DragHandle | Self::Actions)
    }

    /// Whether the cell content aligns to the trailing edge.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Currency(_))
    }

    /// Display text used when a column has no formatter.
    pub fn default_text(&self, value: &CellValue) -> String {
        match self {
            Self::Currency(formatter) => value
                .as_f64()
                .map(|amount| formatter.format(amount))
                .unwrap_or_else(|| value.display()),
            Self::Progress { max } if !value.is_null() => {
                progress_view(value.as_f64(), *max).label
            }
            Self::DragHandle | Self::Actions => String::new(),
            _ => value.display(),
        }
    }

    /// Converts text typed into an editor back into a cell value.
    ///
    /// Blank input becomes [`CellValue::Null`]. Numeric kinds keep unparseable input as text so
    /// a column validator can report it.
    pub fn parse_input(&self, text: &str) -> CellValue {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match self {
            Self::Number | Self::Currency(_) | Self::Progress { .. } | Self::Rating { .. } => {
                match trimmed.replace(',', "").parse::<f64>() {
                    Ok(number) if number.is_finite() => CellValue::Number(number),
                    _ => CellValue::Text(text.to_string()),
                }
            }
            _ => CellValue::Text(text.to_string()),
        }
    }
}

/// Render inputs for one body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Plain text.
    Text(String),
    /// Numeric text.
    Number(String),
    /// Status badge.
    Status {
        /// Badge label.
        label: String,
        /// Palette tone.
        tone: StatusTone,
    },
    /// Avatar plus label.
    Avatar(AvatarView),
    /// Progress bar.
    Progress(ProgressView),
    /// Star rating.
    Rating(RatingView),
    /// Formatted currency.
    Currency(String),
    /// Primary plus secondary text.
    TwoLine {
        /// First line.
        primary: String,
        /// Second line, omitted when blank.
        secondary: Option<String>,
    },
    /// Drag handle.
    DragHandle,
    /// Placeholder for the actions column; see [`actions_view`].
    Actions,
}

/// Dispatches `column` and `row` to the matching view model.
pub fn cell_view<R: GridRow>(column: &ColumnDef<R>, row: &R) -> CellView {
    let value = column.value(row);
    match &column.kind {
        CellKind::Text => CellView::Text(column.formatted(row)),
        CellKind::Number => CellView::Number(column.formatted(row)),
        CellKind::Currency(_) => CellView::Currency(column.formatted(row)),
        CellKind::Status(palette) => CellView::Status {
            label: column.formatted(row),
            tone: palette.tone_for(&value.display()),
        },
        CellKind::Avatar(options) => {
            let secondary = options
                .secondary_field
                .as_deref()
                .map(|field| row.field(field).display());
            let image = options
                .image_field
                .as_deref()
                .map(|field| row.field(field).display());
            CellView::Avatar(avatar_view(
                &column.formatted(row),
                secondary.as_deref(),
                options.show_secondary,
                image.as_deref(),
            ))
        }
        CellKind::Progress { max } => CellView::Progress(progress_view(value.as_f64(), *max)),
        CellKind::Rating { max } => CellView::Rating(rating_view(value.as_f64(), *max)),
        CellKind::TwoLine { secondary_field } => {
            let secondary = row.field(secondary_field);
            CellView::TwoLine {
                primary: column.formatted(row),
                secondary: (!secondary.is_blank()).then(|| secondary.display()),
            }
        }
        CellKind::DragHandle => CellView::DragHandle,
        CellKind::Actions => CellView::Actions,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Record;

    #[test]
    fn dispatch_follows_column_kind() {
        let row = Record::new()
            .with("status", "active")
            .with("progress", 150)
            .with("salary", 1200)
            .with("title", "Engineer")
            .with("team", "");

        let status = ColumnDef::<Record>::new("status", "Status").kind(CellKind::Status(
            StatusPalette::new().with("active", StatusTone::Success),
        ));
        assert_eq!(
            cell_view(&status, &row),
            CellView::Status {
                label: "active".to_string(),
                tone: StatusTone::Success,
            }
        );

        let progress = ColumnDef::<Record>::new("progress", "Progress").kind(CellKind::progress());
        match cell_view(&progress, &row) {
            CellView::Progress(view) => assert_eq!(view.percent, 100.0),
            other => panic!("unexpected view {other:?}"),
        }

        let salary = ColumnDef::<Record>::new("salary", "Salary")
            .kind(CellKind::Currency(CurrencyFormatter::default()));
        assert_eq!(
            cell_view(&salary, &row),
            CellView::Currency("$1,200.00".to_string())
        );

        let title = ColumnDef::<Record>::new("title", "Title").kind(CellKind::TwoLine {
            secondary_field: "team".to_string(),
        });
        assert_eq!(
            cell_view(&title, &row),
            CellView::TwoLine {
                primary: "Engineer".to_string(),
                secondary: None,
            }
        );
    }

    #[test]
    fn avatar_reads_secondary_field() {
        let row = Record::new().with("name", "Jane Doe").with("email", "jane@x.io");
        let column = ColumnDef::<Record>::new("name", "Name").kind(CellKind::Avatar(AvatarOptions {
            secondary_field: Some("email".to_string()),
            show_secondary: true,
            image_field: None,
        }));
        match cell_view(&column, &row) {
            CellView::Avatar(view) => {
                assert_eq!(view.initials, "JD");
                assert_eq!(view.secondary.as_deref(), Some("jane@x.io"));
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn non_data_kinds_render_no_text() {
        assert_eq!(CellKind::Actions.default_text(&"x".into()), "");
        assert!(!CellKind::DragHandle.holds_data());
        assert!(CellKind::Number.is_numeric());
    }

    #[test]
    fn editor_input_parses_by_kind() {
        assert_eq!(CellKind::Number.parse_input("1,250.5"), CellValue::Number(1250.5));
        assert_eq!(CellKind::rating().parse_input("abc"), CellValue::from("abc"));
        assert_eq!(CellKind::Text.parse_input("42"), CellValue::from("42"));
        assert_eq!(CellKind::Text.parse_input("   "), CellValue::Null);
    }
}
