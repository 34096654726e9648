//! Column definitions and the column-derivation step.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::cells::CellKind;
use crate::config::{ColumnPin, RowActionsConfig, ACTIONS_FIELD};
use crate::model::{CellValue, GridRow};
use crate::GridError;

/// Per-cell display formatter.
pub type CellFormatter<R> = Rc<dyn Fn(&CellValue, &R) -> String>;

/// Per-cell validator returning an error message for invalid values.
pub type CellValidator<R> = Rc<dyn Fn(&CellValue, &R) -> Option<String>>;

/// Declarative column definition.
pub struct ColumnDef<R> {
    /// Row field rendered by this column.
    pub field: String,
    /// Header label.
    pub header: String,
    /// Fixed width in pixels.
    pub width: Option<u32>,
    /// Flex grow factor when no fixed width is set.
    pub flex: Option<f32>,
    /// Renderer dispatch tag.
    pub kind: CellKind,
    /// Whether header activation sorts this column.
    pub sortable: bool,
    /// Whether structured filters may target this column.
    pub filterable: bool,
    /// Explicit editability. `Some(true)` enables editing; `Some(false)` also hides the column
    /// from inline-add; `None` is read-only but still offered by inline-add.
    pub editable: Option<bool>,
    /// Pinning side.
    pub pinned: Option<ColumnPin>,
    /// Optional display formatter.
    pub formatter: Option<CellFormatter<R>>,
    /// Optional validator run before commits.
    pub validator: Option<CellValidator<R>>,
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            header: self.header.clone(),
            width: self.width,
            flex: self.flex,
            kind: self.kind.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            editable: self.editable,
            pinned: self.pinned,
            formatter: self.formatter.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .field("has_formatter", &self.formatter.is_some())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl<R: GridRow> ColumnDef<R> {
    /// Creates a sortable, filterable text column.
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            width: None,
            flex: None,
            kind: CellKind::Text,
            sortable: true,
            filterable: true,
            editable: None,
            pinned: None,
            formatter: None,
            validator: None,
        }
    }

    /// Sets the renderer kind.
    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets a fixed width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets a flex factor.
    pub fn flex(mut self, flex: f32) -> Self {
        self.flex = Some(flex);
        self
    }

    /// Sets editability.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// Enables or disables header sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables or disables structured filtering.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Pins the column.
    pub fn pinned(mut self, pin: ColumnPin) -> Self {
        self.pinned = Some(pin);
        self
    }

    /// Installs a display formatter.
    pub fn formatter(mut self, formatter: impl Fn(&CellValue, &R) -> String + 'static) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    /// Installs a validator.
    pub fn validator(
        mut self,
        validator: impl Fn(&CellValue, &R) -> Option<String> + 'static,
    ) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    /// Raw value for `row`.
    pub fn value(&self, row: &R) -> CellValue {
        row.field(&self.field)
    }

    /// Display text for `row`: the caller formatter when present, otherwise the kind's default.
    pub fn formatted(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.formatter {
            Some(formatter) => formatter(&value, row),
            None => self.kind.default_text(&value),
        }
    }

    /// Runs the validator, if any.
    pub fn validate(&self, value: &CellValue, row: &R) -> Option<String> {
        self.validator
            .as_ref()
            .and_then(|validator| validator(value, row))
    }

    /// Whether cells in this column accept edits.
    pub fn is_editable(&self) -> bool {
        self.editable == Some(true) && self.kind.holds_data()
    }

    /// Whether this is the injected actions column.
    pub fn is_actions(&self) -> bool {
        matches!(self.kind, CellKind::Actions)
    }

    /// Whether the column participates in text exports.
    pub fn is_exportable(&self) -> bool {
        self.kind.holds_data()
    }

    fn actions_column(config: &RowActionsConfig) -> Self {
        Self {
            field: ACTIONS_FIELD.to_string(),
            header: config.header.clone(),
            width: Some(config.column_width),
            flex: None,
            kind: CellKind::Actions,
            sortable: false,
            filterable: false,
            editable: Some(false),
            pinned: config.pinned,
            formatter: None,
            validator: None,
        }
    }
}

/// Derives the effective column list.
///
/// When `has_row_actions` is set, a non-sortable, non-filterable actions column is appended
/// using the width and pinning from `config`.
///
/// # Errors
///
/// Returns [`GridError::DuplicateColumn`] when two columns share a field and
/// [`GridError::ActionsColumnCollision`] when a caller column claims the actions field while row
/// actions are configured.
pub fn derive_columns<R: GridRow>(
    columns: &[ColumnDef<R>],
    has_row_actions: bool,
    config: &RowActionsConfig,
) -> Result<Vec<ColumnDef<R>>, GridError> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.field.as_str()) {
            return Err(GridError::DuplicateColumn(column.field.clone()));
        }
        if has_row_actions && column.field == ACTIONS_FIELD {
            return Err(GridError::ActionsColumnCollision(column.field.clone()));
        }
    }

    let mut derived = columns.to_vec();
    if has_row_actions {
        derived.push(ColumnDef::actions_column(config));
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Record;

    fn columns() -> Vec<ColumnDef<Record>> {
        vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("email", "Email").editable(true),
        ]
    }

    #[test]
    fn actions_column_is_appended_only_when_actions_exist() {
        let config = RowActionsConfig::default();
        let without = derive_columns(&columns(), false, &config).expect("derive");
        assert_eq!(without.len(), 2);

        let with = derive_columns(&columns(), true, &config).expect("derive");
        let actions = with.last().expect("actions column");
        assert_eq!(actions.field, ACTIONS_FIELD);
        assert_eq!(actions.width, Some(120));
        assert_eq!(actions.pinned, Some(ColumnPin::Right));
        assert!(!actions.sortable);
        assert!(!actions.filterable);
    }

    #[test]
    fn caller_actions_field_collides_when_actions_configured() {
        let mut declared = columns();
        declared.push(ColumnDef::new(ACTIONS_FIELD, "Mine"));
        let config = RowActionsConfig::default();

        assert!(derive_columns(&declared, false, &config).is_ok());
        assert_eq!(
            derive_columns(&declared, true, &config).expect_err("collision"),
            GridError::ActionsColumnCollision(ACTIONS_FIELD.to_string())
        );
    }

    #[test]
    fn duplicate_fields_fail_fast() {
        let mut declared = columns();
        declared.push(ColumnDef::new("name", "Again"));
        assert_eq!(
            derive_columns(&declared, false, &RowActionsConfig::default()).expect_err("dup"),
            GridError::DuplicateColumn("name".to_string())
        );
    }

    #[test]
    fn formatter_overrides_default_text() {
        let row = Record::new().with("name", "ada");
        let column = ColumnDef::<Record>::new("name", "Name")
            .formatter(|value, _| value.display().to_uppercase());
        assert_eq!(column.formatted(&row), "ADA");
    }
}
