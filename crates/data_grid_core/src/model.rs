//! Row, cell, and interaction-model types shared by the grid engine and its renderers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::GridError;

/// Field name the default row-id function reads.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Stable row identifier used to key selection, edit-mode, and commit maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row identifier from caller input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for RowId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

/// A single cell value read from a row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or explicitly empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` when the value is null or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// String cast used for search, display fallbacks, and text exports.
    ///
    /// Integral numbers print without a fractional part and null prints as an empty string.
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(text) => text.clone(),
        }
    }

    /// Numeric view of the value, parsing text when possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Null => None,
        }
    }

    /// Borrowed text when the value is [`CellValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// JSON projection used by the JSON export.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) if is_exact_integer(*value) => {
                Value::Number((*value as i64).into())
            }
            Self::Number(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn is_exact_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    value.to_string()
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Row contract consumed by the grid.
///
/// Implementations expose their fields by name so search, sorting, filtering, editing, and
/// export can operate without knowing the concrete row type.
pub trait GridRow: Clone + PartialEq + fmt::Debug + 'static {
    /// Field names in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Reads a field, returning [`CellValue::Null`] for unknown fields.
    fn field(&self, field: &str) -> CellValue;

    /// Writes a field.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidFieldValue`] when the value cannot be stored in `field`.
    fn set_field(&mut self, field: &str, value: CellValue) -> Result<(), GridError>;

    /// JSON object projection of the row.
    fn to_json(&self) -> Value {
        let object = self
            .field_names()
            .into_iter()
            .map(|name| (name.to_string(), self.field(name).to_json()))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(object)
    }
}

/// Caller-supplied row identifier function.
pub type RowIdFn<R> = Rc<dyn Fn(&R) -> RowId>;

/// Returns the row-id function that reads [`DEFAULT_ID_FIELD`].
pub fn default_row_id<R: GridRow>() -> RowIdFn<R> {
    Rc::new(|row: &R| RowId::new(row.field(DEFAULT_ID_FIELD).display()))
}

/// Dynamic field-map row used for inline-add drafts and schemaless data sets.
///
/// Fields keep the order they were inserted or deserialized in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, CellValue>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Reads a field.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.0.get(field)
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, field: &str) -> Option<CellValue> {
        self.0.shift_remove(field)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl GridRow for Record {
    fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    fn field(&self, field: &str) -> CellValue {
        self.0.get(field).cloned().unwrap_or_default()
    }

    fn set_field(&mut self, field: &str, value: CellValue) -> Result<(), GridError> {
        self.0.insert(field.to_string(), value);
        Ok(())
    }
}

/// Field-level validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Selection membership semantics.
pub enum SelectionMode {
    /// The id set enumerates selected rows.
    #[default]
    Include,
    /// The id set enumerates deselected rows; every other filtered row is selected.
    Exclude,
}

/// Selected row identifiers plus inclusion/exclusion semantics.
///
/// Selection is independent of pagination: ids of rows outside the visible page stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionModel {
    /// Membership semantics for [`SelectionModel::ids`].
    pub mode: SelectionMode,
    /// Row ids included or excluded depending on [`SelectionModel::mode`].
    pub ids: BTreeSet<RowId>,
}

impl SelectionModel {
    /// Returns whether `id` is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        match self.mode {
            SelectionMode::Include => self.ids.contains(id),
            SelectionMode::Exclude => !self.ids.contains(id),
        }
    }

    /// Flips membership of `id`.
    pub fn toggle(&mut self, id: &RowId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    /// Forces `id` into or out of the selection regardless of mode.
    pub fn set(&mut self, id: &RowId, selected: bool) {
        let listed = match self.mode {
            SelectionMode::Include => selected,
            SelectionMode::Exclude => !selected,
        };
        if listed {
            self.ids.insert(id.clone());
        } else {
            self.ids.remove(id);
        }
    }

    /// Resets to an empty inclusion set.
    pub fn clear(&mut self) {
        self.mode = SelectionMode::Include;
        self.ids.clear();
    }

    /// Replaces the selection with exactly `ids` in inclusion mode.
    pub fn select_only<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        self.mode = SelectionMode::Include;
        self.ids = ids.into_iter().cloned().collect();
    }

    /// Materializes the selected ids.
    ///
    /// In inclusion mode the id set is returned as-is. In exclusion mode `universe` (the filtered
    /// row ids) minus the excluded set is returned in `universe` order.
    pub fn selected_ids(&self, universe: &[RowId]) -> Vec<RowId> {
        match self.mode {
            SelectionMode::Include => self.ids.iter().cloned().collect(),
            SelectionMode::Exclude => universe
                .iter()
                .filter(|id| !self.ids.contains(*id))
                .cloned()
                .collect(),
        }
    }

    /// Drops ids that are no longer present in the data set.
    pub fn retain_known(&mut self, known: &BTreeSet<RowId>) {
        self.ids.retain(|id| known.contains(id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Sort direction for a single sort item.
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Stable token used by renderers and `aria-sort`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }
}

/// Next step in the `none -> asc -> desc -> none` header cycle.
pub fn next_sort_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

/// One `{field, direction}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    /// Sorted field.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Ordered sort items. Header activation keeps at most one item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortModel(pub Vec<SortItem>);

impl SortModel {
    /// Current direction for `field`, if sorted.
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        self.0
            .iter()
            .find(|item| item.field == field)
            .map(|item| item.direction)
    }

    /// Advances `field` through the header cycle and clears every other column's sort.
    pub fn toggle(&mut self, field: &str) -> Option<SortDirection> {
        let next = next_sort_direction(self.direction_for(field));
        self.0.clear();
        if let Some(direction) = next {
            self.0.push(SortItem {
                field: field.to_string(),
                direction,
            });
        }
        next
    }

    /// Returns `true` when no sort is applied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Structured filter operators.
pub enum FilterOperator {
    /// Case-insensitive substring match.
    Contains,
    /// Case-insensitive equality of the string cast (numeric equality for numbers).
    Equals,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    /// Value is null or blank text.
    IsEmpty,
    /// Value is not null and not blank text.
    IsNotEmpty,
    /// Numeric greater-than.
    GreaterThan,
    /// Numeric less-than.
    LessThan,
}

impl FilterOperator {
    /// Whether the operator reads [`FilterItem::value`].
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }
}

/// One structured filter predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterItem {
    /// Filtered field.
    pub field: String,
    /// Operator.
    pub operator: FilterOperator,
    /// Operand; ignored by value-less operators.
    #[serde(default)]
    pub value: CellValue,
}

impl FilterItem {
    /// Tests a cell value against this predicate.
    ///
    /// Items with a blank operand for a value-taking operator are inactive and match everything.
    pub fn matches(&self, cell: &CellValue) -> bool {
        if self.operator.takes_value() && self.value.is_blank() {
            return true;
        }
        match self.operator {
            FilterOperator::IsEmpty => cell.is_blank(),
            FilterOperator::IsNotEmpty => !cell.is_blank(),
            FilterOperator::GreaterThan => match (cell.as_f64(), self.value.as_f64()) {
                (Some(left), Some(right)) => left > right,
                _ => false,
            },
            FilterOperator::LessThan => match (cell.as_f64(), self.value.as_f64()) {
                (Some(left), Some(right)) => left < right,
                _ => false,
            },
            FilterOperator::Equals => {
                if let (CellValue::Number(left), Some(right)) = (cell, self.value.as_f64()) {
                    return *left == right;
                }
                cell.display().to_lowercase() == self.value.display().to_lowercase()
            }
            FilterOperator::Contains => {
                let needle = self.value.display().to_lowercase();
                !cell.is_null() && cell.display().to_lowercase().contains(&needle)
            }
            FilterOperator::StartsWith => {
                let needle = self.value.display().to_lowercase();
                !cell.is_null() && cell.display().to_lowercase().starts_with(&needle)
            }
            FilterOperator::EndsWith => {
                let needle = self.value.display().to_lowercase();
                !cell.is_null() && cell.display().to_lowercase().ends_with(&needle)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How structured filter items combine.
pub enum FilterLogic {
    /// Every item must match.
    #[default]
    And,
    /// Any item may match.
    Or,
}

/// Structured filter predicates. Free-text search is held separately and applied first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterModel {
    /// Filter predicates.
    pub items: Vec<FilterItem>,
    /// Combination logic.
    pub logic: FilterLogic,
}

impl FilterModel {
    /// Tests a row against every item.
    pub fn matches<R: GridRow>(&self, row: &R) -> bool {
        if self.items.is_empty() {
            return true;
        }
        let mut results = self
            .items
            .iter()
            .map(|item| item.matches(&row.field(&item.field)));
        match self.logic {
            FilterLogic::And => results.all(|matched| matched),
            FilterLogic::Or => results.any(|matched| matched),
        }
    }

    /// Returns `true` when no predicates are configured.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Zero-based pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationModel {
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page; never zero.
    pub page_size: usize,
}

impl Default for PaginationModel {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationModel {
    /// Page count for `total` rows; an empty set still has one (empty) page.
    pub fn page_count(&self, total: usize) -> usize {
        let size = self.page_size.max(1);
        total.div_ceil(size).max(1)
    }

    /// Moves the page index back inside range after the row count shrinks.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Index range of the current page within a `total`-row set.
    pub fn range(&self, total: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = self.page.saturating_mul(size).min(total);
        let end = start.saturating_add(size).min(total);
        start..end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Per-row edit state.
pub enum RowMode {
    /// Read-only presentation.
    #[default]
    View,
    /// Row inputs are active.
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Editing granularity switch.
pub enum EditMode {
    /// Cells edit independently; several rows may be mid-edit.
    #[default]
    Cell,
    /// Whole-row editing restricted to one row at a time.
    Row,
}
