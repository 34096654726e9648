//! Grid schema (declared once per data set) and the mutable interaction state.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::rc::Rc;

use crate::actions::{BulkAction, RowAction};
use crate::column::{derive_columns, ColumnDef};
use crate::config::DataGridConfig;
use crate::density::Density;
use crate::derive::{derive_rows, DerivedRows};
use crate::inline_add::{InlineAddState, RecordValidator};
use crate::model::{
    default_row_id, FieldErrors, FilterModel, GridRow, PaginationModel, Record, RowId, RowIdFn,
    RowMode, SelectionMode, SelectionModel, SortModel,
};
use crate::GridError;

/// Caller declarations that do not change between interactions: effective columns, the row-id
/// function, actions, and the inline-add validator.
pub struct GridSchema<R> {
    columns: Vec<ColumnDef<R>>,
    row_id: RowIdFn<R>,
    row_actions: Vec<RowAction<R>>,
    bulk_actions: Vec<BulkAction<R>>,
    inline_add_validator: Option<RecordValidator>,
}

impl<R> Clone for GridSchema<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            row_id: self.row_id.clone(),
            row_actions: self.row_actions.clone(),
            bulk_actions: self.bulk_actions.clone(),
            inline_add_validator: self.inline_add_validator.clone(),
        }
    }
}

/// Builder for [`GridSchema`].
pub struct GridSchemaBuilder<R> {
    columns: Vec<ColumnDef<R>>,
    row_id: Option<RowIdFn<R>>,
    row_actions: Vec<RowAction<R>>,
    bulk_actions: Vec<BulkAction<R>>,
    inline_add_validator: Option<RecordValidator>,
}

impl<R: GridRow> GridSchemaBuilder<R> {
    /// Overrides the default `id`-field row identifier.
    pub fn row_id(mut self, row_id: impl Fn(&R) -> RowId + 'static) -> Self {
        self.row_id = Some(Rc::new(row_id));
        self
    }

    /// Sets per-row actions; a non-empty list injects the actions column.
    pub fn row_actions(mut self, actions: Vec<RowAction<R>>) -> Self {
        self.row_actions = actions;
        self
    }

    /// Sets bulk actions shown while rows are selected.
    pub fn bulk_actions(mut self, actions: Vec<BulkAction<R>>) -> Self {
        self.bulk_actions = actions;
        self
    }

    /// Sets the inline-add record validator.
    pub fn inline_add_validator(
        mut self,
        validator: impl Fn(&Record) -> FieldErrors + 'static,
    ) -> Self {
        self.inline_add_validator = Some(Rc::new(validator));
        self
    }

    /// Derives the effective columns.
    ///
    /// # Errors
    ///
    /// Propagates column-derivation configuration errors.
    pub fn build(self, config: &DataGridConfig) -> Result<GridSchema<R>, GridError> {
        let columns = derive_columns(
            &self.columns,
            !self.row_actions.is_empty(),
            &config.row_actions,
        )?;
        Ok(GridSchema {
            columns,
            row_id: self.row_id.unwrap_or_else(default_row_id),
            row_actions: self.row_actions,
            bulk_actions: self.bulk_actions,
            inline_add_validator: self.inline_add_validator,
        })
    }
}

impl<R: GridRow> GridSchema<R> {
    /// Starts a schema over caller-declared columns.
    pub fn builder(columns: Vec<ColumnDef<R>>) -> GridSchemaBuilder<R> {
        GridSchemaBuilder {
            columns,
            row_id: None,
            row_actions: Vec::new(),
            bulk_actions: Vec::new(),
            inline_add_validator: None,
        }
    }

    /// Effective columns, including the actions column when injected.
    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    /// Column by field.
    pub fn column(&self, field: &str) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|column| column.field == field)
    }

    /// Identifier for `row`.
    pub fn row_id_of(&self, row: &R) -> RowId {
        (self.row_id)(row)
    }

    /// Row actions.
    pub fn row_actions(&self) -> &[RowAction<R>] {
        &self.row_actions
    }

    /// Row action by id.
    pub fn row_action(&self, id: &str) -> Option<&RowAction<R>> {
        self.row_actions.iter().find(|action| action.id == id)
    }

    /// Bulk actions.
    pub fn bulk_actions(&self) -> &[BulkAction<R>] {
        &self.bulk_actions
    }

    /// Bulk action by id.
    pub fn bulk_action(&self, id: &str) -> Option<&BulkAction<R>> {
        self.bulk_actions.iter().find(|action| action.id == id)
    }

    /// Inline-add validator.
    pub fn inline_add_validator(&self) -> Option<&RecordValidator> {
        self.inline_add_validator.as_ref()
    }
}

/// An update handed to the caller and not yet settled.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit<R> {
    /// Row before the edit; restored on rejection.
    pub old_row: R,
    /// Value submitted to the caller; shown optimistically while pending.
    pub new_row: R,
}

/// Immutable caller snapshot shared between state copies.
///
/// Clones share one allocation, and snapshots that were never replaced compare equal without
/// walking their contents.
#[derive(Debug)]
pub struct RowSnapshot<T>(Rc<[T]>);

impl<T> Clone for RowSnapshot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for RowSnapshot<T> {
    fn default() -> Self {
        Self(Rc::from(Vec::new()))
    }
}

impl<T> From<Vec<T>> for RowSnapshot<T> {
    fn from(items: Vec<T>) -> Self {
        Self(Rc::from(items))
    }
}

impl<T> Deref for RowSnapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for RowSnapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0[..] == other.0[..]
    }
}

/// Everything [`DataGridState::derive`] reads.
///
/// Equal keys derive equal rows; hover, selection, and edit chrome are not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationKey<R> {
    rows: RowSnapshot<R>,
    committed: BTreeMap<RowId, R>,
    pending: BTreeMap<RowId, R>,
    search: String,
    filter: FilterModel,
    sort: SortModel,
    pagination: Option<PaginationModel>,
}

/// Result of the search, filter, sort, and paginate pipeline as row ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedIds {
    /// Filtered ids in sort order.
    pub filtered: Vec<RowId>,
    /// Ids on the visible page.
    pub page: Vec<RowId>,
    /// Page count for the filtered set.
    pub page_count: usize,
}

impl DerivedIds {
    /// Filtered row count.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }
}

/// Interaction state owned by the grid orchestrator.
///
/// Created on mount and mutated only through [`crate::reduce_grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataGridState<R> {
    rows: RowSnapshot<R>,
    ids: RowSnapshot<RowId>,
    committed: BTreeMap<RowId, R>,
    /// Active configuration.
    pub config: DataGridConfig,
    /// Active density preset.
    pub density: Density,
    /// Skeleton flag.
    pub loading: bool,
    /// Free-text search.
    pub search: String,
    /// Selected ids.
    pub selection: SelectionModel,
    /// Sort model.
    pub sort: SortModel,
    /// Structured filter model.
    pub filter: FilterModel,
    /// Whether the filter panel is open.
    pub filter_panel_open: bool,
    /// Page state.
    pub pagination: PaginationModel,
    /// Row under the pointer.
    pub hovered: Option<RowId>,
    /// Rows currently in edit mode.
    pub row_modes: BTreeMap<RowId, RowMode>,
    /// In-progress row drafts.
    pub drafts: BTreeMap<RowId, R>,
    /// Validation messages for drafts and cell edits.
    pub edit_errors: BTreeMap<RowId, FieldErrors>,
    /// Updates awaiting the caller's verdict.
    pub pending: BTreeMap<RowId, PendingCommit<R>>,
    /// Last commit failure per row.
    pub row_errors: BTreeMap<RowId, String>,
    /// Inline-add state machine.
    pub inline_add: InlineAddState,
    /// Fields hidden through the column toggle.
    pub hidden_columns: BTreeSet<String>,
}

impl<R: GridRow> DataGridState<R> {
    /// Fresh state seeded from configuration defaults.
    pub fn new(config: DataGridConfig) -> Self {
        let sort = SortModel(config.sorting.initial.clone().into_iter().collect());
        let pagination = PaginationModel {
            page: 0,
            page_size: config.pagination.page_size.max(1),
        };
        Self {
            rows: RowSnapshot::default(),
            ids: RowSnapshot::default(),
            committed: BTreeMap::new(),
            density: config.density,
            loading: false,
            search: String::new(),
            selection: SelectionModel {
                mode: config.selection.mode,
                ids: BTreeSet::new(),
            },
            sort,
            filter: config.filtering.initial.clone(),
            filter_panel_open: false,
            pagination,
            hovered: None,
            row_modes: BTreeMap::new(),
            drafts: BTreeMap::new(),
            edit_errors: BTreeMap::new(),
            pending: BTreeMap::new(),
            row_errors: BTreeMap::new(),
            inline_add: InlineAddState::Inactive,
            hidden_columns: BTreeSet::new(),
            config,
        }
    }

    /// Fresh state holding `rows`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateRowId`] when two rows share an id.
    pub fn with_rows(
        config: DataGridConfig,
        schema: &GridSchema<R>,
        rows: Vec<R>,
    ) -> Result<Self, GridError> {
        let mut state = Self::new(config);
        state.replace_data(rows, schema)?;
        Ok(state)
    }

    /// Swaps in a new caller snapshot.
    ///
    /// Committed overrides are dropped because the caller is authoritative. Per-row state for
    /// vanished ids is pruned, selection keeps surviving ids, and the page is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateRowId`] and leaves the state untouched when two rows share
    /// an id.
    pub fn replace_data(&mut self, rows: Vec<R>, schema: &GridSchema<R>) -> Result<(), GridError> {
        let ids = rows
            .iter()
            .map(|row| schema.row_id_of(row))
            .collect::<Vec<_>>();
        let mut known = BTreeSet::new();
        for id in &ids {
            if !known.insert(id.clone()) {
                return Err(GridError::DuplicateRowId(id.clone()));
            }
        }

        self.rows = rows.into();
        self.ids = ids.into();
        self.committed.clear();
        self.selection.retain_known(&known);
        self.row_modes.retain(|id, _| known.contains(id));
        self.drafts.retain(|id, _| known.contains(id));
        self.edit_errors.retain(|id, _| known.contains(id));
        self.pending.retain(|id, _| known.contains(id));
        self.row_errors.retain(|id, _| known.contains(id));
        if self.hovered.as_ref().is_some_and(|id| !known.contains(id)) {
            self.hovered = None;
        }
        self.clamp_page();
        Ok(())
    }

    /// Ids in caller order.
    pub fn row_ids(&self) -> &[RowId] {
        &self.ids[..]
    }

    /// Row count before search and filters.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn position(&self, id: &RowId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    fn effective_at(&self, index: usize) -> &R {
        let id = &self.ids[index];
        self.pending
            .get(id)
            .map(|pending| &pending.new_row)
            .or_else(|| self.committed.get(id))
            .unwrap_or(&self.rows[index])
    }

    /// Rows as currently shown: pending values, then committed values, then caller values.
    pub fn rows(&self) -> Vec<&R> {
        (0..self.rows.len())
            .map(|index| self.effective_at(index))
            .collect()
    }

    /// Effective row for `id`.
    pub fn row(&self, id: &RowId) -> Option<&R> {
        self.position(id).map(|index| self.effective_at(index))
    }

    /// Draft while editing, effective row otherwise.
    pub fn display_row(&self, id: &RowId) -> Option<&R> {
        self.drafts.get(id).or_else(|| self.row(id))
    }

    /// Edit mode for `id`.
    pub fn row_mode(&self, id: &RowId) -> RowMode {
        self.row_modes.get(id).copied().unwrap_or_default()
    }

    /// Whether an update for `id` is awaiting the caller.
    pub fn is_pending(&self, id: &RowId) -> bool {
        self.pending.contains_key(id)
    }

    /// Pagination model applied to derivation, or `None` when pagination is disabled.
    pub fn active_pagination(&self) -> Option<&PaginationModel> {
        self.config.pagination.enabled.then_some(&self.pagination)
    }

    /// Runs search, filter, sort, and paginate over the effective rows.
    pub fn derive(&self) -> DerivedRows {
        let rows = self.rows();
        derive_rows(
            &rows,
            &self.search,
            &self.filter,
            &self.sort,
            self.active_pagination(),
        )
    }

    /// Snapshot of the derivation inputs.
    pub fn derivation_key(&self) -> DerivationKey<R> {
        DerivationKey {
            rows: self.rows.clone(),
            committed: self.committed.clone(),
            pending: self
                .pending
                .iter()
                .map(|(id, pending)| (id.clone(), pending.new_row.clone()))
                .collect(),
            search: self.search.clone(),
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            pagination: self.active_pagination().copied(),
        }
    }

    /// [`DataGridState::derive`] resolved to row ids.
    pub fn derived_ids(&self) -> DerivedIds {
        let derived = self.derive();
        let resolve = |indices: Vec<usize>| {
            indices
                .into_iter()
                .map(|index| self.ids[index].clone())
                .collect::<Vec<_>>()
        };
        DerivedIds {
            page_count: derived.page_count,
            filtered: resolve(derived.filtered),
            page: resolve(derived.page),
        }
    }

    /// Ids of the filtered set in sort order.
    pub fn filtered_ids(&self) -> Vec<RowId> {
        self.derive()
            .filtered
            .into_iter()
            .map(|index| self.ids[index].clone())
            .collect()
    }

    /// Ids of the visible page.
    pub fn page_ids(&self) -> Vec<RowId> {
        self.derive()
            .page
            .into_iter()
            .map(|index| self.ids[index].clone())
            .collect()
    }

    /// Materialized selected ids in caller order. Exclusion mode resolves against the filtered
    /// set.
    pub fn selected_ids(&self) -> Vec<RowId> {
        let universe = match self.selection.mode {
            SelectionMode::Include => self.ids.to_vec(),
            SelectionMode::Exclude => self.filtered_ids(),
        };
        let selected = self
            .selection
            .selected_ids(&universe)
            .into_iter()
            .collect::<BTreeSet<_>>();
        universe
            .into_iter()
            .filter(|id| selected.contains(id))
            .collect()
    }

    /// Materialized selected rows.
    pub fn selected_rows(&self) -> Vec<R> {
        self.selected_ids()
            .iter()
            .filter_map(|id| self.row(id).cloned())
            .collect()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Header checkbox state over the filtered set: `(all, some)`.
    pub fn filtered_selection(&self) -> (bool, bool) {
        self.selection_over(&self.filtered_ids())
    }

    /// Header checkbox state over an already derived filtered set: `(all, some)`.
    pub fn selection_over(&self, filtered: &[RowId]) -> (bool, bool) {
        let count = filtered.iter().filter(|id| self.is_selected(id)).count();
        (!filtered.is_empty() && count == filtered.len(), count > 0)
    }

    /// Selected row count. Exclusion mode counts within `filtered`, matching
    /// [`DataGridState::selected_ids`].
    pub fn selected_count(&self, filtered: &[RowId]) -> usize {
        let universe = match self.selection.mode {
            SelectionMode::Include => &self.ids[..],
            SelectionMode::Exclude => filtered,
        };
        universe.iter().filter(|id| self.is_selected(id)).count()
    }

    /// Visible effective columns.
    pub fn visible_columns<'a>(&self, schema: &'a GridSchema<R>) -> Vec<&'a ColumnDef<R>> {
        schema
            .columns()
            .iter()
            .filter(|column| !self.hidden_columns.contains(&column.field))
            .collect()
    }

    /// Whether `field` is visible.
    pub fn is_column_visible(&self, field: &str) -> bool {
        !self.hidden_columns.contains(field)
    }

    pub(crate) fn commit_row(&mut self, id: &RowId, row: R) {
        self.committed.insert(id.clone(), row);
    }

    pub(crate) fn clamp_page(&mut self) {
        let total = self.derive().total();
        self.pagination.clamp(total);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn schema() -> GridSchema<Record> {
        GridSchema::builder(vec![ColumnDef::new("name", "Name")])
            .build(&DataGridConfig::default())
            .expect("schema")
    }

    fn rows(count: usize) -> Vec<Record> {
        (0..count)
            .map(|n| Record::new().with("id", n as u32).with("name", format!("row {n}")))
            .collect()
    }

    #[test]
    fn duplicate_ids_fail_fast_and_keep_previous_rows() {
        let schema = schema();
        let mut state = DataGridState::with_rows(DataGridConfig::default(), &schema, rows(3))
            .expect("state");
        let mut duplicated = rows(2);
        duplicated.push(Record::new().with("id", 1).with("name", "dup"));
        assert_eq!(
            state.replace_data(duplicated, &schema),
            Err(GridError::DuplicateRowId(RowId::from("1")))
        );
        assert_eq!(state.row_count(), 3);
    }

    #[test]
    fn replace_data_prunes_state_for_vanished_rows() {
        let schema = schema();
        let mut state = DataGridState::with_rows(DataGridConfig::default(), &schema, rows(60))
            .expect("state");
        state.selection.toggle(&RowId::from("5"));
        state.selection.toggle(&RowId::from("50"));
        state.pagination.page = 2;

        state.replace_data(rows(10), &schema).expect("replace");
        assert_eq!(state.selected_ids(), vec![RowId::from("5")]);
        assert_eq!(state.pagination.page, 0);
    }

    #[test]
    fn custom_row_id_is_used() {
        let schema = GridSchema::<Record>::builder(vec![ColumnDef::new("name", "Name")])
            .row_id(|row| RowId::new(row.field("name").display()))
            .build(&DataGridConfig::default())
            .expect("schema");
        let state = DataGridState::with_rows(DataGridConfig::default(), &schema, rows(2))
            .expect("state");
        assert_eq!(state.row_ids(), &[RowId::from("row 0"), RowId::from("row 1")]);
    }

    #[test]
    fn exclusion_mode_materializes_against_filtered_rows() {
        let schema = schema();
        let mut config = DataGridConfig::default();
        config.selection.mode = SelectionMode::Exclude;
        let mut state = DataGridState::with_rows(config, &schema, rows(4)).expect("state");
        state.selection.toggle(&RowId::from("2"));
        assert_eq!(
            state.selected_ids(),
            vec![RowId::from("0"), RowId::from("1"), RowId::from("3")]
        );
        state.search = "row 1".to_string();
        assert_eq!(state.selected_ids(), vec![RowId::from("1")]);
    }

    #[test]
    fn derivation_key_ignores_hover_and_selection() {
        let schema = schema();
        let mut state = DataGridState::with_rows(DataGridConfig::default(), &schema, rows(30))
            .expect("state");
        let before = state.derivation_key();

        state.hovered = Some(RowId::from("3"));
        state.selection.toggle(&RowId::from("4"));
        state.filter_panel_open = true;
        assert_eq!(state.derivation_key(), before);

        state.search = "row 2".to_string();
        assert_ne!(state.derivation_key(), before);
    }

    #[test]
    fn clones_share_the_row_snapshot() {
        let schema = schema();
        let state = DataGridState::with_rows(DataGridConfig::default(), &schema, rows(5))
            .expect("state");
        let copy = state.clone();
        assert!(std::ptr::eq(copy.row_ids().as_ptr(), state.row_ids().as_ptr()));
        assert_eq!(copy, state);
    }

    #[test]
    fn derived_ids_agree_with_the_per_call_helpers() {
        let schema = schema();
        let mut config = DataGridConfig::default();
        config.selection.mode = SelectionMode::Exclude;
        let mut state = DataGridState::with_rows(config, &schema, rows(40)).expect("state");
        state.search = "row 1".to_string();
        state.selection.toggle(&RowId::from("10"));

        let derived = state.derived_ids();
        assert_eq!(derived.filtered, state.filtered_ids());
        assert_eq!(derived.page, state.page_ids());
        assert_eq!(derived.total(), 11);
        assert_eq!(
            state.selected_count(&derived.filtered),
            state.selected_ids().len()
        );
        assert_eq!(state.selection_over(&derived.filtered), state.filtered_selection());
    }
}
