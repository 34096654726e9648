//! Caller listeners and the headless half of effect execution.

use std::future::Future;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::density::Density;
use crate::export::ExportFormat;
use crate::model::{FilterModel, GridRow, Record, RowId, SortDirection};
use crate::reducer::{GridAction, GridEffect};
use crate::state::GridSchema;

/// Deferred verdict from the caller's row-update handler.
pub type RowUpdateFuture<R> = LocalBoxFuture<'static, Result<R, String>>;

type RowUpdateFn<R> = Rc<dyn Fn(R, R) -> RowUpdateFuture<R>>;

/// Optional listeners notified after state transitions.
pub struct GridCallbacks<R> {
    on_selection_change: Option<Rc<dyn Fn(&[RowId])>>,
    on_sort_change: Option<Rc<dyn Fn(&str, Option<SortDirection>)>>,
    on_filter_change: Option<Rc<dyn Fn(&FilterModel, &str)>>,
    on_page_change: Option<Rc<dyn Fn(usize, usize)>>,
    on_density_change: Option<Rc<dyn Fn(Density)>>,
    on_row_update: Option<RowUpdateFn<R>>,
    on_row_add: Option<Rc<dyn Fn(Record)>>,
    on_row_click: Option<Rc<dyn Fn(&R)>>,
    on_export: Option<Rc<dyn Fn(ExportFormat)>>,
    on_refresh: Option<Rc<dyn Fn()>>,
}

impl<R> Default for GridCallbacks<R> {
    fn default() -> Self {
        Self {
            on_selection_change: None,
            on_sort_change: None,
            on_filter_change: None,
            on_page_change: None,
            on_density_change: None,
            on_row_update: None,
            on_row_add: None,
            on_row_click: None,
            on_export: None,
            on_refresh: None,
        }
    }
}

impl<R> Clone for GridCallbacks<R> {
    fn clone(&self) -> Self {
        Self {
            on_selection_change: self.on_selection_change.clone(),
            on_sort_change: self.on_sort_change.clone(),
            on_filter_change: self.on_filter_change.clone(),
            on_page_change: self.on_page_change.clone(),
            on_density_change: self.on_density_change.clone(),
            on_row_update: self.on_row_update.clone(),
            on_row_add: self.on_row_add.clone(),
            on_row_click: self.on_row_click.clone(),
            on_export: self.on_export.clone(),
            on_refresh: self.on_refresh.clone(),
        }
    }
}

impl<R: GridRow> GridCallbacks<R> {
    /// No listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives materialized selected ids.
    pub fn on_selection_change(mut self, f: impl Fn(&[RowId]) + 'static) -> Self {
        self.on_selection_change = Some(Rc::new(f));
        self
    }

    /// Receives the sorted field and its new direction.
    pub fn on_sort_change(mut self, f: impl Fn(&str, Option<SortDirection>) + 'static) -> Self {
        self.on_sort_change = Some(Rc::new(f));
        self
    }

    /// Receives the structured filter model and search text.
    pub fn on_filter_change(mut self, f: impl Fn(&FilterModel, &str) + 'static) -> Self {
        self.on_filter_change = Some(Rc::new(f));
        self
    }

    /// Receives the page and page size.
    pub fn on_page_change(mut self, f: impl Fn(usize, usize) + 'static) -> Self {
        self.on_page_change = Some(Rc::new(f));
        self
    }

    /// Receives the new density.
    pub fn on_density_change(mut self, f: impl Fn(Density) + 'static) -> Self {
        self.on_density_change = Some(Rc::new(f));
        self
    }

    /// Asynchronous update handler. The resolved row is authoritative; `Err` rejects the edit.
    pub fn on_row_update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(R, R) -> Fut + 'static,
        Fut: Future<Output = Result<R, String>> + 'static,
    {
        self.on_row_update = Some(Rc::new(move |new_row, old_row| {
            f(new_row, old_row).boxed_local()
        }));
        self
    }

    /// Synchronous update handler.
    pub fn on_row_update_sync(mut self, f: impl Fn(R, R) -> Result<R, String> + 'static) -> Self {
        self.on_row_update = Some(Rc::new(move |new_row, old_row| {
            future::ready(f(new_row, old_row)).boxed_local()
        }));
        self
    }

    /// Receives validated inline-add records.
    pub fn on_row_add(mut self, f: impl Fn(Record) + 'static) -> Self {
        self.on_row_add = Some(Rc::new(f));
        self
    }

    /// Receives activated rows.
    pub fn on_row_click(mut self, f: impl Fn(&R) + 'static) -> Self {
        self.on_row_click = Some(Rc::new(f));
        self
    }

    /// Notified before an export is delivered.
    pub fn on_export(mut self, f: impl Fn(ExportFormat) + 'static) -> Self {
        self.on_export = Some(Rc::new(f));
        self
    }

    /// Receives refresh requests.
    pub fn on_refresh(mut self, f: impl Fn() + 'static) -> Self {
        self.on_refresh = Some(Rc::new(f));
        self
    }

    /// Hands an update to the caller. Without a handler the proposed row is accepted as-is.
    pub fn commit(&self, new_row: R, old_row: R) -> RowUpdateFuture<R> {
        match &self.on_row_update {
            Some(handler) => handler(new_row, old_row),
            None => future::ready(Ok(new_row)).boxed_local(),
        }
    }

    /// Runs the listener or action handler for a synchronous effect.
    ///
    /// [`GridEffect::UpdateRow`] is left to [`settle_commit`] and export delivery to the
    /// embedding runtime; only the export listener fires here.
    pub fn notify(&self, effect: &GridEffect<R>, schema: &GridSchema<R>) {
        match effect {
            GridEffect::SelectionChanged(ids) => {
                if let Some(cb) = &self.on_selection_change {
                    cb(ids);
                }
            }
            GridEffect::SortChanged { field, direction } => {
                if let Some(cb) = &self.on_sort_change {
                    cb(field, *direction);
                }
            }
            GridEffect::FilterChanged { model, search } => {
                if let Some(cb) = &self.on_filter_change {
                    cb(model, search);
                }
            }
            GridEffect::PageChanged { page, page_size } => {
                if let Some(cb) = &self.on_page_change {
                    cb(*page, *page_size);
                }
            }
            GridEffect::DensityChanged(density) => {
                if let Some(cb) = &self.on_density_change {
                    cb(*density);
                }
            }
            GridEffect::AddRow(record) => {
                if let Some(cb) = &self.on_row_add {
                    cb(record.clone());
                }
            }
            GridEffect::Export(artifact) => {
                if let Some(cb) = &self.on_export {
                    cb(artifact.format);
                }
            }
            GridEffect::RefreshRequested => {
                if let Some(cb) = &self.on_refresh {
                    cb();
                }
            }
            GridEffect::RowClicked { row, .. } => {
                if let Some(cb) = &self.on_row_click {
                    cb(row);
                }
            }
            GridEffect::RunRowAction { action_id, row } => {
                if let Some(action) = schema.row_action(action_id) {
                    (action.handler)(row);
                }
            }
            GridEffect::RunBulkAction { action_id, rows } => {
                if let Some(action) = schema.bulk_action(action_id) {
                    (action.handler)(rows);
                }
            }
            GridEffect::UpdateRow { .. }
            | GridEffect::RowCommitted { .. }
            | GridEffect::CommitFailed { .. } => {}
        }
    }
}

/// Awaits the caller's verdict for an [`GridEffect::UpdateRow`] and returns the settling action.
pub async fn settle_commit<R: GridRow>(
    callbacks: GridCallbacks<R>,
    id: RowId,
    new_row: R,
    old_row: R,
) -> GridAction<R> {
    let outcome = callbacks.commit(new_row, old_row).await;
    GridAction::ResolveRowCommit { id, outcome }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::column::ColumnDef;
    use crate::config::DataGridConfig;
    use crate::model::CellValue;
    use crate::reducer::reduce_grid;
    use crate::state::DataGridState;

    fn setup() -> (DataGridState<Record>, GridSchema<Record>) {
        let config = DataGridConfig::default();
        let schema = GridSchema::builder(vec![ColumnDef::new("name", "Name").editable(true)])
            .build(&config)
            .expect("schema");
        let rows = vec![Record::new().with("id", 1).with("name", "Ada")];
        let state = DataGridState::with_rows(config, &schema, rows).expect("state");
        (state, schema)
    }

    fn run_commit(
        state: &mut DataGridState<Record>,
        schema: &GridSchema<Record>,
        callbacks: &GridCallbacks<Record>,
        value: &str,
    ) -> Vec<GridEffect<Record>> {
        let effects = reduce_grid(
            state,
            schema,
            GridAction::CommitCellEdit {
                id: RowId::from(1u32),
                field: "name".into(),
                value: value.into(),
            },
        )
        .expect("commit");
        let Some(GridEffect::UpdateRow {
            id,
            new_row,
            old_row,
        }) = effects.into_iter().next()
        else {
            panic!("expected an update");
        };
        let settle = block_on(settle_commit(callbacks.clone(), id, new_row, old_row));
        reduce_grid(state, schema, settle).expect("resolve")
    }

    #[test]
    fn deferred_handler_result_becomes_row_state() {
        let (mut state, schema) = setup();
        let callbacks = GridCallbacks::new().on_row_update(|mut new_row: Record, _old| async move {
            let upper = new_row.field("name").display().to_uppercase();
            new_row.insert("name", upper);
            Ok(new_row)
        });
        run_commit(&mut state, &schema, &callbacks, "grace");
        assert_eq!(
            state.row(&RowId::from(1u32)).map(|row| row.field("name")),
            Some(CellValue::from("GRACE"))
        );
    }

    #[test]
    fn missing_handler_accepts_typed_value() {
        let (mut state, schema) = setup();
        run_commit(&mut state, &schema, &GridCallbacks::new(), "Grace");
        assert_eq!(
            state.row(&RowId::from(1u32)).map(|row| row.field("name")),
            Some(CellValue::from("Grace"))
        );
    }

    #[test]
    fn rejection_reverts_to_pre_edit_value() {
        let (mut state, schema) = setup();
        let callbacks = GridCallbacks::new().on_row_update_sync(|_, _| Err("offline".to_string()));
        let effects = run_commit(&mut state, &schema, &callbacks, "Grace");
        assert_eq!(
            effects,
            vec![GridEffect::CommitFailed {
                id: RowId::from(1u32),
                message: "offline".to_string(),
            }]
        );
        assert_eq!(
            state.row(&RowId::from(1u32)).map(|row| row.field("name")),
            Some(CellValue::from("Ada"))
        );
    }

    #[test]
    fn notify_routes_effects_to_listeners() {
        let (_, schema) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callbacks = GridCallbacks::<Record>::new()
            .on_selection_change(move |ids| sink.borrow_mut().push(ids.len()));
        callbacks.notify(&GridEffect::SelectionChanged(Vec::new()), &schema);
        callbacks.notify(&GridEffect::RefreshRequested, &schema);
        assert_eq!(*seen.borrow(), vec![0]);
    }
}
