//! Reducer container and dispatch wiring for one mounted grid.

use data_grid_core::{
    reduce_grid, DataGridConfig, DataGridState, DerivedIds, GridAction, GridCallbacks, GridEffect,
    GridRow, GridSchema,
};
use leptos::*;

/// Reactive handle shared by every component of one mounted [`crate::DataGrid`].
///
/// Leaf components read [`DataGridContext::state`] and never write it; every change flows
/// through [`DataGridContext::dispatch`].
pub struct DataGridContext<R: 'static> {
    /// Interaction state.
    pub state: RwSignal<DataGridState<R>>,
    /// Search, filter, sort, and page result. Recomputed only when its inputs change.
    pub derived: Memo<DerivedIds>,
    /// Effective columns, row-id function, and action handlers.
    pub schema: StoredValue<GridSchema<R>>,
    /// Caller listeners.
    pub callbacks: StoredValue<GridCallbacks<R>>,
    /// Effects emitted by the reducer and not yet executed.
    pub effects: RwSignal<Vec<GridEffect<R>>>,
    /// Last configuration error, shown above the table until valid data arrives.
    pub error: RwSignal<Option<String>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<GridAction<R>>,
}

impl<R: 'static> Clone for DataGridContext<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for DataGridContext<R> {}

impl<R: GridRow> DataGridContext<R> {
    pub(crate) fn new(
        config: DataGridConfig,
        schema: GridSchema<R>,
        callbacks: GridCallbacks<R>,
    ) -> Self {
        let state = create_rw_signal(DataGridState::new(config));
        let derivation_key = create_memo(move |_| state.with(DataGridState::derivation_key));
        let derived = create_memo(move |_| {
            derivation_key.with(|_| ());
            state.with_untracked(DataGridState::derived_ids)
        });
        let schema = store_value(schema);
        let callbacks = store_value(callbacks);
        let effects = create_rw_signal(Vec::<GridEffect<R>>::new());
        let error = create_rw_signal::<Option<String>>(None);

        let dispatch = Callback::new(move |action: GridAction<R>| {
            let replacing = matches!(action, GridAction::ReplaceRows(_));
            let mut next = state.get_untracked();

            match schema.with_value(|schema| reduce_grid(&mut next, schema, action)) {
                Ok(new_effects) => {
                    if state.with_untracked(|current| *current != next) {
                        state.set(next);
                    }
                    if replacing && error.with_untracked(Option::is_some) {
                        error.set(None);
                    }
                    if !new_effects.is_empty() {
                        effects.update(|queue| queue.extend(new_effects));
                    }
                }
                Err(err) => {
                    if err.is_configuration() {
                        error.set(Some(err.to_string()));
                    }
                    logging::warn!("data grid reducer error: {err}");
                }
            }
        });

        Self {
            state,
            derived,
            schema,
            callbacks,
            effects,
            error,
            dispatch,
        }
    }

    /// Dispatches a reducer action.
    pub fn dispatch_action(&self, action: GridAction<R>) {
        self.dispatch.call(action);
    }

    /// Memoized projection of the state; subscribers rerun only when the projection changes.
    pub fn select<T>(self, project: impl Fn(&DataGridState<R>) -> T + 'static) -> Memo<T>
    where
        T: PartialEq + 'static,
    {
        create_memo(move |_| self.state.with(|state| project(state)))
    }

    /// Reads the schema without tracking.
    pub fn with_schema<T>(&self, f: impl FnOnce(&GridSchema<R>) -> T) -> T {
        self.schema.with_value(f)
    }
}
