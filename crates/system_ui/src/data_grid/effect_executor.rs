//! Drains reducer-emitted grid effects: caller notifications, deferred commits, and export
//! delivery.

use std::cell::Cell;
use std::rc::Rc;

use data_grid_core::{settle_commit, GridEffect, GridRow};
use leptos::*;

use super::browser;
use super::context::DataGridContext;

/// Installs the executor. `alive` is cleared on unmount so late commit verdicts are dropped.
pub(crate) fn install<R: GridRow>(grid: DataGridContext<R>, alive: Rc<Cell<bool>>) {
    // Take the whole batch first so effects dispatched by listeners queue a fresh batch.
    create_effect(move |_| {
        let queued = grid.effects.get();
        if queued.is_empty() {
            return;
        }

        grid.effects.set(Vec::new());

        for effect in queued {
            let alive = alive.clone();
            untrack(move || run_grid_effect(grid, alive, effect));
        }
    });
}

fn run_grid_effect<R: GridRow>(
    grid: DataGridContext<R>,
    alive: Rc<Cell<bool>>,
    effect: GridEffect<R>,
) {
    match effect {
        GridEffect::UpdateRow {
            id,
            new_row,
            old_row,
        } => {
            let callbacks = grid.callbacks.get_value();
            spawn_local(async move {
                let settled = settle_commit(callbacks, id, new_row, old_row).await;
                if alive.get() {
                    grid.dispatch_action(settled);
                }
            });
        }
        GridEffect::CommitFailed { id, message } => {
            logging::warn!("data grid commit rejected for row {id}: {message}");
        }
        GridEffect::Export(artifact) => {
            notify(grid, &GridEffect::Export(artifact.clone()));
            spawn_local(async move {
                match browser::deliver_export(&artifact).await {
                    Ok(()) => {}
                    Err(err) => logging::warn!("data grid export failed: {err}"),
                }
            });
        }
        other => notify(grid, &other),
    }
}

fn notify<R: GridRow>(grid: DataGridContext<R>, effect: &GridEffect<R>) {
    let callbacks = grid.callbacks.get_value();
    grid.with_schema(|schema| callbacks.notify(effect, schema));
}
