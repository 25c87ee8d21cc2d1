//! Cancellable background loads.
//!
//! A [`TaskSlot`] holds at most one in-flight future. Spawning into a busy
//! slot aborts the previous occupant, so a slow response can never overwrite
//! the state written by a newer one. Slots created with [`TaskSlot::scoped`]
//! also abort when the owning component is unmounted.
//!
//! Writes go through a [`TaskSet`] instead: every mutation runs to completion
//! alongside the others, and only unmounting cancels them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{abortable, AbortHandle, Abortable};
use leptos::prelude::on_cleanup;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Default)]
pub struct TaskSlot {
    current: Arc<Mutex<Option<AbortHandle>>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot whose task is aborted when the current reactive owner is
    /// disposed.
    pub fn scoped() -> Self {
        let slot = Self::new();
        let on_drop = slot.clone();
        on_cleanup(move || on_drop.abort());
        slot
    }

    /// Make `fut` the slot's occupant, aborting whatever was there.
    fn claim<F: Future>(&self, fut: F) -> Abortable<F> {
        let (task, handle) = abortable(fut);
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(handle) {
                previous.abort();
            }
        }
        task
    }

    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let task = self.claim(fut);
        spawn_local(async move {
            if task.await.is_err() {
                debug!("superseded task aborted");
            }
        });
    }

    pub fn abort(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(handle) = current.take() {
                handle.abort();
            }
        }
    }
}

/// Concurrent mutations owned by one component. Spawning never aborts a
/// sibling; [`TaskSet::abort_all`] (or unmount, for scoped sets) cancels
/// whatever is still pending.
#[derive(Clone, Default)]
pub struct TaskSet {
    next_id: Arc<AtomicU64>,
    pending: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scoped() -> Self {
        let set = Self::new();
        let on_drop = set.clone();
        on_cleanup(move || on_drop.abort_all());
        set
    }

    fn track<F: Future>(&self, fut: F) -> (u64, Abortable<F>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (task, handle) = abortable(fut);
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(id, handle);
        }
        (id, task)
    }

    fn finish(&self, id: u64) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(&id);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (id, task) = self.track(fut);
        let set = self.clone();
        spawn_local(async move {
            if task.await.is_err() {
                debug!("pending mutation cancelled");
            }
            set.finish(id);
        });
    }

    pub fn abort_all(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            for (_, handle) in pending.drain() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_task_aborts_previous() {
        let slot = TaskSlot::new();
        let first = slot.claim(async { 1 });
        let second = slot.claim(async { 2 });

        assert!(block_on(first).is_err());
        assert_eq!(block_on(second), Ok(2));
    }

    #[test]
    fn test_abort_empties_slot() {
        let slot = TaskSlot::new();
        let task = slot.claim(async { "done" });
        slot.abort();
        assert!(block_on(task).is_err());
        // Aborting an empty slot is harmless.
        slot.abort();
    }

    #[test]
    fn test_clones_share_the_slot() {
        let slot = TaskSlot::new();
        let other = slot.clone();
        let task = slot.claim(async {});
        other.abort();
        assert!(block_on(task).is_err());
    }

    #[test]
    fn test_back_to_back_mutations_both_complete() {
        let set = TaskSet::new();
        let creating = Rc::new(Cell::new(true));
        let removed = Rc::new(Cell::new(0));

        let flag = creating.clone();
        let (first_id, first) = set.track(async move { flag.set(false) });
        let count = removed.clone();
        let (second_id, second) = set.track(async move { count.set(count.get() + 1) });
        assert_eq!(set.pending(), 2);

        assert!(block_on(first).is_ok());
        set.finish(first_id);
        assert!(block_on(second).is_ok());
        set.finish(second_id);

        assert!(!creating.get());
        assert_eq!(removed.get(), 1);
        assert_eq!(set.pending(), 0);
    }

    #[test]
    fn test_abort_all_cancels_pending_mutations() {
        let set = TaskSet::new();
        let (_, first) = set.track(async { 1 });
        let (_, second) = set.track(async { 2 });
        set.abort_all();
        assert!(block_on(first).is_err());
        assert!(block_on(second).is_err());
        assert_eq!(set.pending(), 0);
    }
}
