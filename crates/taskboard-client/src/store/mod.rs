//! The task store: fetch orchestration and mutation coordination on
//! top of the pure reducer in [`state`].
//!
//! A [`TaskStore`] is an explicit handle created per authenticated
//! session and cloned into whatever components need it; there is no
//! ambient global. All state writes go through the reducer, in
//! dispatch order. Network responses may resolve out of order; a
//! per-fetch sequence number discards any listing response that
//! lands after a later-issued one has been applied.

mod state;

pub use state::{Action, StoreState};

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use taskboard_core::{
    FilterPatch, FilterSet, FilterWatchKey, NewTask, Task, TaskId, TaskPatch, TaskPriority,
    TaskStatus, UserRef,
};

use crate::api::TaskApi;
use crate::error::StoreError;
use crate::session::Session;

/// Page size for every listing fetch.
const PAGE_LIMIT: u32 = 10;

/// How a listing fetch ended up relating to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response (success or error) was folded into the store.
    Applied,
    /// A later-issued fetch resolved first; this response was
    /// discarded without touching the store.
    Stale,
    /// Session unauthenticated; no request was issued.
    Skipped,
    /// Filter push was value-equal to the last issued fetch's
    /// filters; absorbed without a request.
    Unchanged,
}

/// Sequence bookkeeping for in-flight listing fetches.
#[derive(Debug, Default)]
struct FetchLedger {
    /// Sequence number of the most recently issued fetch.
    issued: u64,
    /// Sequence number of the most recently applied response.
    applied: u64,
    /// Watch-key of the filter set the last fetch was issued under.
    issued_watch: Option<FilterWatchKey>,
}

struct Inner {
    api: Arc<dyn TaskApi>,
    session: Session,
    state: Mutex<StoreState>,
    ledger: Mutex<FetchLedger>,
}

/// Shared handle to the session's task state.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Inner>,
}

impl TaskStore {
    /// Create a store over a repository client, scoped to a session.
    pub fn new(api: Arc<dyn TaskApi>, session: Session) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                session,
                state: Mutex::new(StoreState::new()),
                ledger: Mutex::new(FetchLedger::default()),
            }),
        }
    }

    /// Value snapshot of the current state, for rendering.
    pub fn snapshot(&self) -> StoreState {
        self.lock_state().clone()
    }

    /// The active filter set.
    pub fn filters(&self) -> FilterSet {
        self.lock_state().filters.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.inner.state.lock().expect("store state lock poisoned")
    }

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, FetchLedger> {
        self.inner.ledger.lock().expect("fetch ledger lock poisoned")
    }

    fn dispatch(&self, action: Action) {
        self.lock_state().apply(action);
    }

    /// Fetch one page of tasks under the active filter set.
    ///
    /// Unauthenticated sessions are a silent no-op. Locks are never
    /// held across the network await.
    pub async fn list_tasks(&self, page: u32) -> FetchOutcome {
        if !self.inner.session.is_authenticated() {
            debug!("listing skipped: unauthenticated session");
            return FetchOutcome::Skipped;
        }

        // Lock order is always ledger, then state. Issuing under the
        // ledger lock keeps the sequence number, the snapshot of the
        // filters, and the recorded watch-key mutually consistent.
        let (seq, filters) = {
            let mut ledger = self.lock_ledger();
            let filters = self.lock_state().filters.clone();
            ledger.issued += 1;
            ledger.issued_watch = Some(filters.watch_key());
            (ledger.issued, filters)
        };

        self.dispatch(Action::Loading(true));
        let result = self.inner.api.list_tasks(page, PAGE_LIMIT, &filters).await;

        // The guard check and the matching dispatch happen under one
        // ledger lock: a concurrently resolving fetch cannot pass its
        // own check and land its dispatch between ours.
        let mut ledger = self.lock_ledger();
        if seq < ledger.applied {
            warn!(seq, applied = ledger.applied, "discarding stale listing response");
            return FetchOutcome::Stale;
        }
        ledger.applied = seq;

        match result {
            Ok(listing) => self.dispatch(Action::TasksReceived {
                tasks: listing.tasks,
                pagination: listing.pagination,
            }),
            Err(err) => {
                self.dispatch(Action::ErrorReceived(err.surface("Failed to fetch tasks")))
            }
        }
        FetchOutcome::Applied
    }

    /// Merge a partial filter change, then re-fetch page 1 if the
    /// reactive filter keys actually changed in value. Repeated
    /// value-equal pushes (route re-mounts) are absorbed.
    pub async fn set_filters(&self, patch: FilterPatch) -> FetchOutcome {
        self.dispatch(Action::FiltersSet(patch));
        self.sync().await
    }

    /// Reset to the empty filter set and re-fetch if that changed
    /// the reactive keys.
    pub async fn clear_filters(&self) -> FetchOutcome {
        self.dispatch(Action::FiltersCleared);
        self.sync().await
    }

    /// Fetch page 1 unless the last issued fetch already covered the
    /// current reactive filter keys. Used on mount and after login.
    pub async fn sync(&self) -> FetchOutcome {
        // Both reads under the ledger lock, so a concurrent filter
        // change cannot wedge itself between them.
        let unchanged = {
            let ledger = self.lock_ledger();
            let watch = self.lock_state().filters.watch_key();
            ledger.issued_watch.as_ref() == Some(&watch)
        };
        if unchanged {
            return FetchOutcome::Unchanged;
        }
        self.list_tasks(1).await
    }

    /// Create a task and prepend the server's snapshot to the list.
    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, StoreError> {
        match self.inner.api.create_task(new_task).await {
            Ok(task) => {
                self.dispatch(Action::TaskCreated(task.clone()));
                Ok(task)
            }
            Err(err) => Err(StoreError::from_api(err, "Failed to create task")),
        }
    }

    /// Apply a partial update and fold the result into the list.
    pub async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        match self.inner.api.update_task(id, patch).await {
            Ok(task) => {
                self.dispatch(Action::TaskUpdated(task.clone()));
                Ok(task)
            }
            Err(err) => Err(StoreError::from_api(err, "Failed to update task")),
        }
    }

    /// Change a task's status and fold the result into the list.
    pub async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        match self.inner.api.update_status(id, status).await {
            Ok(task) => {
                self.dispatch(Action::TaskUpdated(task.clone()));
                Ok(task)
            }
            Err(err) => Err(StoreError::from_api(err, "Failed to update task status")),
        }
    }

    /// Change a task's priority and fold the result into the list.
    pub async fn update_task_priority(
        &self,
        id: &TaskId,
        priority: TaskPriority,
    ) -> Result<Task, StoreError> {
        match self.inner.api.update_priority(id, priority).await {
            Ok(task) => {
                self.dispatch(Action::TaskUpdated(task.clone()));
                Ok(task)
            }
            Err(err) => Err(StoreError::from_api(err, "Failed to update task priority")),
        }
    }

    /// Delete a task and drop it from the list.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        match self.inner.api.delete_task(id).await {
            Ok(()) => {
                self.dispatch(Action::TaskDeleted(id.clone()));
                Ok(())
            }
            Err(err) => Err(StoreError::from_api(err, "Failed to delete task")),
        }
    }

    /// Pass-through read for detail/edit views. Never touches state.
    pub async fn get_task_by_id(&self, id: &TaskId) -> Result<Task, StoreError> {
        self.inner
            .api
            .get_task(id)
            .await
            .map_err(|err| StoreError::from_api(err, "Failed to fetch task"))
    }

    /// Pass-through read of assignable users. Never touches state.
    pub async fn list_users(&self) -> Result<Vec<UserRef>, StoreError> {
        self.inner
            .api
            .list_users()
            .await
            .map_err(|err| StoreError::from_api(err, "Failed to fetch users"))
    }
}
