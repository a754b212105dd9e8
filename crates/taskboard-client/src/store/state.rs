//! Store state and its transition function.
//!
//! The reducer is pure: no I/O, no clocks. All store writes flow
//! through [`StoreState::apply`], one action at a time, in the order
//! the caller dispatched them.

use taskboard_core::{FilterPatch, FilterSet, Pagination, Task, TaskId};

/// A state transition of the task store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Flip the loading flag. Existing tasks are kept either way, so
    /// the view never flashes empty during a re-fetch.
    Loading(bool),

    /// A listing response: replaces the whole page. The only
    /// transition allowed to replace the full task list.
    TasksReceived {
        tasks: Vec<Task>,
        pagination: Pagination,
    },

    /// A listing failure. Previously loaded tasks stay visible.
    ErrorReceived(String),

    /// A freshly created task, prepended to the current page.
    TaskCreated(Task),

    /// An updated snapshot replacing its entry on the current page.
    TaskUpdated(Task),

    /// Remove a task from the current page.
    TaskDeleted(TaskId),

    /// Merge a partial filter change into the active set.
    FiltersSet(FilterPatch),

    /// Reset the filter set to empty.
    FiltersCleared,
}

/// The task store's state: one page of tasks plus bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Current page's tasks, in server order. Never re-sorted locally.
    pub tasks: Vec<Task>,

    /// Where this page sits in the filtered result set.
    pub pagination: Pagination,

    /// A listing fetch is in flight.
    pub loading: bool,

    /// Last surfaced listing error, if any.
    pub error: Option<String>,

    /// Active filter set.
    pub filters: FilterSet,

    /// Local create/delete edits have drifted `total_tasks` from the
    /// server's true count; cleared by the next full listing.
    pub counts_dirty: bool,
}

impl StoreState {
    /// Initial state: empty list, page 1, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transition. Idempotent under re-application with an
    /// identical payload wherever that is meaningful.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loading(loading) => {
                self.loading = loading;
            }
            Action::TasksReceived { tasks, pagination } => {
                self.tasks = tasks;
                self.pagination = pagination;
                self.loading = false;
                self.error = None;
                self.counts_dirty = false;
            }
            Action::ErrorReceived(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            Action::TaskCreated(task) => {
                self.tasks.insert(0, task);
                self.counts_dirty = true;
            }
            Action::TaskUpdated(task) => {
                if let Some(entry) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *entry = task;
                }
            }
            Action::TaskDeleted(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|t| t.id != id);
                if self.tasks.len() != before {
                    self.counts_dirty = true;
                }
            }
            Action::FiltersSet(patch) => {
                self.filters.merge(patch);
            }
            Action::FiltersCleared => {
                self.filters = FilterSet::empty();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskboard_core::{TaskPriority, TaskStatus, UserId, UserRef};

    fn task(id: &str, title: &str) -> Task {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: String::new(),
            due_date: at,
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            tags: Vec::new(),
            created_by: UserRef {
                id: UserId::new("u1"),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            assigned_to: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn page_of(tasks: Vec<Task>) -> Action {
        let total = tasks.len() as u64;
        Action::TasksReceived {
            tasks,
            pagination: Pagination {
                current_page: 1,
                total_pages: 1,
                total_tasks: total,
                has_next_page: false,
                has_prev_page: false,
            },
        }
    }

    #[test]
    fn test_loading_keeps_existing_tasks() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a")]));
        state.apply(Action::Loading(true));

        assert!(state.loading);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_tasks_received_is_idempotent() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a"), task("t2", "b")]));
        let once = state.clone();
        state.apply(page_of(vec![task("t1", "a"), task("t2", "b")]));

        assert_eq!(state, once);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_error_keeps_stale_tasks_visible() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a")]));
        state.apply(Action::Loading(true));
        state.apply(Action::ErrorReceived("Failed to fetch tasks".to_string()));

        assert_eq!(state.error.as_deref(), Some("Failed to fetch tasks"));
        assert!(!state.loading);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_task_created_prepends_without_touching_counts() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a")]));
        state.apply(Action::TaskCreated(task("t2", "b")));

        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.tasks[0].id, TaskId::new("t2"));
        // total_tasks is not adjusted locally; the drift is flagged.
        assert_eq!(state.pagination.total_tasks, 1);
        assert!(state.counts_dirty);
    }

    #[test]
    fn test_task_updated_replaces_matching_entry_only() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a"), task("t2", "b")]));

        let mut updated = task("t1", "a");
        updated.status = TaskStatus::Completed;
        state.apply(Action::TaskUpdated(updated.clone()));

        assert_eq!(state.tasks[0].status, TaskStatus::Completed);
        assert_eq!(state.tasks[1].status, TaskStatus::Pending);

        // Re-applying the identical payload changes nothing.
        let once = state.clone();
        state.apply(Action::TaskUpdated(updated));
        assert_eq!(state, once);
    }

    #[test]
    fn test_task_updated_is_noop_for_absent_id() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a")]));
        let before = state.clone();

        state.apply(Action::TaskUpdated(task("missing", "x")));
        assert_eq!(state, before);
    }

    #[test]
    fn test_task_deleted_removes_entry() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a"), task("t2", "b")]));
        state.apply(Action::TaskDeleted(TaskId::new("t1")));

        assert!(state.tasks.iter().all(|t| t.id != TaskId::new("t1")));
        assert_eq!(state.pagination.total_tasks, 2);
        assert!(state.counts_dirty);
    }

    #[test]
    fn test_deleting_absent_id_is_noop() {
        let mut state = StoreState::new();
        state.apply(page_of(vec![task("t1", "a")]));
        let before = state.clone();

        state.apply(Action::TaskDeleted(TaskId::new("missing")));
        assert_eq!(state, before);
        assert!(!state.counts_dirty);
    }

    #[test]
    fn test_next_listing_clears_count_drift() {
        let mut state = StoreState::new();
        state.apply(Action::TaskCreated(task("t1", "a")));
        assert!(state.counts_dirty);

        state.apply(page_of(vec![task("t1", "a")]));
        assert!(!state.counts_dirty);
    }

    #[test]
    fn test_filters_set_merges_and_clear_resets() {
        let mut state = StoreState::new();
        state.apply(Action::FiltersSet(
            FilterPatch::default().status("pending"),
        ));
        state.apply(Action::FiltersSet(
            FilterPatch::default().priority("urgent"),
        ));

        assert_eq!(state.filters.status.as_deref(), Some("pending"));
        assert_eq!(state.filters.priority.as_deref(), Some("urgent"));

        state.apply(Action::FiltersCleared);
        assert!(state.filters.is_empty());
    }
}
