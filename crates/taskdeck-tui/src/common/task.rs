//! Async operation tracking.
//!
//! Two levels of tracking, both advisory (UI disablement, not mutual
//! exclusion):
//! - [`Tasks`] holds one [`TaskState`] slot per collection-level
//!   operation (fetches, auth calls, creation).
//! - [`PendingItems`] is the keyed per-task-id marker used by update,
//!   delete and assign so one record cannot be submitted twice while a
//!   call is in flight.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic id generator for spawned operations.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Lifecycle slot for one collection-level operation.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    /// Releases the slot if `id` is still the active operation.
    ///
    /// Returns false for completions that are no longer current (a
    /// newer dispatch replaced them, or the slot was cleared on
    /// logout); such results must not be applied.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// One slot per collection-level operation.
#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub register: TaskState,
    pub task_list: TaskState,
    pub user_list: TaskState,
    pub dashboard: TaskState,
    pub task_create: TaskState,
}

impl Tasks {
    /// True while any collection-level operation is in flight; drives
    /// the spinner and the fast poll cadence.
    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.register.is_running()
            || self.task_list.is_running()
            || self.user_list.is_running()
            || self.dashboard.is_running()
            || self.task_create.is_running()
    }

    pub fn clear(&mut self) {
        self.login.clear();
        self.register.clear();
        self.task_list.clear();
        self.user_list.clear();
        self.dashboard.clear();
        self.task_create.clear();
    }
}

/// Per-item operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOp {
    Update,
    Delete,
    Assign,
}

/// Keyed in-flight markers: task id -> in-progress operation.
#[derive(Debug, Default, Clone)]
pub struct PendingItems {
    entries: HashMap<String, ItemOp>,
}

impl PendingItems {
    /// Acquires the marker for `id`. Returns false when the id already
    /// has an operation in flight; the caller must not dispatch.
    pub fn begin(&mut self, id: &str, op: ItemOp) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), op);
        true
    }

    /// Releases the marker for `id`. Returns false if none was held,
    /// which means the completion is stale (cleared on logout) and its
    /// result must be dropped.
    pub fn finish(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn op_for(&self, id: &str) -> Option<ItemOp> {
        self.entries.get(id).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
