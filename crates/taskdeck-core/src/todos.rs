//! Todo state container.
//!
//! Holds the task collection and the server-computed dashboard split.
//! The dashboard is a separate source of truth refreshed only by
//! re-fetch; it is deliberately not derived from the collection, so the
//! two can disagree between fetches.

use std::collections::HashSet;

use crate::api::types::{DashboardSummary, Task, TaskStatus};

/// Task collection plus dashboard aggregate.
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    /// Insertion-ordered collection; new tasks are prepended.
    pub tasks: Vec<Task>,
    /// Server-computed assigned-by-me / assigned-to-me split.
    pub dashboard: DashboardSummary,
    /// Transient error from the last failed operation.
    pub error: Option<String>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection and clears any error.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.error = None;
    }

    /// Prepends a task (most-recent-first ordering).
    ///
    /// Any existing record with the same id is dropped first so ids
    /// stay unique even against a duplicate dispatch.
    pub fn add_one(&mut self, task: Task) {
        self.tasks.retain(|t| t.id != task.id);
        self.tasks.insert(0, task);
    }

    /// Replaces the record whose id matches.
    ///
    /// A non-matching id is a silent no-op for the collection; the
    /// returned flag lets callers detect a dropped update.
    pub fn update_one(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id, if present.
    pub fn remove_one(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
    }

    /// Replaces the dashboard aggregate wholesale.
    pub fn set_dashboard(&mut self, dashboard: DashboardSummary) {
        self.dashboard = dashboard;
    }

    /// Replaces matching-id entries inside both dashboard sub-lists.
    ///
    /// A task appears in at most one sub-list by construction of the
    /// server response, but both are checked.
    pub fn update_in_dashboard(&mut self, task: &Task) {
        for slot in self
            .dashboard
            .assigned_by_me
            .iter_mut()
            .chain(self.dashboard.assigned_to_me.iter_mut())
        {
            if slot.id == task.id {
                *slot = task.clone();
            }
        }
    }

    /// Marks every listed id completed. Ids not in the collection are
    /// ignored.
    pub fn mark_many_completed(&mut self, ids: &HashSet<String>) {
        self.set_status_for(ids, TaskStatus::Completed);
    }

    /// Marks every listed id pending.
    pub fn mark_many_pending(&mut self, ids: &HashSet<String>) {
        self.set_status_for(ids, TaskStatus::Pending);
    }

    fn set_status_for(&mut self, ids: &HashSet<String>, status: TaskStatus) {
        for task in &mut self.tasks {
            if ids.contains(&task.id) {
                task.status = status;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Resets to an empty collection and aggregate. Used on logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
