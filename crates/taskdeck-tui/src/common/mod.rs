//! Shared TUI building blocks.

pub mod task;

pub use task::{ItemOp, PendingItems, TaskId, TaskSeq, TaskState, Tasks};
