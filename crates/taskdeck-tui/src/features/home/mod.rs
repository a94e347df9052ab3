//! Task list screen.

pub mod render;
pub mod state;
pub mod update;

pub use state::{HomeMode, HomeState, InsertField};
