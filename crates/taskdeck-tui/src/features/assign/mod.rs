//! Task assignment screen.

pub mod render;
pub mod state;
pub mod update;

pub use state::{AssignPane, AssignState};
