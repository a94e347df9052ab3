//! Assignment dashboard screen.

pub mod render;
pub mod state;
pub mod update;

pub use state::{DashboardColumn, DashboardState};
