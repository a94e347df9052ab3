//! Feature slices for the TUI (state/update/render per screen).

pub mod assign;
pub mod auth;
pub mod dashboard;
pub mod home;
