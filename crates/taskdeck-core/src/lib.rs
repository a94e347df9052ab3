//! Core library for the taskdeck client.
//!
//! Everything below the UI lives here: configuration, the persisted
//! credential store, the typed REST API client, and the two state
//! containers (session and todo collection). This crate has no terminal
//! or rendering dependencies so the containers stay testable in isolation.

pub mod api;
pub mod config;
pub mod credentials;
pub mod session;
pub mod todos;
