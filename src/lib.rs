//! patdraft - terminal wizard client for an AI-assisted patent drafting
//! backend.
//!
//! The binary drives everything; the library exists so integration tests can
//! exercise the wizard against an in-memory backend.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod types;
pub mod ui;
pub mod wizard;
