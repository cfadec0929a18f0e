//! tentrack CLI Library
//!
//! Terminal interface for the tent inventory API.
//! Provides both TUI (ratatui) and headless modes.

pub mod app;
pub mod cache;
pub mod client;
pub mod config;
pub mod headless;
pub mod sync;
pub mod tui;
pub mod ui;
