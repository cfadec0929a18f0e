//! tentrack API
//!
//! REST backend for the tent inventory: axum routes over a `SQLite` store.

pub mod dto;
pub mod error;
pub mod routes;
pub mod seed;
pub mod storage;
