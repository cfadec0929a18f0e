//! SQLite storage for the tentrack API.
//!
//! Provides persistence for tent records and the aggregate count queries.

mod db;
mod models;
mod queries;


pub use db::TentDatabase;
pub use models::TentRow;
pub use db::DatabaseError;
