//! tentrack Core Library
//!
//! Shared functionality for tentrack components:
//! - The tent record model and its status vocabulary
//! - Inspection date and capacity coercion
//! - Aggregate counts for the dashboard
//! - Tracing initialization

pub mod error;
pub mod stats;
pub mod status;
pub mod tent;
pub mod tracing_init;

pub use error::{Error, Result};
pub use stats::Stats;
pub use status::TentStatus;
pub use tent::{NewTent, Tent, TentPatch};
