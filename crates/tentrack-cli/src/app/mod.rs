//! Application state for the TUI.

mod form;
mod state;

pub use form::{FieldError, FormField, ItemListEditor, TentForm, format_capacity};
pub use state::{App, AppCommand, AppMode, FetchResult, LoadState, Notice, NoticeLevel};
