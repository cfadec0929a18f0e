//! TUI rendering components.

mod card;
mod render;
#[cfg(test)]
mod render_tests;

pub use card::{card_lines, format_inspection_date, person_label, truncate_to_width};
pub use render::draw;
