//! Tent card rendering.

use chrono::NaiveDate;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tentrack_core::{Tent, TentStatus};
use unicode_width::UnicodeWidthChar;

use crate::app::format_capacity;
use crate::cache::OPTIMISTIC_PREFIX;

/// Items listed before collapsing the rest into "+ N more".
const ITEM_PREVIEW: usize = 2;

/// Rows of condition text shown on a card.
const CONDITION_ROWS: usize = 2;

pub(crate) const fn status_color(status: TentStatus) -> Color {
    match status {
        TentStatus::Good => Color::Green,
        TentStatus::NeedsRepair => Color::Yellow,
        TentStatus::MissingItems => Color::Red,
    }
}

pub(crate) const fn status_icon(status: TentStatus) -> &'static str {
    match status {
        TentStatus::Good => "✔",
        TentStatus::NeedsRepair => "⚠",
        TentStatus::MissingItems => "✘",
    }
}

/// Badge span: icon and label in the status colour.
pub(crate) fn status_badge(status: TentStatus) -> Span<'static> {
    Span::styled(
        format!(" {} {} ", status_icon(status), status.label()),
        Style::default()
            .fg(Color::Black)
            .bg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

/// `DD/MM/YYYY`.
pub fn format_inspection_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "1 person", "4 persons".
pub fn person_label(capacity: f64) -> String {
    let suffix = if (capacity - 1.0).abs() < f64::EPSILON { "" } else { "s" };
    format!("{} person{suffix}", format_capacity(capacity))
}

/// Cut `text` to at most `max_width` display columns, ending with `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Split `text` into rows of at most `width` columns, keeping `max_rows` rows
/// and ending the last one with `…` when text is left over.
pub fn clamp_rows(text: &str, width: usize, max_rows: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut rest = text;
    while !rest.is_empty() && rows.len() < max_rows {
        if width == 0 || rows.len() + 1 == max_rows {
            rows.push(truncate_to_width(rest, width));
            break;
        }
        let mut used = 0;
        let mut split = rest.len();
        for (index, c) in rest.char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                split = index;
                break;
            }
            used += w;
        }
        rows.push(rest[..split].to_string());
        rest = &rest[split..];
    }
    rows
}

fn item_lines(title: &str, items: &[String], color: Color) -> Vec<Line<'static>> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(Span::styled(
        format!("{title}:"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    for item in items.iter().take(ITEM_PREVIEW) {
        lines.push(Line::from(Span::styled(
            format!("  • {item}"),
            Style::default().fg(color),
        )));
    }
    if items.len() > ITEM_PREVIEW {
        lines.push(Line::from(Span::styled(
            format!("  + {} more", items.len() - ITEM_PREVIEW),
            Style::default().fg(color).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

/// Content lines of one card for an inner width of `width` columns.
pub fn card_lines(tent: &Tent, width: usize) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::Gray);
    let mut title = vec![
        Span::styled(
            tent.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status_badge(tent.status),
    ];
    if tent.id.starts_with(OPTIMISTIC_PREFIX) {
        title.push(Span::styled(
            " saving…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(tent.model.clone(), dim)),
        Line::from(vec![
            Span::raw(person_label(tent.capacity)),
            Span::styled("  ·  ", dim),
            Span::raw(tent.location.clone()),
        ]),
        Line::from(Span::styled(
            format!("Inspected: {}", format_inspection_date(tent.last_inspected)),
            dim,
        )),
    ];

    if !tent.condition.trim().is_empty() {
        // Rows are pre-split: card paragraphs are not wrapped.
        lines.extend(
            clamp_rows(tent.condition.trim(), width, CONDITION_ROWS)
                .into_iter()
                .map(Line::from),
        );
    }

    lines.extend(item_lines("Missing items", &tent.missing_items, Color::Red));
    lines.extend(item_lines("Damaged items", &tent.damaged_items, Color::Yellow));
    lines
}
