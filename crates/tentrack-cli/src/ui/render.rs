//! TUI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tentrack_core::TentStatus;

use super::card::{card_lines, status_color};
use crate::app::{App, AppMode, FormField, ItemListEditor, LoadState, NoticeLevel, TentForm};

/// Draw the full UI.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let notice_height = u16::from(app.notice.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(3),             // Stats
            Constraint::Length(notice_height), // Notice banner
            Constraint::Min(3),                // Tents
            Constraint::Length(1),             // Key hints
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_stats(frame, app, chunks[1]);
    draw_notice(frame, app, chunks[2]);
    draw_body(frame, app, chunks[3]);
    draw_hints(frame, app, chunks[4]);

    match app.mode {
        AppMode::Form => {
            if let Some(form) = &app.form {
                draw_form(frame, form);
            }
        }
        AppMode::ConfirmDelete => draw_delete_dialog(frame, app),
        AppMode::List => {}
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let pending = app.cache.pending_count();
    let mut spans = vec![
        Span::styled(
            "Tent Track & Trace",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" | {}", app.api_url), Style::default().fg(Color::DarkGray)),
    ];
    if app.fetching {
        spans.push(Span::styled(" [refreshing...]", Style::default().fg(Color::Yellow)));
    }
    if pending > 0 {
        spans.push(Span::styled(
            format!(" [saving {pending}]"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let stats = app.cache.stats();
    let boxes = [
        ("Total Tents", stats.total, Color::Cyan),
        (
            TentStatus::Good.label(),
            stats.good,
            status_color(TentStatus::Good),
        ),
        (
            TentStatus::NeedsRepair.label(),
            stats.needs_repair,
            status_color(TentStatus::NeedsRepair),
        ),
        (
            TentStatus::MissingItems.label(),
            stats.missing_items,
            status_color(TentStatus::MissingItems),
        ),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, count, color), cell) in boxes.into_iter().zip(cells.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(
            count.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(widget, *cell);
    }
}

fn draw_notice(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Error => Style::default().fg(Color::White).bg(Color::Red),
        NoticeLevel::Info => Style::default().fg(Color::Black).bg(Color::Cyan),
    };
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", notice.text), style),
        Span::styled("  (x to dismiss)", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(banner, area);
}

fn draw_body(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Tents");
    match &app.load {
        LoadState::Loading => {
            let p = Paragraph::new("Loading tents...")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, area);
        }
        LoadState::Failed(message) => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Error loading tents",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message.as_str()),
                Line::from(""),
                Line::from(Span::styled(
                    "Press r to retry.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .wrap(Wrap { trim: false })
            .block(block);
            frame.render_widget(p, area);
        }
        LoadState::Ready if app.tents().is_empty() => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No tents registered",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Start by adding your first tent to the inventory."),
                Line::from(""),
                Line::from(Span::styled(
                    "Press a to add a tent.",
                    Style::default().fg(Color::Green),
                )),
            ])
            .block(block);
            frame.render_widget(p, area);
        }
        LoadState::Ready => draw_cards(frame, app, area),
    }
}

/// Stack cards vertically, scrolling so the selected card stays visible.
fn draw_cards(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let cards: Vec<_> = app
        .tents()
        .iter()
        .map(|tent| card_lines(tent, inner_width))
        .collect();
    let heights: Vec<u16> = cards
        .iter()
        .map(|lines| u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2))
        .collect();

    // First card such that the selected one still fits below it.
    let mut first = app.selected.min(cards.len().saturating_sub(1));
    let mut used = heights.get(first).copied().unwrap_or(0);
    while first > 0 && used.saturating_add(heights[first - 1]) <= area.height {
        first -= 1;
        used = used.saturating_add(heights[first]);
    }

    let mut y = area.y;
    let bottom = area.y.saturating_add(area.height);
    for (index, lines) in cards.into_iter().enumerate().skip(first) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        let card_area = Rect::new(area.x, y, area.width, height);
        let selected = index == app.selected;
        let mut block = Block::default().borders(Borders::ALL);
        if selected {
            block = block
                .border_style(Style::default().fg(Color::Green))
                .title_bottom(Line::from(Span::styled(
                    " e: edit  d: delete ",
                    Style::default().fg(Color::Green),
                )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), card_area);
        y = y.saturating_add(height);
    }
}

fn draw_hints(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = match app.mode {
        AppMode::List => "a: add | e/Enter: edit | d: delete | ↑/↓: select | r: refresh | q: quit",
        AppMode::Form => {
            "Tab/Shift+Tab: field | Enter: submit or add item | Del: remove item | Ctrl+S: save | Esc: cancel"
        }
        AppMode::ConfirmDelete => "y: delete | n/Esc: keep",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Centered rect of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field_line(form: &TentForm, field: FormField, value: String) -> Line<'static> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused && field != FormField::Status { "█" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:<16}", field.label()), label_style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::White)),
    ])
}

fn error_line(form: &TentForm, field: FormField) -> Option<Line<'static>> {
    form.error_for(field).map(|message| {
        Line::from(Span::styled(
            format!("{:16}{message}", ""),
            Style::default().fg(Color::Red),
        ))
    })
}

fn item_list_lines(
    form: &TentForm,
    field: FormField,
    list: &ItemListEditor,
    color: Color,
) -> Vec<Line<'static>> {
    let mut lines = vec![field_line(form, field, format!("+ {}", list.entry))];
    let focused = form.focus == field;
    for (i, item) in list.items.iter().enumerate() {
        let highlighted = focused && list.selected == Some(i);
        let style = if highlighted {
            Style::default().fg(Color::Black).bg(color)
        } else {
            Style::default().fg(color)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:16}", "")),
            Span::styled(format!("{}. {item}", i + 1), style),
        ]));
    }
    lines
}

fn draw_form(frame: &mut Frame<'_>, form: &TentForm) {
    let area = centered(frame.area(), 72, 30);
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for field in [
        FormField::Name,
        FormField::Model,
        FormField::Capacity,
        FormField::Status,
        FormField::LastInspected,
        FormField::Location,
        FormField::Condition,
    ] {
        let value = match field {
            FormField::Name => form.name.clone(),
            FormField::Model => form.model.clone(),
            FormField::Capacity => form.capacity.clone(),
            FormField::Status => format!("◀ {} ▶", form.status.label()),
            FormField::LastInspected => form.last_inspected.clone(),
            FormField::Location => form.location.clone(),
            FormField::Condition => form.condition.clone(),
            FormField::MissingItems | FormField::DamagedItems => String::new(),
        };
        let mut line = field_line(form, field, value);
        if field == FormField::Status {
            line.spans[1].style = Style::default().fg(status_color(form.status));
        }
        lines.push(line);
        lines.extend(error_line(form, field));
    }
    lines.push(Line::from(""));
    lines.extend(item_list_lines(
        form,
        FormField::MissingItems,
        &form.missing,
        Color::Red,
    ));
    lines.extend(item_list_lines(
        form,
        FormField::DamagedItems,
        &form.damaged,
        Color::Yellow,
    ));

    let submit = if form.is_edit() { "Update Tent" } else { "Add Tent" };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("[Ctrl+S] {submit}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(form.title())
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(dialog, area);
}

fn draw_delete_dialog(frame: &mut Frame<'_>, app: &App) {
    let Some(id) = app.pending_delete.as_deref() else {
        return;
    };
    let name = app
        .cache
        .get(id)
        .map_or_else(|| id.to_string(), |t| t.name.clone());

    let area = centered(frame.area(), 50, 7);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            format!("Delete \"{name}\"?"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("This cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Delete  "),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Keep"),
        ]),
    ];
    let dialog = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Delete Tent"))
        .wrap(Wrap { trim: false });
    frame.render_widget(dialog, area);
}
