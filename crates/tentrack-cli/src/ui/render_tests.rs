//! Tests for TUI rendering.

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tentrack_core::{NewTent, Stats, Tent, TentStatus};

    use crate::app::{App, AppCommand, AppMode, FormField, NoticeLevel};
    use crate::client::ClientError;
    use crate::ui::draw;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Create a `TestBackend` + `Terminal` of the given size and draw the app once.
    fn draw_app(width: u16, height: u16, app: &App) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
    }

    /// Rendered screen as text, one row per line.
    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tent(id: &str, name: &str, status: TentStatus) -> Tent {
        NewTent {
            name: name.into(),
            model: "Sundome 4-Person".into(),
            capacity: 4.0,
            status,
            condition: "Excellent condition".into(),
            last_inspected: today(),
            missing_items: Vec::new(),
            damaged_items: Vec::new(),
            location: "Warehouse A-1".into(),
        }
        .into_tent(id.into(), 0)
    }

    fn loaded(tents: Vec<Tent>) -> App {
        let mut app = App::new("http://localhost:4000", today());
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        let stats = Stats::from_tents(&tents);
        app.finish_fetch(epoch, Ok((tents, stats)));
        app
    }

    #[test]
    fn loading_state_is_shown_before_first_fetch() {
        let app = App::new("http://localhost:4000", today());
        let text = screen(&draw_app(100, 30, &app));
        assert!(text.contains("Loading tents..."));
        assert!(text.contains("Tent Track & Trace"));
    }

    #[test]
    fn empty_inventory_shows_call_to_action_and_zero_counts() {
        let app = loaded(Vec::new());
        let terminal = draw_app(100, 30, &app);
        let text = screen(&terminal);
        assert!(text.contains("No tents registered"));
        assert!(text.contains("Press a to add a tent."));
        assert!(text.contains("Total Tents"));
        // The stats row renders one "0" per box.
        let stats_row: String = text.lines().nth(2).unwrap().to_string();
        assert_eq!(stats_row.matches('0').count(), 4, "{stats_row}");
    }

    #[test]
    fn failed_load_shows_error() {
        let mut app = App::new("http://localhost:4000", today());
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        app.finish_fetch(epoch, Err(ClientError::Config("connection refused".into())));
        let text = screen(&draw_app(100, 30, &app));
        assert!(text.contains("Error loading tents"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn cards_show_tent_details() {
        let mut damaged = tent("b", "REI Base Camp", TentStatus::NeedsRepair);
        damaged.damaged_items = vec!["Main door zipper".into()];
        let app = loaded(vec![damaged, tent("a", "Coleman Dome", TentStatus::Good)]);
        let text = screen(&draw_app(100, 40, &app));
        assert!(text.contains("REI Base Camp"));
        assert!(text.contains("Coleman Dome"));
        assert!(text.contains("Needs Repair"));
        assert!(text.contains("4 persons"));
        assert!(text.contains("Inspected: 15/06/2024"));
        assert!(text.contains("Main door zipper"));
        assert!(text.contains("e: edit"));
    }

    #[test]
    fn long_condition_spans_two_rows_with_ellipsis() {
        let mut worn = tent("a", "Coleman Dome", TentStatus::NeedsRepair);
        worn.condition = "Seam tape peeling along the rainfly ".repeat(10);
        let text = screen(&draw_app(60, 30, &loaded(vec![worn])));
        let rows: Vec<_> = text.lines().filter(|l| l.contains("rainfly")).collect();
        assert_eq!(rows.len(), 2, "{text}");
        assert!(rows[1].contains('…'), "{text}");
    }

    #[test]
    fn selected_card_stays_visible_when_scrolled() {
        let tents: Vec<_> = (0..12)
            .map(|i| tent(&i.to_string(), &format!("Tent number {i}"), TentStatus::Good))
            .collect();
        let mut app = loaded(tents);
        for _ in 0..11 {
            app.select_next();
        }
        let text = screen(&draw_app(80, 24, &app));
        assert!(text.contains("Tent number 11"));
        assert!(!text.contains("Tent number 0 "));
    }

    #[test]
    fn notice_banner_is_rendered() {
        let mut app = loaded(Vec::new());
        app.set_notice(NoticeLevel::Error, "Could not delete t1: API error (500)");
        let text = screen(&draw_app(100, 30, &app));
        assert!(text.contains("Could not delete t1"));
    }

    #[test]
    fn form_overlay_shows_fields_and_errors() {
        let mut app = loaded(Vec::new());
        app.open_create_form();
        assert!(app.submit_form().is_none());
        let form = app.form.as_mut().unwrap();
        form.focus = FormField::MissingItems;
        form.missing.entry = "Guyline kit".into();
        form.missing.add_entry();

        let text = screen(&draw_app(100, 40, &app));
        assert_eq!(app.mode, AppMode::Form);
        assert!(text.contains("Add New Tent"));
        assert!(text.contains("Name is required"));
        assert!(text.contains("Good Condition"));
        assert!(text.contains("1. Guyline kit"));
    }

    #[test]
    fn delete_dialog_names_the_tent() {
        let mut app = loaded(vec![tent("a", "Coleman Dome", TentStatus::Good)]);
        app.ask_delete();
        let text = screen(&draw_app(100, 30, &app));
        assert!(text.contains("Delete \"Coleman Dome\"?"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = loaded(vec![tent("a", "Coleman Dome", TentStatus::Good)]);
        draw_app(10, 5, &app);
        app.open_create_form();
        draw_app(10, 5, &app);
        app.close_form();
        app.ask_delete();
        draw_app(3, 3, &app);
    }
}
