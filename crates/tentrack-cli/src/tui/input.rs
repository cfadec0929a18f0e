//! Input handling for TUI key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppCommand, AppMode, FormField, ItemListEditor};

/// Process a key press, returning work for the event loop if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<AppCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }
    match app.mode {
        AppMode::List => handle_list_key(app, key.code),
        AppMode::Form => handle_form_key(app, key.code, ctrl),
        AppMode::ConfirmDelete => handle_confirm_key(app, key.code),
    }
}

fn handle_list_key(app: &mut App, code: KeyCode) -> Option<AppCommand> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('a' | 'n') => app.open_create_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.ask_delete(),
        KeyCode::Char('x') => app.dismiss_notice(),
        KeyCode::Char('r') => return app.request_refresh(),
        _ => {}
    }
    None
}

fn handle_form_key(app: &mut App, code: KeyCode, ctrl: bool) -> Option<AppCommand> {
    if ctrl && code == KeyCode::Char('s') {
        return app.submit_form();
    }
    if code == KeyCode::Esc {
        app.close_form();
        return None;
    }
    let form = app.form.as_mut()?;
    let on_list = form.focus.is_item_list();
    match code {
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Enter => {
            // Enter inside an item list adds the typed entry; elsewhere it submits.
            let added = form.focused_list().is_some_and(ItemListEditor::add_entry);
            if !added {
                return app.submit_form();
            }
        }
        KeyCode::Down if on_list => {
            if let Some(list) = form.focused_list() {
                list.select_next();
            }
        }
        KeyCode::Up if on_list => {
            if let Some(list) = form.focused_list() {
                list.select_prev();
            }
        }
        KeyCode::Down => form.focus_next(),
        KeyCode::Up => form.focus_prev(),
        KeyCode::Delete => {
            if let Some(list) = form.focused_list() {
                list.remove_selected();
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if form.focus == FormField::Status => {
            form.cycle_status(code != KeyCode::Left);
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !ctrl => form.input_char(c),
        _ => {}
    }
    None
}

fn handle_confirm_key(app: &mut App, code: KeyCode) -> Option<AppCommand> {
    match code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            app.cancel_delete();
            None
        }
        _ => None,
    }
}
