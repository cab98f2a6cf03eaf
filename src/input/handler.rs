use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Add / edit / delete
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.request_delete();
            Ok(false)
        }

        // Timer
        KeyCode::Char('s') | KeyCode::Enter => {
            app.start_selected();
            Ok(false)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.pause_timer();
            Ok(false)
        }
        KeyCode::Char('S') => {
            app.stop_selected();
            Ok(false)
        }

        // Search
        KeyCode::Char('/') => {
            app.start_search();
            Ok(false)
        }
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.clear_search();
            }
            Ok(false)
        }

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }
        KeyCode::Tab | KeyCode::Down => {
            app.input_form_next_field();
            Ok(false)
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.input_form_prev_field();
            Ok(false)
        }
        KeyCode::Left | KeyCode::Right => {
            app.input_form_cycle();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys while the delete confirmation is shown
fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_delete(false),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the search prompt
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_add_char(c),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::schedule::{MemoryStorage, Scheduler};
    use std::time::Duration;

    fn app() -> AppState {
        let storage = MemoryStorage::default();
        let scheduler = Scheduler::load(Box::new(storage), Duration::from_secs(1)).unwrap();
        AppState::new(scheduler, AppConfig::default())
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_add_task_with_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Stretch");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.scheduler.tasks()[0].title, "Stretch");
    }

    #[test]
    fn test_q_is_text_inside_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input_form.as_ref().unwrap().title, "q");
    }

    #[test]
    fn test_delete_confirmation_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Temp");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.scheduler.tasks().len(), 1);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.scheduler.tasks().is_empty());
    }

    #[test]
    fn test_search_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "qa");
        assert_eq!(app.ui_mode, UiMode::Searching);
        assert_eq!(app.search_query, "qa");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.search_query.is_empty());
    }
}
