use crate::application::{App, AppMode};
use crate::domain::{CategoryKind, ItemStatus};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing(_) => Self::handle_editing_mode(app, key),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Submitted => Self::handle_submitted_mode(app, key),
        }
    }

    /// Whether `key` should end the program in the current mode.
    pub fn is_quit(app: &App, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return true;
        }
        key == KeyCode::Char('q') && matches!(app.mode, AppMode::Normal | AppMode::Submitted)
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::PageDown | KeyCode::Char('n') => {
                // A rejection is already surfaced as an alert.
                let _ = app.next_step();
            }
            KeyCode::BackTab | KeyCode::PageUp | KeyCode::Char('p') => {
                app.prev_step();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                app.jump_to_tab(index);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_selection_down();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            KeyCode::Esc => {
                app.dismiss_submit_error();
            }
            _ => match app.current_category().kind {
                CategoryKind::Identification => Self::handle_identification_key(app, key),
                CategoryKind::Equipment => Self::handle_equipment_key(app, key),
                CategoryKind::Review => Self::handle_review_key(app, key),
            },
        }
    }

    fn handle_identification_key(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::F(2)) {
            app.start_editing();
        }
    }

    fn handle_equipment_key(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::F(2) => app.start_editing(),
            KeyCode::Char(' ') => app.toggle_selected_status(),
            KeyCode::Left | KeyCode::Char('c') => app.set_selected_status(ItemStatus::Conforming),
            KeyCode::Right | KeyCode::Char('x') => app.set_selected_status(ItemStatus::NonConforming),
            _ => {}
        }
    }

    fn handle_review_key(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Char('s')) {
            // The event loop dispatches the record once `loading` is set.
            app.begin_submit();
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_submitted_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Char('r')) {
            app.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::EditTarget;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_identification_flow_with_keys() {
        let mut app = App::default();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Editing(EditTarget::VehiclePlate));
        type_text(&mut app, "abc-1234");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Editing(EditTarget::OperatorName));
        type_text(&mut app, "Jane Doe");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.record.vehicle_plate, "ABC-1234");
        assert_eq!(app.record.operator_name, "Jane Doe");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_step, 1);
    }

    #[test]
    fn test_next_without_identification_raises_alert() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::Alert);
        assert_eq!(app.current_step, 0);

        // Other keys are swallowed until the alert is dismissed.
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::Alert);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_digit_keys_jump_between_tabs() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.current_step, 0);

        app.record.set_vehicle_plate("ABC");
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.current_step, 3);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.current_step, 3);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_step, 2);
    }

    #[test]
    fn test_status_keys_on_equipment_step() {
        let mut app = App::default();
        app.record.set_vehicle_plate("ABC");
        press(&mut app, KeyCode::Char('2'));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.record.response("esparadrapo").unwrap().status, ItemStatus::NonConforming);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.record.response("esparadrapo").unwrap().status, ItemStatus::Conforming);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.record.response("micropore").unwrap().status, ItemStatus::NonConforming);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "acabou");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.record.response("micropore").unwrap().note, "acabou");
    }

    #[test]
    fn test_editing_swallows_navigation_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "np1q");
        assert_eq!(app.input, "NP1Q");
        assert_eq!(app.current_step, 0);
        assert!(!InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::NONE));
        press(&mut app, KeyCode::Esc);
        assert!(app.record.vehicle_plate.is_empty());
    }

    #[test]
    fn test_submit_key_sets_loading_on_review_only() {
        let mut app = App::default();
        app.record.set_vehicle_plate("ABC");
        press(&mut app, KeyCode::Char('s'));
        assert!(!app.loading);

        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.loading);
    }

    #[test]
    fn test_submitted_screen_only_resets() {
        let mut app = App::default();
        app.record.set_vehicle_plate("ABC");
        app.mode = AppMode::Submitted;

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Submitted);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.record.vehicle_plate.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        assert!(InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(InputHandler::is_quit(&app, KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.show_help();
        assert!(!InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::NONE));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_escape_dismisses_submit_error() {
        let mut app = App::default();
        app.submit_error = Some("Falha".to_string());
        press(&mut app, KeyCode::Esc);
        assert!(app.submit_error.is_none());
    }
}
