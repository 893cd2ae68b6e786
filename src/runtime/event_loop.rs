use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::App;
use crate::config;
use crate::error::CatalogError;
use crate::store::KeyValueStore;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: draws the UI and feeds key presses to the
/// catalog. Returns `Ok(())` when the user quits.
pub fn run<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<S>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Surface the outcome of a catalog operation in the status box.
fn report<S: KeyValueStore>(app: &mut App<S>, result: Result<(), CatalogError>) {
    match result {
        Ok(()) => {}
        Err(CatalogError::NotFound(id)) => debug!(id = %id, "ignoring action on missing record"),
        Err(e) => {
            warn!(error = %e, "catalog operation failed");
            app.status = Some(e.to_string());
        }
    }
}

/// Handle one key press. Returns `true` when the app should quit.
pub fn handle_key_event<S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<S>,
    state: &mut EventLoopState,
) -> bool {
    app.status = None;

    if app.is_form_open() {
        state.pending_gg = false;
        handle_form_key(key, app);
        return false;
    }

    if app.pending_delete.is_some() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let result = app.confirm_delete(true);
                report(app, result);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                let result = app.confirm_delete(false);
                report(app, result);
            }
            _ => {}
        }
        return false;
    }

    if app.search_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.exit_search_mode(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => app.next(),
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => app.prev(),
            KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
            return false;
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('s') => app.next_sort(),
        KeyCode::Char('S') => app.prev_sort(),
        KeyCode::Char('a') => app.start_add(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_id().map(str::to_string) {
                let result = app.start_edit(&id);
                report(app, result);
            }
        }
        KeyCode::Char('d') => app.request_delete_selected(),
        _ => {}
    }

    // g pending should clear on any other key
    state.pending_gg = false;
    false
}

fn handle_form_key<S: KeyValueStore>(key: KeyEvent, app: &mut App<S>) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => {
            let result = app.save_form();
            report(app, result);
        }
        KeyCode::Tab | KeyCode::Down => app.form_focus = app.form_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_focus = app.form_focus.prev(),
        KeyCode::Backspace => {
            if let Some(input) = app.focused_input_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(input) = app.focused_input_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FormField;
    use crate::config::CatalogSettings;
    use crate::store::{MemoryStore, RECORDS_KEY};

    fn press(app: &mut App<MemoryStore>, state: &mut EventLoopState, code: KeyCode) -> bool {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app, state)
    }

    fn type_text(app: &mut App<MemoryStore>, state: &mut EventLoopState, text: &str) {
        for c in text.chars() {
            press(app, state, KeyCode::Char(c));
        }
    }

    fn new_app() -> App<MemoryStore> {
        let mut app = App::new(MemoryStore::new(), RECORDS_KEY, CatalogSettings::default());
        app.initialize();
        app
    }

    fn add_via_keys(app: &mut App<MemoryStore>, state: &mut EventLoopState, artist: &str, album: &str) {
        press(app, state, KeyCode::Char('a'));
        type_text(app, state, artist);
        press(app, state, KeyCode::Tab);
        type_text(app, state, album);
        press(app, state, KeyCode::Enter);
    }

    #[test]
    fn add_record_through_the_form() {
        let mut app = new_app();
        let mut state = EventLoopState::default();

        press(&mut app, &mut state, KeyCode::Char('a'));
        assert!(app.is_form_open());
        type_text(&mut app, &mut state, "Kate Bushx");
        press(&mut app, &mut state, KeyCode::Backspace);
        press(&mut app, &mut state, KeyCode::Tab);
        assert_eq!(app.form_focus, FormField::Album);
        type_text(&mut app, &mut state, "Hounds of Love");
        press(&mut app, &mut state, KeyCode::BackTab);
        press(&mut app, &mut state, KeyCode::BackTab);
        assert_eq!(app.form_focus, FormField::Notes);
        // 'q' inside the form is text, not quit.
        assert!(!press(&mut app, &mut state, KeyCode::Char('q')));
        press(&mut app, &mut state, KeyCode::Enter);

        assert!(!app.is_form_open());
        let rec = &app.records()[0];
        assert_eq!(rec.artist, "Kate Bush");
        assert_eq!(rec.album, "Hounds of Love");
        assert_eq!(rec.notes, "q");
    }

    #[test]
    fn escape_cancels_the_form() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char('a'));
        type_text(&mut app, &mut state, "abc");
        press(&mut app, &mut state, KeyCode::Esc);
        assert!(!app.is_form_open());
        assert!(app.records().is_empty());
    }

    #[test]
    fn edit_selected_record() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        add_via_keys(&mut app, &mut state, "Bjork", "Post");

        press(&mut app, &mut state, KeyCode::Char('e'));
        assert!(app.editing_id().is_some());
        press(&mut app, &mut state, KeyCode::Tab);
        type_text(&mut app, &mut state, "!");
        press(&mut app, &mut state, KeyCode::Enter);

        assert_eq!(app.records().len(), 1);
        assert_eq!(app.records()[0].album, "Post!");
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        add_via_keys(&mut app, &mut state, "Low", "Things We Lost in the Fire");

        press(&mut app, &mut state, KeyCode::Char('d'));
        assert!(app.pending_delete.is_some());
        press(&mut app, &mut state, KeyCode::Char('n'));
        assert_eq!(app.records().len(), 1);

        press(&mut app, &mut state, KeyCode::Char('d'));
        press(&mut app, &mut state, KeyCode::Char('y'));
        assert!(app.records().is_empty());
    }

    #[test]
    fn edit_and_delete_on_empty_list_do_nothing() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        press(&mut app, &mut state, KeyCode::Char('e'));
        assert!(!app.is_form_open());
        press(&mut app, &mut state, KeyCode::Char('d'));
        assert!(app.pending_delete.is_none());
        assert!(app.status.is_none());
    }

    #[test]
    fn search_mode_filters_live() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        add_via_keys(&mut app, &mut state, "Miles Davis", "Kind of Blue");
        add_via_keys(&mut app, &mut state, "The Beatles", "Abbey Road");

        press(&mut app, &mut state, KeyCode::Char('/'));
        type_text(&mut app, &mut state, "blue");
        assert_eq!(app.view().len(), 1);
        // 'q' while searching is part of the query.
        assert!(!press(&mut app, &mut state, KeyCode::Char('q')));
        press(&mut app, &mut state, KeyCode::Backspace);

        press(&mut app, &mut state, KeyCode::Enter);
        assert!(!app.search_mode);
        assert_eq!(app.search_query(), "blue");

        press(&mut app, &mut state, KeyCode::Char('/'));
        press(&mut app, &mut state, KeyCode::Esc);
        assert_eq!(app.search_query(), "");
        assert_eq!(app.view().len(), 2);
    }

    #[test]
    fn gg_and_g_navigation() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        for name in ["A", "B", "C"] {
            add_via_keys(&mut app, &mut state, name, name);
        }

        press(&mut app, &mut state, KeyCode::Char('G'));
        assert_eq!(app.selected, 2);
        press(&mut app, &mut state, KeyCode::Char('g'));
        assert!(state.pending_gg);
        press(&mut app, &mut state, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);

        press(&mut app, &mut state, KeyCode::Char('j'));
        press(&mut app, &mut state, KeyCode::Char('g'));
        press(&mut app, &mut state, KeyCode::Char('j'));
        assert!(!state.pending_gg);
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn sort_keys_cycle_and_q_quits() {
        let mut app = new_app();
        let mut state = EventLoopState::default();
        let start = app.sort();
        press(&mut app, &mut state, KeyCode::Char('s'));
        assert_ne!(app.sort(), start);
        press(&mut app, &mut state, KeyCode::Char('S'));
        assert_eq!(app.sort(), start);
        assert!(press(&mut app, &mut state, KeyCode::Char('q')));
    }

    #[test]
    fn validation_errors_land_in_status() {
        let settings = CatalogSettings {
            require_artist_album: true,
            ..CatalogSettings::default()
        };
        let mut app = App::new(MemoryStore::new(), RECORDS_KEY, settings);
        app.initialize();
        let mut state = EventLoopState::default();

        press(&mut app, &mut state, KeyCode::Char('a'));
        press(&mut app, &mut state, KeyCode::Enter);
        assert!(app.is_form_open());
        assert_eq!(app.status.as_deref(), Some("Artist is required"));

        type_text(&mut app, &mut state, "x");
        assert!(app.status.is_none());
    }
}
