//! Maps terminal events onto `NotesApp` operations.
//!
//! Key bindings:
//! - sidebar: Up/Down move, Enter selects (or opens the dialog on the `+`
//!   row), `+`/`n` open the dialog, Tab jumps to the composer, `q` quits;
//! - dialog: type the name, Tab cycles colors, Enter creates, Esc dismisses;
//! - composer: type, Alt+Enter inserts a newline, Enter sends, Tab returns
//!   to the sidebar, Esc goes back;
//! - Ctrl+C quits from anywhere.

use crate::tui::render::{cell_in, HitMap};
use crate::tui::{Focus, Scale, TuiState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use pocketnotes_core::{Clock, GroupColor, GroupStore, NotesApp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_event<S: GroupStore, C: Clock>(
    app: &mut NotesApp<S, C>,
    ui: &mut TuiState,
    hits: &HitMap,
    scale: Scale,
    event: Event,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            sync_focus(app, ui);
            handle_key(app, ui, key)
        }
        Event::Mouse(mouse) => {
            if let MouseEventKind::Down(_) = mouse.kind {
                handle_pointer_down(app, ui, hits, scale, mouse.column, mouse.row);
            }
            Flow::Continue
        }
        Event::Resize(columns, _) => {
            app.resize(scale.width_units(columns));
            sync_focus(app, ui);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn composer_on_screen<S: GroupStore, C: Clock>(app: &NotesApp<S, C>) -> bool {
    app.selected_id().is_some() && app.layout().main_visible()
}

/// Keeps focus on a pane that is actually on screen.
fn sync_focus<S: GroupStore, C: Clock>(app: &NotesApp<S, C>, ui: &mut TuiState) {
    if !composer_on_screen(app) {
        ui.focus = Focus::Sidebar;
    } else if !app.layout().sidebar_visible() {
        ui.focus = Focus::Composer;
    }
    ui.cursor = ui.cursor.min(app.groups().len());
}

fn handle_key<S: GroupStore, C: Clock>(
    app: &mut NotesApp<S, C>,
    ui: &mut TuiState,
    key: KeyEvent,
) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }
    if app.is_dialog_open() {
        dialog_key(app, key);
        return Flow::Continue;
    }
    match ui.focus {
        Focus::Sidebar => sidebar_key(app, ui, key),
        Focus::Composer => {
            composer_key(app, ui, key);
            Flow::Continue
        }
    }
}

fn dialog_key<S: GroupStore, C: Clock>(app: &mut NotesApp<S, C>, key: KeyEvent) {
    let Some(dialog) = app.dialog() else {
        return;
    };
    let mut name = dialog.name().to_string();
    let color = dialog.color();

    match key.code {
        KeyCode::Esc => app.dismiss_dialog(),
        KeyCode::Enter => {
            app.submit_create_dialog();
        }
        KeyCode::Tab => app.pick_dialog_color(color.map_or(GroupColor::ALL[0], GroupColor::next)),
        KeyCode::Backspace => {
            name.pop();
            app.set_dialog_name(name);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            name.push(ch);
            app.set_dialog_name(name);
        }
        _ => {}
    }
}

fn sidebar_key<S: GroupStore, C: Clock>(
    app: &mut NotesApp<S, C>,
    ui: &mut TuiState,
    key: KeyEvent,
) -> Flow {
    let rows = app.groups().len() + 1;
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Up => ui.cursor = ui.cursor.checked_sub(1).unwrap_or(rows - 1),
        KeyCode::Down => ui.cursor = (ui.cursor + 1) % rows,
        KeyCode::Char('+') | KeyCode::Char('n') => app.open_create_dialog(),
        KeyCode::Tab if composer_on_screen(app) => ui.focus = Focus::Composer,
        KeyCode::Enter => match app.groups().get(ui.cursor).map(|group| group.id) {
            Some(id) => {
                app.select_group(id);
                ui.focus = Focus::Composer;
            }
            None => app.open_create_dialog(),
        },
        _ => {}
    }
    Flow::Continue
}

fn composer_key<S: GroupStore, C: Clock>(
    app: &mut NotesApp<S, C>,
    ui: &mut TuiState,
    key: KeyEvent,
) {
    let mut draft = app.note_draft().to_string();
    match key.code {
        KeyCode::Esc => {
            app.back();
            ui.focus = Focus::Sidebar;
        }
        KeyCode::Tab if app.layout().sidebar_visible() => ui.focus = Focus::Sidebar,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            draft.push('\n');
            app.set_note_draft(draft);
        }
        KeyCode::Enter => {
            app.submit_note();
        }
        KeyCode::Backspace => {
            draft.pop();
            app.set_note_draft(draft);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            draft.push(ch);
            app.set_note_draft(draft);
        }
        _ => {}
    }
}

fn handle_pointer_down<S: GroupStore, C: Clock>(
    app: &mut NotesApp<S, C>,
    ui: &mut TuiState,
    hits: &HitMap,
    scale: Scale,
    column: u16,
    row: u16,
) {
    if app.is_dialog_open() {
        if app.pointer_down(scale.point(column, row)) {
            return;
        }
        if let Some(color) = hits.swatch_at(column, row) {
            app.pick_dialog_color(color);
        } else if hits.create_button.is_some_and(|area| cell_in(area, column, row)) {
            app.submit_create_dialog();
        }
        return;
    }

    let hit = |area: Option<ratatui::layout::Rect>| area.is_some_and(|a| cell_in(a, column, row));
    if hit(hits.add_button) {
        app.open_create_dialog();
    } else if let Some((index, id)) = hits.group_at(column, row) {
        app.select_group(id);
        ui.cursor = index;
        ui.focus = Focus::Composer;
    } else if hit(hits.back_button) {
        app.back();
        ui.focus = Focus::Sidebar;
    } else if hit(hits.send_button) {
        app.submit_note();
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_event, Flow};
    use crate::tui::render::HitMap;
    use crate::tui::{Focus, Scale, TuiState};
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use pocketnotes_core::{GroupColor, JsonGroupStore, MemoryKeyValueStorage, NotesApp};

    type App = NotesApp<JsonGroupStore<MemoryKeyValueStorage>>;

    fn app(width_units: u32) -> App {
        NotesApp::new(JsonGroupStore::new(MemoryKeyValueStorage::new()), width_units)
    }

    fn send(app: &mut App, ui: &mut TuiState, code: KeyCode) -> Flow {
        send_with(app, ui, code, KeyModifiers::NONE)
    }

    fn send_with(app: &mut App, ui: &mut TuiState, code: KeyCode, modifiers: KeyModifiers) -> Flow {
        let event = Event::Key(KeyEvent::new(code, modifiers));
        handle_event(app, ui, &HitMap::default(), Scale::new(8), event)
    }

    fn type_text(app: &mut App, ui: &mut TuiState, text: &str) {
        for ch in text.chars() {
            send(app, ui, KeyCode::Char(ch));
        }
    }

    fn click(app: &mut App, ui: &mut TuiState, hits: &HitMap, column: u16, row: u16) {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        handle_event(app, ui, hits, Scale::new(8), event);
    }

    #[test]
    fn keyboard_creates_group_through_dialog() {
        let mut app = app(1200);
        let mut ui = TuiState::default();

        send(&mut app, &mut ui, KeyCode::Char('+'));
        assert!(app.is_dialog_open());
        type_text(&mut app, &mut ui, "Jane Doex");
        send(&mut app, &mut ui, KeyCode::Backspace);
        send(&mut app, &mut ui, KeyCode::Enter);
        assert!(app.groups().is_empty(), "no color picked yet");

        send(&mut app, &mut ui, KeyCode::Tab);
        send(&mut app, &mut ui, KeyCode::Tab);
        send(&mut app, &mut ui, KeyCode::Enter);
        assert!(!app.is_dialog_open());
        assert_eq!(app.groups()[0].name, "Jane Doe");
        assert_eq!(app.groups()[0].color, GroupColor::Pink);
    }

    #[test]
    fn escape_dismisses_dialog_without_creating() {
        let mut app = app(1200);
        let mut ui = TuiState::default();

        send(&mut app, &mut ui, KeyCode::Char('n'));
        type_text(&mut app, &mut ui, "Draft");
        send(&mut app, &mut ui, KeyCode::Esc);
        assert!(!app.is_dialog_open());
        assert!(app.groups().is_empty());
    }

    #[test]
    fn select_compose_and_go_back() {
        let mut app = app(400);
        let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
        let mut ui = TuiState::default();

        send(&mut app, &mut ui, KeyCode::Enter);
        assert_eq!(app.selected_id(), Some(id));
        assert_eq!(ui.focus, Focus::Composer);
        assert!(!app.layout().sidebar_visible());

        type_text(&mut app, &mut ui, "line one");
        send_with(&mut app, &mut ui, KeyCode::Enter, KeyModifiers::ALT);
        type_text(&mut app, &mut ui, "line two");
        send(&mut app, &mut ui, KeyCode::Enter);
        assert_eq!(app.group(id).unwrap().notes[0].content, "line one\nline two");
        assert_eq!(app.note_draft(), "");

        send(&mut app, &mut ui, KeyCode::Esc);
        assert_eq!(app.selected_id(), None);
        assert!(app.layout().sidebar_visible());
        assert_eq!(ui.focus, Focus::Sidebar);
    }

    #[test]
    fn narrowing_with_sidebar_shown_moves_typing_off_hidden_composer() {
        let mut app = app(1200);
        let id = app.create_group("Work", Some(GroupColor::Blue)).unwrap();
        let mut ui = TuiState::default();
        send(&mut app, &mut ui, KeyCode::Enter);
        assert_eq!(ui.focus, Focus::Composer);

        handle_event(
            &mut app,
            &mut ui,
            &HitMap::default(),
            Scale::new(8),
            Event::Resize(80, 24),
        );
        assert!(app.layout().sidebar_visible());
        assert!(!app.layout().main_visible());
        assert_eq!(ui.focus, Focus::Sidebar);

        send(&mut app, &mut ui, KeyCode::Char('x'));
        send(&mut app, &mut ui, KeyCode::Tab);
        assert_eq!(ui.focus, Focus::Sidebar);
        assert_eq!(app.note_draft(), "");

        send(&mut app, &mut ui, KeyCode::Enter);
        assert!(app.group(id).unwrap().notes.is_empty());
        assert!(app.layout().main_visible());
        assert_eq!(ui.focus, Focus::Composer);
    }

    #[test]
    fn quit_keys() {
        let mut app = app(1200);
        let mut ui = TuiState::default();
        assert_eq!(
            send_with(&mut app, &mut ui, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Flow::Quit
        );
        assert_eq!(send(&mut app, &mut ui, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn click_outside_dialog_dismisses_it() {
        let mut app = app(1200);
        let mut ui = TuiState::default();
        app.open_create_dialog();
        app.set_dialog_name("Draft");
        let scale = Scale::new(8);
        let dialog_cells = ratatui::layout::Rect::new(10, 5, 20, 8);
        app.set_dialog_bounds(scale.rect(dialog_cells));
        let hits = HitMap {
            dialog: Some(dialog_cells),
            ..HitMap::default()
        };

        click(&mut app, &mut ui, &hits, 12, 6);
        assert!(app.is_dialog_open());
        click(&mut app, &mut ui, &hits, 2, 2);
        assert!(!app.is_dialog_open());
    }

    #[test]
    fn resize_event_updates_layout() {
        let mut app = app(1200);
        let mut ui = TuiState::default();
        handle_event(
            &mut app,
            &mut ui,
            &HitMap::default(),
            Scale::new(8),
            Event::Resize(80, 24),
        );
        assert!(app.layout().is_narrow());
        assert_eq!(app.layout().width(), 640);
    }
}
