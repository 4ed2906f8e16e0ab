use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::tui::AppEvent;

const PAGE_LINES: u16 = 10;
const WHEEL_LINES: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.view.tick_animation(),
        AppEvent::Completion(completion) => app.on_completion(completion),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Backspace => app.view.backspace(),
        KeyCode::Delete => app.view.delete(),
        KeyCode::Left => app.view.cursor_left(),
        KeyCode::Right => app.view.cursor_right(),
        KeyCode::Home => app.view.cursor_home(),
        KeyCode::End => app.view.cursor_end(),
        KeyCode::PageUp => app.view.scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.view.scroll_down(PAGE_LINES),
        KeyCode::Char(c) => app.view.insert_char(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.view.scroll_down(WHEEL_LINES),
        MouseEventKind::ScrollUp => app.view.scroll_up(WHEEL_LINES),
        _ => {}
    }
}
