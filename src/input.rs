//! Input events fed to the scene
//!
//! A closed set of event kinds. Only `Quit` and `KeyPress` do anything; the
//! rest are traced and dropped.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// End the game
    Quit,
    /// Any key press (jump)
    KeyPress,
    /// Terminal resized
    WindowChange,
    /// Mouse moved
    PointerMove,
    /// Anything else, with a short description for the log
    Unknown(&'static str),
}

impl InputEvent {
    fn from_key(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return InputEvent::Unknown("key release");
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Quit
            }
            _ => InputEvent::KeyPress,
        }
    }
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => InputEvent::from_key(key),
            Event::Resize(..) => InputEvent::WindowChange,
            Event::FocusGained | Event::FocusLost => InputEvent::Unknown("focus change"),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::PointerMove,
                MouseEventKind::Down(_) => InputEvent::Unknown("mouse button down"),
                MouseEventKind::Up(_) => InputEvent::Unknown("mouse button up"),
                _ => InputEvent::Unknown("mouse scroll"),
            },
            Event::Paste(_) => InputEvent::Unknown("paste"),
        }
    }
}
