//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                       | Event             |
//! |------------------------------|-------------------|
//! | `q`, `Ctrl+c`                | `Quit`            |
//! | `Tab`                        | `FocusNext`       |
//! | `/`                          | `QueryFocus`      |
//! | `←` / `h` / `p` / `PageUp`   | `PrevPage`        |
//! | `→` / `l` / `n` / `PageDown` | `NextPage`        |
//! | `g`                          | `FirstPage`       |
//! | `r`                          | `Refresh`         |
//! | `e`                          | `Export`          |
//! | printable char               | `Char(c)`         |
//! | `Backspace`                  | `Backspace`       |
//! | `Enter`                      | `Enter`           |
//! | terminal resize              | `Resize(w, h)`    |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode:
//! - every printable character produces `Char`, including shortcut letters
//! - `←` / `→` produce `Cursor` events that move the text cursor
//! - `PageUp` / `PageDown` still page the table
//! - `Ctrl+c`, `Escape`, `Enter`, `Tab`, and `Backspace` keep their bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Horizontal text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// Widgets receive `AppEvent` values: they never inspect crossterm types
/// directly. The App shell is responsible for routing events to the
/// appropriate widget based on the current focus state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus between the table and the query bar.
    FocusNext,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Previous page of the ticket table.
    PrevPage,
    /// Next page of the ticket table.
    NextPage,
    /// Back to page 1.
    FirstPage,
    /// Fetch the sheet now instead of waiting for the timer.
    Refresh,
    /// Write the current snapshot to the export directory.
    Export,
    /// Move the cursor inside the active text input.
    Cursor(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the active input.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, help popup, command bar).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no semantic meaning for the
/// application (mouse events, focus changes, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
///
/// Call this variant whenever a text-input widget (query bar, command bar)
/// has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        // Paging
        PageUp => Some(AppEvent::PrevPage),
        PageDown => Some(AppEvent::NextPage),
        Left | Char('h') | Char('p') if key.modifiers == Mod::NONE => Some(AppEvent::PrevPage),
        Right | Char('l') | Char('n') if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::FirstPage),

        Char('r') if key.modifiers == Mod::NONE => Some(AppEvent::Refresh),
        Char('e') if key.modifiers == Mod::NONE => Some(AppEvent::Export),

        // Remaining printable characters (`?`, `:` and friends)
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Left => Some(AppEvent::Cursor(Direction::Left)),
        Right => Some(AppEvent::Cursor(Direction::Right)),

        PageUp => Some(AppEvent::PrevPage),
        PageDown => Some(AppEvent::NextPage),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
