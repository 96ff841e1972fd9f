//! Key routing. Maps a key press to a command given the current mode,
//! without touching any state.

use crate::term::Key;

use super::Mode;

/// What a key press asks the browser to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    CursorUp,
    CursorDown,
    StartCompose,
    StartSearch,
    StartEdit,
    DeleteSelected,
    ComposeInput(char),
    ComposeBackspace,
    ComposeSave,
    ComposeCancel,
    SearchInput(char),
    SearchBackspace,
    SearchDone,
    Noop,
}

pub fn route(key: Key, mode: &Mode, edit_pending: bool) -> Command {
    match mode {
        Mode::List => route_list(key, edit_pending),
        Mode::Compose { .. } => route_compose(key),
        Mode::Search { .. } => route_search(key),
    }
}

fn route_list(key: Key, edit_pending: bool) -> Command {
    match key {
        Key::Char('q') | Key::Ctrl('c') => Command::Quit,
        Key::Up | Key::Char('k') => Command::CursorUp,
        Key::Down | Key::Char('j') => Command::CursorDown,
        Key::Char('n') => Command::StartCompose,
        Key::Char('/') => Command::StartSearch,
        // A second edit cannot start while one is still being resolved.
        Key::Char('e') if edit_pending => Command::Noop,
        Key::Char('e') => Command::StartEdit,
        Key::Char('x') | Key::Delete | Key::Backspace => Command::DeleteSelected,
        _ => Command::Noop,
    }
}

fn route_compose(key: Key) -> Command {
    match key {
        Key::Ctrl('c') => Command::Quit,
        Key::Ctrl('s') => Command::ComposeSave,
        Key::Esc => Command::ComposeCancel,
        Key::Enter => Command::ComposeInput('\n'),
        Key::Backspace => Command::ComposeBackspace,
        Key::Char(c) => Command::ComposeInput(c),
        _ => Command::Noop,
    }
}

fn route_search(key: Key) -> Command {
    match key {
        Key::Ctrl('c') => Command::Quit,
        Key::Enter | Key::Esc => Command::SearchDone,
        Key::Backspace => Command::SearchBackspace,
        Key::Char(c) => Command::SearchInput(c),
        _ => Command::Noop,
    }
}
