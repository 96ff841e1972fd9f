//! Raw-mode terminal session for the interactive browser: alternate
//! screen, blocking key reads, frame drawing, and the suspend/resume
//! pair used while an external editor owns the terminal.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};

/// Decoded key press, independent of the backend's event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Other,
}

/// Terminal state guard. Construction enters the alternate screen and raw
/// mode; drop restores the terminal even on early returns.
pub struct TermSession {
    active: bool,
}

impl TermSession {
    pub fn new() -> io::Result<Self> {
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self { active: true })
    }

    /// Block until the next key press, ignoring releases and non-key events.
    pub fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(translate_key_event(key_event));
                }
            }
        }
    }

    /// Repaint the whole frame. Raw mode needs explicit carriage returns.
    pub fn draw(&mut self, frame: &str) -> io::Result<()> {
        let mut out = io::stdout();
        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for line in frame.lines() {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        out.flush()
    }

    /// Hand the terminal back to the shell so a child process can use it.
    pub fn suspend(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(io::stdout(), cursor::Show)?;
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), terminal::LeaveAlternateScreen)
    }

    /// Reclaim the terminal after `suspend`.
    pub fn resume(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        self.active = true;
        Ok(())
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(io::stdout(), cursor::Show);
            let _ = terminal::disable_raw_mode();
            let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
        }
    }
}

fn translate_key_event(key_event: KeyEvent) -> Key {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char(ch) => {
            // Some terminals deliver Enter as a raw '\r' or '\n'.
            if ch == '\r' || ch == '\n' {
                return Key::Enter;
            }
            if ctrl { Key::Ctrl(ch) } else { Key::Char(ch) }
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Delete => Key::Delete,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn plain_characters_pass_through() {
        let key = translate_key_event(press(KeyCode::Char('j'), KeyModifiers::empty()));
        assert_eq!(key, Key::Char('j'));
    }

    #[test]
    fn control_modifier_is_detected() {
        let key = translate_key_event(press(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(key, Key::Ctrl('s'));
    }

    #[test]
    fn raw_carriage_return_is_enter() {
        let key = translate_key_event(press(KeyCode::Char('\r'), KeyModifiers::empty()));
        assert_eq!(key, Key::Enter);
    }

    #[test]
    fn navigation_keys_translate() {
        assert_eq!(
            translate_key_event(press(KeyCode::Up, KeyModifiers::empty())),
            Key::Up
        );
        assert_eq!(
            translate_key_event(press(KeyCode::Esc, KeyModifiers::empty())),
            Key::Esc
        );
        assert_eq!(
            translate_key_event(press(KeyCode::Delete, KeyModifiers::empty())),
            Key::Delete
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let key = translate_key_event(press(KeyCode::F(5), KeyModifiers::empty()));
        assert_eq!(key, Key::Other);
    }
}
