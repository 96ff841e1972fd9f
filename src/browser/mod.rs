//! Interactive note browser: a single-threaded state machine fed one
//! event at a time, rendered as a full frame after every step.

pub mod editor;
pub mod input;
pub mod render;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::JotError;
use crate::format::FormatContext;
use crate::note::{DEFAULT_PRIORITY, DEFAULT_TAG, Note};
use crate::store::NoteStore;
use crate::table;
use crate::term::{Key, TermSession};

use editor::PendingEdit;
use input::Command;

/// Interaction contexts. Compose and search own their text buffers, so
/// a buffer cannot leak into a mode it does not belong to.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    List,
    Compose { buffer: String },
    Search { query: String },
}

/// One input for the state machine: a key press, or the outcome of an
/// external editor run that the session loop performed on our behalf.
pub enum BrowserEvent {
    Key(Key),
    EditFinished(Result<(), JotError>),
}

/// Work the session loop must do after a state update.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Edit(PathBuf),
}

pub struct Browser<'a> {
    store: &'a dyn NoteStore,
    mode: Mode,
    notes: Vec<Note>,
    cursor: usize,
    filter: String,
    last_error: Option<JotError>,
    pending_edit: Option<PendingEdit>,
    quitting: bool,
}

impl<'a> Browser<'a> {
    /// A browser showing the current notes. A failing initial load is
    /// not fatal; it surfaces like any other operation error.
    pub fn new(store: &'a dyn NoteStore) -> Self {
        let mut browser = Self {
            store,
            mode: Mode::List,
            notes: Vec::new(),
            cursor: 0,
            filter: String::new(),
            last_error: None,
            pending_edit: None,
            quitting: false,
        };
        browser.refresh();
        browser
    }

    pub fn quitting(&self) -> bool {
        self.quitting
    }

    /// Advance the state machine by one event.
    pub fn handle(&mut self, event: BrowserEvent) -> Action {
        if self.quitting {
            return Action::None;
        }
        match event {
            BrowserEvent::Key(key) => self.handle_key(key),
            BrowserEvent::EditFinished(outcome) => {
                self.finish_edit(outcome);
                Action::None
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Action {
        match input::route(key, &self.mode, self.pending_edit.is_some()) {
            Command::Quit => {
                self.quitting = true;
            }
            Command::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Command::CursorDown => {
                if self.cursor + 1 < self.notes.len() {
                    self.cursor += 1;
                }
            }
            Command::StartCompose => {
                self.mode = Mode::Compose {
                    buffer: String::new(),
                };
            }
            Command::StartSearch => {
                // Seed the input with the active filter so a second
                // search refines rather than starts over.
                self.mode = Mode::Search {
                    query: self.filter.clone(),
                };
            }
            Command::StartEdit => return self.start_edit(),
            Command::DeleteSelected => self.delete_selected(),
            Command::ComposeInput(ch) => {
                if let Mode::Compose { buffer } = &mut self.mode {
                    buffer.push(ch);
                }
            }
            Command::ComposeBackspace => {
                if let Mode::Compose { buffer } = &mut self.mode {
                    buffer.pop();
                }
            }
            Command::ComposeSave => self.save_compose(),
            Command::ComposeCancel => self.mode = Mode::List,
            Command::SearchInput(ch) => {
                if let Mode::Search { query } = &mut self.mode {
                    query.push(ch);
                }
                self.resync_search();
            }
            Command::SearchBackspace => {
                if let Mode::Search { query } = &mut self.mode {
                    query.pop();
                }
                self.resync_search();
            }
            Command::SearchDone => self.mode = Mode::List,
            Command::Noop => {}
        }
        Action::None
    }

    /// Re-run the query after a keystroke changed it. Only a successful
    /// query becomes the active filter; on failure the previous result
    /// set and filter stay visible under the error.
    fn resync_search(&mut self) {
        let query = match &self.mode {
            Mode::Search { query } => query.clone(),
            _ => return,
        };
        match self.store.search_by_substring(&query) {
            Ok(notes) => {
                self.notes = notes;
                self.cursor = 0;
                self.filter = query;
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }

    fn save_compose(&mut self) {
        let buffer = match std::mem::replace(&mut self.mode, Mode::List) {
            Mode::Compose { buffer } => buffer,
            other => {
                self.mode = other;
                return;
            }
        };
        if buffer.trim().is_empty() {
            return;
        }
        match self.store.add(&buffer, DEFAULT_TAG, DEFAULT_PRIORITY) {
            Ok(()) => self.refresh(),
            Err(err) => self.last_error = Some(err),
        }
    }

    fn delete_selected(&mut self) {
        let id = match self.notes.get(self.cursor) {
            Some(selected) => selected.id,
            None => return,
        };
        match self.store.delete(id) {
            Ok(()) => self.refresh(),
            Err(err) => self.last_error = Some(err),
        }
    }

    fn start_edit(&mut self) -> Action {
        let Some(selected) = self.notes.get(self.cursor) else {
            return Action::None;
        };
        match editor::stage_edit(selected) {
            Ok(pending) => {
                let path = pending.path().to_path_buf();
                self.pending_edit = Some(pending);
                self.last_error = None;
                Action::Edit(path)
            }
            Err(err) => {
                self.last_error = Some(err);
                Action::None
            }
        }
    }

    fn finish_edit(&mut self, outcome: Result<(), JotError>) {
        // Dropping the pending record deletes the temp file on every
        // path out of here.
        let Some(pending) = self.pending_edit.take() else {
            return;
        };
        if let Err(err) = outcome {
            self.last_error = Some(err);
            return;
        }
        match pending.read_back() {
            Ok(Some(content)) => match self.store.update(pending.note_id(), &content) {
                Ok(()) => self.refresh(),
                Err(err) => self.last_error = Some(err),
            },
            // Emptied file: keep the note as it was.
            Ok(None) => self.refresh(),
            Err(err) => self.last_error = Some(err),
        }
    }

    /// Reload the visible notes through the active filter and pull the
    /// cursor back onto a real row.
    fn refresh(&mut self) {
        let loaded = if self.filter.is_empty() {
            self.store.list_all(None)
        } else {
            self.store.search_by_substring(&self.filter)
        };
        match loaded {
            Ok(notes) => {
                self.notes = notes;
                self.last_error = None;
                self.reclamp();
            }
            Err(err) => self.last_error = Some(err),
        }
    }

    fn reclamp(&mut self) {
        if self.notes.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.notes.len() {
            self.cursor = self.notes.len() - 1;
        }
    }
}

/// Run the browser until the user quits. The terminal is put into raw
/// alternate-screen mode for the duration and suspended around editor
/// runs so the editor gets the real screen.
pub fn run(store: &dyn NoteStore, config: &Config) -> Result<(), JotError> {
    let ctx = FormatContext::from_env();
    let width = table::terminal_width();
    let mut session = TermSession::new()?;
    let mut browser = Browser::new(store);
    session.draw(&render::render(&browser, &ctx, width))?;

    while !browser.quitting() {
        let key = session.read_key()?;
        let action = browser.handle(BrowserEvent::Key(key));
        session.draw(&render::render(&browser, &ctx, width))?;
        if let Action::Edit(path) = action {
            session.suspend()?;
            let outcome = editor::run_editor(&config.editor, &path);
            session.resume()?;
            browser.handle(BrowserEvent::EditFinished(outcome));
            session.draw(&render::render(&browser, &ctx, width))?;
        }
    }

    // The farewell goes on the main screen; drawn inside the alternate
    // screen it would disappear with it.
    let farewell = render::render(&browser, &ctx, width);
    drop(session);
    print!("{farewell}");
    Ok(())
}
