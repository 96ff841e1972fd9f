//! External editor hand-off: stage a note body into a temp file, run the
//! configured editor on it, read the result back.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempPath;

use crate::error::JotError;
use crate::note::Note;

/// An in-flight edit session. Holds the temp file path so the file is
/// deleted when this record is dropped, whichever way the edit ends.
pub struct PendingEdit {
    note_id: i64,
    path: TempPath,
}

/// Write the note's current content to a fresh uniquely-named temp file.
pub fn stage_edit(note: &Note) -> Result<PendingEdit, JotError> {
    let mut file = tempfile::Builder::new()
        .prefix("jot-")
        .suffix(".md")
        .tempfile()?;
    file.write_all(note.content.as_bytes())?;
    file.flush()?;
    Ok(PendingEdit {
        note_id: note.id,
        path: file.into_temp_path(),
    })
}

impl PendingEdit {
    pub fn note_id(&self) -> i64 {
        self.note_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The edited content, trimmed. `None` when the user left the file
    /// effectively empty, which callers treat as "keep the old content".
    pub fn read_back(&self) -> Result<Option<String>, JotError> {
        let raw = fs::read_to_string(&self.path)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Run the editor attached to the caller's terminal and block until it
/// exits. A spawn failure or non-zero exit status is an editor error.
pub fn run_editor(editor: &str, path: &Path) -> Result<(), JotError> {
    log::debug!("launching editor '{}' on {}", editor, path.display());
    let status = Command::new(editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| JotError::Editor(format!("failed to launch '{editor}': {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(JotError::Editor(format!("'{editor}' exited with {status}")))
    }
}
