use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::JotError;
use crate::note::Note;

/// Synchronous note storage. Results are always ordered newest-first.
pub trait NoteStore {
    fn add(&self, content: &str, tag: &str, priority: &str) -> Result<(), JotError>;
    fn list_all(&self, tag_filter: Option<&str>) -> Result<Vec<Note>, JotError>;
    fn search_by_substring(&self, query: &str) -> Result<Vec<Note>, JotError>;
    fn get_by_id(&self, id: i64) -> Result<Option<Note>, JotError>;
    fn update(&self, id: i64, new_content: &str) -> Result<(), JotError>;
    fn delete(&self, id: i64) -> Result<(), JotError>;
}

pub struct Database {
    conn: Connection,
}

const SELECT_COLUMNS: &str = "id, content, tag, priority, created_at";

impl Database {
    pub fn open(path: &Path) -> Result<Self, JotError> {
        let conn = Connection::open(path)?;
        log::info!("opened note database at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, JotError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, JotError> {
        // SQLite LIKE is case-insensitive out of the box; jot's search
        // is a case-sensitive substring match.
        conn.pragma_update(None, "case_sensitive_like", true)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                tag TEXT,
                priority TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }
}

impl NoteStore for Database {
    fn add(&self, content: &str, tag: &str, priority: &str) -> Result<(), JotError> {
        let now_str = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.conn.execute(
            "INSERT INTO notes (content, tag, priority, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![content, tag, priority, now_str],
        )?;
        log::debug!("added note ({} bytes, tag '{}')", content.len(), tag);
        Ok(())
    }

    fn list_all(&self, tag_filter: Option<&str>) -> Result<Vec<Note>, JotError> {
        let notes = match tag_filter {
            Some(tag) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM notes WHERE tag = ?1
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt.query_map(params![tag], row_to_note)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM notes ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt.query_map([], row_to_note)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(notes)
    }

    fn search_by_substring(&self, query: &str) -> Result<Vec<Note>, JotError> {
        let pattern = format!("%{}%", escape_like(query));
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM notes WHERE content LIKE ?1 ESCAPE '\\'
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![pattern], row_to_note)?;
        let notes = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Note>, JotError> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM notes WHERE id = ?1"),
                params![id],
                row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    fn update(&self, id: i64, new_content: &str) -> Result<(), JotError> {
        self.conn.execute(
            "UPDATE notes SET content = ?1 WHERE id = ?2",
            params![new_content, id],
        )?;
        log::debug!("updated note {}", id);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), JotError> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        log::debug!("deleted note {}", id);
        Ok(())
    }
}

fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    let created_at_str: String = row.get(4)?;
    Ok(Note {
        id: row.get(0)?,
        content: row.get(1)?,
        tag: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        priority: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: parse_created(4, &created_at_str)?,
    })
}

fn parse_created(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Treat the query as a literal substring, not a LIKE pattern.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
