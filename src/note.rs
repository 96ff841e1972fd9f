use chrono::{DateTime, Utc};

pub const DEFAULT_TAG: &str = "inbox";
pub const DEFAULT_PRIORITY: &str = "low";

#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub tag: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

/// Collapse a note body onto one line for list rows. Handles both real
/// newlines and the literal `\n` markers older notes may still carry.
pub fn flatten(content: &str) -> String {
    content.replace('\n', " ").replace("\\n", " ")
}

/// Turn literal `\n` sequences typed on the command line into real newlines.
pub fn convert_newline_markers(text: &str) -> String {
    text.replace("\\n", "\n")
}
