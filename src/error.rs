use thiserror::Error;

/// Everything that can go wrong across the CLI and the interactive browser.
#[derive(Debug, Error)]
pub enum JotError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("editor error: {0}")]
    Editor(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Usage(String),
}
