use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::JotError;

const DEFAULT_EDITOR: &str = "vim";
const DB_FILE: &str = ".jot.db";
const CONFIG_FILE: &str = ".jot.toml";

/// Resolved runtime settings. Environment wins over the config file,
/// which wins over the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PathBuf,
    pub editor: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<PathBuf>,
    editor: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, JotError> {
        let file = read_config_file()?;

        let database = match env::var("JOT_DATABASE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => match file.database {
                Some(path) => path,
                None => home_dir()?.join(DB_FILE),
            },
        };

        let editor = env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.editor)
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Ok(Self { database, editor })
    }
}

/// A missing or unreadable config file is fine; a present but malformed
/// one is reported, so typos do not silently fall back to defaults.
fn read_config_file() -> Result<ConfigFile, JotError> {
    let path = match env::var("JOT_CONFIG") {
        Ok(p) => PathBuf::from(p),
        Err(_) => match home_dir() {
            Ok(home) => home.join(CONFIG_FILE),
            Err(_) => return Ok(ConfigFile::default()),
        },
    };
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return Ok(ConfigFile::default()),
    };
    toml::from_str(&raw).map_err(|e| JotError::Config(format!("{}: {e}", path.display())))
}

fn home_dir() -> Result<PathBuf, JotError> {
    env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| JotError::Config("HOME not set; set JOT_DATABASE explicitly".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_parses_both_keys() {
        let file: ConfigFile =
            toml::from_str("database = \"/tmp/notes.db\"\neditor = \"nano\"\n").unwrap();
        assert_eq!(file.database.unwrap(), PathBuf::from("/tmp/notes.db"));
        assert_eq!(file.editor.unwrap(), "nano");
    }

    #[test]
    fn config_file_keys_are_optional() {
        let file: ConfigFile = toml::from_str("editor = \"nano\"\n").unwrap();
        assert!(file.database.is_none());
        assert_eq!(file.editor.unwrap(), "nano");

        let empty: ConfigFile = toml::from_str("").unwrap();
        assert!(empty.database.is_none());
        assert!(empty.editor.is_none());
    }

    #[test]
    fn malformed_config_file_is_rejected() {
        let parsed: Result<ConfigFile, _> = toml::from_str("editor = [1, 2]");
        assert!(parsed.is_err());
    }
}
