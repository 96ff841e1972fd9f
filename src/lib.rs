use std::env;
use std::fs;

use chrono::Local;

pub mod browser;
pub mod config;
pub mod error;
pub mod format;
pub mod markdown;
pub mod note;
pub mod store;
pub mod table;
pub mod term;

pub use error::JotError;

use config::Config;
use format::FormatContext;
use note::Note;
use store::{Database, NoteStore};

pub fn entry() -> Result<(), JotError> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_welcome();
        return Ok(());
    }

    let cmd = args.remove(0);
    let config = Config::load()?;

    match cmd.as_str() {
        "add" => add_note(args, &config)?,
        "list" => list_notes(args, &config)?,
        "search" => search_notes(args, &config)?,
        "edit" => edit_note(args, &config)?,
        "view" => view_notes(&config)?,
        "config" => show_config(&config),
        "help" | "--help" | "-h" => print_help(),
        other => {
            return Err(JotError::Usage(format!(
                "unknown command '{other}' (expected add, list, search, edit, view, config or help)"
            )));
        }
    }

    Ok(())
}

fn print_welcome() {
    println!(
        "Welcome to jot! Capture a thought with `jot add \"...\"` or run `jot help` for the full command list."
    );
}

fn print_help() {
    println!(
        "\
jot: quick notes from your terminal
Usage:
  jot add [-t <tag>] [-p <priority>] <text...>
                        Save a note (literal \\n in the text starts a new line)
  jot list [-t <tag>]   List notes, newest first
  jot search <query>    List notes containing <query> (case-sensitive)
  jot edit <id>         Edit one note in your editor
  jot view              Browse, search and edit notes interactively
  jot config            Show the resolved database path and editor
  jot help              Show this message

Environment:
  JOT_DATABASE          Override the database path (default: ~/.jot.db)
  JOT_CONFIG            Override the config file path (default: ~/.jot.toml)
  VISUAL / EDITOR       Editor for `jot edit` and the browser
"
    );
}

fn add_note(args: Vec<String>, config: &Config) -> Result<(), JotError> {
    let mut tag = String::new();
    let mut priority = note::DEFAULT_PRIORITY.to_string();
    let mut words: Vec<String> = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-t" | "--tag" => {
                tag = iter
                    .next()
                    .ok_or_else(|| JotError::Usage("provide a tag after -t/--tag".to_string()))?;
            }
            "-p" | "--priority" => {
                priority = iter.next().ok_or_else(|| {
                    JotError::Usage("provide a priority after -p/--priority".to_string())
                })?;
            }
            other if other.starts_with('-') => {
                return Err(JotError::Usage(format!("unknown flag for add: {other}")));
            }
            word => words.push(word.to_string()),
        }
    }

    if words.is_empty() {
        return Err(JotError::Usage(
            "provide the note text, e.g. `jot add \"call the bank\"`".to_string(),
        ));
    }
    let content = note::convert_newline_markers(&words.join(" "));
    if content.trim().is_empty() {
        return Err(JotError::Usage("note text is empty".to_string()));
    }

    let db = Database::open(&config.database)?;
    db.add(&content, &tag, &priority)?;
    println!("Saved note: {content}");
    Ok(())
}

fn list_notes(args: Vec<String>, config: &Config) -> Result<(), JotError> {
    let mut tag_filter: Option<String> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-t" | "--tag" => {
                tag_filter = Some(
                    iter.next()
                        .ok_or_else(|| JotError::Usage("provide a tag after -t/--tag".to_string()))?,
                );
            }
            other => {
                return Err(JotError::Usage(format!("unknown flag for list: {other}")));
            }
        }
    }

    let db = Database::open(&config.database)?;
    let notes = db.list_all(tag_filter.as_deref())?;
    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }
    print_note_table(&notes, "%Y-%m-%d");
    Ok(())
}

fn search_notes(args: Vec<String>, config: &Config) -> Result<(), JotError> {
    if args.is_empty() {
        return Err(JotError::Usage(
            "provide a search query, e.g. `jot search bank`".to_string(),
        ));
    }
    let query = args.join(" ");

    let db = Database::open(&config.database)?;
    let notes = db.search_by_substring(&query)?;
    if notes.is_empty() {
        println!("No notes found matching '{query}'.");
        return Ok(());
    }
    print_note_table(&notes, "%Y-%m-%d %H:%M");
    Ok(())
}

fn print_note_table(notes: &[Note], time_format: &str) {
    let ctx = FormatContext::from_env();
    // The other four columns plus separators take the rest of the line.
    let budget = table::terminal_width().saturating_sub(44).max(20);
    let headers = vec![
        "ID".to_string(),
        "Note".to_string(),
        "Tag".to_string(),
        "Priority".to_string(),
        "Created".to_string(),
    ];
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|n| {
            let created = n.created_at.with_timezone(&Local).format(time_format);
            vec![
                ctx.format_id(&n.id.to_string()),
                table::truncate_with_ellipsis(&note::flatten(&n.content), budget),
                n.tag.clone(),
                n.priority.clone(),
                ctx.format_timestamp(&created.to_string()),
            ]
        })
        .collect();
    print!("{}", table::render_table(&headers, &rows));
}

fn edit_note(args: Vec<String>, config: &Config) -> Result<(), JotError> {
    let raw = match args.first() {
        Some(raw) if args.len() == 1 => raw,
        _ => return Err(JotError::Usage("Usage: jot edit <id>".to_string())),
    };
    let id: i64 = raw
        .parse()
        .map_err(|_| JotError::Usage(format!("Invalid note ID: {raw}")))?;

    let db = Database::open(&config.database)?;
    let selected = db.get_by_id(id)?.ok_or(JotError::NotFound(id))?;

    let pending = browser::editor::stage_edit(&selected)?;
    browser::editor::run_editor(&config.editor, pending.path())?;
    let edited = fs::read_to_string(pending.path())?;
    db.update(id, edited.trim_end_matches('\n'))?;
    println!("Updated note {id}.");
    Ok(())
}

fn view_notes(config: &Config) -> Result<(), JotError> {
    let db = Database::open(&config.database)?;
    browser::run(&db, config)
}

fn show_config(config: &Config) {
    println!("Database: {}", config.database.display());
    println!("Editor:   {}", config.editor);
    println!("Override with JOT_DATABASE / VISUAL / EDITOR, or in ~/.jot.toml (JOT_CONFIG).");
}
