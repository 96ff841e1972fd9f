//! Frame construction for the interactive browser. Everything here is a
//! pure function of the browser state; no terminal calls, no global reads.

use crate::format::FormatContext;
use crate::markdown;
use crate::note;
use crate::table;

use super::{Browser, Mode};

const HELP_LIST: &str = "n: New • /: Search • e: Edit • x: Delete • j/k: Nav • q: Quit";
const HELP_COMPOSE: &str = "Enter: New line • Ctrl-S: Save • Esc: Cancel";
const HELP_SEARCH: &str = "Type to filter • Enter/Esc: Done";
const NO_NOTES: &str = "No notes found.";
const CURSOR_GLYPH: char = '█';

/// Rows always keep at least this much room for note text, however
/// narrow the terminal claims to be.
const MIN_ROW_BUDGET: usize = 20;

pub fn render(browser: &Browser, ctx: &FormatContext, width: usize) -> String {
    if let Some(err) = &browser.last_error {
        return format!("{}\n", ctx.format_error(&format!("Error: {err}")));
    }
    if browser.quitting {
        return "Bye!\n".to_string();
    }

    let mut frame = String::new();
    match &browser.mode {
        Mode::List => {
            let header = if browser.filter.is_empty() {
                "--- Your Notes ---".to_string()
            } else {
                format!("--- Filtering: {} ---", browser.filter)
            };
            frame.push_str(&ctx.format_header(&header));
            frame.push('\n');
            push_note_rows(&mut frame, browser, ctx, width, None);
            push_preview(&mut frame, browser, ctx, width);
        }
        Mode::Search { query } => {
            frame.push_str(&ctx.format_header("--- Searching ---"));
            frame.push('\n');
            frame.push_str("> ");
            frame.push_str(query);
            frame.push(CURSOR_GLYPH);
            frame.push('\n');
            frame.push('\n');
            push_note_rows(&mut frame, browser, ctx, width, Some(query));
            push_preview(&mut frame, browser, ctx, width);
        }
        Mode::Compose { buffer } => {
            frame.push_str(&ctx.format_header("--- New Entry ---"));
            frame.push('\n');
            frame.push_str(buffer);
            frame.push(CURSOR_GLYPH);
            frame.push('\n');
        }
    }

    frame.push('\n');
    frame.push_str(&ctx.format_dim(help_line(&browser.mode)));
    frame.push('\n');
    frame
}

fn help_line(mode: &Mode) -> &'static str {
    match mode {
        Mode::List => HELP_LIST,
        Mode::Compose { .. } => HELP_COMPOSE,
        Mode::Search { .. } => HELP_SEARCH,
    }
}

/// One row per note, newest first, the selected one marked with "> ".
/// Bodies are flattened to a single line and truncated to the width.
fn push_note_rows(
    frame: &mut String,
    browser: &Browser,
    ctx: &FormatContext,
    width: usize,
    highlight: Option<&str>,
) {
    if browser.notes.is_empty() {
        frame.push_str(NO_NOTES);
        frame.push('\n');
        return;
    }
    let budget = width.saturating_sub(4).max(MIN_ROW_BUDGET);
    for (i, item) in browser.notes.iter().enumerate() {
        let marker = if i == browser.cursor { "> " } else { "  " };
        let row = table::truncate_with_ellipsis(&note::flatten(&item.content), budget);
        let row = ctx.highlight_match(&row, highlight);
        frame.push_str(marker);
        frame.push_str(&row);
        frame.push('\n');
    }
}

/// Markdown preview of the selected note, framed by dim rules. Literal
/// `\n` markers are expanded to real line breaks before rendering.
fn push_preview(frame: &mut String, browser: &Browser, ctx: &FormatContext, width: usize) {
    let Some(selected) = browser.notes.get(browser.cursor) else {
        return;
    };
    let rule = "─".repeat(width.clamp(MIN_ROW_BUDGET, 60));
    frame.push('\n');
    frame.push_str(&ctx.format_dim(&rule));
    frame.push('\n');
    let source = note::convert_newline_markers(&selected.content);
    let body = markdown::render_markdown(&source, ctx);
    frame.push_str(&body);
    if !body.ends_with('\n') {
        frame.push('\n');
    }
    frame.push_str(&ctx.format_dim(&rule));
    frame.push('\n');
}

#[cfg(test)]
mod tests {
    use super::super::tests::FakeStore;
    use super::super::{Browser, BrowserEvent};
    use super::*;
    use crate::term::Key;

    const WIDTH: usize = 80;

    fn plain() -> FormatContext {
        FormatContext::new(false)
    }

    fn press(browser: &mut Browser, key: Key) {
        browser.handle(BrowserEvent::Key(key));
    }

    fn type_str(browser: &mut Browser, text: &str) {
        for ch in text.chars() {
            press(browser, Key::Char(ch));
        }
    }

    #[test]
    fn list_frame_marks_the_selected_row() {
        let store = FakeStore::with_notes(&["alpha", "beta"]);
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("--- Your Notes ---"));
        assert!(frame.contains("> beta"));
        assert!(frame.contains("  alpha"));
        assert!(frame.contains("q: Quit"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let store = FakeStore::new();
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains(NO_NOTES));
        assert!(!frame.contains("> "));
    }

    #[test]
    fn list_frame_previews_the_selected_note() {
        let store = FakeStore::with_notes(&["# Heading\nbody line"]);
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("Heading\n"));
        assert!(frame.contains("body line"));
        assert!(frame.contains("─"));
    }

    #[test]
    fn rows_flatten_newlines() {
        let store = FakeStore::with_notes(&["top\nbottom"]);
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("> top bottom"));
    }

    #[test]
    fn preview_expands_literal_newline_markers() {
        let store = FakeStore::with_notes(&["alpha\\nbeta"]);
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), WIDTH);
        // The row collapses the marker to a space, the preview turns it
        // into a real line break; the raw backslash never shows.
        assert!(frame.contains("> alpha beta"));
        assert!(frame.contains("alpha\nbeta"));
        assert!(!frame.contains("alpha\\nbeta"));
    }

    #[test]
    fn long_rows_truncate_to_the_width() {
        let store = FakeStore::with_notes(&[&"x".repeat(200)]);
        let browser = Browser::new(&store);
        let frame = render(&browser, &plain(), 30);
        let row = frame
            .lines()
            .find(|line| line.starts_with("> "))
            .unwrap()
            .to_string();
        assert!(row.ends_with('…'));
        assert_eq!(row.chars().count(), 2 + 26);
    }

    #[test]
    fn compose_frame_shows_buffer_and_cursor() {
        let store = FakeStore::new();
        let mut browser = Browser::new(&store);
        press(&mut browser, Key::Char('n'));
        type_str(&mut browser, "draft");
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("--- New Entry ---"));
        assert!(frame.contains("draft█"));
        assert!(frame.contains("Ctrl-S: Save"));
        assert!(!frame.contains("─"));
    }

    #[test]
    fn search_frame_shows_query_and_matches() {
        let store = FakeStore::with_notes(&["Buy milk", "Call Bob"]);
        let mut browser = Browser::new(&store);
        press(&mut browser, Key::Char('/'));
        type_str(&mut browser, "Bob");
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("--- Searching ---"));
        assert!(frame.contains("> Bob█"));
        assert!(frame.contains("Call Bob"));
        assert!(!frame.contains("Buy milk"));
        assert!(frame.contains("Enter/Esc: Done"));
    }

    #[test]
    fn confirmed_search_shows_the_filter_header() {
        let store = FakeStore::with_notes(&["Buy milk", "Call Bob"]);
        let mut browser = Browser::new(&store);
        press(&mut browser, Key::Char('/'));
        type_str(&mut browser, "Bob");
        press(&mut browser, Key::Enter);
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.contains("--- Filtering: Bob ---"));
        assert!(frame.contains("Call Bob"));
    }

    #[test]
    fn error_frame_replaces_everything_else() {
        let store = FakeStore::with_notes(&["alpha"]);
        let mut browser = Browser::new(&store);
        store.fail_next_ops(true);
        press(&mut browser, Key::Char('x'));
        let frame = render(&browser, &plain(), WIDTH);
        assert!(frame.starts_with("Error:"));
        assert!(frame.contains("storage error"));
        assert!(!frame.contains("--- Your Notes ---"));
        assert!(!frame.contains("alpha"));
    }

    #[test]
    fn farewell_frame_after_quit() {
        let store = FakeStore::with_notes(&["alpha", "beta"]);
        let mut browser = Browser::new(&store);
        press(&mut browser, Key::Char('q'));
        // Exactly one plain line: this frame is printed verbatim on the
        // main screen after the terminal session is torn down.
        assert_eq!(render(&browser, &plain(), WIDTH), "Bye!\n");
    }
}
