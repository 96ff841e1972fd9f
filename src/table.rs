//! Text layout helpers for the one-shot commands and the browser rows.
//! Width math is ANSI-aware so colored cells line up.

const FALLBACK_WIDTH: usize = 80;

/// Terminal width in columns, with a fixed fallback when stdout is not a
/// terminal (pipes, tests).
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Render an aligned text table with a `=` underline below the header.
/// Column widths come from the widest cell, ignoring ANSI color codes.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    // 3 columns per " | " separator between fields.
    let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);

    let mut out = String::new();
    out.push_str(&format_row(headers, &widths));
    out.push('\n');
    out.push_str(&"=".repeat(total));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            // No padding after the last column, so rows carry no
            // trailing whitespace.
            if i == last { cell.clone() } else { pad_field(cell, *width) }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
fn pad_field(display: &str, target: usize) -> String {
    let mut out = display.to_string();
    out.push_str(&" ".repeat(target.saturating_sub(display_len(display))));
    out
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

/// Visible length of a string, skipping ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_on_widest_cell() {
        let headers = vec!["ID".to_string(), "Note".to_string()];
        let rows = vec![
            vec!["1".to_string(), "short".to_string()],
            vec!["12".to_string(), "a longer note".to_string()],
        ];
        let table = render_table(&headers, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID | Note");
        assert!(lines[1].chars().all(|c| c == '='));
        assert_eq!(lines[2], "1  | short");
        assert_eq!(lines[3], "12 | a longer note");
    }

    #[test]
    fn ansi_codes_do_not_skew_widths() {
        let colored = "\x1b[38;2;1;2;3mhi\x1b[0m";
        assert_eq!(display_len(colored), 2);

        let headers = vec!["A".to_string(), "B".to_string()];
        let rows = vec![vec![colored.to_string(), "x".to_string()]];
        let table = render_table(&headers, &rows);
        let last = table.lines().last().unwrap();
        assert!(last.ends_with("| x"));
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
        assert_eq!(truncate_with_ellipsis("héllo wörld", 6), "héllo…");
        assert_eq!(truncate_with_ellipsis("h", 1), "h");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
    }
}
