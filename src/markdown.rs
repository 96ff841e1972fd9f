//! Terminal rendering of markdown note bodies, used by the browser's
//! preview pane.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use yansi::Paint;

use crate::format::FormatContext;

#[derive(Clone, Copy)]
enum Style {
    Heading,
    Bullet,
    Rule,
    Body,
}

pub fn render_markdown(input: &str, ctx: &FormatContext) -> String {
    let mut rendered = String::new();
    let mut list_depth: usize = 0;

    for event in Parser::new(input) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                rendered.push('\n');
                let mark = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    HeadingLevel::H4 => "#### ",
                    HeadingLevel::H5 => "##### ",
                    _ => "###### ",
                };
                push_styled(&mut rendered, mark, Style::Heading, ctx);
            }
            Event::End(TagEnd::Heading(_)) => rendered.push('\n'),
            Event::Start(Tag::List(_)) => {
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                if list_depth > 0 {
                    list_depth -= 1;
                }
                rendered.push('\n');
            }
            Event::Start(Tag::Item) => {
                if !rendered.is_empty() && !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
                rendered.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                push_styled(&mut rendered, "- ", Style::Bullet, ctx);
            }
            Event::End(TagEnd::Paragraph) => rendered.push('\n'),
            Event::Text(t) | Event::Code(t) => push_styled(&mut rendered, &t, Style::Body, ctx),
            Event::SoftBreak | Event::HardBreak => rendered.push('\n'),
            Event::Rule => {
                push_styled(&mut rendered, "\n---\n", Style::Rule, ctx);
            }
            Event::Html(t) => rendered.push_str(&t),
            _ => {}
        }
    }

    rendered.trim().to_string()
}

fn push_styled(buf: &mut String, text: &str, style: Style, ctx: &FormatContext) {
    if ctx.use_color {
        let painted = match style {
            Style::Heading => {
                let (r, g, b) = ctx.palette.secondary;
                Paint::rgb(text, r, g, b).bold()
            }
            Style::Bullet => {
                let (r, g, b) = ctx.palette.timestamp;
                Paint::rgb(text, r, g, b).bold()
            }
            Style::Rule => Paint::new(text).dim(),
            Style::Body => Paint::new(text),
        };
        buf.push_str(&painted.to_string());
    } else {
        buf.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> FormatContext {
        FormatContext::new(false)
    }

    #[test]
    fn headings_keep_their_marks() {
        let out = render_markdown("# Title\n\nbody text", &plain());
        assert!(out.contains("# Title"));
        assert!(out.contains("body text"));
    }

    #[test]
    fn list_items_become_bullets() {
        let out = render_markdown("- one\n- two", &plain());
        assert!(out.contains("- one"));
        assert!(out.contains("- two"));
    }

    #[test]
    fn nested_lists_indent() {
        let out = render_markdown("- outer\n  - inner", &plain());
        assert!(out.contains("- outer"));
        assert!(out.contains("  - inner"));
    }

    #[test]
    fn inline_code_keeps_its_text() {
        let out = render_markdown("run `jot list` now", &plain());
        assert!(out.contains("jot list"));
    }

    #[test]
    fn color_mode_emits_escapes_for_headings() {
        let ctx = FormatContext::new(true);
        let out = render_markdown("# Title", &ctx);
        assert!(out.contains('\x1b'));
    }
}
