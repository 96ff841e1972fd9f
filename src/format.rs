use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // IDs, muted text
    pub secondary: (u8, u8, u8), // Headers, emphasis
    pub timestamp: (u8, u8, u8), // Timestamps
    pub highlight: (u8, u8, u8), // Search matches, errors
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        timestamp: (137, 180, 250), // Blue
        highlight: (243, 139, 168), // Pink
    };
}

/// Formatting context passed through both the table output and the
/// browser's render pipeline. Never read from globals at render time.
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env() -> Self {
        let use_color = std::env::var("NO_COLOR").is_err();
        Self::new(use_color)
    }

    pub fn format_id(&self, id: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.primary;
            Paint::rgb(id, r, g, b).to_string()
        } else {
            id.to_string()
        }
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.timestamp;
            Paint::rgb(ts, r, g, b).to_string()
        } else {
            ts.to_string()
        }
    }

    pub fn format_error(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.highlight;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_dim(&self, text: &str) -> String {
        if self.use_color {
            Paint::new(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    /// Paint every occurrence of `query` inside `text`. The match is
    /// case-sensitive, mirroring the search semantics.
    pub fn highlight_match(&self, text: &str, query: Option<&str>) -> String {
        let Some(q) = query else { return text.to_string() };
        if q.is_empty() || !self.use_color {
            return text.to_string();
        }

        let mut out = String::new();
        let mut remaining = text;

        while let Some(pos) = remaining.find(q) {
            let (before, rest) = remaining.split_at(pos);
            let (matched, after) = rest.split_at(q.len());
            out.push_str(before);

            let (r, g, b) = self.palette.highlight;
            out.push_str(&Paint::rgb(matched, r, g, b).to_string());

            remaining = after;
        }
        out.push_str(remaining);
        out
    }
}
