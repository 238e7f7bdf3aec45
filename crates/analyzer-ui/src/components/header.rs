use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative accent placed either side of the application title.
pub const ACCENTS: &str = "✦ ✧ ✦ ✧";

/// Chart page header rendering three lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. User and page position in `[ user | chart 2/5 ]` format.
pub struct Header<'a> {
    /// Chat member the chart belongs to.
    pub user: &'a str,
    /// 1-based page number.
    pub page: usize,
    /// Total number of pages.
    pub pages: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(user: &'a str, page: usize, pages: usize, theme: &'a Theme) -> Self {
        Self {
            user,
            page,
            pages,
            theme,
        }
    }

    /// Render the header as exactly three lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(ACCENTS, self.theme.header_accent),
                Span::styled(" CHAT ANALYZER ", self.theme.header),
                Span::styled(ACCENTS, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.user, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("chart {}/{}", self.page, self.pages),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
