//! Terminal colors, switched off when output is not a terminal.

use std::fmt::Display;
use std::io::IsTerminal;

use owo_colors::{OwoColorize, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Colors stdout unless disabled or stdout is redirected.
    pub fn detect(no_color: bool) -> Self {
        if no_color || !std::io::stdout().is_terminal() {
            return Self::plain();
        }
        Self { enabled: true }
    }

    pub fn paint(self, text: impl Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(self, text: impl Display) -> String {
        self.paint(text, Style::new().bold())
    }

    pub fn index(self, index: usize) -> String {
        self.bold(format!("{index:3}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_leaves_text_alone() {
        let theme = Theme::plain();
        assert_eq!(theme.paint("job", Style::new().magenta()), "job");
        assert_eq!(theme.index(7), "  7");
    }

    #[test]
    fn colored_theme_emits_escape_codes() {
        let painted = Theme { enabled: true }.paint("job", Style::new().magenta());
        assert!(painted.contains("job"));
        assert!(painted.starts_with('\u{1b}'));
    }
}
