use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark theme (default)
    Latte, // Light theme
}

impl ThemeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mocha => "mocha",
            Self::Latte => "latte",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Accents
    pub accent_primary: Color,   // Focus, selection
    pub accent_secondary: Color, // Headings, links
    pub accent_error: Color,     // Validation failures
    pub accent_warning: Color,
    pub accent_success: Color, // Accepted submission
    pub accent_muted: Color,   // Key hints

    // Text hierarchy
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color, // Labels, placeholders

    // UI structure
    pub border_primary: Color,
    pub border_secondary: Color,
    pub bg_base: Color,
    pub bg_surface: Color, // Highlighted option background
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            accent_secondary: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_warning: Color::Rgb(0xf9, 0xe2, 0xaf),   // yellow
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),     // peach

            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde), // subtext1
            text_tertiary: Color::Rgb(0xa6, 0xad, 0xc8),  // subtext0

            border_primary: Color::Rgb(0x7f, 0x84, 0x9c),   // overlay1
            border_secondary: Color::Rgb(0x6c, 0x70, 0x86), // overlay0
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),          // base
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),       // surface0
        }
    }

    fn latte() -> Self {
        Self {
            accent_primary: Color::Rgb(0x72, 0x87, 0xfd),
            accent_secondary: Color::Rgb(0x1e, 0x66, 0xf5),
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),
            accent_warning: Color::Rgb(0xdf, 0x8e, 0x1d),
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b),
            accent_muted: Color::Rgb(0xfe, 0x64, 0x0b),

            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77),
            text_tertiary: Color::Rgb(0x6c, 0x6f, 0x85),

            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1),
            border_secondary: Color::Rgb(0x9c, 0xa0, 0xb0),
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.accent_error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.accent_success)
    }

    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.text_tertiary)
            .add_modifier(Modifier::ITALIC)
    }

    /// Border for an input; invalid wins over focus
    pub fn field_border(&self, focused: bool, invalid: bool) -> Style {
        if invalid {
            Style::default().fg(self.accent_error)
        } else if focused {
            Style::default().fg(self.accent_primary)
        } else {
            Style::default().fg(self.border_secondary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_differ() {
        let mocha = Theme::new(ThemeVariant::Mocha);
        let latte = Theme::new(ThemeVariant::Latte);
        assert_ne!(mocha.bg_base, latte.bg_base);
    }

    #[test]
    fn test_invalid_border_wins_over_focus() {
        let theme = Theme::default();
        assert_eq!(theme.field_border(true, true).fg, Some(theme.accent_error));
        assert_eq!(theme.field_border(true, false).fg, Some(theme.accent_primary));
    }
}
