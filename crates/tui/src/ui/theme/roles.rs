//! Role-based color assignments.
//!
//! Widgets never pick raw colors; they ask the theme for a semantic slot
//! (surface, text, border, selection) so palettes stay swappable.

use ratatui::style::{Color, Modifier, Style};

/// Semantic color slots every widget draws from.
#[derive(Debug, Clone, Copy)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

/// A named palette plus the style combinators components use.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub roles: ThemeRoles,
}

impl Theme {
    /// Resolves a saved or `--theme` identifier; unknown names fall back
    /// to the default palette.
    pub fn by_name(name: &str) -> Theme {
        match name {
            "paper" => Theme::paper(),
            _ => Theme::dusk(),
        }
    }

    /// Dark default.
    pub fn dusk() -> Theme {
        Theme {
            name: "dusk",
            roles: ThemeRoles {
                background: Color::Rgb(18, 20, 26),
                surface: Color::Rgb(26, 29, 38),
                surface_muted: Color::Rgb(33, 37, 48),
                text: Color::Rgb(222, 226, 235),
                text_secondary: Color::Rgb(148, 155, 170),
                accent: Color::Rgb(122, 187, 255),
                warning: Color::Rgb(235, 188, 92),
                error: Color::Rgb(235, 111, 111),
                border: Color::Rgb(58, 63, 78),
                border_focused: Color::Rgb(122, 187, 255),
                selection_bg: Color::Rgb(48, 66, 92),
                selection_fg: Color::Rgb(235, 240, 248),
            },
        }
    }

    /// Light alternative.
    pub fn paper() -> Theme {
        Theme {
            name: "paper",
            roles: ThemeRoles {
                background: Color::Rgb(246, 244, 238),
                surface: Color::Rgb(252, 250, 245),
                surface_muted: Color::Rgb(238, 234, 225),
                text: Color::Rgb(42, 44, 50),
                text_secondary: Color::Rgb(112, 116, 126),
                accent: Color::Rgb(32, 98, 176),
                warning: Color::Rgb(158, 114, 18),
                error: Color::Rgb(176, 48, 48),
                border: Color::Rgb(200, 196, 186),
                border_focused: Color::Rgb(32, 98, 176),
                selection_bg: Color::Rgb(206, 222, 240),
                selection_fg: Color::Rgb(24, 28, 36),
            },
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles.border_focused } else { self.roles.border };
        Style::default().fg(color)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.roles.text)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.roles.accent)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.roles.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.roles.error).add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.roles.selection_bg).fg(self.roles.selection_fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dusk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_the_default() {
        assert_eq!(Theme::by_name("paper").name, "paper");
        assert_eq!(Theme::by_name("nonexistent").name, "dusk");
    }
}
