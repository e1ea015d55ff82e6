//! Shared style builders so panels, inputs, and tables look alike.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::Theme;

/// Standard bordered block with themed surfaces.
pub fn block<'a>(theme: &'a Theme, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(title) = title {
        block = block.title(Span::styled(
            title,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style(theme: &Theme) -> Style {
    Style::default().bg(theme.roles.surface).fg(theme.roles.text)
}

/// Style for an editable field, reflecting focus and validity.
pub fn input_style(theme: &Theme, valid: bool, focused: bool) -> Style {
    let mut style = Style::default().bg(theme.roles.surface_muted);
    style = if valid {
        style.fg(theme.roles.text)
    } else {
        style.fg(theme.roles.error)
    };
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Bold secondary text over a muted band for table headers.
pub fn table_header_style(theme: &Theme) -> Style {
    Style::default()
        .bg(theme.roles.surface_muted)
        .fg(theme.roles.text_secondary)
        .add_modifier(Modifier::BOLD)
}

/// Zebra striping: slightly darkened surface tones on alternating rows.
pub fn table_row_style(theme: &Theme, row_index: usize) -> Style {
    let base = if row_index % 2 == 0 {
        theme.roles.surface
    } else {
        theme.roles.surface_muted
    };
    Style::default().bg(darken_rgb(base, 0.85)).fg(theme.roles.text)
}

pub fn table_selected_style(theme: &Theme) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

/// Darkens an RGB color by a multiplicative factor; non-RGB colors pass
/// through unchanged.
fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            Color::Rgb(
                (r as f32 * f).round() as u8,
                (g as f32 * f).round() as u8,
                (b as f32 * f).round() as u8,
            )
        }
        other => other,
    }
}
