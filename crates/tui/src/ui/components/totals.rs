//! Read-only totals bar: subtotal, applied discount, and grand total.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
};

use centavo_types::Budget;
use centavo_util::money_format::format_brl;

use crate::ui::theme::{Theme, helpers};

/// Renders the totals for the current form contents. The discount line
/// only appears while a discount actually applies.
pub fn render_totals(frame: &mut Frame, rect: Rect, budget: &Budget, theme: &Theme) {
    let block = helpers::block(theme, Some(" Totals "), false);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let discount = budget.applied_discount();
    let mut lines = Vec::with_capacity(2);
    if !discount.is_zero() {
        lines.push(
            Line::from(vec![
                Span::styled("Subtotal: ", theme.text_secondary_style()),
                Span::styled(format_brl(budget.subtotal().cents()), theme.text_style()),
                Span::styled("  |  Discount: ", theme.text_secondary_style()),
                Span::styled(format!("-{}", format_brl(discount.cents())), theme.warning_style()),
            ])
            .alignment(Alignment::Right),
        );
    }
    lines.push(
        Line::from(vec![
            Span::styled("Total: ", theme.text_secondary_style()),
            Span::styled(
                format_brl(budget.total().cents()),
                theme.accent_style().add_modifier(ratatui::style::Modifier::BOLD),
            ),
        ])
        .alignment(Alignment::Right),
    );

    let paragraph = ratatui::widgets::Paragraph::new(lines).style(helpers::panel_style(theme));
    frame.render_widget(paragraph, inner);
}
