//! The main view: header fields, items table, totals, status line.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::warn;

use centavo_types::Effect;

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::components::items_editor::ItemsEditorView;
use crate::ui::components::masked::KeyDisposition;
use crate::ui::components::totals::render_totals;
use crate::ui::theme::{Theme, helpers};

use super::state::FormField;

const HINT_LINE: &str = "Tab next field · Ctrl+A add row · Ctrl+D delete · Ctrl+U duplicate · Ctrl+S save · Ctrl+Y copy total · Ctrl+P theme · Esc quit";

/// Top-level component for the budget form.
#[derive(Debug, Default)]
pub struct BudgetFormComponent {
    items_view: ItemsEditorView,
}

impl BudgetFormComponent {
    fn route_key(&mut self, app: &mut App, key: KeyEvent, effects: &mut Vec<Effect>) -> KeyDisposition {
        match app.form.focused_field() {
            Some(FormField::EventDate) => app.form.event_date.handle_key(key),
            Some(FormField::DiscountAmount) => app.form.discount_amount.handle_key(key),
            Some(FormField::DiscountPercent) => app.form.discount_percent.handle_key(key),
            Some(FormField::Items) => self.items_view.handle_key_event(&mut app.form.items, key, effects),
            None => KeyDisposition::Ignored,
        }
    }

    fn cycle_theme(&self, app: &mut App) {
        app.theme = match app.theme.name {
            "dusk" => Theme::paper(),
            _ => Theme::dusk(),
        };
        if let Err(error) = app.preferences.set_preferred_theme(Some(app.theme.name.to_string())) {
            warn!("Failed to persist theme preference: {error}");
        }
    }

    fn render_title(&self, frame: &mut Frame, rect: Rect, app: &App) {
        let file_label = app
            .budget_file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "unsaved budget".to_string());
        let marker = if app.unsaved { "*" } else { "" };
        let title = Line::from(vec![
            Span::styled("Centavo", app.theme.accent_style().add_modifier(ratatui::style::Modifier::BOLD)),
            Span::styled(format!("  {file_label}{marker}"), app.theme.text_secondary_style()),
        ]);
        frame.render_widget(Paragraph::new(title), rect);
    }

    fn render_header_fields(&self, frame: &mut Frame, rect: Rect, app: &App) {
        let [date_area, amount_area, percent_area] =
            Layout::horizontal([Constraint::Length(16), Constraint::Fill(1), Constraint::Length(14)])
                .spacing(1)
                .areas(rect);

        render_field(
            frame,
            date_area,
            &app.theme,
            " Event date ",
            &app.form.event_date.text(),
            app.form.event_date.caret_col(),
            app.form.f_event_date.get(),
            !app.form.event_date.is_invalid(),
        );
        render_field(
            frame,
            amount_area,
            &app.theme,
            " Discount (R$) ",
            app.form.discount_amount.text(),
            app.form.discount_amount.caret_col(),
            app.form.f_discount_amount.get(),
            true,
        );
        render_field(
            frame,
            percent_area,
            &app.theme,
            " Discount (%) ",
            app.form.discount_percent.text(),
            app.form.discount_percent.caret_col(),
            app.form.f_discount_percent.get(),
            true,
        );
    }

    fn render_status(&self, frame: &mut Frame, rect: Rect, app: &App) {
        let line = match &app.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), app.theme.warning_style())),
            None => Line::from(Span::styled(HINT_LINE, app.theme.text_secondary_style())),
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), rect);
    }
}

impl Component for BudgetFormComponent {
    fn init(&mut self, app: &mut App) -> Result<()> {
        app.form.sync_focus_transitions();
        Ok(())
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        if key.code == KeyCode::Esc {
            return vec![Effect::Quit];
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return vec![Effect::SaveRequested],
                KeyCode::Char('y') => return vec![Effect::CopyTotalRequested],
                KeyCode::Char('p') => {
                    self.cycle_theme(app);
                    return effects;
                }
                _ => {}
            }
        }

        let disposition = self.route_key(app, key, &mut effects);
        match disposition {
            KeyDisposition::Consumed => {
                if matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete) {
                    app.unsaved = true;
                }
            }
            KeyDisposition::Ignored => match key.code {
                KeyCode::Tab | KeyCode::Enter => {
                    app.focus.next();
                }
                KeyCode::BackTab => {
                    app.focus.prev();
                }
                _ => {}
            },
        }
        app.form.sync_focus_transitions();
        effects
    }

    fn handle_paste(&mut self, app: &mut App, pasted: &str) -> Vec<Effect> {
        match app.form.focused_field() {
            Some(FormField::DiscountAmount) => app.form.discount_amount.paste(pasted),
            Some(FormField::EventDate) => {
                for ch in pasted.chars().filter(char::is_ascii_digit) {
                    app.form.event_date.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
                }
            }
            Some(FormField::DiscountPercent) => {
                for ch in pasted.chars().filter(char::is_ascii_digit) {
                    app.form
                        .discount_percent
                        .handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
                }
            }
            Some(FormField::Items) => self.items_view.handle_paste(&mut app.form.items, pasted),
            None => return Vec::new(),
        }
        app.unsaved = true;
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let background = Block::default().style(
            ratatui::style::Style::default()
                .bg(app.theme.roles.background)
                .fg(app.theme.roles.text),
        );
        frame.render_widget(background, rect);

        let [title_area, header_area, items_area, totals_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(rect);

        self.render_title(frame, title_area, app);
        self.render_header_fields(frame, header_area, app);
        let theme = app.theme.clone();
        self.items_view.render(frame, items_area, &mut app.form.items, &theme);
        let budget = app.form.current_budget();
        render_totals(frame, totals_area, &budget, &theme);
        self.render_status(frame, status_area, app);
    }
}

/// One bordered single-line field with its caret.
#[allow(clippy::too_many_arguments)]
fn render_field(
    frame: &mut Frame,
    rect: Rect,
    theme: &Theme,
    title: &str,
    text: &str,
    caret_col: u16,
    focused: bool,
    valid: bool,
) {
    let block = helpers::block(theme, Some(title), focused);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    let paragraph = Paragraph::new(text.to_string()).style(helpers::input_style(theme, valid, focused));
    frame.render_widget(paragraph, inner);
    if focused && inner.width > 0 {
        let x = inner.x + caret_col.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}
