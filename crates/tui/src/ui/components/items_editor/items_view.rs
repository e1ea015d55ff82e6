//! Table rendering and key routing for the line-item rows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
};

use centavo_types::Effect;
use centavo_util::money_format::format_cents;

use crate::ui::components::masked::KeyDisposition;
use crate::ui::theme::{Theme, helpers};

use super::state::{ItemColumn, ItemsEditorState, RowId};

/// Longest digit run accepted by the count cells (quantity, hours, days).
const MAX_COUNT_DIGITS: usize = 4;

const COLUMN_SPACING: u16 = 1;

fn column_constraints() -> [Constraint; 6] {
    [
        Constraint::Fill(1),    // role
        Constraint::Length(5),  // quantity
        Constraint::Length(5),  // hours
        Constraint::Length(14), // daily rate
        Constraint::Length(5),  // days
        Constraint::Length(14), // line total
    ]
}

fn column_areas(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::horizontal(column_constraints()).spacing(COLUMN_SPACING).split(inner)
}

fn column_index(column: ItemColumn) -> usize {
    match column {
        ItemColumn::Role => 0,
        ItemColumn::Quantity => 1,
        ItemColumn::Hours => 2,
        ItemColumn::DailyRate => 3,
        ItemColumn::Days => 4,
    }
}

/// Renders the items table and routes keys into the selected cell.
#[derive(Debug, Default)]
pub struct ItemsEditorView {
    last_table_area: Rect,
}

impl ItemsEditorView {
    /// Routes one key event. Row management chords come first, then
    /// navigation, then per-cell editing.
    pub fn handle_key_event(
        &mut self,
        state: &mut ItemsEditorState,
        key: KeyEvent,
        effects: &mut Vec<Effect>,
    ) -> KeyDisposition {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    state.add_row();
                    effects.push(Effect::Status("Row added".into()));
                    KeyDisposition::Consumed
                }
                KeyCode::Char('d') => {
                    if state.remove_selected_row().is_some() {
                        effects.push(Effect::Status("Row removed".into()));
                    }
                    KeyDisposition::Consumed
                }
                KeyCode::Char('u') => {
                    if state.duplicate_selected_row().is_some() {
                        effects.push(Effect::Status("Row duplicated".into()));
                    }
                    KeyDisposition::Consumed
                }
                _ => KeyDisposition::Ignored,
            };
        }

        match key.code {
            KeyCode::Up => {
                state.select_previous_row();
                KeyDisposition::Consumed
            }
            KeyCode::Down => {
                state.select_next_row();
                KeyDisposition::Consumed
            }
            KeyCode::Home => {
                state.select_first_row();
                KeyDisposition::Consumed
            }
            KeyCode::End => {
                state.select_last_row();
                KeyDisposition::Consumed
            }
            KeyCode::Tab => match state.active_column().next() {
                Some(column) => {
                    state.set_active_column(column);
                    KeyDisposition::Consumed
                }
                // Past the last column: hand focus back to the form ring.
                None => KeyDisposition::Ignored,
            },
            KeyCode::BackTab => match state.active_column().prev() {
                Some(column) => {
                    state.set_active_column(column);
                    KeyDisposition::Consumed
                }
                None => KeyDisposition::Ignored,
            },
            _ => self.route_to_cell(state, key),
        }
    }

    /// Pasted text goes to the active cell, each field applying its own
    /// acceptance rules.
    pub fn handle_paste(&mut self, state: &mut ItemsEditorState, pasted: &str) {
        let Some(id) = state.selected_row_id() else {
            return;
        };
        match state.active_column() {
            ItemColumn::DailyRate => {
                if let Some(mask) = state.mask_mut(id) {
                    mask.paste(pasted);
                }
            }
            ItemColumn::Role => {
                if let Some(fields) = state.fields_mut(id) {
                    for ch in pasted.chars().filter(|ch| !ch.is_control()) {
                        fields.role.insert_char(ch);
                    }
                }
            }
            column => {
                if let Some(fields) = state.fields_mut(id) {
                    let cell = count_cell(fields, column);
                    for ch in pasted.chars().filter(char::is_ascii_digit) {
                        if cell.text().len() >= MAX_COUNT_DIGITS {
                            break;
                        }
                        cell.insert_char(ch);
                    }
                }
            }
        }
    }

    fn route_to_cell(&mut self, state: &mut ItemsEditorState, key: KeyEvent) -> KeyDisposition {
        let Some(id) = state.selected_row_id() else {
            return KeyDisposition::Ignored;
        };
        match state.active_column() {
            ItemColumn::DailyRate => state
                .mask_mut(id)
                .map(|mask| mask.handle_key(key))
                .unwrap_or(KeyDisposition::Ignored),
            ItemColumn::Role => Self::edit_role(state, id, key),
            column => Self::edit_count(state, id, column, key),
        }
    }

    fn edit_role(state: &mut ItemsEditorState, id: RowId, key: KeyEvent) -> KeyDisposition {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return KeyDisposition::Ignored;
        }
        let Some(fields) = state.fields_mut(id) else {
            return KeyDisposition::Ignored;
        };
        match key.code {
            KeyCode::Char(ch) if !ch.is_control() => {
                fields.role.insert_char(ch);
                KeyDisposition::Consumed
            }
            KeyCode::Backspace => {
                fields.role.backspace();
                KeyDisposition::Consumed
            }
            KeyCode::Delete => {
                fields.role.delete();
                KeyDisposition::Consumed
            }
            KeyCode::Left => {
                fields.role.move_left();
                KeyDisposition::Consumed
            }
            KeyCode::Right => {
                fields.role.move_right();
                KeyDisposition::Consumed
            }
            _ => KeyDisposition::Ignored,
        }
    }

    fn edit_count(state: &mut ItemsEditorState, id: RowId, column: ItemColumn, key: KeyEvent) -> KeyDisposition {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return KeyDisposition::Ignored;
        }
        let Some(fields) = state.fields_mut(id) else {
            return KeyDisposition::Ignored;
        };
        let cell = count_cell(fields, column);
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if cell.text().len() < MAX_COUNT_DIGITS {
                    cell.insert_char(ch);
                }
                KeyDisposition::Consumed
            }
            // Count cells take digits only.
            KeyCode::Char(_) => KeyDisposition::Consumed,
            KeyCode::Backspace => {
                cell.backspace();
                KeyDisposition::Consumed
            }
            _ => KeyDisposition::Ignored,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, rect: Rect, state: &mut ItemsEditorState, theme: &Theme) {
        let focused = state.is_focused();
        let block = helpers::block(theme, Some(" Items "), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.last_table_area = inner;

        if state.is_empty() {
            let hint = Paragraph::new("No items yet. Ctrl+A adds the first row.")
                .style(theme.text_secondary_style())
                .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Role"),
            Cell::from("Qty"),
            Cell::from("Hours"),
            Cell::from(Line::from("Daily rate").alignment(Alignment::Right)),
            Cell::from("Days"),
            Cell::from(Line::from("Line total").alignment(Alignment::Right)),
        ])
        .style(helpers::table_header_style(theme));

        let rows: Vec<Row<'static>> = state
            .row_ids()
            .enumerate()
            .map(|(index, id)| build_row(state, theme, index, id))
            .collect();

        let table = Table::new(rows, column_constraints())
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(helpers::table_selected_style(theme));
        frame.render_stateful_widget(table, inner, state.table_state_mut());

        if focused {
            self.place_caret(frame, state);
        }
    }

    /// Puts the terminal cursor inside the active cell of the selected
    /// row, when that row is scrolled into view.
    fn place_caret(&self, frame: &mut Frame, state: &ItemsEditorState) {
        let Some(selected) = state.selected_index() else {
            return;
        };
        let offset = state.table_state().offset();
        if selected < offset {
            return;
        }
        // One line for the header, then the visible rows.
        let visual_row = (selected - offset) as u16 + 1;
        if visual_row >= self.last_table_area.height {
            return;
        }
        let y = self.last_table_area.y + visual_row;

        let areas = column_areas(self.last_table_area);
        let cell_area = areas[column_index(state.active_column())];
        let Some(id) = state.selected_row_id() else {
            return;
        };
        let caret_col = match state.active_column() {
            ItemColumn::Role => state.fields(id).map(|f| f.role.caret_display_col()).unwrap_or(0),
            ItemColumn::Quantity => state.fields(id).map(|f| f.quantity.caret_col()).unwrap_or(0),
            ItemColumn::Hours => state.fields(id).map(|f| f.hours_per_day.caret_col()).unwrap_or(0),
            ItemColumn::DailyRate => state.mask(id).map(|mask| mask.caret_col()).unwrap_or(0),
            ItemColumn::Days => state.fields(id).map(|f| f.days.caret_col()).unwrap_or(0),
        };
        let x = cell_area.x + caret_col.min(cell_area.width.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

fn build_row(state: &ItemsEditorState, theme: &Theme, index: usize, id: RowId) -> Row<'static> {
    let fields = state.fields(id);
    let role = fields.map(|f| f.role.text().to_string()).unwrap_or_default();
    let quantity = fields.map(|f| f.quantity.text().to_string()).unwrap_or_default();
    let hours = fields.map(|f| f.hours_per_day.text().to_string()).unwrap_or_default();
    let days = fields.map(|f| f.days.text().to_string()).unwrap_or_default();
    let rate = state.mask(id).map(|mask| mask.text().to_string()).unwrap_or_default();
    let total = format_cents(state.line_total(id).cents());

    Row::new(vec![
        Cell::from(role),
        Cell::from(quantity),
        Cell::from(hours),
        Cell::from(Line::from(rate).alignment(Alignment::Right)),
        Cell::from(days),
        Cell::from(Line::from(total).alignment(Alignment::Right)),
    ])
    .style(helpers::table_row_style(theme, index))
}

fn count_cell(fields: &mut super::state::RowFields, column: ItemColumn) -> &mut crate::ui::components::common::TextInputState {
    match column {
        ItemColumn::Quantity => &mut fields.quantity,
        ItemColumn::Hours => &mut fields.hours_per_day,
        ItemColumn::Days => &mut fields.days,
        // Routing guarantees only count columns land here.
        ItemColumn::Role | ItemColumn::DailyRate => &mut fields.quantity,
    }
}
