//! State for the dynamic line-item rows, including the money-mask
//! registry.
//!
//! Rows are keyed by a [`RowId`] handle minted once at insertion and never
//! reused. The daily-rate mask for a row lives in a separate registry
//! keyed by the same handle: binding happens in exactly one place
//! (`add_row`), re-binding a live row is a no-op, and removing a row
//! releases its entry. Duplicating a row copies field values but can never
//! carry a binding along, because the copy gets a fresh handle.

use indexmap::IndexMap;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use centavo_types::{LineItem, Money};
use centavo_util::money_format::parse_count;

use crate::ui::components::common::TextInputState;
use crate::ui::components::masked::MoneyInputState;

/// Stable handle for one live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

/// Which column of the selected row receives keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemColumn {
    #[default]
    Role,
    Quantity,
    Hours,
    DailyRate,
    Days,
}

impl ItemColumn {
    pub fn next(self) -> Option<ItemColumn> {
        match self {
            ItemColumn::Role => Some(ItemColumn::Quantity),
            ItemColumn::Quantity => Some(ItemColumn::Hours),
            ItemColumn::Hours => Some(ItemColumn::DailyRate),
            ItemColumn::DailyRate => Some(ItemColumn::Days),
            ItemColumn::Days => None,
        }
    }

    pub fn prev(self) -> Option<ItemColumn> {
        match self {
            ItemColumn::Role => None,
            ItemColumn::Quantity => Some(ItemColumn::Role),
            ItemColumn::Hours => Some(ItemColumn::Quantity),
            ItemColumn::DailyRate => Some(ItemColumn::Hours),
            ItemColumn::Days => Some(ItemColumn::DailyRate),
        }
    }
}

/// Free-text fields of one row. The daily-rate mask deliberately lives in
/// the registry instead, so copying these fields copies values only.
#[derive(Debug, Clone, Default)]
pub struct RowFields {
    pub role: TextInputState,
    pub quantity: TextInputState,
    pub hours_per_day: TextInputState,
    pub days: TextInputState,
}

/// State container for the items table.
#[derive(Debug, Default)]
pub struct ItemsEditorState {
    rows: IndexMap<RowId, RowFields>,
    /// Money-mask registry: exactly one entry per live row.
    masks: IndexMap<RowId, MoneyInputState>,
    next_row_id: u64,
    table_state: TableState,
    active_column: ItemColumn,
    pub f_table: FocusFlag,
    container: FocusFlag,
}

impl ItemsEditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.f_table.get()
    }

    pub fn active_column(&self) -> ItemColumn {
        self.active_column
    }

    pub fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }

    pub fn row_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.keys().copied()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected().filter(|index| *index < self.rows.len())
    }

    pub fn selected_row_id(&self) -> Option<RowId> {
        self.selected_index()
            .and_then(|index| self.rows.get_index(index).map(|(id, _)| *id))
    }

    pub fn fields(&self, id: RowId) -> Option<&RowFields> {
        self.rows.get(&id)
    }

    pub fn fields_mut(&mut self, id: RowId) -> Option<&mut RowFields> {
        self.rows.get_mut(&id)
    }

    pub fn mask(&self, id: RowId) -> Option<&MoneyInputState> {
        self.masks.get(&id)
    }

    pub fn mask_mut(&mut self, id: RowId) -> Option<&mut MoneyInputState> {
        self.masks.get_mut(&id)
    }

    pub fn is_bound(&self, id: RowId) -> bool {
        self.masks.contains_key(&id)
    }

    /// Appends an empty row, binds its mask, and selects it. This is the
    /// only place a row comes into existence, so the mask binder runs
    /// exactly once per real insertion.
    pub fn add_row(&mut self) -> RowId {
        let id = self.mint_row_id();
        self.rows.insert(id, RowFields::default());
        self.bind(id);
        self.blur_rate_mask();
        self.table_state.select(Some(self.rows.len() - 1));
        self.active_column = ItemColumn::Role;
        id
    }

    /// Appends a copy of the selected row's values under a fresh handle.
    /// The new row goes through the same binder as any other insertion;
    /// the source row's binding is not inherited.
    pub fn duplicate_selected_row(&mut self) -> Option<RowId> {
        let source_id = self.selected_row_id()?;
        let fields = self.rows.get(&source_id)?.clone();
        let rate = self.masks.get(&source_id).map(MoneyInputState::amount).unwrap_or(Money::ZERO);

        let id = self.mint_row_id();
        self.rows.insert(id, fields);
        self.bind(id);
        if let Some(mask) = self.masks.get_mut(&id)
            && !rate.is_zero()
        {
            mask.set_amount(rate);
        }
        self.blur_rate_mask();
        self.table_state.select(Some(self.rows.len() - 1));
        self.active_column = ItemColumn::Role;
        Some(id)
    }

    /// Removes the selected row and releases its mask registration.
    pub fn remove_selected_row(&mut self) -> Option<RowId> {
        let id = self.selected_row_id()?;
        let index = self.rows.get_index_of(&id)?;
        self.rows.shift_remove(&id);
        self.masks.shift_remove(&id);
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index.min(self.rows.len() - 1)));
        }
        self.focus_rate_mask();
        Some(id)
    }

    pub fn select_previous_row(&mut self) {
        self.move_selection(|index, _| index.saturating_sub(1));
    }

    pub fn select_next_row(&mut self) {
        self.move_selection(|index, len| (index + 1).min(len - 1));
    }

    pub fn select_first_row(&mut self) {
        self.move_selection(|_, _| 0);
    }

    pub fn select_last_row(&mut self) {
        self.move_selection(|_, len| len - 1);
    }

    /// Moves the active column, firing blur/focus on the rate mask when
    /// the caret crosses into or out of it.
    pub fn set_active_column(&mut self, column: ItemColumn) {
        if column == self.active_column {
            return;
        }
        self.blur_rate_mask();
        self.active_column = column;
        self.focus_rate_mask();
    }

    /// Blurs whatever cell is active; called when the whole editor loses
    /// focus so half-typed rates snap to canonical form.
    pub fn on_editor_blur(&mut self) {
        self.blur_rate_mask();
    }

    pub fn on_editor_focus(&mut self) {
        if self.selected_index().is_none() && !self.rows.is_empty() {
            self.table_state.select(Some(0));
        }
        self.focus_rate_mask();
    }

    /// Line total for one row, read live from the field states.
    pub fn line_total(&self, id: RowId) -> Money {
        let Some(fields) = self.rows.get(&id) else {
            return Money::ZERO;
        };
        let rate = self.masks.get(&id).map(MoneyInputState::amount).unwrap_or(Money::ZERO);
        rate.scale(parse_count(fields.quantity.text())).scale(parse_count(fields.days.text()))
    }

    pub fn subtotal(&self) -> Money {
        self.rows
            .keys()
            .fold(Money::ZERO, |acc, id| acc.saturating_add(self.line_total(*id)))
    }

    /// Snapshot of the rows as value objects.
    pub fn items(&self) -> Vec<LineItem> {
        self.rows
            .iter()
            .map(|(id, fields)| LineItem {
                role: fields.role.text().to_string(),
                quantity: parse_count(fields.quantity.text()),
                hours_per_day: parse_count(fields.hours_per_day.text()),
                daily_rate: self.masks.get(id).map(MoneyInputState::amount).unwrap_or(Money::ZERO),
                days: parse_count(fields.days.text()),
            })
            .collect()
    }

    /// Rebuilds the table from value objects (loading a budget file).
    pub fn set_items(&mut self, items: &[LineItem]) {
        self.rows.clear();
        self.masks.clear();
        for item in items {
            let id = self.mint_row_id();
            let mut fields = RowFields::default();
            fields.role.set_text(item.role.clone());
            fields.quantity.set_text(item.quantity.to_string());
            fields.hours_per_day.set_text(item.hours_per_day.to_string());
            fields.days.set_text(item.days.to_string());
            self.rows.insert(id, fields);
            self.bind(id);
            if let Some(mask) = self.masks.get_mut(&id)
                && !item.daily_rate.is_zero()
            {
                mask.set_amount(item.daily_rate);
            }
        }
        self.table_state.select(if self.rows.is_empty() { None } else { Some(0) });
        self.active_column = ItemColumn::Role;
    }

    /// Registers a mask for a live row. Idempotent: a row that is already
    /// bound keeps its state untouched.
    fn bind(&mut self, id: RowId) -> bool {
        if !self.rows.contains_key(&id) || self.masks.contains_key(&id) {
            return false;
        }
        self.masks.insert(id, MoneyInputState::new());
        true
    }

    fn mint_row_id(&mut self) -> RowId {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    fn move_selection(&mut self, pick: impl Fn(usize, usize) -> usize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        let next = pick(current, self.rows.len());
        if Some(next) != self.selected_index() {
            self.blur_rate_mask();
            self.table_state.select(Some(next));
            self.focus_rate_mask();
        }
    }

    fn blur_rate_mask(&mut self) {
        if self.active_column != ItemColumn::DailyRate {
            return;
        }
        if let Some(id) = self.selected_row_id()
            && let Some(mask) = self.masks.get_mut(&id)
        {
            mask.on_blur();
        }
    }

    fn focus_rate_mask(&mut self) {
        if self.active_column != ItemColumn::DailyRate || !self.is_focused() {
            return;
        }
        if let Some(id) = self.selected_row_id()
            && let Some(mask) = self.masks.get_mut(&id)
        {
            mask.on_focus();
        }
    }
}

impl HasFocus for ItemsEditorState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_table);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn type_rate(state: &mut ItemsEditorState, id: RowId, keys: &str) {
        let mask = state.mask_mut(id).unwrap();
        for ch in keys.chars() {
            let code = match ch {
                '<' => KeyCode::Backspace,
                other => KeyCode::Char(other),
            };
            mask.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    #[test]
    fn adding_a_row_binds_its_mask_exactly_once() {
        let mut state = ItemsEditorState::new();
        let id = state.add_row();
        assert!(state.is_bound(id));

        type_rate(&mut state, id, "400,5");
        // A second bind attempt must not reset the typed digits.
        assert!(!state.bind(id));
        assert_eq!(state.mask(id).unwrap().text(), "400,50");
    }

    #[test]
    fn row_handles_are_never_reused() {
        let mut state = ItemsEditorState::new();
        let first = state.add_row();
        state.remove_selected_row();
        let second = state.add_row();
        assert_ne!(first, second);
        assert!(!state.is_bound(first));
        assert!(state.is_bound(second));
    }

    #[test]
    fn duplicated_rows_copy_values_but_get_a_fresh_binding() {
        let mut state = ItemsEditorState::new();
        let source = state.add_row();
        state.fields_mut(source).unwrap().role.set_text("Model");
        state.fields_mut(source).unwrap().quantity.set_text("2");
        type_rate(&mut state, source, "400,5");

        let copy = state.duplicate_selected_row().unwrap();
        assert_ne!(source, copy);
        assert!(state.is_bound(copy));
        assert_eq!(state.fields(copy).unwrap().role.text(), "Model");
        assert_eq!(state.mask(copy).unwrap().text(), "400,50");

        // The copies edit independently.
        type_rate(&mut state, copy, "<");
        assert_eq!(state.mask(copy).unwrap().text(), "40,50");
        assert_eq!(state.mask(source).unwrap().text(), "400,50");
    }

    #[test]
    fn removing_a_row_releases_its_mask() {
        let mut state = ItemsEditorState::new();
        let id = state.add_row();
        assert_eq!(state.remove_selected_row(), Some(id));
        assert!(!state.is_bound(id));
        assert!(state.is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn line_totals_multiply_quantity_days_and_rate() {
        let mut state = ItemsEditorState::new();
        let id = state.add_row();
        state.fields_mut(id).unwrap().quantity.set_text("2");
        state.fields_mut(id).unwrap().days.set_text("3");
        type_rate(&mut state, id, "400,5");

        assert_eq!(state.line_total(id).cents(), 240_300);
        assert_eq!(state.subtotal().cents(), 240_300);
    }

    #[test]
    fn items_round_trip_through_value_objects() {
        let mut state = ItemsEditorState::new();
        let id = state.add_row();
        state.fields_mut(id).unwrap().role.set_text("Model");
        state.fields_mut(id).unwrap().quantity.set_text("2");
        state.fields_mut(id).unwrap().hours_per_day.set_text("8");
        state.fields_mut(id).unwrap().days.set_text("3");
        type_rate(&mut state, id, "400,5");

        let items = state.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].daily_rate.cents(), 40_050);

        let mut reloaded = ItemsEditorState::new();
        reloaded.set_items(&items);
        assert_eq!(reloaded.items(), items);
        for id in reloaded.row_ids().collect::<Vec<_>>() {
            assert!(reloaded.is_bound(id));
        }
    }

    #[test]
    fn selection_moves_clamp_at_the_edges() {
        let mut state = ItemsEditorState::new();
        state.add_row();
        state.add_row();
        state.select_first_row();
        state.select_previous_row();
        assert_eq!(state.selected_index(), Some(0));
        state.select_last_row();
        state.select_next_row();
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn leaving_the_rate_column_blurs_the_mask() {
        let mut state = ItemsEditorState::new();
        let id = state.add_row();
        state.set_active_column(ItemColumn::DailyRate);
        // A raw injected value only snaps to canonical form on blur.
        state.mask_mut(id).unwrap().set_text("R$ 12,3");
        state.set_active_column(ItemColumn::Days);
        assert_eq!(state.mask(id).unwrap().text(), "12,30");
    }
}
