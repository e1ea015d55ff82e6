//! State for the budget form: the header fields plus the items editor.

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use centavo_types::Budget;

use crate::ui::components::items_editor::ItemsEditorState;
use crate::ui::components::masked::{DateInputState, MoneyInputState, PercentInputState};

/// The form fields that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    EventDate,
    DiscountAmount,
    DiscountPercent,
    Items,
}

/// Holds every editable field of the budget form.
#[derive(Debug)]
pub struct BudgetFormState {
    pub event_date: DateInputState,
    pub discount_amount: MoneyInputState,
    pub discount_percent: PercentInputState,
    pub items: ItemsEditorState,

    pub f_event_date: FocusFlag,
    pub f_discount_amount: FocusFlag,
    pub f_discount_percent: FocusFlag,
    container: FocusFlag,

    last_focused: Option<FormField>,
}

impl Default for BudgetFormState {
    fn default() -> Self {
        Self {
            event_date: DateInputState::new(),
            discount_amount: MoneyInputState::new(),
            discount_percent: PercentInputState::new(),
            items: ItemsEditorState::new(),
            f_event_date: FocusFlag::new().with_name("form.event_date"),
            f_discount_amount: FocusFlag::new().with_name("form.discount_amount"),
            f_discount_percent: FocusFlag::new().with_name("form.discount_percent"),
            container: FocusFlag::new().with_name("form"),
            last_focused: None,
        }
    }
}

impl BudgetFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field currently holding focus, if any.
    pub fn focused_field(&self) -> Option<FormField> {
        if self.f_event_date.get() {
            Some(FormField::EventDate)
        } else if self.f_discount_amount.get() {
            Some(FormField::DiscountAmount)
        } else if self.f_discount_percent.get() {
            Some(FormField::DiscountPercent)
        } else if self.items.is_focused() {
            Some(FormField::Items)
        } else {
            None
        }
    }

    /// Fires the blur/focus hooks of the masked fields whenever focus
    /// moved since the last call. The runtime's focus ring only flips
    /// flags; the masks' normalization semantics live here.
    pub fn sync_focus_transitions(&mut self) {
        let current = self.focused_field();
        if current == self.last_focused {
            return;
        }
        match self.last_focused {
            Some(FormField::EventDate) => self.event_date.on_blur(),
            Some(FormField::DiscountAmount) => self.discount_amount.on_blur(),
            Some(FormField::DiscountPercent) => self.discount_percent.on_blur(),
            Some(FormField::Items) => self.items.on_editor_blur(),
            None => {}
        }
        match current {
            Some(FormField::DiscountAmount) => self.discount_amount.on_focus(),
            Some(FormField::Items) => self.items.on_editor_focus(),
            _ => {}
        }
        self.last_focused = current;
    }

    /// Snapshot of the whole form as a value object.
    pub fn current_budget(&self) -> Budget {
        Budget {
            event_date: self.event_date.date(),
            discount_amount: self.discount_amount.amount(),
            discount_percent: self.discount_percent.value().unwrap_or(0),
            items: self.items.items(),
        }
    }

    /// Rebuilds every field from a loaded budget.
    pub fn load_budget(&mut self, budget: &Budget) {
        self.event_date.set_date(budget.event_date);
        if budget.discount_amount.is_zero() {
            self.discount_amount.clear();
        } else {
            self.discount_amount.set_amount(budget.discount_amount);
        }
        self.discount_percent.set_value(if budget.discount_percent == 0 {
            None
        } else {
            Some(budget.discount_percent)
        });
        self.items.set_items(&budget.items);
        self.last_focused = None;
    }
}

impl HasFocus for BudgetFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_event_date);
        builder.leaf_widget(&self.f_discount_amount);
        builder.leaf_widget(&self.f_discount_percent);
        builder.widget(&self.items);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
