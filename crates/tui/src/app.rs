//! Application state shared across components.

use std::path::PathBuf;
use std::rc::Rc;

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use centavo_types::{Effect, Money, Msg};
use centavo_util::preferences::UserPreferences;

use crate::ui::components::budget_form::BudgetFormState;
use crate::ui::theme::Theme;

/// Number of ticks a status message survives before expiring.
const STATUS_TICKS: u8 = 3;

/// A transient message shown at the bottom of the screen.
#[derive(Debug)]
pub struct StatusLine {
    pub text: String,
    ticks_remaining: u8,
}

/// Top-level mutable state: the form, the theme, focus, and the file the
/// form round-trips through.
pub struct App {
    pub form: BudgetFormState,
    pub theme: Theme,
    pub focus: Rc<Focus>,
    pub budget_file: Option<PathBuf>,
    pub preferences: UserPreferences,
    pub status: Option<StatusLine>,
    /// Edits happened since the last save.
    pub unsaved: bool,
    container: FocusFlag,
}

impl App {
    pub fn new(theme: Theme, preferences: UserPreferences, budget_file: Option<PathBuf>) -> Self {
        Self {
            form: BudgetFormState::new(),
            theme,
            focus: Rc::new(Focus::default()),
            budget_file,
            preferences,
            status: None,
            unsaved: false,
            container: FocusFlag::new().with_name("app"),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            ticks_remaining: STATUS_TICKS,
        });
    }

    pub fn grand_total(&self) -> Money {
        self.form.current_budget().total()
    }

    /// Processes a runtime message.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if let Some(status) = self.status.as_mut() {
                    status.ticks_remaining = status.ticks_remaining.saturating_sub(1);
                    if status.ticks_remaining == 0 {
                        self.status = None;
                    }
                }
            }
            Msg::Resize(_, _) => {}
        }
        Vec::new()
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.form);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
