//! The budget form: header fields, items editor, totals.

mod form_component;
mod state;

pub use form_component::BudgetFormComponent;
pub use state::{BudgetFormState, FormField};
