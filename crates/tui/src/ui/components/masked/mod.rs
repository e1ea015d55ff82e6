//! Masked input fields: every keystroke is intercepted and the displayed
//! text is re-rendered from structured state, never edited in place.

mod date_input;
mod money_input;
mod percent_input;

pub use date_input::DateInputState;
pub use money_input::{EditSide, KeyDisposition, MoneyInputState};
pub use percent_input::PercentInputState;
