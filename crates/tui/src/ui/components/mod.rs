//! UI components of the Centavo TUI.

pub mod budget_form;
pub mod common;
pub mod component;
pub mod items_editor;
pub mod masked;
pub mod totals;
