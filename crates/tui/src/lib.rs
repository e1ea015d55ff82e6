//! # Centavo TUI
//!
//! Terminal user interface for the Centavo budget editor, built on Ratatui.
//!
//! The centerpiece is the masked money field: a digit-by-digit BRL editor
//! that intercepts every keystroke and re-renders the displayed value from
//! structured state, so the field always reads `1.234,56`. Around it sit a
//! date mask, a percent mask, a dynamic items table with per-row money
//! masks, and a totals bar.
//!
//! ## Architecture
//!
//! Components own their view state and report side effects back to the
//! runtime as [`centavo_types::Effect`]s; the runtime owns the terminal,
//! the event loop, and effect execution.

mod app;
mod ui;

use anyhow::Result;

pub use ui::runtime::RunOptions;

/// Runs the main TUI application loop until the user quits.
///
/// # Errors
///
/// Returns an error for terminal setup failures or drawing errors; user
/// level problems (unreadable budget file, clipboard missing) surface on
/// the status line instead.
pub async fn run(options: RunOptions) -> Result<()> {
    ui::runtime::run_app(options).await
}
