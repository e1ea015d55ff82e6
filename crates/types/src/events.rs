//! Messages and effects exchanged between the TUI runtime and components.

/// Notifications the runtime delivers to the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (status line expiry).
    Tick,
    /// Terminal resized.
    Resize(u16, u16),
}

/// Side effects components hand back to the runtime for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the application.
    Quit,
    /// Write the current form payload to the budget file.
    SaveRequested,
    /// Put the formatted grand total on the system clipboard.
    CopyTotalRequested,
    /// Show a transient message on the status line.
    Status(String),
}
