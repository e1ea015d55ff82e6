//! Component system for the Centavo TUI.
//!
//! A component is a self-contained UI element: it owns its view state,
//! handles the input routed to it, and renders into a provided area. State
//! that outlives a single component lives on [`App`](crate::app::App);
//! anything a component wants the runtime to do is reported back as
//! [`Effect`]s rather than executed in place.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use centavo_types::{Effect, Msg};

use crate::app::App;

pub(crate) trait Component {
    /// One-time setup after construction.
    fn init(&mut self, _app: &mut App) -> Result<()> {
        Ok(())
    }

    /// Handle a key event while this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle bulk text delivered by a bracketed paste.
    fn handle_paste(&mut self, _app: &mut App, _pasted: &str) -> Vec<Effect> {
        Vec::new()
    }

    /// React to a runtime message (ticks, resizes).
    fn update(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw into `rect`. Side-effect free except for frame drawing and
    /// cursor placement.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
