//! Shared type definitions for the Centavo budget editor.
//!
//! This crate holds the value objects that the rest of the workspace agrees
//! on: fixed-point money, budget line items and totals, the form payload
//! contract, and the message/effect enums exchanged between the TUI runtime
//! and its components.

pub mod budget;
pub mod events;
pub mod money;

pub use budget::{Budget, LineItem};
pub use events::{Effect, Msg};
pub use money::Money;
