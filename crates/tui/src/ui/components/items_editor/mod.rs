//! Dynamic line-item rows with a bind-exactly-once money-mask registry.

mod items_view;
mod state;

pub use items_view::ItemsEditorView;
pub use state::{ItemColumn, ItemsEditorState, RowFields, RowId};
