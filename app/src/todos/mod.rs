//! The to-do panel: an ordered in-memory list plus the pending draft.
//!
//! Owns creation, completion-toggling, and deletion of to-do items. The
//! panel is fully synchronous; it knows nothing about the post feed next
//! to it.

pub mod reducer;
pub mod types;

pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
