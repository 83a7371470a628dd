//! Domain types for the to-do panel.
//!
//! The to-do panel is a plain in-memory list plus the single pending draft
//! the user is typing. The list is the sole source of truth for items;
//! ordering is insertion order and no reordering operation exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a to-do item
///
/// Issued by the environment's id generator, which guarantees uniqueness
/// even for two items created at the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, stored exactly as submitted (whitespace preserved)
    pub text: String,
    /// Whether the item is completed
    pub completed: bool,
    /// When the item was created
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, not-yet-completed item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }
}

/// State of the to-do panel
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order
    pub items: Vec<TodoItem>,
    /// The not-yet-submitted draft text
    pub pending: String,
}

impl TodoState {
    /// Creates a new empty panel state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Returns the item with the given id, if present
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks whether an item with the given id exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions for the to-do panel
///
/// Every user input surface maps to exactly one action: the text field to
/// `SetPendingText`, the submit trigger to `Submit`, the per-item checkbox
/// to `Toggle`, and the per-item delete trigger to `Remove`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TodoAction {
    /// Replace the pending draft text unconditionally (no validation)
    SetPendingText {
        /// The new draft value, empty included
        text: String,
    },

    /// Create an item from the pending draft
    ///
    /// A draft that is empty or whitespace-only is a silent no-op, not an
    /// error. Otherwise the draft is stored unmodified and then cleared.
    Submit,

    /// Invert the matching item's completed flag
    ///
    /// Unknown ids are a silent no-op.
    Toggle {
        /// Item to toggle
        id: TodoId,
    },

    /// Remove the matching item, preserving the order of the rest
    ///
    /// Unknown ids are a silent no-op.
    Remove {
        /// Item to remove
        id: TodoId,
    },
}
