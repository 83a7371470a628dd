//! Reducer logic for the to-do panel.
//!
//! All four operations are direct list mutations; none produce effects.
//! Rejected inputs (empty submit, unknown id) leave state untouched, which
//! is how the store knows not to signal observers.

use crate::todos::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use taskpage_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for item creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Id generator; must stay unique under rapid successive creation
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

/// Reducer for the to-do panel
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::SetPendingText { text } => {
                state.pending = text;
            }

            TodoAction::Submit => {
                // Emptiness after trim is the creation gate, but the stored
                // text keeps its surrounding whitespace.
                if state.pending.trim().is_empty() {
                    tracing::trace!("submit with blank draft ignored");
                    return SmallVec::new();
                }

                let id = TodoId::new(env.ids.next_id());
                let item = TodoItem::new(id, state.pending.clone(), env.clock.now());
                tracing::debug!(%id, "to-do item created");

                state.items.push(item);
                state.pending.clear();
            }

            TodoAction::Toggle { id } => {
                if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                    item.completed = !item.completed;
                } else {
                    tracing::trace!(%id, "toggle for unknown id ignored");
                }
            }

            TodoAction::Remove { id } => {
                state.items.retain(|item| item.id != id);
            }
        }

        SmallVec::new()
    }
}
