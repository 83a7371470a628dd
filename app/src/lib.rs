//! Taskpage: a two-panel page core.
//!
//! One presentation unit holds two independent state containers side by
//! side:
//!
//! - the **to-do panel** ([`todos`]): an in-memory list with create,
//!   toggle, and delete, plus the pending draft text
//! - the **post feed** ([`feed`]): a one-shot read of a remote post list
//!   and its loading/error/ready lifecycle
//!
//! Each container is a reducer-driven store; neither is aware of the
//! other. The rendering collaborator observes both through
//! `Store::subscribe` and applies the [`view`] projection on every
//! accepted mutation.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskpage::todos::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use taskpage_core::environment::{SequentialIds, SystemClock};
//! use taskpage_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(SequentialIds::new()));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store
//!     .send(TodoAction::SetPendingText { text: "Buy milk".to_string() })
//!     .await?;
//! store.send(TodoAction::Submit).await?;
//!
//! let count = store.state(|s| s.count()).await;
//! println!("Total todos: {count}");
//! # Ok(())
//! # }
//! ```

pub mod feed;
pub mod todos;
pub mod view;

// Re-export commonly used types
pub use feed::{FeedAction, FeedEnvironment, FeedReducer, FeedState, FeedStatus, Post, PostsClient};
pub use todos::{TodoAction, TodoEnvironment, TodoId, TodoItem, TodoReducer, TodoState};
