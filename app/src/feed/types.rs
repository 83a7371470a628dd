//! Domain types for the post feed.
//!
//! The feed is read-only: the whole post set is created once when the
//! fetch succeeds, never mutated, and discarded with the page.

use serde::{Deserialize, Serialize};

/// A post from the remote source
///
/// The shape is fixed by the remote endpoint: integer `id`, string
/// `title`, string `body`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier assigned by the remote source
    pub id: i64,
    /// Post title
    pub title: String,
    /// Post body
    pub body: String,
}

/// The three-way lifecycle of the one-shot fetch
///
/// Exactly one of these holds at any time: never loading and errored at
/// once, never errored with posts displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedStatus<'a> {
    /// The fetch has not settled yet
    Loading,
    /// The fetch failed; the message replaces the post list
    Errored(&'a str),
    /// The fetch succeeded
    Ready(&'a [Post]),
}

/// State of the post feed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedState {
    /// True until the fetch settles, on both outcomes
    pub loading: bool,
    /// Human-readable retrieval failure, if the fetch failed
    pub error: Option<String>,
    /// The fetched posts; stays empty on failure
    pub posts: Vec<Post>,
    /// Whether the one-shot fetch has been started
    pub activated: bool,
}

impl FeedState {
    /// Creates the initial feed state: loading, no error, no posts
    #[must_use]
    pub const fn new() -> Self {
        Self {
            loading: true,
            error: None,
            posts: Vec::new(),
            activated: false,
        }
    }

    /// Projects the invariant-bearing status composite
    #[must_use]
    pub fn status(&self) -> FeedStatus<'_> {
        if let Some(message) = &self.error {
            FeedStatus::Errored(message)
        } else if self.loading {
            FeedStatus::Loading
        } else {
            FeedStatus::Ready(&self.posts)
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the post feed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FeedAction {
    /// Start the one-shot fetch
    ///
    /// Only the first receipt starts a fetch; the feed never re-fetches,
    /// whatever happens later.
    Activate,

    /// The fetch settled successfully
    Loaded {
        /// The parsed post set, replaced atomically
        posts: Vec<Post>,
    },

    /// The fetch settled with a retrieval failure
    Failed {
        /// Human-readable message shown in place of the list
        message: String,
    },
}
