//! The post feed: a one-shot remote read and its three-way lifecycle.
//!
//! The feed fetches once on activation, settles into `ready` or
//! `errored`, and stays there. It knows nothing about the to-do panel
//! next to it; a retrieval failure never leaves this module.

pub mod client;
pub mod reducer;
pub mod types;

pub use client::{DEFAULT_BASE_URL, FeedError, PostsClient, PostsGateway};
pub use reducer::{FeedEnvironment, FeedReducer};
pub use types::{FeedAction, FeedState, FeedStatus, Post};
