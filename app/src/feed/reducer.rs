//! Reducer logic for the post feed.
//!
//! The feed has exactly one interesting transition: activation starts the
//! one-shot fetch as an async effect, and the effect settles into either
//! `Loaded` or `Failed`. Both outcomes are terminal.

use crate::feed::client::PostsGateway;
use crate::feed::types::{FeedAction, FeedState};
use std::sync::Arc;
use taskpage_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the feed reducer
#[derive(Clone)]
pub struct FeedEnvironment {
    /// Gateway performing the outbound read
    pub gateway: Arc<dyn PostsGateway>,
}

impl FeedEnvironment {
    /// Creates a new `FeedEnvironment`
    #[must_use]
    pub fn new(gateway: Arc<dyn PostsGateway>) -> Self {
        Self { gateway }
    }
}

/// Reducer for the post feed
#[derive(Clone, Debug, Default)]
pub struct FeedReducer;

impl FeedReducer {
    /// Creates a new `FeedReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for FeedReducer {
    type State = FeedState;
    type Action = FeedAction;
    type Environment = FeedEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FeedAction::Activate => {
                // One fetch per feed lifetime, whatever re-renders happen.
                if state.activated {
                    tracing::trace!("repeat activation ignored");
                    return SmallVec::new();
                }
                state.activated = true;

                let gateway = Arc::clone(&env.gateway);
                smallvec![Effect::future(async move {
                    // The error is converted here and never re-raised;
                    // nothing crosses the feed boundary.
                    match gateway.fetch_posts().await {
                        Ok(posts) => Some(FeedAction::Loaded { posts }),
                        Err(error) => Some(FeedAction::Failed {
                            message: error.to_string(),
                        }),
                    }
                })]
            }

            FeedAction::Loaded { posts } => {
                if !state.loading {
                    tracing::trace!("settlement after terminal state ignored");
                    return SmallVec::new();
                }
                tracing::debug!(count = posts.len(), "posts loaded");
                state.posts = posts;
                state.loading = false;
                SmallVec::new()
            }

            FeedAction::Failed { message } => {
                if !state.loading {
                    tracing::trace!("settlement after terminal state ignored");
                    return SmallVec::new();
                }
                tracing::warn!(%message, "feed retrieval failed");
                state.error = Some(message);
                state.loading = false;
                SmallVec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::client::FeedError;
    use crate::feed::types::{FeedStatus, Post};
    use async_trait::async_trait;
    use taskpage_runtime::Store;
    use taskpage_testing::{ReducerTest, assertions};

    /// Gateway that returns a canned post list
    struct StaticPosts(Vec<Post>);

    #[async_trait]
    impl PostsGateway for StaticPosts {
        async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError> {
            Ok(self.0.clone())
        }
    }

    /// Gateway that always fails
    struct FailingGateway(FeedError);

    #[async_trait]
    impl PostsGateway for FailingGateway {
        async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError> {
            Err(self.0.clone())
        }
    }

    fn posts(count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| Post {
                id: i as i64 + 1,
                title: format!("title {i}"),
                body: format!("body {i}"),
            })
            .collect()
    }

    fn success_env(count: usize) -> FeedEnvironment {
        FeedEnvironment::new(Arc::new(StaticPosts(posts(count))))
    }

    fn failure_env(error: FeedError) -> FeedEnvironment {
        FeedEnvironment::new(Arc::new(FailingGateway(error)))
    }

    #[test]
    fn activate_starts_the_fetch_once() {
        ReducerTest::new(FeedReducer::new())
            .with_env(success_env(3))
            .given_state(FeedState::new())
            .when_action(FeedAction::Activate)
            .then_state(|state| {
                assert!(state.activated);
                assert!(state.loading);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn repeat_activate_is_a_noop() {
        let mut activated = FeedState::new();
        activated.activated = true;

        ReducerTest::new(FeedReducer::new())
            .with_env(success_env(3))
            .given_state(activated)
            .when_action(FeedAction::Activate)
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn loaded_settles_into_ready() {
        ReducerTest::new(FeedReducer::new())
            .with_env(success_env(0))
            .given_state(FeedState::new())
            .when_action(FeedAction::Loaded { posts: posts(10) })
            .then_state(|state| {
                assert!(!state.loading);
                assert!(state.error.is_none());
                assert_eq!(state.posts.len(), 10);
                assert!(matches!(state.status(), FeedStatus::Ready(_)));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failed_settles_into_errored() {
        ReducerTest::new(FeedReducer::new())
            .with_env(success_env(0))
            .given_state(FeedState::new())
            .when_action(FeedAction::Failed {
                message: "HTTP error: 500".to_string(),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.error.as_deref(), Some("HTTP error: 500"));
                assert!(state.posts.is_empty());
                assert_eq!(state.status(), FeedStatus::Errored("HTTP error: 500"));
            })
            .run();
    }

    #[test]
    fn settlement_after_terminal_state_is_ignored() {
        let mut ready = FeedState::new();
        ready.loading = false;
        ready.posts = posts(2);
        let expected = ready.clone();

        ReducerTest::new(FeedReducer::new())
            .with_env(success_env(0))
            .given_state(ready)
            .when_action(FeedAction::Failed {
                message: "late failure".to_string(),
            })
            .then_state(move |state| {
                assert_eq!(*state, expected);
            })
            .run();
    }

    #[tokio::test]
    async fn store_activation_reaches_ready() {
        let store = Store::new(FeedState::new(), FeedReducer::new(), success_env(10));

        let mut handle = store.send(FeedAction::Activate).await.unwrap();
        handle.wait().await;

        let state = store.state(Clone::clone).await;
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.posts.len(), 10);
    }

    #[tokio::test]
    async fn store_activation_reaches_errored_on_http_failure() {
        let store = Store::new(
            FeedState::new(),
            FeedReducer::new(),
            failure_env(FeedError::Status(500)),
        );

        let mut handle = store.send(FeedAction::Activate).await.unwrap();
        handle.wait().await;

        let state = store.state(Clone::clone).await;
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP error: 500"));
        assert!(state.posts.is_empty());
    }

    #[tokio::test]
    async fn store_fetches_only_once_for_repeat_activation() {
        let store = Store::new(FeedState::new(), FeedReducer::new(), success_env(4));

        let mut first = store.send(FeedAction::Activate).await.unwrap();
        first.wait().await;

        let mut rx = store.subscribe();
        rx.borrow_and_update();

        // Second activation: no fetch, no state change, no signal.
        let mut second = store.send(FeedAction::Activate).await.unwrap();
        second.wait().await;

        assert!(!rx.has_changed().unwrap());
        let state = store.state(Clone::clone).await;
        assert_eq!(state.posts.len(), 4);
    }
}
