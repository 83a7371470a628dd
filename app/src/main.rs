//! CLI demo for the taskpage page core.
//!
//! Wires both stores to a rendering observer: each accepted mutation in
//! either panel re-renders the page, exactly as a reactive UI layer
//! would. The feed performs its real one-shot fetch against the remote
//! source.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use taskpage::feed::{FeedAction, FeedEnvironment, FeedReducer, FeedState, PostsClient};
use taskpage::todos::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
use taskpage::view;
use taskpage_core::environment::{SequentialIds, SystemClock};
use taskpage_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpage=debug,taskpage_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Taskpage: todo panel + post feed ===");

    // Each panel gets its own store; neither knows about the other.
    let todo_env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(SequentialIds::new()));
    let todo_store = Store::new(TodoState::new(), TodoReducer::new(), todo_env);

    let feed_env = FeedEnvironment::new(Arc::new(PostsClient::new()));
    let feed_store = Store::new(FeedState::new(), FeedReducer::new(), feed_env);

    // The rendering collaborator: re-renders the page on every accepted
    // mutation in either panel.
    let mut todo_rx = todo_store.subscribe();
    let mut feed_rx = feed_store.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = todo_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = feed_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            let todos = todo_rx.borrow_and_update().clone();
            let feed = feed_rx.borrow_and_update().clone();
            println!("\n{}", view::render_page(&todos, &feed));
        }
    });

    // Feed activation: the one-shot fetch starts on mount.
    let mut fetch = feed_store.send(FeedAction::Activate).await?;

    // The user types and submits a couple of todos.
    todo_store
        .send(TodoAction::SetPendingText {
            text: "Buy milk".to_string(),
        })
        .await?;
    todo_store.send(TodoAction::Submit).await?;

    todo_store
        .send(TodoAction::SetPendingText {
            text: "Write weekly summary".to_string(),
        })
        .await?;
    todo_store.send(TodoAction::Submit).await?;

    // A blank submit is silently ignored and triggers no re-render.
    todo_store
        .send(TodoAction::SetPendingText {
            text: "   ".to_string(),
        })
        .await?;
    todo_store.send(TodoAction::Submit).await?;

    // Complete the first item, then delete it.
    let first_id = todo_store.state(|s| s.items.first().map(|item| item.id)).await;
    if let Some(id) = first_id {
        todo_store.send(TodoAction::Toggle { id }).await?;
        todo_store.send(TodoAction::Remove { id }).await?;
    }

    // Give the fetch a bounded window to settle; the page stays usable
    // either way.
    if fetch.wait_with_timeout(Duration::from_secs(10)).await.is_err() {
        println!("\n(posts still loading after 10s, shutting down anyway)");
    }

    // Final page snapshot.
    let todos = todo_store.state(Clone::clone).await;
    let feed = feed_store.state(Clone::clone).await;
    println!("\n--- final page ---\n{}", view::render_page(&todos, &feed));

    // Page teardown: a fetch settling after this point is dropped.
    todo_store.shutdown(Duration::from_secs(5)).await?;
    feed_store.shutdown(Duration::from_secs(5)).await?;
    renderer.abort();

    Ok(())
}
