//! Display policy consumed by the rendering collaborator.
//!
//! The rendering engine itself is external; these functions are the pure
//! snapshot-to-lines projection it applies on every state change.

use crate::feed::types::{FeedState, FeedStatus, Post};
use crate::todos::types::TodoState;

/// At most this many posts are rendered
pub const MAX_POSTS: usize = 8;

/// Body preview length, in characters
pub const BODY_PREVIEW_CHARS: usize = 100;

/// Render the to-do panel, one line per item in insertion order
#[must_use]
pub fn render_todos(state: &TodoState) -> Vec<String> {
    state
        .items
        .iter()
        .map(|item| {
            let mark = if item.completed { 'x' } else { ' ' };
            format!("[{mark}] {}", item.text)
        })
        .collect()
}

/// Render the feed panel according to its lifecycle
///
/// While loading, a single indicator line; once an outcome is known, the
/// indicator and (on failure) the list are suppressed.
#[must_use]
pub fn render_feed(state: &FeedState) -> Vec<String> {
    match state.status() {
        FeedStatus::Loading => vec!["Loading posts...".to_string()],
        FeedStatus::Errored(message) => vec![message.to_string()],
        FeedStatus::Ready(posts) => posts.iter().take(MAX_POSTS).map(post_line).collect(),
    }
}

/// One rendered post: title plus the first 100 characters of body
///
/// The ellipsis is appended even when the body is shorter than the
/// preview length; the page has always rendered it that way. Truncation
/// counts characters, so a multi-byte body never splits a code point.
fn post_line(post: &Post) -> String {
    let preview: String = post.body.chars().take(BODY_PREVIEW_CHARS).collect();
    format!("{}: {preview}...", post.title)
}

/// Render the whole page: to-do panel beside the feed panel
#[must_use]
pub fn render_page(todos: &TodoState, feed: &FeedState) -> String {
    let mut lines = Vec::new();

    lines.push("== Todos ==".to_string());
    if todos.items.is_empty() {
        lines.push("(no todos yet)".to_string());
    } else {
        lines.extend(render_todos(todos));
    }
    if !todos.pending.is_empty() {
        lines.push(format!("draft: {}", todos.pending));
    }

    lines.push(String::new());
    lines.push("== Posts ==".to_string());
    lines.extend(render_feed(feed));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::FeedState;
    use crate::todos::types::{TodoId, TodoItem, TodoState};
    use chrono::Utc;

    fn post_with_body(body: &str) -> Post {
        Post {
            id: 1,
            title: "title".to_string(),
            body: body.to_string(),
        }
    }

    fn ready_state(posts: Vec<Post>) -> FeedState {
        FeedState {
            loading: false,
            error: None,
            posts,
            activated: true,
        }
    }

    #[test]
    fn loading_shows_indicator_only() {
        let lines = render_feed(&FeedState::new());
        assert_eq!(lines, vec!["Loading posts...".to_string()]);
    }

    #[test]
    fn error_replaces_the_list() {
        let state = FeedState {
            loading: false,
            error: Some("HTTP error: 500".to_string()),
            posts: Vec::new(),
            activated: true,
        };
        let lines = render_feed(&state);
        assert_eq!(lines, vec!["HTTP error: 500".to_string()]);
    }

    #[test]
    fn at_most_eight_posts_are_rendered() {
        let posts = (0..10)
            .map(|i| Post {
                id: i,
                title: format!("t{i}"),
                body: "body".to_string(),
            })
            .collect();
        let lines = render_feed(&ready_state(posts));
        assert_eq!(lines.len(), MAX_POSTS);
        assert!(lines[0].starts_with("t0"));
        assert!(lines[7].starts_with("t7"));
    }

    #[test]
    fn long_body_is_cut_to_preview_length() {
        let body = "a".repeat(150);
        let lines = render_feed(&ready_state(vec![post_with_body(&body)]));
        let expected = format!("title: {}...", "a".repeat(BODY_PREVIEW_CHARS));
        assert_eq!(lines[0], expected);
    }

    #[test]
    fn short_body_still_gets_ellipsis() {
        let lines = render_feed(&ready_state(vec![post_with_body("short")]));
        assert_eq!(lines[0], "title: short...");
    }

    #[test]
    fn multibyte_body_truncates_on_char_boundary() {
        let body = "é".repeat(120);
        let lines = render_feed(&ready_state(vec![post_with_body(&body)]));
        let expected = format!("title: {}...", "é".repeat(BODY_PREVIEW_CHARS));
        assert_eq!(lines[0], expected);
    }

    #[test]
    fn todos_render_with_completion_marks() {
        let mut state = TodoState::new();
        state
            .items
            .push(TodoItem::new(TodoId::new(1), "first".to_string(), Utc::now()));
        let mut done = TodoItem::new(TodoId::new(2), "second".to_string(), Utc::now());
        done.completed = true;
        state.items.push(done);

        let lines = render_todos(&state);
        assert_eq!(lines, vec!["[ ] first".to_string(), "[x] second".to_string()]);
    }

    #[test]
    fn page_renders_both_panels() {
        let page = render_page(&TodoState::new(), &FeedState::new());
        assert!(page.contains("== Todos =="));
        assert!(page.contains("== Posts =="));
        assert!(page.contains("Loading posts..."));
    }
}
