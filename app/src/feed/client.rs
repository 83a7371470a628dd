//! Feed retrieval: the posts gateway trait and its HTTP implementation.
//!
//! The reducer only sees the [`PostsGateway`] trait; the `reqwest`-backed
//! [`PostsClient`] is injected through the environment in production and
//! replaced by canned gateways in tests.

use crate::feed::types::Post;
use async_trait::async_trait;
use thiserror::Error;

/// The hard-coded remote source for posts
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Errors that can occur while retrieving the post feed
///
/// There is exactly one error class from the page's point of view -
/// "feed retrieval failure" - and its `Display` output is the message
/// shown in place of the post list. Variants exist so tests can pin the
/// mapping from HTTP outcomes to messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The response carried a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The request itself failed (connection, DNS, timeout)
    #[error("{0}")]
    Request(String),

    /// The body did not parse as the expected post array
    #[error("{0}")]
    Parse(String),

    /// The failure carried no description
    #[error("unknown error")]
    Unknown,
}

impl FeedError {
    /// Classify a transport-level failure, falling back to `Unknown` when
    /// the failure carries no description
    fn request(error: &reqwest::Error) -> Self {
        let message = error.to_string();
        if message.is_empty() {
            Self::Unknown
        } else {
            Self::Request(message)
        }
    }

    fn parse(error: &reqwest::Error) -> Self {
        let message = error.to_string();
        if message.is_empty() {
            Self::Unknown
        } else {
            Self::Parse(message)
        }
    }
}

/// Gateway for the feed's single outbound read
#[async_trait]
pub trait PostsGateway: Send + Sync {
    /// Fetch the full post list from the remote source
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] for non-success statuses, transport failures,
    /// and bodies that do not parse as a post array.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError>;
}

/// HTTP posts client
#[derive(Clone, Debug)]
pub struct PostsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    /// Creates a client for the default remote source
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Creates a client with an explicit base URL
    #[must_use]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostsGateway for PostsClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError> {
        let url = format!("{}/posts", self.base_url);
        tracing::debug!(%url, "fetching posts");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::request(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "posts request failed");
            return Err(FeedError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Post>>()
            .await
            .map_err(|e| FeedError::parse(&e))
    }
}
