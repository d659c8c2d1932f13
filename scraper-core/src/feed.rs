//! Capability traits for a remote feed platform.
//!
//! A [`FeedSessionProvider`] turns [`Credentials`] into an authenticated
//! [`FeedSession`], which hands out [`FeedHandle`]s for named feeds. The
//! collector only talks to these traits, so tests can substitute an
//! in-memory provider for the Reddit one.

use crate::error::CoreError;
use crate::types::{Credentials, RedditPost};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Newest-first posts from a feed. Finite and consumed once.
pub type PostStream<'a> = BoxStream<'a, Result<RedditPost, CoreError>>;

#[async_trait]
pub trait FeedSessionProvider: Send + Sync {
    type Session: FeedSession;

    async fn authenticate(
        &self,
        credentials: &Credentials,
        user_agent: &str,
    ) -> Result<Self::Session, CoreError>;
}

pub trait FeedSession: Send + Sync {
    type Feed: FeedHandle;

    fn get_feed(&self, name: &str) -> Result<Self::Feed, CoreError>;
}

pub trait FeedHandle: Send + Sync {
    /// Name of the feed as the remote platform knows it.
    fn name(&self) -> &str;

    /// Streams at most `limit` of the newest posts, newest first.
    fn newest(&self, limit: u32) -> PostStream<'_>;
}
