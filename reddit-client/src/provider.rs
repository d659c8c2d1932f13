use crate::api::{build_http_client, RedditApiClient, MAX_PAGE_SIZE};
use crate::auth::{RedditAuthenticator, RedditToken};
use crate::endpoints::RedditEndpoints;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper_core::{
    CoreError, Credentials, FeedHandle, FeedSession, FeedSessionProvider, PostStream, RedditPost,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Opens authenticated Reddit sessions.
#[derive(Debug, Clone, Default)]
pub struct RedditProvider {
    endpoints: RedditEndpoints,
}

impl RedditProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: RedditEndpoints) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl FeedSessionProvider for RedditProvider {
    type Session = RedditSession;

    async fn authenticate(
        &self,
        credentials: &Credentials,
        user_agent: &str,
    ) -> Result<RedditSession, CoreError> {
        let http_client = build_http_client(user_agent)?;
        let authenticator =
            RedditAuthenticator::new(credentials, &self.endpoints, http_client.clone())?;
        let token = authenticator
            .password_grant(&credentials.username, &credentials.password)
            .await?;
        let api = RedditApiClient::new(http_client, &self.endpoints)?;

        info!("Authenticated with Reddit as {}", credentials.username);
        Ok(RedditSession {
            api: Arc::new(api),
            token,
        })
    }
}

#[derive(Debug)]
pub struct RedditSession {
    api: Arc<RedditApiClient>,
    token: RedditToken,
}

impl RedditSession {
    pub(crate) fn new(api: RedditApiClient, token: RedditToken) -> Self {
        Self {
            api: Arc::new(api),
            token,
        }
    }

    pub fn token(&self) -> &RedditToken {
        &self.token
    }
}

impl FeedSession for RedditSession {
    type Feed = RedditFeed;

    fn get_feed(&self, name: &str) -> Result<RedditFeed, CoreError> {
        let subreddit = normalize_subreddit_name(name)?;
        debug!("Opened feed r/{}", subreddit);
        Ok(RedditFeed {
            api: Arc::clone(&self.api),
            access_token: self.token.access_token.clone(),
            subreddit,
        })
    }
}

/// Handle to one subreddit's `new` listing.
#[derive(Debug, Clone)]
pub struct RedditFeed {
    api: Arc<RedditApiClient>,
    access_token: String,
    subreddit: String,
}

#[derive(Debug, Clone)]
struct Pager {
    after: Option<String>,
    remaining: u32,
    exhausted: bool,
}

impl FeedHandle for RedditFeed {
    fn name(&self) -> &str {
        &self.subreddit
    }

    fn newest(&self, limit: u32) -> PostStream<'_> {
        let pager = Pager {
            after: None,
            remaining: limit,
            exhausted: false,
        };

        stream::try_unfold(pager, move |pager| self.next_page(pager))
            .map_ok(|posts| stream::iter(posts.into_iter().map(Ok::<RedditPost, CoreError>)))
            .try_flatten()
            .take(limit as usize)
            .boxed()
    }
}

impl RedditFeed {
    async fn next_page(
        &self,
        mut pager: Pager,
    ) -> Result<Option<(Vec<RedditPost>, Pager)>, CoreError> {
        if pager.exhausted || pager.remaining == 0 {
            return Ok(None);
        }

        let page_size = pager.remaining.min(MAX_PAGE_SIZE);
        let listing = self
            .api
            .get_newest_posts(
                &self.access_token,
                &self.subreddit,
                page_size,
                pager.after.as_deref(),
            )
            .await?;

        let posts: Vec<RedditPost> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        debug!(
            "Page of {} posts from r/{} ends at {:?}",
            posts.len(),
            self.subreddit,
            posts.last().map(|post| post.id.as_str())
        );
        pager.remaining = pager.remaining.saturating_sub(posts.len() as u32);
        pager.after = listing.data.after;
        pager.exhausted = posts.is_empty() || pager.after.is_none();

        Ok(Some((posts, pager)))
    }
}

/// Strips an `r/` prefix and checks each `+`-joined part is a plausible
/// subreddit name.
pub fn normalize_subreddit_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    let trimmed = trimmed
        .strip_prefix("/r/")
        .or_else(|| trimmed.strip_prefix("r/"))
        .unwrap_or(trimmed);

    let valid = !trimmed.is_empty()
        && trimmed.split('+').all(|part| {
            (2..=21).contains(&part.len())
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if !valid {
        return Err(CoreError::InvalidInput {
            message: format!("'{}' is not a valid subreddit name", name),
        });
    }
    Ok(trimmed.to_string())
}
