use crate::endpoints::RedditEndpoints;
use reqwest::{redirect, Client, Method, Response, StatusCode};
use scraper_core::{ConfigError, CoreError, RedditApiError, RedditPost};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Largest page the listing endpoints will return.
pub const MAX_PAGE_SIZE: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
}

pub(crate) fn build_http_client(user_agent: &str) -> Result<Client, CoreError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        // Reddit answers unknown subreddits with a redirect to search.
        .redirect(redirect::Policy::none())
        .build()
        .map_err(CoreError::Network)
}

#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    api_base: Url,
}

impl RedditApiClient {
    pub fn new(http_client: Client, endpoints: &RedditEndpoints) -> Result<Self, CoreError> {
        let api_base = Url::parse(&endpoints.api_base).map_err(|e| {
            CoreError::Config(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: format!("{} ({})", endpoints.api_base, e),
            })
        })?;

        Ok(Self {
            http_client,
            api_base,
        })
    }

    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        access_token: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let url = self.api_base.join(endpoint).map_err(|e| CoreError::InvalidInput {
            message: format!("Invalid endpoint {}: {}", endpoint, e),
        })?;

        let mut request_builder = self
            .http_client
            .request(method.clone(), url)
            .bearer_auth(access_token);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        info!("Making Reddit API request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);

                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        Err(status_error(&response, endpoint))
    }

    /// Fetches one page of a subreddit's `new` listing.
    pub async fn get_newest_posts(
        &self,
        access_token: &str,
        subreddit: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<RedditListing<RedditPostData>, CoreError> {
        let endpoint = format!("/r/{}/new", subreddit);
        let limit_str = limit.min(MAX_PAGE_SIZE).to_string();
        let mut params = vec![("limit", limit_str.as_str()), ("raw_json", "1")];
        if let Some(after_val) = after {
            params.push(("after", after_val));
        }

        let response = self
            .make_request(Method::GET, &endpoint, access_token, Some(params.as_slice()))
            .await
            .map_err(|e| match e {
                CoreError::NotFound { .. } => {
                    CoreError::RedditApi(RedditApiError::SubredditNotFound {
                        subreddit: subreddit.to_string(),
                    })
                }
                other => other,
            })?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{}", subreddit),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{}",
            listing.data.children.len(),
            subreddit
        );
        Ok(listing)
    }
}

fn status_error(response: &Response, endpoint: &str) -> CoreError {
    let status = response.status();
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited, retry after {} seconds", retry_after);
            CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after })
        }
        StatusCode::UNAUTHORIZED => CoreError::RedditApi(RedditApiError::InvalidToken),
        StatusCode::FORBIDDEN => CoreError::RedditApi(RedditApiError::Forbidden {
            resource: endpoint.to_string(),
        }),
        StatusCode::NOT_FOUND => CoreError::NotFound {
            resource: endpoint.to_string(),
        },
        s if s.is_redirection() => CoreError::NotFound {
            resource: endpoint.to_string(),
        },
        s if s.is_server_error() => CoreError::RedditApi(RedditApiError::ServerError {
            status_code: s.as_u16(),
        }),
        s => CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: format!("Unexpected status {} for {}", s, endpoint),
        }),
    }
}

impl From<RedditPostData> for RedditPost {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            id: post_data.id,
            title: post_data.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reddit_post_conversion() {
        let post_data = RedditPostData {
            id: "test123".to_string(),
            title: "Test Post".to_string(),
        };

        let reddit_post: RedditPost = post_data.into();
        assert_eq!(reddit_post.id, "test123");
        assert_eq!(reddit_post.title, "Test Post");
    }

    #[test]
    fn test_post_data_ignores_unused_listing_fields() {
        let json = r#"{"id": "abc", "name": "t3_abc", "title": "Link", "url": "https://example.com", "is_self": false, "created_utc": 1700000000.0}"#;
        let post_data: RedditPostData = serde_json::from_str(json).unwrap();

        let reddit_post: RedditPost = post_data.into();
        assert_eq!(reddit_post.id, "abc");
        assert_eq!(reddit_post.title, "Link");
    }

    #[test]
    fn test_post_data_requires_a_title() {
        let json = r#"{"id": "abc", "name": "t3_abc"}"#;
        assert!(serde_json::from_str::<RedditPostData>(json).is_err());
    }

    #[test]
    fn test_rejects_invalid_api_base() {
        let endpoints = RedditEndpoints {
            api_base: "not a url".to_string(),
            ..RedditEndpoints::default()
        };
        let http = build_http_client("test-user-agent/1.0").unwrap();

        let result = RedditApiClient::new(http, &endpoints);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
