/// Base URLs used by the Reddit provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub api_base: String,
    pub redirect_uri: String,
}

impl Default for RedditEndpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://www.reddit.com/api/v1/authorize".to_string(),
            token_url: "https://www.reddit.com/api/v1/access_token".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
            redirect_uri: "http://localhost:8080".to_string(),
        }
    }
}

impl RedditEndpoints {
    /// Points both the token endpoint and the API at `base`, for tests
    /// against a local mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth_url: format!("{}/api/v1/authorize", base),
            token_url: format!("{}/api/v1/access_token", base),
            api_base: base.to_string(),
            ..Self::default()
        }
    }
}
