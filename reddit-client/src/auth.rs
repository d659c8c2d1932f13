//! OAuth2 resource-owner password grant for Reddit "script" apps.

use crate::endpoints::RedditEndpoints;
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, RedirectUrl,
    RequestTokenError, ResourceOwnerPassword, ResourceOwnerUsername, TokenResponse, TokenUrl,
};
use reqwest::Client;
use scraper_core::{ConfigError, CoreError, Credentials, RedditApiError};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct RedditToken {
    pub access_token: String,
    pub expires_at: Option<SystemTime>,
    pub scope: Vec<String>,
}

impl std::fmt::Debug for RedditToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditToken")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

pub struct RedditAuthenticator {
    oauth_client: BasicClient,
    http_client: Client,
}

impl RedditAuthenticator {
    pub fn new(
        credentials: &Credentials,
        endpoints: &RedditEndpoints,
        http_client: Client,
    ) -> Result<Self, CoreError> {
        let auth_url = AuthUrl::new(endpoints.auth_url.clone())
            .map_err(|e| invalid_value("auth_url", &endpoints.auth_url, e))?;
        let token_url = TokenUrl::new(endpoints.token_url.clone())
            .map_err(|e| invalid_value("token_url", &endpoints.token_url, e))?;
        let redirect_url = RedirectUrl::new(endpoints.redirect_uri.clone())
            .map_err(|e| invalid_value("redirect_uri", &endpoints.redirect_uri, e))?;

        let oauth_client = BasicClient::new(
            ClientId::new(credentials.client_id.clone()),
            Some(ClientSecret::new(credentials.secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::BasicAuth)
        .set_redirect_uri(redirect_url);

        Ok(Self {
            oauth_client,
            http_client,
        })
    }

    pub async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RedditToken, CoreError> {
        info!("Requesting Reddit access token for user {}", username);

        let username = ResourceOwnerUsername::new(username.to_string());
        let password = ResourceOwnerPassword::new(password.to_string());
        let http_client = &self.http_client;

        let token = self
            .oauth_client
            .exchange_password(&username, &password)
            .request_async(|request| send_token_request(http_client, request))
            .await
            .map_err(token_error)?;

        let expires_at = token
            .expires_in()
            .map(|expires_in: Duration| SystemTime::now() + expires_in);
        let scope = token
            .scopes()
            .map(|scopes| scopes.iter().map(|s| s.as_str().to_string()).collect())
            .unwrap_or_default();

        debug!("Access token granted with scope {:?}", scope);
        Ok(RedditToken {
            access_token: token.access_token().secret().clone(),
            expires_at,
            scope,
        })
    }
}

/// Sends a token request through the shared client so it carries our
/// user agent; Reddit throttles anonymous agents.
async fn send_token_request(
    http_client: &Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let response = http_client
        .request(request.method, request.url)
        .headers(request.headers)
        .body(request.body)
        .send()
        .await?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

fn token_error(e: RequestTokenError<reqwest::Error, BasicErrorResponse>) -> CoreError {
    match e {
        RequestTokenError::ServerResponse(response) => {
            error!("Token endpoint rejected credentials: {:?}", response);
            CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: response.error().as_ref().to_string(),
            })
        }
        RequestTokenError::Request(e) => {
            error!("Network error during authentication: {}", e);
            if e.is_timeout() {
                CoreError::RedditApi(RedditApiError::RequestTimeout)
            } else {
                CoreError::Network(e)
            }
        }
        // Reddit reports bad passwords as `{"error": "invalid_grant"}` with a 200.
        RequestTokenError::Parse(parse_error, body) => {
            match serde_json::from_slice::<BasicErrorResponse>(&body) {
                Ok(response) => {
                    error!("Token endpoint rejected credentials: {:?}", response);
                    CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                        reason: response.error().as_ref().to_string(),
                    })
                }
                Err(_) => {
                    error!("Failed to parse token response: {}", parse_error);
                    CoreError::RedditApi(RedditApiError::InvalidResponse {
                        details: "Failed to parse access token response".to_string(),
                    })
                }
            }
        }
        RequestTokenError::Other(reason) => {
            CoreError::RedditApi(RedditApiError::AuthenticationFailed { reason })
        }
    }
}

fn invalid_value(field: &str, value: &str, e: url::ParseError) -> CoreError {
    CoreError::Config(ConfigError::InvalidValue {
        field: field.to_string(),
        value: format!("{} ({})", value, e),
    })
}
