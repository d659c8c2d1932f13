use crate::error::*;
use std::fmt;
use tracing::{error, info};

/// Broad failure classes surfaced to the invoking process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Network,
    Filesystem,
}

impl ErrorCategory {
    /// Process exit code, following the BSD `sysexits.h` values.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::Configuration => 78, // EX_CONFIG
            ErrorCategory::Authentication => 77, // EX_NOPERM
            ErrorCategory::Network => 69,       // EX_UNAVAILABLE
            ErrorCategory::Filesystem => 74,    // EX_IOERR
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Network => "network",
            ErrorCategory::Filesystem => "filesystem",
        };
        f.write_str(name)
    }
}

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn category(&self) -> ErrorCategory;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;

    fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::RedditApi(e) => {
                error!("Reddit API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            CoreError::Io(e) => {
                error!("IO error details: {:?}", e.kind());
            }
            _ => {}
        }
        self
    }

    fn category(&self) -> ErrorCategory {
        match self {
            CoreError::RedditApi(e) => e.category(),
            CoreError::Config(e) => e.category(),
            CoreError::Io(_) => ErrorCategory::Filesystem,
            CoreError::Network(_) => ErrorCategory::Network,
            CoreError::NotFound { .. } => ErrorCategory::Network,
            CoreError::InvalidInput { .. } => ErrorCategory::Configuration,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("Could not write the title log: {}", e),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            CoreError::NotFound { resource } => format!("Could not find: {}", resource),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::NotFound { .. } => "NOT_FOUND".to_string(),
        }
    }
}

impl ErrorExt for RedditApiError {
    fn log_error(&self) -> &Self {
        error!("RedditApiError: {}", self);
        self
    }

    fn category(&self) -> ErrorCategory {
        match self {
            RedditApiError::AuthenticationFailed { .. }
            | RedditApiError::InvalidToken
            | RedditApiError::Forbidden { .. } => ErrorCategory::Authentication,
            _ => ErrorCategory::Network,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::AuthenticationFailed { .. } => {
                "Reddit authentication failed. Please check your credentials.".to_string()
            }
            RedditApiError::RateLimitExceeded { retry_after } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                retry_after
            ),
            RedditApiError::Forbidden { resource } => format!(
                "Access denied to {}. You may not have permission to view this content.",
                resource
            ),
            RedditApiError::SubredditNotFound { subreddit } => {
                format!("Subreddit '{}' not found or is private.", subreddit)
            }
            RedditApiError::InvalidToken => {
                "Reddit authentication token is invalid. Please re-authenticate.".to_string()
            }
            RedditApiError::RequestTimeout => {
                "Request to Reddit timed out. Please try again.".to_string()
            }
            _ => "Reddit API error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            RedditApiError::AuthenticationFailed { .. } => "REDDIT_AUTH_FAILED".to_string(),
            RedditApiError::RateLimitExceeded { .. } => "REDDIT_RATE_LIMIT".to_string(),
            RedditApiError::Forbidden { .. } => "REDDIT_FORBIDDEN".to_string(),
            RedditApiError::SubredditNotFound { .. } => "REDDIT_SUBREDDIT_NOT_FOUND".to_string(),
            RedditApiError::InvalidToken => "REDDIT_INVALID_TOKEN".to_string(),
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT".to_string(),
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE".to_string(),
            RedditApiError::ServerError { .. } => "REDDIT_SERVER_ERROR".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidFormat { path, .. } => format!(
                "Credentials file '{}' is not a valid login file. Please check its contents.",
                path
            ),
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::MissingEnvironmentVariable { var_name } => format!(
                "No credentials file found and environment variable '{}' is not set.",
                var_name
            ),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::InvalidFormat { .. } => "CONFIG_INVALID_FORMAT".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::MissingEnvironmentVariable { .. } => "CONFIG_MISSING_ENV_VAR".to_string(),
        }
    }
}

/// Logs a fatal error and picks the process exit code for it.
#[derive(Debug, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) -> u8 {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!(
            "Error category: {} (exit code {})",
            error.category(),
            error.exit_code()
        );
        error.exit_code()
    }
}
