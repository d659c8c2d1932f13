use scraper_core::{
    ConfigError, CoreError, CredentialResolver, ErrorCategory, ErrorExt, ErrorReporter,
    RedditApiError, TitleLog,
};
use std::env;

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "LOGIN_INFO_SECRET".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let io_error = CoreError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
    assert_eq!(io_error.error_code(), "IO");

    assert_eq!(
        RedditApiError::RateLimitExceeded { retry_after: 60 }.error_code(),
        "REDDIT_RATE_LIMIT"
    );
}

#[test]
fn test_error_categories() {
    let missing = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "LOGIN_INFO_CLIENT_ID".to_string(),
    });
    assert_eq!(missing.category(), ErrorCategory::Configuration);

    let rejected = CoreError::RedditApi(RedditApiError::AuthenticationFailed {
        reason: "invalid_grant".to_string(),
    });
    assert_eq!(rejected.category(), ErrorCategory::Authentication);

    let server = CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 });
    assert_eq!(server.category(), ErrorCategory::Network);

    let not_found = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "nope".to_string(),
    });
    assert_eq!(not_found.category(), ErrorCategory::Network);

    let io = CoreError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
    assert_eq!(io.category(), ErrorCategory::Filesystem);

    let bad_name = CoreError::InvalidInput {
        message: "bad subreddit name".to_string(),
    };
    assert_eq!(bad_name.category(), ErrorCategory::Configuration);
}

#[test]
fn test_exit_codes() {
    let config_error = CoreError::Config(ConfigError::InvalidFormat {
        path: "login_info.json".to_string(),
        details: "expected value".to_string(),
    });
    assert_eq!(config_error.exit_code(), 78);

    let auth_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(auth_error.exit_code(), 77);

    let timeout = CoreError::RedditApi(RedditApiError::RequestTimeout);
    assert_eq!(timeout.exit_code(), 69);

    let io = CoreError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
    assert_eq!(io.exit_code(), 74);
}

#[test]
fn test_user_friendly_messages() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    let message = reddit_error.user_friendly_message();
    assert!(message.contains("authentication token is invalid"));

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "LOGIN_INFO_PASSWORD".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("LOGIN_INFO_PASSWORD"));

    let subreddit_error = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "minnesotavikings".to_string(),
    });
    assert!(subreddit_error
        .user_friendly_message()
        .contains("minnesotavikings"));
}

#[test]
fn test_error_display_keeps_source_detail() {
    let error = CoreError::from(RedditApiError::RateLimitExceeded { retry_after: 42 });
    assert_eq!(
        error.to_string(),
        "Reddit API error: Rate limit exceeded. Retry after 42 seconds"
    );
}

#[test]
fn test_reporter_exit_code_for_missing_credentials() {
    let absent = env::temp_dir().join(format!("login_absent_{}.json", uuid::Uuid::new_v4()));
    let error = CredentialResolver::new(absent)
        .resolve_with(|_| None)
        .unwrap_err();

    assert_eq!(ErrorReporter::new().report_error(&error), 78);
}

#[test]
fn test_reporter_exit_code_for_unwritable_log() {
    // A directory cannot be opened for appending.
    let error = TitleLog::new(env::temp_dir())
        .append(&["title"])
        .unwrap_err();

    assert!(matches!(error, CoreError::Io(_)));
    assert_eq!(ErrorReporter::default().report_error(&error), 74);
}

#[test]
fn test_reporter_exit_code_for_rejected_login() {
    let error = CoreError::from(RedditApiError::AuthenticationFailed {
        reason: "invalid_grant".to_string(),
    });

    assert_eq!(ErrorReporter::new().report_error(&error), 77);
}
