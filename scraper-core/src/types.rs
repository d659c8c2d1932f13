use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// A post from a feed listing, keeping only what the title log needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
}

/// Login material for a Reddit "script" application.
///
/// Field names match the keys of the JSON login file.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fixed parameters of a scraper run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub login_file: PathBuf,
    pub feed_name: String,
    pub output_file: PathBuf,
    pub user_agent: String,
    pub fetch_limit: u32,
}

pub const DEFAULT_FETCH_LIMIT: u32 = 1000;

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            login_file: PathBuf::from("../login_info.json"),
            feed_name: "minnesotavikings".to_string(),
            output_file: PathBuf::from("post_titles.txt"),
            user_agent: concat!("reddit_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }
}
