use futures::{StreamExt, TryStreamExt};
use scraper_core::{
    CoreError, CredentialResolver, Credentials, FeedHandle, FeedSession, FeedSessionProvider,
    TitleLog, DEFAULT_FETCH_LIMIT,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};


/// Outcome of one collect-and-append pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feed: String,
    pub fetched: usize,
    pub written: usize,
    pub output: PathBuf,
}

/// Reads the newest post titles from one feed and appends them to a log.
pub struct FeedTitleCollector<F: FeedHandle> {
    feed: F,
    fetch_limit: u32,
}

impl<F: FeedHandle> FeedTitleCollector<F> {
    /// Resolves credentials from `login_file` (or the environment), logs in
    /// through `provider` and opens `feed_name`.
    pub async fn connect<P>(
        provider: &P,
        login_file: impl AsRef<Path>,
        feed_name: &str,
        user_agent: &str,
    ) -> Result<Self, CoreError>
    where
        P: FeedSessionProvider,
        P::Session: FeedSession<Feed = F>,
    {
        let resolved = CredentialResolver::new(login_file.as_ref()).resolve()?;
        Self::connect_with_credentials(provider, resolved.credentials(), feed_name, user_agent)
            .await
    }

    pub async fn connect_with_credentials<P>(
        provider: &P,
        credentials: &Credentials,
        feed_name: &str,
        user_agent: &str,
    ) -> Result<Self, CoreError>
    where
        P: FeedSessionProvider,
        P::Session: FeedSession<Feed = F>,
    {
        let session = provider.authenticate(credentials, user_agent).await?;
        let feed = session.get_feed(feed_name)?;
        info!("Connected to feed {}", feed.name());

        Ok(Self {
            feed,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        })
    }

    pub fn with_fetch_limit(mut self, fetch_limit: u32) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn feed_name(&self) -> &str {
        self.feed.name()
    }

    pub fn fetch_limit(&self) -> u32 {
        self.fetch_limit
    }

    /// Titles of the newest posts, newest first, at most `fetch_limit`.
    pub async fn fetch_recent_titles(&self) -> Result<Vec<String>, CoreError> {
        let titles: Vec<String> = self
            .feed
            .newest(self.fetch_limit)
            .take(self.fetch_limit as usize)
            .map_ok(|post| post.title)
            .try_collect()
            .await?;

        info!("Fetched {} titles from {}", titles.len(), self.feed.name());
        Ok(titles)
    }

    pub fn append_titles_to_log(
        titles: &[String],
        path: impl AsRef<Path>,
    ) -> Result<usize, CoreError> {
        TitleLog::new(path.as_ref()).append(titles)
    }

    /// Fetches the newest titles and appends them to `output`.
    pub async fn run(&self, output: impl AsRef<Path>) -> Result<RunSummary, CoreError> {
        let output = output.as_ref();
        let titles = self.fetch_recent_titles().await?;
        let written = Self::append_titles_to_log(&titles, output)?;
        debug!("Wrote {} lines to {}", written, output.display());

        Ok(RunSummary {
            feed: self.feed.name().to_string(),
            fetched: titles.len(),
            written,
            output: output.to_path_buf(),
        })
    }
}
