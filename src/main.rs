use reddit_client::RedditProvider;
use scraper_core::{CoreError, ErrorExt, ErrorReporter, ScraperConfig};
use std::process::ExitCode;
use title_collector::FeedTitleCollector;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "title_scraper=info,title_collector=info,reddit_client=info,scraper_core=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ScraperConfig::default();
    tracing::info!("Starting reddit title scraper for r/{}", config.feed_name);

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = ErrorReporter::new().report_error(&e);
            eprintln!("{}", e.user_friendly_message());
            ExitCode::from(code)
        }
    }
}

async fn run(config: &ScraperConfig) -> Result<(), CoreError> {
    let provider = RedditProvider::new();
    let collector = FeedTitleCollector::connect(
        &provider,
        &config.login_file,
        &config.feed_name,
        &config.user_agent,
    )
    .await?
    .with_fetch_limit(config.fetch_limit);

    let summary = collector.run(&config.output_file).await?;
    tracing::info!(
        "Appended {} of {} titles from r/{} to {}",
        summary.written,
        summary.fetched,
        summary.feed,
        summary.output.display()
    );
    Ok(())
}
