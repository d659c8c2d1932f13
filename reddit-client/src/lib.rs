//! Reddit implementation of the feed provider traits: password-grant login
//! and paging through a subreddit's `new` listing.

pub mod api;
pub mod auth;
pub mod endpoints;
pub mod provider;


pub use api::{RedditApiClient, RedditListing, RedditPostData, MAX_PAGE_SIZE};
pub use auth::{RedditAuthenticator, RedditToken};
pub use endpoints::RedditEndpoints;
pub use provider::{normalize_subreddit_name, RedditFeed, RedditProvider, RedditSession};
