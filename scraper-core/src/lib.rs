pub mod credentials;
pub mod error;
pub mod error_utils;
pub mod feed;
pub mod title_log;
pub mod types;

pub use credentials::*;
pub use error::*;
pub use error_utils::*;
pub use feed::*;
pub use title_log::*;
pub use types::*;
