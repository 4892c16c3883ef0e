//! Where posts come from.
//!
//! [`FeedSource`] is the seam between the network and the rest of the
//! pipeline: [`HttpSource`] is the real implementation, tests substitute an
//! in-memory one. Turning the fetched bytes into [`Post`]s is the job of
//! [`rss::parse_feed`].

mod http;
mod post;
pub mod rss;

pub use http::HttpSource;
pub use post::Post;

use crate::error::Result;

/// Anything that can hand back the raw bytes of a feed.
pub trait FeedSource {
    /// The location being fetched, for status messages.
    fn url(&self) -> &str;

    /// Fetch the feed body. Called exactly once per run.
    fn fetch(&self) -> Result<Vec<u8>>;
}
