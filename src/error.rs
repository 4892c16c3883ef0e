//! Errors raised by the feed and document stages.
//!
//! Document I/O is reported through [`anyhow`] with context in
//! [`crate::update`]; everything with a domain meaning lives here.

use thiserror::Error;

/// Failures that abort a run.
///
/// A bad `pubDate` on a single item is not represented here: the parser
/// downgrades it to "no timestamp" instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure, timeout, or non-2xx response.
    #[error("failed to fetch feed")]
    Fetch(#[from] reqwest::Error),

    /// The document has no `<channel>` under its root element.
    #[error("Expected RSS feed with <channel> root child.")]
    MissingChannel,

    /// The feed bytes are not a complete, well-formed XML document.
    #[error("malformed feed XML: {0}")]
    MalformedFeed(String),

    /// The start/end markers are absent or in the wrong order.
    #[error("Markers missing or out of order in README.")]
    Markers,
}

pub type Result<T> = std::result::Result<T, Error>;
