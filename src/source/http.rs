//! Fetching the feed over HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use super::FeedSource;
use crate::error::Result;

const USER_AGENT: &str = "update-readme-posts/1.0 (+https://github.com/blamouche)";
const ACCEPT_FEED: &str = "application/rss+xml, application/xml, text/xml;q=0.9, */*;q=0.8";
const TIMEOUT: Duration = Duration::from_secs(30);

/// A feed served over HTTP(S).
///
/// One GET per [`fetch`](FeedSource::fetch), no retries. Timeouts and non-2xx
/// statuses both come back as [`Error::Fetch`](crate::error::Error::Fetch).
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FEED));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl FeedSource for HttpSource {
    fn url(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!(url = %self.url, "fetching feed");

        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .bytes()?;

        tracing::debug!(url = %self.url, bytes = body.len(), "feed fetched");
        Ok(body.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
