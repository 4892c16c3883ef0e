//! Turning RSS bytes into an ordered, truncated list of [`Post`]s.

use std::ops::Range;

use chrono::{DateTime, FixedOffset};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::Post;
use crate::error::{Error, Result};

const CHANNEL: &[u8] = b"channel";

/// Parse a feed body and keep the `limit` newest posts.
///
/// The root element, whatever its name, must have a direct `<channel>`
/// child; a root that closes without one is [`Error::MissingChannel`].
/// Bytes that are not a complete XML document are [`Error::MalformedFeed`].
/// Individual items are handled leniently, see [`parse_channel`].
pub fn parse_feed(bytes: &[u8], limit: usize) -> Result<Vec<Post>> {
    let outline = scan(bytes)?;
    let Some(span) = outline.channel else {
        return Err(Error::MissingChannel);
    };

    let channel = if outline.rss_root {
        ::rss::Channel::read_from(bytes)
    } else {
        // The `rss` crate only accepts `<rss>`/`<rdf:RDF>` roots.
        tracing::debug!("re-rooting channel under <rss>");
        let wrapped = [&b"<rss version=\"2.0\">"[..], &bytes[span], &b"</rss>"[..]].concat();
        ::rss::Channel::read_from(wrapped.as_slice())
    }
    .map_err(|e| Error::MalformedFeed(e.to_string()))?;

    let mut posts = parse_channel(&channel);
    let total = posts.len();

    // `sort_by` is stable, so posts with the same date keep feed order.
    posts.sort_by(Post::newest_first);
    posts.truncate(limit);

    tracing::debug!(parsed = total, kept = posts.len(), "feed parsed");
    Ok(posts)
}

/// Convert every usable item of a channel, in feed order.
///
/// Items without a title or a link are dropped. A `pubDate` that cannot be
/// read leaves the post undated instead of failing the feed.
pub fn parse_channel(channel: &::rss::Channel) -> Vec<Post> {
    channel
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let title = item.title().unwrap_or_default().trim();
            let url = item.link().unwrap_or_default().trim();

            if title.is_empty() || url.is_empty() {
                tracing::debug!(index, title, url, "skipping item without title or link");
                return None;
            }

            let published = match item.pub_date().map(str::trim) {
                Some(raw) if !raw.is_empty() => {
                    let parsed = parse_pub_date(raw);
                    if parsed.is_none() {
                        tracing::debug!(index, raw, "unparsable pubDate");
                    }
                    parsed
                }
                _ => None,
            };

            Some(Post {
                title: title.to_string(),
                url: url.to_string(),
                published,
            })
        })
        .collect()
}

/// RFC 2822 date, tolerating a day-of-week that disagrees with the date.
///
/// chrono rejects `Mon, 01 Jan 2020 ...` because that day was a Wednesday.
/// The weekday is optional in RFC 2822, so on failure it is dropped and the
/// rest parsed again.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw).ok().or_else(|| {
        let (weekday, rest) = raw.split_once(',')?;
        let weekday = weekday.trim();
        if weekday.is_empty() || !weekday.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        DateTime::parse_from_rfc2822(rest.trim_start()).ok()
    })
}

/// Where the channel sits in a well-formed document.
struct Outline {
    /// Root is `<rss>` or `<rdf:RDF>`, which the `rss` crate reads directly.
    rss_root: bool,
    /// Byte span of the first `<channel>` directly under the root.
    channel: Option<Range<usize>>,
}

/// Walk the document once to check it is complete and find the channel.
fn scan(bytes: &[u8]) -> Result<Outline> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut rss_root = None;
    let mut channel = None;
    let mut channel_start = 0;
    let mut depth: usize = 0;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::MalformedFeed(e.to_string()))?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    rss_root = Some(is_rss_root(e.name().as_ref()));
                } else if depth == 1 && channel.is_none() && e.name().as_ref() == CHANNEL {
                    channel_start = before;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    rss_root = Some(is_rss_root(e.name().as_ref()));
                    break;
                }
                if depth == 1 && channel.is_none() && e.name().as_ref() == CHANNEL {
                    channel = Some(before..after);
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 1 && channel.is_none() && e.name().as_ref() == CHANNEL {
                    channel = Some(channel_start..after);
                }
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                let reason = if rss_root.is_none() {
                    "no root element"
                } else {
                    "document ends inside an open element"
                };
                return Err(Error::MalformedFeed(reason.to_string()));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(Outline {
        rss_root: rss_root.unwrap_or(false),
        channel,
    })
}

fn is_rss_root(name: &[u8]) -> bool {
    name == b"rss" || name == b"rdf:RDF"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
