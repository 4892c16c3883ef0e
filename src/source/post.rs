//! The record passed from the parser to the renderer.

use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;

/// A single feed entry that made it through parsing.
///
/// `title` and `url` are always non-empty; the parser drops items where
/// either is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Trimmed `<title>` text.
    pub title: String,

    /// Trimmed `<link>` text.
    pub url: String,

    /// Parsed `<pubDate>`, keeping the offset the feed wrote it in.
    ///
    /// `None` when the date was missing or unreadable; such posts
    /// sort after every dated post.
    pub published: Option<DateTime<FixedOffset>>,
}

// ---------------------------------------------------------------------------
// Ordering — newest first
// ---------------------------------------------------------------------------

impl Post {
    /// Comparator for newest-first ordering.
    ///
    /// `None` is less than any `Some(_)`, so reversing the comparison sinks
    /// undated posts to the bottom. Offsets do not matter: instants are
    /// compared.
    pub fn newest_first(a: &Post, b: &Post) -> Ordering {
        b.published.cmp(&a.published)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
