//! Runtime configuration.
//!
//! Every option is read once at startup from a long flag or, failing that,
//! from the matching environment variable.

use std::path::PathBuf;

use clap::Parser;

use crate::readme::Markers;

pub const DEFAULT_FEED_URL: &str = "https://lamouche.fr/index.xml";
pub const DEFAULT_START_MARKER: &str = "<!-- LAMOUCHE:POSTS_START -->";
pub const DEFAULT_END_MARKER: &str = "<!-- LAMOUCHE:POSTS_END -->";
pub const DEFAULT_HEADING: &str = "### Latest posts";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "readme-posts",
    version,
    about = "Rewrite the latest-posts section of a README from an RSS feed"
)]
pub struct Config {
    /// Document to update
    #[arg(long, env = "README_PATH", default_value = "README.md", value_name = "FILE")]
    pub readme_path: PathBuf,

    /// RSS feed to read posts from
    #[arg(long, env = "FEED_URL", default_value = DEFAULT_FEED_URL, value_name = "URL")]
    pub feed_url: String,

    /// Maximum number of posts to list (negative values mean zero)
    #[arg(
        long,
        env = "MAX_POSTS",
        default_value_t = 5,
        allow_negative_numbers = true,
        value_name = "N"
    )]
    pub max_posts: i64,

    /// Line that opens the managed region
    #[arg(long, env = "START_MARKER", default_value = DEFAULT_START_MARKER)]
    pub start_marker: String,

    /// Line that closes the managed region
    #[arg(long, env = "END_MARKER", default_value = DEFAULT_END_MARKER)]
    pub end_marker: String,

    /// Heading written above the section when it has to be created
    #[arg(long, env = "SECTION_HEADING", default_value = DEFAULT_HEADING)]
    pub heading: String,
}

impl Config {
    /// `max_posts` clamped to zero.
    pub fn post_limit(&self) -> usize {
        usize::try_from(self.max_posts.max(0)).unwrap_or(usize::MAX)
    }

    pub fn markers(&self) -> Markers<'_> {
        Markers {
            start: &self.start_marker,
            end: &self.end_marker,
            heading: &self.heading,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
