//! One pass of the pipeline.
//!
//! read document → ensure section → fetch → parse → render → splice →
//! write if changed. Each step runs once, in that order, and the first
//! failure ends the run.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::readme::normalize_newlines;
use crate::render::render;
use crate::source::{rss, FeedSource};

/// What a successful run did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was rewritten with this many posts.
    Updated { posts: usize },
    /// The new content matched the file; nothing was written.
    Unchanged,
}

/// Run the pipeline against `source`, updating `config.readme_path` in place.
pub fn run(config: &Config, source: &dyn FeedSource) -> Result<Outcome> {
    let path = config.readme_path.as_path();
    let markers = config.markers();

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let original = normalize_newlines(&raw);

    let doc = markers.ensure_section(&original);

    let bytes = source.fetch()?;
    let posts = rss::parse_feed(&bytes, config.post_limit())?;
    let body = render(&posts);
    let updated = markers.replace_between(&doc, &body)?;

    if updated == *original {
        tracing::debug!(path = %path.display(), "document already up to date");
        return Ok(Outcome::Unchanged);
    }

    write_document(path, &updated)?;
    tracing::debug!(path = %path.display(), posts = posts.len(), "document written");
    Ok(Outcome::Updated { posts: posts.len() })
}

fn write_document(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// The single status line printed after a successful run.
pub struct Report<'a> {
    pub outcome: &'a Outcome,
    pub config: &'a Config,
    pub feed_url: &'a str,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.config.readme_path.display();
        match self.outcome {
            Outcome::Updated { posts } => {
                write!(f, "Updated {path} with {posts} posts from {}", self.feed_url)
            }
            Outcome::Unchanged => write!(f, "No changes needed in {path}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result as FeedResult};
    use clap::Parser;
    use std::cell::Cell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const START: &str = "<!-- LAMOUCHE:POSTS_START -->";
    const END: &str = "<!-- LAMOUCHE:POSTS_END -->";

    /// In-memory feed that counts how often it was fetched.
    struct StaticFeed {
        body: String,
        fetches: Cell<usize>,
    }

    impl StaticFeed {
        fn new(body: impl Into<String>) -> Self {
            Self {
                body: body.into(),
                fetches: Cell::new(0),
            }
        }
    }

    impl FeedSource for StaticFeed {
        fn url(&self) -> &str {
            "memory://feed"
        }

        fn fetch(&self) -> FeedResult<Vec<u8>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.body.clone().into_bytes())
        }
    }

    fn feed(items: &[(&str, &str, &str)]) -> String {
        let items: String = items
            .iter()
            .map(|(t, l, d)| {
                format!("<item><title>{t}</title><link>{l}</link><pubDate>{d}</pubDate></item>")
            })
            .collect();
        format!(r#"<rss version="2.0"><channel><title>t</title>{items}</channel></rss>"#)
    }

    fn setup(contents: &str, max_posts: &str) -> (TempDir, PathBuf, Config) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, contents).unwrap();

        let config = Config::try_parse_from([
            "readme-posts",
            "--readme-path",
            path.to_str().unwrap(),
            "--max-posts",
            max_posts,
            "--start-marker",
            START,
            "--end-marker",
            END,
            "--heading",
            "### Latest posts",
        ])
        .unwrap();
        (dir, path, config)
    }

    #[test]
    fn creates_section_and_writes_posts() {
        let (_dir, path, config) = setup("# Hello\n", "5");
        let source = StaticFeed::new(feed(&[
            ("A", "urlA", "Wed, 01 Jan 2020 00:00:00 GMT"),
            ("B", "urlB", ""),
        ]));

        let outcome = run(&config, &source).unwrap();
        assert_eq!(outcome, Outcome::Updated { posts: 2 });

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            format!(
                "# Hello\n\n### Latest posts\n\n{START}\n- [A](urlA) — 2020-01-01\n- [B](urlB)\n{END}\n\n"
            )
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let (_dir, path, config) = setup("# Hello\n", "5");
        let source = StaticFeed::new(feed(&[("A", "urlA", "Wed, 01 Jan 2020 00:00:00 GMT")]));

        assert!(matches!(run(&config, &source).unwrap(), Outcome::Updated { .. }));
        let first = fs::read(&path).unwrap();
        let first_modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(run(&config, &source).unwrap(), Outcome::Unchanged);
        assert_eq!(fs::read(&path).unwrap(), first);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), first_modified);
        assert_eq!(source.fetches.get(), 2);
    }

    #[test]
    fn respects_post_limit() {
        let (_dir, path, config) = setup(&format!("{START}\n{END}\n"), "1");
        let source = StaticFeed::new(feed(&[
            ("old", "u1", "Mon, 01 Jan 2024 00:00:00 +0000"),
            ("new", "u2", "Wed, 01 Jan 2025 00:00:00 +0000"),
        ]));

        assert_eq!(run(&config, &source).unwrap(), Outcome::Updated { posts: 1 });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{START}\n- [new](u2) — 2025-01-01\n{END}\n")
        );
    }

    #[test]
    fn negative_limit_renders_placeholder() {
        let (_dir, path, config) = setup(&format!("{START}\nold\n{END}\n"), "-1");
        let source = StaticFeed::new(feed(&[("A", "urlA", "")]));

        assert_eq!(run(&config, &source).unwrap(), Outcome::Updated { posts: 0 });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{START}\n- _No posts found._\n{END}\n")
        );
    }

    #[test]
    fn crlf_document_with_same_content_is_not_rewritten() {
        let contents = format!("# Hi\r\n{START}\r\n- [A](urlA)\r\n{END}\r\n");
        let (_dir, path, config) = setup(&contents, "5");
        let source = StaticFeed::new(feed(&[("A", "urlA", "")]));

        assert_eq!(run(&config, &source).unwrap(), Outcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn missing_document_fails_before_fetching() {
        let (dir, _path, mut config) = setup("", "5");
        config.readme_path = dir.path().join("absent.md");
        let source = StaticFeed::new(feed(&[]));

        let err = run(&config, &source).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
        assert_eq!(source.fetches.get(), 0);
    }

    #[test]
    fn feed_without_channel_leaves_document_untouched() {
        let (_dir, path, config) = setup("# Hello\n", "5");
        let source = StaticFeed::new(r#"<rss version="2.0"></rss>"#);

        let err = run(&config, &source).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MissingChannel)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello\n");
    }

    #[test]
    fn misordered_markers_fail_the_run() {
        let (_dir, path, config) = setup(&format!("{END}\n{START}\n"), "5");
        let source = StaticFeed::new(feed(&[]));

        let err = run(&config, &source).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Markers)));
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{END}\n{START}\n"));
    }

    #[test]
    fn report_lines() {
        let (_dir, path, config) = setup("", "5");
        let updated = Report {
            outcome: &Outcome::Updated { posts: 3 },
            config: &config,
            feed_url: "https://example.com/rss",
        };
        assert_eq!(
            updated.to_string(),
            format!("Updated {} with 3 posts from https://example.com/rss", path.display())
        );

        let unchanged = Report {
            outcome: &Outcome::Unchanged,
            config: &config,
            feed_url: "https://example.com/rss",
        };
        assert_eq!(unchanged.to_string(), format!("No changes needed in {}", path.display()));
    }
}
