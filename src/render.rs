//! Markdown rendering of the post list.
//!
//! Pure functions: no I/O, no configuration. The output is what ends up
//! between the markers, so it always ends in exactly one newline.

use crate::source::Post;

/// Body written when the feed yields nothing usable.
pub const NO_POSTS: &str = "- _No posts found._";

/// Render posts as a markdown bullet list.
///
/// `- [title](url) — YYYY-MM-DD`, with the date taken in the feed's own
/// offset and left off when the post is undated.
pub fn render(posts: &[Post]) -> String {
    if posts.is_empty() {
        return format!("{NO_POSTS}\n");
    }

    let mut out = String::new();
    for post in posts {
        out.push_str(&bullet(post));
        out.push('\n');
    }
    out
}

fn bullet(post: &Post) -> String {
    match post.published {
        Some(date) => format!(
            "- [{}]({}) — {}",
            post.title,
            post.url,
            date.date_naive().format("%Y-%m-%d")
        ),
        None => format!("- [{}]({})", post.title, post.url),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
