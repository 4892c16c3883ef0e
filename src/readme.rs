//! Splicing rendered output into the target document.
//!
//! The document is only ever touched between two marker lines. Everything
//! outside them, the markers included, is carried over byte for byte.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Body placed in a freshly created section until the first replace.
pub const LOADING: &str = "- _Loading…_";

/// The strings that locate and, if needed, create the managed region.
#[derive(Debug, Clone, Copy)]
pub struct Markers<'a> {
    pub start: &'a str,
    pub end: &'a str,
    /// Heading line written above a newly created section.
    pub heading: &'a str,
}

impl Markers<'_> {
    /// Make sure the document contains both markers.
    ///
    /// A document that already has them is returned as is. Otherwise trailing
    /// whitespace is trimmed and a new section is appended:
    ///
    /// ```text
    /// <document>
    ///
    /// ### Latest posts
    ///
    /// <!-- START -->
    /// - _Loading…_
    /// <!-- END -->
    ///
    /// ```
    pub fn ensure_section<'d>(&self, doc: &'d str) -> Cow<'d, str> {
        if doc.contains(self.start) && doc.contains(self.end) {
            return Cow::Borrowed(doc);
        }

        tracing::debug!(start = self.start, "markers not found, appending section");
        Cow::Owned(format!(
            "{}\n\n{}\n\n{}\n{LOADING}\n{}\n\n",
            doc.trim_end(),
            self.heading,
            self.start,
            self.end,
        ))
    }

    /// Replace whatever sits between the markers with `body`.
    ///
    /// Uses the first occurrence of each marker. Fails with [`Error::Markers`]
    /// if either is missing or the end marker does not come after the start
    /// marker.
    pub fn replace_between(&self, doc: &str, body: &str) -> Result<String> {
        let (Some(start), Some(end)) = (doc.find(self.start), doc.find(self.end)) else {
            return Err(Error::Markers);
        };

        let start_end = start + self.start.len();
        if end < start_end {
            return Err(Error::Markers);
        }

        let before = &doc[..start_end];
        let after = &doc[end..];

        let mut out = String::with_capacity(doc.len() + body.len() + 2);
        out.push_str(before);
        if !before.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(after);
        Ok(out)
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
