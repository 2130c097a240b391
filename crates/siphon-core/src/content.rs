//! Normalized text content passed between matchers, selectors and extractors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref SPECIAL_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9\s.]+").unwrap();
}

/// A document, or a selected slice of one, in the three views the engine
/// works with: the raw text, a sanitized form, and the sanitized form split
/// into words.
///
/// A `Content` is only ever produced by [`Content::new`], so the sanitized
/// text and word list are always consistent derivations of the original
/// text. Values are never mutated after construction; every selector
/// application produces a fresh `Content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    original_text: String,
    sanitized_text: String,
    words: Vec<String>,
}

impl Content {
    /// Normalize raw text into a `Content`.
    ///
    /// Sanitization collapses every whitespace run to a single space, drops
    /// characters that are not letters, digits, whitespace or periods, and
    /// trims the result. Words are the sanitized text split on single
    /// spaces. Removing punctuation between separators can leave empty
    /// words; they are kept as-is.
    pub fn new(original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        let collapsed = WHITESPACE_RUN.replace_all(&original_text, " ");
        let sanitized_text = SPECIAL_CHARS
            .replace_all(&collapsed, "")
            .trim()
            .to_string();
        let words = sanitized_text.split(' ').map(str::to_string).collect();

        Self {
            original_text,
            sanitized_text,
            words,
        }
    }

    /// Content with no text at all.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// The raw text as supplied.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The whitespace-collapsed, punctuation-stripped view of the text.
    pub fn sanitized_text(&self) -> &str {
        &self.sanitized_text
    }

    /// The sanitized text split on single spaces.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
