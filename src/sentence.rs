//! Sentence segmentation.
//!
//! Text is split after one or more terminal marks (`.`, `!`, `?`) that are
//! followed by whitespace. Marks at the very end of the input stay attached to
//! the last sentence.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("Invalid sentence break regex"));

/// Splits text into trimmed, non-empty sentences in reading order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        SENTENCE_BREAK
            .split(text.trim())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
