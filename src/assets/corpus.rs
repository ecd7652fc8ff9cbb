use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{LegibilityError, LegibilityResult};

/// Default minimum token count for a text unit.
pub const MIN_UNIT_TOKENS: usize = 3;

/// An immutable sentence split into whitespace tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextUnit {
    tokens: Vec<String>,
}

impl TextUnit {
    /// Build a unit from already split tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Tokens in original order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Token count.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the unit has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Passage used when no corpus file is configured: the opening of *Pride and Prejudice*.
pub const BUILTIN_CORPUS: &str = "It is a truth universally acknowledged, that a single man in \
possession of a good fortune, must be in want of a wife. However little known the feelings or \
views of such a man may be on his first entering a neighbourhood, this truth is so well fixed \
in the minds of the surrounding families, that he is considered the rightful property of some \
one or other of their daughters. \"My dear Mr. Bennet,\" said his lady to him one day, \"have \
you heard that Netherfield Park is let at last?\" Mr. Bennet replied that he had not. \"But it \
is,\" returned she; \"for Mrs. Long has just been here, and she told me all about it.\" Mr. \
Bennet made no answer. \"Do you not want to know who has taken it?\" cried his wife \
impatiently. \"You want to tell me, and I have no objection to hearing it.\" This was \
invitation enough.";

/// Read a corpus file as UTF-8 text.
pub fn load_corpus(path: &Path) -> LegibilityResult<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read corpus from '{}'", path.display()))?;
    Ok(raw)
}

/// Split raw text into sentences and keep those with at least `min_tokens` tokens.
///
/// A sentence ends at `.`, `!` or `?` followed by one or more spaces. Line breaks do not end
/// a sentence; they only separate tokens.
pub fn split_units(raw: &str, min_tokens: usize) -> Vec<TextUnit> {
    split_sentences(raw)
        .into_iter()
        .map(|s| TextUnit::new(s.split_whitespace().map(str::to_string).collect()))
        .filter(|u| u.len() >= min_tokens.max(1))
        .collect()
}

/// Like [`split_units`] but fails with [`LegibilityError::CorpusTooSmall`] when nothing
/// survives the filter.
pub fn units_from_text(raw: &str, min_tokens: usize) -> LegibilityResult<Vec<TextUnit>> {
    let units = split_units(raw, min_tokens);
    if units.is_empty() {
        return Err(LegibilityError::CorpusTooSmall { min_tokens });
    }
    tracing::info!(units = units.len(), "loaded corpus");
    Ok(units)
}

fn split_sentences(raw: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = raw.char_indices().peekable();
    while let Some((i, ch)) = iter.next() {
        if ch == ' ' && matches!(prev, Some('.' | '!' | '?')) {
            out.push(&raw[start..i]);
            let mut next = i + 1;
            while let Some(&(j, ' ')) = iter.peek() {
                next = j + 1;
                iter.next();
            }
            start = next;
            prev = Some(' ');
            continue;
        }
        prev = Some(ch);
    }
    out.push(&raw[start..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/corpus.rs"]
mod tests;
