use std::collections::HashSet;

use crate::tokenizer::split_into_words;

/// Terms excluded from indexing and from query interpretation.
///
/// Matching is byte-exact: no case folding or normalization is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Registers every space-separated word of `text`.
    pub fn from_text(text: &str) -> Self {
        split_into_words(text).into_iter().collect()
    }

    pub fn is_stop_word(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { words: iter.into_iter().map(Into::into).collect() }
    }
}
