use std::collections::BTreeSet;

use crate::stop_words::StopWords;
use crate::tokenizer::tokenize;

/// Prefix marking a term that disqualifies every document containing it.
pub const MINUS_PREFIX: char = '-';

/// A parsed query. Both sets collapse duplicates and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    plus: BTreeSet<String>,
    minus: BTreeSet<String>,
}

impl Query {
    /// Tokenize `text`, drop stop words and split the rest into plus and minus terms.
    ///
    /// A `-` token with nothing after it is ignored, as is a minus token whose
    /// remainder is a stop word.
    pub fn parse(text: &str, stop_words: &StopWords) -> Self {
        let mut query = Query::default();
        for word in tokenize(text, stop_words) {
            match word.strip_prefix(MINUS_PREFIX) {
                Some("") => tracing::debug!("ignoring bare minus token"),
                Some(rest) if stop_words.is_stop_word(rest) => {
                    tracing::debug!(term = rest, "ignoring minus stop word");
                }
                Some(rest) => {
                    query.minus.insert(rest.to_string());
                }
                None => {
                    query.plus.insert(word.to_string());
                }
            }
        }
        query
    }

    pub fn plus(&self) -> &BTreeSet<String> { &self.plus }

    pub fn minus(&self) -> &BTreeSet<String> { &self.minus }

    pub fn is_empty(&self) -> bool { self.plus.is_empty() && self.minus.is_empty() }
}
