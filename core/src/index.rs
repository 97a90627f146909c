use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, SearchError};
use crate::query::Query;
use crate::stop_words::StopWords;
use crate::tokenizer::tokenize;
use crate::weight::{InverseDocumentFrequency, TermFrequency};

pub type DocId = u32;

/// Default cap on the number of ranked results.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub stop_words: StopWords,
    pub max_results: usize,
}

impl SearchConfig {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, max_results: MAX_RESULT_DOCUMENT_COUNT }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self { Self::new(StopWords::new()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: f64,
}

/// Accumulates documents; [`IndexBuilder::build`] turns it into a queryable [`SearchIndex`].
#[derive(Debug)]
pub struct IndexBuilder {
    config: SearchConfig,
    postings: HashMap<String, Vec<Posting>>, // postings sorted by doc_id
    num_docs: DocId,
    expected_docs: Option<usize>,
}

impl IndexBuilder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, postings: HashMap::new(), num_docs: 0, expected_docs: None }
    }

    /// Declare how many documents the corpus claims to hold. The idf
    /// denominator is always the number actually added; this value is only
    /// checked against it in [`IndexBuilder::build`].
    pub fn expect_document_count(&mut self, count: usize) -> &mut Self {
        self.expected_docs = Some(count);
        self
    }

    pub fn document_count(&self) -> usize { self.num_docs as usize }

    /// Index `text` under the next free id and return that id.
    ///
    /// A document with no terms left after stop-word removal still takes an id
    /// and counts toward the corpus size, but can never be matched.
    pub fn add_document(&mut self, text: &str) -> Result<DocId> {
        let doc_id = self.num_docs;
        let words = tokenize(text, &self.config.stop_words);
        self.num_docs += 1;

        if words.is_empty() {
            tracing::warn!(doc_id, "document has no terms after stop-word removal");
            return Ok(doc_id);
        }

        let mut tf_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for word in &words {
            *tf_counts.entry(*word).or_insert(0) += 1;
        }
        for (term, occurrences) in tf_counts {
            let tf = TermFrequency::new(occurrences, words.len())?;
            self.postings
                .entry(term.to_string())
                .or_default()
                .push(Posting { doc_id, tf: tf.value() });
        }
        tracing::debug!(doc_id, num_terms = words.len(), "indexed document");
        Ok(doc_id)
    }

    /// Like [`IndexBuilder::add_document`] for callers that number documents
    /// themselves; `doc_id` must be the next id in sequence.
    pub fn add_document_with_id(&mut self, doc_id: DocId, text: &str) -> Result<DocId> {
        if doc_id != self.num_docs {
            return Err(SearchError::NonSequentialDocumentId {
                expected: self.num_docs,
                got: doc_id,
            });
        }
        self.add_document(text)
    }

    pub fn build(self) -> Result<SearchIndex> {
        let indexed = self.num_docs as usize;
        if let Some(declared) = self.expected_docs {
            if declared != indexed {
                return Err(SearchError::InconsistentDocumentCount { declared, indexed });
            }
        }
        tracing::info!(num_docs = indexed, num_terms = self.postings.len(), "index build complete");
        Ok(SearchIndex { config: self.config, postings: self.postings, num_docs: self.num_docs })
    }
}

/// Immutable term -> document index ranked with TF-IDF.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    config: SearchConfig,
    postings: HashMap<String, Vec<Posting>>,
    num_docs: DocId,
}

impl SearchIndex {
    pub fn builder(config: SearchConfig) -> IndexBuilder { IndexBuilder::new(config) }

    pub fn document_count(&self) -> usize { self.num_docs as usize }

    pub fn term_count(&self) -> usize { self.postings.len() }

    pub fn max_results(&self) -> usize { self.config.max_results }

    pub fn stop_words(&self) -> &StopWords { &self.config.stop_words }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> Option<f64> {
        let plist = self.postings.get(term)?;
        plist
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| plist[i].tf)
    }

    pub fn parse_query(&self, raw_query: &str) -> Query {
        Query::parse(raw_query, &self.config.stop_words)
    }

    /// Rank documents for `raw_query`: relevance descending, ties by ascending
    /// id, at most `max_results` entries.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let query = self.parse_query(raw_query);
        let mut matched = self.find_all_documents(&query)?;
        matched.sort_by(|lhs, rhs| {
            rhs.relevance
                .total_cmp(&lhs.relevance)
                .then_with(|| lhs.id.cmp(&rhs.id))
        });
        matched.truncate(self.config.max_results);
        Ok(matched)
    }

    /// Every document matching at least one plus term and no minus term, in id order.
    pub fn find_all_documents(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
        let mut doc_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for term in query.plus() {
            let Some(plist) = self.postings.get(term) else { continue };
            let idf = InverseDocumentFrequency::new(term, self.document_count(), plist.len())?;
            for p in plist {
                *doc_to_relevance.entry(p.doc_id).or_insert(0.0) += idf.value() * p.tf;
            }
        }

        for term in query.minus() {
            if let Some(plist) = self.postings.get(term) {
                for p in plist {
                    doc_to_relevance.remove(&p.doc_id);
                }
            }
        }

        tracing::debug!(
            plus = query.plus().len(),
            minus = query.minus().len(),
            matched = doc_to_relevance.len(),
            "evaluated query"
        );
        Ok(doc_to_relevance
            .into_iter()
            .map(|(id, relevance)| ScoredDocument { id, relevance })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(stop: &str, docs: &[&str]) -> SearchIndex {
        let mut builder = IndexBuilder::new(SearchConfig::new(StopWords::from_text(stop)));
        for doc in docs {
            builder.add_document(doc).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn repeated_terms_accumulate_tf() {
        let idx = build("", &["cat cat dog mouse"]);
        assert_eq!(idx.term_frequency("cat", 0), Some(0.5));
        assert_eq!(idx.term_frequency("dog", 0), Some(0.25));
        assert_eq!(idx.term_frequency("bird", 0), None);
    }

    #[test]
    fn stop_words_do_not_count_toward_length() {
        let idx = build("a on", &["cat on a mat"]);
        assert_eq!(idx.term_frequency("cat", 0), Some(0.5));
        assert_eq!(idx.document_frequency("on"), 0);
    }

    #[test]
    fn ids_are_dense_from_zero() {
        let mut builder = IndexBuilder::new(SearchConfig::default());
        assert_eq!(builder.add_document("x").unwrap(), 0);
        assert_eq!(builder.add_document("").unwrap(), 1);
        assert_eq!(builder.add_document_with_id(2, "y").unwrap(), 2);
        assert_eq!(
            builder.add_document_with_id(5, "z"),
            Err(SearchError::NonSequentialDocumentId { expected: 3, got: 5 })
        );
        assert_eq!(builder.build().unwrap().document_count(), 3);
    }

    #[test]
    fn declared_count_is_validated() {
        let mut builder = IndexBuilder::new(SearchConfig::default());
        builder.expect_document_count(3);
        builder.add_document("one").unwrap();
        builder.add_document("two").unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            SearchError::InconsistentDocumentCount { declared: 3, indexed: 2 }
        );
    }

    #[test]
    fn term_in_every_document_scores_zero() {
        let idx = build("", &["cat", "cat dog"]);
        let results = idx.find_top_documents("cat").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.relevance == 0.0));
        assert_eq!(results[0].id, 0);
    }

    #[test]
    fn max_results_is_configurable() {
        let mut builder = IndexBuilder::new(SearchConfig::default().with_max_results(2));
        for _ in 0..4 {
            builder.add_document("cat").unwrap();
        }
        builder.add_document("dog").unwrap();
        let idx = builder.build().unwrap();
        assert_eq!(idx.find_top_documents("cat").unwrap().len(), 2);
    }

    #[test]
    fn empty_index_matches_nothing() {
        let idx = build("", &[]);
        assert!(idx.find_top_documents("cat").unwrap().is_empty());
    }
}
