//! A small in-memory full-text search engine ranking documents with TF-IDF.
//!
//! Build a [`SearchIndex`] once through an [`IndexBuilder`], then query it
//! any number of times with [`SearchIndex::find_top_documents`].

pub mod error;
pub mod index;
pub mod query;
pub mod stop_words;
pub mod tokenizer;
pub mod weight;

pub use error::{Result, SearchError};
pub use index::{
    DocId, IndexBuilder, Posting, ScoredDocument, SearchConfig, SearchIndex,
    MAX_RESULT_DOCUMENT_COUNT,
};
pub use query::Query;
pub use stop_words::StopWords;
