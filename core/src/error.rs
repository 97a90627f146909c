use thiserror::Error;

use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The corpus declared one document count but a different number was indexed.
    #[error("declared {declared} documents but {indexed} were indexed")]
    InconsistentDocumentCount { declared: usize, indexed: usize },

    /// Ids must be handed out densely from 0 in insertion order.
    #[error("document id {got} is out of sequence, expected {expected}")]
    NonSequentialDocumentId { expected: DocId, got: DocId },

    #[error("no idf for term {term:?}: {containing} of {document_count} documents contain it")]
    DegenerateIdf { term: String, document_count: usize, containing: usize },

    #[error("invalid term frequency: {occurrences} occurrences in a document of {length} terms")]
    InvalidTermFrequency { occurrences: usize, length: usize },
}
