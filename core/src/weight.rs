//! Checked term weights. Neither type can hold a value produced by a zero
//! division or a logarithm outside its domain.

use crate::error::{Result, SearchError};

/// Share of a document's filtered tokens taken up by one term.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TermFrequency(f64);

impl TermFrequency {
    pub fn new(occurrences: usize, length: usize) -> Result<Self> {
        if length == 0 || occurrences == 0 || occurrences > length {
            return Err(SearchError::InvalidTermFrequency { occurrences, length });
        }
        Ok(Self(occurrences as f64 / length as f64))
    }

    pub fn value(self) -> f64 { self.0 }
}

/// `ln(document_count / containing)`; always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct InverseDocumentFrequency(f64);

impl InverseDocumentFrequency {
    pub fn new(term: &str, document_count: usize, containing: usize) -> Result<Self> {
        if document_count == 0 || containing == 0 || containing > document_count {
            return Err(SearchError::DegenerateIdf {
                term: term.to_string(),
                document_count,
                containing,
            });
        }
        Ok(Self((document_count as f64 / containing as f64).ln()))
    }

    pub fn value(self) -> f64 { self.0 }
}
