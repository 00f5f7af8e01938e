use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// Inverted index over a fixed document collection, with the per-document
/// length bookkeeping BM25 needs. Built once per corpus; immutable after
/// construction, so a rebuild is a fresh instance.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// term -> doc id -> occurrence count in that document
    pub postings: HashMap<String, HashMap<DocId, u32>>,
    /// token count per document, indexed by doc id
    pub doc_lengths: Vec<u32>,
    pub doc_count: u32,
    pub avg_doc_length: f64,
}

impl InvertedIndex {
    /// Build an index over an ordered sequence of document texts. The doc id
    /// is the 0-based position in the sequence; empty texts are permitted and
    /// recorded with length 0. Never fails: an empty sequence produces a
    /// degenerate index with `doc_count` 0 and `avg_doc_length` 0.
    pub fn build<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut postings: HashMap<String, HashMap<DocId, u32>> = HashMap::new();
        let mut doc_lengths: Vec<u32> = Vec::new();

        for (doc_id, text) in texts.into_iter().enumerate() {
            let tokens = tokenize(text.as_ref());
            doc_lengths.push(tokens.len() as u32);

            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }
            for (term, count) in freqs {
                postings.entry(term).or_default().insert(doc_id as DocId, count);
            }
        }

        let doc_count = doc_lengths.len() as u32;
        let total_len: u64 = doc_lengths.iter().map(|&len| u64::from(len)).sum();
        let avg_doc_length = if doc_count == 0 {
            0.0
        } else {
            total_len as f64 / f64::from(doc_count)
        };

        tracing::debug!(doc_count, terms = postings.len(), "built inverted index");
        Self { postings, doc_lengths, doc_count, avg_doc_length }
    }

    /// Number of documents containing `term` at least once; 0 for terms
    /// outside the vocabulary.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.postings.get(term).map_or(0, |docs| docs.len() as u32)
    }

    /// Token count of a document; 0 for out-of-range ids.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths.get(doc_id as usize).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }
}
