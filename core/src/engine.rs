use crate::index::InvertedIndex;
use crate::rank::Bm25Ranker;
use serde::Serialize;
use serde_json::{Map, Value};

/// One document row: arbitrary metadata fields owned by the caller. The
/// engine reads it only at index build and result assembly.
pub type Document = Map<String, Value>;

/// Ordered list of candidate text fields for a document row; the first
/// candidate holding a string wins, resolved once per document.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    candidates: Vec<String>,
}

impl FieldSelector {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { candidates: candidates.into_iter().map(Into::into).collect() }
    }

    /// Selector over a single field name.
    pub fn field(name: impl Into<String>) -> Self {
        Self { candidates: vec![name.into()] }
    }

    /// The row's text: value of the first candidate field holding a string.
    /// Missing or non-string fields fall through; no candidate matches means
    /// an empty text, never a fault.
    pub fn extract<'a>(&self, document: &'a Document) -> &'a str {
        for name in &self.candidates {
            if let Some(Value::String(text)) = document.get(name) {
                return text;
            }
        }
        ""
    }
}

/// A ranked hit: the original row's fields flattened together with the raw
/// BM25 `score` and `pct_relevance`, the score scaled to 0-100 relative to
/// the best hit of this result set (not comparable across queries).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: Document,
    pub score: f64,
    pub pct_relevance: f64,
}

/// Owns a document collection, the inverted index built over its text field,
/// and the ranker. Rebuilding for a changed collection means constructing a
/// new engine (see [`crate::handle::EngineHandle`] for atomic swap).
pub struct SearchEngine {
    documents: Vec<Document>,
    index: InvertedIndex,
    ranker: Bm25Ranker,
}

impl SearchEngine {
    pub fn new(documents: Vec<Document>, selector: FieldSelector) -> Self {
        Self::with_ranker(documents, selector, Bm25Ranker::default())
    }

    pub fn with_ranker(
        documents: Vec<Document>,
        selector: FieldSelector,
        ranker: Bm25Ranker,
    ) -> Self {
        let index = InvertedIndex::build(documents.iter().map(|doc| selector.extract(doc)));
        Self { documents, index, ranker }
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Rank the collection against `query` and re-join each hit's original
    /// metadata. `pct_relevance` is normalized over the current result set's
    /// best score; a best score of 0 yields 0 for every hit, and an empty
    /// result set stays empty.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let ranked = self.ranker.score(&self.index, query, top_k);
        let max_score = ranked.first().map_or(0.0, |&(_, score)| score);

        let hits: Vec<SearchHit> = ranked
            .into_iter()
            .map(|(doc_id, score)| {
                let pct_relevance = if max_score > 0.0 {
                    score / max_score * 100.0
                } else {
                    0.0
                };
                SearchHit {
                    document: self.documents[doc_id as usize].clone(),
                    score,
                    pct_relevance,
                }
            })
            .collect();

        tracing::debug!(query, hits = hits.len(), "search complete");
        hits
    }
}
