use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::tokenize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_K1: f64 = 1.5;
pub const DEFAULT_B: f64 = 0.75;

/// BM25 scoring parameters. `k1` controls term-frequency saturation and must
/// be positive; `b` in [0, 1] controls how strongly document length is
/// normalized (0 disables, 1 fully penalizes).
#[derive(Debug, Clone, Copy)]
pub struct Bm25Ranker {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Ranker {
    fn default() -> Self {
        Self { k1: DEFAULT_K1, b: DEFAULT_B }
    }
}

impl Bm25Ranker {
    pub fn new(k1: f64, b: f64) -> Self {
        Self { k1, b }
    }

    /// Smoothed inverse document frequency:
    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`. Finite and non-negative for
    /// every df in [0, N], including terms outside the vocabulary (df = 0).
    pub fn idf(&self, index: &InvertedIndex, term: &str) -> f64 {
        let n = f64::from(index.doc_count);
        let df = f64::from(index.document_frequency(term));
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Score the corpus against `query`, returning up to `top_k`
    /// (doc id, score) pairs sorted by descending score, ties broken by
    /// ascending doc id. Documents no query term touches are absent from the
    /// result rather than scored 0; query terms outside the vocabulary
    /// contribute nothing.
    pub fn score(&self, index: &InvertedIndex, query: &str, top_k: usize) -> Vec<(DocId, f64)> {
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        for term in tokenize(query) {
            // idf applies once per distinct query term
            if !seen.insert(term.clone()) {
                continue;
            }
            let postings = match index.postings.get(&term) {
                Some(postings) => postings,
                None => continue,
            };
            let idf = self.idf(index, &term);
            for (&doc_id, &count) in postings {
                let f = f64::from(count);
                // avg_doc_length is 0 only for a degenerate index; scoring
                // must stay total, so that case contributes 0.
                let contribution = if index.avg_doc_length > 0.0 {
                    let dl = f64::from(index.doc_length(doc_id));
                    let denom =
                        f + self.k1 * (1.0 - self.b + self.b * dl / index.avg_doc_length);
                    idf * (f * (self.k1 + 1.0)) / denom
                } else {
                    0.0
                };
                *scores.entry(doc_id).or_insert(0.0) += contribution;
            }
        }

        let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(top_k);
        ranked
    }
}
