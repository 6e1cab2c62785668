use crate::corpus::Corpus;
use crate::vector::TermWeights;
use crate::DocId;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub doc_id: DocId,
    pub title: String,
    /// Cosine similarity between the document's TF-IDF vector and the query vector.
    pub rank: f64,
    /// Query terms found in the document, in query order.
    pub matched_terms: Vec<String>,
    pub snippet: String,
}

/// Ranks documents of a borrowed corpus by cosine similarity to a query.
pub struct QueryEngine<'a> {
    corpus: &'a Corpus,
}

impl<'a> QueryEngine<'a> {
    pub fn new(corpus: &'a Corpus) -> Self { Self { corpus } }

    /// Ranked results, best first. Documents sharing no term with the query are not
    /// returned; an empty vector means nothing matched.
    ///
    /// The query vector is built per document and holds only the query terms that the
    /// document contains, each with weight 1. Query terms unknown to the corpus therefore
    /// never affect a score.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let mut query_terms: Vec<String> = Vec::new();
        for term in self.corpus.tokenizer().tokenize(query) {
            if !query_terms.contains(&term) {
                query_terms.push(term);
            }
        }
        if query_terms.is_empty() {
            return Vec::new();
        }

        // Only documents posted under some query term can overlap with the query.
        let candidates = self.corpus.index().candidates(query_terms.iter().map(String::as_str));
        let mut results = Vec::with_capacity(candidates.len());
        for doc_id in candidates {
            let Some(doc) = self.corpus.document(doc_id) else { continue };
            let doc_vector = self.corpus.tfidf_vector(doc);
            let query_vector = restricted_query_vector(&query_terms, &doc_vector);
            if query_vector.is_empty() {
                continue;
            }
            // A zero-norm document cannot be ranked. A lone document still comes back at
            // rank 0 so that querying its own terms finds it.
            let rank = match cosine(&doc_vector, &query_vector) {
                Some(rank) => rank,
                None if self.corpus.document_count() == 1 => 0.0,
                None => continue,
            };
            let matched_terms: Vec<String> = query_terms
                .iter()
                .filter(|t| query_vector.contains(t))
                .cloned()
                .collect();
            results.push(SearchResult {
                doc_id,
                title: doc.title.clone(),
                rank,
                matched_terms,
                snippet: doc.snippet(),
            });
        }

        // Stable: equal ranks keep ascending id order.
        results.sort_by(|a, b| b.rank.partial_cmp(&a.rank).unwrap_or(Ordering::Equal));
        tracing::debug!(query, hits = results.len(), "search complete");
        results
    }
}

fn restricted_query_vector(query_terms: &[String], doc_vector: &TermWeights) -> TermWeights {
    query_terms
        .iter()
        .filter(|t| doc_vector.contains(t))
        .map(|t| (t.clone(), 1.0))
        .collect()
}

/// Cosine similarity, or `None` when either vector has zero norm.
fn cosine(doc_vector: &TermWeights, query_vector: &TermWeights) -> Option<f64> {
    let denominator = doc_vector.norm() * query_vector.norm();
    if denominator == 0.0 {
        return None;
    }
    Some(doc_vector.dot(query_vector) / denominator)
}
