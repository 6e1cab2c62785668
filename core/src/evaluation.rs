//! Precision / recall / F1 against externally supplied relevance judgments.
//!
//! Identifier collections are treated as sets: duplicates collapse before counting.

use crate::corpus::Corpus;
use crate::DocId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Literal query string → identifiers of the documents expected to be relevant.
pub type Judgments = BTreeMap<String, BTreeSet<DocId>>;

fn overlap(relevant: &HashSet<DocId>, retrieved: &HashSet<DocId>) -> usize {
    relevant.intersection(retrieved).count()
}

/// `|relevant ∩ retrieved| / |retrieved|`, 0 if nothing was retrieved.
pub fn precision<R, Q>(relevant: R, retrieved: Q) -> f64
where
    R: IntoIterator<Item = DocId>,
    Q: IntoIterator<Item = DocId>,
{
    let relevant: HashSet<DocId> = relevant.into_iter().collect();
    let retrieved: HashSet<DocId> = retrieved.into_iter().collect();
    if retrieved.is_empty() {
        return 0.0;
    }
    overlap(&relevant, &retrieved) as f64 / retrieved.len() as f64
}

/// `|relevant ∩ retrieved| / |relevant|`, 0 if nothing is relevant.
pub fn recall<R, Q>(relevant: R, retrieved: Q) -> f64
where
    R: IntoIterator<Item = DocId>,
    Q: IntoIterator<Item = DocId>,
{
    let relevant: HashSet<DocId> = relevant.into_iter().collect();
    let retrieved: HashSet<DocId> = retrieved.into_iter().collect();
    if relevant.is_empty() {
        return 0.0;
    }
    overlap(&relevant, &retrieved) as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall, 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMetrics {
    pub query: String,
    pub retrieved: BTreeSet<DocId>,
    pub relevant: BTreeSet<DocId>,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Run every judged query against `corpus` and score the retrieved id sets.
pub fn evaluate(corpus: &Corpus, judgments: &Judgments) -> Vec<QueryMetrics> {
    let metrics: Vec<QueryMetrics> = judgments
        .iter()
        .map(|(query, relevant)| {
            let retrieved: BTreeSet<DocId> = corpus.search(query).into_iter().map(|r| r.doc_id).collect();
            let p = precision(relevant.iter().copied(), retrieved.iter().copied());
            let r = recall(relevant.iter().copied(), retrieved.iter().copied());
            QueryMetrics {
                query: query.clone(),
                retrieved,
                relevant: relevant.clone(),
                precision: p,
                recall: r,
                f1: f1(p, r),
            }
        })
        .collect();
    tracing::info!(queries = metrics.len(), "evaluation complete");
    metrics
}

/// Macro-averaged (precision, recall, f1); zeros when there are no queries.
pub fn mean_metrics(metrics: &[QueryMetrics]) -> (f64, f64, f64) {
    if metrics.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let n = metrics.len() as f64;
    let (p, r, f) = metrics
        .iter()
        .fold((0.0, 0.0, 0.0), |(p, r, f), m| (p + m.precision, r + m.recall, f + m.f1));
    (p / n, r / n, f / n)
}
