use crate::document::Document;
use crate::DocId;
use std::collections::{BTreeSet, HashMap};

/// Term → posting set, plus a per-term document frequency counter.
///
/// Documents are registered once and never removed, so `df[t]` always equals
/// `postings[t].len()`.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<DocId>>,
    df: HashMap<String, u32>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Post every distinct term of `doc`. Repetition inside the document does not count.
    pub fn register(&mut self, doc: &Document) {
        for term in doc.term_freq.keys() {
            let inserted = self.postings.entry(term.clone()).or_default().insert(doc.id);
            if inserted {
                *self.df.entry(term.clone()).or_insert(0) += 1;
            }
        }
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    pub fn postings(&self, term: &str) -> Option<&BTreeSet<DocId>> {
        self.postings.get(term)
    }

    pub fn vocabulary_size(&self) -> usize { self.postings.len() }

    /// Union of the posting sets of `terms`, in ascending id order.
    pub fn candidates<'a, I>(&self, terms: I) -> BTreeSet<DocId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = BTreeSet::new();
        for term in terms {
            if let Some(p) = self.postings.get(term) {
                out.extend(p.iter().copied());
            }
        }
        out
    }
}
