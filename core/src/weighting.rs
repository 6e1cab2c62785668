use crate::corpus::Corpus;
use crate::document::Document;
use crate::vector::TermWeights;

/// `ln(n / df)`, or 0 when the term was never seen.
pub fn idf(n: usize, df: u32) -> f64 {
    if df == 0 || n == 0 {
        return 0.0;
    }
    (n as f64 / df as f64).ln()
}

impl Corpus {
    /// IDF against the live document count. Values shift with every ingestion, so weights
    /// are only comparable within one stable corpus snapshot.
    pub fn idf(&self, term: &str) -> f64 {
        idf(self.document_count(), self.document_frequency(term))
    }

    /// Raw term frequency × IDF for every term of `doc`.
    pub fn tfidf_vector(&self, doc: &Document) -> TermWeights {
        doc.term_freq
            .iter()
            .map(|(term, tf)| (term.clone(), *tf as f64 * self.idf(term)))
            .collect()
    }
}
