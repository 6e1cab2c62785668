use crate::document::Document;
use crate::index::InvertedIndex;
use crate::query::{QueryEngine, SearchResult};
use crate::tokenizer::Tokenizer;
use crate::DocId;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns every ingested document together with the inverted index built from them.
///
/// Identifiers are handed out in increasing order and never reused. Ingesting the same
/// text twice yields two documents; there is no deduplication.
#[derive(Debug, Default)]
pub struct Corpus {
    docs: BTreeMap<DocId, Document>,
    index: InvertedIndex,
    next_id: DocId,
    tokenizer: Tokenizer,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer, ..Self::default() }
    }

    pub fn ingest(&mut self, title: impl Into<String>, text: impl Into<String>) -> DocId {
        let id = self.next_id;
        self.next_id += 1;
        let doc = Document::new(id, title, text, &self.tokenizer);
        self.index.register(&doc);
        tracing::debug!(doc_id = id, terms = doc.term_freq.len(), "ingested document");
        self.docs.insert(id, doc);
        id
    }

    /// N, the number of ingested documents.
    pub fn document_count(&self) -> usize { self.docs.len() }

    pub fn document_frequency(&self, term: &str) -> u32 { self.index.document_frequency(term) }

    pub fn document(&self, id: DocId) -> Option<&Document> { self.docs.get(&id) }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        QueryEngine::new(self).search(query)
    }
}

/// A corpus shared between threads.
///
/// One reader-writer lock covers both the document store and the index, so a reader
/// never sees a stored document whose postings are missing. Ingestion is exclusive;
/// searches run concurrently with each other.
#[derive(Debug, Clone, Default)]
pub struct SharedCorpus {
    inner: Arc<RwLock<Corpus>>,
}

impl SharedCorpus {
    pub fn new(corpus: Corpus) -> Self {
        Self { inner: Arc::new(RwLock::new(corpus)) }
    }

    pub fn ingest(&self, title: impl Into<String>, text: impl Into<String>) -> DocId {
        self.inner.write().ingest(title, text)
    }

    /// Ingest a batch under one write lock; readers see all of it or none of it.
    pub fn ingest_all<I, T, B>(&self, docs: I) -> Vec<DocId>
    where
        I: IntoIterator<Item = (T, B)>,
        T: Into<String>,
        B: Into<String>,
    {
        let mut corpus = self.inner.write();
        docs.into_iter().map(|(title, text)| corpus.ingest(title, text)).collect()
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.inner.read().search(query)
    }

    pub fn document_count(&self) -> usize { self.inner.read().document_count() }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.inner.read().document_frequency(term)
    }

    /// Hold a read guard across several operations that must see one snapshot.
    pub fn read(&self) -> RwLockReadGuard<'_, Corpus> { self.inner.read() }
}
