//! In-memory TF-IDF retrieval: tokenization, inverted indexing, cosine-ranked search and
//! precision/recall evaluation.

pub mod config;
pub mod corpus;
pub mod document;
pub mod evaluation;
pub mod index;
pub mod loader;
pub mod query;
pub mod tokenizer;
pub mod vector;
pub mod weighting;

pub type DocId = u32;

pub use corpus::{Corpus, SharedCorpus};
pub use document::Document;
pub use query::{QueryEngine, SearchResult};
pub use vector::TermWeights;
