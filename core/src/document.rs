use crate::config::SNIPPET_CHARS;
use crate::tokenizer::Tokenizer;
use crate::DocId;
use std::collections::HashMap;

/// An ingested document. Term frequencies are computed once, at construction.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub text: String,
    pub term_freq: HashMap<String, u32>,
}

impl Document {
    pub fn new(id: DocId, title: impl Into<String>, text: impl Into<String>, tokenizer: &Tokenizer) -> Self {
        let text = text.into();
        let mut term_freq: HashMap<String, u32> = HashMap::new();
        for term in tokenizer.tokenize(&text) {
            *term_freq.entry(term).or_insert(0) += 1;
        }
        Self { id, title: title.into(), text, term_freq }
    }

    pub fn snippet(&self) -> String {
        self.text.chars().take(SNIPPET_CHARS).collect()
    }
}
