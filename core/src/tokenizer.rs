use crate::config::DEFAULT_STOPWORDS;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[a-z]+").expect("valid regex");
    static ref DEFAULT: Tokenizer = Tokenizer::default();
}

/// Turns raw text into index terms: lowercase ASCII letter runs with stop words removed.
///
/// Anything that is not a letter separates terms. There is no stemming, so "learning"
/// and "learn" are distinct terms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Tokenizer {
    pub fn with_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { stopwords }
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        RE.find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|t| !self.is_stopword(t))
            .map(str::to_string)
            .collect()
    }
}

/// Tokenize with the default stop-word set.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT.tokenize(text)
}
