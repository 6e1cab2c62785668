//! Engine-wide constants.

/// Number of characters of source text carried in a search result snippet.
pub const SNIPPET_CHARS: usize = 300;

/// Stop words removed by the default tokenizer.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "is", "are", "to", "of", "in", "on", "for", "with", "by",
];
