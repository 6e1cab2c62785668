use std::collections::HashMap;

/// Sparse term → weight vector. A term that is not stored has weight 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeights {
    weights: HashMap<String, f64>,
}

impl TermWeights {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, term: impl Into<String>, weight: f64) {
        self.weights.insert(term.into(), weight);
    }

    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    /// True when the term has an entry, even one whose weight is 0.
    pub fn contains(&self, term: &str) -> bool { self.weights.contains_key(term) }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Sum of products over terms stored in both vectors.
    pub fn dot(&self, other: &TermWeights) -> f64 {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .weights
            .iter()
            .filter_map(|(t, w)| large.weights.get(t).map(|o| w * o))
            .sum()
    }
}

impl FromIterator<(String, f64)> for TermWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { weights: iter.into_iter().collect() }
    }
}
