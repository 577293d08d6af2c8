use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Occurrence counts of tokens within one token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounter {
    counts: HashMap<String, usize>,
    total: usize,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = Self::new();
        counter.update(tokens);
        counter
    }

    pub fn add(&mut self, token: &str) {
        *self.counts.entry(token.to_owned()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn update<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.add(token.as_ref());
        }
    }

    /// Count of `token`, zero when never seen.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of tokens counted, repeats included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

/// Document frequencies: for each token, the number of documents containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DocumentCounter {
    counts: HashMap<String, usize>,
    n_documents: usize,
}

impl DocumentCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = Self::new();
        for document in documents {
            counter.add_document(document);
        }
        counter
    }

    /// Counts each distinct token of `document` once.
    pub fn add_document<D, S>(&mut self, document: D)
    where
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        for token in document {
            let token = token.as_ref();
            if seen.insert(token.to_owned()) {
                *self.counts.entry(token.to_owned()).or_insert(0) += 1;
            }
        }
        self.n_documents += 1;
    }

    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
