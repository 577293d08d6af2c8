use indexmap::IndexSet;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A fixed token → index mapping.
///
/// Indices follow the order in which tokens first appear in the training
/// documents, so building twice from the same documents yields the same
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Vocabulary {
    tokens: IndexSet<String>,
}

impl Vocabulary {
    pub fn build<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for document in documents {
            for token in document {
                vocabulary.insert(token.as_ref());
            }
        }
        vocabulary
    }

    pub(crate) fn insert(&mut self, token: &str) -> usize {
        match self.tokens.get_index_of(token) {
            Some(index) => index,
            None => self.tokens.insert_full(token.to_owned()).0,
        }
    }

    /// Index of `token`, `None` for tokens outside the vocabulary.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let docs = vec![vec!["b", "a", "b"], vec!["c", "a"]];
        let vocab = Vocabulary::build(&docs);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("b"), Some(0));
        assert_eq!(vocab.index_of("a"), Some(1));
        assert_eq!(vocab.index_of("c"), Some(2));
        assert_eq!(vocab.index_of("z"), None);
        assert_eq!(vocab.token(2), Some("c"));
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(vocab, Vocabulary::build(&docs));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_keeps_indices() {
        let vocab = Vocabulary::build(vec![vec!["x", "y"], vec!["w", "x"]]);
        let json = serde_json::to_string(&vocab).unwrap();
        let restored: Vocabulary = serde_json::from_str(&json).unwrap();
        for token in ["x", "y", "w"] {
            assert_eq!(vocab.index_of(token), restored.index_of(token));
        }
    }
}
