use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Represents a single tokenized document with its label.
///
/// L: The type of the label (e.g., String, i8, enum).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DataPoint<L>
where
    L: Clone + Eq + std::hash::Hash + Debug,
{
    pub tokens: Vec<String>,
    pub label: L,
}

impl<L> DataPoint<L>
where
    L: Clone + Eq + std::hash::Hash + Debug,
{
    pub fn new<I, S>(tokens: I, label: L) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataPoint {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label,
        }
    }

    /// Splits a raw sentence on whitespace.
    pub fn from_text(text: &str, label: L) -> Self {
        Self::new(text.split_whitespace(), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_on_whitespace() {
        let point = DataPoint::from_text("  the cat\tsat ", "joy");
        assert_eq!(point.tokens, vec!["the", "cat", "sat"]);
        assert_eq!(point.label, "joy");
    }
}
