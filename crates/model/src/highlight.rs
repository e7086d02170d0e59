use std::collections::BTreeSet;

use crate::message::RecommendationCard;

/// The set of marker identifiers the map should visually emphasize.
///
/// A signal is always replaced as a whole, never merged with the
/// previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HighlightSignal(BTreeSet<String>);

impl HighlightSignal {
    /// Builds a signal containing the id of every card.
    pub fn from_cards<'a, I>(cards: I) -> Self
    where
        I: IntoIterator<Item = &'a RecommendationCard>,
    {
        Self(cards.into_iter().map(|card| card.id.clone()).collect())
    }

    /// Returns `true` if markers with `id` should be emphasized.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns `true` if nothing is emphasized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of emphasized identifiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the identifiers in lexical order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HighlightSignal {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
