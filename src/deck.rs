//! A deck of cards.

use std::iter::FromIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// Attempted to draw from a deck with no cards left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deck is empty")]
pub struct EmptyDeck;

/// A deck of cards, used as a stack. The top of the deck is the last card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck<C> {
    cards: Vec<C>,
}

impl<C> Default for Deck<C> {
    fn default() -> Self {
        Self { cards: vec![] }
    }
}

impl<C> FromIterator<C> for Deck<C> {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let cards = iter.into_iter().collect();
        Self { cards }
    }
}

impl<C> IntoIterator for Deck<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl<C> Deck<C> {
    /// Creates an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of cards remaining in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if there are no cards left.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffles the deck in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes the top card from the deck.
    pub fn draw(&mut self) -> Result<C, EmptyDeck> {
        self.cards.pop().ok_or(EmptyDeck)
    }

    /// Places a card on top of the deck.
    pub fn add(&mut self, card: C) {
        self.cards.push(card);
    }

    /// Draws `n` cards, in the order they come off the top. Takes nothing if the deck is short.
    pub fn deal(&mut self, n: usize) -> Result<Vec<C>, EmptyDeck> {
        let idx = self.cards.len().checked_sub(n).ok_or(EmptyDeck)?;
        let mut cards = self.cards.split_off(idx);
        cards.reverse();
        Ok(cards)
    }

    /// The top card, if any.
    pub fn top(&self) -> Option<&C> {
        self.cards.last()
    }

    /// A mutable reference to the top card, if any.
    pub fn top_mut(&mut self) -> Option<&mut C> {
        self.cards.last_mut()
    }

    /// Iterates from the bottom of the deck to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.cards.iter()
    }

    pub(crate) fn as_slice(&self) -> &[C] {
        &self.cards
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.cards
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_draw_takes_from_top() {
        let mut deck: Deck<u8> = (1..=3).collect();
        assert_eq!(deck.draw(), Ok(3));
        assert_eq!(deck.len(), 2);
        deck.add(9);
        assert_eq!(deck.top(), Some(&9));
        assert_eq!(deck.draw(), Ok(9));
        assert_eq!(deck.draw(), Ok(2));
        assert_eq!(deck.draw(), Ok(1));
        assert!(deck.is_empty());
        assert_matches!(deck.draw(), Err(EmptyDeck));
    }

    #[test]
    fn test_deal() {
        let mut deck: Deck<u8> = (1..=5).collect();
        assert_eq!(deck.deal(2), Ok(vec![5, 4]));
        assert_eq!(deck.deal(4), Err(EmptyDeck));
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.deal(3), Ok(vec![3, 2, 1]));
        assert_eq!(deck.deal(0), Ok(vec![]));
    }
}
