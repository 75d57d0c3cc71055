//! A player's hand.

use std::convert::TryFrom;

use delegate::delegate;

use super::{Card, Deck, PlayerError, RoundError};

/// The number of cards in a hand.
pub const HAND_SIZE: usize = 6;

/// The number of columns in a hand.
pub const COLUMNS: usize = HAND_SIZE / 2;

/// A hand of six cards, laid out in two rows of three.
///
/// Players refer to cards by position, from 1 to 6. Positions 1-3 are the top row, and 4-6 are
/// the bottom row, so that positions `n` and `n + 3` form a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Deck,
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = RoundError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        if cards.len() == HAND_SIZE {
            Ok(Self {
                cards: cards.into_iter().collect(),
            })
        } else {
            Err(RoundError::InvalidHandSize)
        }
    }
}

/// Converts a player-facing position into an index.
fn index(pos: u8) -> Result<usize, PlayerError> {
    match usize::from(pos) {
        p @ 1..=HAND_SIZE => Ok(p - 1),
        _ => Err(PlayerError::PositionOutOfRange(pos)),
    }
}

impl Hand {
    delegate! {
        to self.cards {
            pub fn len(&self) -> usize;
            pub fn iter(&self) -> std::slice::Iter<'_, Card>;
        }
    }

    /// Returns the card at the specified position.
    pub fn card(&self, pos: u8) -> Result<Card, PlayerError> {
        Ok(self.cards.as_slice()[index(pos)?])
    }

    /// Turns over the card at the specified position, which must be face down.
    pub fn flip(&mut self, pos: u8) -> Result<Card, PlayerError> {
        let card = &mut self.cards.as_mut_slice()[index(pos)?];
        if card.is_face_up() {
            return Err(PlayerError::AlreadyFaceUp(pos));
        }
        card.flip_up();
        Ok(*card)
    }

    /// Puts a card at the specified position, returning the card that was there.
    pub fn replace(&mut self, pos: u8, card: Card) -> Result<Card, PlayerError> {
        let slot = &mut self.cards.as_mut_slice()[index(pos)?];
        Ok(std::mem::replace(slot, card))
    }

    /// The number of face-up cards.
    pub fn face_up_count(&self) -> usize {
        self.iter().filter(|c| c.is_face_up()).count()
    }

    /// Returns true once every card has been turned over.
    pub fn all_face_up(&self) -> bool {
        self.face_up_count() == self.len()
    }

    /// Turns over every remaining face-down card.
    pub fn reveal_all(&mut self) {
        for card in self.cards.as_mut_slice() {
            card.flip_up();
        }
    }

    /// Iterates over the (top, bottom) pairs of each column, from left to right.
    pub fn columns(&self) -> impl Iterator<Item = (Card, Card)> + '_ {
        let cards = self.cards.as_slice();
        (0..COLUMNS).map(move |col| (cards[col], cards[col + COLUMNS]))
    }

    /// Iterates over the rows, top first, with the position of each card.
    pub fn rows(&self) -> impl Iterator<Item = Vec<(u8, Card)>> + '_ {
        let cards = self.cards.as_slice();
        cards.chunks(COLUMNS).enumerate().map(|(row, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(col, &card)| (position(row * COLUMNS + col), card))
                .collect()
        })
    }
}

/// Converts an index into a player-facing position.
fn position(index: usize) -> u8 {
    u8::try_from(index + 1).expect("less than 256")
}

#[cfg(test)]
pub(crate) mod test {
    use assert_matches::assert_matches;

    use super::*;

    /// Builds a hand from rank symbols; a trailing `^` marks a face-up card.
    pub(crate) fn hand(cards: [&str; HAND_SIZE]) -> Hand {
        let cards: Vec<Card> = cards.iter().map(|s| s.parse().unwrap()).collect();
        Hand::try_from(cards).unwrap()
    }

    #[test]
    fn test_hand_size() {
        let cards: Vec<Card> = ["A", "2", "3"].iter().map(|s| s.parse().unwrap()).collect();
        assert_matches!(Hand::try_from(cards), Err(RoundError::InvalidHandSize));
    }

    #[test]
    fn test_flip() {
        let mut h = hand(["A", "2", "3", "4", "5^", "6"]);
        assert_eq!(h.face_up_count(), 1);
        assert!(h.flip(1).unwrap().is_face_up());
        assert_matches!(h.flip(1), Err(PlayerError::AlreadyFaceUp(1)));
        assert_matches!(h.flip(5), Err(PlayerError::AlreadyFaceUp(5)));
        assert_matches!(h.flip(0), Err(PlayerError::PositionOutOfRange(0)));
        assert_matches!(h.flip(7), Err(PlayerError::PositionOutOfRange(7)));
        assert_eq!(h.face_up_count(), 2);
        assert!(!h.all_face_up());
        h.reveal_all();
        assert!(h.all_face_up());
    }

    #[test]
    fn test_replace() {
        let mut h = hand(["A", "2", "3", "4", "5", "6"]);
        let new: Card = "K".parse().unwrap();
        let old = h.replace(3, new).unwrap();
        assert_eq!(old, "3".parse::<Card>().unwrap());
        assert_eq!(h.card(3).unwrap(), new);
        assert_eq!(h.len(), HAND_SIZE);
        assert_matches!(h.replace(9, new), Err(PlayerError::PositionOutOfRange(9)));
    }

    #[test]
    fn test_columns_and_rows() {
        let h = hand(["A", "2", "3", "4", "5", "6"]);
        let columns: Vec<_> = h.columns().map(|(t, b)| (t.value(), b.value())).collect();
        assert_eq!(columns, vec![(1, 4), (2, 5), (3, 6)]);
        let rows: Vec<Vec<u8>> = h
            .rows()
            .map(|row| row.into_iter().map(|(pos, _)| pos).collect())
            .collect();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }
}
