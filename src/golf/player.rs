//! Player identity and turn order.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A player, numbered from 1 in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl PlayerId {
    /// The first player.
    pub const FIRST: PlayerId = PlayerId(1);

    /// Creates a [`PlayerId`] from a 1-based player number.
    pub fn new(number: u8) -> Self {
        assert!(number >= 1, "players are numbered from 1");
        Self(number)
    }

    /// Creates a [`PlayerId`] from a 0-based index.
    pub fn from_index(index: usize) -> Self {
        let number = u8::try_from(index + 1).expect("less than 256");
        Self::new(number)
    }

    /// The 1-based player number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// The 0-based index, for indexing per-player collections.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Returns an abbreviated name for the player.
    pub fn to_abbr(self) -> String {
        format!("P{}", self.number())
    }

    /// The next player in turn order, wrapping back to the first.
    pub fn next(self, players: u8) -> PlayerId {
        if self.0 >= players {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    /// The next N players in turn order, starting with this one.
    pub fn order(self, players: u8) -> Vec<PlayerId> {
        let mut order = vec![self];
        let mut player = self;
        for _ in 1..players {
            player = player.next(players);
            order.push(player);
        }
        order
    }

    /// All players, in numeric order.
    pub fn all(players: u8) -> impl Iterator<Item = PlayerId> {
        (1..=players).map(PlayerId)
    }
}
