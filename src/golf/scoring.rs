//! Scoring.
//!
//! A hand is scored column by column. A column whose two cards are both face up and of the same
//! rank is worth nothing, whatever the rank. Otherwise each face-up card in the column counts on
//! its own, and face-down cards count for nothing until they are revealed.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, Hand, PlayerId, Rank};

/// The points for a single face-up card.
pub fn card_points(rank: Rank) -> i32 {
    match rank {
        Rank::Two => -2,
        Rank::Jack | Rank::Queen => 10,
        Rank::King => 0,
        _ => i32::from(rank.value()),
    }
}

/// The points for one column of a hand.
pub fn column_score(top: Card, bottom: Card) -> i32 {
    if top.is_face_up() && bottom.is_face_up() && top.rank == bottom.rank {
        return 0;
    }
    [top, bottom]
        .iter()
        .filter(|c| c.is_face_up())
        .map(|c| card_points(c.rank))
        .sum()
}

/// The points for a hand, counting only face-up cards.
pub fn hand_score(hand: &Hand) -> i32 {
    hand.columns().map(|(top, bottom)| column_score(top, bottom)).sum()
}

/// The best placed player, or a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(PlayerId),
    Tie,
}

impl Winner {
    /// The lowest score wins, unless two or more players share it.
    pub fn lowest_unique(scores: &[i32]) -> Self {
        let Some(&min) = scores.iter().min() else {
            return Winner::Tie;
        };
        match scores.iter().positions(|&s| s == min).exactly_one() {
            Ok(index) => Winner::Player(PlayerId::from_index(index)),
            Err(_) => Winner::Tie,
        }
    }

    /// The lowest score wins, but any two equal scores make it a tie, even if neither of them is
    /// the lowest.
    pub fn lowest_all_distinct(scores: &[i32]) -> Self {
        if !scores.iter().all_unique() {
            return Winner::Tie;
        }
        match scores.iter().position_min() {
            Some(index) => Winner::Player(PlayerId::from_index(index)),
            None => Winner::Tie,
        }
    }
}
