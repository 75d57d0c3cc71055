//! Error types

use std::io;

use super::{ActionType, PlayerId};
use crate::deck::EmptyDeck;

/// A move that the rules don't allow. The player may try again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// Hand positions run from 1 to 6.
    #[error("there is no card at position {0}")]
    PositionOutOfRange(u8),

    /// Only face-down cards may be turned over.
    #[error("the card at position {0} is already face up")]
    AlreadyFaceUp(u8),

    /// The key doesn't correspond to anything the player may do right now.
    #[error("[{key}] is not a way to {action}")]
    InvalidKey { key: u8, action: ActionType },
}

/// The match configuration is out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("please enter a number of players between 2 and 4, not {0}")]
    Players(u8),
    #[error("please enter a number of rounds between 1 and 9, not {0}")]
    Rounds(u8),
}

#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("deck is missing cards")]
    IncompleteDeck,
    #[error("hands must hold exactly six cards")]
    InvalidHandSize,
    #[error("tried to draw from an empty pile")]
    EmptyDeck(#[from] EmptyDeck),
    #[error("action contains invalid data")]
    InvalidActionData,
    #[error("expected {player} to {action}")]
    ExpectActioned { player: PlayerId, action: ActionType },
    #[error("round over")]
    RoundOver,
    #[error("round still in progress")]
    RoundInProgress,
    #[error(transparent)]
    Player(#[from] PlayerError),
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("quit")]
    Quit,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}
