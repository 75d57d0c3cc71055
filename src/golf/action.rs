//! Actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{PlayerError, PlayerId};

/// The key for drawing from the stock.
pub const STOCK_KEY: u8 = 7;

/// The key for the discard pile.
pub const DISCARD_KEY: u8 = 8;

/// The piles a player may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pile {
    /// The face-down stock.
    Stock,
    /// The face-up discard pile.
    Discard,
}

impl Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Pile::Stock => "stock",
            Pile::Discard => "discard pile",
        })
    }
}

/// Types of actions that a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Turn over one of two cards at the start of the round.
    Flip,
    /// Draw from the stock or the discard pile.
    Draw,
    /// Swap the drawn card into the hand, or throw it away.
    Place,
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionType::Flip => "flip a card",
            ActionType::Draw => "draw",
            ActionType::Place => "place the card",
        })
    }
}

impl ActionType {
    /// The keys that are meaningful for this type of action.
    pub fn valid_keys(self) -> &'static [u8] {
        match self {
            ActionType::Flip => &[1, 2, 3, 4, 5, 6],
            ActionType::Draw => &[STOCK_KEY, DISCARD_KEY],
            ActionType::Place => &[1, 2, 3, 4, 5, 6, DISCARD_KEY],
        }
    }

    /// Translates a key press into an action payload.
    pub fn decode(self, key: u8) -> Result<ActionData, PlayerError> {
        Ok(match (self, key) {
            (ActionType::Flip, 1..=6) => ActionData::Flip { pos: key },
            (ActionType::Draw, STOCK_KEY) => ActionData::Draw { pile: Pile::Stock },
            (ActionType::Draw, DISCARD_KEY) => ActionData::Draw {
                pile: Pile::Discard,
            },
            (ActionType::Place, 1..=6) => ActionData::Swap { pos: key },
            (ActionType::Place, DISCARD_KEY) => ActionData::Discard,
            (action, key) => return Err(PlayerError::InvalidKey { key, action }),
        })
    }
}

/// The payload for actions that a player can take during the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionData {
    /// Turn over the face-down card at a hand position (1-6).
    Flip { pos: u8 },

    /// Draw from a pile. A card drawn from the stock is turned face up for the player to see.
    Draw { pile: Pile },

    /// Put the drawn card at a hand position (1-6). The card that was there goes face up onto
    /// the discard pile.
    Swap { pos: u8 },

    /// Throw the drawn card onto the discard pile.
    Discard,
}

impl ActionData {
    /// The type of action this payload belongs to.
    pub fn action_type(self) -> ActionType {
        match self {
            ActionData::Flip { .. } => ActionType::Flip,
            ActionData::Draw { .. } => ActionType::Draw,
            ActionData::Swap { .. } | ActionData::Discard => ActionType::Place,
        }
    }
}

/// The action that the game's state machine expects to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectAction {
    /// The player expected to take the action.
    pub player: PlayerId,
    /// The type of action.
    pub action: ActionType,
}

impl ExpectAction {
    /// Create a new [`ExpectAction`].
    pub fn new(player: PlayerId, action: ActionType) -> Self {
        Self { player, action }
    }

    /// Bind in a payload to create an [`Action`].
    pub fn with_data(self, data: ActionData) -> Action {
        Action::new(self.player, self.action, data)
    }
}

/// An action taken by a player during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The player taking the action.
    pub player: PlayerId,
    /// The type of action.
    pub action: ActionType,
    /// The action payload.
    pub data: ActionData,
}

impl Action {
    /// Create a new [`Action`].
    pub fn new(player: PlayerId, action: ActionType, data: ActionData) -> Self {
        Self {
            player,
            action,
            data,
        }
    }
}
