//! The interface between the game and the people playing it.

use std::fmt;
use std::time::Duration;

use super::{ActionType, DisplayError, Event, ExpectAction, TableView};

mod console;
#[cfg(test)]
mod scripted;
pub use console::Console;
#[cfg(test)]
pub use scripted::Scripted;

/// Something the players are asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Read the rules, and press a key to begin.
    Begin,
    /// Choose the number of players.
    Players,
    /// Choose the number of rounds.
    Rounds,
    /// Take an action during a round.
    Action(ExpectAction),
    /// Press a key to move on to the next round.
    NextRound,
    /// Press a key to leave the game.
    GameOver,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Begin => f.write_str("Press any key to begin"),
            Prompt::Players => f.write_str("How many people are playing? [2-4]"),
            Prompt::Rounds => f.write_str("How many rounds would you like to play? [1-9]"),
            Prompt::Action(ExpectAction { player, action }) => match action {
                ActionType::Flip => write!(f, "{player}: choose a card [1-6] to flip over"),
                ActionType::Draw => write!(f, "{player}: draw from the stock [7] or discard [8]"),
                ActionType::Place => write!(f, "{player}: swap with a card [1-6] or discard [8]"),
            },
            Prompt::NextRound => f.write_str("Press any key to continue"),
            Prompt::GameOver => f.write_str("Press any key to exit"),
        }
    }
}

impl Prompt {
    /// The keys that answer this prompt. Empty if any key will do.
    pub fn valid_keys(self) -> &'static [u8] {
        match self {
            Prompt::Players => &[2, 3, 4],
            Prompt::Rounds => &[1, 2, 3, 4, 5, 6, 7, 8, 9],
            Prompt::Action(expect) => expect.action.valid_keys(),
            Prompt::Begin | Prompt::NextRound | Prompt::GameOver => &[],
        }
    }

    /// Returns true if the key answers this prompt.
    pub fn accepts(self, key: u8) -> bool {
        self.valid_keys().contains(&key)
    }
}

/// Renders the game, and collects choices from the players.
///
/// The game calls into the display, never the other way around. Each call blocks until the
/// display is done with it. A display is responsible for range-checking key presses; whether a
/// choice is allowed by the rules is up to the game, which reports violations through
/// [`reject`](`Display::reject`) and asks again.
pub trait Display {
    /// Draws the table.
    fn render(&mut self, view: &TableView) -> Result<(), DisplayError>;

    /// A notification of an event that all players can see.
    fn notify(&mut self, event: &Event) -> Result<(), DisplayError>;

    /// Waits for a key press that answers the prompt. Must only return keys in
    /// [`Prompt::valid_keys`].
    fn prompt_choice(&mut self, prompt: Prompt) -> Result<u8, DisplayError>;

    /// Indicates that the player's choice was not allowed.
    fn reject(&mut self, err: &dyn std::error::Error) -> Result<(), DisplayError>;

    /// Waits for any key press.
    fn acknowledge(&mut self, prompt: Prompt) -> Result<(), DisplayError>;

    /// Gives the players a moment to see what just happened.
    fn pause(&mut self, _duration: Duration) {}
}
