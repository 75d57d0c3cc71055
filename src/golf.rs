//! The game of golf.
//!
//! Each player holds six cards, face down, in two rows of three. On their first turn a player
//! turns over two of them. On every later turn they draw from the stock or take the top of the
//! discard pile, then either swap the drawn card into their hand or throw it away. A round ends
//! once somebody has turned over all six cards: everyone else gets one last turn, and then all
//! hands are revealed and scored. Low score wins.

use std::fmt;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod action;
mod card;
mod display;
mod error;
mod game;
mod hand;
mod player;
mod round;
mod scoring;
mod transcript;
mod tui;
mod turn;
use self::action::{Action, ActionData, ActionType, ExpectAction, Pile};
use self::card::{Card, Deck, Rank};
use self::display::{Console, Display, Prompt};
use self::error::{ConfigError, DisplayError, MatchError, PlayerError, RoundError};
use self::game::{collect_config, play_match, Game, MatchConfig, MatchOutcome, Shuffled};
use self::hand::Hand;
use self::player::PlayerId;
use self::round::{Phase, Round, RoundConfig, RoundOutcome, TableView};
use self::scoring::Winner;
use self::transcript::Transcript;
use self::tui::{tui_init, tui_restore, Tui};
use self::turn::{Turn, TurnState};
use crate::args::Args;

/// The rules, as shown before the match begins.
pub const RULES: &[&str] = &[
    "The objective is to get the lowest score over all rounds.",
    "Each player starts each round with 6 face-down cards, and flips over 2 during their first turn.",
    "During each turn, players draw a card from the discard or stock pile. This card can either be swapped with one of the six from the player's hand or discarded.",
    "The round ends when one player's cards are all face up. Everyone else gets one last turn.",
    "Matching cards in a column score 0. A = 1, 2 = -2, 3-10 = face value, J & Q = 10, K = 0.",
    "Press [q] at any time to quit.",
];

/// An event that occurs during the game.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new round was dealt, and the top card turned onto the discard pile.
    Deal {
        round: u8,
        first: PlayerId,
        top: Card,
    },
    /// A player turned over a card during their first turn.
    Flip { player: PlayerId, pos: u8, card: Card },
    /// A player drew a card.
    Draw {
        player: PlayerId,
        pile: Pile,
        card: Card,
    },
    /// A player swapped the drawn card into their hand.
    Swap {
        player: PlayerId,
        pos: u8,
        card: Card,
        discarded: Card,
    },
    /// A player threw away the drawn card.
    Discard { player: PlayerId, card: Card },
    /// A player's remaining cards were turned over at the end of the round.
    Reveal(PlayerId),
    /// A player finished their turn.
    TurnComplete { player: PlayerId, score: i32 },
    /// A player has turned over all of their cards; everyone else gets one last turn.
    FinalLap(PlayerId),
    /// The round is over.
    Round(RoundOutcome),
    /// The game is over.
    Game(MatchOutcome),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Deal { round, first, top } => {
                write!(f, "Round {round}: the first card up is a {top}. {first} goes first.")
            }
            Event::Flip { player, pos, card } => {
                write!(f, "{player} turned over a {card} at [{pos}]")
            }
            Event::Draw { player, pile, card } => match pile {
                Pile::Stock => write!(f, "{player} drew a {card} from the {pile}"),
                Pile::Discard => write!(f, "{player} took the {card} from the {pile}"),
            },
            Event::Swap {
                player,
                pos,
                card,
                discarded,
            } => write!(f, "{player} put the {card} at [{pos}], and threw away a {discarded}"),
            Event::Discard { player, card } => write!(f, "{player} threw away the {card}"),
            Event::Reveal(player) => write!(f, "{player} turned over the rest of their cards"),
            Event::TurnComplete { player, score } => write!(f, "{player} now has {score} points"),
            Event::FinalLap(player) => write!(
                f,
                "{player} has turned over every card! Everyone else gets one last turn."
            ),
            Event::Round(outcome) => write!(f, "{outcome}!"),
            Event::Game(outcome) => write!(f, "{outcome}!"),
        }
    }
}

/// Runs the game with a simple command-line interface.
pub fn cli_main(args: &Args) -> anyhow::Result<()> {
    let mut console = Console::new(!args.no_color);
    run(&mut console, args)
}

/// Runs the game in a rich terminal UI.
pub fn tui_main(args: &Args) -> anyhow::Result<()> {
    let terminal = tui_init()?;
    let mut tui = Tui::new(terminal);
    let result = run(&mut tui, args);
    drop(tui);
    tui_restore()?;
    result
}

/// Sets up a match from the command line arguments, and plays it to completion.
fn run(display: &mut dyn Display, args: &Args) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("shuffling with seed {seed}");

    let mut transcript = None;
    let result = play(display, args, seed, &mut transcript);
    if let Err(MatchError::Display(DisplayError::Quit)) = result {
        // Quitting discards the match, including its transcript.
        info!("quit by user");
        return Ok(());
    }
    if let (Some(path), Some(transcript)) = (&args.transcript, &transcript) {
        transcript.write_json_file(path)?;
        info!("wrote transcript to {}", path.display());
    }
    result?;
    Ok(())
}

fn play(
    display: &mut dyn Display,
    args: &Args,
    seed: u64,
    transcript: &mut Option<Transcript>,
) -> Result<MatchOutcome, MatchError> {
    display.acknowledge(Prompt::Begin)?;
    let config = collect_config(display, args.players, args.rounds)?;
    let mut game = Game::new(config, Shuffled::new(StdRng::seed_from_u64(seed)))?;
    let transcript = transcript.insert(Transcript::new(config, seed));
    play_match(display, &mut game, transcript)
}
