//! Round management

use std::collections::VecDeque;
use std::convert::TryFrom;
use std::fmt::Display;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::hand::HAND_SIZE;
use super::scoring::hand_score;
use super::turn::Table;
use super::{
    Action, Card, Deck, Event, ExpectAction, Hand, PlayerId, RoundError, Turn, TurnState, Winner,
};


/// Configuration & initial conditions for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// The round number, from 1.
    pub number: u8,
    /// The number of rounds in the match.
    pub rounds: u8,
    /// The player who takes the first turn, and is dealt to first.
    pub first: PlayerId,
    /// Each player's cumulative score from previous rounds.
    pub prev_scores: Vec<i32>,
}

impl RoundConfig {
    /// The configuration for the first round of a match.
    pub fn first_round(players: u8, rounds: u8) -> Self {
        Self {
            number: 1,
            rounds,
            first: PlayerId::FIRST,
            prev_scores: vec![0; usize::from(players)],
        }
    }

    /// The number of players.
    pub fn players(&self) -> u8 {
        u8::try_from(self.prev_scores.len()).expect("less than 256")
    }
}

/// The phases of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Cards are being dealt.
    Dealing,
    /// Players take turns until someone has turned over their whole hand.
    InPlay,
    /// Everyone else gets one more turn.
    FinalLap { remaining: u8 },
    /// All hands are revealed, and scored.
    Scoring,
    /// The round is over.
    Done,
}

/// The outcome of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The round number.
    pub round: u8,
    /// Each player's cumulative score before the round.
    pub prev_scores: Vec<i32>,
    /// Each player's cumulative score after the round.
    pub scores: Vec<i32>,
    /// The player who scored the fewest points this round.
    pub winner: Winner,
}

impl Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Winner::Player(player) => write!(f, "{player} wins round {}", self.round),
            Winner::Tie => write!(f, "Round {} is a tie", self.round),
        }
    }
}

impl RoundOutcome {
    /// Scores a finished round. The winner is judged on the points scored this round only.
    pub fn new(round: u8, prev_scores: Vec<i32>, scores: Vec<i32>) -> Self {
        let winner = Winner::lowest_unique(&deltas(&prev_scores, &scores));
        Self {
            round,
            prev_scores,
            scores,
            winner,
        }
    }

    /// The points each player scored this round.
    pub fn deltas(&self) -> Vec<i32> {
        deltas(&self.prev_scores, &self.scores)
    }
}

fn deltas(prev_scores: &[i32], scores: &[i32]) -> Vec<i32> {
    scores
        .iter()
        .zip(prev_scores)
        .map(|(score, prev)| score - prev)
        .collect()
}

/// Everything a display needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// The round number.
    pub round: u8,
    /// The number of rounds in the match.
    pub rounds: u8,
    /// The phase of the round.
    pub phase: Phase,
    /// The player whose turn it is, or the last player to move once the round is over.
    pub player: PlayerId,
    /// The state of that player's turn.
    pub turn: Option<TurnState>,
    /// Every player's hand.
    pub hands: Vec<Hand>,
    /// The top of the stock.
    pub stock_top: Option<Card>,
    /// The number of cards left in the stock.
    pub stock_len: usize,
    /// The top of the discard pile.
    pub discard_top: Option<Card>,
    /// Each player's live score.
    pub scores: Vec<i32>,
    /// Set once somebody has turned over their whole hand.
    pub finished: bool,
}

impl TableView {
    /// The hand belonging to the player whose turn it is.
    pub fn hand(&self) -> &Hand {
        &self.hands[self.player.index()]
    }
}

/// The main state machine for a round.
///
/// A round begins with a deal: six cards to each player, and one card turned face up onto the
/// discard pile. Players then take turns, starting with the first player in the
/// [`RoundConfig`]. A player's first turn is spent turning over two cards; after that, each
/// turn is a draw followed by a swap or a discard.
///
/// When a player ends their turn with all six cards face up, the round is finished. Everyone
/// else takes one last turn, at the end of which their hand is revealed. Then the hands are
/// scored, and the outcome is available from [`outcome`](`Round::outcome`).
///
/// ## State management
///
/// The identity of the next player and the action they are expected to take is always known,
/// and may be obtained via [`next_action`](`Round::next_action`). Once a player has chosen an
/// action, it is applied using [`apply_action`](`Round::apply_action`). Actions that break the
/// rules are rejected with [`RoundError::Player`], and leave the round unchanged.
///
/// ## Events
///
/// Actions trigger events, such as cards being drawn. These events are stored in a queue, which
/// may be drained using [`pop_event`](`Round::pop_event`).
#[derive(Debug)]
pub struct Round {
    config: RoundConfig,
    phase: Phase,
    stock: Deck,
    discard: Deck,
    hands: Vec<Hand>,
    scores: Vec<i32>,
    /// Set once a player has turned over their whole hand.
    finished: bool,
    /// The number of completed turns.
    turns: usize,
    current: PlayerId,
    turn: Option<Turn>,
    events: VecDeque<Event>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    /// Deals a new round from the specified deck.
    pub fn new(config: RoundConfig, deck: Deck) -> Result<Self, RoundError> {
        let players = config.players();
        let needed = HAND_SIZE * usize::from(players) + 1;
        if deck.len() < needed {
            return Err(RoundError::IncompleteDeck);
        }
        let mut round = Self {
            phase: Phase::Dealing,
            stock: deck,
            discard: Deck::new(),
            hands: vec![],
            scores: config.prev_scores.clone(),
            finished: false,
            turns: 0,
            current: config.first,
            turn: None,
            events: VecDeque::new(),
            outcome: None,
            config,
        };
        round.deal()?;
        Ok(round)
    }

    /// Deals six cards to each player in turn order, and turns over the top card.
    fn deal(&mut self) -> Result<(), RoundError> {
        let players = self.players();
        let mut hands: Vec<Option<Hand>> = vec![None; usize::from(players)];
        for player in self.config.first.order(players) {
            let cards = self.stock.deal(HAND_SIZE)?;
            hands[player.index()] = Some(Hand::try_from(cards)?);
        }
        self.hands = hands.into_iter().flatten().collect();

        let mut top = self.stock.draw()?;
        top.flip_up();
        self.discard.add(top);

        info!(
            "dealt round {} of {} to {} players, {} first",
            self.config.number, self.config.rounds, players, self.config.first
        );
        self.events.push_back(Event::Deal {
            round: self.config.number,
            first: self.config.first,
            top,
        });
        self.phase = Phase::InPlay;
        self.start_turn();
        Ok(())
    }

    /// The round number.
    pub fn number(&self) -> u8 {
        self.config.number
    }

    /// The player who took the first turn.
    pub fn first(&self) -> PlayerId {
        self.config.first
    }

    /// The number of players.
    pub fn players(&self) -> u8 {
        self.config.players()
    }

    /// The current phase.
    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player whose turn it is. Once the round is over, the player who would be next.
    pub fn current(&self) -> PlayerId {
        self.current
    }

    /// The number of completed turns.
    #[cfg(test)]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Returns true once a player has turned over their whole hand.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The specified player's hand.
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player.index()]
    }

    /// Each player's live score, including previous rounds.
    #[cfg(test)]
    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    /// The stock.
    #[cfg(test)]
    pub fn stock(&self) -> &Deck {
        &self.stock
    }

    /// The discard pile.
    #[cfg(test)]
    pub fn discard(&self) -> &Deck {
        &self.discard
    }

    /// Returns the next action that's required to advance the state of the round, or None if
    /// the round is over.
    pub fn next_action(&self) -> Option<ExpectAction> {
        match self.phase {
            Phase::InPlay | Phase::FinalLap { .. } => {
                let turn = self.turn.as_ref()?;
                let action = turn.expected()?;
                Some(ExpectAction::new(turn.player(), action))
            }
            Phase::Dealing | Phase::Scoring | Phase::Done => None,
        }
    }

    /// Applies the specified action.
    pub fn apply_action(&mut self, action: Action) -> Result<(), RoundError> {
        let expect = self.next_action().ok_or(RoundError::RoundOver)?;
        if expect.player != action.player || expect.action != action.action {
            return Err(RoundError::ExpectActioned {
                player: expect.player,
                action: expect.action,
            });
        }
        if action.data.action_type() != action.action {
            return Err(RoundError::InvalidActionData);
        }

        let turn = self.turn.as_mut().ok_or(RoundError::RoundOver)?;
        let table = Table {
            stock: &mut self.stock,
            discard: &mut self.discard,
            hand: &mut self.hands[action.player.index()],
        };
        let events = turn.apply(action.data, table)?;
        debug!("{}: {:?}", action.player, action.data);
        let complete = turn.is_complete();
        self.events.extend(events);
        self.scores[action.player.index()] = self.live_score(action.player);
        if complete {
            self.complete_turn();
        }
        Ok(())
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// The outcome of the round, if it is over.
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Returns a snapshot of the table.
    pub fn view(&self) -> TableView {
        let player = self.turn.as_ref().map_or(self.current, Turn::player);
        TableView {
            round: self.config.number,
            rounds: self.config.rounds,
            phase: self.phase,
            player,
            turn: self.turn.as_ref().map(Turn::state),
            hands: self.hands.clone(),
            stock_top: self.stock.top().copied(),
            stock_len: self.stock.len(),
            discard_top: self.discard.top().copied(),
            scores: self.scores.clone(),
            finished: self.finished,
        }
    }

    /// Starts the current player's turn.
    fn start_turn(&mut self) {
        let first_turn = self.turns < usize::from(self.players());
        if !first_turn && self.stock.is_empty() {
            warn!("the stock is empty at the start of {}'s turn", self.current);
        }
        self.turn = Some(Turn::new(self.current, first_turn, self.finished));
    }

    /// Scores the player who just moved, and moves on to the next turn or phase.
    fn complete_turn(&mut self) {
        let player = self.current;
        let score = self.scores[player.index()];
        let revealed = self.hand(player).all_face_up();
        self.events.push_back(Event::TurnComplete { player, score });
        self.turns += 1;
        self.current = player.next(self.players());
        self.turn = None;

        self.phase = match self.phase {
            Phase::InPlay if revealed => {
                info!("{player} has turned over every card");
                self.finished = true;
                self.events.push_back(Event::FinalLap(player));
                Phase::FinalLap {
                    remaining: self.players() - 1,
                }
            }
            Phase::FinalLap { remaining } if remaining > 1 => Phase::FinalLap {
                remaining: remaining - 1,
            },
            Phase::FinalLap { .. } => Phase::Scoring,
            phase => phase,
        };

        match self.phase {
            Phase::InPlay | Phase::FinalLap { .. } => self.start_turn(),
            Phase::Scoring => self.score(),
            Phase::Dealing | Phase::Done => (),
        }
    }

    /// The player's score from previous rounds plus the face-up cards in their hand.
    fn live_score(&self, player: PlayerId) -> i32 {
        self.config.prev_scores[player.index()] + hand_score(self.hand(player))
    }

    /// Scores every hand, and records the outcome.
    fn score(&mut self) {
        for player in PlayerId::all(self.players()) {
            self.scores[player.index()] = self.live_score(player);
        }
        let outcome = RoundOutcome::new(
            self.config.number,
            self.config.prev_scores.clone(),
            self.scores.clone(),
        );
        info!("{outcome}: {:?}", outcome.scores);
        self.events.push_back(Event::Round(outcome.clone()));
        self.outcome = Some(outcome);
        self.phase = Phase::Done;
    }
}
