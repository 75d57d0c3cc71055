//! Game management
//!
//! A match is a fixed number of rounds. Scores carry over from one round to the next, and the
//! player with the lowest total at the end wins.

use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    ConfigError, Deck, Display, DisplayError, Event, MatchError, Prompt, Round, RoundConfig,
    RoundError, RoundOutcome, TableView, Transcript, Winner,
};

/// How long to wait after each turn, so that players can see what happened.
const TURN_PAUSE: Duration = Duration::from_secs(1);

/// The number of players and rounds in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    players: u8,
    rounds: u8,
}

impl MatchConfig {
    pub const MIN_PLAYERS: u8 = 2;
    pub const MAX_PLAYERS: u8 = 4;
    pub const MIN_ROUNDS: u8 = 1;
    pub const MAX_ROUNDS: u8 = 9;

    #[cfg(test)]
    pub fn new(players: u8, rounds: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            players: Self::check_players(players)?,
            rounds: Self::check_rounds(rounds)?,
        })
    }

    pub fn check_players(players: u8) -> Result<u8, ConfigError> {
        if (Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&players) {
            Ok(players)
        } else {
            Err(ConfigError::Players(players))
        }
    }

    pub fn check_rounds(rounds: u8) -> Result<u8, ConfigError> {
        if (Self::MIN_ROUNDS..=Self::MAX_ROUNDS).contains(&rounds) {
            Ok(rounds)
        } else {
            Err(ConfigError::Rounds(rounds))
        }
    }

    pub fn players(self) -> u8 {
        self.players
    }

    pub fn rounds(self) -> u8 {
        self.rounds
    }
}

/// A source of fresh decks, one per round.
pub trait Dealer {
    fn deck(&mut self) -> Deck;
}

/// Deals a freshly shuffled deck every round.
#[derive(Debug)]
pub struct Shuffled<R> {
    rng: R,
}

impl<R: Rng> Shuffled<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dealer for Shuffled<R> {
    fn deck(&mut self) -> Deck {
        let mut deck = Deck::full();
        deck.shuffle(&mut self.rng);
        deck
    }
}

/// The outcome of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Each player's final score.
    pub scores: Vec<i32>,
    /// The winner, or a tie if any two players finished level.
    pub winner: Winner,
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Winner::Player(player) => write!(f, "{player} wins the game"),
            Winner::Tie => f.write_str("The game is a tie"),
        }
    }
}

impl MatchOutcome {
    pub fn new(scores: Vec<i32>) -> Self {
        let winner = Winner::lowest_all_distinct(&scores);
        Self { scores, winner }
    }
}

/// The state of a match.
pub struct Game<D> {
    config: MatchConfig,
    dealer: D,
    round: Round,
    history: Vec<RoundOutcome>,
    outcome: Option<MatchOutcome>,
}

impl<D: Dealer> Game<D> {
    /// Starts a match, and deals the first round.
    pub fn new(config: MatchConfig, mut dealer: D) -> Result<Self, RoundError> {
        let round_config = RoundConfig::first_round(config.players(), config.rounds());
        let round = Round::new(round_config, dealer.deck())?;
        Ok(Self {
            config,
            dealer,
            round,
            history: vec![],
            outcome: None,
        })
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// The current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    /// The outcomes of completed rounds.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn view(&self) -> TableView {
        self.round.view()
    }

    /// Records the outcome of the current round, which must be over, and deals the next one.
    ///
    /// Returns the outcome of the match once the last round has been recorded. The player who
    /// would have been next to move in the old round goes first in the new one.
    pub fn next_round(&mut self) -> Result<Option<MatchOutcome>, RoundError> {
        if let Some(outcome) = &self.outcome {
            return Ok(Some(outcome.clone()));
        }
        let round_outcome = self
            .round
            .outcome()
            .cloned()
            .ok_or(RoundError::RoundInProgress)?;
        let scores = round_outcome.scores.clone();
        self.history.push(round_outcome);

        let number = self.round.number();
        if number >= self.config.rounds() {
            let outcome = MatchOutcome::new(scores);
            info!("{outcome}: {:?}", outcome.scores);
            self.outcome = Some(outcome.clone());
            return Ok(Some(outcome));
        }

        let config = RoundConfig {
            number: number + 1,
            rounds: self.config.rounds(),
            first: self.round.current(),
            prev_scores: scores,
        };
        self.round = Round::new(config, self.dealer.deck())?;
        Ok(None)
    }
}

/// Asks for the number of players and rounds, unless they were given up front.
///
/// Out-of-range answers are rejected, and the question asked again.
pub fn collect_config(
    display: &mut dyn Display,
    players: Option<u8>,
    rounds: Option<u8>,
) -> Result<MatchConfig, DisplayError> {
    let players = ask(display, players, Prompt::Players, MatchConfig::check_players)?;
    let rounds = ask(display, rounds, Prompt::Rounds, MatchConfig::check_rounds)?;
    Ok(MatchConfig { players, rounds })
}

fn ask(
    display: &mut dyn Display,
    mut preset: Option<u8>,
    prompt: Prompt,
    check: fn(u8) -> Result<u8, ConfigError>,
) -> Result<u8, DisplayError> {
    loop {
        let value = match preset.take() {
            Some(value) => value,
            None => display.prompt_choice(prompt)?,
        };
        match check(value) {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!("{err}");
                display.reject(&err)?;
            }
        }
    }
}

/// Plays a match through to the end.
///
/// Every action is recorded in the transcript, along with the outcome of each round and of the
/// match as a whole.
pub fn play_match<D: Dealer>(
    display: &mut dyn Display,
    game: &mut Game<D>,
    transcript: &mut Transcript,
) -> Result<MatchOutcome, MatchError> {
    let config = game.config();
    info!(
        "starting a match of {} rounds for {} players",
        config.rounds(),
        config.players()
    );
    transcript.begin_round(game.round());
    let mut final_lap = false;
    loop {
        while let Some(event) = game.round_mut().pop_event() {
            display.notify(&event)?;
            match event {
                Event::Deal { .. } => final_lap = false,
                Event::TurnComplete { .. } => {
                    display.render(&game.view())?;
                    display.pause(TURN_PAUSE);
                    // Everyone gets a longer look at hands revealed on the last lap.
                    if final_lap {
                        display.pause(TURN_PAUSE);
                    }
                }
                Event::FinalLap(_) => final_lap = true,
                _ => (),
            }
        }

        if let Some(expect) = game.round().next_action() {
            display.render(&game.view())?;
            let key = display.prompt_choice(Prompt::Action(expect))?;
            let result = expect
                .action
                .decode(key)
                .map_err(RoundError::from)
                .and_then(|data| {
                    let action = expect.with_data(data);
                    game.round_mut().apply_action(action).map(|()| action)
                });
            match result {
                Ok(action) => transcript.record(action),
                Err(RoundError::Player(err)) => {
                    debug!("rejected [{key}] from {}: {err}", expect.player);
                    display.reject(&err)?;
                }
                Err(err) => return Err(err.into()),
            }
            continue;
        }

        // The round is over.
        display.render(&game.view())?;
        display.acknowledge(Prompt::NextRound)?;
        let finished = game.next_round();
        if let Some(outcome) = game.history().last() {
            transcript.end_round(outcome);
        }
        if let Some(outcome) = finished? {
            transcript.finish(&outcome);
            display.notify(&Event::Game(outcome.clone()))?;
            display.acknowledge(Prompt::GameOver)?;
            return Ok(outcome);
        }
        transcript.begin_round(game.round());
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;

    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::display::Scripted;
    use super::super::round::test::stacked_deck;
    use super::super::{ActionData, ActionType, Pile, PlayerId};
    use super::*;

    /// Deals prepared decks in order.
    struct Stacked(VecDeque<Deck>);

    impl Dealer for Stacked {
        fn deck(&mut self) -> Deck {
            self.0.pop_front().expect("enough decks")
        }
    }

    fn stacked(decks: Vec<Deck>) -> Stacked {
        Stacked(decks.into())
    }

    /// Player 1 flips two fives, then fills the rest of their hand from the stock. Player 2
    /// flips a 2 and a King, then passes until the round is over.
    fn lopsided_deck() -> Deck {
        stacked_deck(
            &[["5", "8", "8", "5", "8", "8"], ["2", "K", "4", "K", "K", "4"]],
            "6",
            &["3", "9", "Q", "9", "7", "9", "J", "9", "2"],
        )
    }

    #[rustfmt::skip]
    const LOPSIDED_KEYS: &[u8] = &[
        1, 1, 4,    // P1 tries to flip the same card twice
        1, 4,       // P2
        9, 7, 2,    // P1: 9 isn't a key
        7, 8,       // P2
        7, 3,       // P1
        7, 8,       // P2
        7, 5,       // P1
        7, 8,       // P2
        7, 6,       // P1 has turned over every card
        7, 8,       // P2's last turn
    ];

    #[test]
    fn test_match_to_completion() {
        let config = MatchConfig::new(2, 1).unwrap();
        let mut game = Game::new(config, stacked(vec![lopsided_deck()])).unwrap();
        let mut transcript = Transcript::new(config, 0);
        let mut display = Scripted::new(LOPSIDED_KEYS.iter().copied());

        let outcome = play_match(&mut display, &mut game, &mut transcript).unwrap();
        // Columns: 5/5, 2/7, J/Q against 2/K, K/K, 4/4.
        assert_eq!(outcome.scores, vec![25, -2]);
        assert_eq!(outcome.winner, Winner::Player(PlayerId::new(2)));
        assert_eq!(outcome.to_string(), "Player 2 wins the game");
        assert_eq!(display.remaining(), 0);

        assert_eq!(display.ignored, vec![9]);
        assert_eq!(display.rejections.len(), 1);
        assert_eq!(
            display.acknowledged,
            vec![Prompt::NextRound, Prompt::GameOver]
        );
        assert!(game.round().hand(PlayerId::new(2)).all_face_up());

        let round_outcome = &game.history()[0];
        assert_eq!(round_outcome.winner, Winner::Player(PlayerId::new(2)));
        assert_eq!(round_outcome.scores, vec![25, -2]);

        let events = &display.events;
        assert_matches!(events.first(), Some(Event::Deal { round: 1, .. }));
        assert_matches!(events.last(), Some(Event::Game(o)) if *o == outcome);
        let final_laps: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::FinalLap(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(final_laps, vec![PlayerId::FIRST]);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Reveal(p) if *p == PlayerId::new(2))));
        // Ten turns, plus a longer pause after the last one.
        assert_eq!(display.pauses, 11);

        // Only accepted actions make it into the transcript.
        let record = &transcript.rounds()[0];
        assert_eq!(record.actions.len(), LOPSIDED_KEYS.len() - 2);
        assert_eq!(
            record.actions[0].data,
            ActionData::Flip { pos: 1 }
        );
        assert_eq!(record.outcome.as_ref(), Some(round_outcome));
        assert_eq!(transcript.outcome(), Some(&outcome));

        // The match stays over.
        assert_eq!(game.next_round().unwrap(), Some(outcome));
    }

    #[test]
    fn test_match_tie() {
        // Both players build the same hand.
        let deck = stacked_deck(
            &[["5", "8", "8", "5", "8", "8"], ["5", "8", "8", "5", "8", "8"]],
            "6",
            &["3", "Q", "Q", "7", "7", "J", "J", "2", "2"],
        );
        #[rustfmt::skip]
        let keys = [
            1, 4, 1, 4,
            7, 2, 7, 2,
            7, 3, 7, 3,
            7, 5, 7, 5,
            7, 6, 7, 6,
        ];
        let config = MatchConfig::new(2, 1).unwrap();
        let mut game = Game::new(config, stacked(vec![deck])).unwrap();
        let mut transcript = Transcript::new(config, 0);
        let mut display = Scripted::new(keys);

        let outcome = play_match(&mut display, &mut game, &mut transcript).unwrap();
        assert_eq!(outcome.scores, vec![25, 25]);
        assert_eq!(outcome.winner, Winner::Tie);
        assert_eq!(game.history()[0].winner, Winner::Tie);
    }

    #[test]
    fn test_match_outcome() {
        assert_eq!(
            MatchOutcome::new(vec![30, 12, 19]).winner,
            Winner::Player(PlayerId::new(2))
        );
        // Any two equal totals make a tie, even if they aren't the lowest.
        let outcome = MatchOutcome::new(vec![4, 19, 19]);
        assert_eq!(outcome.winner, Winner::Tie);
        assert_eq!(outcome.to_string(), "The game is a tie");
    }

    /// Plays a round by turning over the first face-down card every turn.
    fn play_round(round: &mut Round) {
        while let Some(expect) = round.next_action() {
            let hand = round.hand(expect.player);
            let pos = (1..=6)
                .find(|&pos| !hand.card(pos).unwrap().is_face_up())
                .unwrap_or(1);
            let data = match expect.action {
                ActionType::Flip => ActionData::Flip { pos },
                ActionType::Draw => ActionData::Draw { pile: Pile::Stock },
                ActionType::Place if hand.all_face_up() => ActionData::Discard,
                ActionType::Place => ActionData::Swap { pos },
            };
            round.apply_action(expect.with_data(data)).unwrap();
        }
    }

    #[test]
    fn test_scores_carry_over() {
        let config = MatchConfig::new(3, 2).unwrap();
        let dealer = Shuffled::new(StdRng::seed_from_u64(7));
        let mut game = Game::new(config, dealer).unwrap();
        assert_matches!(game.next_round(), Err(RoundError::RoundInProgress));

        play_round(game.round_mut());
        let first = game.round().current();
        let totals = game.round().scores().to_vec();
        assert_eq!(game.next_round().unwrap(), None);

        let round = game.round();
        assert_eq!(round.number(), 2);
        assert_eq!(round.first(), first);
        assert_eq!(round.scores(), totals.as_slice());
        assert_eq!(game.history()[0].scores, totals);
        assert_eq!(game.view().round, 2);
        assert_eq!(game.config().rounds(), 2);

        play_round(game.round_mut());
        let outcome = game.next_round().unwrap().unwrap();
        let last = &game.history()[1];
        assert_eq!(outcome.scores, last.scores);
        assert_eq!(last.prev_scores, totals);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_collect_config() {
        let mut display = Scripted::new([1, 5, 3, 0, 4]);
        let config = collect_config(&mut display, None, None).unwrap();
        assert_eq!(config, MatchConfig::new(3, 4).unwrap());
        // 1 and 5 aren't offered, and neither is 0.
        assert_eq!(display.ignored, vec![1, 5, 0]);

        let mut display = Scripted::new([6]);
        let config = collect_config(&mut display, Some(2), None).unwrap();
        assert_eq!(config.players(), 2);
        assert_eq!(config.rounds(), 6);

        let mut display = Scripted::new([2]);
        let config = collect_config(&mut display, Some(7), Some(1)).unwrap();
        assert_eq!(config.players(), 2);
        assert_eq!(display.rejections.len(), 1);

        let mut display = Scripted::new(std::iter::empty());
        assert_matches!(
            collect_config(&mut display, None, None),
            Err(DisplayError::Quit)
        );
    }

    #[test]
    fn test_config_bounds() {
        assert_matches!(MatchConfig::new(1, 3), Err(ConfigError::Players(1)));
        assert_matches!(MatchConfig::new(5, 3), Err(ConfigError::Players(5)));
        assert_matches!(MatchConfig::new(4, 0), Err(ConfigError::Rounds(0)));
        assert_matches!(MatchConfig::new(4, 10), Err(ConfigError::Rounds(10)));
        assert!(MatchConfig::new(4, 9).is_ok());
    }

    #[test]
    fn test_quit_mid_round() {
        let config = MatchConfig::new(2, 1).unwrap();
        let mut game = Game::new(config, stacked(vec![lopsided_deck()])).unwrap();
        let mut transcript = Transcript::new(config, 0);
        let mut display = Scripted::new([1, 4, 1]);
        assert_matches!(
            play_match(&mut display, &mut game, &mut transcript),
            Err(MatchError::Display(DisplayError::Quit))
        );
    }
}
