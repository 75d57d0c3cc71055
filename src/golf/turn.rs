//! A single player's turn.

use super::{ActionData, ActionType, Deck, Event, Hand, Pile, PlayerId, RoundError};
use crate::deck::EmptyDeck;

/// The number of cards turned over on a player's first turn.
pub const FIRST_TURN_FLIPS: u8 = 2;

/// The state of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The player's first turn of the round: turn over two face-down cards.
    FirstTurnFlip { flipped: u8 },
    /// Draw from the stock or the discard pile.
    NormalDraw,
    /// Swap the drawn card into the hand, or throw it away.
    NormalSwapOrDiscard { source: Pile },
    /// Nothing left to do.
    TurnComplete,
}

/// The cards that a turn may touch.
pub struct Table<'a> {
    pub stock: &'a mut Deck,
    pub discard: &'a mut Deck,
    pub hand: &'a mut Hand,
}

/// The state machine for one player's turn.
///
/// A player's first turn of each round consists of two flips. Every later turn is a draw,
/// followed by either a swap or a discard. If the round is already finished when the turn
/// begins, the player's remaining face-down cards are revealed once the card is placed.
///
/// Actions are validated before anything moves, so a rejected action leaves the table as it
/// was, and the player may try again.
#[derive(Debug, Clone)]
pub struct Turn {
    player: PlayerId,
    state: TurnState,
    last_turn: bool,
}

impl Turn {
    /// Starts a turn.
    pub fn new(player: PlayerId, first_turn: bool, last_turn: bool) -> Self {
        let state = if first_turn {
            TurnState::FirstTurnFlip { flipped: 0 }
        } else {
            TurnState::NormalDraw
        };
        Self {
            player,
            state,
            last_turn,
        }
    }

    /// The player taking this turn.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns true if this is the player's last turn of the round.
    #[cfg(test)]
    pub fn is_last_turn(&self) -> bool {
        self.last_turn
    }

    /// Returns true once the turn is over.
    pub fn is_complete(&self) -> bool {
        self.state == TurnState::TurnComplete
    }

    /// The type of action needed to advance the turn, if it isn't over.
    pub fn expected(&self) -> Option<ActionType> {
        match self.state {
            TurnState::FirstTurnFlip { .. } => Some(ActionType::Flip),
            TurnState::NormalDraw => Some(ActionType::Draw),
            TurnState::NormalSwapOrDiscard { .. } => Some(ActionType::Place),
            TurnState::TurnComplete => None,
        }
    }

    /// Applies an action to the table, returning the resulting events.
    pub fn apply(&mut self, data: ActionData, table: Table<'_>) -> Result<Vec<Event>, RoundError> {
        let player = self.player;
        let mut events = vec![];
        match (self.state, data) {
            (TurnState::FirstTurnFlip { flipped }, ActionData::Flip { pos }) => {
                let card = table.hand.flip(pos)?;
                events.push(Event::Flip { player, pos, card });
                self.state = if flipped + 1 < FIRST_TURN_FLIPS {
                    TurnState::FirstTurnFlip {
                        flipped: flipped + 1,
                    }
                } else {
                    TurnState::TurnComplete
                };
            }
            (TurnState::NormalDraw, ActionData::Draw { pile }) => {
                let card = match pile {
                    // Peek at the top of the stock. It stays there until it's placed.
                    Pile::Stock => {
                        let card = table.stock.top_mut().ok_or(EmptyDeck)?;
                        card.flip_up();
                        *card
                    }
                    Pile::Discard => *table.discard.top().ok_or(EmptyDeck)?,
                };
                events.push(Event::Draw { player, pile, card });
                self.state = TurnState::NormalSwapOrDiscard { source: pile };
            }
            (TurnState::NormalSwapOrDiscard { source }, ActionData::Swap { pos }) => {
                table.hand.card(pos)?;
                let card = match source {
                    Pile::Stock => table.stock.draw()?,
                    Pile::Discard => table.discard.draw()?,
                };
                let mut discarded = table.hand.replace(pos, card)?;
                discarded.flip_up();
                table.discard.add(discarded);
                events.push(Event::Swap {
                    player,
                    pos,
                    card,
                    discarded,
                });
                self.finish(table.hand, &mut events);
            }
            (TurnState::NormalSwapOrDiscard { source }, ActionData::Discard) => {
                // A card taken from the discard pile never left it.
                if source == Pile::Stock {
                    let card = table.stock.draw()?;
                    table.discard.add(card);
                    events.push(Event::Discard { player, card });
                }
                self.finish(table.hand, &mut events);
            }
            _ => return Err(RoundError::InvalidActionData),
        }
        Ok(events)
    }

    /// Completes a normal turn, revealing the hand if this was the player's last turn.
    fn finish(&mut self, hand: &mut Hand, events: &mut Vec<Event>) {
        if self.last_turn {
            hand.reveal_all();
            events.push(Event::Reveal(self.player));
        }
        self.state = TurnState::TurnComplete;
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::super::hand::test::hand;
    use super::super::{Card, PlayerError};
    use super::*;

    fn deck(cards: &[&str]) -> Deck {
        cards.iter().map(|s| s.parse::<Card>().unwrap()).collect()
    }

    struct Fixture {
        stock: Deck,
        discard: Deck,
        hand: Hand,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                stock: deck(&["9", "4", "K"]),
                discard: deck(&["3^", "7^"]),
                hand: hand(["A", "2", "3", "4", "5", "6"]),
            }
        }

        fn apply(&mut self, turn: &mut Turn, data: ActionData) -> Result<Vec<Event>, RoundError> {
            let table = Table {
                stock: &mut self.stock,
                discard: &mut self.discard,
                hand: &mut self.hand,
            };
            turn.apply(data, table)
        }
    }

    fn top_value(deck: &Deck) -> Option<u8> {
        deck.top().map(|c| c.value())
    }

    #[test]
    fn test_first_turn_flips_two() {
        let mut fx = Fixture::new();
        let mut turn = Turn::new(PlayerId::FIRST, true, false);
        assert_eq!(turn.expected(), Some(ActionType::Flip));

        fx.apply(&mut turn, ActionData::Flip { pos: 2 }).unwrap();
        assert_eq!(turn.state(), TurnState::FirstTurnFlip { flipped: 1 });

        // Flipping the same card again doesn't count.
        assert_matches!(
            fx.apply(&mut turn, ActionData::Flip { pos: 2 }),
            Err(RoundError::Player(PlayerError::AlreadyFaceUp(2)))
        );
        assert_matches!(
            fx.apply(&mut turn, ActionData::Flip { pos: 7 }),
            Err(RoundError::Player(PlayerError::PositionOutOfRange(7)))
        );
        assert_eq!(turn.state(), TurnState::FirstTurnFlip { flipped: 1 });
        assert_eq!(fx.hand.face_up_count(), 1);

        fx.apply(&mut turn, ActionData::Flip { pos: 6 }).unwrap();
        assert!(turn.is_complete());
        assert!(fx.hand.card(2).unwrap().is_face_up());
        assert!(fx.hand.card(6).unwrap().is_face_up());
        assert_eq!(fx.hand.face_up_count(), 2);
        assert_eq!(turn.expected(), None);
    }

    #[test]
    fn test_draw_stock_and_swap() {
        let mut fx = Fixture::new();
        let mut turn = Turn::new(PlayerId::FIRST, false, false);
        assert_matches!(
            fx.apply(&mut turn, ActionData::Flip { pos: 1 }),
            Err(RoundError::InvalidActionData)
        );

        let events = fx
            .apply(&mut turn, ActionData::Draw { pile: Pile::Stock })
            .unwrap();
        assert_matches!(
            events.as_slice(),
            [Event::Draw { pile: Pile::Stock, card, .. }] if card.is_face_up()
        );
        // The peeked card is still on the stock, face up.
        assert_eq!(fx.stock.len(), 3);
        assert!(fx.stock.top().unwrap().is_face_up());

        assert_matches!(
            fx.apply(&mut turn, ActionData::Swap { pos: 0 }),
            Err(RoundError::Player(PlayerError::PositionOutOfRange(0)))
        );
        assert_eq!(fx.stock.len(), 3);

        fx.apply(&mut turn, ActionData::Swap { pos: 4 }).unwrap();
        assert!(turn.is_complete());
        assert_eq!(fx.stock.len(), 2);
        assert_eq!(fx.hand.card(4).unwrap().value(), 13);
        assert!(fx.hand.card(4).unwrap().is_face_up());
        // The replaced card goes face up onto the discard pile.
        assert_eq!(fx.discard.len(), 3);
        assert_eq!(top_value(&fx.discard), Some(4));
        assert!(fx.discard.top().unwrap().is_face_up());
    }

    #[test]
    fn test_draw_stock_and_discard() {
        let mut fx = Fixture::new();
        let mut turn = Turn::new(PlayerId::FIRST, false, false);
        fx.apply(&mut turn, ActionData::Draw { pile: Pile::Stock })
            .unwrap();
        fx.apply(&mut turn, ActionData::Discard).unwrap();
        assert!(turn.is_complete());
        assert_eq!(fx.stock.len(), 2);
        assert_eq!(top_value(&fx.discard), Some(13));
        assert_eq!(fx.hand, hand(["A", "2", "3", "4", "5", "6"]));
    }

    #[test]
    fn test_draw_discard_and_swap() {
        let mut fx = Fixture::new();
        let mut turn = Turn::new(PlayerId::FIRST, false, false);
        fx.apply(
            &mut turn,
            ActionData::Draw {
                pile: Pile::Discard,
            },
        )
        .unwrap();
        fx.apply(&mut turn, ActionData::Swap { pos: 1 }).unwrap();
        assert_eq!(fx.stock.len(), 3);
        assert_eq!(fx.hand.card(1).unwrap().value(), 7);
        assert_eq!(fx.discard.len(), 2);
        assert_eq!(top_value(&fx.discard), Some(1));
    }

    #[test]
    fn test_draw_discard_and_put_back() {
        let mut fx = Fixture::new();
        let before = (fx.stock.clone(), fx.discard.clone());
        let mut turn = Turn::new(PlayerId::FIRST, false, false);
        fx.apply(
            &mut turn,
            ActionData::Draw {
                pile: Pile::Discard,
            },
        )
        .unwrap();
        let events = fx.apply(&mut turn, ActionData::Discard).unwrap();
        assert!(events.is_empty());
        assert!(turn.is_complete());
        assert_eq!((fx.stock, fx.discard), before);
    }

    #[test]
    fn test_last_turn_reveals_hand() {
        let mut fx = Fixture::new();
        let mut turn = Turn::new(PlayerId::FIRST, false, true);
        assert!(turn.is_last_turn());
        fx.apply(&mut turn, ActionData::Draw { pile: Pile::Stock })
            .unwrap();
        let events = fx.apply(&mut turn, ActionData::Discard).unwrap();
        assert_matches!(events.last(), Some(Event::Reveal(p)) if *p == PlayerId::FIRST);
        assert!(fx.hand.all_face_up());
    }

    #[test]
    fn test_empty_stock() {
        let mut fx = Fixture::new();
        fx.stock = Deck::new();
        let mut turn = Turn::new(PlayerId::FIRST, false, false);
        assert_matches!(
            fx.apply(&mut turn, ActionData::Draw { pile: Pile::Stock }),
            Err(RoundError::EmptyDeck(_))
        );
        assert_eq!(turn.state(), TurnState::NormalDraw);
    }
}
