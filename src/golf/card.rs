//! Golf deck.

use std::convert::TryFrom;
use std::{fmt, str::FromStr};

use ansi_term::ANSIString;
use itertools::iproduct;
use ratatui::text::Span;
use serde::{Deserialize, Serialize};

use crate::deck;

/// Card rank. Suits play no part in golf, so a card is fully described by its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Returns an array of all ranks, in ascending order.
    pub fn all_ranks() -> &'static [Rank; 13] {
        static RANKS: [Rank; 13] = [
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
        ];
        &RANKS
    }

    /// The numeric value of the rank, from 1 (ace) to 13 (king).
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Rank {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=13 => Ok(Rank::all_ranks()[usize::from(value) - 1]),
            _ => Err(()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'A' | 'a' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        };
        f.write_str(sym)
    }
}

/// A golf card.
///
/// Cards are dealt face down. Once turned over, a card stays face up until the end of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Card rank.
    pub rank: Rank,
    /// Whether the card is visible.
    face_up: bool,
}

impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        Self::new(rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.face_up {
            self.rank.fmt(f)
        } else {
            f.write_str("##")
        }
    }
}

/// Parses a rank symbol, optionally followed by `^` for a face-up card.
impl FromStr for Card {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (s, face_up) = match s.strip_suffix('^') {
            Some(s) => (s, true),
            None => (s, false),
        };
        let rank = match s {
            "10" => Rank::Ten,
            _ => {
                let mut chars = s.chars();
                let rank = chars.next().ok_or(())?;
                if chars.next().is_some() {
                    return Err(());
                }
                Rank::try_from(rank)?
            }
        };
        Ok(Self { rank, face_up })
    }
}

impl Card {
    /// Creates a new face-down [`Card`].
    pub fn new(rank: Rank) -> Self {
        Self {
            rank,
            face_up: false,
        }
    }

    /// The numeric value of the card's rank.
    #[cfg(test)]
    pub fn value(self) -> u8 {
        self.rank.value()
    }

    /// Returns true if the card has been turned over.
    pub fn is_face_up(self) -> bool {
        self.face_up
    }

    /// Turns the card face up. Does nothing if it already is.
    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    /// Returns a string representation of the card, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::{Blue, Green, Red};
        use ansi_term::Style;
        let text = self.to_string();
        match (self.face_up, self.rank) {
            (false, _) => Style::new().dimmed().paint(text),
            (true, Rank::Two) => Green.paint(text),
            (true, Rank::Jack | Rank::Queen) => Red.paint(text),
            (true, Rank::King) => Blue.paint(text),
            (true, _) => text.into(),
        }
    }

    /// Returns a [`ratatui::text::Span`] for the card.
    pub fn to_span(self) -> Span<'static> {
        use ratatui::style::{Color, Stylize};
        let span = Span::raw(self.to_string());
        match (self.face_up, self.rank) {
            (false, _) => span.dim(),
            (true, Rank::Two) => span.style(Color::Green),
            (true, Rank::Jack | Rank::Queen) => span.style(Color::Red),
            (true, Rank::King) => span.style(Color::Blue),
            (true, _) => span,
        }
    }
}

/// A golf deck.
pub type Deck = deck::Deck<Card>;

impl Deck {
    /// A full 52-card deck, face down and in order.
    pub fn full() -> Self {
        let mut deck = Self::new();
        deck.fill();
        deck
    }

    /// Adds one card of each rank for each of the four suits.
    pub fn fill(&mut self) {
        for (_, &rank) in iproduct!(0..4, Rank::all_ranks()) {
            self.add(Card::new(rank));
        }
    }
}
