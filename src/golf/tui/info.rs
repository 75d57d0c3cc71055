//! Informational widget

use std::iter::FromIterator;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::golf::turn::FIRST_TURN_FLIPS;
use crate::golf::{Phase, PlayerId, TableView, TurnState};

pub struct Info {
    round: u8,
    rounds: u8,
    player: PlayerId,
    phase: Phase,
    turn: Option<TurnState>,
}

impl Info {
    pub fn new(view: &TableView) -> Self {
        Self {
            round: view.round,
            rounds: view.rounds,
            player: view.player,
            phase: view.phase,
            turn: view.turn,
        }
    }

    fn status(&self) -> Line<'static> {
        match (self.phase, self.turn) {
            (Phase::Done, _) => "The round is over.".into(),
            (Phase::FinalLap { .. }, Some(_)) => {
                Line::from(format!("{}: last turn!", self.player)).red()
            }
            (_, Some(TurnState::FirstTurnFlip { flipped })) => {
                format!("{} to flip {} more.", self.player, FIRST_TURN_FLIPS - flipped).into()
            }
            (_, Some(_)) => format!("{}'s turn.", self.player).into(),
            (_, None) => Line::default(),
        }
    }
}

impl Widget for Info {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let header = Line::from(format!("Round {} of {}", self.round, self.rounds));
        Paragraph::new(Text::from_iter([header, self.status()]))
            .block(Block::bordered())
            .render(area, buf);
    }
}
