//! The current player's cards, in two rows of three.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::golf::hand::COLUMNS;
use crate::golf::{Card, Hand};

/// The size of one card on screen, including its border.
const CARD_WIDTH: u16 = 8;
const CARD_HEIGHT: u16 = 4;

pub struct HandGrid {
    rows: Vec<Vec<(u8, Card)>>,
}

impl HandGrid {
    pub fn new(hand: &Hand) -> Self {
        Self {
            rows: hand.rows().collect(),
        }
    }
}

impl Widget for HandGrid {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let row_areas = Layout::new(
            Direction::Vertical,
            vec![Constraint::Length(CARD_HEIGHT); self.rows.len()],
        )
        .split(area);
        for (row, row_area) in self.rows.into_iter().zip(row_areas.iter()) {
            let card_areas = Layout::new(
                Direction::Horizontal,
                [Constraint::Length(CARD_WIDTH); COLUMNS],
            )
            .split(*row_area);
            for ((pos, card), card_area) in row.into_iter().zip(card_areas.iter()) {
                Paragraph::new(Line::from(card.to_span()))
                    .alignment(Alignment::Center)
                    .block(Block::bordered().title(format!("[{pos}]")))
                    .render(*card_area, buf);
            }
        }
    }
}
