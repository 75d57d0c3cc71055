//! The stock and the discard pile.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::golf::action::{DISCARD_KEY, STOCK_KEY};
use crate::golf::{Card, TableView};

pub struct Piles {
    stock_top: Option<Card>,
    stock_len: usize,
    discard_top: Option<Card>,
}

impl Piles {
    pub fn new(view: &TableView) -> Self {
        Self {
            stock_top: view.stock_top,
            stock_len: view.stock_len,
            discard_top: view.discard_top,
        }
    }
}

fn pile(title: String, top: Option<Card>) -> Paragraph<'static> {
    let line = top.map_or_else(|| Line::from("--").dim(), |card| Line::from(card.to_span()));
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(title))
}

impl Widget for Piles {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [stock, discard] = Layout::new(
            Direction::Horizontal,
            [Constraint::Length(16), Constraint::Length(16)],
        )
        .areas(area);
        pile(
            format!("[{STOCK_KEY}] Stock {}", self.stock_len),
            self.stock_top,
        )
        .render(stock, buf);
        pile(format!("[{DISCARD_KEY}] Discard"), self.discard_top).render(discard, buf);
    }
}
