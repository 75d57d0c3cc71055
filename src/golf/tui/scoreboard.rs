use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Stylize;
use ratatui::widgets::{Block, Row, Table, Widget};

use crate::golf::{PlayerId, TableView};

pub struct Scoreboard {
    current: PlayerId,
    scores: Vec<i32>,
    face_up: Vec<usize>,
}

impl Scoreboard {
    pub fn new(view: &TableView) -> Self {
        Self {
            current: view.player,
            scores: view.scores.clone(),
            face_up: view.hands.iter().map(|hand| hand.face_up_count()).collect(),
        }
    }
}

impl Widget for Scoreboard {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let rows = self
            .scores
            .iter()
            .zip(&self.face_up)
            .enumerate()
            .map(|(index, (score, face_up))| {
                let player = PlayerId::from_index(index);
                let row = Row::new([player.to_abbr(), score.to_string(), format!("{face_up}/6")]);
                if player == self.current {
                    row.bold()
                } else {
                    row
                }
            });
        let table = Table::default()
            .header(Row::new(["", "Score", "Up"]))
            .rows(rows)
            .widths([
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Length(4),
            ])
            .block(Block::bordered());
        Widget::render(table, area, buf);
    }
}
