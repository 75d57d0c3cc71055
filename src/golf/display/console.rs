//! Simple console display.

use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use ansi_term::{ANSIString, ANSIStrings, Style};

use super::super::{Card, Phase, PlayerId, RULES};
use super::{Display, DisplayError, Event, Prompt, TableView};

pub struct Console {
    color: bool,
}

/// Reads a line from stdin. End of input, or a lone `q`, means the player wants to quit.
fn read_line<S: fmt::Display>(prompt: S) -> Result<String, DisplayError> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut buffer = String::new();
    print!("{prompt} ");
    stdout.flush()?;
    if stdin.read_line(&mut buffer)? == 0 {
        return Err(DisplayError::Quit);
    }
    let line = buffer.trim();
    if line.eq_ignore_ascii_case("q") {
        return Err(DisplayError::Quit);
    }
    Ok(line.to_string())
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_card(&self, card: Option<Card>) -> String {
        match card {
            Some(card) => self.format(&ANSIStrings(&[card.to_ansi_string()])),
            None => "--".into(),
        }
    }

    fn format_row(&self, row: &[(u8, Card)]) -> String {
        let mut parts: Vec<ANSIString> = vec![];
        for (pos, card) in row {
            parts.push(format!("  [{pos}] ").into());
            parts.push(card.to_ansi_string());
            if card.to_string().len() < 2 {
                parts.push(" ".into());
            }
        }
        self.format(&ANSIStrings(&parts))
    }

    fn format_scores(&self, view: &TableView) -> String {
        let mut parts: Vec<ANSIString> = vec!["Scores:".into()];
        for (index, score) in view.scores.iter().enumerate() {
            let player = PlayerId::from_index(index);
            let text = format!(" {}={score}", player.to_abbr());
            parts.push(if player == view.player {
                Style::new().bold().paint(text)
            } else {
                text.into()
            });
        }
        self.format(&ANSIStrings(&parts))
    }
}

impl Display for Console {
    fn render(&mut self, view: &TableView) -> Result<(), DisplayError> {
        println!();
        let lap = match view.phase {
            Phase::FinalLap { .. } => " (last turn!)",
            _ => "",
        };
        println!(
            "Round {} of {} | {}'s turn{lap}",
            view.round, view.rounds, view.player
        );
        println!(
            "Stock ({}): {}   Discard: {}",
            view.stock_len,
            self.format_card(view.stock_top),
            self.format_card(view.discard_top)
        );
        for row in view.hand().rows() {
            println!("{}", self.format_row(&row));
        }
        println!("{}", self.format_scores(view));
        Ok(())
    }

    fn notify(&mut self, event: &Event) -> Result<(), DisplayError> {
        match event {
            Event::Round(outcome) => {
                println!("{event}");
                for (index, delta) in outcome.deltas().iter().enumerate() {
                    let player = PlayerId::from_index(index);
                    println!(
                        "  {player}: {delta:+} this round, {} total",
                        outcome.scores[index]
                    );
                }
            }
            Event::Game(outcome) => {
                println!("{event}");
                for (index, score) in outcome.scores.iter().enumerate() {
                    println!("  {}: {score}", PlayerId::from_index(index));
                }
            }
            // Scores are shown with the table.
            Event::TurnComplete { .. } => (),
            _ => println!("{event}"),
        }
        Ok(())
    }

    fn prompt_choice(&mut self, prompt: Prompt) -> Result<u8, DisplayError> {
        loop {
            let line = read_line(format_args!("{prompt}:"))?;
            match line.parse::<u8>() {
                Ok(key) if prompt.accepts(key) => return Ok(key),
                _ => println!("Invalid input, try again"),
            }
        }
    }

    fn reject(&mut self, err: &dyn std::error::Error) -> Result<(), DisplayError> {
        let text = format!("Sorry, {err}.");
        println!("{}", self.format(&ANSIStrings(&[Style::new().bold().paint(text)])));
        Ok(())
    }

    fn acknowledge(&mut self, prompt: Prompt) -> Result<(), DisplayError> {
        if prompt == Prompt::Begin {
            println!("Welcome to Golf!");
            for rule in RULES {
                println!("  * {rule}");
            }
        }
        read_line(format_args!("{prompt}:"))?;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_without_color() {
        let plain = Console::new(false);
        assert_eq!(plain.format_card(Some(card("Q^"))), "Q");
        assert_eq!(plain.format_card(None), "--");
        assert_eq!(
            plain.format_row(&[(1, card("2^")), (2, card("5"))]),
            "  [1] 2   [2] ##"
        );

        let colored = Console::new(true);
        assert!(colored.format_card(Some(card("Q^"))).contains("\x1b["));
    }
}
