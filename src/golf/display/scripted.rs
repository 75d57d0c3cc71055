//! A scripted display, for testing.

use std::collections::VecDeque;

use super::{Display, DisplayError, Event, Prompt, TableView};

/// Answers prompts from a fixed list of key presses, and remembers what it was shown.
///
/// Keys that don't answer the current prompt are skipped, the way an interactive display would
/// ignore them. Running out of keys quits the game.
#[derive(Debug, Default)]
pub struct Scripted {
    keys: VecDeque<u8>,
    pub events: Vec<Event>,
    pub views: Vec<TableView>,
    pub rejections: Vec<String>,
    pub ignored: Vec<u8>,
    pub acknowledged: Vec<Prompt>,
    pub pauses: usize,
}

impl Scripted {
    pub fn new<I: IntoIterator<Item = u8>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The number of keys not yet used.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Display for Scripted {
    fn render(&mut self, view: &TableView) -> Result<(), DisplayError> {
        self.views.push(view.clone());
        Ok(())
    }

    fn notify(&mut self, event: &Event) -> Result<(), DisplayError> {
        self.events.push(event.clone());
        Ok(())
    }

    fn prompt_choice(&mut self, prompt: Prompt) -> Result<u8, DisplayError> {
        loop {
            let key = self.keys.pop_front().ok_or(DisplayError::Quit)?;
            if prompt.accepts(key) {
                return Ok(key);
            }
            self.ignored.push(key);
        }
    }

    fn reject(&mut self, err: &dyn std::error::Error) -> Result<(), DisplayError> {
        self.rejections.push(err.to_string());
        Ok(())
    }

    fn acknowledge(&mut self, prompt: Prompt) -> Result<(), DisplayError> {
        self.acknowledged.push(prompt);
        Ok(())
    }

    fn pause(&mut self, _: std::time::Duration) {
        self.pauses += 1;
    }
}
