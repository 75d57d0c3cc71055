//! Rich terminal UI.

use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use std::thread;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};

mod hand;
mod info;
mod piles;
mod scoreboard;
use self::hand::HandGrid;
use self::info::Info;
use self::piles::Piles;
use self::scoreboard::Scoreboard;

use super::{Display, DisplayError, Event, Prompt, TableView, RULES};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// The number of events kept in the history pane.
const HISTORY_LEN: usize = 32;

/// Initializes the terminal for the TUI.
pub fn tui_init() -> io::Result<Term> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restores the original terminal mode.
pub fn tui_restore() -> io::Result<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Helper struct to keep track of UI areas in the layout.
struct Areas {
    info: Rect,
    hand: Rect,
    piles: Rect,
    message: Rect,
    score: Rect,
    history: Rect,
}

impl Areas {
    /// Performs layout math to figure out the render areas.
    fn new(frame: &Frame, players: usize) -> Self {
        let [game, side] = Layout::new(
            Direction::Horizontal,
            [Constraint::Length(40), Constraint::Min(24)],
        )
        .areas(frame.area());
        let [info, hand, piles, message] = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(4),  // round & turn
                Constraint::Length(8),  // hand
                Constraint::Length(4),  // stock & discard
                Constraint::Min(3),     // prompt & messages
            ],
        )
        .areas(game);
        let score_height = u16::try_from(players).unwrap_or(4) + 3;
        let [score, history] = Layout::new(
            Direction::Vertical,
            [Constraint::Length(score_height), Constraint::Min(3)],
        )
        .areas(side);
        Self {
            info,
            hand,
            piles,
            message,
            score,
            history,
        }
    }
}

/// Everything on screen, apart from the terminal itself.
#[derive(Debug, Default)]
struct Screen {
    view: Option<TableView>,
    /// Recent events, newest first.
    history: VecDeque<String>,
    /// The latest announcement, such as the rules or a round outcome.
    banner: Vec<String>,
    prompt: Option<Prompt>,
    error: Option<String>,
}

impl Screen {
    // Top-level frame renderer.
    fn render_frame(&self, frame: &mut Frame) {
        let players = self.view.as_ref().map_or(0, |view| view.scores.len());
        let areas = Areas::new(frame, players);
        if let Some(view) = &self.view {
            frame.render_widget(Info::new(view), areas.info);
            frame.render_widget(HandGrid::new(view.hand()), areas.hand);
            frame.render_widget(Piles::new(view), areas.piles);
            frame.render_widget(Scoreboard::new(view), areas.score);
        }

        let mut lines: Vec<Line> = self.banner.iter().map(|s| Line::from(s.clone())).collect();
        if let Some(prompt) = self.prompt {
            lines.push(Line::from(prompt.to_string()).bold());
        }
        if let Some(error) = self.error.clone() {
            lines.push(Line::from(error).red().bold());
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            areas.message,
        );

        let history: Vec<Line> = self.history.iter().map(|s| Line::from(s.clone())).collect();
        frame.render_widget(
            Paragraph::new(history)
                .wrap(Wrap { trim: true })
                .block(Block::bordered().title("History")),
            areas.history,
        );
    }
}

/// Terminal UI state.
pub struct Tui {
    terminal: Term,
    screen: Screen,
}

impl Tui {
    pub fn new(terminal: Term) -> Self {
        Self {
            terminal,
            screen: Screen::default(),
        }
    }

    fn draw(&mut self) -> Result<(), DisplayError> {
        self.terminal
            .draw(|frame| self.screen.render_frame(frame))?;
        Ok(())
    }

    /// Blocks until a key is pressed. `q` and ctrl-c quit.
    fn read_key(&mut self) -> Result<KeyCode, DisplayError> {
        loop {
            let TermEvent::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return match key.code {
                KeyCode::Char('q') => Err(DisplayError::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Err(DisplayError::Quit)
                }
                code => Ok(code),
            };
        }
    }
}

impl Display for Tui {
    fn render(&mut self, view: &TableView) -> Result<(), DisplayError> {
        self.screen.view = Some(view.clone());
        self.draw()
    }

    fn notify(&mut self, event: &Event) -> Result<(), DisplayError> {
        match event {
            Event::Deal { .. } => self.screen.banner.clear(),
            Event::Round(_) | Event::Game(_) => self.screen.banner = vec![event.to_string()],
            _ => (),
        }
        self.screen.history.push_front(event.to_string());
        self.screen.history.truncate(HISTORY_LEN);
        self.draw()
    }

    fn prompt_choice(&mut self, prompt: Prompt) -> Result<u8, DisplayError> {
        self.screen.prompt = Some(prompt);
        loop {
            self.draw()?;
            let code = self.read_key()?;
            self.screen.error = None;
            let key = match code {
                KeyCode::Char(c) => c.to_digit(10).and_then(|d| u8::try_from(d).ok()),
                _ => None,
            };
            match key {
                Some(key) if prompt.accepts(key) => {
                    self.screen.prompt = None;
                    return Ok(key);
                }
                _ => self.screen.error = Some("Invalid input, try again".into()),
            }
        }
    }

    fn reject(&mut self, err: &dyn std::error::Error) -> Result<(), DisplayError> {
        self.screen.error = Some(format!("Sorry, {err}."));
        self.draw()
    }

    fn acknowledge(&mut self, prompt: Prompt) -> Result<(), DisplayError> {
        if prompt == Prompt::Begin {
            self.screen.banner = RULES.iter().map(|s| (*s).to_string()).collect();
        }
        self.screen.prompt = Some(prompt);
        self.draw()?;
        self.read_key()?;
        self.screen.prompt = None;
        self.screen.error = None;
        if prompt == Prompt::Begin {
            self.screen.banner.clear();
        }
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
