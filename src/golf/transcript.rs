//! A record of a match, for replay and debugging.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Action, MatchConfig, MatchOutcome, PlayerId, Round, RoundOutcome};

/// Everything that happened during one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub number: u8,
    pub first: PlayerId,
    /// Accepted actions, in order.
    pub actions: Vec<Action>,
    pub outcome: Option<RoundOutcome>,
}

/// Everything that happened during a match.
///
/// Together with the seed, the actions are enough to replay the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    seed: u64,
    config: MatchConfig,
    rounds: Vec<RoundRecord>,
    outcome: Option<MatchOutcome>,
}

impl Transcript {
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self {
            seed,
            config,
            rounds: vec![],
            outcome: None,
        }
    }

    #[cfg(test)]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[cfg(test)]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn begin_round(&mut self, round: &Round) {
        self.rounds.push(RoundRecord {
            number: round.number(),
            first: round.first(),
            actions: vec![],
            outcome: None,
        });
    }

    pub fn record(&mut self, action: Action) {
        if let Some(record) = self.rounds.last_mut() {
            record.actions.push(action);
        }
    }

    pub fn end_round(&mut self, outcome: &RoundOutcome) {
        if let Some(record) = self.rounds.last_mut() {
            record.outcome = Some(outcome.clone());
        }
    }

    pub fn finish(&mut self, outcome: &MatchOutcome) {
        self.outcome = Some(outcome.clone());
    }

    /// Writes the transcript as pretty-printed JSON.
    pub fn write_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
