use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use crate::config::ConfigFlags;
use crate::error::MatchError;
use crate::game::Match;
use crate::history::HistoryEntry;
use crate::team::{PerTeam, Team};

/// Plain snapshot of a match as handed to persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1_name: String,
    pub team2_name: String,
    pub team1_score: u32,
    pub team2_score: u32,
    pub winner: Option<Team>,
    #[serde(default)]
    pub flags: ConfigFlags,
    #[serde(rename = "rounds")]
    pub history: Vec<HistoryEntry>,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
}

impl Match {
    pub fn to_record(&self, finished_at: OffsetDateTime) -> MatchRecord {
        let scores = self.scores();
        MatchRecord {
            team1_name: self.team_name(Team::One).to_owned(),
            team2_name: self.team_name(Team::Two).to_owned(),
            team1_score: scores.team1,
            team2_score: scores.team2,
            winner: self.winner(),
            flags: self.flags(),
            history: self.history().to_vec(),
            finished_at,
        }
    }

    /// Restores a match from a record by replaying its history. The stored
    /// totals and winner are not trusted; a mismatch is logged.
    pub fn from_record(record: MatchRecord) -> Result<Match, MatchError> {
        let stored = (PerTeam::new(record.team1_score, record.team2_score), record.winner);
        let restored = Match::restore(
            PerTeam::new(record.team1_name, record.team2_name),
            record.flags,
            record.history,
        )?;
        if stored != (restored.scores(), restored.winner()) {
            warn!(
                team1 = restored.score(Team::One),
                team2 = restored.score(Team::Two),
                winner = ?restored.winner(),
                "record totals disagree with its history; using the replayed values"
            );
        }
        Ok(restored)
    }
}
