use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::ConfigFlags;
use crate::error::MatchError;
use crate::history::{EntryId, HistoryEntry, QuickEntry, Round};
use crate::score::{RoundInput, compute_round_result};
use crate::state::{MatchStatus, decide_winner};
use crate::team::{PerTeam, Team};

/// Builder for [`Match`], mainly to pin the id generator in tests.
pub struct MatchBuilder {
    team_names: PerTeam<String>,
    flags: ConfigFlags,
    seed: Option<u64>,
}

impl MatchBuilder {
    pub fn new(team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            team_names: PerTeam::new(team1.into(), team2.into()),
            flags: ConfigFlags::default(),
            seed: None,
        }
    }

    pub fn with_flags(mut self, flags: ConfigFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_target(mut self, target_score: u32) -> Self {
        self.flags.target_score = target_score;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Match, MatchError> {
        if self.flags.target_score == 0 {
            return Err(MatchError::InvalidTarget);
        }
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Match {
            team_names: self.team_names,
            flags: self.flags,
            history: Vec::new(),
            scores: PerTeam::default(),
            winner: None,
            rng,
        })
    }
}

/// Running score of one match between two teams.
///
/// Cumulative scores always equal the fold of the history log: rounds add
/// their award and quick entries overwrite the totals.
#[derive(Clone, Debug)]
pub struct Match {
    team_names: PerTeam<String>,
    flags: ConfigFlags,
    history: Vec<HistoryEntry>,
    scores: PerTeam<u32>,
    winner: Option<Team>,
    rng: StdRng,
}

impl Match {
    pub fn builder(team1: impl Into<String>, team2: impl Into<String>) -> MatchBuilder {
        MatchBuilder::new(team1, team2)
    }

    pub fn new(
        team1: impl Into<String>,
        team2: impl Into<String>,
        flags: ConfigFlags,
    ) -> Result<Self, MatchError> {
        MatchBuilder::new(team1, team2).with_flags(flags).build()
    }

    /// Rebuilds a match from persisted parts by replaying its history.
    pub(crate) fn restore(
        team_names: PerTeam<String>,
        flags: ConfigFlags,
        history: Vec<HistoryEntry>,
    ) -> Result<Self, MatchError> {
        let mut restored = MatchBuilder {
            team_names,
            flags,
            seed: None,
        }
        .build()?;
        restored.history = history;
        restored.renumber();
        let (scores, winner) = restored.replay();
        restored.scores = scores;
        restored.winner = winner;
        Ok(restored)
    }

    pub fn team_name(&self, team: Team) -> &str {
        self.team_names.get(team)
    }

    pub fn team_names(&self) -> &PerTeam<String> {
        &self.team_names
    }

    pub fn flags(&self) -> ConfigFlags {
        self.flags
    }

    pub fn target_score(&self) -> u32 {
        self.flags.target_score
    }

    pub fn scores(&self) -> PerTeam<u32> {
        self.scores
    }

    pub fn score(&self, team: Team) -> u32 {
        *self.scores.get(team)
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn status(&self) -> MatchStatus {
        match self.winner {
            Some(winner) => MatchStatus::Finished { winner },
            None => MatchStatus::InProgress,
        }
    }

    /// Every entry in insertion order.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.history.iter().filter_map(HistoryEntry::as_round)
    }

    pub fn round_count(&self) -> usize {
        self.rounds().count()
    }

    /// Scores `input`, appends it as the next round and updates the totals.
    ///
    /// Finished matches still accept rounds but keep their winner; only a
    /// delete or undo reopens them.
    pub fn apply_round(&mut self, input: RoundInput) -> Round {
        let result = compute_round_result(&input, &self.flags);
        let round = Round {
            id: self.next_id(),
            number: self.round_count() as u32 + 1,
            input,
            result,
        };
        self.scores = self
            .scores
            .map(|team, score| score.saturating_add(result.points_for(team)));
        if self.winner.is_none() {
            self.update_winner();
        }
        debug!(
            round = round.number,
            team1 = self.scores.team1,
            team2 = self.scores.team2,
            "applied round"
        );
        self.history.push(HistoryEntry::Round(round.clone()));
        round
    }

    /// Overwrites the cumulative scores without scoring a round.
    pub fn set_scores_directly(&mut self, team1: u32, team2: u32) -> EntryId {
        let id = self.next_id();
        let scores = PerTeam::new(team1, team2);
        self.history
            .push(HistoryEntry::Quick(QuickEntry { id, scores }));
        self.scores = scores;
        self.update_winner();
        debug!(team1, team2, "scores set directly");
        id
    }

    /// Removes the entry with `id`, renumbers rounds and recomputes totals.
    ///
    /// The winner is always cleared, even if the removed entry did not decide
    /// the match. Unknown ids leave the match untouched and return `None`.
    pub fn delete_entry(&mut self, id: EntryId) -> Option<HistoryEntry> {
        let position = self.history.iter().position(|entry| entry.id() == id)?;
        let removed = self.history.remove(position);
        self.renumber();
        self.scores = self.fold_scores();
        self.winner = None;
        debug!(%id, team1 = self.scores.team1, team2 = self.scores.team2, "deleted entry");
        Some(removed)
    }

    /// Removes the most recent history entry.
    pub fn undo_last(&mut self) -> Option<HistoryEntry> {
        let id = self.history.last()?.id();
        self.delete_entry(id)
    }

    fn update_winner(&mut self) {
        let was_finished = self.winner.is_some();
        self.winner = decide_winner(&self.scores, self.flags.target_score);
        if let (false, Some(winner)) = (was_finished, self.winner) {
            info!(
                winner = self.team_names.get(winner).as_str(),
                team1 = self.scores.team1,
                team2 = self.scores.team2,
                "match finished"
            );
        }
    }

    fn fold_scores(&self) -> PerTeam<u32> {
        self.history
            .iter()
            .fold(PerTeam::default(), |totals, entry| entry.fold_into(totals))
    }

    /// Totals and winner as live play would have left them: rounds can only
    /// decide an open match, quick entries re-decide it.
    fn replay(&self) -> (PerTeam<u32>, Option<Team>) {
        let target = self.flags.target_score;
        self.history
            .iter()
            .fold((PerTeam::default(), None), |(totals, winner), entry| {
                let totals = entry.fold_into(totals);
                let winner = match entry {
                    HistoryEntry::Round(_) => winner.or_else(|| decide_winner(&totals, target)),
                    HistoryEntry::Quick(_) => decide_winner(&totals, target),
                };
                (totals, winner)
            })
    }

    fn renumber(&mut self) {
        let mut number = 0;
        for entry in &mut self.history {
            if let HistoryEntry::Round(round) = entry {
                number += 1;
                round.number = number;
            }
        }
    }

    fn next_id(&mut self) -> EntryId {
        loop {
            let id = EntryId(self.rng.r#gen());
            if !self.history.iter().any(|entry| entry.id() == id) {
                return id;
            }
        }
    }
}

/// Holds at most one live match and enforces the Empty / InProgress /
/// Finished lifecycle around it.
#[derive(Clone, Debug, Default)]
pub struct Scorekeeper {
    flags: ConfigFlags,
    current: Option<Match>,
}

impl Scorekeeper {
    /// `flags` apply to every match started here; `start` supplies the target.
    pub fn new(flags: ConfigFlags) -> Self {
        Self {
            flags,
            current: None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.current
            .as_ref()
            .map(Match::status)
            .unwrap_or(MatchStatus::Empty)
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn start(
        &mut self,
        team1: impl Into<String>,
        team2: impl Into<String>,
        target_score: u32,
    ) -> Result<&Match, MatchError> {
        if self.current.is_some() {
            return Err(MatchError::AlreadyStarted);
        }
        let started = Match::builder(team1, team2)
            .with_flags(self.flags)
            .with_target(target_score)
            .build()?;
        info!(
            team1 = started.team_name(Team::One),
            team2 = started.team_name(Team::Two),
            target_score,
            "match started"
        );
        let started: &Match = self.current.insert(started);
        Ok(started)
    }

    /// Adopts an already built match, e.g. one restored from a record.
    pub fn resume(&mut self, restored: Match) -> Result<&Match, MatchError> {
        if self.current.is_some() {
            return Err(MatchError::AlreadyStarted);
        }
        let restored: &Match = self.current.insert(restored);
        Ok(restored)
    }

    pub fn apply_round(&mut self, input: RoundInput) -> Result<Round, MatchError> {
        Ok(self.live()?.apply_round(input))
    }

    pub fn delete_round(&mut self, id: EntryId) -> Result<Option<HistoryEntry>, MatchError> {
        Ok(self.live()?.delete_entry(id))
    }

    pub fn undo_last(&mut self) -> Result<Option<HistoryEntry>, MatchError> {
        Ok(self.live()?.undo_last())
    }

    pub fn set_scores_directly(&mut self, team1: u32, team2: u32) -> Result<EntryId, MatchError> {
        Ok(self.live()?.set_scores_directly(team1, team2))
    }

    /// Drops the current match, returning it so the caller can persist it.
    pub fn reset(&mut self) -> Option<Match> {
        let dropped = self.current.take();
        if dropped.is_some() {
            info!("match reset");
        }
        dropped
    }

    fn live(&mut self) -> Result<&mut Match, MatchError> {
        self.current.as_mut().ok_or(MatchError::NotStarted)
    }
}
