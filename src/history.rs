use std::fmt;

use serde::{Deserialize, Serialize};

use crate::score::{RoundInput, RoundResult};
use crate::team::PerTeam;

/// Identity of a history entry, unique within its match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A scored round. Only `number` changes after creation, when an earlier
/// round is removed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: EntryId,
    /// Position among the match's rounds, starting at 1.
    pub number: u32,
    pub input: RoundInput,
    pub result: RoundResult,
}

/// Cumulative scores typed in directly, bypassing round scoring.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuickEntry {
    pub id: EntryId,
    pub scores: PerTeam<u32>,
}

/// One entry of a match's history log.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    Round(Round),
    Quick(QuickEntry),
}

impl HistoryEntry {
    pub fn id(&self) -> EntryId {
        match self {
            HistoryEntry::Round(round) => round.id,
            HistoryEntry::Quick(entry) => entry.id,
        }
    }

    pub fn as_round(&self) -> Option<&Round> {
        match self {
            HistoryEntry::Round(round) => Some(round),
            HistoryEntry::Quick(_) => None,
        }
    }

    /// Applies this entry to running totals: rounds add, quick entries overwrite.
    pub fn fold_into(&self, totals: PerTeam<u32>) -> PerTeam<u32> {
        match self {
            HistoryEntry::Round(round) => {
                totals.map(|team, score| score.saturating_add(round.result.points_for(team)))
            }
            HistoryEntry::Quick(entry) => entry.scores,
        }
    }
}
