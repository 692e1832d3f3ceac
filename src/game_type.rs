use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw trick points on the table in a Sun round, ground bonus included.
pub const SUN_RAW_TOTAL: u32 = 130;
/// Raw trick points on the table in a Hokm round, ground bonus included.
pub const HOKM_RAW_TOTAL: u32 = 162;
/// Points for the team taking the last trick, already part of the raw totals.
pub const GROUND_BONUS: u32 = 10;
/// Score units awarded for a sweep in Sun.
pub const SUN_SWEEP_BONUS: u32 = 44;
/// Score units awarded for a sweep in Hokm.
pub const HOKM_SWEEP_BONUS: u32 = 25;
/// Conventional target for a full match.
pub const DEFAULT_TARGET_SCORE: u32 = 152;

/// The contract chosen by the buying team for a round.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// No-trump game. Scores are doubled and half points resolve upward.
    Sun,
    /// Trump game. Half points resolve downward and the Baloot meld exists.
    Hokm,
}

impl GameType {
    /// Total raw points available on the table.
    #[inline]
    pub fn raw_total(self) -> u32 {
        match self {
            GameType::Sun => SUN_RAW_TOTAL,
            GameType::Hokm => HOKM_RAW_TOTAL,
        }
    }

    /// Flat award for taking every trick.
    #[inline]
    pub fn sweep_bonus(self) -> u32 {
        match self {
            GameType::Sun => SUN_SWEEP_BONUS,
            GameType::Hokm => HOKM_SWEEP_BONUS,
        }
    }

    /// Whether trick scores are doubled after conversion to score units.
    #[inline]
    pub fn doubles_scores(self) -> bool {
        matches!(self, GameType::Sun)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Sun => f.write_str("Sun"),
            GameType::Hokm => f.write_str("Hokm"),
        }
    }
}
