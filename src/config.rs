use serde::{Deserialize, Serialize};

use crate::game_type::DEFAULT_TARGET_SCORE;

/// How melds scale under Triple and Quadruple in Hokm.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MeldCap {
    /// Melds follow the full multiplier.
    #[default]
    #[serde(rename = "uncapped")]
    Uncapped,
    /// The winner's Hundred melds scale at most by two.
    #[serde(rename = "double-only")]
    HundredOnly,
    /// Every ordinary meld of the winner scales at most by two.
    #[serde(rename = "full")]
    AllMelds,
}

/// What the trick inputs of a round are measured in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Raw trick points, converted by the rounding rule.
    #[default]
    #[serde(rename = "raw")]
    Raw,
    /// Score units entered directly; no conversion or doubling.
    #[serde(rename = "no-raw-required")]
    ScoreUnits,
}

/// Rule toggles handed to the round calculator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ConfigFlags {
    pub meld_cap: MeldCap,
    pub rounding: RoundingMode,
    /// Match target; a forfeit awards exactly this much.
    pub target_score: u32,
}

impl Default for ConfigFlags {
    fn default() -> Self {
        Self {
            meld_cap: MeldCap::default(),
            rounding: RoundingMode::default(),
            target_score: DEFAULT_TARGET_SCORE,
        }
    }
}

impl ConfigFlags {
    pub fn with_target(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }

    pub fn with_meld_cap(mut self, meld_cap: MeldCap) -> Self {
        self.meld_cap = meld_cap;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}
