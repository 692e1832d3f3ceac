use std::fmt;

use serde::{Deserialize, Serialize};

/// Bid escalation applied to a round.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplier {
    #[default]
    Normal,
    Double,
    Triple,
    Quadruple,
    /// Conceded before play ("coffee"): the buying team takes the match target outright.
    Forfeit,
}

impl Multiplier {
    /// Numeric scaling factor, or `None` for the forfeit override.
    #[inline]
    pub fn factor(self) -> Option<u32> {
        match self {
            Multiplier::Normal => Some(1),
            Multiplier::Double => Some(2),
            Multiplier::Triple => Some(3),
            Multiplier::Quadruple => Some(4),
            Multiplier::Forfeit => None,
        }
    }

    #[inline]
    pub fn is_forfeit(self) -> bool {
        matches!(self, Multiplier::Forfeit)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Multiplier::Normal => "normal",
            Multiplier::Double => "x2",
            Multiplier::Triple => "x3",
            Multiplier::Quadruple => "x4",
            Multiplier::Forfeit => "coffee",
        };
        f.write_str(label)
    }
}
