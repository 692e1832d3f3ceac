use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two partnerships at the table. Serialized as `1` or `2`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::One, Team::Two];

    /// The opposing partnership.
    #[inline]
    pub fn other(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    /// Zero-based slot for per-team arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }

    /// Team number as shown to players (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Team::One),
            2 => Ok(Team::Two),
            other => Err(format!("team must be 1 or 2, got {other}")),
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> Self {
        team.number()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

/// A value held once per team, indexed by [`Team`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PerTeam<T> {
    pub team1: T,
    pub team2: T,
}

impl<T> PerTeam<T> {
    pub fn new(team1: T, team2: T) -> Self {
        Self { team1, team2 }
    }

    pub fn get(&self, team: Team) -> &T {
        match team {
            Team::One => &self.team1,
            Team::Two => &self.team2,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::One => &mut self.team1,
            Team::Two => &mut self.team2,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Team, T) -> U) -> PerTeam<U> {
        PerTeam {
            team1: f(Team::One, self.team1),
            team2: f(Team::Two, self.team2),
        }
    }
}
