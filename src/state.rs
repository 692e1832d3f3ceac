use serde::{Deserialize, Serialize};

use crate::team::{PerTeam, Team};

/// Lifecycle of a scorekeeping session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    /// No match has been started, or the last one was reset.
    Empty,
    InProgress,
    Finished { winner: Team },
}

impl MatchStatus {
    pub fn winner(self) -> Option<Team> {
        match self {
            MatchStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Decides the winner for a set of cumulative scores.
///
/// A team at or above the target wins. If both are, the higher score wins and
/// an exact tie leaves the match undecided.
pub fn decide_winner(scores: &PerTeam<u32>, target: u32) -> Option<Team> {
    let one = scores.team1 >= target;
    let two = scores.team2 >= target;
    match (one, two) {
        (true, false) => Some(Team::One),
        (false, true) => Some(Team::Two),
        (true, true) => match scores.team1.cmp(&scores.team2) {
            std::cmp::Ordering::Greater => Some(Team::One),
            std::cmp::Ordering::Less => Some(Team::Two),
            std::cmp::Ordering::Equal => None,
        },
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_team_over_target_wins() {
        assert_eq!(decide_winner(&PerTeam::new(152, 140), 152), Some(Team::One));
        assert_eq!(decide_winner(&PerTeam::new(10, 170), 152), Some(Team::Two));
        assert_eq!(decide_winner(&PerTeam::new(151, 151), 152), None);
    }

    #[test]
    fn both_over_target_higher_wins_tie_undecided() {
        assert_eq!(decide_winner(&PerTeam::new(160, 155), 152), Some(Team::One));
        assert_eq!(decide_winner(&PerTeam::new(155, 160), 152), Some(Team::Two));
        assert_eq!(decide_winner(&PerTeam::new(160, 160), 152), None);
    }
}
