use std::fmt::Write;

use crate::game::Match;
use crate::history::{HistoryEntry, Round};
use crate::meld::MeldSet;
use crate::multiplier::Multiplier;
use crate::state::MatchStatus;
use crate::team::{PerTeam, Team};

/// Customize scoreboard rendering for the CLI.
#[derive(Clone, Copy, Debug)]
pub struct ScoreboardOptions {
    pub show_history: bool,
    pub show_melds: bool,
}

impl Default for ScoreboardOptions {
    fn default() -> Self {
        Self {
            show_history: true,
            show_melds: true,
        }
    }
}

pub fn render_scoreboard(game: &Match) -> String {
    render_scoreboard_with_options(game, ScoreboardOptions::default())
}

pub fn render_scoreboard_with_options(game: &Match, options: ScoreboardOptions) -> String {
    let mut out = String::new();
    let names = game.team_names();
    let status = match game.status() {
        MatchStatus::Finished { winner } => format!("Finished (winner: {})", names.get(winner)),
        MatchStatus::InProgress => String::from("In progress"),
        MatchStatus::Empty => String::from("Not started"),
    };
    let _ = writeln!(out, "Match status: {status}");
    let _ = writeln!(out, "Target: {}", game.target_score());
    for team in Team::BOTH {
        let _ = writeln!(out, "{:<20} {:>5}", names.get(team), game.score(team));
    }
    if !options.show_history {
        return out;
    }
    if game.history().is_empty() {
        let _ = writeln!(out, "History: (empty)");
        return out;
    }
    let _ = writeln!(out, "History:");
    for entry in game.history() {
        match entry {
            HistoryEntry::Round(round) => {
                let _ = writeln!(out, "  {}", describe_round(round, names));
                if options.show_melds {
                    for team in Team::BOTH {
                        let melds = round.input.melds.get(team);
                        if !melds.is_empty() {
                            let _ = writeln!(
                                out,
                                "      {} melds: {}",
                                names.get(team),
                                format_melds(melds)
                            );
                        }
                    }
                }
            }
            HistoryEntry::Quick(entry) => {
                let _ = writeln!(
                    out,
                    "  Set scores to {} {} - {} {}",
                    names.team1, entry.scores.team1, entry.scores.team2, names.team2
                );
            }
        }
    }
    out
}

/// One-line summary of a round, e.g. `Round 3 (Hokm x2, bought by Us): Us 32 - 0 Them`.
pub fn describe_round(round: &Round, names: &PerTeam<String>) -> String {
    let input = &round.input;
    let mut contract = input.game_type.to_string();
    if input.multiplier != Multiplier::Normal {
        let _ = write!(contract, " {}", input.multiplier);
    }
    if let Some(sweeper) = input.sweep {
        let _ = write!(contract, ", sweep by {}", names.get(sweeper));
    }
    format!(
        "Round {} ({}, bought by {}): {} {} - {} {}",
        round.number,
        contract,
        names.get(input.buying_team),
        names.team1,
        round.result.points.team1,
        round.result.points.team2,
        names.team2
    )
}

/// Current standing as a sentence suitable for announcing.
pub fn describe_standing(game: &Match) -> String {
    let names = game.team_names();
    let scores = game.scores();
    match game.winner() {
        Some(winner) => format!(
            "{} wins the match, {} to {}",
            names.get(winner),
            scores.get(winner),
            scores.get(winner.other())
        ),
        None => format!(
            "{} {}, {} {}",
            names.team1, scores.team1, names.team2, scores.team2
        ),
    }
}

fn format_melds(melds: &MeldSet) -> String {
    melds
        .iter()
        .map(|(kind, count)| {
            if count == 1 {
                kind.to_string()
            } else {
                format!("{count} x {kind}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
