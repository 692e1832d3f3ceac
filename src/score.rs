//! Round scoring for Baloot.
//!
//! [`compute_round_result`] maps one completed round to the points each team
//! is awarded. Branches are checked in order:
//!   1. sweep: the sweeping team takes the flat sweep bonus plus its own melds;
//!   2. forfeit: the buying team takes the match target outright;
//!   3. ordinary: the buying team must hold at least half the tricks. With a
//!      plain bid that succeeds both teams keep what they took; otherwise the
//!      round winner takes every trick point and every ordinary meld. Trick
//!      points are converted to score units, then tricks and ordinary melds are
//!      multiplied, then each team's Baloot is added unscaled.
//!
//! The function is total: any input yields a result and no award is negative.
//! Awards saturate at `u32::MAX` instead of overflowing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigFlags, MeldCap};
use crate::game_type::GameType;
use crate::meld::{MeldKind, MeldSet, bonus_meld_value, meld_value};
use crate::multiplier::Multiplier;
use crate::rounding::trick_score_units;
use crate::team::{PerTeam, Team};

/// Everything needed to score one completed round.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RoundInput {
    pub game_type: GameType,
    pub buying_team: Team,
    /// Trick points per team; raw points unless the rounding mode says otherwise.
    pub raw_points: PerTeam<u32>,
    #[serde(default)]
    pub melds: PerTeam<MeldSet>,
    #[serde(default)]
    pub multiplier: Multiplier,
    /// Team that took every trick, if any. Overrides the trick points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Team>,
}

impl RoundInput {
    pub fn new(game_type: GameType, buying_team: Team) -> Self {
        Self {
            game_type,
            buying_team,
            raw_points: PerTeam::default(),
            melds: PerTeam::default(),
            multiplier: Multiplier::Normal,
            sweep: None,
        }
    }

    pub fn with_raw(mut self, team1: u32, team2: u32) -> Self {
        self.raw_points = PerTeam::new(team1, team2);
        self
    }

    pub fn with_melds(mut self, team: Team, melds: MeldSet) -> Self {
        *self.melds.get_mut(team) = melds;
        self
    }

    pub fn with_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_sweep(mut self, team: Team) -> Self {
        self.sweep = Some(team);
        self
    }
}

/// Points awarded for one round.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RoundResult {
    pub winning_team: Team,
    pub points: PerTeam<u32>,
}

impl RoundResult {
    fn sole(team: Team, award: u32) -> Self {
        let mut points = PerTeam::default();
        *points.get_mut(team) = award;
        Self {
            winning_team: team,
            points,
        }
    }

    #[inline]
    pub fn points_for(&self, team: Team) -> u32 {
        *self.points.get(team)
    }
}

/// Scores a single round. Pure and deterministic.
pub fn compute_round_result(input: &RoundInput, flags: &ConfigFlags) -> RoundResult {
    let game = input.game_type;

    if let Some(sweeper) = input.sweep {
        let melds = input.melds.get(sweeper);
        let award = game.sweep_bonus() + meld_value(melds, game) + bonus_meld_value(melds, game);
        debug!(%game, team = %sweeper, award, "sweep round");
        return RoundResult::sole(sweeper, award);
    }

    let Some(factor) = input.multiplier.factor() else {
        debug!(team = %input.buying_team, award = flags.target_score, "forfeit round");
        return RoundResult::sole(input.buying_team, flags.target_score);
    };

    let buyer = input.buying_team;
    let defender = buyer.other();
    let buyer_raw = *input.raw_points.get(buyer);
    let defender_raw = *input.raw_points.get(defender);
    let total_raw = buyer_raw.saturating_add(defender_raw);
    let succeeded = u64::from(buyer_raw) * 2 >= u64::from(buyer_raw) + u64::from(defender_raw)
        && buyer_raw >= defender_raw;
    let winner = if succeeded { buyer } else { defender };

    let ordinary = input.melds.map(|_, melds| meld_value(&melds, game));
    let bonus = input.melds.map(|_, melds| bonus_meld_value(&melds, game));

    let keep_own = factor == 1 && succeeded;
    let (tricks, melds) = if keep_own {
        (input.raw_points, ordinary)
    } else {
        let all_melds = ordinary.team1.saturating_add(ordinary.team2);
        (
            input.raw_points.map(|team, _| if team == winner { total_raw } else { 0 }),
            ordinary.map(|team, _| if team == winner { all_melds } else { 0 }),
        )
    };

    let mut points = tricks.map(|team, raw| {
        let units = trick_score_units(raw, game, flags.rounding);
        units
            .saturating_mul(factor)
            .saturating_add(melds.get(team).saturating_mul(factor))
            .saturating_add(*bonus.get(team))
    });

    let excess = capped_meld_excess(input, flags, factor);
    if excess > 0 {
        let award = points.get_mut(winner);
        *award = award.saturating_sub(excess);
    }

    debug!(
        %game,
        buyer = %buyer,
        succeeded,
        factor,
        team1 = points.team1,
        team2 = points.team2,
        "scored round"
    );

    RoundResult {
        winning_team: winner,
        points,
    }
}

/// Meld value the winner loses when the cap limits melds to twice their base
/// value under Triple and Quadruple in Hokm.
fn capped_meld_excess(input: &RoundInput, flags: &ConfigFlags, factor: u32) -> u32 {
    if input.game_type != GameType::Hokm || factor <= 2 {
        return 0;
    }
    let capped: &[MeldKind] = match flags.meld_cap {
        MeldCap::Uncapped => return 0,
        MeldCap::HundredOnly => &[MeldKind::Hundred],
        MeldCap::AllMelds => &MeldKind::ORDINARY,
    };
    let base: u32 = capped
        .iter()
        .map(|&kind| {
            let held = u32::from(input.melds.team1.count(kind))
                + u32::from(input.melds.team2.count(kind));
            held * kind.value(input.game_type)
        })
        .sum();
    base * (factor - 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;

    fn hokm(buyer: Team, team1: u32, team2: u32) -> RoundInput {
        RoundInput::new(GameType::Hokm, buyer).with_raw(team1, team2)
    }

    #[test]
    fn plain_hokm_success_keeps_both_sides() {
        let result = compute_round_result(&hokm(Team::One, 100, 62), &ConfigFlags::default());
        assert_eq!(result.winning_team, Team::One);
        assert_eq!(result.points, PerTeam::new(10, 6));
    }

    #[test]
    fn failed_buyer_loses_everything() {
        let result = compute_round_result(&hokm(Team::One, 60, 102), &ConfigFlags::default());
        assert_eq!(result.winning_team, Team::Two);
        assert_eq!(result.points, PerTeam::new(0, 16));
    }

    #[test]
    fn exact_half_is_a_buyer_success() {
        let result = compute_round_result(&hokm(Team::Two, 81, 81), &ConfigFlags::default());
        assert_eq!(result.winning_team, Team::Two);
        assert_eq!(result.points, PerTeam::new(8, 8));
    }

    #[test]
    fn sun_scores_are_doubled() {
        let input = RoundInput::new(GameType::Sun, Team::One).with_raw(74, 56);
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.points, PerTeam::new(14, 12));
    }

    #[test]
    fn failed_buyer_melds_go_to_defenders() {
        let input =
            hokm(Team::One, 50, 112).with_melds(Team::One, MeldSet::new().with(MeldKind::Fifty, 1));
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.points, PerTeam::new(0, 21));
    }

    #[test]
    fn baloot_stays_with_its_team_and_is_not_multiplied() {
        let input = hokm(Team::One, 120, 42)
            .with_multiplier(Multiplier::Double)
            .with_melds(Team::Two, MeldSet::new().with(MeldKind::Baloot, 1));
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.points, PerTeam::new(32, 2));
    }

    #[test]
    fn double_redistributes_on_success() {
        let input = hokm(Team::One, 100, 62).with_multiplier(Multiplier::Double);
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.points, PerTeam::new(32, 0));
    }

    #[test]
    fn forfeit_awards_target_score() {
        let input = hokm(Team::One, 10, 152)
            .with_multiplier(Multiplier::Forfeit)
            .with_melds(Team::Two, MeldSet::new().with(MeldKind::Hundred, 2));
        let flags = ConfigFlags::default().with_target(152);
        let result = compute_round_result(&input, &flags);
        assert_eq!(result.winning_team, Team::One);
        assert_eq!(result.points, PerTeam::new(152, 0));
    }

    #[test]
    fn sweep_ignores_multiplier_and_tricks() {
        let input = hokm(Team::One, 80, 82)
            .with_multiplier(Multiplier::Quadruple)
            .with_sweep(Team::Two);
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.winning_team, Team::Two);
        assert_eq!(result.points, PerTeam::new(0, 25));
    }

    #[test]
    fn sweep_adds_own_melds_only() {
        let input = RoundInput::new(GameType::Sun, Team::One)
            .with_sweep(Team::One)
            .with_melds(Team::One, MeldSet::new().with(MeldKind::Sira, 1))
            .with_melds(Team::Two, MeldSet::new().with(MeldKind::Hundred, 1));
        let result = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(result.points, PerTeam::new(48, 0));
    }

    #[test]
    fn hundred_cap_limits_winner_melds_to_double() {
        let input = hokm(Team::One, 100, 62)
            .with_multiplier(Multiplier::Triple)
            .with_melds(
                Team::One,
                MeldSet::new()
                    .with(MeldKind::Hundred, 1)
                    .with(MeldKind::Sira, 1),
            );
        let uncapped = compute_round_result(&input, &ConfigFlags::default());
        assert_eq!(uncapped.points, PerTeam::new(16 * 3 + 12 * 3, 0));

        let hundred_only = ConfigFlags::default().with_meld_cap(MeldCap::HundredOnly);
        let capped = compute_round_result(&input, &hundred_only);
        assert_eq!(capped.points, PerTeam::new(16 * 3 + 20 + 2 * 3, 0));

        let all = ConfigFlags::default().with_meld_cap(MeldCap::AllMelds);
        let capped = compute_round_result(&input, &all);
        assert_eq!(capped.points, PerTeam::new(16 * 3 + 24, 0));
    }

    #[test]
    fn cap_does_not_touch_sun_or_double() {
        let flags = ConfigFlags::default().with_meld_cap(MeldCap::AllMelds);
        let melds = MeldSet::new().with(MeldKind::Hundred, 1);
        let double = hokm(Team::One, 100, 62)
            .with_multiplier(Multiplier::Double)
            .with_melds(Team::One, melds);
        assert_eq!(compute_round_result(&double, &flags).points.team1, 32 + 20);

        let sun = RoundInput::new(GameType::Sun, Team::One)
            .with_raw(100, 30)
            .with_multiplier(Multiplier::Quadruple)
            .with_melds(Team::One, melds);
        assert_eq!(compute_round_result(&sun, &flags).points.team1, 26 * 4 + 80);
    }

    #[test]
    fn huge_inputs_saturate_instead_of_overflowing() {
        let result = compute_round_result(
            &hokm(Team::One, 3_000_000_000, 2_000_000_000),
            &ConfigFlags::default(),
        );
        assert_eq!(result.winning_team, Team::One);
        assert_eq!(result.points, PerTeam::new(300_000_000, 200_000_000));

        let flags = ConfigFlags::default().with_rounding(RoundingMode::ScoreUnits);
        let input = hokm(Team::Two, 0, 2_000_000_000).with_multiplier(Multiplier::Quadruple);
        let result = compute_round_result(&input, &flags);
        assert_eq!(result.points, PerTeam::new(0, u32::MAX));
    }

    #[test]
    fn score_unit_mode_skips_conversion() {
        let flags = ConfigFlags::default().with_rounding(RoundingMode::ScoreUnits);
        let input = RoundInput::new(GameType::Sun, Team::Two).with_raw(10, 16);
        let result = compute_round_result(&input, &flags);
        assert_eq!(result.points, PerTeam::new(10, 16));
    }
}
