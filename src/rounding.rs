//! Conversion of raw trick points into score units.

use crate::config::RoundingMode;
use crate::game_type::GameType;

/// Divides `raw` by ten, resolving an exact half per game type.
///
/// Below a half rounds down and above rounds up. An exact half resolves up
/// and doubled in Sun (`2 * floor + 1`) and down in Hokm.
pub fn raw_to_score_units(raw: u32, game: GameType) -> u32 {
    let floor = raw / 10;
    match (raw % 10).cmp(&5) {
        std::cmp::Ordering::Less => floor,
        std::cmp::Ordering::Greater => floor + 1,
        std::cmp::Ordering::Equal => match game {
            GameType::Sun => 2 * floor + 1,
            GameType::Hokm => floor,
        },
    }
}

/// Trick score for one team in score units, before the round multiplier.
///
/// Sun results are doubled, except on an exact half where
/// [`raw_to_score_units`] already returns the doubled value. In
/// [`RoundingMode::ScoreUnits`] the input is taken as final.
pub fn trick_score_units(raw: u32, game: GameType, mode: RoundingMode) -> u32 {
    if mode == RoundingMode::ScoreUnits {
        return raw;
    }
    let units = raw_to_score_units(raw, game);
    if game.doubles_scores() && raw % 10 != 5 {
        units * 2
    } else {
        units
    }
}
