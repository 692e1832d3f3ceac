//! Interfaces to side-effecting collaborators.
//!
//! The scoring core never calls these itself. Hosts wire them up after a
//! state transition: speak the new score, or pre-fill a round from a photo.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RecognitionError;
use crate::game::Match;
use crate::history::Round;
use crate::score::RoundInput;
use crate::team::Team;
use crate::visualize::{describe_round, describe_standing};

/// Speaks text aloud, or wherever the host routes announcements.
pub trait Announcer {
    fn speak(&mut self, text: &str);
}

/// Announcer that writes to the log instead of a speaker.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn speak(&mut self, text: &str) {
        info!(target: "announce", "{text}");
    }
}

/// Announces a freshly applied round followed by the match standing.
pub fn announce_round(announcer: &mut dyn Announcer, game: &Match, round: &Round) {
    announcer.speak(&describe_round(round, game.team_names()));
    announcer.speak(&describe_standing(game));
}

/// One meld as reported by a recognizer, in its own point scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedMeld {
    pub kind: String,
    pub points: u32,
}

/// What a recognizer read from a photo of one team's won cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub raw_trick_points: u32,
    #[serde(default)]
    pub melds: Vec<RecognizedMeld>,
    pub total: u32,
    #[serde(default)]
    pub notes: String,
}

impl RecognitionResult {
    /// Copies the recognised trick points into `team`'s raw points. Melds are
    /// left for the user to confirm.
    pub fn apply_to(&self, mut input: RoundInput, team: Team) -> RoundInput {
        *input.raw_points.get_mut(team) = self.raw_trick_points;
        input
    }
}

/// Estimates trick points from a photo of captured cards.
pub trait CardRecognizer {
    fn analyze(&self, image: &[u8]) -> Result<RecognitionResult, RecognitionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_type::GameType;

    struct Fixed(u32);

    impl CardRecognizer for Fixed {
        fn analyze(&self, image: &[u8]) -> Result<RecognitionResult, RecognitionError> {
            if image.is_empty() {
                return Err(RecognitionError::UnreadableImage);
            }
            Ok(RecognitionResult {
                raw_trick_points: self.0,
                melds: vec![RecognizedMeld {
                    kind: "sira".into(),
                    points: 20,
                }],
                total: self.0 + 20,
                notes: String::new(),
            })
        }
    }

    #[test]
    fn recognition_fills_one_team() {
        let recognizer = Fixed(97);
        let result = recognizer.analyze(b"jpeg").expect("readable");
        let input = result.apply_to(
            RoundInput::new(GameType::Hokm, Team::One).with_raw(0, 65),
            Team::One,
        );
        assert_eq!(input.raw_points.team1, 97);
        assert_eq!(input.raw_points.team2, 65);
        assert_eq!(recognizer.analyze(&[]), Err(RecognitionError::UnreadableImage));
    }

    #[test]
    fn recognition_result_uses_camel_case() {
        let parsed: RecognitionResult = serde_json::from_str(
            r#"{"rawTrickPoints": 80, "melds": [{"kind": "hundred", "points": 100}], "total": 180, "notes": "blurry"}"#,
        )
        .expect("parses");
        assert_eq!(parsed.raw_trick_points, 80);
        assert_eq!(parsed.melds[0].points, 100);
    }
}
