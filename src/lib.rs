//! Round and match scoring for the card game Baloot.

pub mod capability;
pub mod config;
pub mod error;
pub mod game;
pub mod game_type;
pub mod history;
pub mod meld;
pub mod multiplier;
pub mod record;
pub mod rounding;
pub mod score;
pub mod settings;
pub mod state;
pub mod store;
pub mod team;
pub mod visualize;

pub use crate::capability::{
    Announcer, CardRecognizer, LogAnnouncer, RecognitionResult, RecognizedMeld, announce_round,
};
pub use crate::config::{ConfigFlags, MeldCap, RoundingMode};
pub use crate::error::{InvalidMeld, MatchError, RecognitionError, SettingsError, StoreError};
pub use crate::game::{Match, MatchBuilder, Scorekeeper};
pub use crate::game_type::{DEFAULT_TARGET_SCORE, GameType};
pub use crate::history::{EntryId, HistoryEntry, QuickEntry, Round};
pub use crate::meld::{MeldKind, MeldSet, bonus_meld_value, meld_value};
pub use crate::multiplier::Multiplier;
pub use crate::record::MatchRecord;
pub use crate::rounding::{raw_to_score_units, trick_score_units};
pub use crate::score::{RoundInput, RoundResult, compute_round_result};
pub use crate::settings::Settings;
pub use crate::state::{MatchStatus, decide_winner};
pub use crate::store::{JsonLinesStore, MatchStore, MemoryStore};
pub use crate::team::{PerTeam, Team};
pub use crate::visualize::{
    ScoreboardOptions, describe_round, describe_standing, render_scoreboard,
};
