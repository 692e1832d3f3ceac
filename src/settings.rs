//! Persisted user settings.
//!
//! Settings are stored as JSON with a `version` field. Older shapes are
//! upgraded once on load and only the current version is ever written.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::{ConfigFlags, MeldCap, RoundingMode};
use crate::error::SettingsError;
use crate::game_type::DEFAULT_TARGET_SCORE;

pub const CURRENT_VERSION: u64 = 2;

/// Current settings shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub target_score: u32,
    #[serde(default)]
    pub meld_cap: MeldCap,
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            meld_cap: MeldCap::default(),
            rounding: RoundingMode::default(),
        }
    }
}

/// First shape: a target and a single switch capping the Hundred meld.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsV1 {
    #[serde(default = "default_target")]
    winning_score: u32,
    #[serde(default)]
    cap_hundred: bool,
}

fn default_target() -> u32 {
    DEFAULT_TARGET_SCORE
}

impl From<SettingsV1> for Settings {
    fn from(old: SettingsV1) -> Self {
        Settings {
            target_score: old.winning_score,
            meld_cap: if old.cap_hundred {
                MeldCap::HundredOnly
            } else {
                MeldCap::Uncapped
            },
            rounding: RoundingMode::Raw,
        }
    }
}

#[derive(Serialize)]
struct Versioned<'a> {
    version: u64,
    #[serde(flatten)]
    settings: &'a Settings,
}

impl Settings {
    /// Parses any known settings version, upgrading to the current shape.
    /// A missing `version` field means version 1.
    pub fn from_json(text: &str) -> Result<Settings, SettingsError> {
        let value: Value = serde_json::from_str(text)?;
        let version = value.get("version").and_then(Value::as_u64).unwrap_or(1);
        let settings = match version {
            1 => {
                let old: SettingsV1 = serde_json::from_value(value)?;
                info!("upgraded settings from version 1");
                Settings::from(old)
            }
            CURRENT_VERSION => serde_json::from_value(value)?,
            other => return Err(SettingsError::UnsupportedVersion(other)),
        };
        if settings.target_score == 0 {
            return Err(SettingsError::InvalidTarget);
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        let versioned = Versioned {
            version: CURRENT_VERSION,
            settings: self,
        };
        Ok(serde_json::to_string_pretty(&versioned)?)
    }

    pub fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            meld_cap: self.meld_cap,
            rounding: self.rounding,
            target_score: self.target_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_settings_are_upgraded() {
        let settings = Settings::from_json(r#"{"winningScore": 100, "capHundred": true}"#)
            .expect("v1 parses");
        assert_eq!(
            settings,
            Settings {
                target_score: 100,
                meld_cap: MeldCap::HundredOnly,
                rounding: RoundingMode::Raw,
            }
        );
    }

    #[test]
    fn current_settings_round_trip() {
        let settings = Settings {
            target_score: 200,
            meld_cap: MeldCap::AllMelds,
            rounding: RoundingMode::ScoreUnits,
        };
        let json = settings.to_json().expect("encodes");
        assert!(json.contains("\"version\": 2"));
        assert!(json.contains("\"no-raw-required\""));
        assert_eq!(Settings::from_json(&json).expect("decodes"), settings);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = Settings::from_json(r#"{"version": 9}"#).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedVersion(9)));
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = Settings::from_json(r#"{"version": 2, "target_score": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidTarget));
    }
}
