use thiserror::Error;

use crate::meld::MeldKind;

/// Errors raised by the match state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("no match has been started")]
    NotStarted,
    #[error("a match is already in progress")]
    AlreadyStarted,
    #[error("target score must be positive")]
    InvalidTarget,
}

/// Meld declarations that exceed what a game type allows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMeld {
    #[error("{count} x {kind} exceeds the maximum of {max}")]
    TooMany { kind: MeldKind, count: u8, max: u8 },
}

/// Failures reading or writing finished-match records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures loading persisted settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported settings version {0}")]
    UnsupportedVersion(u64),
    #[error("target score must be positive")]
    InvalidTarget,
}

/// Failures reported by a card recognition service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("recognition service unavailable: {0}")]
    Unavailable(String),
    #[error("image could not be read")]
    UnreadableImage,
}
