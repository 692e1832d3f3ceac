//! Declared melds ("projects") and their value in score units.
//!
//! Ordinary melds scale with the round multiplier and can change hands when
//! the round is redistributed. The Baloot meld (king and queen of trump) is a
//! Hokm-only flat bonus that always stays with the team that declared it and
//! is never multiplied.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidMeld;
use crate::game_type::GameType;

pub const MELD_KIND_COUNT: usize = 5;
pub const BALOOT_VALUE: u32 = 2;

/// Kinds of melds a team can declare.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    /// Three cards in sequence.
    Sira,
    /// Four cards in sequence.
    Fifty,
    /// Five in sequence, or four of a kind in tens or court cards.
    Hundred,
    /// Four aces, Sun only.
    FourHundred,
    /// King and queen of trump, Hokm only. Never multiplied.
    Baloot,
}

impl MeldKind {
    pub const ALL: [MeldKind; MELD_KIND_COUNT] = [
        MeldKind::Sira,
        MeldKind::Fifty,
        MeldKind::Hundred,
        MeldKind::FourHundred,
        MeldKind::Baloot,
    ];

    /// Kinds that scale with the multiplier and follow redistribution.
    pub const ORDINARY: [MeldKind; 4] = [
        MeldKind::Sira,
        MeldKind::Fifty,
        MeldKind::Hundred,
        MeldKind::FourHundred,
    ];

    #[inline]
    fn slot(self) -> usize {
        match self {
            MeldKind::Sira => 0,
            MeldKind::Fifty => 1,
            MeldKind::Hundred => 2,
            MeldKind::FourHundred => 3,
            MeldKind::Baloot => 4,
        }
    }

    /// Value of a single meld of this kind, in score units. Zero where the
    /// kind does not exist in the game type.
    pub fn value(self, game: GameType) -> u32 {
        match (self, game) {
            (MeldKind::Sira, GameType::Sun) => 4,
            (MeldKind::Sira, GameType::Hokm) => 2,
            (MeldKind::Fifty, GameType::Sun) => 10,
            (MeldKind::Fifty, GameType::Hokm) => 5,
            (MeldKind::Hundred, GameType::Sun) => 20,
            (MeldKind::Hundred, GameType::Hokm) => 10,
            (MeldKind::FourHundred, GameType::Sun) => 40,
            (MeldKind::FourHundred, GameType::Hokm) => 0,
            (MeldKind::Baloot, GameType::Sun) => 0,
            (MeldKind::Baloot, GameType::Hokm) => BALOOT_VALUE,
        }
    }

    /// Highest count of this kind one team can hold in a round of `game`.
    pub fn max_count(self, game: GameType) -> u8 {
        if self.value(game) == 0 {
            return 0;
        }
        self.limit()
    }

    /// Highest count across all game types; used for clamping.
    #[inline]
    fn limit(self) -> u8 {
        match self {
            MeldKind::Sira => 4,
            MeldKind::Fifty | MeldKind::Hundred => 2,
            MeldKind::FourHundred | MeldKind::Baloot => 1,
        }
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, MeldKind::Baloot)
    }
}

impl fmt::Display for MeldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeldKind::Sira => "sira",
            MeldKind::Fifty => "fifty",
            MeldKind::Hundred => "hundred",
            MeldKind::FourHundred => "four hundred",
            MeldKind::Baloot => "baloot",
        };
        f.write_str(label)
    }
}

/// Meld counts declared by one team. Counts are clamped to each kind's
/// maximum on construction and on deserialization.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "MeldCounts", into = "MeldCounts")]
pub struct MeldSet {
    counts: [u8; MELD_KIND_COUNT],
}

impl MeldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `kind` set to `count`, clamped to the kind's limit.
    pub fn with(mut self, kind: MeldKind, count: u8) -> Self {
        self.counts[kind.slot()] = count.min(kind.limit());
        self
    }

    /// Like [`MeldSet::with`] but rejects counts the game type does not allow.
    pub fn try_with(self, kind: MeldKind, count: u8, game: GameType) -> Result<Self, InvalidMeld> {
        let max = kind.max_count(game);
        if count > max {
            return Err(InvalidMeld::TooMany { kind, count, max });
        }
        Ok(self.with(kind, count))
    }

    #[inline]
    pub fn count(&self, kind: MeldKind) -> u8 {
        self.counts[kind.slot()]
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeldKind, u8)> + '_ {
        MeldKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .filter(|&(_, count)| count > 0)
    }
}

/// Sum of the ordinary (multiplying) melds in `melds`, in score units.
pub fn meld_value(melds: &MeldSet, game: GameType) -> u32 {
    MeldKind::ORDINARY
        .iter()
        .map(|&kind| u32::from(melds.count(kind)) * kind.value(game))
        .sum()
}

/// Value of the non-multiplying Baloot meld. Always zero outside Hokm.
pub fn bonus_meld_value(melds: &MeldSet, game: GameType) -> u32 {
    u32::from(melds.count(MeldKind::Baloot)) * MeldKind::Baloot.value(game)
}

/// Serialized shape of a [`MeldSet`].
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct MeldCounts {
    sira: u8,
    fifty: u8,
    hundred: u8,
    four_hundred: u8,
    baloot: u8,
}

impl From<MeldCounts> for MeldSet {
    fn from(raw: MeldCounts) -> Self {
        MeldSet::new()
            .with(MeldKind::Sira, raw.sira)
            .with(MeldKind::Fifty, raw.fifty)
            .with(MeldKind::Hundred, raw.hundred)
            .with(MeldKind::FourHundred, raw.four_hundred)
            .with(MeldKind::Baloot, raw.baloot)
    }
}

impl From<MeldSet> for MeldCounts {
    fn from(set: MeldSet) -> Self {
        MeldCounts {
            sira: set.count(MeldKind::Sira),
            fifty: set.count(MeldKind::Fifty),
            hundred: set.count(MeldKind::Hundred),
            four_hundred: set.count(MeldKind::FourHundred),
            baloot: set.count(MeldKind::Baloot),
        }
    }
}
