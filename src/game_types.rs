//! Game concept types that describe Save the World item data.
//!
//! These are the closed sets the exporters map asset strings onto: item rarity and
//! the lead survivor jobs.

use std::fmt;

use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::recognized::Recognized;

// =============================================================================
// Rarity
// =============================================================================

/// Item quality, in strictly increasing order.
///
/// Only `Common` through `Mythic` appear in asset names. `Transcendent` is reachable
/// solely by promoting a `Mythic` lead survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Variantly, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Transcendent,
}

impl Rarity {
    /// Rarities that can appear in asset names, lowest first.
    pub const PARSEABLE: &[Rarity] = &[
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
        Self::Mythic,
    ];

    /// Looks up a rarity by the code used in asset names (`"C"`, `"UC"`, ..., `"UR"`).
    pub fn from_code(code: &str) -> Option<Rarity> {
        match code {
            "C" => Some(Self::Common),
            "UC" => Some(Self::Uncommon),
            "R" => Some(Self::Rare),
            "VR" => Some(Self::Epic),
            "SR" => Some(Self::Legendary),
            "UR" => Some(Self::Mythic),
            _ => None,
        }
    }

    /// The asset-name code. `Transcendent` has none.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::Common => Some("C"),
            Self::Uncommon => Some("UC"),
            Self::Rare => Some("R"),
            Self::Epic => Some("VR"),
            Self::Legendary => Some("SR"),
            Self::Mythic => Some("UR"),
            Self::Transcendent => None,
        }
    }

    /// Highest tier an item of this rarity can reach.
    pub fn max_tier(self) -> u32 {
        match self {
            Self::Common => 2,
            Self::Uncommon => 3,
            Self::Rare => 4,
            Self::Epic | Self::Legendary | Self::Mythic | Self::Transcendent => 5,
        }
    }

    /// The next rarity up. Saturates at the top.
    pub fn promoted(self) -> Rarity {
        match self {
            Self::Common => Self::Uncommon,
            Self::Uncommon => Self::Rare,
            Self::Rare => Self::Epic,
            Self::Epic => Self::Legendary,
            Self::Legendary => Self::Mythic,
            Self::Mythic | Self::Transcendent => Self::Transcendent,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
            Self::Transcendent => "Transcendent",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Lead survivor jobs
// =============================================================================

/// The job a lead survivor (manager) performs, keyed by its synergy gameplay tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerJob {
    Doctor,
    Engineer,
    Explorer,
    Gadgeteer,
    Inventor,
    MartialArtist,
    Marksman,
    Trainer,
}

impl ManagerJob {
    pub const ALL: &[ManagerJob] = &[
        Self::Doctor,
        Self::Engineer,
        Self::Explorer,
        Self::Gadgeteer,
        Self::Inventor,
        Self::MartialArtist,
        Self::Marksman,
        Self::Trainer,
    ];

    /// The synergy tag the game uses for this job.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Doctor => "Homebase.Manager.IsDoctor",
            Self::Engineer => "Homebase.Manager.IsEngineer",
            Self::Explorer => "Homebase.Manager.IsExplorer",
            Self::Gadgeteer => "Homebase.Manager.IsGadgeteer",
            Self::Inventor => "Homebase.Manager.IsInventor",
            Self::MartialArtist => "Homebase.Manager.IsMartialArtist",
            // soldier leads are shown as marksmen in game
            Self::Marksman => "Homebase.Manager.IsSoldier",
            Self::Trainer => "Homebase.Manager.IsTrainer",
        }
    }

    pub fn from_tag(tag: &str) -> Recognized<ManagerJob> {
        Self::ALL
            .iter()
            .copied()
            .find(|job| job.tag() == tag)
            .map(Recognized::Known)
            .unwrap_or_else(|| Recognized::Unknown(tag.to_string()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Engineer => "Engineer",
            Self::Explorer => "Explorer",
            Self::Gadgeteer => "Gadgeteer",
            Self::Inventor => "Inventor",
            Self::MartialArtist => "Martial Artist",
            Self::Marksman => "Marksman",
            Self::Trainer => "Trainer",
        }
    }
}

impl fmt::Display for ManagerJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
