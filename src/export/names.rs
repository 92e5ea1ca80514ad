//! Parsing of item asset names into their base name, rarity and tier.

use std::sync::LazyLock;

use regex::Regex;

use crate::game_types::Rarity;

// regular survivor:    WorkerBasic_SR_T02
// special survivor:    Worker_Leprechaun_VR_T01
// mythic survivor:     Worker_Karolina_UR_T02
// lead:                ManagerEngineer_R_T04
// mythic lead:         ManagerMartialArtist_SR_samurai_T03
static SURVIVOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*/([^/]+)_(C|UC|R|VR|SR|UR)_([a-z]+_)?T(\d+)(?:\..*)?$")
        .expect("survivor name pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedItemName {
    /// Base identifier shared by every rarity/tier variant of the item. Includes the
    /// lowercase qualifier, if any.
    pub base_name: String,
    pub rarity: Rarity,
    /// Always within `1..=rarity.max_tier()`.
    pub tier: u32,
}

impl ParsedItemName {
    /// The canonical asset name for this variant, e.g. `WorkerBasic_SR_T02`.
    pub fn asset_name(&self) -> String {
        format!(
            "{}_{}_T{:02}",
            self.base_name,
            self.rarity.code().unwrap_or_default(),
            self.tier
        )
    }
}

/// Parses a survivor or lead survivor asset path.
///
/// Returns `None` for anything that doesn't match the naming scheme, including tiers
/// outside what the rarity allows.
pub fn parse_survivor_name(path: &str) -> Option<ParsedItemName> {
    let captures = SURVIVOR_NAME.captures(path)?;

    let rarity = Rarity::from_code(&captures[2])?;
    let tier: u32 = captures[4].parse().ok()?;
    if tier == 0 || tier > rarity.max_tier() {
        return None;
    }

    let mut base_name = captures[1].to_string();
    if let Some(qualifier) = captures.get(3) {
        base_name.push_str(qualifier.as_str());
    }

    Some(ParsedItemName {
        base_name,
        rarity,
        tier,
    })
}
