use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Six-stat spread. Every field is optional because patch data may
/// override only a subset of a species' stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atk: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spa: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spd: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spe: Option<i64>,
}

impl StatBlock {
    pub fn is_unset(&self) -> bool {
        self.hp.is_none()
            && self.atk.is_none()
            && self.def.is_none()
            && self.spa.is_none()
            && self.spd.is_none()
            && self.spe.is_none()
    }
}

/// One species record from the base catalog, keyed by `alias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub alias: String,
    pub name: String,
    /// Sprite id. Upstream dumps store this as either a number or a string.
    #[serde(
        default,
        rename = "imgId",
        deserialize_with = "sprite_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub img_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,
    /// Older dumps carry `baseStats` instead of `stats`.
    #[serde(
        default,
        rename = "baseStats",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_stats: Option<StatBlock>,
}

/// One held-item record, keyed by slug in the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub move_type: Option<String>,
    #[serde(
        default,
        rename = "basePower",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "shortDesc",
        skip_serializing_if = "Option::is_none"
    )]
    pub short_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

/// Per-release filter toggles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameFilter {
    /// True for rulesets that predate the per-move physical/special split,
    /// where damage class is decided by the move's type.
    #[serde(default, rename = "physicalSpecialSplit")]
    pub physical_special_split: bool,
}

/// Metadata for one game release: which league it renders, which patch
/// set applies, and which difficulty tiers its boss keys are split into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(
        default,
        rename = "patchId",
        skip_serializing_if = "Option::is_none"
    )]
    pub patch_id: Option<String>,
    /// `"Title:suffix"` entries; empty means one unsplit tier.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub difficulty: Vec<String>,
    #[serde(default)]
    pub filter: GameFilter,
}

/// Read-only lookup tables shared by every league build.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// Keyed by species alias.
    pub pokemon: HashMap<String, PokemonRecord>,
    /// Keyed by the slug as written in items.json. Upstream keys carry no
    /// hyphens; consumers strip hyphens from roster slugs before lookup.
    pub items: HashMap<String, ItemRecord>,
    /// Keyed by ability slug.
    pub abilities: HashMap<String, AbilityRecord>,
    /// Keyed by move slug.
    pub moves: HashMap<String, MoveRecord>,
}

fn sprite_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Num(n) => n.to_string(),
        Raw::Text(s) => s,
    }))
}
