//! Resolve parsed roster references against the base catalogs and an
//! optional per-ruleset patch set.
//!
//! Precedence is fixed: fakemon beat everything for their alias, patch
//! fields beat catalog fields, and the catalog fills whatever remains.
//! Unresolvable moves degrade to a visible placeholder instead of failing
//! the build; every such degradation is collected as a warning.

use crate::league::{BattleOptions, LeaderHeader, LeagueEntry, RosterMember};
use crate::patch::PatchSet;
use crate::slug::{humanize_slug, item_lookup_key, normalize_species, title_case_slug};
use leaguegen_catalog::{CatalogStore, GameMetadata, StatBlock};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Damage class by move type, for rulesets that predate the per-move
/// physical/special split.
fn legacy_damage_class(move_type: &str) -> &'static str {
    match move_type {
        "normal" | "fighting" | "flying" | "poison" | "ground" | "rock" | "bug" | "ghost"
        | "steel" => "physical",
        "fire" | "water" | "grass" | "electric" | "psychic" | "ice" | "dragon" | "dark" => {
            "special"
        }
        _ => "unknown",
    }
}

/// A roster move slug that resolved against neither the catalog nor the
/// active patch set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichWarning {
    pub ruleset: Option<String>,
    pub slug: String,
}

impl fmt::Display for EnrichWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ruleset {
            Some(ruleset) => write!(
                f,
                "move '{}' not found in catalog or '{}' patches",
                self.slug, ruleset
            ),
            None => write!(f, "move '{}' not found in catalog", self.slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMove {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub damage_class: String,
    /// `Some(None)` serializes as an explicit `null` (the unresolved-move
    /// placeholder); `None` omits the field entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Option<i64>>,
    pub effect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAbility {
    pub name: String,
    /// Absent only when the ability matched no record at all and the name
    /// was synthesized from the slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    pub name: String,
    pub effect: String,
}

/// One roster member with every reference resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evs: Option<Vec<i64>>,
    pub moves: Vec<ResolvedMove>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<ResolvedAbility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held: Option<ResolvedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tera: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,
}

/// One leader block ready for artifact rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedEntry {
    pub header: LeaderHeader,
    pub options: BattleOptions,
    pub pokemon: Vec<EnrichedMember>,
}

impl EnrichedEntry {
    /// Render the per-leader artifact object. Structural fields go in
    /// first and battle options last, so an option key may shadow them.
    pub fn artifact(&self) -> Result<Value, serde_json::Error> {
        let mut map = Map::new();
        let display_name = self.header.name.split('#').next().unwrap_or("");
        map.insert("name".to_string(), display_name.into());
        map.insert(
            "speciality".to_string(),
            self.header.specialty.clone().unwrap_or_default().into(),
        );
        if let Some(image) = &self.header.image {
            map.insert("img".to_string(), serde_json::to_value(image)?);
        }
        map.insert("pokemon".to_string(), serde_json::to_value(&self.pokemon)?);
        self.options.apply_to(&mut map);
        Ok(Value::Object(map))
    }
}

impl Serialize for EnrichedEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error;
        self.artifact()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Everything produced by enriching one league.
#[derive(Debug, Default)]
pub struct EnrichedLeague {
    pub leaders: BTreeMap<String, EnrichedEntry>,
    pub warnings: Vec<EnrichWarning>,
}

/// Resolve every roster reference in `league`. `game` supplies the
/// legacy damage-class flag and the ruleset name used in warnings;
/// `patch` is the already-selected patch set for that ruleset.
pub fn enrich_league(
    league: &BTreeMap<String, LeagueEntry>,
    game: Option<&GameMetadata>,
    catalogs: &CatalogStore,
    patch: Option<&PatchSet>,
) -> EnrichedLeague {
    let legacy = game.is_some_and(|g| g.filter.physical_special_split);
    let ruleset = game.and_then(|g| g.patch_id.as_deref());

    let mut enriched = EnrichedLeague::default();
    for (key, entry) in league {
        let pokemon = entry
            .roster
            .iter()
            .map(|member| {
                enrich_member(member, catalogs, patch, ruleset, legacy, &mut enriched.warnings)
            })
            .collect();
        enriched.leaders.insert(key.clone(), EnrichedEntry {
            header: entry.header.clone(),
            options: entry.options.clone(),
            pokemon,
        });
    }
    enriched
}

fn enrich_member(
    member: &RosterMember,
    catalogs: &CatalogStore,
    patch: Option<&PatchSet>,
    ruleset: Option<&str>,
    legacy: bool,
    warnings: &mut Vec<EnrichWarning>,
) -> EnrichedMember {
    let moves = member
        .moves
        .iter()
        .map(|slug| resolve_move(slug, catalogs, patch, ruleset, legacy, warnings))
        .collect();
    let ability = member
        .ability
        .as_deref()
        .map(|slug| resolve_ability(&slug.to_lowercase(), catalogs, patch));
    let held = member
        .held
        .as_deref()
        .and_then(|slug| resolve_item(slug, catalogs, patch));
    let species = resolve_species(&member.name, catalogs, patch);

    let name = match species.name {
        Some(display) => normalize_species(&display),
        None => member.name.to_lowercase(),
    };
    // a species-level sprite id beats a per-roster override
    let sprite = species.sprite.or_else(|| member.sprite.clone());

    EnrichedMember {
        name,
        sprite,
        level: member.level.clone(),
        evs: member.evs.clone(),
        moves,
        ability,
        held,
        starter: member.starter.clone(),
        tera: member.tera.clone(),
        types: species.types,
        stats: species.stats,
    }
}

fn resolve_move(
    slug: &str,
    catalogs: &CatalogStore,
    patch: Option<&PatchSet>,
    ruleset: Option<&str>,
    legacy: bool,
    warnings: &mut Vec<EnrichWarning>,
) -> ResolvedMove {
    let base = catalogs.moves.get(slug);
    let over = patch.and_then(|p| p.moves.get(slug));

    if base.is_none() && over.is_none() {
        warnings.push(EnrichWarning {
            ruleset: ruleset.map(String::from),
            slug: slug.to_string(),
        });
        return ResolvedMove {
            name: humanize_slug(slug),
            move_type: "unknown".to_string(),
            damage_class: "unknown".to_string(),
            power: Some(None),
            effect: String::new(),
            priority: None,
        };
    }

    // locale is pass-through data, never a display-name override
    let name = base
        .and_then(|b| b.name.clone())
        .unwrap_or_else(|| slug.to_string());
    let move_type = over
        .and_then(|o| o.move_type.as_deref())
        .or_else(|| base.and_then(|b| b.move_type.as_deref()))
        .map(str::to_lowercase)
        .unwrap_or_else(|| "unknown".to_string());
    let category = over
        .and_then(|o| o.category.as_deref())
        .or_else(|| base.and_then(|b| b.category.as_deref()))
        .map(str::to_lowercase);
    // status moves keep their class even under the legacy table
    let damage_class = match category.as_deref() {
        Some("status") => "status".to_string(),
        _ if legacy => legacy_damage_class(&move_type).to_string(),
        Some(category) => category.to_string(),
        None => "unknown".to_string(),
    };
    let power = over
        .and_then(|o| o.power)
        .or_else(|| base.and_then(|b| b.base_power))
        .filter(|power| *power > 0)
        .map(Some);
    let effect = over
        .and_then(|o| o.effect.clone())
        .or_else(|| base.and_then(|b| b.short_desc.clone()))
        .or_else(|| base.and_then(|b| b.desc.clone()))
        .unwrap_or_default();
    let priority = base.and_then(|b| b.priority).filter(|p| *p != 0);

    ResolvedMove {
        name,
        move_type,
        damage_class,
        power,
        effect,
        priority,
    }
}

fn resolve_ability(
    slug: &str,
    catalogs: &CatalogStore,
    patch: Option<&PatchSet>,
) -> ResolvedAbility {
    let base = catalogs.abilities.get(slug);
    let over = patch.and_then(|p| p.ability.get(slug));

    let name = over
        .map(|o| o.name.clone())
        .or_else(|| base.map(|b| b.name.clone()));
    match name {
        Some(name) => ResolvedAbility {
            name,
            effect: Some(
                over.and_then(|o| o.effect.clone())
                    .or_else(|| base.and_then(|b| b.description.clone()))
                    .unwrap_or_default(),
            ),
        },
        None => ResolvedAbility {
            name: title_case_slug(slug),
            effect: None,
        },
    }
}

/// Items are omitted entirely when they resolve against nothing. Both the
/// catalog key and the patch keys are compared through [`item_lookup_key`]
/// so hyphenated spellings on either side still match.
fn resolve_item(
    slug: &str,
    catalogs: &CatalogStore,
    patch: Option<&PatchSet>,
) -> Option<ResolvedItem> {
    let key = item_lookup_key(slug);
    let base = catalogs.items.get(&key);
    let over = patch.and_then(|p| {
        p.item
            .iter()
            .find(|(patch_key, _)| item_lookup_key(patch_key) == key)
            .map(|(_, item)| item)
    });

    let name = over
        .map(|o| o.name.clone())
        .or_else(|| base.map(|b| b.name.clone()))?;
    Some(ResolvedItem {
        sprite: over
            .and_then(|o| o.sprite.clone())
            .or_else(|| base.and_then(|b| b.sprite.clone())),
        name,
        effect: over
            .and_then(|o| o.effect.clone())
            .or_else(|| base.and_then(|b| b.description.clone()))
            .unwrap_or_default(),
    })
}

struct SpeciesInfo {
    name: Option<String>,
    sprite: Option<String>,
    types: Option<Vec<String>>,
    stats: Option<StatBlock>,
}

/// Fakemon take absolute precedence for their alias; otherwise patch
/// fields overlay the catalog record field by field.
fn resolve_species(name: &str, catalogs: &CatalogStore, patch: Option<&PatchSet>) -> SpeciesInfo {
    if let Some(fake) = patch.and_then(|p| p.fakemon.get(name)) {
        return SpeciesInfo {
            name: Some(fake.name.clone()),
            // fakemon carry no catalog sprite id; the roster sprite stands
            sprite: None,
            types: Some(fake.types.clone()),
            stats: Some(fake.base_stats.clone()),
        };
    }

    let base = catalogs.pokemon.get(name);
    let over = patch.and_then(|p| p.pokemon.get(name));

    let types = over
        .and_then(|o| o.types.clone())
        .or_else(|| base.and_then(|b| b.types.clone()))
        .map(|types| types.iter().map(|t| t.to_lowercase()).collect());
    let stats = over
        .and_then(|o| o.stats.clone())
        .or_else(|| base.and_then(|b| b.stats.clone()))
        .or_else(|| base.and_then(|b| b.base_stats.clone()));

    SpeciesInfo {
        name: over
            .map(|o| o.name.clone())
            .or_else(|| base.map(|b| b.name.clone())),
        sprite: base.and_then(|b| b.img_id.clone()),
        types,
        stats,
    }
}
