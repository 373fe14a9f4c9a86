//! Parser for per-ruleset patch source files.
//!
//! A patch file is a sequence of sections, each opened by a `--` marker
//! naming one of the five entity kinds and closed by a blank line:
//!
//! ```text
//! --item
//! oran-berry|oran.png|Restores 10 HP when below half.
//!
//! --move
//! bite|dark|60|May cause flinching.|physical
//!
//! --fakemon
//! 80,105,65,60,75,130|Zeraora|zeraora|electric|zeraora.png|zeraora>zeraora
//! ```
//!
//! Malformed lines are logged and dropped; an unknown section name fails
//! the whole file.

use crate::slug::{sentence_case_slug, title_case_slug};
use leaguegen_catalog::StatBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("unknown patch section '{name}' at line {line}")]
    UnknownSection { name: String, line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePatch {
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub move_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Localized display name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityPatch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

/// Partial species override. Successive lines for the same species
/// accumulate: a later line only replaces the fields it sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonPatch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evoline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evos: Option<Vec<String>>,
}

impl PokemonPatch {
    fn named(name: &str) -> Self {
        PokemonPatch {
            name: name.to_string(),
            types: None,
            stats: None,
            evoline: None,
            evos: None,
        }
    }
}

/// A wholly invented species. Self-contained: enrichment never falls
/// through to the base catalog for these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fakemon {
    pub label: String,
    pub name: String,
    pub alias: String,
    pub sprite: String,
    #[serde(rename = "baseStats")]
    pub base_stats: StatBlock,
    pub total: i64,
    pub types: Vec<String>,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
    pub evoline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evos: Option<Vec<String>>,
}

/// Everything one patch file declares, keyed by slug per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ability: BTreeMap<String, AbilityPatch>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item: BTreeMap<String, ItemPatch>,
    #[serde(
        default,
        rename = "move",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub moves: BTreeMap<String, MovePatch>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pokemon: BTreeMap<String, PokemonPatch>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fakemon: BTreeMap<String, Fakemon>,
}

impl PatchSet {
    pub fn is_empty(&self) -> bool {
        self.ability.is_empty()
            && self.item.is_empty()
            && self.moves.is_empty()
            && self.pokemon.is_empty()
            && self.fakemon.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Ability,
    Item,
    Move,
    Pokemon,
    Fakemon,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ability" => Some(Section::Ability),
            "item" => Some(Section::Item),
            "move" => Some(Section::Move),
            "pokemon" => Some(Section::Pokemon),
            "fakemon" => Some(Section::Fakemon),
            _ => None,
        }
    }
}

/// Parse one patch source file. Content lines before any section marker
/// are ignored; a blank line closes the current section.
pub fn parse_patch(text: &str) -> Result<PatchSet, PatchError> {
    let mut patch = PatchSet::default();
    let mut section: Option<Section> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix("--") {
            let name = name.trim();
            section = Some(Section::from_name(name).ok_or_else(|| PatchError::UnknownSection {
                name: name.to_string(),
                line: index + 1,
            })?);
            continue;
        }
        if line.is_empty() {
            section = None;
            continue;
        }
        match section {
            Some(Section::Ability) => parse_ability_line(line, &mut patch.ability),
            Some(Section::Item) => parse_item_line(line, &mut patch.item),
            Some(Section::Move) => parse_move_line(line, &mut patch.moves),
            Some(Section::Pokemon) => parse_pokemon_line(line, &mut patch.pokemon),
            Some(Section::Fakemon) => parse_fakemon_line(line, &mut patch.fakemon),
            None => log::warn!("Ignoring patch line outside any section: {line}"),
        }
    }

    Ok(patch)
}

/// `slug|effect`; the display name is derived from the slug.
fn parse_ability_line(line: &str, abilities: &mut BTreeMap<String, AbilityPatch>) {
    let mut fields = line.split('|');
    let Some(slug) = non_empty(fields.next()) else {
        log::warn!("Skipping malformed ability patch line: {line}");
        return;
    };
    let effect = non_empty(fields.next());
    abilities.insert(slug.clone(), AbilityPatch {
        name: title_case_slug(&slug),
        effect,
    });
}

/// `slug|sprite|effect`; the display name is derived from the slug.
fn parse_item_line(line: &str, items: &mut BTreeMap<String, ItemPatch>) {
    let mut fields = line.split('|');
    let Some(slug) = non_empty(fields.next()) else {
        log::warn!("Skipping malformed item patch line: {line}");
        return;
    };
    let sprite = non_empty(fields.next());
    let effect = non_empty(fields.next());
    items.insert(slug.clone(), ItemPatch {
        name: sentence_case_slug(&slug),
        sprite,
        effect,
    });
}

/// `slug|type|power|effect|category|locale`; everything after the slug is
/// optional, and a non-numeric power is dropped with a warning.
fn parse_move_line(line: &str, moves: &mut BTreeMap<String, MovePatch>) {
    let mut fields = line.split('|');
    let Some(slug) = non_empty(fields.next()) else {
        log::warn!("Skipping malformed move patch line: {line}");
        return;
    };
    let move_type = non_empty(fields.next());
    let power = non_empty(fields.next()).and_then(|raw| match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Dropping non-numeric power '{raw}' for move {slug}");
            None
        }
    });
    let effect = non_empty(fields.next());
    let category = non_empty(fields.next());
    let locale = non_empty(fields.next());
    moves.insert(slug, MovePatch {
        move_type,
        power,
        effect,
        category,
        locale,
    });
}

/// Two line shapes share the pokemon section. Shape A, marked by a
/// leading pipe, sets evolution metadata: `|temp|name|types|evoInfo`
/// where `evoInfo` is `evoline>evoCsv`. Shape B sets stats and types:
/// `statCsv|name|types`, with the six stat slots positional and
/// individually optional.
fn parse_pokemon_line(line: &str, pokemon: &mut BTreeMap<String, PokemonPatch>) {
    if let Some(rest) = line.strip_prefix('|') {
        let mut fields = rest.split('|');
        let _placeholder = fields.next();
        let Some(name) = non_empty(fields.next()) else {
            log::warn!("Skipping malformed pokemon patch line: {line}");
            return;
        };
        let types = split_csv(fields.next());
        let evo_info = fields.next().map(str::trim).unwrap_or("");

        let entry = pokemon
            .entry(name.clone())
            .or_insert_with(|| PokemonPatch::named(&name));
        if let Some(types) = types {
            entry.types = Some(types);
        }
        if !evo_info.is_empty() {
            let (evoline, evos) = match evo_info.split_once('>') {
                Some((evoline, evos)) => (evoline, split_csv(Some(evos))),
                None => (evo_info, None),
            };
            if !evoline.trim().is_empty() {
                entry.evoline = Some(evoline.trim().to_string());
            }
            if let Some(evos) = evos {
                entry.evos = Some(evos);
            }
        }
    } else {
        let mut fields = line.split('|');
        let stat_csv = fields.next().unwrap_or("");
        let Some(name) = non_empty(fields.next()) else {
            log::warn!("Skipping malformed pokemon patch line: {line}");
            return;
        };
        let types = split_csv(fields.next());

        let entry = pokemon
            .entry(name.clone())
            .or_insert_with(|| PokemonPatch::named(&name));
        let stats = parse_partial_stats(stat_csv);
        if !stats.is_unset() {
            entry.stats = Some(stats);
        }
        if let Some(types) = types {
            entry.types = Some(types);
        }
    }
}

/// `statCsv|name|alias[>sprite]|typeCsv|imgUrl|evoline[>evoCsv]`, exactly
/// six fields with six required stat integers.
fn parse_fakemon_line(line: &str, fakemon: &mut BTreeMap<String, Fakemon>) {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() != 6 {
        log::warn!("Skipping fakemon line without exactly 6 fields: {line}");
        return;
    }
    let Some((base_stats, total)) = parse_full_stats(fields[0]) else {
        log::warn!("Skipping fakemon line with bad stats: {line}");
        return;
    };

    let name = fields[1].trim();
    let (alias, sprite) = match fields[2].split_once('>') {
        Some((alias, sprite)) => (alias.trim(), sprite.trim()),
        None => (fields[2].trim(), fields[2].trim()),
    };
    let types = fields[3]
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    let (evoline, evos) = match fields[5].split_once('>') {
        Some((evoline, evos)) => (evoline.trim(), split_csv(Some(evos))),
        None => (fields[5].trim(), None),
    };

    fakemon.insert(alias.to_string(), Fakemon {
        label: name.to_string(),
        name: name.to_string(),
        alias: alias.to_string(),
        sprite: sprite.to_string(),
        base_stats,
        total,
        types,
        img_url: fields[4].trim().to_string(),
        evoline: evoline.to_string(),
        evos,
    });
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn split_csv(field: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = field?
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

/// Positional hp,atk,def,spa,spd,spe; slots that fail to parse stay unset.
fn parse_partial_stats(csv: &str) -> StatBlock {
    let mut stats = StatBlock::default();
    for (slot, token) in csv.split(',').take(6).enumerate() {
        let Ok(value) = token.trim().parse::<i64>() else {
            continue;
        };
        match slot {
            0 => stats.hp = Some(value),
            1 => stats.atk = Some(value),
            2 => stats.def = Some(value),
            3 => stats.spa = Some(value),
            4 => stats.spd = Some(value),
            _ => stats.spe = Some(value),
        }
    }
    stats
}

/// All six stats required; returns the block and its total.
fn parse_full_stats(csv: &str) -> Option<(StatBlock, i64)> {
    let values: Vec<i64> = csv
        .split(',')
        .map(|token| token.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let [hp, atk, def, spa, spd, spe] = values[..] else {
        return None;
    };
    let block = StatBlock {
        hp: Some(hp),
        atk: Some(atk),
        def: Some(def),
        spa: Some(spa),
        spd: Some(spd),
        spe: Some(spe),
    };
    Some((block, hp + atk + def + spa + spd + spe))
}
