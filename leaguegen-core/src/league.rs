//! Parser for hand-authored league source files.
//!
//! A league file is line oriented. `--` opens a leader block, an optional
//! `==` line sets that block's battle options, and every following
//! non-empty line is one roster member:
//!
//! ```text
//! --gym1|Brock|rock|brock.png@Artist@https://example.com/artist
//! ==double=false|items:hold
//! geodude|12|tackle,defense-curl|sturdy
//! onix>onix-alt.png|14@0,0,252,0,0,252|rock-throw,bind|sturdy|oran-berry
//! ```
//!
//! The grammar is lenient: malformed lines are logged and skipped, and a
//! leading `### DEV ###` marker hides the whole file from the build.

use serde::Serialize;
use std::collections::BTreeMap;

/// Marker that flags a league file as an unpublished draft.
const DEV_MARKER: &str = "### DEV ###";

/// Leader artwork reference: a bare sprite path, or one carrying creator
/// credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LeaderImage {
    Plain(String),
    Credited {
        src: String,
        author: String,
        link: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderHeader {
    /// Boss key, e.g. `gym1` or `eliteE`. Unique within a league file.
    pub key: String,
    /// Display name. May carry a `#`-suffixed annotation that artifact
    /// rendering strips.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<LeaderImage>,
}

/// Battle options from a block's `==` line. `double`/`tag` are coerced to
/// booleans; unrecognized keys pass through to the artifact untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleOptions {
    pub double_battle: Option<bool>,
    pub tag_battle: Option<bool>,
    pub extra: BTreeMap<String, String>,
}

impl BattleOptions {
    pub fn is_empty(&self) -> bool {
        self.double_battle.is_none() && self.tag_battle.is_none() && self.extra.is_empty()
    }

    /// Insert the option keys into an artifact object. Callers insert the
    /// structural fields first so an option key may shadow them.
    pub fn apply_to(&self, map: &mut serde_json::Map<String, serde_json::Value>) {
        if let Some(v) = self.double_battle {
            map.insert("doubleBattle".to_string(), v.into());
        }
        if let Some(v) = self.tag_battle {
            map.insert("tagBattle".to_string(), v.into());
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone().into());
        }
    }
}

/// One roster line, unresolved: every reference is still a raw slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    pub level: String,
    pub moves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tera: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evs: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueEntry {
    pub header: LeaderHeader,
    pub options: BattleOptions,
    pub roster: Vec<RosterMember>,
}

// Options serialize through apply_to when rendering artifacts; this impl
// exists so a parsed league can be dumped for debugging.
impl Serialize for BattleOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serde_json::Map::new();
        self.apply_to(&mut map);
        serde_json::Value::Object(map).serialize(serializer)
    }
}

/// Parse one league source file into its leader blocks, keyed by boss key.
///
/// Never fails: drafts (`### DEV ###`) yield an empty map, malformed
/// lines are logged and skipped, and a duplicated boss key keeps the
/// later block.
pub fn parse_league(text: &str) -> BTreeMap<String, LeagueEntry> {
    let mut leaders = BTreeMap::new();
    if text.trim_start().starts_with(DEV_MARKER) {
        return leaders;
    }

    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("--") {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else if current.is_empty() {
            log::warn!("Skipping line outside any leader block: {line}");
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    for block in blocks {
        let Some(header) = parse_header(block[0]) else {
            log::warn!("Skipping malformed leader header: {}", block[0]);
            continue;
        };
        let mut body = &block[1..];
        let mut options = BattleOptions::default();
        if let Some(first) = body.first() {
            if first.starts_with("==") {
                options = parse_options(first);
                body = &body[1..];
            }
        }
        let roster = body.iter().filter_map(|line| parse_roster_line(line)).collect();
        leaders.insert(header.key.clone(), LeagueEntry {
            header,
            options,
            roster,
        });
    }

    leaders
}

/// `--key|name|specialty|imageInfo`; specialty and image are optional.
fn parse_header(line: &str) -> Option<LeaderHeader> {
    let mut fields = line.split('|');
    let key_field = fields.next()?;
    let name = fields.next()?.trim().to_string();

    let key = key_field
        .strip_prefix("--")
        .unwrap_or(key_field)
        .trim()
        .to_string();
    let specialty = fields
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    let image = fields.next().and_then(parse_image);

    Some(LeaderHeader {
        key,
        name,
        specialty,
        image,
    })
}

/// `src`, `src@author@link`, with an optional `#` comment suffix. An
/// `@author` with no link falls back to a plain reference.
fn parse_image(field: &str) -> Option<LeaderImage> {
    let field = field.split('#').next().unwrap_or(field);
    let mut parts = field.split('@');
    let src = parts.next().unwrap_or("").trim();
    if src.is_empty() {
        return None;
    }
    let author = parts.next().map(str::trim).unwrap_or("");
    let link = parts.next().map(str::trim).unwrap_or("");
    if author.is_empty() || link.is_empty() {
        return Some(LeaderImage::Plain(src.to_string()));
    }
    Some(LeaderImage::Credited {
        src: src.to_string(),
        author: author.to_string(),
        link: link.to_string(),
    })
}

/// `==key=value|key:value|...`; `=` and `:` both separate key from value,
/// with `=` preferred when present. One segment without a separator makes
/// the whole line malformed and the options empty.
fn parse_options(line: &str) -> BattleOptions {
    let mut options = BattleOptions::default();
    for segment in line.split('|') {
        let segment = segment.strip_prefix("==").unwrap_or(segment);
        let Some((key, value)) = split_option(segment) else {
            log::warn!("Dropping malformed options line at segment: {segment}");
            return BattleOptions::default();
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "double" | "doubleBattle" => options.double_battle = Some(value.contains("true")),
            "tag" | "tagBattle" => options.tag_battle = Some(value.contains("true")),
            _ => {
                options.extra.insert(key.to_string(), value.to_string());
            }
        }
    }
    options
}

fn split_option(segment: &str) -> Option<(&str, &str)> {
    if segment.contains('=') {
        segment.split_once('=')
    } else {
        segment.split_once(':')
    }
}

/// `name[>sprite]|level[@evCsv]|moveCsv[|ability[|held[|starter[|tera]]]]`.
fn parse_roster_line(line: &str) -> Option<RosterMember> {
    let mut fields = line.split('|');
    let name_field = fields.next()?;
    let Some(level_field) = fields.next() else {
        log::warn!("Skipping roster line without a level field: {line}");
        return None;
    };
    let Some(moves_field) = fields.next() else {
        log::warn!("Skipping roster line without a moves field: {line}");
        return None;
    };

    let (name, sprite) = match name_field.split_once('>') {
        Some((name, sprite)) => (name, Some(sprite)),
        None => (name_field, None),
    };
    let (level, evs) = match level_field.split_once('@') {
        Some((level, ev_csv)) => (level, parse_evs(ev_csv)),
        None => (level_field, None),
    };
    let moves = moves_field
        .split(',')
        .map(|m| m.trim().to_string())
        .collect();
    // text after '/' in the ability field is author commentary
    let ability = fields.next().map(|field| match field.split_once('/') {
        Some((slug, _)) => slug,
        None => field,
    });

    Some(RosterMember {
        name: name.trim().to_string(),
        sprite: non_empty(sprite),
        level: level.trim().to_string(),
        moves,
        ability: non_empty(ability),
        held: non_empty(fields.next()),
        starter: non_empty(fields.next()),
        tera: non_empty(fields.next()),
        evs,
    })
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// EV lists are all-or-nothing: one bad token drops the whole block.
fn parse_evs(csv: &str) -> Option<Vec<i64>> {
    let mut evs = Vec::new();
    for token in csv.split(',') {
        match token.trim().parse::<i64>() {
            Ok(value) => evs.push(value),
            Err(_) => {
                log::warn!("Dropping EV block with non-numeric value: {token}");
                return None;
            }
        }
    }
    Some(evs)
}
