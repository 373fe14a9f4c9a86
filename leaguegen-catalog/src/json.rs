//! JSON loading for the base catalogs and game metadata.
//!
//! Catalog dumps come from upstream tooling in two shapes: a JSON object
//! keyed by slug/alias, or a bare array of records. Both are accepted.

use crate::types::{
    AbilityRecord, CatalogStore, GameMetadata, ItemRecord, MoveRecord, PokemonRecord,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Unexpected shape in {path}: expected an object or array of records")]
    InvalidShape { path: String },
}

/// Load the four base catalogs from their standard file names.
///
/// Expected layout:
/// ```text
/// static_dir/
///   pokemon.json
///   items.json
///   abilities.json
///   moves.json
/// ```
pub fn load_catalogs(static_dir: &Path) -> Result<CatalogStore, CatalogError> {
    let pokemon = load_records(&static_dir.join("pokemon.json"))?
        .into_iter()
        .map(|r: PokemonRecord| (r.alias.clone(), r))
        .collect();
    let items = load_items(&static_dir.join("items.json"))?;
    let abilities = load_records(&static_dir.join("abilities.json"))?
        .into_iter()
        .map(|r: AbilityRecord| (r.slug.clone(), r))
        .collect();
    let moves = load_records(&static_dir.join("moves.json"))?
        .into_iter()
        .map(|r: MoveRecord| (r.slug.clone(), r))
        .collect();

    Ok(CatalogStore {
        pokemon,
        items,
        abilities,
        moves,
    })
}

/// Load game metadata. Accepts either a bare array, a map of releases,
/// or an object wrapping either under a `games` key.
pub fn load_games(path: &Path) -> Result<Vec<GameMetadata>, CatalogError> {
    let value = read_value(path)?;
    let value = match value {
        Value::Object(mut map) if map.contains_key("games") => {
            // contains_key above guarantees the remove succeeds
            map.remove("games").unwrap_or(Value::Null)
        }
        other => other,
    };
    collect_records(value, path)
}

/// Item files are keyed by slug; the slug is not repeated inside the record.
fn load_items(path: &Path) -> Result<HashMap<String, ItemRecord>, CatalogError> {
    let value = read_value(path)?;
    let Value::Object(map) = value else {
        return Err(CatalogError::InvalidShape {
            path: path.display().to_string(),
        });
    };
    map.into_iter()
        .map(|(slug, raw)| {
            let record = serde_json::from_value(raw).map_err(|e| CatalogError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
            Ok((slug, record))
        })
        .collect()
}

fn read_value(path: &Path) -> Result<Value, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let value = read_value(path)?;
    collect_records(value, path)
}

fn collect_records<T: DeserializeOwned>(value: Value, path: &Path) -> Result<Vec<T>, CatalogError> {
    let raw_records = match value {
        Value::Array(records) => records,
        // Keyed maps are treated as sets of records; keys are redundant
        // with the alias/slug field inside each record.
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => {
            return Err(CatalogError::InvalidShape {
                path: path.display().to_string(),
            });
        }
    };

    raw_records
        .into_iter()
        .map(|raw| {
            serde_json::from_value(raw).map_err(|e| CatalogError::Parse {
                path: path.display().to_string(),
                source: e,
            })
        })
        .collect()
}
