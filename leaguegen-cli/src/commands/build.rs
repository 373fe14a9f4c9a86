use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::{Map, Value};

use leaguegen_catalog::{load_catalogs, load_games, GameMetadata};
use leaguegen_core::{enrich_league, generate_variants, parse_league, EnrichedEntry};

use crate::error::CliError;

use super::patches::load_patch_sets;

/// Run the full pipeline: parse every league and patch source, enrich,
/// write the aggregate `league.json`, then write one variant artifact per
/// (game, difficulty, starter).
pub(crate) fn run_build(
    data_dir: PathBuf,
    static_dir: Option<PathBuf>,
    games: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let static_dir = static_dir.unwrap_or_else(|| data_dir.join("static"));
    let games_path = games.unwrap_or_else(|| data_dir.join("games.json"));
    let out_dir = out_dir.unwrap_or_else(|| data_dir.join("final"));

    let catalogs = load_catalogs(&static_dir)?;
    let games = load_games(&games_path)?;
    let patch_sets = load_patch_sets(&data_dir.join("patches"))?;
    let sources = load_league_sources(&data_dir.join("leagues"))?;

    let mut aggregate = Map::new();
    let mut enriched_leagues: BTreeMap<String, BTreeMap<String, EnrichedEntry>> = BTreeMap::new();

    for (league_key, text) in &sources {
        let parsed = parse_league(text);
        let game = find_game(&games, league_key);
        let patch = game
            .and_then(|g| g.patch_id.as_deref())
            .and_then(|id| patch_sets.get(id));

        log::info!("Enriching league {league_key}");
        let enriched = enrich_league(&parsed, game, &catalogs, patch);
        for warning in &enriched.warnings {
            log::warn!("{league_key}: {warning}");
        }

        let mut league_object = Map::new();
        for (key, entry) in &enriched.leaders {
            league_object.insert(key.clone(), entry.artifact()?);
        }
        aggregate.insert(league_key.clone(), Value::Object(league_object));
        enriched_leagues.insert(league_key.clone(), enriched.leaders);
    }

    let league_path = data_dir.join("league.json");
    fs::write(&league_path, serde_json::to_string_pretty(&Value::Object(aggregate))?)?;
    print_written(&league_path);

    fs::create_dir_all(&out_dir)?;
    for (league_key, leaders) in &enriched_leagues {
        for variant in generate_variants(league_key, leaders, &games) {
            let mut object = Map::new();
            for (key, entry) in &variant.leaders {
                object.insert(key.clone(), entry.artifact()?);
            }
            let path = out_dir.join(&variant.file_name);
            fs::write(&path, serde_json::to_string_pretty(&Value::Object(object))?)?;
            print_written(&path);
        }
    }

    Ok(())
}

/// A game claims a league by `lid`; `pid` is accepted as a fallback so a
/// league file named after a release still picks up its metadata.
fn find_game<'a>(games: &'a [GameMetadata], league_key: &str) -> Option<&'a GameMetadata> {
    games.iter().find(|g| {
        g.lid.as_deref() == Some(league_key) || g.pid.as_deref() == Some(league_key)
    })
}

/// Read every `*.txt` / `*.league` source under `dir`, keyed by file stem.
fn load_league_sources(dir: &Path) -> Result<BTreeMap<String, String>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::other(format!(
            "leagues directory not found: {}",
            dir.display()
        )));
    }

    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "txt" || ext == "league")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut sources = BTreeMap::new();
    for entry in entries {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        sources.insert(stem.to_string(), fs::read_to_string(&path)?);
    }
    Ok(sources)
}

fn print_written(path: &Path) {
    println!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
}
