use leaguegen_catalog::{load_catalogs, load_games, CatalogError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn write_static_dir(dir: &Path) {
    write_json(
        dir,
        "pokemon.json",
        r#"{
          "onix": {"alias": "onix", "name": "Onix", "imgId": 95, "types": ["rock", "ground"]},
          "pikachu": {"alias": "pikachu", "name": "Pikachu", "imgId": "25", "stats": {"hp": 35, "spe": 90}}
        }"#,
    );
    write_json(
        dir,
        "items.json",
        r#"{
          "oranberry": {"name": "Oran Berry", "sprite": "oran.png", "description": "Restores HP."}
        }"#,
    );
    write_json(
        dir,
        "abilities.json",
        r#"[{"slug": "sturdy", "name": "Sturdy", "description": "Cannot be OHKOed."}]"#,
    );
    write_json(
        dir,
        "moves.json",
        r#"{
          "tackle": {"slug": "tackle", "name": "Tackle", "type": "Normal", "basePower": 40, "category": "Physical", "shortDesc": "No additional effect."}
        }"#,
    );
}

#[test]
fn loads_catalogs_from_maps_and_arrays() {
    let tmp = TempDir::new().unwrap();
    write_static_dir(tmp.path());

    let catalogs = load_catalogs(tmp.path()).unwrap();

    assert_eq!(catalogs.pokemon.len(), 2);
    let onix = &catalogs.pokemon["onix"];
    assert_eq!(onix.name, "Onix");
    // numeric imgId is normalized to a string
    assert_eq!(onix.img_id.as_deref(), Some("95"));
    assert_eq!(catalogs.pokemon["pikachu"].img_id.as_deref(), Some("25"));
    assert_eq!(catalogs.pokemon["pikachu"].stats.as_ref().unwrap().hp, Some(35));

    assert_eq!(catalogs.items["oranberry"].name, "Oran Berry");
    assert_eq!(catalogs.abilities["sturdy"].name, "Sturdy");

    let tackle = &catalogs.moves["tackle"];
    assert_eq!(tackle.base_power, Some(40));
    assert_eq!(tackle.move_type.as_deref(), Some("Normal"));
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_catalogs(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn scalar_catalog_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    write_static_dir(tmp.path());
    write_json(tmp.path(), "pokemon.json", "42");
    let err = load_catalogs(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidShape { .. }));
}

#[test]
fn loads_games_from_wrapped_object() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "games.json",
        r#"{"games": {
          "rb": {"lid": "kanto", "pid": "rb", "patchId": "gen1", "difficulty": ["Normal:", "Elite:E"], "filter": {"physicalSpecialSplit": true}},
          "frlg": {"lid": "kanto", "pid": "frlg"}
        }}"#,
    );

    let games = load_games(&tmp.path().join("games.json")).unwrap();
    assert_eq!(games.len(), 2);

    let rb = games
        .iter()
        .find(|g| g.pid.as_deref() == Some("rb"))
        .unwrap();
    assert_eq!(rb.lid.as_deref(), Some("kanto"));
    assert_eq!(rb.patch_id.as_deref(), Some("gen1"));
    assert_eq!(rb.difficulty, vec!["Normal:", "Elite:E"]);
    assert!(rb.filter.physical_special_split);

    let frlg = games
        .iter()
        .find(|g| g.pid.as_deref() == Some("frlg"))
        .unwrap();
    assert!(frlg.difficulty.is_empty());
    assert!(!frlg.filter.physical_special_split);
}

#[test]
fn loads_games_from_bare_array() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "games.json",
        r#"[{"lid": "johto", "pid": "gs"}]"#,
    );

    let games = load_games(&tmp.path().join("games.json")).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].lid.as_deref(), Some("johto"));
}
