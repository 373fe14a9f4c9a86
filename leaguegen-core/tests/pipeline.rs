//! End-to-end pipeline test: league and patch sources through enrichment
//! and variant expansion, checked against hand-written expected JSON.

use leaguegen_catalog::{
    AbilityRecord, CatalogStore, GameFilter, GameMetadata, ItemRecord, MoveRecord, PokemonRecord,
};
use leaguegen_core::{
    diff_values, enrich_league, generate_variants, parse_league, parse_patch, values_equal,
};
use serde_json::{json, Value};

const LEAGUE: &str = r#"
# Kanto, trimmed
--gym1|Brock|rock|brock.png@Maria@https://example.com/maria
==double=false
geodude|12|tackle,harden|sturdy
bulbasaur|12|vine-whip|overgrow|oran-berry|bulbasaur

--gym1E|Brock|rock
aerodactyl|58|ancient-power|pressure
"#;

const PATCH: &str = r#"
--move
ancient-power|rock|90|Stronger in this ruleset.|special

--item
oran-berry|oran-v2.png|Restores 20 HP.
"#;

fn catalogs() -> CatalogStore {
    let mut store = CatalogStore::default();
    for (alias, name, img, types) in [
        ("geodude", "Geodude", "74", vec!["rock", "ground"]),
        ("bulbasaur", "Bulbasaur", "1", vec!["grass", "poison"]),
        ("aerodactyl", "Aerodactyl", "142", vec!["rock", "flying"]),
    ] {
        store.pokemon.insert(alias.to_string(), PokemonRecord {
            alias: alias.to_string(),
            name: name.to_string(),
            img_id: Some(img.to_string()),
            types: Some(types.into_iter().map(String::from).collect()),
            stats: None,
            base_stats: None,
        });
    }
    for (slug, name, move_type, power, category, desc) in [
        ("tackle", "Tackle", "normal", Some(40), "physical", "No additional effect."),
        ("harden", "Harden", "normal", None, "status", "Raises Defense."),
        ("vine-whip", "Vine Whip", "grass", Some(45), "special", "No additional effect."),
        ("ancient-power", "Ancient Power", "rock", Some(60), "special", "May raise all stats."),
    ] {
        store.moves.insert(slug.to_string(), MoveRecord {
            slug: slug.to_string(),
            name: Some(name.to_string()),
            move_type: Some(move_type.to_string()),
            base_power: power,
            category: Some(category.to_string()),
            short_desc: Some(desc.to_string()),
            desc: None,
            priority: None,
        });
    }
    for (slug, name) in [("sturdy", "Sturdy"), ("overgrow", "Overgrow"), ("pressure", "Pressure")] {
        store.abilities.insert(slug.to_string(), AbilityRecord {
            slug: slug.to_string(),
            name: name.to_string(),
            description: Some(format!("{name} description.")),
        });
    }
    store.items.insert("oranberry".to_string(), ItemRecord {
        name: "Oran Berry".to_string(),
        sprite: Some("oran.png".to_string()),
        description: Some("Restores 10 HP.".to_string()),
    });
    store
}

fn games() -> Vec<GameMetadata> {
    vec![GameMetadata {
        lid: Some("kanto".to_string()),
        pid: Some("rb".to_string()),
        patch_id: Some("gen1".to_string()),
        difficulty: vec!["Normal:".to_string(), "Elite:E".to_string()],
        filter: GameFilter {
            physical_special_split: true,
        },
    }]
}

#[test]
fn full_pipeline_matches_expected_artifacts() {
    let league = parse_league(LEAGUE);
    let patch = parse_patch(PATCH).unwrap();
    let games = games();

    let enriched = enrich_league(&league, Some(&games[0]), &catalogs(), Some(&patch));
    assert!(enriched.warnings.is_empty());

    let variants = generate_variants("kanto", &enriched.leaders, &games);
    let names: Vec<&str> = variants.iter().map(|v| v.file_name.as_str()).collect();
    assert_eq!(names, vec!["rb.bulbasaur.json", "rb.json", "rbE.json"]);

    let elite = variants
        .iter()
        .find(|v| v.file_name == "rbE.json")
        .unwrap();
    let rendered: Value = serde_json::to_value(&elite.leaders).unwrap();
    let expected = json!({
        "gym1E": {
            "name": "Brock",
            "speciality": "rock",
            "pokemon": [{
                "name": "aerodactyl",
                "sprite": "142",
                "level": "58",
                "moves": [{
                    "name": "Ancient Power",
                    "type": "rock",
                    // legacy table overrides the patched category
                    "damage_class": "physical",
                    "power": 90,
                    "effect": "Stronger in this ruleset."
                }],
                "ability": {"name": "Pressure", "effect": "Pressure description."},
                "types": ["rock", "flying"]
            }]
        }
    });
    assert!(
        values_equal(&rendered, &expected),
        "differences: {:#?}",
        diff_values(&rendered, &expected)
    );
}

#[test]
fn default_variant_excludes_starter_locked_members() {
    let league = parse_league(LEAGUE);
    let enriched = enrich_league(&league, None, &catalogs(), None);
    let variants = generate_variants("kanto", &enriched.leaders, &games());

    let default = variants.iter().find(|v| v.file_name == "rb.json").unwrap();
    let gym1: Vec<&str> = default.leaders["gym1"]
        .pokemon
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(gym1, vec!["geodude"]);

    let bulba = variants
        .iter()
        .find(|v| v.file_name == "rb.bulbasaur.json")
        .unwrap();
    let gym1: Vec<&str> = bulba.leaders["gym1"]
        .pokemon
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(gym1, vec!["geodude", "bulbasaur"]);

    // held item resolves from the catalog when no patch applies
    let held = bulba.leaders["gym1"].pokemon[1].held.as_ref().unwrap();
    assert_eq!(held.name, "Oran Berry");
    assert_eq!(held.sprite.as_deref(), Some("oran.png"));
}

#[test]
fn patch_overrides_surface_in_items() {
    let league = parse_league(LEAGUE);
    let patch = parse_patch(PATCH).unwrap();
    let enriched = enrich_league(&league, None, &catalogs(), Some(&patch));

    let bulbasaur = &enriched.leaders["gym1"].pokemon[1];
    let held = bulbasaur.held.as_ref().unwrap();
    assert_eq!(held.name, "Oran berry");
    assert_eq!(held.sprite.as_deref(), Some("oran-v2.png"));
    assert_eq!(held.effect, "Restores 20 HP.");
}

#[test]
fn parse_then_render_is_deterministic() {
    let league = parse_league(LEAGUE);
    let enriched_a = enrich_league(&league, None, &catalogs(), None);
    let enriched_b = enrich_league(&parse_league(LEAGUE), None, &catalogs(), None);

    let a = serde_json::to_string(&enriched_a.leaders).unwrap();
    let b = serde_json::to_string(&enriched_b.leaders).unwrap();
    assert_eq!(a, b);
}
