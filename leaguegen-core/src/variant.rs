//! Expand an enriched league into per-(game, difficulty, starter) output
//! artifacts.
//!
//! Each game release declares difficulty tiers as `"Title:suffix"`
//! entries; a tier claims the boss keys ending in its suffix, and the
//! empty suffix claims everything no named tier took. Within a tier, one
//! artifact is written per distinct starter tag plus one unrestricted
//! default.

use crate::enrich::{EnrichedEntry, EnrichedMember};
use leaguegen_catalog::GameMetadata;
use std::collections::BTreeMap;

/// One declared difficulty tier: display title plus boss-key suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub title: String,
    pub suffix: String,
}

/// Split `"Title:suffix"` declarations. No declarations means a single
/// untitled tier that claims every boss key.
pub fn parse_difficulties(declared: &[String]) -> Vec<Difficulty> {
    if declared.is_empty() {
        return vec![Difficulty {
            title: String::new(),
            suffix: String::new(),
        }];
    }
    declared
        .iter()
        .map(|entry| {
            let (title, suffix) = entry.split_once(':').unwrap_or((entry.as_str(), ""));
            Difficulty {
                title: title.trim().to_string(),
                suffix: suffix.trim().to_string(),
            }
        })
        .collect()
}

/// Whether `key` belongs to the tier with `suffix`, given every non-empty
/// suffix the game declares. The empty suffix matches by elimination.
pub fn key_matches_suffix(key: &str, suffix: &str, named_suffixes: &[String]) -> bool {
    if suffix.is_empty() {
        !named_suffixes.iter().any(|named| key.ends_with(named))
    } else {
        key.ends_with(suffix)
    }
}

/// Keep the members legal for `starter`: untagged members always stay,
/// tagged members only when their tag matches exactly.
pub fn filter_by_starter(members: &[EnrichedMember], starter: &str) -> Vec<EnrichedMember> {
    members
        .iter()
        .filter(|member| match member.starter.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(tag) => tag == starter,
        })
        .cloned()
        .collect()
}

/// A single output artifact, named and filtered but not yet serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// `{pid}{suffix}.json`, or `{pid}{suffix}.{starter}.json` when
    /// restricted to a starter.
    pub file_name: String,
    pub difficulty: String,
    pub starter: String,
    pub leaders: BTreeMap<String, EnrichedEntry>,
}

/// Expand `league` into every artifact owed to the games that render it.
/// Games are matched by `lid`; games without a `pid` are skipped. Tiers
/// or starters that end up claiming no leaders produce no artifact.
pub fn generate_variants(
    league_key: &str,
    league: &BTreeMap<String, EnrichedEntry>,
    games: &[GameMetadata],
) -> Vec<Variant> {
    let mut variants = Vec::new();

    for game in games.iter().filter(|g| g.lid.as_deref() == Some(league_key)) {
        let Some(pid) = game.pid.as_deref() else {
            log::warn!("Game for league {league_key} has no pid, skipping");
            continue;
        };
        let difficulties = parse_difficulties(&game.difficulty);
        let named_suffixes: Vec<String> = difficulties
            .iter()
            .map(|d| d.suffix.clone())
            .filter(|s| !s.is_empty())
            .collect();

        for difficulty in &difficulties {
            let claimed: Vec<(&String, &EnrichedEntry)> = league
                .iter()
                .filter(|(key, _)| key_matches_suffix(key, &difficulty.suffix, &named_suffixes))
                .collect();

            for starter in starter_tags(&claimed) {
                let mut leaders = BTreeMap::new();
                for (key, entry) in &claimed {
                    let pokemon = filter_by_starter(&entry.pokemon, &starter);
                    if pokemon.is_empty() {
                        continue;
                    }
                    leaders.insert((*key).clone(), EnrichedEntry {
                        header: entry.header.clone(),
                        options: entry.options.clone(),
                        pokemon,
                    });
                }
                if leaders.is_empty() {
                    continue;
                }
                variants.push(Variant {
                    file_name: variant_file_name(pid, &difficulty.suffix, &starter),
                    difficulty: difficulty.title.clone(),
                    starter,
                    leaders,
                });
            }
        }
    }

    variants
}

/// Distinct starter tags in first-seen order, then the unrestricted
/// default (empty tag) last.
fn starter_tags(claimed: &[(&String, &EnrichedEntry)]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for (_, entry) in claimed {
        for member in &entry.pokemon {
            let Some(tag) = member.starter.as_deref().map(str::trim) else {
                continue;
            };
            if tag.is_empty() {
                continue;
            }
            if !tags.iter().any(|seen| seen == tag) {
                tags.push(tag.to_string());
            }
        }
    }
    tags.push(String::new());
    tags
}

fn variant_file_name(pid: &str, suffix: &str, starter: &str) -> String {
    if starter.is_empty() {
        format!("{pid}{suffix}.json")
    } else {
        format!("{pid}{suffix}.{starter}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich_league;
    use crate::league::parse_league;
    use leaguegen_catalog::CatalogStore;

    const SOURCE: &str = r#"
--gym1|Brock
geodude|12|tackle
bulbasaur|12|vine-whip|||bulbasaur
charmander|12|ember|||charmander

--gym1E|Brock
onix|54|stone-edge

--gymNE|Agatha
gengar|56|shadow-ball
"#;

    fn game(pid: &str, difficulty: &[&str]) -> GameMetadata {
        GameMetadata {
            lid: Some("kanto".to_string()),
            pid: Some(pid.to_string()),
            patch_id: None,
            difficulty: difficulty.iter().map(|d| d.to_string()).collect(),
            filter: Default::default(),
        }
    }

    fn enriched() -> BTreeMap<String, EnrichedEntry> {
        enrich_league(&parse_league(SOURCE), None, &CatalogStore::default(), None).leaders
    }

    #[test]
    fn empty_suffix_claims_keys_by_elimination() {
        let suffixes = vec!["E".to_string()];
        assert!(key_matches_suffix("gym1", "", &suffixes));
        assert!(!key_matches_suffix("gym1E", "", &suffixes));
        assert!(!key_matches_suffix("gymNE", "", &suffixes));
        assert!(key_matches_suffix("gym1E", "E", &suffixes));
        assert!(key_matches_suffix("gymNE", "E", &suffixes));
    }

    #[test]
    fn difficulty_declarations() {
        let tiers = parse_difficulties(&["Normal:".to_string(), "Elite:E".to_string()]);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].title, "Normal");
        assert_eq!(tiers[0].suffix, "");
        assert_eq!(tiers[1].suffix, "E");

        let default = parse_difficulties(&[]);
        assert_eq!(default.len(), 1);
        assert_eq!(default[0].suffix, "");
    }

    #[test]
    fn splits_gyms_by_difficulty_and_starter() {
        let games = vec![game("rb", &["Normal:", "Elite:E"])];
        let variants = generate_variants("kanto", &enriched(), &games);

        let names: Vec<&str> = variants.iter().map(|v| v.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "rb.bulbasaur.json",
                "rb.charmander.json",
                "rb.json",
                "rbE.json"
            ]
        );

        // the starter variant keeps the matching tag and all untagged members
        let bulba = &variants[0];
        let gym1 = &bulba.leaders["gym1"];
        let members: Vec<&str> = gym1.pokemon.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(members, vec!["geodude", "bulbasaur"]);

        // the default variant drops every tagged member
        let default = &variants[2];
        let members: Vec<&str> = default.leaders["gym1"]
            .pokemon
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(members, vec!["geodude"]);

        // the elite tier claims both E-suffixed keys
        let elite = &variants[3];
        assert_eq!(elite.leaders.len(), 2);
        assert!(elite.leaders.contains_key("gym1E"));
        assert!(elite.leaders.contains_key("gymNE"));
    }

    #[test]
    fn games_for_other_leagues_are_ignored() {
        let mut other = game("gs", &[]);
        other.lid = Some("johto".to_string());
        assert!(generate_variants("kanto", &enriched(), &[other]).is_empty());
    }

    #[test]
    fn undeclared_difficulty_claims_everything() {
        let games = vec![game("frlg", &[])];
        let variants = generate_variants("kanto", &enriched(), &games);
        let default = variants
            .iter()
            .find(|v| v.file_name == "frlg.json")
            .unwrap();
        assert_eq!(default.leaders.len(), 3);
    }
}
