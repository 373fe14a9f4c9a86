use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use leaguegen_core::{parse_patch, PatchSet};

use crate::error::CliError;

/// Parse every patch source under `dir`, keyed by file stem. A missing
/// directory is treated as "no patches".
pub(crate) fn load_patch_sets(dir: &Path) -> Result<BTreeMap<String, PatchSet>, CliError> {
    let mut patch_sets = BTreeMap::new();
    if !dir.is_dir() {
        log::info!("No patches directory at {}", dir.display());
        return Ok(patch_sets);
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

    for entry in entries {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let contents = fs::read_to_string(&path)?;
        let patch = parse_patch(&contents)
            .map_err(|e| CliError::patch(path.display().to_string(), e))?;
        patch_sets.insert(stem.to_string(), patch);
    }

    Ok(patch_sets)
}

/// Compile every patch source into a single `patches.json`, keyed by
/// ruleset (the source file's stem).
pub(crate) fn run_patches(data_dir: PathBuf, out: Option<PathBuf>) -> Result<(), CliError> {
    let out = out.unwrap_or_else(|| data_dir.join("patches.json"));
    let patch_sets = load_patch_sets(&data_dir.join("patches"))?;

    fs::write(&out, serde_json::to_string_pretty(&patch_sets)?)?;
    println!(
        "{} {} ({} ruleset{})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        out.display(),
        patch_sets.len(),
        if patch_sets.len() == 1 { "" } else { "s" },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_txt_and_league_sources_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("gen1.txt"), "--item\noran-berry\n").unwrap();
        fs::write(tmp.path().join("gen3.league"), "--move\nbite|dark|60\n").unwrap();
        fs::write(tmp.path().join("notes.md"), "not a patch").unwrap();

        let patch_sets = load_patch_sets(tmp.path()).unwrap();
        let keys: Vec<&str> = patch_sets.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["gen1", "gen3"]);
    }

    #[test]
    fn missing_patches_directory_means_no_patches() {
        let tmp = TempDir::new().unwrap();
        let patch_sets = load_patch_sets(&tmp.path().join("patches")).unwrap();
        assert!(patch_sets.is_empty());
    }
}
