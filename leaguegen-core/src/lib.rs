//! League build pipeline: text grammars, catalog enrichment, and
//! per-game variant expansion.
//!
//! The flow is `parse_league` / `parse_patch` into plain data,
//! `enrich_league` to resolve every roster reference against the
//! catalogs and the active patch set, then `generate_variants` to expand
//! the enriched league into one artifact per (game, difficulty, starter).

pub mod diff;
pub mod enrich;
pub mod league;
pub mod patch;
pub mod slug;
pub mod variant;

pub use diff::{diff_values, values_equal};
pub use enrich::{enrich_league, EnrichWarning, EnrichedEntry, EnrichedLeague, EnrichedMember};
pub use league::{parse_league, BattleOptions, LeaderHeader, LeaderImage, LeagueEntry, RosterMember};
pub use patch::{parse_patch, Fakemon, PatchError, PatchSet};
pub use variant::{generate_variants, Difficulty, Variant};
