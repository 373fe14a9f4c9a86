use std::fs;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::Value;

use leaguegen_core::diff_values;

use crate::error::CliError;

/// Deep-compare two JSON artifacts, ignoring object key order. Reports
/// differences on stdout; only unreadable or unparsable input fails.
pub(crate) fn run_diff(first: PathBuf, second: PathBuf) -> Result<(), CliError> {
    let a: Value = serde_json::from_str(&fs::read_to_string(&first)?)?;
    let b: Value = serde_json::from_str(&fs::read_to_string(&second)?)?;

    let diffs = diff_values(&a, &b);
    if diffs.is_empty() {
        println!(
            "{}",
            "Files are equivalent.".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    println!(
        "{} {} difference{} between {} and {}:",
        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        diffs.len(),
        if diffs.len() == 1 { "" } else { "s" },
        first.display(),
        second.display(),
    );
    for diff in diffs {
        println!("{diff}");
    }
    Ok(())
}
