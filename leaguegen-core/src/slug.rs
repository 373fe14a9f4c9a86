//! Slug and display-name text helpers shared by the parsers and the
//! enrichment pass.

/// Canonical species slug: lowercase, with every run of non-word
/// characters collapsed to a single hyphen. Runs at the edges still
/// produce a hyphen ("Nidoran♀" becomes "nidoran-").
pub fn normalize_species(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' {
            in_run = false;
            out.extend(c.to_lowercase());
        } else if !in_run {
            in_run = true;
            out.push('-');
        }
    }
    out
}

/// Title-case each hyphenated word: "solar-power" becomes "Solar Power".
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize only the first letter and replace hyphens with spaces:
/// "oran-berry" becomes "Oran berry".
pub fn sentence_case_slug(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().replace('-', " ")
        }
        None => String::new(),
    }
}

/// Hyphens to spaces, casing untouched. Used for placeholder move names.
pub fn humanize_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Held-item lookup key: lowercase with hyphens stripped.
pub fn item_lookup_key(slug: &str) -> String {
    slug.to_lowercase().replace('-', "")
}
