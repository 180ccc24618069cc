use std::collections::{BTreeSet, HashSet};

/// Canonical form of a command path, or an empty string when the path cannot match.
pub fn normalize_command_path<S: AsRef<str>>(tokens: &[S]) -> String {
    if tokens.is_empty() {
        return String::new();
    }
    let mut normalized = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return String::new();
        }
        normalized.push(token.to_lowercase());
    }
    normalized.join(" ")
}

/// Trims, lowercases and dedupes names while keeping first-seen order.
pub fn normalize_service_list<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Trims entries and returns the non-empty ones deduplicated in ascending order.
///
/// Case is preserved; scope strings are compared as given.
pub fn unique_sorted<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
