use std::collections::BTreeMap;

use crate::normalize::normalize_service_list;

/// Services requested by login flows when the caller names none.
pub const DEFAULT_USER_OAUTH_SERVICES: &[&str] =
    &["calendar", "docs", "drive", "mail", "sheets", "wiki"];

const BUILTIN_SERVICE_ALIASES: &[(&str, &[&str])] = &[
    (
        "all",
        &[
            "base", "calendar", "contact", "docs", "drive", "mail", "sheets", "task", "wiki",
        ],
    ),
    ("user", DEFAULT_USER_OAUTH_SERVICES),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// User-facing group names that stand for a fixed list of services.
pub struct ServiceAliases {
    aliases: BTreeMap<String, Vec<String>>,
}

impl ServiceAliases {
    pub fn builtin() -> Self {
        BUILTIN_SERVICE_ALIASES
            .iter()
            .map(|(alias, services)| {
                (
                    alias.to_string(),
                    services.iter().map(|service| service.to_string()).collect(),
                )
            })
            .collect()
    }

    pub fn get(&self, alias: &str) -> Option<&[String]> {
        self.aliases.get(alias).map(Vec::as_slice)
    }

    /// Replaces each alias with its services, one level deep, keeping order.
    pub fn expand<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut expanded = Vec::new();
        for name in normalize_service_list(names) {
            match self.aliases.get(&name) {
                Some(services) => expanded.extend(services.iter().cloned()),
                None => expanded.push(name),
            }
        }
        normalize_service_list(&expanded)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.aliases
            .iter()
            .map(|(alias, services)| (alias.as_str(), services.as_slice()))
    }

    pub fn insert(&mut self, alias: impl Into<String>, services: Vec<String>) {
        self.aliases.insert(alias.into(), services);
    }
}

impl FromIterator<(String, Vec<String>)> for ServiceAliases {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceAliases, DEFAULT_USER_OAUTH_SERVICES};

    #[test]
    fn unit_expand_substitutes_alias_and_keeps_plain_names() {
        let aliases = ServiceAliases::builtin();
        assert_eq!(
            aliases.expand(&["USER", "im"]),
            DEFAULT_USER_OAUTH_SERVICES
                .iter()
                .map(|service| service.to_string())
                .chain(std::iter::once("im".to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn functional_expand_dedupes_across_alias_and_explicit_names() {
        let aliases = ServiceAliases::builtin();
        let expanded = aliases.expand(&["drive", "user", "drive"]);
        assert_eq!(expanded[0], "drive");
        assert_eq!(
            expanded.iter().filter(|service| *service == "drive").count(),
            1
        );
    }

    #[test]
    fn regression_expand_is_not_transitive() {
        let mut aliases = ServiceAliases::default();
        aliases.insert("office", vec!["docs".to_string(), "user".to_string()]);
        aliases.insert("user", vec!["mail".to_string()]);
        assert_eq!(aliases.expand(&["office"]), vec!["docs", "user"]);
    }

    #[test]
    fn regression_expand_of_blank_input_is_empty() {
        let aliases = ServiceAliases::builtin();
        assert!(aliases.expand(&["", "  "]).is_empty());
    }
}
