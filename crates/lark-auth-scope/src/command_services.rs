use std::collections::BTreeMap;

use crate::normalize::{normalize_command_path, unique_sorted};

/// Command paths the CLI exposes, keyed by their normalized space-joined form.
///
/// Lookups are exact: a subcommand resolves only when it has its own entry.
const BUILTIN_COMMAND_SERVICES: &[(&str, &[&str])] = &[
    ("approval", &["approval"]),
    ("approval get", &["approval"]),
    ("approval list", &["approval"]),
    ("base", &["base"]),
    ("base records list", &["base"]),
    ("base records create", &["base"]),
    ("base tables list", &["base"]),
    ("calendar", &["calendar"]),
    ("calendar events list", &["calendar"]),
    ("calendar events create", &["calendar"]),
    ("calendar freebusy", &["calendar", "contact"]),
    ("chats", &["im"]),
    ("chats list", &["im"]),
    ("chats members", &["im", "contact"]),
    ("contact", &["contact"]),
    ("contact search", &["contact"]),
    ("docs", &["docs"]),
    ("docs create", &["docs", "drive"]),
    ("docs export", &["docs", "drive"]),
    ("docs get", &["docs"]),
    ("drive", &["drive"]),
    ("drive download", &["drive"]),
    ("drive list", &["drive"]),
    ("drive upload", &["drive"]),
    ("mail", &["mail"]),
    ("mail list", &["mail"]),
    ("mail send", &["mail"]),
    ("messages", &["im"]),
    ("messages list", &["im"]),
    ("messages send", &["im"]),
    ("minutes", &["minutes"]),
    ("sheets", &["sheets"]),
    ("sheets create", &["sheets", "drive"]),
    ("sheets read", &["sheets"]),
    ("sheets write", &["sheets"]),
    ("tasks", &["task"]),
    ("tasks create", &["task"]),
    ("tasks list", &["task"]),
    ("wiki", &["wiki"]),
    ("wiki nodes list", &["wiki"]),
    ("wiki search", &["wiki", "docs"]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Static association from normalized command paths to service names.
pub struct CommandServiceMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl CommandServiceMap {
    pub fn builtin() -> Self {
        BUILTIN_COMMAND_SERVICES
            .iter()
            .map(|(command, services)| {
                (
                    command.to_string(),
                    services.iter().map(|service| service.to_string()).collect(),
                )
            })
            .collect()
    }

    /// Resolves a tokenized command path to its sorted service list.
    ///
    /// Returns `None` for invalid paths (empty, or containing blank tokens) and for
    /// paths without an exact entry.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<String>> {
        let normalized = normalize_command_path(path);
        if normalized.is_empty() {
            return None;
        }
        let services = self.entries.get(&normalized)?;
        tracing::debug!(
            command = %normalized,
            services = services.len(),
            "resolved command services"
        );
        Some(unique_sorted(services))
    }

    pub fn resolve_command(&self, command: &str) -> Option<Vec<String>> {
        let tokens = command.split_whitespace().collect::<Vec<_>>();
        self.resolve(&tokens)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(command, services)| (command.as_str(), services.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, command: impl Into<String>, services: Vec<String>) {
        self.entries.insert(command.into(), services);
    }
}

impl FromIterator<(String, Vec<String>)> for CommandServiceMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
