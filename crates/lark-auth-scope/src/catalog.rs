use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::aliases::{ServiceAliases, DEFAULT_USER_OAUTH_SERVICES};
use crate::command_services::CommandServiceMap;
use crate::normalize::{normalize_command_path, normalize_service_list};
use crate::service_registry::ServiceRegistry;
use crate::types::ServiceDefinition;

pub const AUTH_SCOPE_CATALOG_SCHEMA_VERSION: u32 = 1;

/// Immutable snapshot of every table the resolution functions read.
///
/// Production code uses [`builtin_catalog`]; tests and `--auth-catalog-file`
/// build their own snapshot instead of mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthScopeCatalog {
    registry: ServiceRegistry,
    commands: CommandServiceMap,
    aliases: ServiceAliases,
    default_services: Vec<String>,
}

#[derive(Debug, Default)]
pub struct AuthScopeCatalogBuilder {
    registry: Option<ServiceRegistry>,
    commands: Option<CommandServiceMap>,
    aliases: Option<ServiceAliases>,
    default_services: Option<Vec<String>>,
}

impl AuthScopeCatalogBuilder {
    pub fn registry(mut self, registry: ServiceRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn commands(mut self, commands: CommandServiceMap) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn aliases(mut self, aliases: ServiceAliases) -> Self {
        self.aliases = Some(aliases);
        self
    }

    pub fn default_services<S: AsRef<str>>(mut self, services: &[S]) -> Self {
        self.default_services = Some(normalize_service_list(services));
        self
    }

    /// Fills every table that was not supplied with the builtin one.
    pub fn build(self) -> AuthScopeCatalog {
        AuthScopeCatalog {
            registry: self.registry.unwrap_or_else(ServiceRegistry::builtin),
            commands: self.commands.unwrap_or_else(CommandServiceMap::builtin),
            aliases: self.aliases.unwrap_or_else(ServiceAliases::builtin),
            default_services: self
                .default_services
                .unwrap_or_else(|| normalize_service_list(DEFAULT_USER_OAUTH_SERVICES)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
/// A command entry pointing at a service the registry does not define.
pub struct DanglingServiceReference {
    pub command: String,
    pub service: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthScopeCatalogFile {
    schema_version: u32,
    #[serde(default)]
    services: BTreeMap<String, ServiceDefinition>,
    #[serde(default)]
    commands: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    default_services: Option<Vec<String>>,
}

impl AuthScopeCatalog {
    pub fn builder() -> AuthScopeCatalogBuilder {
        AuthScopeCatalogBuilder::default()
    }

    pub fn builtin() -> Self {
        Self::builder().build()
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn commands(&self) -> &CommandServiceMap {
        &self.commands
    }

    pub fn aliases(&self) -> &ServiceAliases {
        &self.aliases
    }

    pub fn default_services(&self) -> &[String] {
        &self.default_services
    }

    pub fn services_for_command_path<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<String>> {
        self.commands.resolve(path)
    }

    pub fn services_for_command(&self, command: &str) -> Option<Vec<String>> {
        self.commands.resolve_command(command)
    }

    pub fn expand_service_aliases<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        self.aliases.expand(names)
    }

    pub fn all_service_names(&self) -> Vec<String> {
        self.registry.all_service_names()
    }

    /// Command entries whose services are missing from the registry, sorted.
    pub fn dangling_command_references(&self) -> Vec<DanglingServiceReference> {
        let registry = &self.registry;
        let mut dangling = self
            .commands
            .iter()
            .flat_map(|(command, services)| {
                services
                    .iter()
                    .filter(move |service| registry.lookup(service).is_none())
                    .map(move |service| DanglingServiceReference {
                        command: command.to_string(),
                        service: service.clone(),
                    })
            })
            .collect::<Vec<_>>();
        dangling.sort();
        dangling.dedup();
        dangling
    }

    /// Builtin catalog with the JSON overlay at `path` merged on top.
    pub fn with_overlay_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read auth catalog {}", path.display()))?;
        let mut catalog = Self::builtin();
        catalog
            .apply_overlay_json(&raw)
            .with_context(|| format!("invalid auth catalog {}", path.display()))?;
        tracing::debug!(
            auth_catalog = %path.display(),
            services = catalog.registry.len(),
            commands = catalog.commands.len(),
            "loaded auth catalog overlay"
        );
        Ok(catalog)
    }

    /// Merges a JSON overlay document; entries replace builtin ones with the same key.
    ///
    /// Every entry is validated before any table changes, so an `Err` leaves the
    /// catalog untouched.
    pub fn apply_overlay_json(&mut self, raw: &str) -> Result<()> {
        let overlay = serde_json::from_str::<AuthScopeCatalogFile>(raw)
            .context("failed to parse auth catalog JSON")?;
        if overlay.schema_version != AUTH_SCOPE_CATALOG_SCHEMA_VERSION {
            bail!(
                "unsupported auth catalog schema_version {} (expected {})",
                overlay.schema_version,
                AUTH_SCOPE_CATALOG_SCHEMA_VERSION
            );
        }

        let mut services = Vec::with_capacity(overlay.services.len());
        for (name, definition) in overlay.services {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                bail!("auth catalog service names cannot be empty");
            }
            services.push((normalized, definition));
        }

        let mut commands = Vec::with_capacity(overlay.commands.len());
        for (command, command_services) in overlay.commands {
            let tokens = command.split_whitespace().collect::<Vec<_>>();
            let normalized = normalize_command_path(&tokens);
            if normalized.is_empty() {
                bail!("auth catalog command '{command}' is empty");
            }
            let command_services = normalize_service_list(&command_services);
            if command_services.is_empty() {
                bail!("auth catalog command '{normalized}' must list at least one service");
            }
            commands.push((normalized, command_services));
        }

        let mut aliases = Vec::with_capacity(overlay.aliases.len());
        for (alias, alias_services) in overlay.aliases {
            let normalized = alias.trim().to_lowercase();
            if normalized.is_empty() {
                bail!("auth catalog alias names cannot be empty");
            }
            aliases.push((normalized, normalize_service_list(&alias_services)));
        }

        for (name, definition) in services {
            self.registry.insert(name, definition);
        }
        for (command, command_services) in commands {
            self.commands.insert(command, command_services);
        }
        for (alias, alias_services) in aliases {
            self.aliases.insert(alias, alias_services);
        }
        if let Some(default_services) = overlay.default_services {
            self.default_services = normalize_service_list(&default_services);
        }
        Ok(())
    }
}

static BUILTIN_CATALOG: OnceLock<AuthScopeCatalog> = OnceLock::new();

/// Process-wide builtin catalog, built on first use.
pub fn builtin_catalog() -> &'static AuthScopeCatalog {
    BUILTIN_CATALOG.get_or_init(AuthScopeCatalog::builtin)
}

pub fn lookup_service(name: &str) -> Option<&'static ServiceDefinition> {
    builtin_catalog().registry().lookup(name)
}

pub fn all_service_names() -> Vec<String> {
    builtin_catalog().all_service_names()
}

pub fn services_for_command_path<S: AsRef<str>>(path: &[S]) -> Option<Vec<String>> {
    builtin_catalog().services_for_command_path(path)
}

pub fn services_for_command(command: &str) -> Option<Vec<String>> {
    builtin_catalog().services_for_command(command)
}

pub fn expand_service_aliases<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    builtin_catalog().expand_service_aliases(names)
}
