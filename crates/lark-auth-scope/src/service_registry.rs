use std::collections::BTreeMap;

use crate::types::{ScopeVariants, ServiceDefinition, TokenType};

const TENANT: &[TokenType] = &[TokenType::Tenant];
const USER: &[TokenType] = &[TokenType::User];
const TENANT_AND_USER: &[TokenType] = &[TokenType::Tenant, TokenType::User];

#[derive(Debug, Clone, Copy)]
struct BuiltinScopeVariants {
    full: &'static [&'static str],
    readonly: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
struct BuiltinService {
    name: &'static str,
    token_types: &'static [TokenType],
    required_user_scopes: Option<&'static [&'static str]>,
    user_scope_variants: Option<BuiltinScopeVariants>,
    requires_offline: bool,
}

const BUILTIN_SERVICES: &[BuiltinService] = &[
    BuiltinService {
        name: "approval",
        token_types: TENANT,
        required_user_scopes: None,
        user_scope_variants: None,
        requires_offline: false,
    },
    BuiltinService {
        name: "base",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["bitable:app"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["bitable:app"],
            readonly: &["bitable:app:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "calendar",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["calendar:calendar"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["calendar:calendar"],
            readonly: &["calendar:calendar:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "contact",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&[]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["contact:user.base:readonly"],
            readonly: &["contact:user.base:readonly"],
        }),
        requires_offline: false,
    },
    BuiltinService {
        name: "docs",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["docx:document"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["docx:document"],
            readonly: &["docx:document:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "drive",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["drive:drive"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["drive:drive"],
            readonly: &["drive:drive:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "im",
        token_types: TENANT,
        required_user_scopes: None,
        user_scope_variants: None,
        requires_offline: false,
    },
    BuiltinService {
        name: "mail",
        token_types: USER,
        required_user_scopes: Some(&["mail:user_mailbox.message:readonly"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &[
                "mail:user_mailbox.message:readonly",
                "mail:user_mailbox.message:send",
            ],
            readonly: &["mail:user_mailbox.message:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "minutes",
        token_types: USER,
        required_user_scopes: None,
        user_scope_variants: None,
        requires_offline: false,
    },
    BuiltinService {
        name: "sheets",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["sheets:spreadsheet"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["sheets:spreadsheet"],
            readonly: &["sheets:spreadsheet:readonly"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "task",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["task:task:read"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["task:task:read", "task:task:write"],
            readonly: &["task:task:read"],
        }),
        requires_offline: true,
    },
    BuiltinService {
        name: "wiki",
        token_types: TENANT_AND_USER,
        required_user_scopes: Some(&["wiki:wiki"]),
        user_scope_variants: Some(BuiltinScopeVariants {
            full: &["wiki:wiki"],
            readonly: &["wiki:wiki:readonly"],
        }),
        requires_offline: true,
    },
];

fn owned_scopes(scopes: &[&str]) -> Vec<String> {
    scopes.iter().map(|scope| scope.to_string()).collect()
}

impl From<&BuiltinService> for ServiceDefinition {
    fn from(service: &BuiltinService) -> Self {
        Self {
            token_types: service.token_types.iter().copied().collect(),
            required_user_scopes: service.required_user_scopes.map(owned_scopes),
            user_scope_variants: service.user_scope_variants.map(|variants| ScopeVariants {
                full: owned_scopes(variants.full),
                readonly: owned_scopes(variants.readonly),
            }),
            requires_offline: service.requires_offline,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Known services keyed by their lowercase name.
pub struct ServiceRegistry {
    services: BTreeMap<String, ServiceDefinition>,
}

impl ServiceRegistry {
    pub fn builtin() -> Self {
        BUILTIN_SERVICES
            .iter()
            .map(|service| (service.name.to_string(), ServiceDefinition::from(service)))
            .collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.get(name)
    }

    /// Every registered service name, sorted.
    pub fn all_service_names(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceDefinition)> {
        self.services
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Inserts or replaces a definition. Used while assembling a catalog.
    pub fn insert(&mut self, name: impl Into<String>, definition: ServiceDefinition) {
        self.services.insert(name.into(), definition);
    }
}

impl FromIterator<(String, ServiceDefinition)> for ServiceRegistry {
    fn from_iter<T: IntoIterator<Item = (String, ServiceDefinition)>>(iter: T) -> Self {
        Self {
            services: iter.into_iter().collect(),
        }
    }
}
