use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `TokenType` values.
pub enum TokenType {
    Tenant,
    User,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Tenant => "tenant",
            TokenType::User => "user",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Which OAuth scope variant a caller asks for.
pub enum ScopeRequest {
    Full,
    Readonly,
}

impl ScopeRequest {
    pub fn from_readonly(readonly: bool) -> Self {
        if readonly {
            ScopeRequest::Readonly
        } else {
            ScopeRequest::Full
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScopeRequest::Full => "full",
            ScopeRequest::Readonly => "readonly",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Richer OAuth scope requests than the minimal set. An empty side counts as undeclared.
pub struct ScopeVariants {
    #[serde(default)]
    pub full: Vec<String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

impl ScopeVariants {
    pub fn variant(&self, request: ScopeRequest) -> Option<&[String]> {
        let scopes = match request {
            ScopeRequest::Full => &self.full,
            ScopeRequest::Readonly => &self.readonly,
        };
        if scopes.is_empty() {
            None
        } else {
            Some(scopes.as_slice())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Credential and scope metadata for one backend service.
///
/// `required_user_scopes` is three-valued: `None` means the service has not
/// declared its scopes yet, `Some(vec![])` means it declared that none are
/// needed. The scope audit depends on keeping the two apart.
pub struct ServiceDefinition {
    #[serde(default)]
    pub token_types: BTreeSet<TokenType>,
    #[serde(default)]
    pub required_user_scopes: Option<Vec<String>>,
    #[serde(default)]
    pub user_scope_variants: Option<ScopeVariants>,
    #[serde(default)]
    pub requires_offline: bool,
}

impl ServiceDefinition {
    pub fn requires_user_token(&self) -> bool {
        self.token_types.contains(&TokenType::User)
    }

    pub fn scope_variant(&self, request: ScopeRequest) -> Option<&[String]> {
        self.user_scope_variants
            .as_ref()
            .and_then(|variants| variants.variant(request))
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
/// Aggregated credential requirements for a resolved command.
pub struct CommandRequirements {
    pub services: Vec<String>,
    pub token_types: Vec<TokenType>,
    pub requires_offline: bool,
    pub required_user_scopes: Vec<String>,
}
