#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates the auth-scope inspection modes the binary can run.
pub enum CliAuthScopeMode {
    Requirements,
    LoginScopes,
    SuggestScopes,
    ScopeAudit,
    ServicesList,
}

impl CliAuthScopeMode {
    pub fn flag(self) -> &'static str {
        match self {
            CliAuthScopeMode::Requirements => "--auth-requirements",
            CliAuthScopeMode::LoginScopes => "--auth-login-scopes",
            CliAuthScopeMode::SuggestScopes => "--auth-suggest-scopes",
            CliAuthScopeMode::ScopeAudit => "--auth-scope-audit",
            CliAuthScopeMode::ServicesList => "--auth-services-list",
        }
    }

    pub fn accepts_services(self) -> bool {
        matches!(
            self,
            CliAuthScopeMode::LoginScopes
                | CliAuthScopeMode::SuggestScopes
                | CliAuthScopeMode::ScopeAudit
        )
    }

    pub fn accepts_readonly(self) -> bool {
        matches!(
            self,
            CliAuthScopeMode::LoginScopes | CliAuthScopeMode::SuggestScopes
        )
    }
}
