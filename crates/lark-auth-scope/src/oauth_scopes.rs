//! OAuth scope lists for a set of services.
//!
//! Two policies live here and are intentionally not merged:
//! - the suggestion policy (previews) never falls back to the opposite variant;
//! - the login-flow policy (authorization requests) does, before the minimal set.

use crate::catalog::{builtin_catalog, AuthScopeCatalog};
use crate::error::{AuthScopeError, AuthScopeResult};
use crate::normalize::{normalize_service_list, unique_sorted};
use crate::service_registry::ServiceRegistry;
use crate::types::ScopeRequest;

/// Scopes to preview for `services`.
///
/// Uses the requested variant when the service declares it, otherwise the
/// minimal required scopes.
pub fn suggested_user_oauth_scopes<S: AsRef<str>>(
    registry: &ServiceRegistry,
    services: &[S],
    readonly: bool,
) -> AuthScopeResult<Vec<String>> {
    let request = ScopeRequest::from_readonly(readonly);
    let mut scopes = Vec::new();
    for service in normalize_service_list(services) {
        let definition = registry
            .lookup(&service)
            .ok_or_else(|| AuthScopeError::UnknownService(service.clone()))?;
        if let Some(variant) = definition.scope_variant(request) {
            scopes.extend(variant.iter().cloned());
        } else if let Some(required) = definition.required_user_scopes.as_ref() {
            scopes.extend(required.iter().cloned());
        }
    }
    Ok(unique_sorted(scopes))
}

/// Validates the login flags and returns the effective scope request.
///
/// Runs before any registry lookup so flag mistakes surface first.
pub fn resolve_login_scope_request(
    readonly: bool,
    drive_scope: &str,
) -> AuthScopeResult<ScopeRequest> {
    let drive_scope = drive_scope.trim().to_lowercase();
    if drive_scope.is_empty() {
        return Ok(ScopeRequest::from_readonly(readonly));
    }
    if readonly {
        return Err(AuthScopeError::ConflictingScopeFlags(drive_scope));
    }
    match drive_scope.as_str() {
        "full" => Ok(ScopeRequest::Full),
        "readonly" => Ok(ScopeRequest::Readonly),
        "file" => Err(AuthScopeError::UnsupportedDriveScope),
        _ => Err(AuthScopeError::InvalidDriveScope(drive_scope)),
    }
}

fn login_fallback_order(request: ScopeRequest) -> [ScopeRequest; 2] {
    match request {
        ScopeRequest::Full => [ScopeRequest::Full, ScopeRequest::Readonly],
        ScopeRequest::Readonly => [ScopeRequest::Readonly, ScopeRequest::Full],
    }
}

impl AuthScopeCatalog {
    pub fn suggested_user_oauth_scopes_from_services<S: AsRef<str>>(
        &self,
        services: &[S],
        readonly: bool,
    ) -> AuthScopeResult<Vec<String>> {
        suggested_user_oauth_scopes(self.registry(), services, readonly)
    }

    /// Scopes to request in an authorization URL for `services`.
    ///
    /// Aliases are expanded and an empty selection falls back to the default login
    /// services. Every service must accept a user token. Each one contributes its
    /// requested variant, then the opposite variant, then its minimal scopes.
    pub fn user_oauth_scopes_from_services<S: AsRef<str>>(
        &self,
        services: &[S],
        readonly: bool,
        drive_scope: &str,
    ) -> AuthScopeResult<Vec<String>> {
        let request = resolve_login_scope_request(readonly, drive_scope)?;
        let mut selected = self.expand_service_aliases(services);
        if selected.is_empty() {
            selected = self.default_services().to_vec();
        }
        tracing::debug!(
            request = request.as_str(),
            services = ?selected,
            "resolving login OAuth scopes"
        );

        let mut scopes = Vec::new();
        for service in selected {
            let definition = self
                .registry()
                .lookup(&service)
                .ok_or_else(|| AuthScopeError::UnknownService(service.clone()))?;
            if !definition.requires_user_token() {
                return Err(AuthScopeError::ServiceNotUserAuthorized(service));
            }
            let variant = login_fallback_order(request)
                .into_iter()
                .find_map(|candidate| definition.scope_variant(candidate));
            match (variant, definition.required_user_scopes.as_ref()) {
                (Some(variant), _) => scopes.extend(variant.iter().cloned()),
                (None, Some(required)) => scopes.extend(required.iter().cloned()),
                (None, None) => return Err(AuthScopeError::UserScopesUndeclared(service)),
            }
        }
        Ok(unique_sorted(scopes))
    }
}

/// [`AuthScopeCatalog::suggested_user_oauth_scopes_from_services`] over the builtin catalog.
pub fn suggested_user_oauth_scopes_from_services<S: AsRef<str>>(
    services: &[S],
    readonly: bool,
) -> AuthScopeResult<Vec<String>> {
    builtin_catalog().suggested_user_oauth_scopes_from_services(services, readonly)
}

/// [`AuthScopeCatalog::user_oauth_scopes_from_services`] over the builtin catalog.
pub fn user_oauth_scopes_from_services<S: AsRef<str>>(
    services: &[S],
    readonly: bool,
    drive_scope: &str,
) -> AuthScopeResult<Vec<String>> {
    builtin_catalog().user_oauth_scopes_from_services(services, readonly, drive_scope)
}
