use crate::catalog::{builtin_catalog, AuthScopeCatalog};
use crate::error::{AuthScopeError, AuthScopeResult};
use crate::normalize::{normalize_service_list, unique_sorted};
use crate::service_registry::ServiceRegistry;

/// User-authorized services that have not declared their minimal scopes.
///
/// A declared empty scope list is not reported; only an undeclared one is.
pub fn missing_required_user_scopes<S: AsRef<str>>(
    registry: &ServiceRegistry,
    services: &[S],
) -> AuthScopeResult<Vec<String>> {
    let mut missing = Vec::new();
    for service in normalize_service_list(services) {
        let definition = registry
            .lookup(&service)
            .ok_or_else(|| AuthScopeError::UnknownService(service.clone()))?;
        if !definition.requires_user_token() {
            continue;
        }
        if definition.required_user_scopes.is_none() {
            missing.push(service);
        }
    }
    if !missing.is_empty() {
        tracing::debug!(missing = ?missing, "services missing required user scopes");
    }
    Ok(unique_sorted(missing))
}

impl AuthScopeCatalog {
    pub fn services_missing_required_user_scopes<S: AsRef<str>>(
        &self,
        services: &[S],
    ) -> AuthScopeResult<Vec<String>> {
        missing_required_user_scopes(self.registry(), services)
    }
}

/// [`AuthScopeCatalog::services_missing_required_user_scopes`] over the builtin catalog.
pub fn services_missing_required_user_scopes<S: AsRef<str>>(
    services: &[S],
) -> AuthScopeResult<Vec<String>> {
    builtin_catalog().services_missing_required_user_scopes(services)
}
