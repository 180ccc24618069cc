use std::collections::BTreeSet;

use crate::catalog::{builtin_catalog, AuthScopeCatalog};
use crate::error::{AuthScopeError, AuthScopeResult};
use crate::normalize::{normalize_service_list, unique_sorted};
use crate::service_registry::ServiceRegistry;
use crate::types::{CommandRequirements, TokenType};

/// Sorted union of the token types every listed service needs.
pub fn token_types_for_services<S: AsRef<str>>(
    registry: &ServiceRegistry,
    services: &[S],
) -> AuthScopeResult<Vec<TokenType>> {
    let mut token_types = BTreeSet::new();
    for service in normalize_service_list(services) {
        let definition = registry
            .lookup(&service)
            .ok_or_else(|| AuthScopeError::UnknownService(service.clone()))?;
        token_types.extend(definition.token_types.iter().copied());
    }
    Ok(token_types.into_iter().collect())
}

/// Whether any listed service needs an offline-capable credential.
///
/// Services are visited in normalized input order: the first flagged service
/// answers `true`, and an unknown service met before it is an error.
pub fn requires_offline_for_services<S: AsRef<str>>(
    registry: &ServiceRegistry,
    services: &[S],
) -> AuthScopeResult<bool> {
    for service in normalize_service_list(services) {
        let definition = registry
            .lookup(&service)
            .ok_or(AuthScopeError::UnknownService(service))?;
        if definition.requires_offline {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Sorted union of the declared minimal user scopes of the listed services.
pub fn required_user_scopes_for_services<S: AsRef<str>>(
    registry: &ServiceRegistry,
    services: &[S],
) -> AuthScopeResult<Vec<String>> {
    let mut scopes = Vec::new();
    for service in normalize_service_list(services) {
        let definition = registry
            .lookup(&service)
            .ok_or_else(|| AuthScopeError::UnknownService(service.clone()))?;
        if let Some(required) = definition.required_user_scopes.as_ref() {
            scopes.extend(required.iter().cloned());
        }
    }
    Ok(unique_sorted(scopes))
}

impl AuthScopeCatalog {
    /// Aggregates credential requirements for a space-separated command.
    ///
    /// `Ok(None)` means the command is unknown. An `Err` is only produced after the
    /// command matched, when its services reference a name missing from the registry.
    pub fn requirements_for_command(
        &self,
        command: &str,
    ) -> AuthScopeResult<Option<CommandRequirements>> {
        let Some(services) = self.commands().resolve_command(command) else {
            tracing::debug!(command, "command has no service mapping");
            return Ok(None);
        };
        let registry = self.registry();
        let token_types = token_types_for_services(registry, &services)?;
        let requires_offline = requires_offline_for_services(registry, &services)?;
        let required_user_scopes = required_user_scopes_for_services(registry, &services)?;
        Ok(Some(CommandRequirements {
            services,
            token_types,
            requires_offline,
            required_user_scopes,
        }))
    }
}

/// [`AuthScopeCatalog::requirements_for_command`] over the builtin catalog.
pub fn requirements_for_command(command: &str) -> AuthScopeResult<Option<CommandRequirements>> {
    builtin_catalog().requirements_for_command(command)
}

#[cfg(test)]
mod tests {
    use super::{
        required_user_scopes_for_services, requirements_for_command,
        requires_offline_for_services, token_types_for_services,
    };
    use crate::catalog::AuthScopeCatalog;
    use crate::command_services::CommandServiceMap;
    use crate::error::AuthScopeError;
    use crate::service_registry::ServiceRegistry;
    use crate::types::{CommandRequirements, ServiceDefinition, TokenType};

    fn offline_registry() -> ServiceRegistry {
        [
            (
                "offline".to_string(),
                ServiceDefinition {
                    token_types: [TokenType::User].into_iter().collect(),
                    requires_offline: true,
                    ..ServiceDefinition::default()
                },
            ),
            (
                "online".to_string(),
                ServiceDefinition {
                    token_types: [TokenType::Tenant].into_iter().collect(),
                    ..ServiceDefinition::default()
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn functional_drive_list_requirements_match_registry() {
        let requirements = requirements_for_command("drive list")
            .expect("drive list should aggregate")
            .expect("drive list should be known");
        assert_eq!(
            requirements,
            CommandRequirements {
                services: vec!["drive".to_string()],
                token_types: vec![TokenType::Tenant, TokenType::User],
                requires_offline: true,
                required_user_scopes: vec!["drive:drive".to_string()],
            }
        );
    }

    #[test]
    fn functional_chat_and_message_commands_share_im_requirements() {
        let chats = requirements_for_command("chats list")
            .expect("chats list should aggregate")
            .expect("chats list should be known");
        let messages = requirements_for_command("messages send")
            .expect("messages send should aggregate")
            .expect("messages send should be known");
        assert_eq!(chats, messages);
        assert_eq!(chats.services, vec!["im"]);
        assert_eq!(chats.token_types, vec![TokenType::Tenant]);
        assert!(!chats.requires_offline);
        assert!(chats.required_user_scopes.is_empty());
    }

    #[test]
    fn regression_unknown_command_is_not_found_without_error() {
        assert_eq!(requirements_for_command("unknown cmd"), Ok(None));
        assert_eq!(requirements_for_command(""), Ok(None));
    }

    #[test]
    fn regression_known_command_with_dangling_service_reports_error() {
        let mut commands = CommandServiceMap::default();
        commands.insert("ghost run", vec!["ghost".to_string(), "online".to_string()]);
        let catalog = AuthScopeCatalog::builder()
            .registry(offline_registry())
            .commands(commands)
            .build();
        assert_eq!(
            catalog.requirements_for_command("ghost run"),
            Err(AuthScopeError::UnknownService("ghost".to_string()))
        );
        assert_eq!(catalog.requirements_for_command("ghost walk"), Ok(None));
    }

    #[test]
    fn unit_token_types_are_sorted_union() {
        let registry = offline_registry();
        assert_eq!(
            token_types_for_services(&registry, &["offline", "online", "offline"]),
            Ok(vec![TokenType::Tenant, TokenType::User])
        );
        let empty: [&str; 0] = [];
        assert_eq!(token_types_for_services(&registry, &empty), Ok(Vec::new()));
    }

    #[test]
    fn regression_requires_offline_short_circuits_in_input_order() {
        let registry = offline_registry();
        assert_eq!(
            requires_offline_for_services(&registry, &["offline", "ghost"]),
            Ok(true)
        );
        assert_eq!(
            requires_offline_for_services(&registry, &["ghost", "offline"]),
            Err(AuthScopeError::UnknownService("ghost".to_string()))
        );
        assert_eq!(
            requires_offline_for_services(&registry, &["online"]),
            Ok(false)
        );
    }

    #[test]
    fn unit_required_user_scopes_skip_undeclared_and_empty() {
        let registry = ServiceRegistry::builtin();
        assert_eq!(
            required_user_scopes_for_services(&registry, &["minutes", "contact", "im"]),
            Ok(Vec::new())
        );
        assert_eq!(
            required_user_scopes_for_services(&registry, &["wiki", "drive", "Drive"]),
            Ok(vec!["drive:drive".to_string(), "wiki:wiki".to_string()])
        );
        assert_eq!(
            required_user_scopes_for_services(&registry, &["drive", "nope"]),
            Err(AuthScopeError::UnknownService("nope".to_string()))
        );
    }

    #[test]
    fn functional_requirements_are_idempotent() {
        let first = requirements_for_command("docs export");
        let second = requirements_for_command("docs export");
        assert_eq!(first, second);
        let requirements = first.expect("aggregate").expect("known");
        assert_eq!(requirements.services, vec!["docs", "drive"]);
        assert_eq!(
            requirements.required_user_scopes,
            vec!["docx:document", "drive:drive"]
        );
    }
}
