use std::collections::BTreeSet;

use lark_auth_scope::{
    all_service_names, builtin_catalog, requirements_for_command,
    services_missing_required_user_scopes, suggested_user_oauth_scopes_from_services,
    user_oauth_scopes_from_services, AuthScopeCatalog, AuthScopeError, TokenType,
};

fn is_sorted_unique(values: &[String]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

#[test]
fn integration_every_builtin_command_aggregates_sorted_requirements() {
    let catalog = builtin_catalog();
    for (command, _) in catalog.commands().iter() {
        let requirements = catalog
            .requirements_for_command(command)
            .unwrap_or_else(|error| panic!("{command} should aggregate: {error}"))
            .unwrap_or_else(|| panic!("{command} should be known"));
        assert!(is_sorted_unique(&requirements.services), "{command}");
        assert!(
            is_sorted_unique(&requirements.required_user_scopes),
            "{command}"
        );
        assert!(requirements
            .token_types
            .windows(2)
            .all(|pair| pair[0] < pair[1]));

        let shouted = command.to_uppercase().replace(' ', "   ");
        assert_eq!(
            catalog.requirements_for_command(&format!("  {shouted} ")),
            Ok(Some(requirements)),
            "{command} should resolve case- and whitespace-insensitively"
        );
    }
}

#[test]
fn integration_required_scopes_feed_login_flow_for_user_commands() {
    let requirements = requirements_for_command("docs export")
        .expect("aggregate docs export")
        .expect("docs export is known");
    assert!(requirements.token_types.contains(&TokenType::User));

    let login = user_oauth_scopes_from_services(&requirements.services, false, "")
        .expect("login scopes for docs export");
    for scope in &requirements.required_user_scopes {
        assert!(login.contains(scope), "login scopes should cover {scope}");
    }

    let preview = suggested_user_oauth_scopes_from_services(&requirements.services, false)
        .expect("suggested scopes for docs export");
    assert_eq!(preview, login);
}

#[test]
fn integration_tenant_only_command_cannot_drive_a_login_flow() {
    let requirements = requirements_for_command("messages send")
        .expect("aggregate messages send")
        .expect("messages send is known");
    assert_eq!(requirements.token_types, vec![TokenType::Tenant]);
    assert_eq!(
        user_oauth_scopes_from_services(&requirements.services, false, ""),
        Err(AuthScopeError::ServiceNotUserAuthorized("im".to_string()))
    );
}

#[test]
fn integration_all_alias_login_scopes_cover_every_declared_user_service() {
    let full = user_oauth_scopes_from_services(&["all"], false, "").expect("all full");
    let readonly = user_oauth_scopes_from_services(&["ALL"], true, "").expect("all readonly");
    assert!(is_sorted_unique(&full));
    assert!(is_sorted_unique(&readonly));
    assert!(full.contains(&"bitable:app".to_string()));
    assert!(readonly.contains(&"bitable:app:readonly".to_string()));
    assert!(!readonly.contains(&"mail:user_mailbox.message:send".to_string()));
}

#[test]
fn integration_audit_agrees_with_login_flow_failures() {
    let missing =
        services_missing_required_user_scopes(&all_service_names()).expect("audit builtin");
    for service in &missing {
        assert_eq!(
            user_oauth_scopes_from_services(&[service.as_str()], false, ""),
            Err(AuthScopeError::UserScopesUndeclared(service.clone()))
        );
    }
}

#[test]
fn integration_injected_catalog_isolated_from_builtin() {
    let mut catalog = AuthScopeCatalog::builtin();
    catalog
        .apply_overlay_json(
            &serde_json::json!({
                "schema_version": 1,
                "services": {"drive": {"token_types": ["tenant"], "requires_offline": false}}
            })
            .to_string(),
        )
        .expect("apply overlay");

    let overridden = catalog
        .requirements_for_command("drive list")
        .expect("aggregate")
        .expect("known");
    assert!(!overridden.requires_offline);
    assert!(overridden.required_user_scopes.is_empty());

    let builtin = requirements_for_command("drive list")
        .expect("aggregate")
        .expect("known");
    assert!(builtin.requires_offline);
    assert_eq!(
        builtin.token_types.into_iter().collect::<BTreeSet<_>>(),
        BTreeSet::from([TokenType::Tenant, TokenType::User])
    );
}
