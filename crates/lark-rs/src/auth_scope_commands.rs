use anyhow::{Context, Result};
use lark_auth_scope::{
    normalize_service_list, AuthScopeCatalog, CommandRequirements, DanglingServiceReference,
    ServiceDefinition, TokenType,
};
use lark_cli::{unknown_command_message, Cli, CliAuthScopeMode};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RequirementsReport<'a> {
    command: &'a str,
    found: bool,
    #[serde(flatten)]
    requirements: Option<CommandRequirements>,
}

#[derive(Debug, Serialize)]
struct ScopeReport<'a> {
    policy: &'static str,
    readonly: bool,
    drive_scope: Option<&'a str>,
    services: Vec<String>,
    scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AuditReport {
    services_checked: usize,
    missing_required_user_scopes: Vec<String>,
    dangling_command_references: Vec<DanglingServiceReference>,
}

#[derive(Debug, Serialize)]
struct ServiceRow<'a> {
    name: &'a str,
    token_types: Vec<TokenType>,
    requires_offline: bool,
    required_user_scopes: Option<&'a [String]>,
}

/// Loads the catalog selected by `--auth-catalog-file`, or the builtin one.
pub(crate) fn load_auth_scope_catalog(cli: &Cli) -> Result<AuthScopeCatalog> {
    match cli.auth_catalog_file.as_deref() {
        Some(path) => AuthScopeCatalog::with_overlay_file(path),
        None => Ok(AuthScopeCatalog::builtin()),
    }
}

/// Runs the selected auth-scope mode and returns the text to print.
pub(crate) fn execute_auth_scope_mode(
    cli: &Cli,
    mode: CliAuthScopeMode,
    catalog: &AuthScopeCatalog,
) -> Result<String> {
    tracing::debug!(mode = mode.flag(), json = cli.auth_json, "running auth-scope mode");
    match mode {
        CliAuthScopeMode::Requirements => {
            let command = cli.auth_requirements.as_deref().unwrap_or_default();
            execute_requirements(catalog, command, cli.auth_json)
        }
        CliAuthScopeMode::LoginScopes => execute_login_scopes(cli, catalog),
        CliAuthScopeMode::SuggestScopes => execute_suggest_scopes(cli, catalog),
        CliAuthScopeMode::ScopeAudit => execute_scope_audit(cli, catalog),
        CliAuthScopeMode::ServicesList => execute_services_list(catalog, cli.auth_json),
    }
}

fn execute_requirements(catalog: &AuthScopeCatalog, command: &str, json: bool) -> Result<String> {
    let requirements = catalog
        .requirements_for_command(command)
        .with_context(|| format!("command '{}' maps to an unregistered service", command.trim()))?;
    if json {
        let report = RequirementsReport {
            command: command.trim(),
            found: requirements.is_some(),
            requirements,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let Some(requirements) = requirements else {
        let known = catalog
            .commands()
            .iter()
            .map(|(command, _)| command)
            .collect::<Vec<_>>();
        return Ok(unknown_command_message(command, &known));
    };
    Ok(render_requirements(command, &requirements))
}

fn render_requirements(command: &str, requirements: &CommandRequirements) -> String {
    let token_types = requirements
        .token_types
        .iter()
        .map(|token_type| token_type.as_str())
        .collect::<Vec<_>>();
    [
        format!(
            "auth requirements: command={}",
            command.split_whitespace().collect::<Vec<_>>().join(" ")
        ),
        format!("services: {}", render_list(&requirements.services)),
        format!("token_types: {}", render_list(&token_types)),
        format!("requires_offline: {}", requirements.requires_offline),
        format!(
            "required_user_scopes: {}",
            render_list(&requirements.required_user_scopes)
        ),
    ]
    .join("\n")
}

fn execute_login_scopes(cli: &Cli, catalog: &AuthScopeCatalog) -> Result<String> {
    let drive_scope = cli.auth_drive_scope.as_deref();
    let scopes = catalog.user_oauth_scopes_from_services(
        &cli.auth_services,
        cli.auth_readonly,
        drive_scope.unwrap_or_default(),
    )?;
    let mut services = catalog.expand_service_aliases(&cli.auth_services);
    if services.is_empty() {
        services = catalog.default_services().to_vec();
    }
    render_scope_report(
        ScopeReport {
            policy: "login",
            readonly: cli.auth_readonly,
            drive_scope,
            services,
            scopes,
        },
        cli.auth_json,
    )
}

fn execute_suggest_scopes(cli: &Cli, catalog: &AuthScopeCatalog) -> Result<String> {
    let scopes =
        catalog.suggested_user_oauth_scopes_from_services(&cli.auth_services, cli.auth_readonly)?;
    render_scope_report(
        ScopeReport {
            policy: "suggest",
            readonly: cli.auth_readonly,
            drive_scope: None,
            services: normalize_service_list(&cli.auth_services),
            scopes,
        },
        cli.auth_json,
    )
}

fn render_scope_report(report: ScopeReport<'_>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let mut lines = vec![format!(
        "auth scopes: policy={} readonly={} services={}",
        report.policy,
        report.readonly,
        render_list(&report.services)
    )];
    lines.extend(report.scopes.iter().map(|scope| format!("scope: {scope}")));
    Ok(lines.join("\n"))
}

fn execute_scope_audit(cli: &Cli, catalog: &AuthScopeCatalog) -> Result<String> {
    let services = if cli.auth_services.is_empty() {
        catalog.all_service_names()
    } else {
        catalog.expand_service_aliases(&cli.auth_services)
    };
    let report = AuditReport {
        services_checked: services.len(),
        missing_required_user_scopes: catalog.services_missing_required_user_scopes(&services)?,
        dangling_command_references: catalog.dangling_command_references(),
    };
    if cli.auth_json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let mut lines = vec![format!(
        "auth scope audit: services_checked={} missing_required_user_scopes={} dangling_command_references={}",
        report.services_checked,
        report.missing_required_user_scopes.len(),
        report.dangling_command_references.len()
    )];
    lines.extend(
        report
            .missing_required_user_scopes
            .iter()
            .map(|service| format!("missing_required_user_scopes: service={service}")),
    );
    lines.extend(report.dangling_command_references.iter().map(|reference| {
        format!(
            "dangling_command_reference: command={} service={}",
            reference.command, reference.service
        )
    }));
    Ok(lines.join("\n"))
}

fn execute_services_list(catalog: &AuthScopeCatalog, json: bool) -> Result<String> {
    let rows = catalog
        .registry()
        .iter()
        .map(|(name, definition)| service_row(name, definition))
        .collect::<Vec<_>>();
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut lines = vec![format!("auth services: count={}", rows.len())];
    for row in &rows {
        let token_types = row
            .token_types
            .iter()
            .map(|token_type| token_type.as_str())
            .collect::<Vec<_>>();
        let scopes = match row.required_user_scopes {
            Some(scopes) => render_list(scopes),
            None => "undeclared".to_string(),
        };
        lines.push(format!(
            "service: name={} token_types={} requires_offline={} required_user_scopes={}",
            row.name,
            render_list(&token_types),
            row.requires_offline,
            scopes
        ));
    }
    Ok(lines.join("\n"))
}

fn service_row<'a>(name: &'a str, definition: &'a ServiceDefinition) -> ServiceRow<'a> {
    ServiceRow {
        name,
        token_types: definition.token_types.iter().copied().collect(),
        requires_offline: definition.requires_offline,
        required_user_scopes: definition.required_user_scopes.as_deref(),
    }
}

fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
