use anyhow::{bail, Result};

use crate::{Cli, CliAuthScopeMode};

/// Rejects flag combinations clap cannot express on its own.
///
/// Drive-scope values are validated later by the scope resolver so the
/// messages stay identical for CLI and library callers.
pub fn validate_auth_scope_cli(cli: &Cli) -> Result<()> {
    let mode = cli.auth_scope_mode();

    if !cli.auth_services.is_empty() && !mode.is_some_and(CliAuthScopeMode::accepts_services) {
        bail!(
            "--auth-services requires --auth-login-scopes, --auth-suggest-scopes, or --auth-scope-audit"
        );
    }
    if cli.auth_readonly && !mode.is_some_and(CliAuthScopeMode::accepts_readonly) {
        bail!("--auth-readonly requires --auth-login-scopes or --auth-suggest-scopes");
    }
    if cli.auth_drive_scope.is_some() && mode != Some(CliAuthScopeMode::LoginScopes) {
        bail!("--auth-drive-scope requires --auth-login-scopes");
    }
    if let Some(command) = cli.auth_requirements.as_deref() {
        if command.trim().is_empty() {
            bail!("--auth-requirements cannot be empty");
        }
    }
    if cli.auth_json && mode.is_none() {
        bail!("--auth-json requires an auth-scope mode flag");
    }
    Ok(())
}
