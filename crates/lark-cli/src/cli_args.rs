use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::CliAuthScopeMode;

#[derive(Debug, Parser)]
#[command(
    name = "lark-rs",
    about = "Workspace platform CLI: inspect the services, credentials and OAuth scopes commands need",
    version
)]
/// Top-level flags for the `lark-rs` binary.
pub struct Cli {
    #[arg(
        long = "auth-catalog-file",
        env = "LARK_AUTH_CATALOG_FILE",
        help = "Optional JSON overlay (schema_version 1) merged over the builtin service, command and alias tables"
    )]
    pub auth_catalog_file: Option<PathBuf>,

    #[arg(
        long = "auth-requirements",
        env = "LARK_AUTH_REQUIREMENTS",
        value_name = "COMMAND",
        conflicts_with = "auth_login_scopes",
        conflicts_with = "auth_suggest_scopes",
        conflicts_with = "auth_scope_audit",
        conflicts_with = "auth_services_list",
        help = "Print services, token types, offline requirement and minimal user scopes for a command such as \"drive list\", then exit"
    )]
    pub auth_requirements: Option<String>,

    #[arg(
        long = "auth-login-scopes",
        env = "LARK_AUTH_LOGIN_SCOPES",
        default_value_t = false,
        conflicts_with = "auth_suggest_scopes",
        conflicts_with = "auth_scope_audit",
        conflicts_with = "auth_services_list",
        help = "Print the OAuth scopes a login flow requests for --auth-services (aliases expanded, defaults when empty), then exit"
    )]
    pub auth_login_scopes: bool,

    #[arg(
        long = "auth-suggest-scopes",
        env = "LARK_AUTH_SUGGEST_SCOPES",
        default_value_t = false,
        conflicts_with = "auth_scope_audit",
        conflicts_with = "auth_services_list",
        help = "Print suggested OAuth scopes for --auth-services without opposite-variant fallback, then exit"
    )]
    pub auth_suggest_scopes: bool,

    #[arg(
        long = "auth-scope-audit",
        env = "LARK_AUTH_SCOPE_AUDIT",
        default_value_t = false,
        conflicts_with = "auth_services_list",
        help = "Report user-authorized services without declared scopes and commands referencing unknown services, then exit"
    )]
    pub auth_scope_audit: bool,

    #[arg(
        long = "auth-services-list",
        env = "LARK_AUTH_SERVICES_LIST",
        default_value_t = false,
        help = "List registered services with their token types and offline requirement, then exit"
    )]
    pub auth_services_list: bool,

    #[arg(
        long = "auth-services",
        env = "LARK_AUTH_SERVICES",
        value_delimiter = ',',
        value_name = "SERVICE",
        help = "Services or aliases (all, user) consumed by --auth-login-scopes, --auth-suggest-scopes and --auth-scope-audit"
    )]
    pub auth_services: Vec<String>,

    #[arg(
        long = "auth-readonly",
        env = "LARK_AUTH_READONLY",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Prefer readonly scope variants"
    )]
    pub auth_readonly: bool,

    #[arg(
        long = "auth-drive-scope",
        env = "LARK_AUTH_DRIVE_SCOPE",
        value_name = "SCOPE",
        help = "Explicit scope variant for --auth-login-scopes: full or readonly"
    )]
    pub auth_drive_scope: Option<String>,

    #[arg(
        long = "auth-json",
        env = "LARK_AUTH_JSON",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Emit auth-scope mode output as pretty JSON"
    )]
    pub auth_json: bool,
}

impl Cli {
    /// The auth-scope mode selected on the command line, if any.
    pub fn auth_scope_mode(&self) -> Option<CliAuthScopeMode> {
        if self.auth_requirements.is_some() {
            Some(CliAuthScopeMode::Requirements)
        } else if self.auth_login_scopes {
            Some(CliAuthScopeMode::LoginScopes)
        } else if self.auth_suggest_scopes {
            Some(CliAuthScopeMode::SuggestScopes)
        } else if self.auth_scope_audit {
            Some(CliAuthScopeMode::ScopeAudit)
        } else if self.auth_services_list {
            Some(CliAuthScopeMode::ServicesList)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;
    use crate::CliAuthScopeMode;

    #[test]
    fn unit_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn functional_auth_services_accept_comma_delimited_values() {
        let cli = Cli::try_parse_from([
            "lark-rs",
            "--auth-login-scopes",
            "--auth-services",
            "drive,mail",
            "--auth-services",
            "user",
        ])
        .expect("parse login scopes");
        assert_eq!(cli.auth_services, vec!["drive", "mail", "user"]);
        assert_eq!(cli.auth_scope_mode(), Some(CliAuthScopeMode::LoginScopes));
        assert!(!cli.auth_readonly);
    }

    #[test]
    fn functional_auth_requirements_takes_command_text() {
        let cli = Cli::try_parse_from([
            "lark-rs",
            "--auth-requirements",
            "drive list",
            "--auth-json",
        ])
        .expect("parse requirements");
        assert_eq!(cli.auth_requirements.as_deref(), Some("drive list"));
        assert!(cli.auth_json);
        assert_eq!(cli.auth_scope_mode(), Some(CliAuthScopeMode::Requirements));
    }

    #[test]
    fn regression_auth_modes_are_mutually_exclusive() {
        let error = Cli::try_parse_from([
            "lark-rs",
            "--auth-login-scopes",
            "--auth-suggest-scopes",
        ])
        .expect_err("two modes should conflict");
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn regression_only_auth_scope_flags_are_accepted() {
        let error = Cli::try_parse_from(["lark-rs", "--shell-completion", "bash"])
            .expect_err("completion scripts are not a lark-rs mode");
        assert_eq!(error.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn regression_no_flags_selects_no_mode() {
        let cli = Cli::try_parse_from(["lark-rs"]).expect("parse bare invocation");
        assert!(cli.auth_scope_mode().is_none());
    }
}
