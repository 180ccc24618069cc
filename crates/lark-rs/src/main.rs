mod auth_scope_commands;
mod bootstrap_helpers;

use std::io::Write;

use anyhow::{bail, Result};
use clap::Parser;
use lark_cli::{validate_auth_scope_cli, Cli};

use crate::auth_scope_commands::{execute_auth_scope_mode, load_auth_scope_catalog};
use crate::bootstrap_helpers::init_tracing;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    validate_auth_scope_cli(&cli)?;
    let Some(mode) = cli.auth_scope_mode() else {
        bail!(
            "no mode selected: pass --auth-requirements, --auth-login-scopes, --auth-suggest-scopes, --auth-scope-audit, or --auth-services-list (see --help)"
        );
    };

    let catalog = load_auth_scope_catalog(&cli)?;
    let output = execute_auth_scope_mode(&cli, mode, &catalog)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
