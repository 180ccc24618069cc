//! CLI argument models and validation utilities for the `lark-rs` binary.
//!
//! Exposes clap-backed flag types plus the helpers the binary uses to pick an
//! auth-scope inspection mode and to explain unknown command paths.

pub mod cli_args;
pub mod cli_types;
pub mod command_text;
pub mod validation;

pub use cli_args::Cli;
pub use cli_types::*;
pub use command_text::*;
pub use validation::*;
