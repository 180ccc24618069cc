//! Authorization-requirement resolution for workspace-platform CLI commands.
//!
//! Maps command paths to backend services, aggregates the credential types,
//! offline flag and OAuth scopes those services need, and audits services that
//! have not declared their user scopes yet.

mod aliases;
mod catalog;
mod command_services;
mod error;
mod normalize;
mod oauth_scopes;
mod requirements;
mod scope_audit;
mod service_registry;
mod types;

pub use aliases::*;
pub use catalog::*;
pub use command_services::*;
pub use error::*;
pub use normalize::*;
pub use oauth_scopes::*;
pub use requirements::*;
pub use scope_audit::*;
pub use service_registry::*;
pub use types::*;
