use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Enumerates supported `AuthScopeError` values.
pub enum AuthScopeError {
    #[error("unknown service '{0}'")]
    UnknownService(String),
    #[error("service '{0}' does not require user authorization")]
    ServiceNotUserAuthorized(String),
    #[error("service '{0}' does not declare user OAuth scopes yet")]
    UserScopesUndeclared(String),
    #[error("drive scope 'file' is not supported yet; use --auth-drive-scope full or readonly")]
    UnsupportedDriveScope,
    #[error("invalid drive scope '{0}': expected full or readonly")]
    InvalidDriveScope(String),
    #[error(
        "conflicting scope flags: --auth-readonly cannot be combined with --auth-drive-scope '{0}'; pass only one of them"
    )]
    ConflictingScopeFlags(String),
}

pub type AuthScopeResult<T> = Result<T, AuthScopeError>;
