//! Error types for authentication state access.

use thiserror::Error;

/// Raised when a caller reads a part of the authentication state that has not
/// been resolved.
///
/// Always recoverable: callers treat it as "not authenticated".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationError {
    #[error("identifier is not set")]
    MissingIdentifier,

    #[error("authentication scheme is not set")]
    MissingScheme,

    #[error("identifier token is not set")]
    MissingToken,

    /// The state was already populated by an earlier scheme check.
    #[error("authentication state is already populated")]
    AlreadyPopulated,

    #[error("expected scheme '{expected}', got '{actual}'")]
    SchemeMismatch { expected: String, actual: String },

    #[error("user has not been resolved")]
    UserNotResolved,

    #[error("client has not been resolved")]
    ClientNotResolved,

    /// The presented token is unknown, expired or empty.
    #[error("invalid credentials")]
    InvalidCredentials,
}
