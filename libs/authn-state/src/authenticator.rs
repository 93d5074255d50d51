//! Trait for the collaborator that turns a presented token into an
//! [`AuthenticationState`].
//!
//! Token verification itself (signatures, expiry, introspection) lives behind
//! this trait. The engine only consumes the populated state.

use async_trait::async_trait;

use crate::error::AuthenticationError;
use crate::state::AuthenticationState;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate `token` and return a populated state.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::InvalidCredentials`] if the token is empty,
    ///   unknown or expired
    async fn authenticate(&self, token: &str) -> Result<AuthenticationState, AuthenticationError>;
}
