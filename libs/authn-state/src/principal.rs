//! Typed principals layered over [`AuthenticationState`].
//!
//! The transport sets the raw identity; resolving it to a stored entity is a
//! separate, suspending step that goes through a repository. Until that lookup
//! succeeds the principal stays unresolved and `resolve_user()` /
//! `resolve_client()` fail with [`AuthenticationError`].
//!
//! `load` is the only await point. Dropping its future cancels the lookup and
//! nothing is recorded on the principal.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::error::AuthenticationError;
use crate::state::AuthenticationState;

/// Failure reported by a principal repository.
#[derive(Debug, Error)]
#[error("repository lookup failed: {0}")]
pub struct RepositoryError(pub String);

/// Lookup of end-user entities by proof token.
#[async_trait]
pub trait UserRepository: Send + Sync {
    type User: Send + Sync;

    /// # Errors
    ///
    /// [`RepositoryError`] when the backing store cannot be queried.
    async fn find_user_by_token(&self, token: &str) -> Result<Option<Self::User>, RepositoryError>;
}

/// Lookup of registered clients by proof token.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    type Client: Send + Sync;

    /// # Errors
    ///
    /// [`RepositoryError`] when the backing store cannot be queried.
    async fn find_client_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Self::Client>, RepositoryError>;
}

fn require_scheme(state: &AuthenticationState, expected: &str) -> Result<(), AuthenticationError> {
    let actual = state.scheme()?;
    if actual == expected {
        Ok(())
    } else {
        Err(AuthenticationError::SchemeMismatch {
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        })
    }
}

/// End-user principal.
#[derive(Debug)]
pub struct UserPrincipal<U> {
    state: AuthenticationState,
    user: Option<U>,
}

impl<U: Send + Sync> UserPrincipal<U> {
    /// Wrap a state whose user has not been looked up yet.
    #[must_use]
    pub fn unresolved(state: AuthenticationState) -> Self {
        Self { state, user: None }
    }

    /// Check the state belongs to the user scheme and look the user up by token.
    ///
    /// A repository failure or a missing user leaves the principal unresolved.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::MissingIdentifier`], `MissingScheme` or
    ///   `MissingToken` if the state is not authenticated
    /// - [`AuthenticationError::SchemeMismatch`] if the caller used another scheme
    #[tracing::instrument(skip_all, fields(scheme = user_scheme))]
    pub async fn load<R>(
        state: AuthenticationState,
        user_scheme: &str,
        repository: &R,
    ) -> Result<Self, AuthenticationError>
    where
        R: UserRepository<User = U> + ?Sized,
    {
        state.identifier()?;
        require_scheme(&state, user_scheme)?;

        let user = match repository
            .find_user_by_token(state.token()?.expose_secret())
            .await
        {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                tracing::debug!("no user matches the presented token");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "user lookup failed");
                None
            }
        };

        Ok(Self { state, user })
    }

    /// # Errors
    ///
    /// [`AuthenticationError::UserNotResolved`] until a lookup has found the user.
    pub fn resolve_user(&self) -> Result<&U, AuthenticationError> {
        self.user
            .as_ref()
            .ok_or(AuthenticationError::UserNotResolved)
    }

    #[must_use]
    pub fn state(&self) -> &AuthenticationState {
        &self.state
    }
}

/// Registered-client principal.
#[derive(Debug)]
pub struct ClientPrincipal<C> {
    state: AuthenticationState,
    client: Option<C>,
}

impl<C: Send + Sync> ClientPrincipal<C> {
    #[must_use]
    pub fn unresolved(state: AuthenticationState) -> Self {
        Self {
            state,
            client: None,
        }
    }

    /// Check the state belongs to the client scheme and look the client up by token.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::MissingIdentifier`], `MissingScheme` or
    ///   `MissingToken` if the state is not authenticated
    /// - [`AuthenticationError::SchemeMismatch`] if the caller used another scheme
    #[tracing::instrument(skip_all, fields(scheme = client_scheme))]
    pub async fn load<R>(
        state: AuthenticationState,
        client_scheme: &str,
        repository: &R,
    ) -> Result<Self, AuthenticationError>
    where
        R: ClientRepository<Client = C> + ?Sized,
    {
        state.identifier()?;
        require_scheme(&state, client_scheme)?;

        let client = match repository
            .find_client_by_token(state.token()?.expose_secret())
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "client lookup failed");
                None
            }
        };

        Ok(Self { state, client })
    }

    /// # Errors
    ///
    /// [`AuthenticationError::ClientNotResolved`] until a lookup has found the client.
    pub fn resolve_client(&self) -> Result<&C, AuthenticationError> {
        self.client
            .as_ref()
            .ok_or(AuthenticationError::ClientNotResolved)
    }

    #[must_use]
    pub fn state(&self) -> &AuthenticationState {
        &self.state
    }
}
