use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::AuthenticationError;

/// Claims asserted for the caller by the authenticating collaborator.
///
/// Only consulted by requirement handlers running in enforcing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Grants {
    permissions: Vec<String>,
    roles: Vec<String>,
    scopes: Vec<String>,
}

impl Grants {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn granted_permissions(&self) -> &[String] {
        &self.permissions
    }

    #[must_use]
    pub fn granted_roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn granted_scopes(&self) -> &[String] {
        &self.scopes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty() && self.scopes.is_empty()
    }
}

/// `AuthenticationState` holds who is calling and how, for a single request.
///
/// Created empty when the request starts, populated once by the scheme that
/// accepted the caller, then read-only until the request ends. The state is
/// owned by one request; it is never shared across requests.
///
/// The caller counts as authenticated only when the identifier, the scheme
/// label and the identifier token are all present.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationState {
    identifier: Option<String>,
    /// Scheme label, e.g. `"JWT"` or `"Bearer"`.
    authentication_type: Option<String>,
    /// Opaque proof or session token. `SecretString` keeps it out of `Debug` output.
    identifier_token: Option<SecretString>,
    grants: Grants,
}

impl AuthenticationState {
    /// Create an empty (unauthenticated) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> AuthenticationStateBuilder {
        AuthenticationStateBuilder::default()
    }

    /// Populate the identity after a successful scheme check.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::AlreadyPopulated`] if any identity field
    /// was set before.
    pub fn set_identity(
        &mut self,
        identifier: impl Into<String>,
        scheme: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<(), AuthenticationError> {
        if self.identifier.is_some()
            || self.authentication_type.is_some()
            || self.identifier_token.is_some()
        {
            return Err(AuthenticationError::AlreadyPopulated);
        }

        self.identifier = Some(identifier.into());
        self.authentication_type = Some(scheme.into());
        self.identifier_token = Some(SecretString::from(token.into()));
        Ok(())
    }

    /// Attach the claims asserted by the authenticating scheme.
    pub fn set_grants(&mut self, grants: Grants) {
        self.grants = grants;
    }

    /// # Errors
    ///
    /// [`AuthenticationError::MissingIdentifier`] if the identifier was never set.
    pub fn identifier(&self) -> Result<&str, AuthenticationError> {
        self.identifier
            .as_deref()
            .ok_or(AuthenticationError::MissingIdentifier)
    }

    /// # Errors
    ///
    /// [`AuthenticationError::MissingScheme`] if the scheme label was never set.
    pub fn scheme(&self) -> Result<&str, AuthenticationError> {
        self.authentication_type
            .as_deref()
            .ok_or(AuthenticationError::MissingScheme)
    }

    /// # Errors
    ///
    /// [`AuthenticationError::MissingToken`] if the identifier token was never set.
    pub fn token(&self) -> Result<&SecretString, AuthenticationError> {
        self.identifier_token
            .as_ref()
            .ok_or(AuthenticationError::MissingToken)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identifier.is_some()
            && self.authentication_type.is_some()
            && self.identifier_token.is_some()
    }

    #[must_use]
    pub fn grants(&self) -> &Grants {
        &self.grants
    }
}

/// Builder for states populated outside the normal request flow
/// (tests, background jobs, partially resolved transports).
#[derive(Default)]
pub struct AuthenticationStateBuilder {
    identifier: Option<String>,
    authentication_type: Option<String>,
    identifier_token: Option<SecretString>,
    grants: Grants,
}

impl AuthenticationStateBuilder {
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.authentication_type = Some(scheme.into());
        self
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.identifier_token = Some(SecretString::from(token.into()));
        self
    }

    #[must_use]
    pub fn grants(mut self, grants: Grants) -> Self {
        self.grants = grants;
        self
    }

    #[must_use]
    pub fn build(self) -> AuthenticationState {
        AuthenticationState {
            identifier: self.identifier,
            authentication_type: self.authentication_type,
            identifier_token: self.identifier_token,
            grants: self.grants,
        }
    }
}
