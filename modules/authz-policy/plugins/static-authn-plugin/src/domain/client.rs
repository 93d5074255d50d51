//! [`Authenticator`] implementation for the static `AuthN` plugin.

use async_trait::async_trait;
use authn_state::{AuthenticationError, AuthenticationState, Authenticator};

use super::service::Service;

#[async_trait]
impl Authenticator for Service {
    async fn authenticate(&self, token: &str) -> Result<AuthenticationState, AuthenticationError> {
        Service::authenticate(self, token).ok_or(AuthenticationError::InvalidCredentials)
    }
}
