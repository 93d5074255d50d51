//! Configuration for the static `AuthN` plugin.

use authn_state::{Grants, USER_SCHEME};
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Authentication mode.
    pub mode: AuthNMode,

    /// Identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

/// Authentication mode.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthNMode {
    /// Accept any non-empty token and return the default identity.
    #[default]
    AcceptAll,
    /// Map specific tokens to specific identities.
    StaticTokens,
}

/// Identity asserted for an accepted token.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub identifier: String,

    /// Scheme label recorded on the state, e.g. `JWT` or `Bearer`.
    pub scheme: String,

    pub grants: Grants,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            identifier: "default-user".to_owned(),
            scheme: USER_SCHEME.to_owned(),
            grants: Grants::new(),
        }
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The token value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
}
