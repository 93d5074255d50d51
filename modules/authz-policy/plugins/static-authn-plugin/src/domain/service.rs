//! Service implementation for the static `AuthN` plugin.

use std::collections::HashMap;

use authn_state::AuthenticationState;
use tracing::{info, warn};

use crate::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig};

/// Static token authenticator.
///
/// - `accept_all`: any non-empty token maps to the default identity
/// - `static_tokens`: specific tokens map to specific identities
#[derive(Debug)]
pub struct Service {
    mode: AuthNMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        if cfg.mode == AuthNMode::AcceptAll {
            warn!(
                "Static AuthN plugin is running in `accept_all` mode, \
                 every non-empty token is accepted with the default identity"
            );
        }
        info!(mode = ?cfg.mode, token_count = cfg.tokens.len(), "Static authn plugin created");

        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            mode: cfg.mode,
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    /// Authenticate a token and return a populated state.
    ///
    /// Returns `None` if the token is empty or not recognized (in
    /// `static_tokens` mode).
    #[must_use]
    pub fn authenticate(&self, token: &str) -> Option<AuthenticationState> {
        if token.is_empty() {
            return None;
        }

        let identity = match self.mode {
            AuthNMode::AcceptAll => &self.default_identity,
            AuthNMode::StaticTokens => self.token_map.get(token)?,
        };

        Some(build_state(identity, token))
    }
}

fn build_state(identity: &IdentityConfig, token: &str) -> AuthenticationState {
    AuthenticationState::builder()
        .identifier(identity.identifier.clone())
        .scheme(identity.scheme.clone())
        .token(token)
        .grants(identity.grants.clone())
        .build()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use authn_state::Grants;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::config::TokenMapping;

    fn static_tokens() -> StaticAuthNPluginConfig {
        StaticAuthNPluginConfig {
            mode: AuthNMode::StaticTokens,
            tokens: vec![TokenMapping {
                token: "token-admin".to_owned(),
                identity: IdentityConfig {
                    identifier: "admin".to_owned(),
                    scheme: "Bearer".to_owned(),
                    grants: Grants::new().roles(["admin"]),
                },
            }],
            ..StaticAuthNPluginConfig::default()
        }
    }

    #[test]
    fn accept_all_mode_returns_default_identity() {
        let service = Service::from_config(&StaticAuthNPluginConfig::default());

        let state = service.authenticate("any-token-value").unwrap();

        assert!(state.is_authenticated());
        assert_eq!(state.identifier(), Ok("default-user"));
        assert_eq!(state.scheme(), Ok("JWT"));
        assert_eq!(state.token().unwrap().expose_secret(), "any-token-value");
        assert!(state.grants().is_empty());
    }

    #[test]
    fn accept_all_mode_rejects_empty_token() {
        let service = Service::from_config(&StaticAuthNPluginConfig::default());

        assert!(service.authenticate("").is_none());
    }

    #[test]
    fn static_tokens_mode_returns_mapped_identity() {
        let service = Service::from_config(&static_tokens());

        let state = service.authenticate("token-admin").unwrap();

        assert_eq!(state.identifier(), Ok("admin"));
        assert_eq!(state.scheme(), Ok("Bearer"));
        assert_eq!(state.grants().granted_roles(), ["admin"]);
    }

    #[test]
    fn static_tokens_mode_rejects_unknown_token() {
        let service = Service::from_config(&static_tokens());

        assert!(service.authenticate("unknown-token").is_none());
        assert!(service.authenticate("").is_none());
    }

    #[test]
    fn config_deserializes_from_json() {
        let cfg: StaticAuthNPluginConfig = serde_json::from_value(serde_json::json!({
            "mode": "static_tokens",
            "tokens": [{
                "token": "t1",
                "identity": { "identifier": "svc", "grants": { "scopes": ["api"] } }
            }]
        }))
        .unwrap();

        let state = Service::from_config(&cfg).authenticate("t1").unwrap();
        assert_eq!(state.scheme(), Ok("JWT"));
        assert_eq!(state.grants().granted_scopes(), ["api"]);
    }
}
