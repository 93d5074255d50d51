#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Request flow: token → authentication state → policy lookup → evaluation.

use std::sync::Arc;

use authn_state::{AuthenticationError, AuthenticationState, Authenticator, Grants};
use authz_policy::{AuthzPolicyConfig, DynamicPolicyProvider, HandlerMode, PolicyEvaluator};
use authz_policy_sdk::{
    AuthorizationDecision, AuthorizationPolicyProvider, DenyReason, RequirementKind,
};
use static_authn_plugin::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig, TokenMapping};
use static_policy_plugin::{NamedPolicyConfig, StaticPolicyPluginConfig};

fn authenticator() -> static_authn_plugin::Service {
    let identity = |identifier: &str, scheme: &str, grants: Grants| IdentityConfig {
        identifier: identifier.to_owned(),
        scheme: scheme.to_owned(),
        grants,
    };

    static_authn_plugin::Service::from_config(&StaticAuthNPluginConfig {
        mode: AuthNMode::StaticTokens,
        tokens: vec![
            TokenMapping {
                token: "token-admin".to_owned(),
                identity: identity(
                    "admin",
                    "JWT",
                    Grants::new()
                        .permissions(["read:profile"])
                        .roles(["admin"]),
                ),
            },
            TokenMapping {
                token: "token-service".to_owned(),
                identity: identity("billing", "Bearer", Grants::new().scopes(["api"])),
            },
            TokenMapping {
                token: "token-legacy".to_owned(),
                identity: identity("legacy", "Basic", Grants::new().roles(["admin"])),
            },
        ],
        ..StaticAuthNPluginConfig::default()
    })
}

fn provider(cfg: &AuthzPolicyConfig) -> DynamicPolicyProvider {
    let fallback = static_policy_plugin::Service::from_config(&StaticPolicyPluginConfig {
        policies: vec![
            NamedPolicyConfig {
                name: "AdminOnly".to_owned(),
                roles: vec!["admin".to_owned()],
                ..NamedPolicyConfig::default()
            },
            NamedPolicyConfig {
                name: "Public".to_owned(),
                require_authenticated_user: false,
                ..NamedPolicyConfig::default()
            },
        ],
        fallback_policy: Some("Public".to_owned()),
        ..StaticPolicyPluginConfig::default()
    })
    .unwrap();

    DynamicPolicyProvider::from_config(cfg, Arc::new(fallback)).unwrap()
}

fn enforce() -> AuthzPolicyConfig {
    AuthzPolicyConfig {
        handler_mode: HandlerMode::Enforce,
        ..AuthzPolicyConfig::default()
    }
}

async fn authorize(
    cfg: &AuthzPolicyConfig,
    token: &str,
    policy_name: &str,
) -> Result<AuthorizationDecision, AuthenticationError> {
    let authn: &dyn Authenticator = &authenticator();
    let state = authn.authenticate(token).await?;
    let policy = provider(cfg).policy(policy_name).expect("policy resolves");
    Ok(PolicyEvaluator::from_config(cfg).evaluate(&policy, &state))
}

#[tokio::test]
async fn descriptor_policy_is_enforced_against_grants() {
    let cfg = enforce();

    let decision = authorize(&cfg, "token-admin", "permissions$read:profile;roles$admin")
        .await
        .unwrap();
    assert!(decision.is_allowed());

    let decision = authorize(&cfg, "token-service", "permissions$read:profile;roles$admin")
        .await
        .unwrap();
    assert_eq!(
        decision,
        AuthorizationDecision::Deny(DenyReason::RequirementFailed {
            kind: RequirementKind::Permissions,
            raw_value: "read:profile".to_owned(),
        })
    );
}

#[tokio::test]
async fn client_scheme_satisfies_descriptor_policy() {
    let decision = authorize(&enforce(), "token-service", "scopes$api,admin")
        .await
        .unwrap();

    assert!(decision.is_allowed());
}

#[tokio::test]
async fn foreign_scheme_is_rejected_even_with_grants() {
    let decision = authorize(&enforce(), "token-legacy", "roles$admin")
        .await
        .unwrap();

    assert_eq!(
        decision,
        AuthorizationDecision::Deny(DenyReason::SchemeNotAccepted {
            scheme: "Basic".to_owned()
        })
    );
}

#[tokio::test]
async fn passthrough_mode_never_blocks_well_formed_requirements() {
    let decision = authorize(&AuthzPolicyConfig::default(), "token-service", "roles$admin")
        .await
        .unwrap();

    assert!(decision.is_allowed());
}

#[tokio::test]
async fn conventional_names_resolve_through_fallback() {
    let cfg = enforce();

    assert!(
        authorize(&cfg, "token-admin", "AdminOnly")
            .await
            .unwrap()
            .is_allowed()
    );
    assert!(
        !authorize(&cfg, "token-service", "AdminOnly")
            .await
            .unwrap()
            .is_allowed()
    );
}

#[tokio::test]
async fn unknown_token_fails_authentication() {
    let err = authorize(&enforce(), "nope", "roles$admin").await.unwrap_err();

    assert_eq!(err, AuthenticationError::InvalidCredentials);
}

#[test]
fn blank_and_malformed_names_route_to_fallback() {
    let provider = provider(&AuthzPolicyConfig::default());

    assert!(provider.policy("").is_none());
    assert!(provider.policy("permissions$").is_none());
    assert!(provider.policy("unknown$x").is_none());
    assert!(provider.policy("Public").is_some());

    let fallback = provider.fallback_policy().unwrap();
    assert!(!fallback.requires_authenticated_user());
}

#[test]
fn partially_populated_state_is_denied() {
    let provider = provider(&AuthzPolicyConfig::default());
    let policy = provider.policy("roles$admin").unwrap();
    let state = AuthenticationState::builder().identifier("user-1").build();

    assert!(!state.is_authenticated());
    assert_eq!(state.scheme(), Err(AuthenticationError::MissingScheme));
    assert_eq!(
        PolicyEvaluator::from_config(&AuthzPolicyConfig::default()).evaluate(&policy, &state),
        AuthorizationDecision::Deny(DenyReason::Unauthenticated)
    );
}

#[test]
fn default_policy_admits_either_scheme() {
    let provider = provider(&enforce());
    let evaluator = PolicyEvaluator::from_config(&enforce());
    let policy = provider.default_policy();

    for scheme in ["JWT", "Bearer"] {
        let state = AuthenticationState::builder()
            .identifier("someone")
            .scheme(scheme)
            .token("tok")
            .build();
        assert!(evaluator.evaluate(&policy, &state).is_allowed(), "{scheme}");
    }
}
