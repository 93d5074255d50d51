//! Policy evaluation pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use authn_state::AuthenticationState;
use authz_policy_sdk::{
    AuthorizationContext, AuthorizationDecision, AuthorizationPolicy, DenyReason, HandlerOutcome,
    RequirementHandler, RequirementKind,
};
use tracing::{debug, info};

use crate::config::AuthzPolicyConfig;
use crate::domain::handlers::{PermissionsHandler, RolesHandler, ScopesHandler};

/// Runs a policy against a request's authentication state.
///
/// Evaluation order:
/// 1. authenticated-user check
/// 2. scheme check (only when the caller is authenticated)
/// 3. each requirement, in policy order, through the handler for its kind
///
/// The first failing step denies. [`HandlerOutcome::Continue`] never blocks.
#[derive(Clone, Default)]
pub struct PolicyEvaluator {
    handlers: HashMap<RequirementKind, Arc<dyn RequirementHandler>>,
}

impl PolicyEvaluator {
    /// Evaluator with no handlers registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for its kind, replacing any previous one.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn RequirementHandler>) -> Self {
        self.handlers.insert(handler.kind(), handler);
        self
    }

    /// Evaluator with the built-in handler for every kind, in the configured mode.
    #[must_use]
    pub fn from_config(cfg: &AuthzPolicyConfig) -> Self {
        info!(mode = ?cfg.handler_mode, "Policy evaluator created");
        Self::new()
            .with_handler(Arc::new(PermissionsHandler::new(cfg.handler_mode)))
            .with_handler(Arc::new(RolesHandler::new(cfg.handler_mode)))
            .with_handler(Arc::new(ScopesHandler::new(cfg.handler_mode)))
    }

    #[must_use]
    #[tracing::instrument(skip_all, fields(requirements = policy.requirements().len()))]
    pub fn evaluate(
        &self,
        policy: &AuthorizationPolicy,
        state: &AuthenticationState,
    ) -> AuthorizationDecision {
        if policy.requires_authenticated_user() && !state.is_authenticated() {
            debug!("denied: caller is not authenticated");
            return AuthorizationDecision::Deny(DenyReason::Unauthenticated);
        }

        if let Ok(scheme) = state.scheme()
            && state.is_authenticated()
            && !policy.accepts_scheme(scheme)
        {
            debug!(scheme, "denied: scheme not accepted by policy");
            return AuthorizationDecision::Deny(DenyReason::SchemeNotAccepted {
                scheme: scheme.to_owned(),
            });
        }

        let ctx = AuthorizationContext::new(state, policy.requirements());
        for requirement in policy.requirements() {
            let Some(handler) = self.handlers.get(&requirement.kind()) else {
                debug!(kind = %requirement.kind(), "denied: no handler registered");
                return AuthorizationDecision::Deny(DenyReason::NoHandler {
                    kind: requirement.kind(),
                });
            };

            if handler.evaluate(requirement, &ctx) == HandlerOutcome::Fail {
                debug!(kind = %requirement.kind(), "denied: requirement failed");
                return AuthorizationDecision::Deny(DenyReason::RequirementFailed {
                    kind: requirement.kind(),
                    raw_value: requirement.raw_value().to_owned(),
                });
            }
        }

        AuthorizationDecision::Allow
    }
}

impl std::fmt::Debug for PolicyEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.group());
        f.debug_struct("PolicyEvaluator")
            .field("handlers", &kinds)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use authn_state::Grants;
    use authz_policy_sdk::{DescriptorCompiler, Requirement};
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::config::HandlerMode;

    fn authenticated(scheme: &str, grants: Grants) -> AuthenticationState {
        AuthenticationState::builder()
            .identifier("user-1")
            .scheme(scheme)
            .token("tok")
            .grants(grants)
            .build()
    }

    fn descriptor_policy(name: &str) -> AuthorizationPolicy {
        AuthorizationPolicy::from_compiled(DescriptorCompiler::default().compile(name).unwrap())
    }

    fn enforcing() -> PolicyEvaluator {
        PolicyEvaluator::from_config(&AuthzPolicyConfig {
            handler_mode: HandlerMode::Enforce,
            ..AuthzPolicyConfig::default()
        })
    }

    struct Fixed(RequirementKind, HandlerOutcome);

    impl RequirementHandler for Fixed {
        fn kind(&self) -> RequirementKind {
            self.0
        }

        fn evaluate(&self, _: &Requirement, _: &AuthorizationContext<'_>) -> HandlerOutcome {
            self.1
        }
    }

    #[test]
    fn unauthenticated_caller_is_denied_before_requirements() {
        let evaluator = PolicyEvaluator::new();
        let policy = descriptor_policy("roles$admin");

        let decision = evaluator.evaluate(&policy, &AuthenticationState::new());

        assert_eq!(
            decision,
            AuthorizationDecision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn anonymous_policy_allows_unauthenticated_caller() {
        let decision = PolicyEvaluator::new()
            .evaluate(&AuthorizationPolicy::default(), &AuthenticationState::new());

        assert!(decision.is_allowed());
    }

    #[test]
    fn either_scheme_is_accepted() {
        let evaluator = PolicyEvaluator::from_config(&AuthzPolicyConfig::default());
        let policy = descriptor_policy("permissions$read");

        for scheme in ["JWT", "Bearer"] {
            let state = authenticated(scheme, Grants::new());
            assert!(evaluator.evaluate(&policy, &state).is_allowed(), "{scheme}");
        }
    }

    #[test]
    fn foreign_scheme_is_denied() {
        let evaluator = PolicyEvaluator::from_config(&AuthzPolicyConfig::default());
        let policy = descriptor_policy("permissions$read");

        let decision = evaluator.evaluate(&policy, &authenticated("Basic", Grants::new()));

        assert_eq!(
            decision,
            AuthorizationDecision::Deny(DenyReason::SchemeNotAccepted {
                scheme: "Basic".to_owned()
            })
        );
    }

    #[test]
    fn missing_handler_denies() {
        let evaluator = PolicyEvaluator::new()
            .with_handler(Arc::new(Fixed(RequirementKind::Roles, HandlerOutcome::Succeed)));
        let policy = descriptor_policy("roles$admin;scopes$api");

        let decision = evaluator.evaluate(&policy, &authenticated("JWT", Grants::new()));

        assert_eq!(
            decision,
            AuthorizationDecision::Deny(DenyReason::NoHandler {
                kind: RequirementKind::Scopes
            })
        );
    }

    #[test]
    fn continue_never_blocks() {
        let evaluator = PolicyEvaluator::new()
            .with_handler(Arc::new(Fixed(RequirementKind::Roles, HandlerOutcome::Continue)))
            .with_handler(Arc::new(Fixed(RequirementKind::Scopes, HandlerOutcome::Continue)));
        let policy = descriptor_policy("roles$admin;scopes$api");

        assert!(
            evaluator
                .evaluate(&policy, &authenticated("JWT", Grants::new()))
                .is_allowed()
        );
    }

    #[test]
    fn with_handler_replaces_previous_registration() {
        let evaluator = PolicyEvaluator::new()
            .with_handler(Arc::new(Fixed(RequirementKind::Roles, HandlerOutcome::Fail)))
            .with_handler(Arc::new(Fixed(RequirementKind::Roles, HandlerOutcome::Succeed)));
        let policy = descriptor_policy("roles$admin");

        assert!(
            evaluator
                .evaluate(&policy, &authenticated("JWT", Grants::new()))
                .is_allowed()
        );
    }

    #[test]
    fn enforce_requires_every_requirement() {
        let evaluator = enforcing();
        let policy = descriptor_policy("permissions$read:profile;roles$admin");
        let state = authenticated(
            "JWT",
            Grants::new().permissions(["read:profile"]).roles(["viewer"]),
        );

        assert_eq!(
            evaluator.evaluate(&policy, &state),
            AuthorizationDecision::Deny(DenyReason::RequirementFailed {
                kind: RequirementKind::Roles,
                raw_value: "admin".to_owned(),
            })
        );

        let state = authenticated(
            "Bearer",
            Grants::new().permissions(["read:profile"]).roles(["admin"]),
        );
        assert!(evaluator.evaluate(&policy, &state).is_allowed());
    }

    #[test]
    fn first_failure_wins() {
        let evaluator = PolicyEvaluator::new()
            .with_handler(Arc::new(Fixed(RequirementKind::Permissions, HandlerOutcome::Fail)))
            .with_handler(Arc::new(Fixed(RequirementKind::Roles, HandlerOutcome::Fail)));
        let shared = Uuid::new_v4();
        let policy = AuthorizationPolicy::builder()
            .requirement(Requirement::new(RequirementKind::Roles, "admin", shared))
            .requirement(Requirement::new(RequirementKind::Permissions, "read", shared))
            .build();

        assert_eq!(
            evaluator.evaluate(&policy, &AuthenticationState::new()),
            AuthorizationDecision::Deny(DenyReason::RequirementFailed {
                kind: RequirementKind::Roles,
                raw_value: "admin".to_owned(),
            })
        );
    }

    #[test]
    #[traced_test]
    fn denial_is_logged() {
        let evaluator = enforcing();
        let policy = descriptor_policy("scopes$api");

        let decision = evaluator.evaluate(&policy, &authenticated("JWT", Grants::new()));

        assert!(!decision.is_allowed());
        assert!(logs_contain("denied: requirement failed"));
    }
}
