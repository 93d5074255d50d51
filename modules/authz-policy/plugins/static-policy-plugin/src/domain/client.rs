//! [`AuthorizationPolicyProvider`] implementation for the static policy plugin.

use authz_policy_sdk::{AuthorizationPolicy, AuthorizationPolicyProvider};

use super::service::Service;

impl AuthorizationPolicyProvider for Service {
    fn default_policy(&self) -> AuthorizationPolicy {
        Service::default_policy(self)
    }

    fn policy(&self, name: &str) -> Option<AuthorizationPolicy> {
        Service::policy(self, name)
    }

    fn fallback_policy(&self) -> Option<AuthorizationPolicy> {
        Service::fallback_policy(self)
    }
}
