//! Descriptor-aware policy provider.

use std::sync::Arc;

use authn_state::AuthenticationSchemes;
use authz_policy_sdk::{AuthorizationPolicy, AuthorizationPolicyProvider, DescriptorCompiler};
use tracing::{debug, info};

use crate::config::{AuthzPolicyConfig, ConfigError};

/// Policy provider that compiles descriptor names and delegates everything
/// else to a fallback provider.
///
/// - blank name → fallback provider's `policy(name)` (never the default policy)
/// - name that is not a descriptor → fallback provider's `policy(name)`
/// - descriptor → policy requiring both schemes and every compiled requirement
///
/// The provider never fails: a name that does not compile is a normal branch.
/// Constructed once and shared; it holds no mutable state.
pub struct DynamicPolicyProvider {
    compiler: DescriptorCompiler,
    fallback: Arc<dyn AuthorizationPolicyProvider>,
}

impl DynamicPolicyProvider {
    /// `schemes` is taken as is. Use [`Self::from_config`] to get the labels
    /// validated (non-blank and distinct) first.
    #[must_use]
    pub fn new(
        fallback: Arc<dyn AuthorizationPolicyProvider>,
        schemes: AuthenticationSchemes,
    ) -> Self {
        info!(
            user_scheme = %schemes.user,
            client_scheme = %schemes.client,
            "Dynamic policy provider created"
        );
        Self {
            compiler: DescriptorCompiler::new(schemes),
            fallback,
        }
    }

    /// Validate `cfg` and build a provider with its scheme labels.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if a scheme label is blank or both labels are equal.
    pub fn from_config(
        cfg: &AuthzPolicyConfig,
        fallback: Arc<dyn AuthorizationPolicyProvider>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::new(fallback, cfg.schemes.clone()))
    }
}

impl AuthorizationPolicyProvider for DynamicPolicyProvider {
    fn default_policy(&self) -> AuthorizationPolicy {
        AuthorizationPolicy::builder()
            .authentication_schemes(self.compiler.schemes().names())
            .require_authenticated_user()
            .build()
    }

    fn policy(&self, name: &str) -> Option<AuthorizationPolicy> {
        if name.trim().is_empty() {
            debug!("blank policy name, delegating to fallback provider");
            return self.fallback.policy(name);
        }

        let Ok(compiled) = self.compiler.compile(name) else {
            return self.fallback.policy(name);
        };

        debug!(
            correlation_id = %compiled.correlation_id(),
            requirements = compiled.requirements().len(),
            "compiled policy descriptor"
        );
        Some(AuthorizationPolicy::from_compiled(compiled))
    }

    fn fallback_policy(&self) -> Option<AuthorizationPolicy> {
        self.fallback.fallback_policy()
    }
}

impl std::fmt::Debug for DynamicPolicyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicPolicyProvider")
            .field("compiler", &self.compiler)
            .finish_non_exhaustive()
    }
}
