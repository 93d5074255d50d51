//! Policy provider trait.

use crate::models::AuthorizationPolicy;

/// Resolves policy names to authorization policies.
///
/// Implemented by the dynamic descriptor provider and by the fallback
/// provider it delegates to. Providers are constructed once and shared across
/// concurrent requests (`Arc<dyn AuthorizationPolicyProvider>`), so they must
/// not mutate after construction.
///
/// ```ignore
/// let policy = provider
///     .policy("permissions$read:profile;roles$admin")
///     .unwrap_or_else(|| provider.default_policy());
/// ```
pub trait AuthorizationPolicyProvider: Send + Sync {
    /// Policy used when no named policy is requested.
    fn default_policy(&self) -> AuthorizationPolicy;

    /// Resolve a named policy. `None` means the provider does not know the name.
    fn policy(&self, name: &str) -> Option<AuthorizationPolicy>;

    /// Policy applied to endpoints that declare no policy at all.
    fn fallback_policy(&self) -> Option<AuthorizationPolicy>;
}
