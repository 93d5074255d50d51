//! Configuration for the static policy plugin.

use authn_state::AuthenticationSchemes;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticPolicyPluginConfig {
    /// Schemes used by the default policy and by named policies that list none.
    pub schemes: AuthenticationSchemes,

    /// Named policies served by `policy(name)`.
    pub policies: Vec<NamedPolicyConfig>,

    /// Name of the policy returned by `fallback_policy()`. None if unset.
    pub fallback_policy: Option<String>,
}

/// A single named policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamedPolicyConfig {
    pub name: String,

    pub require_authenticated_user: bool,

    /// Accepted schemes. Empty means both configured schemes.
    pub schemes: Vec<String>,

    /// Each non-empty list becomes one requirement; any listed entry satisfies it.
    pub permissions: Vec<String>,
    pub roles: Vec<String>,
    pub scopes: Vec<String>,
}

impl Default for NamedPolicyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            require_authenticated_user: true,
            schemes: Vec::new(),
            permissions: Vec::new(),
            roles: Vec::new(),
            scopes: Vec::new(),
        }
    }
}
