//! Service implementation for the static policy plugin.

use std::collections::HashMap;

use authn_state::AuthenticationSchemes;
use authz_policy_sdk::{AuthorizationPolicy, Requirement, RequirementKind};
use tracing::info;
use uuid::Uuid;

use crate::config::{NamedPolicyConfig, StaticPolicyPluginConfig};

const ENTRY_DELIMITER: &str = ",";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PluginConfigError {
    #[error("policy name must not be blank")]
    BlankName,

    #[error("policy '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("fallback policy '{0}' is not declared")]
    UnknownFallback(String),

    #[error("policy '{policy}' has a blank {kind} entry or one containing ','")]
    MalformedEntry { policy: String, kind: RequirementKind },
}

/// Static policy service.
///
/// Policies are built once at construction. Requirements of one named policy
/// share a correlation id.
#[derive(Debug)]
pub struct Service {
    schemes: AuthenticationSchemes,
    policies: HashMap<String, AuthorizationPolicy>,
    fallback: Option<AuthorizationPolicy>,
}

impl Service {
    /// Create a service from plugin configuration.
    ///
    /// # Errors
    ///
    /// [`PluginConfigError`] if a name is blank or duplicated, if a
    /// permission, role or scope entry is blank or contains `,`, or if
    /// `fallback_policy` names an undeclared policy.
    pub fn from_config(cfg: &StaticPolicyPluginConfig) -> Result<Self, PluginConfigError> {
        let mut policies = HashMap::with_capacity(cfg.policies.len());
        for named in &cfg.policies {
            if named.name.trim().is_empty() {
                return Err(PluginConfigError::BlankName);
            }
            if policies.contains_key(&named.name) {
                return Err(PluginConfigError::DuplicateName(named.name.clone()));
            }
            check_entries(named)?;
            policies.insert(named.name.clone(), build_policy(named, &cfg.schemes));
        }

        let fallback = cfg
            .fallback_policy
            .as_ref()
            .map(|name| {
                policies
                    .get(name)
                    .cloned()
                    .ok_or_else(|| PluginConfigError::UnknownFallback(name.clone()))
            })
            .transpose()?;

        info!(
            policies = policies.len(),
            fallback = cfg.fallback_policy.as_deref(),
            "Static policy plugin created"
        );

        Ok(Self {
            schemes: cfg.schemes.clone(),
            policies,
            fallback,
        })
    }

    /// Policy requiring an authenticated caller through either configured scheme.
    #[must_use]
    pub fn default_policy(&self) -> AuthorizationPolicy {
        AuthorizationPolicy::builder()
            .authentication_schemes(self.schemes.names())
            .require_authenticated_user()
            .build()
    }

    /// Named policy lookup. Case-sensitive.
    #[must_use]
    pub fn policy(&self, name: &str) -> Option<AuthorizationPolicy> {
        self.policies.get(name).cloned()
    }

    #[must_use]
    pub fn fallback_policy(&self) -> Option<AuthorizationPolicy> {
        self.fallback.clone()
    }
}

fn entry_lists(named: &NamedPolicyConfig) -> [(RequirementKind, &Vec<String>); 3] {
    [
        (RequirementKind::Permissions, &named.permissions),
        (RequirementKind::Roles, &named.roles),
        (RequirementKind::Scopes, &named.scopes),
    ]
}

/// Entries are joined into one comma-separated value, so each must be a
/// single non-blank item.
fn check_entries(named: &NamedPolicyConfig) -> Result<(), PluginConfigError> {
    for (kind, entries) in entry_lists(named) {
        if entries
            .iter()
            .any(|entry| entry.trim().is_empty() || entry.contains(ENTRY_DELIMITER))
        {
            return Err(PluginConfigError::MalformedEntry {
                policy: named.name.clone(),
                kind,
            });
        }
    }
    Ok(())
}

fn build_policy(named: &NamedPolicyConfig, schemes: &AuthenticationSchemes) -> AuthorizationPolicy {
    let correlation_id = Uuid::new_v4();
    let requirements = entry_lists(named)
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(kind, entries)| {
            Requirement::new(kind, entries.join(ENTRY_DELIMITER), correlation_id)
        });

    let mut builder = if named.schemes.is_empty() {
        AuthorizationPolicy::builder().authentication_schemes(schemes.names())
    } else {
        AuthorizationPolicy::builder().authentication_schemes(named.schemes.iter().cloned())
    };
    if named.require_authenticated_user {
        builder = builder.require_authenticated_user();
    }
    builder.requirements(requirements).build()
}
