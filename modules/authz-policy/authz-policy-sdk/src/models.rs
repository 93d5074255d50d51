//! Domain models for the `AuthZ` policy module.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::{GROUP_DELIMITER, GROUP_TABLE, SEGMENT_DELIMITER};

/// Kind of a requirement. Each kind has exactly one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Permissions,
    Roles,
    Scopes,
}

impl RequirementKind {
    pub const ALL: [Self; 3] = [Self::Permissions, Self::Roles, Self::Scopes];

    /// Descriptor group token for this kind.
    #[must_use]
    pub fn group(self) -> &'static str {
        match self {
            Self::Permissions => "permissions",
            Self::Roles => "roles",
            Self::Scopes => "scopes",
        }
    }

    /// Look a group token up in [`GROUP_TABLE`]. Case-sensitive.
    #[must_use]
    pub fn from_group(token: &str) -> Option<Self> {
        GROUP_TABLE
            .iter()
            .find_map(|&(group, kind)| (group == token).then_some(kind))
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

/// One typed condition demanded by a policy.
///
/// `raw_value` is the unparsed payload from the descriptor (for example a
/// comma-joined list); the handler for `kind` interprets it. Every requirement
/// compiled from the same descriptor call carries the same `correlation_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    kind: RequirementKind,
    raw_value: String,
    correlation_id: Uuid,
}

impl Requirement {
    #[must_use]
    pub fn new(kind: RequirementKind, raw_value: impl Into<String>, correlation_id: Uuid) -> Self {
        Self {
            kind,
            raw_value: raw_value.into(),
            correlation_id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> RequirementKind {
        self.kind
    }

    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GROUP_DELIMITER}{}", self.kind, self.raw_value)
    }
}

/// Output of a successful descriptor compilation.
///
/// Correlation is per call: compiling the same string twice yields different
/// correlation ids, so callers must not rely on id stability across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPolicy {
    requirements: Vec<Requirement>,
    authentication_schemes: Vec<String>,
    correlation_id: Uuid,
}

impl CompiledPolicy {
    #[must_use]
    pub fn new(
        requirements: Vec<Requirement>,
        authentication_schemes: Vec<String>,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            requirements,
            authentication_schemes,
            correlation_id,
        }
    }

    /// Requirements in descriptor order.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    #[must_use]
    pub fn authentication_schemes(&self) -> &[String] {
        &self.authentication_schemes
    }

    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Render back to the canonical descriptor string.
    #[must_use]
    pub fn to_descriptor(&self) -> String {
        self.requirements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(SEGMENT_DELIMITER.to_string().as_str())
    }
}

/// Authorization policy handed to the evaluation pipeline.
///
/// Requires the caller to be authenticated through one of
/// `authentication_schemes` (when the list is non-empty) and every requirement
/// to pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationPolicy {
    authentication_schemes: Vec<String>,
    require_authenticated_user: bool,
    requirements: Vec<Requirement>,
}

impl AuthorizationPolicy {
    #[must_use]
    pub fn builder() -> AuthorizationPolicyBuilder {
        AuthorizationPolicyBuilder::default()
    }

    /// Policy demanding the compiled schemes and requirements from an
    /// authenticated caller.
    #[must_use]
    pub fn from_compiled(compiled: CompiledPolicy) -> Self {
        Self {
            authentication_schemes: compiled.authentication_schemes,
            require_authenticated_user: true,
            requirements: compiled.requirements,
        }
    }

    #[must_use]
    pub fn authentication_schemes(&self) -> &[String] {
        &self.authentication_schemes
    }

    #[must_use]
    pub fn requires_authenticated_user(&self) -> bool {
        self.require_authenticated_user
    }

    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    #[must_use]
    pub fn accepts_scheme(&self, scheme: &str) -> bool {
        self.authentication_schemes.is_empty()
            || self.authentication_schemes.iter().any(|s| s == scheme)
    }
}

#[derive(Default)]
pub struct AuthorizationPolicyBuilder {
    authentication_schemes: Vec<String>,
    require_authenticated_user: bool,
    requirements: Vec<Requirement>,
}

impl AuthorizationPolicyBuilder {
    #[must_use]
    pub fn authentication_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authentication_schemes
            .extend(schemes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn require_authenticated_user(mut self) -> Self {
        self.require_authenticated_user = true;
        self
    }

    #[must_use]
    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    #[must_use]
    pub fn requirements(mut self, requirements: impl IntoIterator<Item = Requirement>) -> Self {
        self.requirements.extend(requirements);
        self
    }

    #[must_use]
    pub fn build(self) -> AuthorizationPolicy {
        AuthorizationPolicy {
            authentication_schemes: self.authentication_schemes,
            require_authenticated_user: self.require_authenticated_user,
            requirements: self.requirements,
        }
    }
}

/// Result of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The requirement is satisfied.
    Succeed,
    /// The requirement is not satisfied; the policy is denied.
    Fail,
    /// The handler makes no decision.
    Continue,
}

/// Reason for a denied policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The policy needs an authenticated caller and the state is not.
    Unauthenticated,
    /// The caller authenticated through a scheme the policy does not accept.
    SchemeNotAccepted { scheme: String },
    /// No handler is registered for a requirement kind.
    NoHandler { kind: RequirementKind },
    /// A handler returned [`HandlerOutcome::Fail`].
    RequirementFailed {
        kind: RequirementKind,
        raw_value: String,
    },
}

/// Allow/deny decision. Response formatting is the transport's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    Deny(DenyReason),
}

impl AuthorizationDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}
