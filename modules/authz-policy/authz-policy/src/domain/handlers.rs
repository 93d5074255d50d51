//! Requirement handlers, one per requirement kind.
//!
//! A requirement's raw value is a comma-separated list of entries. A blank
//! value or a blank entry is malformed and always yields
//! [`HandlerOutcome::Fail`].
//!
//! In [`HandlerMode::Passthrough`] a well-formed requirement yields
//! [`HandlerOutcome::Continue`] and never blocks the policy. In
//! [`HandlerMode::Enforce`] the requirement succeeds when ANY listed entry is
//! among the caller's grants of the same kind, and fails otherwise.

use authn_state::Grants;
use authz_policy_sdk::{
    AuthorizationContext, HandlerOutcome, Requirement, RequirementHandler, RequirementKind,
};

use crate::config::HandlerMode;

const ENTRY_DELIMITER: char = ',';

/// Split a raw value into trimmed entries. `None` if malformed.
fn requested_entries(raw_value: &str) -> Option<Vec<&str>> {
    if raw_value.trim().is_empty() {
        return None;
    }
    raw_value
        .split(ENTRY_DELIMITER)
        .map(str::trim)
        .map(|entry| (!entry.is_empty()).then_some(entry))
        .collect()
}

fn granted_for(grants: &Grants, kind: RequirementKind) -> &[String] {
    match kind {
        RequirementKind::Permissions => grants.granted_permissions(),
        RequirementKind::Roles => grants.granted_roles(),
        RequirementKind::Scopes => grants.granted_scopes(),
    }
}

fn evaluate_entries(
    mode: HandlerMode,
    requirement: &Requirement,
    ctx: &AuthorizationContext<'_>,
) -> HandlerOutcome {
    let Some(entries) = requested_entries(requirement.raw_value()) else {
        tracing::warn!(
            kind = %requirement.kind(),
            correlation_id = %requirement.correlation_id(),
            "malformed requirement value"
        );
        return HandlerOutcome::Fail;
    };

    match mode {
        HandlerMode::Passthrough => HandlerOutcome::Continue,
        HandlerMode::Enforce => {
            let granted = granted_for(ctx.state().grants(), requirement.kind());
            if entries.iter().any(|entry| granted.iter().any(|g| g == entry)) {
                HandlerOutcome::Succeed
            } else {
                tracing::debug!(
                    kind = %requirement.kind(),
                    correlation_id = %requirement.correlation_id(),
                    siblings = ctx.correlated(requirement).count(),
                    "requirement not granted"
                );
                HandlerOutcome::Fail
            }
        }
    }
}

/// Handler for `permissions$...` requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionsHandler {
    mode: HandlerMode,
}

impl PermissionsHandler {
    #[must_use]
    pub fn new(mode: HandlerMode) -> Self {
        Self { mode }
    }
}

impl RequirementHandler for PermissionsHandler {
    fn kind(&self) -> RequirementKind {
        RequirementKind::Permissions
    }

    fn evaluate(
        &self,
        requirement: &Requirement,
        ctx: &AuthorizationContext<'_>,
    ) -> HandlerOutcome {
        evaluate_entries(self.mode, requirement, ctx)
    }
}

/// Handler for `roles$...` requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolesHandler {
    mode: HandlerMode,
}

impl RolesHandler {
    #[must_use]
    pub fn new(mode: HandlerMode) -> Self {
        Self { mode }
    }
}

impl RequirementHandler for RolesHandler {
    fn kind(&self) -> RequirementKind {
        RequirementKind::Roles
    }

    fn evaluate(
        &self,
        requirement: &Requirement,
        ctx: &AuthorizationContext<'_>,
    ) -> HandlerOutcome {
        evaluate_entries(self.mode, requirement, ctx)
    }
}

/// Handler for `scopes$...` requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopesHandler {
    mode: HandlerMode,
}

impl ScopesHandler {
    #[must_use]
    pub fn new(mode: HandlerMode) -> Self {
        Self { mode }
    }
}

impl RequirementHandler for ScopesHandler {
    fn kind(&self) -> RequirementKind {
        RequirementKind::Scopes
    }

    fn evaluate(
        &self,
        requirement: &Requirement,
        ctx: &AuthorizationContext<'_>,
    ) -> HandlerOutcome {
        evaluate_entries(self.mode, requirement, ctx)
    }
}
