//! Requirement handler trait and the context it evaluates against.

use authn_state::AuthenticationState;

use crate::models::{HandlerOutcome, Requirement, RequirementKind};

/// Read-only view of one policy evaluation.
///
/// Gives handlers the caller's state and every requirement of the policy, so a
/// handler can find the requirements compiled alongside its own through the
/// shared correlation id.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationContext<'a> {
    state: &'a AuthenticationState,
    requirements: &'a [Requirement],
}

impl<'a> AuthorizationContext<'a> {
    #[must_use]
    pub fn new(state: &'a AuthenticationState, requirements: &'a [Requirement]) -> Self {
        Self {
            state,
            requirements,
        }
    }

    #[must_use]
    pub fn state(&self) -> &'a AuthenticationState {
        self.state
    }

    #[must_use]
    pub fn requirements(&self) -> &'a [Requirement] {
        self.requirements
    }

    /// Other requirements sharing `requirement`'s correlation id.
    pub fn correlated<'r>(
        &self,
        requirement: &'r Requirement,
    ) -> impl Iterator<Item = &'a Requirement> + use<'a, 'r> {
        let requirements = self.requirements;
        requirements.iter().filter(move |other| {
            other.correlation_id() == requirement.correlation_id()
                && !std::ptr::eq(*other, requirement)
        })
    }
}

/// Decides one requirement kind.
///
/// Handlers must not panic on a malformed `raw_value`; they return
/// [`HandlerOutcome::Fail`] instead.
pub trait RequirementHandler: Send + Sync {
    fn kind(&self) -> RequirementKind;

    fn evaluate(
        &self,
        requirement: &Requirement,
        ctx: &AuthorizationContext<'_>,
    ) -> HandlerOutcome;
}
