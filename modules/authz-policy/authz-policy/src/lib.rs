//! `AuthZ` Policy Module
//!
//! Resolves policy names that encode their own requirements
//! (`permissions$read:profile;roles$admin`) and falls back to a conventional
//! provider for every other name. Evaluates the resulting policies against a
//! request's [`AuthenticationState`](authn_state::AuthenticationState).
//!
//! ## Configuration
//!
//! ```yaml
//! schemes:
//!   user: "JWT"
//!   client: "Bearer"
//! handler_mode: passthrough
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{AuthzPolicyConfig, ConfigError, HandlerMode};
pub use domain::{
    DynamicPolicyProvider, PermissionsHandler, PolicyEvaluator, RolesHandler, ScopesHandler,
};
