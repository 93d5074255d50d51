#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Policy SDK
//!
//! This crate provides the public API for the `authz_policy` module:
//!
//! - [`Requirement`], [`RequirementKind`] - Typed requirements compiled from a descriptor
//! - [`CompiledPolicy`], [`AuthorizationPolicy`] - Compilation output and the policy object
//! - [`descriptor`] - The policy descriptor grammar and [`DescriptorCompiler`]
//! - [`AuthorizationPolicyProvider`] - Provider trait shared by dynamic and fallback providers
//! - [`RequirementHandler`], [`AuthorizationContext`] - Per-kind evaluation seam
//! - [`NotADescriptor`] - Negative compilation outcome (caller falls back)
//!
//! ## Usage
//!
//! ```ignore
//! use authz_policy_sdk::descriptor::compile;
//!
//! match compile("permissions$read:profile;roles$admin") {
//!     Ok(compiled) => assert_eq!(compiled.requirements().len(), 2),
//!     Err(not_a_descriptor) => {
//!         // hand the name to the fallback provider
//!     }
//! }
//! ```

pub mod api;
pub mod descriptor;
pub mod error;
pub mod handler_api;
pub mod models;

// Re-export main types at crate root
pub use api::AuthorizationPolicyProvider;
pub use descriptor::{DescriptorCompiler, compile};
pub use error::{NotADescriptor, RejectReason};
pub use handler_api::{AuthorizationContext, RequirementHandler};
pub use models::{
    AuthorizationDecision, AuthorizationPolicy, AuthorizationPolicyBuilder, CompiledPolicy,
    DenyReason, HandlerOutcome, Requirement, RequirementKind,
};
