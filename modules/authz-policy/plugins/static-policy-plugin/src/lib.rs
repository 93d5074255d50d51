#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Policy Plugin
//!
//! Conventional [`AuthorizationPolicyProvider`](authz_policy_sdk::AuthorizationPolicyProvider)
//! serving named policies declared in configuration. Used as the fallback
//! behind the dynamic descriptor provider.
//!
//! ## Configuration
//!
//! ```yaml
//! schemes:
//!   user: "JWT"
//!   client: "Bearer"
//! policies:
//!   - name: "AdminOnly"
//!     roles: ["admin"]
//!   - name: "Public"
//!     require_authenticated_user: false
//! fallback_policy: "Public"
//! ```

pub mod config;
pub mod domain;

pub use config::{NamedPolicyConfig, StaticPolicyPluginConfig};
pub use domain::{PluginConfigError, Service};
