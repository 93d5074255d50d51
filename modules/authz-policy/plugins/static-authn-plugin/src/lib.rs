#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Plugin
//!
//! Maps tokens to identities from configuration and produces a populated
//! [`AuthenticationState`](authn_state::AuthenticationState).
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty token and returns the default identity.
//! - **`static_tokens`**: Maps specific tokens to specific identities. Useful for tests
//!   with distinct users.
//!
//! ## Configuration
//!
//! ```yaml
//! mode: static_tokens
//! default_identity:
//!   identifier: "default-user"
//!   scheme: "JWT"
//! tokens:
//!   - token: "token-admin"
//!     identity:
//!       identifier: "admin"
//!       scheme: "Bearer"
//!       grants:
//!         roles: ["admin"]
//! ```

pub mod config;
pub mod domain;

pub use config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig, TokenMapping};
pub use domain::Service;
