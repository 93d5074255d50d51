#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Request-scoped authentication state.
//!
//! - [`AuthenticationState`] - who is calling and through which scheme
//! - [`UserPrincipal`], [`ClientPrincipal`] - typed views resolved through repositories
//! - [`Authenticator`] - trait for collaborators that populate the state
//! - [`AuthenticationError`] - unresolved field or entity

pub mod authenticator;
pub mod error;
pub mod principal;
pub mod schemes;
pub mod state;

pub use authenticator::Authenticator;
pub use error::AuthenticationError;
pub use principal::{ClientPrincipal, ClientRepository, RepositoryError, UserPrincipal, UserRepository};
pub use schemes::{AuthenticationSchemes, CLIENT_SCHEME, USER_SCHEME};
pub use state::{AuthenticationState, AuthenticationStateBuilder, Grants};
