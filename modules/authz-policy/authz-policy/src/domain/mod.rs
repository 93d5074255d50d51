//! Domain layer for the `AuthZ` policy module.

pub mod evaluator;
pub mod handlers;
pub mod provider;

pub use evaluator::PolicyEvaluator;
pub use handlers::{PermissionsHandler, RolesHandler, ScopesHandler};
pub use provider::DynamicPolicyProvider;
