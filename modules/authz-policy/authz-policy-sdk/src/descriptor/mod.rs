//! Policy descriptor grammar.
//!
//! A descriptor is a policy name of the form
//!
//! ```text
//! descriptor = segment *( ";" segment )
//! segment    = group "$" value
//! group      = "permissions" / "roles" / "scopes"
//! ```
//!
//! `value` is opaque to the compiler and must not contain `;` or `$`.
//! Example: `permissions$read:profile;roles$admin`.
//!
//! - [`DescriptorCompiler`] - compiles a name into a [`CompiledPolicy`](crate::CompiledPolicy)
//! - [`compile`] - compiler with the default scheme labels
//! - [`GROUP_TABLE`] - the fixed group token → kind table

use crate::models::RequirementKind;

pub mod compiler;

pub use compiler::{DescriptorCompiler, compile};

/// Separates segments.
pub const SEGMENT_DELIMITER: char = ';';

/// Separates a segment's group from its value.
pub const GROUP_DELIMITER: char = '$';

/// Group token → requirement kind. Tokens are case-sensitive.
pub const GROUP_TABLE: &[(&str, RequirementKind)] = &[
    ("permissions", RequirementKind::Permissions),
    ("roles", RequirementKind::Roles),
    ("scopes", RequirementKind::Scopes),
];
