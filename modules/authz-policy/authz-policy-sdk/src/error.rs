//! Negative outcome of descriptor compilation.

use thiserror::Error;

/// The policy name is not a descriptor.
///
/// This is an expected branch, not a failure: the provider hands the name to
/// the fallback provider. A malformed segment or an unknown group rejects the
/// whole descriptor, so no partial requirement list is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a policy descriptor: {reason}")]
pub struct NotADescriptor {
    reason: RejectReason,
}

impl NotADescriptor {
    #[must_use]
    pub fn reason(&self) -> &RejectReason {
        &self.reason
    }
}

impl From<RejectReason> for NotADescriptor {
    fn from(reason: RejectReason) -> Self {
        Self { reason }
    }
}

/// Why a name was rejected. Used for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("name is empty or whitespace")]
    Blank,

    #[error("name contains no segments")]
    NoSegments,

    /// The segment did not split into exactly one group and one value.
    #[error("segment '{segment}' is not of the form group$value")]
    MalformedSegment { segment: String },

    #[error("unknown requirement group '{group}'")]
    UnknownGroup { group: String },
}
