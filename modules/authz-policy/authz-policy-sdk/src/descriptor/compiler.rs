//! Descriptor compiler.
//!
//! Compiles a policy name into requirements plus the scheme constraint.
//!
//! ## Outcome matrix
//!
//! | input                                   | result |
//! |-----------------------------------------|--------|
//! | empty or whitespace-only                | `Blank` |
//! | only `;` separators                     | `NoSegments` |
//! | any segment not exactly `group$value`   | `MalformedSegment` |
//! | any segment with an unknown group       | `UnknownGroup` |
//! | otherwise                               | `CompiledPolicy` |
//!
//! Empty segments and empty `$`-parts are discarded before counting, so
//! `roles$$admin` compiles like `roles$admin`. A single bad segment rejects the
//! whole descriptor; the compiler never drops segments.

use authn_state::AuthenticationSchemes;
use tracing::debug;
use uuid::Uuid;

use super::{GROUP_DELIMITER, SEGMENT_DELIMITER};
use crate::error::{NotADescriptor, RejectReason};
use crate::models::{CompiledPolicy, Requirement, RequirementKind};

/// Compiles descriptors, attaching a fixed pair of authentication schemes.
///
/// Both schemes are always required, whatever the descriptor says.
#[derive(Debug, Clone, Default)]
pub struct DescriptorCompiler {
    schemes: AuthenticationSchemes,
}

impl DescriptorCompiler {
    #[must_use]
    pub fn new(schemes: AuthenticationSchemes) -> Self {
        Self { schemes }
    }

    #[must_use]
    pub fn schemes(&self) -> &AuthenticationSchemes {
        &self.schemes
    }

    /// Compile `name` into a [`CompiledPolicy`].
    ///
    /// A fresh correlation id is generated on every call, so compiling the
    /// same string twice yields requirements with different ids.
    ///
    /// # Errors
    ///
    /// [`NotADescriptor`] when `name` is blank or any segment is malformed;
    /// the caller falls back to its default policy system.
    pub fn compile(&self, name: &str) -> Result<CompiledPolicy, NotADescriptor> {
        self.try_compile(name).inspect_err(|not_a_descriptor| {
            debug!(reason = %not_a_descriptor.reason(), "not a policy descriptor");
        })
    }

    fn try_compile(&self, name: &str) -> Result<CompiledPolicy, NotADescriptor> {
        if name.trim().is_empty() {
            return Err(RejectReason::Blank.into());
        }

        let segments = name
            .split(SEGMENT_DELIMITER)
            .filter(|segment| !segment.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        if segments.is_empty() {
            return Err(RejectReason::NoSegments.into());
        }

        let correlation_id = Uuid::new_v4();
        let requirements = segments
            .into_iter()
            .map(|(kind, value)| Requirement::new(kind, value, correlation_id))
            .collect();

        Ok(CompiledPolicy::new(
            requirements,
            self.schemes.to_vec(),
            correlation_id,
        ))
    }
}

/// Compile with the default scheme labels.
///
/// # Errors
///
/// See [`DescriptorCompiler::compile`].
pub fn compile(name: &str) -> Result<CompiledPolicy, NotADescriptor> {
    DescriptorCompiler::default().compile(name)
}

fn parse_segment(segment: &str) -> Result<(RequirementKind, &str), NotADescriptor> {
    let parts: Vec<&str> = segment
        .split(GROUP_DELIMITER)
        .filter(|part| !part.is_empty())
        .collect();

    let &[group, value] = parts.as_slice() else {
        return Err(RejectReason::MalformedSegment {
            segment: segment.to_owned(),
        }
        .into());
    };

    let kind = RequirementKind::from_group(group).ok_or_else(|| RejectReason::UnknownGroup {
        group: group.to_owned(),
    })?;

    Ok((kind, value))
}
