use std::fmt;

use scim_resource::Mutability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// The candidate carries a value different from the reference.
    Changed,
    /// The candidate dropped a value the reference has.
    Removed,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed => write!(f, "modified"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// First attribute whose declared mutability the candidate breaks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} attribute '{path}' was {reason}", .mutability.as_str())]
pub struct MutabilityViolation {
    /// Dotted path using the schema's attribute names, e.g. `name.givenName`.
    pub path: String,
    pub mutability: Mutability,
    pub reason: ViolationReason,
    /// Element position when the attribute sits inside a multi-valued one.
    pub index: Option<usize>,
}
