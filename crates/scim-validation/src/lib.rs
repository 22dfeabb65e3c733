mod common;
mod mutability;
mod options;
mod violation;

pub use common::common_attributes;
pub use mutability::MutabilityValidator;
pub use options::ValidationOptions;
pub use violation::{MutabilityViolation, ViolationReason};
