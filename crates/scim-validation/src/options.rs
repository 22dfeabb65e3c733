use serde::Deserialize;

/// Switches for the mutability check. Both default to `false`, the strictest
/// setting for immutable attributes and the most lenient for readOnly ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// An immutable attribute left unassigned by the candidate is accepted
    /// even when the reference has a value.
    pub unassigned_immutable_is_ignored: bool,
    /// A readOnly attribute must be echoed back by the candidate; omitting a
    /// value the reference has is a violation.
    pub read_only_is_mandatory: bool,
}
