use log::{debug, trace};
use scim_resource::value::lookup;
use scim_resource::{Attribute, Map, Mutability, Resource, Schema, Value};

use crate::common::undeclared_common_attributes;
use crate::options::ValidationOptions;
use crate::violation::{MutabilityViolation, ViolationReason};


/// Compares a candidate resource against the stored reference under each
/// attribute's declared mutability.
///
/// Stateless; one instance can serve any number of concurrent validations.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutabilityValidator;

impl MutabilityValidator {
    pub fn new() -> Self {
        Self
    }

    /// Walk `schema` depth-first in declaration order and return the first
    /// violation found.
    ///
    /// Common attributes (`id`, `externalId`, `meta`) the schema does not
    /// declare are checked first with their standard characteristics.
    pub fn validate(
        &self,
        candidate: &Resource,
        reference: &Resource,
        schema: &Schema,
        options: &ValidationOptions,
    ) -> Result<(), MutabilityViolation> {
        let walk = Walk { options };
        let implicit = undeclared_common_attributes(schema);

        for attr in implicit.iter().chain(&schema.attributes) {
            let cand = candidate.get(&attr.name);
            let refv = reference.get(&attr.name);
            walk.attribute(attr, cand.as_deref(), refv.as_deref(), &attr.name, None)
                .inspect_err(|v| debug!("mutability violation in schema {}: {v}", schema.id))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

struct Walk<'o> {
    options: &'o ValidationOptions,
}

impl Walk<'_> {
    fn attribute(
        &self,
        attr: &Attribute,
        candidate: Option<&Value>,
        reference: Option<&Value>,
        path: &str,
        index: Option<usize>,
    ) -> Result<(), MutabilityViolation> {
        trace!("checking {path} ({})", attr.mutability.as_str());
        self.check_rule(attr, candidate, reference, path, index)?;

        // A readOnly value was compared as a whole; its subtree has nothing
        // left to report.
        if attr.mutability == Mutability::ReadOnly || !attr.is_complex() {
            return Ok(());
        }

        if attr.multi_valued {
            let cands = candidate.and_then(Value::as_multi).unwrap_or_default();
            let refs = reference.and_then(Value::as_multi).unwrap_or_default();
            let mut claimed = vec![false; refs.len()];

            // Unchanged elements are claimed first so a modified element can
            // never take the reference of one that only moved.
            let unchanged: Vec<bool> = cands
                .iter()
                .map(|c| claim(refs, &mut claimed, |r| c.equivalent(r)).is_some())
                .collect();

            for (i, c) in cands.iter().enumerate() {
                if unchanged[i] {
                    continue;
                }
                let r = pair_element(attr, c, refs, &mut claimed);
                self.sub_attributes(
                    attr,
                    c.as_complex(),
                    r.and_then(Value::as_complex),
                    path,
                    Some(i),
                )?;
            }
            Ok(())
        } else {
            self.sub_attributes(
                attr,
                candidate.and_then(Value::as_complex),
                reference.and_then(Value::as_complex),
                path,
                index,
            )
        }
    }

    fn sub_attributes(
        &self,
        attr: &Attribute,
        candidate: Option<&Map>,
        reference: Option<&Map>,
        path: &str,
        index: Option<usize>,
    ) -> Result<(), MutabilityViolation> {
        for sub in &attr.sub_attributes {
            let cand = candidate.and_then(|m| lookup(m, &sub.name));
            let refv = reference.and_then(|m| lookup(m, &sub.name));
            let sub_path = format!("{path}.{}", sub.name);
            self.attribute(sub, cand, refv, &sub_path, index)?;
        }
        Ok(())
    }

    fn check_rule(
        &self,
        attr: &Attribute,
        candidate: Option<&Value>,
        reference: Option<&Value>,
        path: &str,
        index: Option<usize>,
    ) -> Result<(), MutabilityViolation> {
        let cand_assigned = attr.is_value_assigned(candidate);
        let ref_assigned = attr.is_value_assigned(reference);

        let reason = match attr.mutability {
            Mutability::ReadOnly => {
                if cand_assigned {
                    (!ref_assigned || differs(candidate, reference))
                        .then_some(ViolationReason::Changed)
                } else {
                    (ref_assigned && self.options.read_only_is_mandatory)
                        .then_some(ViolationReason::Removed)
                }
            }
            Mutability::Immutable if ref_assigned => {
                if cand_assigned {
                    differs(candidate, reference).then_some(ViolationReason::Changed)
                } else {
                    (!self.options.unassigned_immutable_is_ignored)
                        .then_some(ViolationReason::Removed)
                }
            }
            Mutability::Immutable | Mutability::ReadWrite | Mutability::WriteOnly => None,
        };

        match reason {
            Some(reason) => Err(MutabilityViolation {
                path: path.to_string(),
                mutability: attr.mutability,
                reason,
                index,
            }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Element pairing
// ---------------------------------------------------------------------------

fn differs(candidate: Option<&Value>, reference: Option<&Value>) -> bool {
    match (candidate, reference) {
        (Some(c), Some(r)) => !c.equivalent(r),
        (None, None) => false,
        _ => true,
    }
}

fn member<'v>(element: &'v Value, name: &str) -> Option<&'v Value> {
    element.as_complex().and_then(|m| lookup(m, name))
}

/// Take the first unclaimed reference element accepted by `matches`.
fn claim<'v>(
    refs: &'v [Value],
    claimed: &mut [bool],
    matches: impl Fn(&Value) -> bool,
) -> Option<&'v Value> {
    let i = refs
        .iter()
        .enumerate()
        .position(|(i, r)| !claimed[i] && matches(r))?;
    claimed[i] = true;
    Some(&refs[i])
}

/// Reference element a modified candidate element stands for, or `None` when
/// the element is new.
///
/// Elements pair on an equal `value` sub-attribute; failing that, on
/// agreeing with every readOnly or immutable sub-value the candidate supplies.
fn pair_element<'v>(
    attr: &Attribute,
    element: &Value,
    refs: &'v [Value],
    claimed: &mut [bool],
) -> Option<&'v Value> {
    if let Some(key) = attr.sub_attribute("value") {
        let value = member(element, &key.name);
        if let Some(value) = value.filter(|_| key.is_value_assigned(value)) {
            if let Some(r) = claim(refs, claimed, |r| {
                member(r, &key.name).is_some_and(|rv| rv.equivalent(value))
            }) {
                return Some(r);
            }
        }
    }

    let protected: Vec<(&str, &Value)> = attr
        .sub_attributes
        .iter()
        .filter(|sub| matches!(sub.mutability, Mutability::ReadOnly | Mutability::Immutable))
        .filter_map(|sub| {
            let value = member(element, &sub.name);
            sub.is_value_assigned(value)
                .then_some(value)
                .flatten()
                .map(|v| (sub.name.as_str(), v))
        })
        .collect();
    if protected.is_empty() {
        return None;
    }
    claim(refs, claimed, |r| {
        protected
            .iter()
            .all(|(name, value)| member(r, name).is_some_and(|rv| rv.equivalent(value)))
    })
}
