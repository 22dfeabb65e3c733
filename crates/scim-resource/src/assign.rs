use crate::schema::{Attribute, AttributeType};
use crate::value::Value;

/// Decides whether a non-null value of one attribute type is "unassigned".
type UnassignedRule = fn(&Value) -> bool;

fn empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

fn never_empty(_: &Value) -> bool {
    false
}

fn empty_map(value: &Value) -> bool {
    matches!(value, Value::Complex(map) if map.is_empty())
}

fn empty_list(value: &Value) -> bool {
    matches!(value, Value::Multi(items) if items.is_empty())
}

fn unassigned_rule(attr_type: AttributeType) -> UnassignedRule {
    match attr_type {
        AttributeType::String
        | AttributeType::Reference
        | AttributeType::DateTime
        | AttributeType::Binary => empty_string,
        AttributeType::Integer | AttributeType::Decimal | AttributeType::Boolean => never_empty,
        AttributeType::Complex => empty_map,
    }
}

impl Attribute {
    /// `true` when `value` is absent, null, or the empty value of this
    /// attribute's type. A value of the wrong shape counts as assigned.
    pub fn is_unassigned(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return true;
        };
        if value.is_null() {
            return true;
        }
        if self.multi_valued {
            return empty_list(value);
        }
        unassigned_rule(self.attr_type)(value)
    }

    /// `true` when `value` is present and non-empty.
    pub fn is_value_assigned(&self, value: Option<&Value>) -> bool {
        !self.is_unassigned(value)
    }
}
