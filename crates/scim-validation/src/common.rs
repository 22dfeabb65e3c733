use scim_resource::{Attribute, AttributeType, Mutability, Returned, Schema, Uniqueness};

/// Descriptors for the common attributes every resource carries, used when a
/// schema does not declare them itself.
pub fn common_attributes() -> [Attribute; 3] {
    let read_only = |name: &str, attr_type| {
        Attribute::new(name, attr_type).with_mutability(Mutability::ReadOnly)
    };

    let mut id = Attribute::new("id", AttributeType::String).with_mutability(Mutability::Immutable);
    id.case_exact = true;
    id.returned = Returned::Always;
    id.uniqueness = Uniqueness::Server;

    let mut external_id = Attribute::new("externalId", AttributeType::String);
    external_id.case_exact = true;

    let meta = Attribute::complex(
        "meta",
        vec![
            read_only("resourceType", AttributeType::String),
            read_only("created", AttributeType::DateTime),
            read_only("lastModified", AttributeType::DateTime),
            read_only("location", AttributeType::Reference),
            read_only("version", AttributeType::String),
        ],
    )
    .with_mutability(Mutability::ReadOnly);

    [id, external_id, meta]
}

/// Common attributes `schema` leaves undeclared, in canonical order.
pub(crate) fn undeclared_common_attributes(schema: &Schema) -> Vec<Attribute> {
    common_attributes()
        .into_iter()
        .filter(|attr| schema.attribute(&attr.name).is_none())
        .collect()
}
