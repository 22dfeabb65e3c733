use scim_lang::{PathSegment, PathSegments};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Attribute characteristics
// ---------------------------------------------------------------------------

/// Declared data type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    #[default]
    String,
    Boolean,
    Integer,
    Decimal,
    DateTime,
    Binary,
    Reference,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    #[default]
    ReadWrite,
    ReadOnly,
    Immutable,
    WriteOnly,
}

impl Mutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadWrite => "readWrite",
            Self::ReadOnly => "readOnly",
            Self::Immutable => "immutable",
            Self::WriteOnly => "writeOnly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    Always,
    Never,
    #[default]
    Default,
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    #[default]
    None,
    Server,
    Global,
}

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// Schema descriptor of one attribute, owning its sub-attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub sub_attributes: Vec<Attribute>,
    pub multi_valued: bool,
    pub description: String,
    pub required: bool,
    pub canonical_values: Vec<String>,
    pub case_exact: bool,
    pub mutability: Mutability,
    pub returned: Returned,
    pub uniqueness: Uniqueness,
    pub reference_types: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            ..Self::default()
        }
    }

    pub fn complex(name: impl Into<String>, sub_attributes: Vec<Attribute>) -> Self {
        Self {
            sub_attributes,
            ..Self::new(name, AttributeType::Complex)
        }
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_complex(&self) -> bool {
        self.attr_type == AttributeType::Complex
    }

    /// Case-insensitive sub-attribute lookup.
    pub fn sub_attribute(&self, name: &str) -> Option<&Attribute> {
        self.sub_attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A resource schema: an identifying URN and its ordered top-level attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaLookupError {
    #[error("empty attribute path")]
    EmptyPath,
    #[error("unknown attribute {path:?}")]
    UnknownAttribute { path: String },
    #[error("attribute {path:?} has no sub-attributes")]
    NotComplex { path: String },
    #[error("filter applied to singular attribute {path:?}")]
    FilterOnSingular { path: String },
}

impl Schema {
    pub fn new(id: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            id: id.into(),
            attributes,
            ..Self::default()
        }
    }

    /// Case-insensitive top-level attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Walk a tokenized path to the attribute descriptor it addresses.
    ///
    /// Filter segments must follow a multi-valued attribute and do not move
    /// the cursor; they only scope which elements the next segment sees.
    pub fn resolve_path(&self, path: &PathSegments) -> Result<&Attribute, SchemaLookupError> {
        let mut current: Option<&Attribute> = None;
        let mut walked = String::new();

        for segment in path.iter() {
            match segment {
                PathSegment::Attribute(name) => {
                    let next = match current {
                        None => self.attribute(name),
                        Some(attr) if attr.is_complex() => attr.sub_attribute(name),
                        Some(_) => {
                            return Err(SchemaLookupError::NotComplex { path: walked });
                        }
                    };
                    if !walked.is_empty() {
                        walked.push('.');
                    }
                    walked.push_str(name);
                    current = Some(next.ok_or_else(|| SchemaLookupError::UnknownAttribute {
                        path: walked.clone(),
                    })?);
                }
                PathSegment::Filter(_) => match current {
                    Some(attr) if attr.multi_valued => {}
                    _ => return Err(SchemaLookupError::FilterOnSingular { path: walked }),
                },
            }
        }

        current.ok_or(SchemaLookupError::EmptyPath)
    }
}
