use std::borrow::Cow;

use crate::value::{Map, Value, lookup};

/// Common `meta` attribute of a resource.
///
/// Members are kept as given, including extension members and values of
/// unexpected types; the accessors read the standard string members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meta {
    members: Map,
}

impl Meta {
    pub fn new(members: Map) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &Map {
        &self.members
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.members.insert(name.into(), value.into());
    }

    fn text(&self, name: &str) -> Option<&str> {
        lookup(&self.members, name).and_then(Value::as_str)
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.text("resourceType")
    }

    pub fn created(&self) -> Option<&str> {
        self.text("created")
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.text("lastModified")
    }

    pub fn location(&self) -> Option<&str> {
        self.text("location")
    }

    pub fn version(&self) -> Option<&str> {
        self.text("version")
    }

    pub fn to_value(&self) -> Value {
        Value::Complex(self.members.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

/// A SCIM resource: the common attributes held explicitly, everything else in
/// a loosely-typed attribute map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub schemas: Vec<String>,
    pub id: Option<String>,
    pub external_id: Option<String>,
    pub meta: Option<Meta>,
    pub attributes: Map,
}

impl Resource {
    pub fn new<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemas: schemas.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Build a resource from a decoded JSON object. Common attributes are
    /// lifted out only when they have the expected JSON type; otherwise they
    /// stay in the attribute map.
    pub fn from_map(mut data: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut resource = Resource::new(Vec::<String>::new());

        if let Some(serde_json::Value::Array(items)) = data.get("schemas") {
            if items.iter().all(serde_json::Value::is_string) {
                resource.schemas = items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect();
                data.remove("schemas");
            }
        }
        if let Some(id) = data.get("id").and_then(|v| v.as_str()) {
            resource.id = Some(id.to_string());
            data.remove("id");
        }
        if let Some(external_id) = data.get("externalId").and_then(|v| v.as_str()) {
            resource.external_id = Some(external_id.to_string());
            data.remove("externalId");
        }
        if matches!(data.get("meta"), Some(serde_json::Value::Object(_))) {
            if let Some(Value::Complex(members)) = data.remove("meta").map(Value::from) {
                resource.meta = Some(Meta::new(members));
            }
        }

        resource.attributes = data.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        resource
    }

    pub fn from_json(json: serde_json::Value) -> Result<Self, ResourceError> {
        match json {
            serde_json::Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(ResourceError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Case-insensitive lookup covering both the common attributes and the
    /// attribute map.
    pub fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        let common = if name.eq_ignore_ascii_case("schemas") {
            (!self.schemas.is_empty()).then(|| {
                Value::Multi(self.schemas.iter().map(|s| Value::from(s.as_str())).collect())
            })
        } else if name.eq_ignore_ascii_case("id") {
            self.id.as_deref().map(Value::from)
        } else if name.eq_ignore_ascii_case("externalId") {
            self.external_id.as_deref().map(Value::from)
        } else if name.eq_ignore_ascii_case("meta") {
            self.meta.as_ref().map(Meta::to_value)
        } else {
            None
        };
        match common {
            Some(value) => Some(Cow::Owned(value)),
            None => lookup(&self.attributes, name).map(Cow::Borrowed),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        out.insert("schemas".into(), serde_json::json!(self.schemas));
        if let Some(id) = &self.id {
            out.insert("id".into(), id.as_str().into());
        }
        if let Some(external_id) = &self.external_id {
            out.insert("externalId".into(), external_id.as_str().into());
        }
        if let Some(meta) = &self.meta {
            out.insert("meta".into(), serde_json::Value::from(&meta.to_value()));
        }
        for (k, v) in &self.attributes {
            out.insert(k.clone(), serde_json::Value::from(v));
        }
        serde_json::Value::Object(out)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
