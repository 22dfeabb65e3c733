use serde::Deserialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Page size used when a query does not carry `count`.
    pub items_per_page: usize,
    /// Glob patterns (e.g. `schemas/*.json`) of schema documents loaded at
    /// startup. A pattern without glob characters names a single file.
    /// Relative patterns are resolved against the config file's directory.
    pub schemas: Vec<String>,
    pub internal_schema_id: InternalSchemaId,
    pub url_param: UrlParamNames,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            schemas: Vec::new(),
            internal_schema_id: InternalSchemaId::default(),
            url_param: UrlParamNames::default(),
        }
    }
}

/// Ids of the schemas the request parsers resolve from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InternalSchemaId {
    pub user: String,
    pub group: String,
    pub root: String,
}

impl Default for InternalSchemaId {
    fn default() -> Self {
        Self {
            user: "urn:ietf:params:scim:schemas:core:2.0:User".to_string(),
            group: "urn:ietf:params:scim:schemas:core:2.0:Group".to_string(),
            root: "urn:ietf:params:scim:schemas:core:2.0:Root".to_string(),
        }
    }
}

/// Names of the URL parameters carrying resource ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrlParamNames {
    pub user_id: String,
    pub group_id: String,
}

impl Default for UrlParamNames {
    fn default() -> Self {
        Self {
            user_id: "userId".to_string(),
            group_id: "groupId".to_string(),
        }
    }
}
