use std::path::Path;
use std::sync::Arc;

use scim_config::{InternalSchemaId, LimitsConfig, ScimConfig, ServiceConfig, UrlParamNames};
use scim_lang::ast::Expr;
use scim_lang::{PathSegments, Token};
use scim_resource::{
    Attribute, InMemorySchemaRepository, Resource, Schema, SchemaRepository, ScimReason,
    ScimResult,
};
use scim_validation::{MutabilityValidator, ValidationOptions};

use crate::error::{IntoScimError, scim_error};

/// Resource families served by the parameter parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Group,
    Root,
}

impl ResourceKind {
    pub fn schema_id(self, ids: &InternalSchemaId) -> &str {
        match self {
            Self::User => &ids.user,
            Self::Group => &ids.group,
            Self::Root => &ids.root,
        }
    }

    /// URL parameter naming a single resource; the root endpoint has none.
    pub fn id_param(self, names: &UrlParamNames) -> Option<&str> {
        match self {
            Self::User => Some(&names.user_id),
            Self::Group => Some(&names.group_id),
            Self::Root => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ScimEngine
// ---------------------------------------------------------------------------

/// Entry point for request handlers: path and filter compilation, schema
/// lookup and mutability checks, with configured limits applied up front.
///
/// Holds no per-request state and can be shared across threads.
pub struct ScimEngine {
    schemas: Arc<dyn SchemaRepository>,
    service: ServiceConfig,
    limits: LimitsConfig,
    options: ValidationOptions,
    validator: MutabilityValidator,
}

impl ScimEngine {
    pub fn new(config: &ScimConfig, schemas: Arc<dyn SchemaRepository>) -> Self {
        Self {
            schemas,
            service: config.service.clone(),
            limits: config.limits,
            options: config.validation,
            validator: MutabilityValidator::new(),
        }
    }

    /// Build an engine backed by the schemas matching `service.schemas`.
    ///
    /// `base_dir` anchors relative patterns, normally the config file's
    /// directory.
    pub fn bootstrap(config: &ScimConfig, base_dir: &Path) -> anyhow::Result<Self> {
        let mut repo = InMemorySchemaRepository::new();
        let patterns = config.schema_patterns(base_dir);
        if patterns.is_empty() {
            scim_warn!(conf, "no schema patterns configured, schema repository is empty");
        }
        for pattern in &patterns {
            let loaded = repo
                .load_glob(pattern)
                .map_err(|e| anyhow::anyhow!("failed to load schemas: {e}"))?;
            scim_info!(conf, pattern = %pattern, schemas = loaded, "schemas loaded");
        }
        Ok(Self::new(config, Arc::new(repo)))
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    // -- paths and filters ---------------------------------------------------

    pub fn tokenize_path(&self, path: &str) -> ScimResult<PathSegments> {
        check_len("path", path, self.limits.max_path_len)?;
        scim_lang::tokenize_path(path).map_err(|e| {
            scim_debug!(req, path, error = %e, "path rejected");
            e.into_scim_error()
        })
    }

    pub fn tokenize_filter(&self, filter: &str) -> ScimResult<Vec<Token>> {
        check_len("filter", filter, self.limits.max_filter_len)?;
        scim_lang::tokenize_filter(filter).map_err(|e| {
            scim_debug!(req, filter, error = %e, "filter rejected by lexer");
            e.into_scim_error()
        })
    }

    pub fn parse_filter(&self, tokens: &[Token]) -> ScimResult<Expr> {
        scim_lang::parse_filter(tokens).map_err(|e| {
            scim_debug!(req, error = %e, "filter rejected by parser");
            e.into_scim_error()
        })
    }

    /// Tokenize and parse `filter` in one call.
    pub fn compile_filter(&self, filter: &str) -> ScimResult<Expr> {
        let tokens = self.tokenize_filter(filter)?;
        self.parse_filter(&tokens)
    }

    // -- schemas -------------------------------------------------------------

    pub fn schema(&self, id: &str) -> ScimResult<Arc<Schema>> {
        self.schemas.get(id).map_err(|e| {
            scim_warn!(conf, schema = id, error = %e, "schema lookup failed");
            e.into_scim_error()
        })
    }

    pub fn schema_for(&self, kind: ResourceKind) -> ScimResult<Arc<Schema>> {
        self.schema(kind.schema_id(&self.service.internal_schema_id))
    }

    /// Resolve a textual attribute path to its descriptor in `schema`.
    pub fn resolve_path<'s>(&self, schema: &'s Schema, path: &str) -> ScimResult<&'s Attribute> {
        let segments = self.tokenize_path(path)?;
        schema
            .resolve_path(&segments)
            .map_err(IntoScimError::into_scim_error)
    }

    // -- validation ----------------------------------------------------------

    pub fn validate_mutability(
        &self,
        candidate: &Resource,
        reference: &Resource,
        schema: &Schema,
        options: &ValidationOptions,
    ) -> ScimResult<()> {
        self.validator
            .validate(candidate, reference, schema, options)
            .map_err(|v| {
                scim_debug!(val, schema = %schema.id, path = %v.path, "mutability violation");
                v.into_scim_error()
            })
    }
}

fn check_len(what: &str, input: &str, max: usize) -> ScimResult<()> {
    if input.len() > max {
        return Err(scim_error(
            ScimReason::InvalidValue,
            format!("{what} is {} bytes, limit is {max}", input.len()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scim_resource::{AttributeType, Mutability};

    fn engine(config: &ScimConfig) -> ScimEngine {
        let mut repo = InMemorySchemaRepository::new();
        repo.insert(Schema::new(
            "urn:ietf:params:scim:schemas:core:2.0:User",
            vec![
                Attribute::new("userName", AttributeType::String)
                    .with_mutability(Mutability::Immutable),
                Attribute::complex(
                    "name",
                    vec![Attribute::new("familyName", AttributeType::String)],
                ),
            ],
        ));
        ScimEngine::new(config, Arc::new(repo))
    }

    #[test]
    fn over_long_input_is_rejected_before_lexing() {
        let config: ScimConfig = "[limits]\nmax_path_len = 8\nmax_filter_len = 8\n"
            .parse()
            .unwrap();
        let engine = engine(&config);

        let err = engine.tokenize_path("name.familyName").unwrap_err();
        assert_eq!(*err.reason(), ScimReason::InvalidValue);
        let err = engine.compile_filter("userName pr").unwrap_err();
        assert_eq!(*err.reason(), ScimReason::InvalidValue);

        assert!(engine.tokenize_path("userName").is_ok());
    }

    #[test]
    fn compile_filter_reports_syntax_errors() {
        let engine = engine(&ScimConfig::default());
        let expr = engine.compile_filter("userName eq \"bjensen\"").unwrap();
        assert_eq!(expr.to_string(), "userName eq \"bjensen\"");

        let err = engine.compile_filter("userName eq").unwrap_err();
        assert_eq!(*err.reason(), ScimReason::InvalidSyntax);
    }

    #[test]
    fn schema_lookup_by_kind() {
        let engine = engine(&ScimConfig::default());
        let user = engine.schema_for(ResourceKind::User).unwrap();
        assert_eq!(user.attributes.len(), 2);

        let err = engine.schema_for(ResourceKind::Group).unwrap_err();
        assert_eq!(*err.reason(), ScimReason::ServerError);
    }

    #[test]
    fn resolve_path_against_schema() {
        let engine = engine(&ScimConfig::default());
        let schema = engine.schema_for(ResourceKind::User).unwrap();
        let attr = engine.resolve_path(&schema, "NAME.familyName").unwrap();
        assert_eq!(attr.name, "familyName");

        let err = engine.resolve_path(&schema, "name.middleName").unwrap_err();
        assert_eq!(*err.reason(), ScimReason::InvalidPath);
    }

    #[test]
    fn id_param_per_kind() {
        let names = UrlParamNames::default();
        assert_eq!(ResourceKind::User.id_param(&names), Some("userId"));
        assert_eq!(ResourceKind::Group.id_param(&names), Some("groupId"));
        assert_eq!(ResourceKind::Root.id_param(&names), None);
    }
}
