use scim_resource::ScimResult;

use crate::context::{MissingContextValue, Processor, RequestContext};
use crate::engine::ScimEngine;

/// Rejects a submitted resource that changes what its schema forbids.
///
/// Needs `schema`, `resource` and `reference` on the context; running it
/// without them is a wiring bug and panics.
pub struct MutabilityCheck<'e> {
    engine: &'e ScimEngine,
}

impl<'e> MutabilityCheck<'e> {
    pub fn new(engine: &'e ScimEngine) -> Self {
        Self { engine }
    }
}

impl Processor for MutabilityCheck<'_> {
    fn process(&self, ctx: &mut RequestContext<'_>) -> ScimResult<()> {
        let schema = ctx.require_schema();
        let Some(candidate) = ctx.resource.as_ref() else {
            panic!("{}", MissingContextValue("resource"));
        };
        let Some(reference) = ctx.reference.as_ref() else {
            panic!("{}", MissingContextValue("reference resource"));
        };
        self.engine
            .validate_mutability(candidate, reference, schema, self.engine.options())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scim_config::ScimConfig;
    use scim_resource::{
        Attribute, AttributeType, InMemorySchemaRepository, Mutability, Resource, Schema,
        ScimReason,
    };
    use serde_json::json;

    use super::*;
    use crate::request::{HttpMethod, RequestParts};

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(
            "urn:example:Device",
            vec![
                Attribute::new("serial", AttributeType::String)
                    .with_mutability(Mutability::Immutable),
            ],
        ))
    }

    fn engine(config: &str) -> ScimEngine {
        let config: ScimConfig = config.parse().unwrap();
        ScimEngine::new(&config, Arc::new(InMemorySchemaRepository::new()))
    }

    #[test]
    fn configured_options_apply() {
        let req = RequestParts::new(HttpMethod::Put);
        let mut ctx = RequestContext::new(&req);
        ctx.schema = Some(schema());
        ctx.resource = Some(Resource::from_json(json!({"id": "d1"})).unwrap());
        ctx.reference = Some(Resource::from_json(json!({"id": "d1", "serial": "X1"})).unwrap());

        let strict = engine("");
        let err = MutabilityCheck::new(&strict).process(&mut ctx).unwrap_err();
        assert_eq!(*err.reason(), ScimReason::Mutability);

        let lenient = engine("[validation]\nunassigned_immutable_is_ignored = true\n");
        assert!(MutabilityCheck::new(&lenient).process(&mut ctx).is_ok());
    }

    #[test]
    #[should_panic(expected = "missing context value: schema")]
    fn schema_must_be_supplied() {
        let req = RequestParts::new(HttpMethod::Put);
        let mut ctx = RequestContext::new(&req);
        ctx.resource = Some(Resource::new(Vec::<String>::new()));
        ctx.reference = Some(Resource::new(Vec::<String>::new()));
        let _ = MutabilityCheck::new(&engine("")).process(&mut ctx);
    }
}
