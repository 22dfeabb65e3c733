use scim_resource::{ScimReason, ScimResult};

use crate::context::{Processor, RequestContext};
use crate::engine::{ResourceKind, ScimEngine};
use crate::error::scim_error;

/// Fills `schema` and `identity` on the context from a delete request.
pub struct DeleteParamParser<'e> {
    engine: &'e ScimEngine,
    kind: ResourceKind,
}

impl<'e> DeleteParamParser<'e> {
    pub fn new(engine: &'e ScimEngine, kind: ResourceKind) -> Self {
        Self { engine, kind }
    }
}

impl Processor for DeleteParamParser<'_> {
    fn process(&self, ctx: &mut RequestContext<'_>) -> ScimResult<()> {
        let req = ctx.request();
        ctx.schema = Some(self.engine.schema_for(self.kind)?);

        let Some(param) = self.kind.id_param(&self.engine.service().url_param) else {
            return Err(scim_error(
                ScimReason::NotImplemented,
                format!("resource delete is not supported for {:?}", self.kind),
            ));
        };
        let id = req
            .url_param(param)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                scim_error(
                    ScimReason::InvalidSyntax,
                    "failed to obtain resource id from url",
                )
            })?;

        scim_debug!(req, kind = ?self.kind, id, "delete parameters parsed");
        ctx.identity = Some(id.to_string());
        Ok(())
    }
}
