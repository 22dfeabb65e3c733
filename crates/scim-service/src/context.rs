use std::sync::Arc;

use scim_resource::{Resource, ScimResult, Schema};

use crate::request::RequestSource;
use crate::search::QueryParams;

/// A pipeline step ran before the value it depends on was supplied.
///
/// Raised as a panic: the caller wired the pipeline wrongly, no client input
/// can cause it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing context value: {0}")]
pub struct MissingContextValue(pub &'static str);

/// State threaded through the steps handling one request.
#[derive(Default)]
pub struct RequestContext<'r> {
    request: Option<&'r dyn RequestSource>,
    pub schema: Option<Arc<Schema>>,
    /// Resource id taken from the URL.
    pub identity: Option<String>,
    pub query: Option<QueryParams>,
    /// Resource as submitted by the client.
    pub resource: Option<Resource>,
    /// Stored resource the submission is compared against.
    pub reference: Option<Resource>,
}

impl<'r> RequestContext<'r> {
    pub fn new(request: &'r dyn RequestSource) -> Self {
        Self {
            request: Some(request),
            ..Self::default()
        }
    }

    pub fn request(&self) -> &'r dyn RequestSource {
        match self.request {
            Some(request) => request,
            None => panic!("{}", MissingContextValue("request source")),
        }
    }

    pub fn require_schema(&self) -> &Arc<Schema> {
        match &self.schema {
            Some(schema) => schema,
            None => panic!("{}", MissingContextValue("schema")),
        }
    }
}

/// One step of request handling.
pub trait Processor {
    fn process(&self, ctx: &mut RequestContext<'_>) -> ScimResult<()>;
}
