#[macro_use]
mod log_macros;

pub mod check;
pub mod context;
pub mod delete;
pub mod engine;
pub mod error;
pub mod request;
pub mod search;
pub mod tracing_init;

pub use check::MutabilityCheck;
pub use context::{MissingContextValue, Processor, RequestContext};
pub use delete::DeleteParamParser;
pub use engine::{ResourceKind, ScimEngine};
pub use error::IntoScimError;
pub use request::{HttpMethod, RequestParts, RequestSource};
pub use search::{QueryParams, SEARCH_URN, SearchParamParser, SearchRequest};
