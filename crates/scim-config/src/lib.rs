pub mod limits;
pub mod logging;
pub mod scim;
pub mod service;
pub mod validate;

pub use limits::LimitsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use scim::ScimConfig;
pub use scim_validation::ValidationOptions;
pub use service::{InternalSchemaId, ServiceConfig, UrlParamNames};
