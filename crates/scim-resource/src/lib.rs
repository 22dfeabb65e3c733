mod assign;
pub mod error;
pub mod repository;
pub mod resource;
pub mod schema;
pub mod value;

pub use error::{ScimError, ScimReason, ScimResult};
pub use repository::{InMemorySchemaRepository, RepositoryError, SchemaRepository};
pub use resource::{Meta, Resource, ResourceError};
pub use schema::{
    Attribute, AttributeType, Mutability, Returned, Schema, SchemaLookupError, Uniqueness,
};
pub use value::{Map, Value};
