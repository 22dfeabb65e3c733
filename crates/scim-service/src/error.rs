use orion_error::StructError;
use scim_lang::{LangError, LexError, ParseError, PathError};
use scim_resource::{RepositoryError, ResourceError, ScimError, ScimReason, SchemaLookupError};
use scim_validation::MutabilityViolation;

/// Lift a component failure into the kind-tagged error surfaced to clients.
pub trait IntoScimError {
    fn into_scim_error(self) -> ScimError;
}

pub(crate) fn scim_error(reason: ScimReason, detail: impl Into<String>) -> ScimError {
    StructError::from(reason).with_detail(detail.into())
}

impl IntoScimError for LexError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::InvalidSyntax, self.to_string())
    }
}

impl IntoScimError for ParseError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::InvalidSyntax, self.to_string())
    }
}

impl IntoScimError for PathError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::InvalidPath, self.to_string())
    }
}

impl IntoScimError for LangError {
    fn into_scim_error(self) -> ScimError {
        match self {
            LangError::Lex(e) => e.into_scim_error(),
            LangError::Parse(e) => e.into_scim_error(),
            LangError::Path(e) => e.into_scim_error(),
        }
    }
}

impl IntoScimError for SchemaLookupError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::InvalidPath, self.to_string())
    }
}

impl IntoScimError for RepositoryError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::ServerError, format!("failed to get schema: {self}"))
    }
}

impl IntoScimError for ResourceError {
    fn into_scim_error(self) -> ScimError {
        scim_error(ScimReason::InvalidSyntax, self.to_string())
    }
}

impl IntoScimError for MutabilityViolation {
    fn into_scim_error(self) -> ScimError {
        let detail = match self.index {
            Some(i) => format!("{self} (element {i})"),
            None => self.to_string(),
        };
        scim_error(ScimReason::Mutability, detail)
    }
}
