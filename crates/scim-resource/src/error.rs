use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

/// Stable failure kinds surfaced to SCIM clients. The `Display` text is the
/// RFC 7644 `scimType` where one exists.
#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum ScimReason {
    #[error("invalidSyntax")]
    InvalidSyntax,
    #[error("invalidPath")]
    InvalidPath,
    #[error("invalidValue")]
    InvalidValue,
    #[error("mutability")]
    Mutability,
    #[error("serverError")]
    ServerError,
    #[error("notImplemented")]
    NotImplemented,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ScimReason {
    /// HTTP status the transport layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidSyntax | Self::InvalidPath | Self::InvalidValue | Self::Mutability => 400,
            Self::ServerError | Self::Uvs(_) => 500,
            Self::NotImplemented => 501,
        }
    }

    /// `scimType` for 400 responses.
    pub fn scim_type(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSyntax => Some("invalidSyntax"),
            Self::InvalidPath => Some("invalidPath"),
            Self::InvalidValue => Some("invalidValue"),
            Self::Mutability => Some("mutability"),
            _ => None,
        }
    }
}

impl ErrorCode for ScimReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::InvalidSyntax => 4001,
            Self::InvalidPath => 4002,
            Self::InvalidValue => 4003,
            Self::Mutability => 4004,
            Self::ServerError => 5001,
            Self::NotImplemented => 5011,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type ScimError = StructError<ScimReason>;
pub type ScimResult<T> = Result<T, ScimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_map_to_400() {
        for reason in [
            ScimReason::InvalidSyntax,
            ScimReason::InvalidPath,
            ScimReason::InvalidValue,
            ScimReason::Mutability,
        ] {
            assert_eq!(reason.http_status(), 400);
            assert_eq!(reason.scim_type(), Some(reason.to_string().as_str()));
        }
        assert_eq!(ScimReason::ServerError.http_status(), 500);
        assert_eq!(ScimReason::NotImplemented.http_status(), 501);
        assert!(ScimReason::ServerError.scim_type().is_none());
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes = [
            ScimReason::InvalidSyntax.error_code(),
            ScimReason::InvalidPath.error_code(),
            ScimReason::InvalidValue.error_code(),
            ScimReason::Mutability.error_code(),
            ScimReason::ServerError.error_code(),
            ScimReason::NotImplemented.error_code(),
        ];
        let unique: std::collections::HashSet<i32> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
