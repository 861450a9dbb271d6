//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::collections::BTreeMap;
use std::fmt;

use raid_common::AppError;
use raid_core::DomainError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Field name -> messages, ordered by field for stable output
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (configuration, storage, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// One or more request fields were rejected; nothing was persisted
    InvalidFields(FieldErrors),

    /// Conflict (e.g., duplicate signup)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::InvalidFields(fields) => {
                f.write_str("Invalid fields:")?;
                for (field, messages) in fields {
                    write!(f, " {field} ({})", messages.join(", "))?;
                }
                Ok(())
            }
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Reject a single request field
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![msg.into()]);
        Self::InvalidFields(fields)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Field messages, if this is a field-level rejection
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidFields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get the HTTP-style status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::InvalidFields(_) => 422,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidFields(_) => "INVALID_FIELDS",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        collect_field_errors(&errors, "", &mut fields);
        Self::InvalidFields(fields)
    }
}

/// Append every message of `other` to `into`, field by field
pub(crate) fn merge_field_errors(into: &mut FieldErrors, other: FieldErrors) {
    for (field, messages) in other {
        into.entry(field).or_default().extend(messages);
    }
}

// Flatten nested struct and list errors into dotted paths like `slots[2].roles`
fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                messages.extend(list.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                }));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_errors(inner, &format!("{path}."), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::InvalidFields(fields) => AppError::InvalidFields(fields),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use raid_core::Snowflake;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(range(min = 1, max = 40))]
        count: u32,
        #[validate(nested)]
        items: Vec<Inner>,
    }

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Raid", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Raid not found: 123"));
    }

    #[test]
    fn test_domain_error_mapping() {
        let err = ServiceError::from(DomainError::AlreadySignedUp(Snowflake::new(3)));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_SIGNED_UP");
    }

    #[test]
    fn test_invalid_field() {
        let err = ServiceError::invalid_field("caldate", "is not a date");
        assert_eq!(err.status_code(), 422);
        assert_eq!(
            err.field_errors().unwrap()["caldate"],
            vec!["is not a date".to_string()]
        );
        assert_eq!(err.to_string(), "Invalid fields: caldate (is not a date)");
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let request = Outer {
            count: 0,
            items: vec![
                Inner {
                    name: "ok".to_string(),
                },
                Inner {
                    name: String::new(),
                },
            ],
        };
        let err = ServiceError::from(request.validate().unwrap_err());
        let fields = err.field_errors().unwrap();

        assert_eq!(fields["count"], vec!["range".to_string()]);
        assert_eq!(fields["items[1].name"], vec!["must not be empty".to_string()]);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Template", "456").into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::invalid_field("name", "is required").into();
        assert_eq!(app_err.error_code(), "INVALID_FIELDS");
    }
}
