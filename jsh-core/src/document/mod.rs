//! JSON:API document types
//!
//! Resource objects, resource identifiers, relationship linkage, links and error objects,
//! plus the create/update processing that ties attribute decoding to validation.

pub mod error_object;
pub mod link;
pub mod object;
pub mod relationship;

pub use error_object::{ErrorObject, ErrorSource};
pub use link::{Link, Links};
pub use object::{apply_update, Object};
pub use relationship::{IdObject, Linkage, Relationship, Relationships};

use crate::config::ErrorsConfig;
use crate::error::ErrorList;

/// Failure to process a resource object
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The object's type differs from the one the endpoint serves
    #[error("Resource type '{found}' does not match '{expected}'")]
    Conflict { expected: String, found: String },

    #[error("For type '{resource_type}' unable to unmarshal: {source}")]
    Unmarshal {
        resource_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed:\n{0}")]
    Validation(#[from] ErrorList),
}

impl ProcessError {
    pub fn to_error_objects(&self, config: &ErrorsConfig) -> Vec<ErrorObject> {
        match self {
            ProcessError::Conflict { found, .. } => vec![ErrorObject::conflict(found, "")],
            ProcessError::Unmarshal { resource_type, source } => vec![ErrorObject::bad_request(
                format!("For type '{}' unable to unmarshal", resource_type),
                source.to_string(),
            )],
            ProcessError::Validation(errors) => ErrorObject::from_error_list(errors, config),
        }
    }

    /// HTTP status of the first error object
    pub fn status(&self) -> u16 {
        match self {
            ProcessError::Conflict { .. } => error_object::STATUS_CONFLICT,
            ProcessError::Unmarshal { .. } => error_object::STATUS_BAD_REQUEST,
            ProcessError::Validation(errors) => match errors.iter().next() {
                Some(error) if error.is_internal() => error_object::STATUS_INTERNAL,
                Some(error) if error.kind == crate::error::ErrorKind::Forbidden => error_object::STATUS_FORBIDDEN,
                _ => error_object::STATUS_UNPROCESSABLE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    #[test]
    fn test_conflict_error_objects() {
        let err = ProcessError::Conflict { expected: "users".into(), found: "groups".into() };
        let objects = err.to_error_objects(&ErrorsConfig::default());
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].status, error_object::STATUS_CONFLICT);
        assert_eq!(err.status(), error_object::STATUS_CONFLICT);
    }

    #[test]
    fn test_validation_error_objects() {
        let errors = ErrorList(vec![FieldError::forbidden_attribute("name"), FieldError::required_attribute("email")]);
        let err = ProcessError::from(errors);
        let objects = err.to_error_objects(&ErrorsConfig::default());
        assert_eq!(objects.len(), 2);
        assert_eq!(err.status(), error_object::STATUS_FORBIDDEN);
        assert_eq!(objects[1].pointer(), Some("/data/attributes/email"));
    }

    #[test]
    fn test_unmarshal_error_object() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ProcessError::Unmarshal { resource_type: "users".into(), source };
        let objects = err.to_error_objects(&ErrorsConfig::default());
        assert_eq!(objects[0].status, error_object::STATUS_BAD_REQUEST);
        assert_eq!(objects[0].title.as_deref(), Some("For type 'users' unable to unmarshal"));
    }
}
