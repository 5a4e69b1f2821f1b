//! JSON:API error objects
//!
//! Validation produces [`FieldError`]s; this is where they become the error objects a
//! server sends back. Internal errors keep their real cause in [`ErrorObject::internal`],
//! which is never serialized.

use crate::config::ErrorsConfig;
use crate::error::{attribute_pointer, relationship_pointer, ErrorKind, ErrorList, FieldError, Target};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL: u16 = 500;

pub const TITLE_INVALID_ATTRIBUTE: &str = "Invalid Attribute";
pub const TITLE_INVALID_RELATIONSHIP: &str = "Invalid Relationship";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// JSON:API error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status, serialized as a string
    #[serde(with = "status_string")]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    /// Server-side cause of an internal error
    #[serde(skip)]
    pub internal: Option<String>,
}

impl ErrorObject {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            title: Some(title.into()),
            detail: None,
            source: None,
            internal: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source = Some(ErrorSource { pointer: Some(pointer.into()), parameter: None });
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn forbidden(title: impl Into<String>) -> Self {
        Self::new(STATUS_FORBIDDEN, title)
    }

    /// 422 pointing at `/data/attributes/<attribute>`
    pub fn input(detail: impl Into<String>, attribute: &str) -> Self {
        Self::new(STATUS_UNPROCESSABLE, TITLE_INVALID_ATTRIBUTE)
            .with_detail(detail)
            .with_pointer(attribute_pointer(attribute))
    }

    /// 422 pointing at `/data/relationships/<name>`
    pub fn relationship(detail: impl Into<String>, name: &str) -> Self {
        Self::new(STATUS_UNPROCESSABLE, TITLE_INVALID_RELATIONSHIP)
            .with_detail(detail)
            .with_pointer(relationship_pointer(name))
    }

    pub fn internal(message: impl Into<String>, config: &ErrorsConfig) -> Self {
        let mut error =
            Self::new(STATUS_INTERNAL, config.internal_title.as_str()).with_detail(config.internal_detail.as_str());
        error.internal = Some(message.into());
        error
    }

    pub fn conflict(resource_type: &str, id: &str) -> Self {
        let detail = if id.is_empty() {
            format!("Resource type '{}' does not match URL's", resource_type)
        } else {
            format!("ID '{}' does not match URL's", id)
        };
        Self::new(STATUS_CONFLICT, "Resource conflict").with_detail(detail)
    }

    pub fn bad_request(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, title).with_detail(detail)
    }

    pub fn from_field_error(error: &FieldError, config: &ErrorsConfig) -> Self {
        if error.is_internal() || error.target == Target::None {
            let message = if error.path.is_empty() {
                error.detail.clone()
            } else {
                format!("{} ({})", error.detail, error.path)
            };
            return Self::internal(message, config);
        }

        if error.kind == ErrorKind::Forbidden {
            let forbidden = Self::forbidden(error.detail.as_str());
            return match error.pointer() {
                Some(pointer) => forbidden.with_pointer(pointer),
                None => forbidden,
            };
        }

        match error.target {
            Target::Relationship => Self::relationship(error.detail.as_str(), &error.path),
            _ => Self::input(error.detail.as_str(), &error.path),
        }
    }

    pub fn from_error_list(errors: &ErrorList, config: &ErrorsConfig) -> Vec<Self> {
        errors.iter().map(|error| Self::from_field_error(error, config)).collect()
    }

    pub fn pointer(&self) -> Option<&str> {
        self.source.as_ref().and_then(|source| source.pointer.as_deref())
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.status,
            self.title.as_deref().unwrap_or_default(),
            self.detail.as_deref().unwrap_or_default()
        )?;
        if let Some(pointer) = self.pointer() {
            write!(f, " (Source.Pointer: {})", pointer)?;
        }
        if let Some(internal) = &self.internal {
            write!(f, ": {}", internal)?;
        }
        Ok(())
    }
}

mod status_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(status)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| de::Error::custom(format!("invalid status '{}'", raw)))
    }
}
