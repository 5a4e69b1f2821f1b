//! Path-addressed validation errors
//!
//! The engine never stops at the first problem: every violation found while walking a
//! model is collected as a [`FieldError`] and returned in an [`ErrorList`]. Paths are
//! `/`-joined segments (`foo/0/bar`) relative to either the attributes object or the
//! relationships object of the resource, see [`FieldError::pointer`].

use serde::Serialize;
use std::fmt;

pub const DETAIL_FORBIDDEN: &str = "Operation not allowed";
pub const DETAIL_REQUIRED_ATTRIBUTE: &str = "Required attribute";
pub const DETAIL_UNKNOWN_ATTRIBUTE: &str = "Attribute does not exist";
pub const DETAIL_REQUIRED_RELATIONSHIP: &str = "Required relationship";
pub const DETAIL_UNKNOWN_RELATIONSHIP: &str = "Relationship does not exist";
pub const DETAIL_MISSING_DATA: &str = "Missing relationship data";
pub const DETAIL_MULTIPLE_OBJECTS: &str = "Multiple objects for to-one relation";
pub const DETAIL_INVALID_ID: &str = "Invalid resource ID";

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A value was supplied for a field the action does not grant
    Forbidden,
    /// A field required for the action was not supplied
    MissingRequired,
    /// An attribute key has no declared field
    UnknownField,
    /// A relationship name has no declared field
    UnknownRelationship,
    /// Relationship linkage is empty, ambiguous or carries an unusable id
    InvalidLinkage,
    /// A relationship field has a type that cannot hold linkage
    TypeMismatch,
    /// The model itself is unusable (not a struct, unsupported map key, bad raw JSON)
    Internal,
}

impl ErrorKind {
    /// Internal kinds point at a bug in the model declaration, not at client input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::TypeMismatch | ErrorKind::Internal)
    }
}

/// Which part of the resource object a path is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Target {
    Attribute,
    Relationship,
    None,
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub target: Target,
    pub path: String,
    pub detail: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, target: Target, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { kind, target, path: path.into(), detail: detail.into() }
    }

    pub fn forbidden_attribute(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, Target::Attribute, path, DETAIL_FORBIDDEN)
    }

    pub fn forbidden_relationship(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, Target::Relationship, name, DETAIL_FORBIDDEN)
    }

    pub fn required_attribute(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRequired, Target::Attribute, path, DETAIL_REQUIRED_ATTRIBUTE)
    }

    pub fn required_relationship(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRequired, Target::Relationship, name, DETAIL_REQUIRED_RELATIONSHIP)
    }

    pub fn unknown_attribute(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField, Target::Attribute, path, DETAIL_UNKNOWN_ATTRIBUTE)
    }

    pub fn unknown_relationship(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRelationship, Target::Relationship, name, DETAIL_UNKNOWN_RELATIONSHIP)
    }

    pub fn invalid_linkage(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLinkage, Target::Relationship, name, detail)
    }

    pub fn type_mismatch(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, Target::Relationship, name, detail)
    }

    pub fn internal(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, Target::None, path, detail)
    }

    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }

    /// JSON pointer into the request document, `None` for errors without a target
    pub fn pointer(&self) -> Option<String> {
        match self.target {
            Target::Attribute => Some(attribute_pointer(&self.path)),
            Target::Relationship => Some(relationship_pointer(&self.path)),
            Target::None => None,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.detail)?;
        match self.pointer() {
            Some(pointer) => write!(f, " (pointer: {})", pointer),
            None if !self.path.is_empty() => write!(f, " (path: {})", self.path),
            None => Ok(()),
        }
    }
}

impl std::error::Error for FieldError {}

/// Every error found by one validation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", render_list(.0))]
pub struct ErrorList(pub Vec<FieldError>);

fn render_list(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

impl ErrorList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn has_internal(&self) -> bool {
        self.0.iter().any(FieldError::is_internal)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl From<FieldError> for ErrorList {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl std::ops::Index<usize> for ErrorList {
    type Output = FieldError;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn attribute_pointer(path: &str) -> String {
    format!("/data/attributes/{}", path)
}

pub fn relationship_pointer(name: &str) -> String {
    format!("/data/relationships/{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointers() {
        assert_eq!(FieldError::required_attribute("foo/0/bar").pointer().as_deref(), Some("/data/attributes/foo/0/bar"));
        assert_eq!(FieldError::unknown_relationship("author").pointer().as_deref(), Some("/data/relationships/author"));
        assert_eq!(FieldError::internal("", "boom").pointer(), None);
    }

    #[test]
    fn test_internal_kinds() {
        assert!(FieldError::internal("", "x").is_internal());
        assert!(FieldError::type_mismatch("foo", "x").is_internal());
        assert!(!FieldError::invalid_linkage("foo", DETAIL_INVALID_ID).is_internal());
        assert!(!FieldError::forbidden_attribute("foo").is_internal());
    }

    #[test]
    fn test_forbidden_targets() {
        assert_eq!(FieldError::forbidden_attribute("foo").target, Target::Attribute);
        assert_eq!(FieldError::forbidden_relationship("foo").target, Target::Relationship);
        assert_eq!(FieldError::forbidden_relationship("foo").detail, DETAIL_FORBIDDEN);
    }

    #[test]
    fn test_display() {
        let error = FieldError::required_attribute("name");
        assert_eq!(error.to_string(), "MissingRequired: Required attribute (pointer: /data/attributes/name)");

        let list = ErrorList::from(vec![error, FieldError::internal("", "boom")]);
        assert_eq!(list.to_string().lines().count(), 2);
        assert!(list.has_internal());
    }
}
