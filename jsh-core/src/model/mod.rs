//! Model binding traits
//!
//! The validator never inspects types at runtime. Instead every value that can appear in
//! a model implements [`Bindable`], which answers two questions: is the value absent
//! (still at its zero value), and which [`Shape`] does it have so the walker knows how
//! to descend into it. Structs deriving `Resource` additionally expose their cached
//! [`ModelSchema`] and per-field access through [`Resource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use jsh_core::{IdObject, Resource};
//! use serde::Deserialize;
//!
//! #[derive(Resource, Deserialize, Default)]
//! #[serde(default)]
//! struct User {
//!     #[serde(skip)]
//!     #[jsh("one,create,update")]
//!     group: Option<IdObject>,
//!     #[serde(rename = "username")]
//!     #[jsh("create/required")]
//!     name: String,
//!     #[jsh("create,update")]
//!     email: String,
//! }
//! ```

mod impls;
pub mod schema;

pub use impls::MapKey;
pub use schema::{FieldDecl, FieldSchema, ModelSchema};

use crate::document::IdObject;

/// Structural view of a value, as seen by the walker
pub enum Shape<'a> {
    /// Leaf value, matched at its own path only
    Scalar,
    /// Struct with a declared schema, walked field by field
    Struct(&'a mut dyn Resource),
    /// Ordered elements, addressed by index
    List(Vec<&'a mut dyn Bindable>),
    /// Keyed entries sorted by key, or the name of a map type whose keys are not strings
    Map(Result<Vec<(String, &'a mut dyn Bindable)>, UnsupportedKey>),
    /// Indirection that may be empty
    Optional(Option<&'a mut dyn Bindable>),
}

/// Map type whose keys cannot address JSON attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedKey(pub &'static str);

/// Failure to assign relationship linkage to a field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("Invalid field type for to-one relation, must be Option<IdObject>")]
    UnsupportedOne,
    #[error("Invalid field type for to-many relation, must be a map")]
    UnsupportedMany,
    #[error("Invalid map value type for to-many relation, must be IdObject")]
    UnsupportedValue,
    #[error("Map for to-many relation is not allocated")]
    NotAllocated,
    #[error("Invalid resource ID '{0}'")]
    InvalidId(String),
}

/// A value the validator can inspect and bind linkage into
pub trait Bindable {
    /// Whether the value still holds its zero value, which the validator reads as
    /// "not supplied".
    fn is_absent(&self) -> bool;

    fn shape(&mut self) -> Shape<'_>;

    /// Assign a to-one linkage
    fn bind_one(&mut self, _target: &IdObject) -> Result<(), BindError> {
        Err(BindError::UnsupportedOne)
    }

    /// Insert every identifier of a to-many linkage
    fn bind_many(&mut self, _targets: &[IdObject]) -> Result<(), BindError> {
        Err(BindError::UnsupportedMany)
    }

    /// Build a value from a resource identifier, `None` for types that cannot hold one
    fn from_id_object(_target: &IdObject) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    /// Map type whose keys cannot address attributes, looking through `Option` and `Box`.
    /// Decided by the declared type, whatever the value holds.
    fn unsupported_key(&self) -> Option<UnsupportedKey> {
        None
    }

    /// Type-level form of [`Bindable::unsupported_key`]
    fn unsupported_key_of() -> Option<UnsupportedKey>
    where
        Self: Sized,
    {
        None
    }
}

/// A struct with a declared field schema
pub trait Resource {
    fn schema(&self) -> &'static ModelSchema;

    /// Field at `index` in [`ModelSchema::fields`]
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Bindable>;
}

/// Field-wise transfer between two values of the same resource type
pub trait Patch: Resource {
    /// Swap the field at `index` between `self` and `source`
    fn take_field(&mut self, source: &mut Self, index: usize);
}

/// Struct behind a value, looking through optionals
pub(crate) enum StructView<'a> {
    Present(&'a mut dyn Resource),
    Empty,
    NotAStruct,
}

pub(crate) fn struct_view(value: &mut dyn Bindable) -> StructView<'_> {
    match value.shape() {
        Shape::Struct(resource) => StructView::Present(resource),
        Shape::Optional(Some(inner)) => struct_view(inner),
        Shape::Optional(None) => StructView::Empty,
        _ => StructView::NotAStruct,
    }
}

/// Case-insensitive name comparison shared by attribute keys and relationship names
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Lowercase the first character, leaving the rest untouched
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match() {
        assert!(names_match("foo", "FOO"));
        assert!(names_match("userName", "username"));
        assert!(names_match("Ärger", "ärger"));
        assert!(!names_match("foo", "foos"));
        assert!(names_match("", ""));
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Foo"), "foo");
        assert_eq!(lower_first("FOO"), "fOO");
        assert_eq!(lower_first("already"), "already");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_bind_error_messages() {
        assert_eq!(BindError::InvalidId("abc".into()).to_string(), "Invalid resource ID 'abc'");
        assert!(BindError::UnsupportedOne.to_string().contains("to-one"));
    }
}
