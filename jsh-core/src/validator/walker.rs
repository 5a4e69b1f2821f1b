//! Recursive model walker
//!
//! At each struct level the raw attributes are decoded once into their members. Every
//! declared field then consumes its member (or its relationship), is checked for
//! presence and permission, and is descended into according to its [`Shape`]. Members
//! nobody consumed are reported as unknown attributes of that level.

use super::raw::{self, RawFields};
use super::relationship;
use crate::document::{Relationship, Relationships};
use crate::error::FieldError;
use crate::model::{
    lower_first, names_match, struct_view, Bindable, FieldSchema, Resource, Shape, StructView, UnsupportedKey,
};
use serde_json::value::RawValue;
use crate::tag::{Action, Relation};
use std::collections::BTreeMap;

/// Matched paths, or every error found below a level
pub(crate) type Outcome = Result<Vec<String>, Vec<FieldError>>;

pub(crate) struct Walker<'r> {
    action: Action,
    unconsumed: BTreeMap<&'r str, &'r Relationship>,
}

impl<'r> Walker<'r> {
    pub(crate) fn new(action: Action, relationships: &'r Relationships) -> Self {
        let unconsumed = relationships.iter().map(|(name, rel)| (name.as_str(), rel)).collect();
        Self { action, unconsumed }
    }

    /// Relationship names no field consumed, in sorted order
    pub(crate) fn into_unconsumed(self) -> Vec<&'r str> {
        self.unconsumed.into_keys().collect()
    }

    pub(crate) fn walk_struct(&mut self, path: &str, resource: &mut dyn Resource, raw: &[u8]) -> Outcome {
        let mut fields = raw::decode_object(raw)
            .map_err(|err| vec![FieldError::internal(path, err.to_string())])?;

        let mut matched = Vec::new();
        let mut errors = Vec::new();
        self.walk_fields(path, resource, &mut fields, &mut matched, &mut errors);

        for key in fields.keys() {
            errors.push(FieldError::unknown_attribute(join(path, key)));
        }

        if errors.is_empty() {
            Ok(matched)
        } else {
            Err(errors)
        }
    }

    fn walk_fields(
        &mut self,
        path: &str,
        resource: &mut dyn Resource,
        fields: &mut RawFields<'_>,
        matched: &mut Vec<String>,
        errors: &mut Vec<FieldError>,
    ) {
        let schema = resource.schema();
        for (index, field) in schema.fields().iter().enumerate() {
            let Some(value) = resource.field_mut(index) else {
                continue;
            };

            if field.relation().is_relationship() {
                self.bind_relationship(field, value, matched, errors);
                continue;
            }

            if field.is_flatten() {
                match struct_view(value) {
                    StructView::Present(inner) => self.walk_fields(path, inner, fields, matched, errors),
                    StructView::Empty => {}
                    StructView::NotAStruct => errors.push(FieldError::internal(
                        join(path, field.name()),
                        format!("Flattened field {}::{} must be a struct", schema.type_name(), field.ident()),
                    )),
                }
                continue;
            }

            let Some(key) = field.key() else {
                log::trace!("Skipping {}::{}, ignored by deserialization", schema.type_name(), field.ident());
                continue;
            };

            let raw_value = raw::take_matching(fields, key);
            let field_path = join(path, key);
            let options = field.tag().options(self.action);

            if let Some(UnsupportedKey(type_name)) = value.unsupported_key() {
                errors.push(FieldError::internal(field_path, format!("Type {} is not supported", type_name)));
                continue;
            }
            if !is_supplied(value, raw_value) {
                if options.is_some_and(|options| options.required) {
                    errors.push(FieldError::required_attribute(lower_first(&field_path)));
                }
                continue;
            }
            if options.is_none() {
                log::trace!("Attribute '{}' not allowed for {}", field_path, self.action);
                errors.push(FieldError::forbidden_attribute(lower_first(&field_path)));
                continue;
            }

            match self.resolve(field_path, value, raw::bytes(raw_value)) {
                Ok(paths) => matched.extend(paths),
                Err(nested) => errors.extend(nested),
            }
        }
    }

    fn bind_relationship(
        &mut self,
        field: &FieldSchema,
        value: &mut dyn Bindable,
        matched: &mut Vec<String>,
        errors: &mut Vec<FieldError>,
    ) {
        let name = field.relationship_path();
        let many = field.relation() == Relation::Many;
        let supplied = self.take_relationship(field.name());

        match relationship::check(&name, many, supplied, field.tag().options(self.action)) {
            Ok(Some(ids)) => match relationship::assign(&name, many, value, ids) {
                Ok(()) => {
                    log::trace!("Bound relationship '{}' ({} ids)", name, ids.len());
                    matched.push(name);
                }
                Err(err) => errors.push(err),
            },
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    fn take_relationship(&mut self, name: &str) -> Option<&'r Relationship> {
        let key = *self.unconsumed.keys().find(|key| names_match(key, name))?;
        self.unconsumed.remove(key)
    }

    /// Descend into a matched value. The value's own path is always the first match.
    fn resolve(&mut self, path: String, value: &mut dyn Bindable, raw: &[u8]) -> Outcome {
        match value.shape() {
            Shape::Scalar | Shape::Optional(None) => Ok(vec![path]),
            Shape::Optional(Some(inner)) => self.resolve(path, inner, raw),
            Shape::Struct(resource) => {
                let nested = self.walk_struct(&path, resource, raw)?;
                let mut matched = vec![path];
                matched.extend(nested);
                Ok(matched)
            }
            Shape::List(items) => {
                let raw_items = raw::decode_array(raw)
                    .map_err(|err| vec![FieldError::internal(path.as_str(), err.to_string())])?;
                let entries = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item, raw::bytes(raw_items.get(index).copied())));
                self.resolve_entries(path, entries)
            }
            Shape::Map(Ok(items)) => {
                let raw_members = raw::decode_object(raw)
                    .map_err(|err| vec![FieldError::internal(path.as_str(), err.to_string())])?;
                let entries = items.into_iter().map(|(key, item)| {
                    let member = raw::bytes(raw_members.get(&key).copied());
                    (key, item, member)
                });
                self.resolve_entries(path, entries)
            }
            Shape::Map(Err(UnsupportedKey(type_name))) => {
                Err(vec![FieldError::internal(path, format!("Type {} is not supported", type_name))])
            }
        }
    }

    /// Resolve every element, collecting errors from all of them
    fn resolve_entries<'v, 'a>(
        &mut self,
        path: String,
        entries: impl Iterator<Item = (String, &'v mut dyn Bindable, &'a [u8])>,
    ) -> Outcome {
        let mut matched = Vec::new();
        let mut errors = Vec::new();
        for (segment, item, member) in entries {
            match self.resolve(join(&path, &segment), item, member) {
                Ok(paths) => matched.extend(paths),
                Err(nested) => errors.extend(nested),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        matched.insert(0, path);
        Ok(matched)
    }
}

/// A zero value counts as supplied only for a collection the client sent as `[]` or `{}`
fn is_supplied(value: &mut dyn Bindable, raw_value: Option<&RawValue>) -> bool {
    if !value.is_absent() {
        return true;
    }
    let sent = raw_value.is_some_and(|raw| !raw::is_null(raw));
    sent && matches!(value.shape(), Shape::List(_) | Shape::Map(_))
}

pub(crate) fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", path, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("", "foo"), "foo");
        assert_eq!(join("foo", "0"), "foo/0");
        assert_eq!(join("foo/0", "bar"), "foo/0/bar");
    }

    #[test]
    fn test_empty_collection_sent_is_supplied() {
        let empty = RawValue::from_string("[]".to_string()).unwrap();
        let null = RawValue::from_string("null".to_string()).unwrap();

        let mut tags: Vec<String> = Vec::new();
        assert!(is_supplied(&mut tags, Some(&*empty)));
        assert!(!is_supplied(&mut tags, Some(&*null)));
        assert!(!is_supplied(&mut tags, None));

        let mut name = String::new();
        let blank = RawValue::from_string("\"\"".to_string()).unwrap();
        assert!(!is_supplied(&mut name, Some(&*blank)));
    }

    #[test]
    fn test_unconsumed_sorted() {
        let mut relationships = Relationships::new();
        relationships.insert("zeta".to_string(), Relationship::default());
        relationships.insert("alpha".to_string(), Relationship::default());

        let mut walker = Walker::new(Action::Create, &relationships);
        assert!(walker.take_relationship("ALPHA").is_some());
        assert!(walker.take_relationship("alpha").is_none());
        assert_eq!(walker.into_unconsumed(), ["zeta"]);
    }
}
