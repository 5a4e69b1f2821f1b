//! Resource objects and request processing
//!
//! An [`Object`] keeps its attributes as raw JSON. Processing a create or update request
//! decodes those attributes into a model and then validates the model against the very
//! same bytes, so the validator sees which keys the client actually sent.
//!
//! Clients send partial attribute sets, so models should carry `#[serde(default)]`;
//! otherwise a missing field fails decoding before validation can report it.

use crate::document::link::Link;
use crate::document::relationship::{IdObject, Relationship, Relationships};
use crate::document::ProcessError;
use crate::model::{names_match, struct_view, Bindable, Patch, Resource, Shape, StructView};
use crate::tag::Action;
use crate::validator::Validator;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// JSON:API resource object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Object {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: Relationships,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Object {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self { id: id.into(), resource_type: resource_type.into(), ..Self::default() }
    }

    /// Builder form of [`Object::marshal`]
    pub fn with_attributes<T: Serialize + ?Sized>(mut self, attributes: &T) -> Result<Self, serde_json::Error> {
        self.marshal(attributes)?;
        Ok(self)
    }

    /// Replace the raw attributes with the JSON encoding of `attributes`
    pub fn marshal<T: Serialize + ?Sized>(&mut self, attributes: &T) -> Result<(), serde_json::Error> {
        self.attributes = Some(serde_json::value::to_raw_value(attributes)?);
        Ok(())
    }

    /// Raw attribute bytes, empty when the object carries none
    pub fn raw_attributes(&self) -> &[u8] {
        match &self.attributes {
            Some(raw) => raw.get().as_bytes(),
            None => &[],
        }
    }

    pub fn to_id_object(&self) -> IdObject {
        IdObject::new(self.resource_type.as_str(), self.id.as_str())
    }

    pub fn add_relationship_one(&mut self, name: impl Into<String>, target: IdObject) {
        self.relationships.insert(name.into(), Relationship::one(target));
    }

    pub fn add_relationship_many(&mut self, name: impl Into<String>, targets: Vec<IdObject>) {
        self.relationships.insert(name.into(), Relationship::many(targets));
    }

    /// Decode the attributes into a fresh `T`
    pub fn unmarshal<T: DeserializeOwned + Default>(&self, resource_type: &str) -> Result<T, ProcessError> {
        self.check_type(resource_type)?;
        if self.has_no_attributes() {
            return Ok(T::default());
        }
        serde_json::from_slice(self.raw_attributes()).map_err(|source| self.unmarshal_error(source))
    }

    /// Decode the attributes into `model`, then validate it for creation.
    ///
    /// Returns every matched attribute path and bound relationship name.
    pub fn process_create<T>(&self, resource_type: &str, model: &mut T) -> Result<Vec<String>, ProcessError>
    where
        T: Bindable + Patch + DeserializeOwned,
    {
        self.process(Action::Create, resource_type, model)
    }

    /// Decode the attributes into `model`, then validate it for an update.
    ///
    /// Use [`apply_update`] to move the matched fields onto the stored resource.
    pub fn process_update<T>(&self, resource_type: &str, model: &mut T) -> Result<Vec<String>, ProcessError>
    where
        T: Bindable + Patch + DeserializeOwned,
    {
        self.process(Action::Update, resource_type, model)
    }

    fn process<T>(&self, action: Action, resource_type: &str, model: &mut T) -> Result<Vec<String>, ProcessError>
    where
        T: Bindable + Patch + DeserializeOwned,
    {
        self.unmarshal_into(resource_type, model)?;
        let matched = Validator::new(action).validate(model, self.raw_attributes(), &self.relationships)?;
        log::debug!("Processed {} '{}' for {}: {:?}", self.resource_type, self.id, action, matched);
        Ok(matched)
    }

    /// Decode the attributes on top of `model`.
    ///
    /// Keys are matched against the declared names regardless of case, like the
    /// validator does. Only fields whose key is present in the raw attributes are
    /// replaced, so fields the client did not send (and relationship fields) keep their
    /// current values.
    fn unmarshal_into<T>(&self, resource_type: &str, model: &mut T) -> Result<(), ProcessError>
    where
        T: Patch + DeserializeOwned,
    {
        self.check_type(resource_type)?;
        if self.has_no_attributes() {
            return Ok(());
        }

        let raw = self.raw_attributes();
        let mut members: Map<String, Value> = serde_json::from_slice(raw).map_err(|source| self.unmarshal_error(source))?;
        let mut decoded: T = serde_json::from_slice(raw).map_err(|source| self.unmarshal_error(source))?;

        // Each pass can reveal deeper structs, so re-decode until no key is renamed.
        while canonicalize_members(&mut members, &mut decoded) {
            let bytes = serde_json::to_vec(&members).map_err(|source| self.unmarshal_error(source))?;
            decoded = serde_json::from_slice(&bytes).map_err(|source| self.unmarshal_error(source))?;
        }

        let schema = model.schema();
        for (index, field) in schema.fields().iter().enumerate() {
            if field.relation().is_relationship() {
                continue;
            }
            let sent = field.is_flatten() || field.key().is_some_and(|key| members.contains_key(key));
            if sent {
                model.take_field(&mut decoded, index);
            }
        }
        Ok(())
    }

    fn check_type(&self, resource_type: &str) -> Result<(), ProcessError> {
        if self.resource_type == resource_type {
            return Ok(());
        }
        log::debug!("Rejecting object of type '{}', expected '{}'", self.resource_type, resource_type);
        Err(ProcessError::Conflict { expected: resource_type.to_string(), found: self.resource_type.clone() })
    }

    fn has_no_attributes(&self) -> bool {
        match &self.attributes {
            Some(raw) => raw.get().trim() == "null",
            None => true,
        }
    }

    fn unmarshal_error(&self, source: serde_json::Error) -> ProcessError {
        ProcessError::Unmarshal { resource_type: self.resource_type.clone(), source }
    }
}

/// Rename sent keys that match a declared name only case-insensitively to that name.
///
/// Returns whether any key was renamed. Keys equal to a declared name of the level are
/// never renamed.
fn canonicalize_members(members: &mut Map<String, Value>, resource: &mut dyn Resource) -> bool {
    let declared = level_keys(resource);
    canonicalize_level(members, resource, &declared)
}

fn canonicalize_level(members: &mut Map<String, Value>, resource: &mut dyn Resource, declared: &[&str]) -> bool {
    let schema = resource.schema();
    let mut changed = false;
    for (index, field) in schema.fields().iter().enumerate() {
        if field.relation().is_relationship() {
            continue;
        }
        let Some(value) = resource.field_mut(index) else {
            continue;
        };
        if field.is_flatten() {
            if let StructView::Present(inner) = struct_view(value) {
                changed |= canonicalize_level(members, inner, declared);
            }
            continue;
        }
        let Some(key) = field.key() else {
            continue;
        };

        if !members.contains_key(key) {
            let sent = members
                .keys()
                .find(|sent| !declared.contains(&sent.as_str()) && names_match(sent, key))
                .cloned();
            if let Some(member) = sent.and_then(|sent| members.remove(&sent)) {
                members.insert(key.to_string(), member);
                changed = true;
            }
        }
        if let Some(member) = members.get_mut(key) {
            changed |= canonicalize_value(member, value);
        }
    }
    changed
}

fn canonicalize_value(member: &mut Value, value: &mut dyn Bindable) -> bool {
    match (value.shape(), member) {
        (Shape::Optional(Some(inner)), member) => canonicalize_value(member, inner),
        (Shape::Struct(resource), Value::Object(members)) => canonicalize_members(members, resource),
        (Shape::List(items), Value::Array(elements)) => items
            .into_iter()
            .zip(elements.iter_mut())
            .fold(false, |changed, (item, element)| canonicalize_value(element, item) | changed),
        (Shape::Map(Ok(entries)), Value::Object(members)) => {
            entries.into_iter().fold(false, |changed, (key, item)| match members.get_mut(&key) {
                Some(member) => canonicalize_value(member, item) | changed,
                None => changed,
            })
        }
        _ => false,
    }
}

/// Declared keys of a struct level, including those of flattened fields
fn level_keys(resource: &mut dyn Resource) -> Vec<&'static str> {
    let schema = resource.schema();
    let mut keys = Vec::new();
    for (index, field) in schema.fields().iter().enumerate() {
        if field.relation().is_relationship() {
            continue;
        }
        if field.is_flatten() {
            if let Some(StructView::Present(inner)) = resource.field_mut(index).map(struct_view) {
                keys.extend(level_keys(inner));
            }
            continue;
        }
        keys.extend(field.key());
    }
    keys
}

/// Move every top-level matched field of `model` into `dest`.
///
/// Nested paths (`foo/0/bar`) are covered by their top-level field. Returns the names of
/// the updated fields in declaration order. Fields are swapped, so `model` is left
/// holding the previous values of `dest`.
pub fn apply_update<T: Patch>(dest: &mut T, model: &mut T, matched: &[String]) -> Vec<String> {
    let top_level: Vec<&str> = matched.iter().map(String::as_str).filter(|path| !path.contains('/')).collect();

    let schema = model.schema();
    let mut updated = Vec::new();
    for index in 0..schema.fields().len() {
        let names = field_names(model, index);
        let hits: Vec<String> = names.into_iter().filter(|name| top_level.contains(&name.as_str())).collect();
        if hits.is_empty() {
            continue;
        }
        dest.take_field(model, index);
        updated.extend(hits);
    }
    log::trace!("Applied update to {}: {:?}", schema.type_name(), updated);
    updated
}

/// Top-level paths a field can be matched under
fn field_names(resource: &mut dyn Resource, index: usize) -> Vec<String> {
    let schema = resource.schema();
    let Some(field) = schema.field(index) else {
        return Vec::new();
    };

    if field.relation().is_relationship() {
        return vec![field.relationship_path()];
    }
    if field.is_flatten() {
        let Some(value) = resource.field_mut(index) else {
            return Vec::new();
        };
        return match struct_view(value) {
            StructView::Present(inner) => {
                let count = inner.schema().fields().len();
                (0..count).flat_map(|inner_index| field_names(&mut *inner, inner_index)).collect()
            }
            StructView::Empty | StructView::NotAStruct => Vec::new(),
        };
    }
    field.key().map(str::to_string).into_iter().collect()
}
