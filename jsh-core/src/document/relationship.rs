//! Resource identifiers and relationship linkage

use crate::document::link::Links;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource identifier object (`{"type": .., "id": ..}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl IdObject {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into(), id: id.into() }
    }
}

/// Resource linkage of a relationship
///
/// On the wire a to-one linkage is a single identifier and a to-many linkage is an
/// array. Both are accepted regardless of the field they end up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(IdObject),
    Many(Vec<IdObject>),
}

impl Linkage {
    pub fn ids(&self) -> &[IdObject] {
        match self {
            Linkage::One(id) => std::slice::from_ref(id),
            Linkage::Many(ids) => ids,
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

impl From<IdObject> for Linkage {
    fn from(id: IdObject) -> Self {
        Linkage::One(id)
    }
}

impl From<Vec<IdObject>> for Linkage {
    fn from(ids: Vec<IdObject>) -> Self {
        Linkage::Many(ids)
    }
}

/// Relationship object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// `None` when `data` is missing or `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Linkage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Relationship {
    pub fn one(id: IdObject) -> Self {
        Self { data: Some(Linkage::One(id)), ..Self::default() }
    }

    pub fn many(ids: Vec<IdObject>) -> Self {
        Self { data: Some(Linkage::Many(ids)), ..Self::default() }
    }

    /// Identifiers carried by the linkage, empty when there is none
    pub fn ids(&self) -> &[IdObject] {
        match &self.data {
            Some(linkage) => linkage.ids(),
            None => &[],
        }
    }
}

/// Relationships of a resource object, by name
pub type Relationships = BTreeMap<String, Relationship>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_linkage() {
        let rel: Relationship =
            serde_json::from_str(r#"{"data": {"type": "users", "id": "1"}}"#).unwrap();
        assert_eq!(rel.ids(), &[IdObject::new("users", "1")]);
        assert!(matches!(rel.data, Some(Linkage::One(_))));
    }

    #[test]
    fn test_array_linkage() {
        let rel: Relationship = serde_json::from_str(
            r#"{"data": [{"type": "tags", "id": "a"}, {"type": "tags", "id": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(rel.ids().len(), 2);
        assert_eq!(rel.ids()[1].id, "b");
    }

    #[test]
    fn test_null_and_missing_linkage() {
        let rel: Relationship = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(rel.data.is_none());
        assert!(rel.ids().is_empty());

        let rel: Relationship =
            serde_json::from_str(r#"{"links": {"self": "/users/1/relationships/group"}}"#).unwrap();
        assert!(rel.data.is_none());
        assert!(rel.links.is_some());
    }

    #[test]
    fn test_serialize_to_one() {
        let rel = Relationship::one(IdObject::new("users", "1"));
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json, serde_json::json!({"data": {"type": "users", "id": "1"}}));
    }
}
