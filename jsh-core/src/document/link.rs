//! Links, encoded either as a plain URL string or as a `{href, meta}` object

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// `self` / `related` links of a relationship
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Link>,
}

impl Links {
    pub fn for_relationship(id: impl Display, resource: &str, name: &str) -> Self {
        Self {
            self_link: Some(Link::relationship(&id, resource, name, true)),
            related: Some(Link::relationship(&id, resource, name, false)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub href: String,
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into(), meta: None }
    }

    pub fn with_meta(href: impl Into<String>, meta: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { href: href.into(), meta: Some(meta) }
    }

    pub fn self_link(id: impl Display, resource: &str) -> Self {
        Self::new(format!("/{}/{}", resource, id))
    }

    pub fn relationship(id: impl Display, resource: &str, name: &str, relationship: bool) -> Self {
        if relationship {
            Self::new(format!("/{}/{}/relationships/{}", resource, id, name))
        } else {
            Self::new(format!("/{}/{}/{}", resource, id, name))
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LinkObject {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkRepr {
    Href(String),
    Object(LinkObject),
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.meta {
            None => serializer.serialize_str(&self.href),
            Some(meta) => {
                LinkObject { href: self.href.clone(), meta: Some(meta.clone()) }.serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match LinkRepr::deserialize(deserializer)? {
            LinkRepr::Href(href) => Link::new(href),
            LinkRepr::Object(object) => Link { href: object.href, meta: object.meta },
        })
    }
}
