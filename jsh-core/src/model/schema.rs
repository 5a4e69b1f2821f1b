//! Per-type field schema
//!
//! `#[derive(Resource)]` emits a static table of [`FieldDecl`] and decodes it once into a
//! [`ModelSchema`] held in a `OnceLock`, so tags are never reparsed during validation.

use crate::model::lower_first;
use crate::tag::{FieldTag, Relation};

/// Field declaration as written in the source, emitted by the derive macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Rust field identifier
    pub ident: &'static str,
    /// External name after serde `rename` / `rename_all`
    pub name: &'static str,
    /// Ignored by deserialization (`#[serde(skip)]` or `skip_deserializing`)
    pub skipped: bool,
    /// `#[serde(flatten)]`
    pub flatten: bool,
    /// Raw `#[jsh("...")]` tag, empty when absent
    pub tag: &'static str,
}

/// Decoded field of a [`ModelSchema`]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    ident: &'static str,
    name: &'static str,
    skipped: bool,
    flatten: bool,
    tag: FieldTag,
}

impl FieldSchema {
    pub fn from_decl(decl: &FieldDecl) -> Self {
        Self {
            ident: decl.ident,
            name: decl.name,
            skipped: decl.skipped,
            flatten: decl.flatten,
            tag: FieldTag::parse(decl.tag),
        }
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attribute key, `None` when deserialization ignores the field
    pub fn key(&self) -> Option<&'static str> {
        (!self.skipped).then_some(self.name)
    }

    pub fn is_flatten(&self) -> bool {
        self.flatten
    }

    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }

    pub fn relation(&self) -> Relation {
        self.tag.relation()
    }

    /// Name used for this field under `/data/relationships`
    pub fn relationship_path(&self) -> String {
        lower_first(self.name)
    }
}

/// Field schema of a resource type, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    type_name: &'static str,
    fields: Vec<FieldSchema>,
}

impl ModelSchema {
    pub fn new(type_name: &'static str, decls: &[FieldDecl]) -> Self {
        log::trace!("Building schema for {} ({} fields)", type_name, decls.len());
        Self { type_name, fields: decls.iter().map(FieldSchema::from_decl).collect() }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldSchema> {
        self.fields.get(index)
    }

    pub fn position_by_ident(&self, ident: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.ident == ident)
    }

    pub fn relationships(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|field| field.relation().is_relationship())
    }
}
