//! `#[jsh]` and `#[serde]` attribute parsing
//!
//! Only the serde attributes that change how a field is addressed in JSON are read:
//! `rename`, `skip`, `skip_deserializing`, `flatten` and the container's `rename_all`.
//! Everything else inside `#[serde(...)]` is consumed and ignored.

use crate::case::RenameRule;
use syn::meta::ParseNestedMeta;
use syn::{token, Attribute, Expr, LitStr, Result, Token};

#[derive(Debug, Default)]
pub struct FieldAttributes {
    /// Every `#[jsh("...")]` on the field, joined with `,`
    pub tag: Option<String>,
    pub rename: Option<String>,
    pub skip: bool,
    pub flatten: bool,
}

#[derive(Debug, Default)]
pub struct ContainerAttributes {
    pub rename_all: Option<RenameRule>,
}

pub fn parse_field_attributes(attrs: &[Attribute]) -> Result<FieldAttributes> {
    let mut parsed = FieldAttributes::default();
    let mut tags = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("jsh") {
            let tag: LitStr = attr.parse_args()?;
            tags.push(tag.value());
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(rename) = deserialize_value(&meta)? {
                        parsed.rename = Some(rename);
                    }
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    parsed.skip = true;
                } else if meta.path.is_ident("flatten") {
                    parsed.flatten = true;
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            })?;
        }
    }

    if !tags.is_empty() {
        parsed.tag = Some(tags.join(","));
    }
    Ok(parsed)
}

pub fn parse_container_attributes(attrs: &[Attribute]) -> Result<ContainerAttributes> {
    let mut parsed = ContainerAttributes::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(rule) = deserialize_value(&meta)? {
                    parsed.rename_all = Some(rule.parse().map_err(|err: String| meta.error(err))?);
                }
            } else {
                skip_meta(&meta)?;
            }
            Ok(())
        })?;
    }

    Ok(parsed)
}

/// Value of `key = "..."` or the `deserialize` half of `key(serialize = "..", deserialize = "..")`
fn deserialize_value(meta: &ParseNestedMeta) -> Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let value: LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }

    let mut found = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("deserialize") {
            let value: LitStr = inner.value()?.parse()?;
            found = Some(value.value());
        } else {
            skip_meta(&inner)?;
        }
        Ok(())
    })?;
    Ok(found)
}

fn skip_meta(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}
