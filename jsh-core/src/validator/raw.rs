//! One-level decoding of raw attribute JSON
//!
//! Each level is decoded only into its keys (or elements). Values stay as borrowed
//! [`RawValue`] slices until the walker descends into them.

use serde_json::value::RawValue;
use std::collections::BTreeMap;

pub(crate) type RawFields<'a> = BTreeMap<String, &'a RawValue>;

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(u8::is_ascii_whitespace)
}

/// Decode a JSON object into its members. Missing or `null` input is an empty object.
pub(crate) fn decode_object(raw: &[u8]) -> Result<RawFields<'_>, serde_json::Error> {
    if is_blank(raw) {
        return Ok(RawFields::new());
    }
    let fields: Option<RawFields<'_>> = serde_json::from_slice(raw)?;
    Ok(fields.unwrap_or_default())
}

/// Decode a JSON array into its elements. Missing or `null` input is an empty array.
pub(crate) fn decode_array(raw: &[u8]) -> Result<Vec<&RawValue>, serde_json::Error> {
    if is_blank(raw) {
        return Ok(Vec::new());
    }
    let items: Option<Vec<&RawValue>> = serde_json::from_slice(raw)?;
    Ok(items.unwrap_or_default())
}

pub(crate) fn bytes(value: Option<&RawValue>) -> &[u8] {
    match value {
        Some(value) => value.get().as_bytes(),
        None => &[],
    }
}

pub(crate) fn is_null(value: &RawValue) -> bool {
    value.get().trim() == "null"
}

/// Remove the member whose key matches `name`, preferring an exact match over a
/// case-insensitive one
pub(crate) fn take_matching<'a>(fields: &mut RawFields<'a>, name: &str) -> Option<&'a RawValue> {
    if let Some(value) = fields.remove(name) {
        return Some(value);
    }
    let key = fields.keys().find(|key| crate::model::names_match(key, name))?.clone();
    fields.remove(&key)
}
