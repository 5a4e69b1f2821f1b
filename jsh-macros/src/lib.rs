//! Procedural macros for jsh
//!
//! `#[derive(Resource)]` lets a plain struct be validated against JSON:API request
//! documents by `jsh-core`.

use proc_macro::TokenStream;

mod attributes;
mod case;
mod resource;

/// Derive macro for jsh resources
///
/// Generates the `Resource`, `Bindable` and `Patch` implementations from the struct's
/// fields. Each field may carry a `#[jsh("...")]` tag:
///
/// - `create`, `update`: the field may be set by that action, `/required` makes it mandatory
/// - `one`, `many`: the field is a to-one or to-many relationship and must be `#[serde(skip)]`
///
/// # Example
///
/// ```rust,ignore
/// use jsh_core::{IdObject, Resource};
/// use serde::Deserialize;
/// use std::collections::HashMap;
///
/// #[derive(Resource, Deserialize, Default)]
/// #[serde(default)]
/// #[serde(rename_all = "camelCase")]
/// struct Article {
///     #[jsh("create/required,update")]
///     title: String,
///     #[jsh("create,update")]
///     body_text: String,
///     #[serde(skip)]
///     #[jsh("one,create/required")]
///     author: Option<IdObject>,
///     #[serde(skip)]
///     #[jsh("many,create,update")]
///     tags: HashMap<String, IdObject>,
/// }
/// ```
#[proc_macro_derive(Resource, attributes(jsh))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    resource::derive_resource(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
