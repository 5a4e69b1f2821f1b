//! jsh - Core
//!
//! Attribute and relationship validation for JSON:API request documents.
//!
//! # Overview
//!
//! A JSON:API server receives resources as `{"type", "id", "attributes", "relationships"}`
//! objects. jsh binds such an object onto a plain Rust struct and checks it against the
//! rules declared on the struct's fields: which attributes and relationships a client may
//! set when creating or updating the resource, and which of them are required.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use jsh_core::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Resource, Deserialize, Default)]
//! #[serde(default)]
//! struct User {
//!     #[serde(skip)]
//!     #[jsh("one,create,update")]
//!     group: Option<IdObject>,
//!     #[jsh("create/required,update")]
//!     username: String,
//! }
//!
//! let object: Object = serde_json::from_str(body)?;
//! let mut user = User::default();
//! match object.process_create("users", &mut user) {
//!     Ok(matched) => println!("creating with {:?}", matched),
//!     Err(err) => respond(err.to_error_objects(&config.errors)),
//! }
//! ```
//!
//! # Architecture
//!
//! - [`tag`] - `#[jsh("...")]` directive decoding
//! - [`model`] - the [`Bindable`] visitor and per-type [`ModelSchema`](model::ModelSchema)
//! - [`validator`] - the recursive walker producing matched paths or [`ErrorList`]
//! - [`document`] - resource objects, linkage and JSON:API error objects
//! - [`config`] / [`logging`] - ambient configuration and structured logging

extern crate self as jsh_core;

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod tag;
pub mod validator;

pub use document::{
    apply_update, ErrorObject, IdObject, Linkage, Object, ProcessError, Relationship, Relationships,
};
pub use error::{ErrorKind, ErrorList, FieldError};
pub use model::{Bindable, Patch, Resource, Shape};
pub use tag::{Action, FieldTag};
pub use validator::{validate, Validator};

#[cfg(feature = "macros")]
pub use jsh_macros::Resource;
