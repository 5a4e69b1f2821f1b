//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use jsh_core::prelude::*;
//! ```

// === Resource trait, and its derive macro with the `macros` feature ===
pub use crate::Resource;

// === Validation ===
pub use crate::error::{ErrorKind, ErrorList, FieldError};
pub use crate::tag::Action;
pub use crate::validator::{validate, Validator};

// === Model traits ===
pub use crate::model::{Bindable, Patch};

// === Documents ===
pub use crate::document::{
    apply_update, ErrorObject, IdObject, Linkage, Object, ProcessError, Relationship, Relationships,
};

// === Configuration ===
pub use crate::config::JshConfig;
pub use crate::logging::{init_logging, LoggingConfig};
