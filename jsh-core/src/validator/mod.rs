//! Attribute and relationship validation
//!
//! [`Validator`] reconciles three sources: the fields a model declares (with their
//! `#[jsh]` tags), the raw attribute keys actually present in the request, and the
//! relationships supplied alongside them. It binds relationship linkage into the model
//! and returns either every matched path or every violation, never both.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsh_core::{Action, Relationships, Validator};
//!
//! let raw = br#"{"username": "bob"}"#;
//! let mut user: User = serde_json::from_slice(raw)?;
//! let matched = Validator::new(Action::Create).validate(&mut user, raw, &Relationships::new())?;
//! assert_eq!(matched, ["username"]);
//! ```

mod raw;
mod relationship;
mod walker;

use crate::document::Relationships;
use crate::error::{ErrorList, FieldError};
use crate::model::{Bindable, Resource, Shape};
use crate::tag::Action;
use walker::Walker;

/// Validates models for one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    action: Action,
}

impl Validator {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Validate `model` against the raw attributes it was decoded from.
    ///
    /// Relationship fields of the model are assigned from `relationships` as a side
    /// effect. The caller's relationship map is left untouched; names no field consumed
    /// are reported as unknown relationships.
    pub fn validate(
        &self,
        model: &mut dyn Bindable,
        raw_attributes: &[u8],
        relationships: &Relationships,
    ) -> Result<Vec<String>, ErrorList> {
        let resource = match root_resource(model) {
            Ok(resource) => resource,
            Err(detail) => {
                let error = FieldError::internal("", format!("The argument to {} {}", self.action, detail));
                log::warn!("Validation aborted: {}", error.detail);
                return Err(error.into());
            }
        };

        let type_name = resource.schema().type_name();
        log::debug!(
            "Validating {} for {} ({} attribute bytes, {} relationships)",
            type_name,
            self.action,
            raw_attributes.len(),
            relationships.len()
        );

        let mut walker = Walker::new(self.action, relationships);
        let (matched, mut errors) = match walker.walk_struct("", resource, raw_attributes) {
            Ok(matched) => (matched, Vec::new()),
            Err(errors) => (Vec::new(), errors),
        };
        errors.extend(walker.into_unconsumed().into_iter().map(FieldError::unknown_relationship));

        if errors.is_empty() {
            log::debug!("{} valid for {}: {} paths matched", type_name, self.action, matched.len());
            return Ok(matched);
        }

        for error in errors.iter().filter(|error| error.is_internal()) {
            log::warn!("Model declaration error in {}: {}", type_name, error);
        }
        log::debug!("{} invalid for {}: {} errors", type_name, self.action, errors.len());
        Err(ErrorList(errors))
    }
}

/// Validate `model` for `action`, see [`Validator::validate`]
pub fn validate(
    model: &mut dyn Bindable,
    action: Action,
    raw_attributes: &[u8],
    relationships: &Relationships,
) -> Result<Vec<String>, ErrorList> {
    Validator::new(action).validate(model, raw_attributes, relationships)
}

fn root_resource(model: &mut dyn Bindable) -> Result<&mut dyn Resource, &'static str> {
    match model.shape() {
        Shape::Struct(resource) => Ok(resource),
        Shape::Optional(Some(inner)) => root_resource(inner),
        Shape::Optional(None) => Err("must not be None"),
        _ => Err("must be a struct"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_rejects_non_struct_model() {
        let mut model = String::from("non-struct type");
        let errors = Validator::new(Action::Create)
            .validate(&mut model, b"{}", &Relationships::new())
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Internal);
        assert_eq!(errors[0].detail, "The argument to create must be a struct");
    }

    #[test]
    fn test_rejects_empty_optional_model() {
        let mut model: Option<String> = None;
        let errors = validate(&mut model, Action::Update, b"{}", &Relationships::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_internal());
        assert_eq!(errors[0].detail, "The argument to update must not be None");
    }

    #[test]
    fn test_rejects_list_model() {
        let mut model: Vec<u32> = vec![1];
        let errors = validate(&mut model, Action::Create, b"[1]", &Relationships::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_internal());
    }
}
