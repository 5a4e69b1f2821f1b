//! Relationship linkage checks and assignment

use crate::document::{IdObject, Relationship};
use crate::error::{FieldError, DETAIL_INVALID_ID, DETAIL_MISSING_DATA, DETAIL_MULTIPLE_OBJECTS};
use crate::model::{BindError, Bindable};
use crate::tag::TagOptions;

/// Check a relationship against the field's options for the active action.
///
/// Returns the identifiers to assign, or `None` when the relationship was not supplied
/// and is not required.
pub(crate) fn check<'r>(
    name: &str,
    many: bool,
    relationship: Option<&'r Relationship>,
    options: Option<TagOptions>,
) -> Result<Option<&'r [IdObject]>, FieldError> {
    let Some(relationship) = relationship else {
        if options.is_some_and(|options| options.required) {
            return Err(FieldError::required_relationship(name));
        }
        return Ok(None);
    };

    let ids = relationship.ids();
    if ids.is_empty() {
        return Err(FieldError::invalid_linkage(name, DETAIL_MISSING_DATA));
    }
    if !many && ids.len() > 1 {
        return Err(FieldError::invalid_linkage(name, DETAIL_MULTIPLE_OBJECTS));
    }
    if options.is_none() {
        return Err(FieldError::forbidden_relationship(name));
    }
    Ok(Some(ids))
}

/// Assign checked identifiers to the relationship field
pub(crate) fn assign(
    name: &str,
    many: bool,
    field: &mut dyn Bindable,
    ids: &[IdObject],
) -> Result<(), FieldError> {
    let result = if many {
        field.bind_many(ids)
    } else {
        match ids.first() {
            Some(id) => field.bind_one(id),
            None => Ok(()),
        }
    };

    result.map_err(|err| match err {
        BindError::InvalidId(id) => {
            log::debug!("Relationship '{}' rejected id '{}'", name, id);
            FieldError::invalid_linkage(name, DETAIL_INVALID_ID)
        }
        other => FieldError::type_mismatch(name, other.to_string()),
    })
}
