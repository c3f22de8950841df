use crate::domain::{entities::Recipe, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_recipe(recipe: &Recipe) -> Result<(), DomainError> {
        recipe.validate()
    }
}
