//! Store profile edited on the settings page.

use crate::{
    core::validation::{
        Field, FieldErrors, is_valid_email, is_valid_phone, is_valid_postal_code, require,
    },
    errors::Result,
};
use serde::{Deserialize, Serialize};

/// Contact details of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Brazilian postal code (CEP)
    pub postal_code: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Ótica Policromático".to_string(),
            phone: "(11) 3333-4444".to_string(),
            email: "contato@policromatico.com".to_string(),
            address: "Rua das Óticas, 123 - Centro".to_string(),
            postal_code: "01000-000".to_string(),
        }
    }
}

impl StoreProfile {
    /// Collects every field error so the form can show them together.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, Field::Name, &self.name);
        if !is_valid_email(self.email.trim()) {
            errors.add(Field::Email, "invalid e-mail");
        }
        if !is_valid_phone(&self.phone) {
            errors.add(Field::Phone, "phone needs area code plus 8 or 9 digits");
        }
        if !is_valid_postal_code(&self.postal_code) {
            errors.add(Field::PostalCode, "postal code must have 8 digits");
        }
        errors
    }

    /// # Errors
    /// Returns `Error::Validation` when any field fails.
    pub fn validate(&self) -> Result<()> {
        self.field_errors().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(StoreProfile::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_reported_together() {
        let profile = StoreProfile {
            email: "contato".to_string(),
            phone: "3333-4444".to_string(),
            postal_code: "0100".to_string(),
            ..StoreProfile::default()
        };
        let errors = profile.field_errors();
        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::Email).is_some());
        assert!(errors.get(Field::Phone).is_some());
        assert!(errors.get(Field::PostalCode).is_some());
    }
}
