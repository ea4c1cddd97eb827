//! Request validation decoupled from transport.
//!
//! Rules are declared with `validator` derives on the DTOs; this module turns
//! the outcome into a [`FieldErrors`] list the API layer can render.

use validator::{Validate, ValidationErrors};

use crate::errors::FieldErrors;

/// Run the declared rules for `value`.
pub fn validate<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    value.validate().map_err(|e| to_field_errors(&e))
}

fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();

    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("The {} field is invalid.", field));
            fields.add(field.to_string(), message);
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUser, UpdateUser};

    fn create(name: &str, email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_create() {
        assert!(validate(&create("Ann", "ann@x.com", "secret123")).is_ok());
    }

    #[test]
    fn test_create_reports_every_bad_field() {
        let errors = validate(&create("", "not-an-email", "short")).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();

        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn test_name_too_long() {
        let long_name = "a".repeat(256);
        let errors = validate(&create(&long_name, "ann@x.com", "secret123")).unwrap_err();

        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_update_all_fields_optional() {
        assert!(validate(&UpdateUser::default()).is_ok());
    }

    #[test]
    fn test_update_validates_present_fields() {
        let update = UpdateUser {
            email: Some("broken".to_string()),
            password: Some("1234567".to_string()),
            ..Default::default()
        };
        let errors = validate(&update).unwrap_err();

        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert!(errors.get("name").is_none());
    }
}
