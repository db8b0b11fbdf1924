//! Contact domain model.
//!
//! # Responsibility
//! - Define the single record shape exchanged with HTTP callers and storage.
//! - Own the field-level validation rules applied before every write.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never reused.
//! - All four text fields are non-empty, `email` contains `@` and
//!   `phone_number` is exactly 10 characters (Unicode scalar values) long.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a contact row.
pub type ContactId = i64;

/// Required length of `phone_number`, in characters.
pub const PHONE_NUMBER_LEN: usize = 10;

/// Canonical contact record.
///
/// Every field defaults when missing from JSON input, so an absent value
/// surfaces as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    /// Ignored on create; overridden by the path id on update.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Field-level validation failure for a contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// A required field is empty; carries the JSON field name.
    MissingField(&'static str),
    /// `email` has no `@`.
    InvalidEmail(String),
    /// `phone_number` is not exactly 10 characters.
    InvalidPhoneNumber { length: usize },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidEmail(email) => write!(f, "email `{email}` is missing `@`"),
            Self::InvalidPhoneNumber { length } => write!(
                f,
                "phone number must be {PHONE_NUMBER_LEN} characters, got {length}"
            ),
        }
    }
}

impl Error for ContactValidationError {}

impl ContactRecord {
    /// Creates an unsaved record; `id` stays `0` until the store assigns one.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Checks the write-time field rules, stopping at the first failure.
    ///
    /// Order: empty fields, then email shape, then phone number length.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let required = [
            ("email", self.email.as_str()),
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("phoneNumber", self.phone_number.as_str()),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(ContactValidationError::MissingField(field));
        }

        if !self.email.contains('@') {
            return Err(ContactValidationError::InvalidEmail(self.email.clone()));
        }

        let length = self.phone_number.chars().count();
        if length != PHONE_NUMBER_LEN {
            return Err(ContactValidationError::InvalidPhoneNumber { length });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactRecord, ContactValidationError};

    fn homer() -> ContactRecord {
        ContactRecord::new("Homer", "Simpson", "homer@gmail.com", "1234567890")
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(homer().validate(), Ok(()));
    }

    #[test]
    fn empty_field_is_reported_before_format_checks() {
        let record = ContactRecord::new("Bart", "", "bart.simpson@gmail.com", "");
        assert_eq!(
            record.validate(),
            Err(ContactValidationError::MissingField("lastName"))
        );
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut record = homer();
        record.email = "email".to_string();
        assert!(matches!(
            record.validate(),
            Err(ContactValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn phone_number_length_counts_characters() {
        let mut record = homer();
        record.phone_number = "123".to_string();
        assert_eq!(
            record.validate(),
            Err(ContactValidationError::InvalidPhoneNumber { length: 3 })
        );

        record.phone_number = "１２３４５６７８９０".to_string();
        assert_eq!(record.validate(), Ok(()));

        record.phone_number = "12345678😀".to_string();
        assert_eq!(
            record.validate(),
            Err(ContactValidationError::InvalidPhoneNumber { length: 9 })
        );
    }
}
