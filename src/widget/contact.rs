//! Contact capture: the form fields, validation, and the captured value.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `local@domain.tld`-shaped addresses with no whitespace.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

/// Contact details sent to the backend as `user_info`.
///
/// Only built through [`ContactForm::validate`], so `name` and `email` are
/// always non-empty and `email` is syntactically plausible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
}

/// Raw, untrimmed field values as typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
}

/// Why a contact form submission was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Name and email are required.")]
    MissingRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Submitted while no contact form is open.
    #[error("No contact form is open.")]
    NoFormOpen,
}

impl ContactForm {
    /// Create a form pre-filled with the required fields only.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Trim every field and check the required ones.
    pub fn validate(&self) -> Result<ContactInfo, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(ContactError::MissingRequired);
        }
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactInfo {
            name: name.to_string(),
            email: email.to_string(),
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
        })
    }
}

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_fields() {
        let form = ContactForm::new("  Ann ", " ann@example.com\t")
            .with_company(" Acme ")
            .with_role("");

        let info = form.validate().unwrap();
        assert_eq!(info.name, "Ann");
        assert_eq!(info.email, "ann@example.com");
        assert_eq!(info.company, "Acme");
        assert_eq!(info.role, "");
    }

    #[test]
    fn test_missing_required_fields() {
        assert_eq!(
            ContactForm::new("   ", "ann@example.com").validate(),
            Err(ContactError::MissingRequired)
        );
        assert_eq!(
            ContactForm::new("Ann", "").validate(),
            Err(ContactError::MissingRequired)
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["not-an-email", "ann@example", "ann @example.com", "@example.com", "a@b@c.d"] {
            assert_eq!(
                ContactForm::new("Ann", email).validate(),
                Err(ContactError::InvalidEmail),
                "{email} should be rejected"
            );
        }
        assert!(is_valid_email("ann.lee+jobs@mail.example.co"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ContactError::MissingRequired.to_string(),
            "Name and email are required."
        );
        assert_eq!(
            ContactError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }
}
