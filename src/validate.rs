//! Field-level contact validation, used before saving an edited row and
//! before batch generation. These are form errors, not process failures:
//! an invalid field blocks only the save of its own record.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Contact;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{8,}$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    MalformedEmail,
    MalformedPhone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

/// Checks required fields and email/phone formats. An empty vec means the
/// contact is valid. Format checks are skipped for empty fields; those are
/// already reported as missing when required.
pub fn validate_contact(contact: &Contact) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let required: [(&'static str, &str); 4] = [
        ("firstName", &contact.first_name),
        ("lastName", &contact.last_name),
        ("email", &contact.email),
        ("phone", &contact.phone),
    ];
    for (field, value) in required {
        if value.is_empty() {
            errors.push(FieldError {
                field,
                kind: FieldErrorKind::Required,
            });
        }
    }

    if !contact.email.is_empty() && !EMAIL_RE.is_match(&contact.email) {
        errors.push(FieldError {
            field: "email",
            kind: FieldErrorKind::MalformedEmail,
        });
    }
    if !contact.phone.is_empty() && !PHONE_RE.is_match(&contact.phone) {
        errors.push(FieldError {
            field: "phone",
            kind: FieldErrorKind::MalformedPhone,
        });
    }

    errors
}
