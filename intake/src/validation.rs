//! Field-level validation rules.
//!
//! Every rule is a pure function over the answers. Step validators in
//! [`crate::steps`] are built from these.

use std::sync::LazyLock;

use intake_types::{Field, OTHER_CHOICE};
use regex::Regex;

use crate::answers::SurveyAnswers;
use crate::content_filter::{self, RESPECTFUL_LANGUAGE};
use crate::country::Country;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("phone separator pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern"));

static US_ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("US ZIP pattern"));

static CA_POSTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9][A-Z] [0-9][A-Z][0-9]$").expect("Canadian postal pattern"));

/// A rule that blocked advancing past a step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The field the respondent needs to fix.
    pub field: Field,
    /// What to tell the respondent.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type Validation = Result<(), ValidationError>;

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email) && has_proper_domain(email)
}

fn has_proper_domain(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if let [_, domain] = parts.as_slice() {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() >= 2 && labels[0].chars().count() < 2 {
            return false;
        }
    }
    true
}

/// Check an email, distinguishing a malformed address from a too-short domain.
pub fn check_email(email: &str) -> Validation {
    if !EMAIL.is_match(email) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address (e.g., john@example.com)",
        ));
    }
    if !has_proper_domain(email) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address with a proper domain (e.g., john@example.com)",
        ));
    }
    Ok(())
}

/// Drop spaces, dashes and parentheses from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    PHONE_SEPARATORS.replace_all(phone, "").into_owned()
}

/// Whether `phone` is an optional `+` and 1–16 digits, not starting with 0.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(&normalize_phone(phone))
}

/// Check a postal code against the country's format.
///
/// Only the United States and Canada have a format; anything goes elsewhere.
pub fn check_postal_code(country: Option<Country>, zipcode: &str) -> Validation {
    match country {
        Some(Country::UnitedStates) if !US_ZIP.is_match(zipcode) => Err(ValidationError::new(
            Field::Zipcode,
            "Please enter a valid US ZIP code (e.g., 12345 or 12345-6789)",
        )),
        Some(Country::Canada) if !CA_POSTAL.is_match(&zipcode.to_uppercase()) => {
            Err(ValidationError::new(
                Field::Zipcode,
                "Please enter a valid Canadian postal code (e.g., K1A 0A6)",
            ))
        }
        _ => Ok(()),
    }
}

/// The identity step: name, email and country required, plus format checks
/// on whatever optional contact details were given.
pub fn check_identity(answers: &SurveyAnswers) -> Validation {
    for field in [Field::Name, Field::Email, Field::Country] {
        if answers.text(field).trim().is_empty() {
            return Err(ValidationError::new(
                field,
                "Please fill in all required fields: Name, Email, and Country",
            ));
        }
    }

    let country = answers.country();
    if country.is_some_and(|c| c.requires_region()) && answers.text(Field::State).is_empty() {
        return Err(ValidationError::new(Field::State, "Please select your state"));
    }

    check_email(answers.text(Field::Email))?;

    let phone = answers.text(Field::PhoneNumber);
    if !phone.is_empty() && !is_valid_phone(phone) {
        return Err(ValidationError::new(
            Field::PhoneNumber,
            "Please enter a valid phone number",
        ));
    }

    let zipcode = answers.text(Field::Zipcode);
    if !zipcode.is_empty() {
        check_postal_code(country, zipcode)?;
    }
    Ok(())
}

/// A free-text reflection: must not be blank and must pass the content filter.
pub fn check_reflection(answers: &SurveyAnswers, field: Field, blank_message: &str) -> Validation {
    let text = answers.text(field);
    if text.trim().is_empty() {
        return Err(ValidationError::new(field, blank_message));
    }
    if let Some(word) = content_filter::find_blocked(text) {
        tracing::debug!(%field, word, "free text rejected by content filter");
        return Err(ValidationError::new(field, RESPECTFUL_LANGUAGE));
    }
    Ok(())
}

/// A single select: something from `allowed` must be picked.
pub fn check_selected(
    answers: &SurveyAnswers,
    field: Field,
    allowed: &[&str],
    message: &str,
) -> Validation {
    let value = answers.text(field);
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(field, message))
    }
}

/// A multi-select: at least one option, and text alongside `other`.
pub fn check_multi_select(
    answers: &SurveyAnswers,
    field: Field,
    empty_message: &str,
    other_message: &str,
) -> Validation {
    let selected = answers
        .choices(field)
        .map_err(|_| ValidationError::new(field, empty_message))?;
    if selected.is_empty() {
        return Err(ValidationError::new(field, empty_message));
    }
    if let Some(other) = field.other_text()
        && selected.iter().any(|v| v == OTHER_CHOICE)
        && answers.text(other).trim().is_empty()
    {
        return Err(ValidationError::new(other, other_message));
    }
    Ok(())
}
