//! Field rules for contact submissions

use crate::{ContactForm, NewContact};
use thiserror::Error;

pub const MSG_FIELD_REQUIRED: &str = "field required";
pub const MSG_NAME_EMPTY: &str = "name must not be empty";
pub const MSG_NAME_TOO_SHORT: &str = "name must be at least 2 characters";
pub const MSG_PHONE_EMPTY: &str = "phone must not be empty";
pub const MSG_PHONE_FORMAT: &str = "invalid phone number format";
pub const MSG_GRADE_EMPTY: &str = "grade must not be empty";

const NAME_MIN_CHARS: usize = 2;
const PHONE_LEN: usize = 11;

/// Submission field a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Grade,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Phone => write!(f, "phone"),
            Field::Grade => write!(f, "grade"),
        }
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field was absent from the body
    Missing,
    /// The field was present but broke a rule
    ValueError,
}

impl std::fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "missing"),
            FieldErrorKind::ValueError => write!(f, "value_error"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn missing(field: Field) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Missing,
            message: MSG_FIELD_REQUIRED,
        }
    }

    fn invalid(field: Field, message: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::ValueError,
            message,
        }
    }
}

/// Every field that failed, in name, phone, grade order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid submission: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ContactForm {
    /// Check every field and return the trimmed values.
    ///
    /// Fields are checked independently; all failures are collected so the
    /// caller can report them together.
    pub fn validate(&self) -> Result<NewContact, ValidationError> {
        let name = validate_name(self.name.as_deref());
        let phone = validate_phone(self.phone.as_deref());
        let grade = validate_grade(self.grade.as_deref());

        match (name, phone, grade) {
            (Ok(name), Ok(phone), Ok(grade)) => Ok(NewContact { name, phone, grade }),
            (name, phone, grade) => Err(ValidationError {
                errors: [name.err(), phone.err(), grade.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            }),
        }
    }
}

/// Name must be non-blank and at least two characters once trimmed.
pub fn validate_name(raw: Option<&str>) -> Result<String, FieldError> {
    let name = required(Field::Name, raw, MSG_NAME_EMPTY)?;
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(FieldError::invalid(Field::Name, MSG_NAME_TOO_SHORT));
    }
    Ok(name.to_string())
}

/// Mainland mobile number: 11 ASCII digits starting with '1'.
pub fn validate_phone(raw: Option<&str>) -> Result<String, FieldError> {
    let phone = required(Field::Phone, raw, MSG_PHONE_EMPTY)?;
    // ASCII digits only: full-width and other Unicode digits are refused
    let well_formed = phone.len() == PHONE_LEN
        && phone.starts_with('1')
        && phone.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(FieldError::invalid(Field::Phone, MSG_PHONE_FORMAT));
    }
    Ok(phone.to_string())
}

/// Any non-blank text is a valid grade.
pub fn validate_grade(raw: Option<&str>) -> Result<String, FieldError> {
    required(Field::Grade, raw, MSG_GRADE_EMPTY).map(str::to_string)
}

fn required<'a>(
    field: Field,
    raw: Option<&'a str>,
    empty_message: &'static str,
) -> Result<&'a str, FieldError> {
    let value = raw.ok_or_else(|| FieldError::missing(field))?.trim();
    if value.is_empty() {
        return Err(FieldError::invalid(field, empty_message));
    }
    Ok(value)
}
