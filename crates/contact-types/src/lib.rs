//! Contact Types - Pure type definitions for the contact form backend
//!
//! This crate holds the wire types shared by the server and anything that
//! talks to it, plus the field rules a submission has to pass before it is
//! stored. It has no async runtime or database dependencies.

pub mod validation;

pub use validation::*;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub grade: String,
    /// ISO-8601 timestamp assigned by the server at insertion time
    pub created_at: String,
}

/// Raw submission body as posted by the website.
///
/// Every field is optional so that a missing field is reported by
/// [`ContactForm::validate`] alongside the other field errors instead of
/// failing the whole body. Only a JSON object is accepted; arrays and
/// scalars fail to deserialize.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
}

impl<'de> Deserialize<'de> for ContactForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ContactFormVisitor)
    }
}

struct ContactFormVisitor;

impl<'de> Visitor<'de> for ContactFormVisitor {
    type Value = ContactForm;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "an object with name, phone and grade")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ContactForm, A::Error> {
        let mut form = ContactForm::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => form.name = map.next_value()?,
                "phone" => form.phone = map.next_value()?,
                "grade" => form.grade = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(form)
    }
}

impl ContactForm {
    pub fn new(name: &str, phone: &str, grade: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            grade: Some(grade.to_string()),
        }
    }
}

/// A submission that passed validation, with every field trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub grade: String,
}

/// Payload echoed back after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub grade: String,
}

impl CreatedContact {
    pub fn new(id: i64, contact: NewContact) -> Self {
        Self {
            id,
            name: contact.name,
            phone: contact.phone,
            grade: contact.grade,
        }
    }
}

/// Response to `POST /api/contact`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub data: CreatedContact,
}

/// Response to the health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Number of submissions received on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: i64,
}

/// Response to `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total_contacts: i64,
    /// Most recent dates first, at most [`RECENT_DAYS`] entries
    pub recent_7_days: Vec<DailyCount>,
}

/// How many distinct dates the stats histogram reports
pub const RECENT_DAYS: i64 = 7;
