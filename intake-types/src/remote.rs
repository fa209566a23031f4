use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The logical tables the landing page writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Caregiver survey submissions.
    SurveyResponses,
    /// Partner inquiries.
    CollaboratorSubmissions,
    /// Waitlist signups.
    Signups,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SurveyResponses => "survey_responses",
            Self::CollaboratorSubmissions => "collaborator_submissions",
            Self::Signups => "signups",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of an inserted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertReceipt {
    /// Row id, when the backend returns one.
    pub id: Option<String>,
}

impl InsertReceipt {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

/// Opaque handle proving that a phone number was verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiedIdentity(String);

impl VerifiedIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerifiedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An analytics event with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl TrackedEvent {
    /// Create an event with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Map::new(),
        }
    }

    /// Add a property.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Look up a property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
