//! Partner / collaborator inquiry form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use intake_types::{FieldError, RemoteError, RemoteStore, Table};

use crate::form::{FormOutcome, failure_notice};
use crate::notice::{Celebration, Notice};
use crate::validation::is_valid_email;

pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// A field of the collaborator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollaboratorField {
    Name,
    Organization,
    Role,
    Collaboration,
    Email,
}

impl CollaboratorField {
    pub const ALL: [CollaboratorField; 5] = [
        Self::Name,
        Self::Organization,
        Self::Role,
        Self::Collaboration,
        Self::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Organization => "organization",
            Self::Role => "role",
            Self::Collaboration => "collaboration",
            Self::Email => "email",
        }
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Organization => "Organization",
            Self::Role => "Your Role",
            Self::Collaboration => "How would you like to collaborate?",
            Self::Email => "Email Address",
        }
    }
}

impl fmt::Display for CollaboratorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollaboratorField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// One row of `collaborator_submissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollaboratorInquiry {
    pub name: String,
    pub organization: String,
    pub role: String,
    pub collaboration: String,
    pub email: String,
}

impl CollaboratorInquiry {
    fn slot(&mut self, field: CollaboratorField) -> &mut String {
        match field {
            CollaboratorField::Name => &mut self.name,
            CollaboratorField::Organization => &mut self.organization,
            CollaboratorField::Role => &mut self.role,
            CollaboratorField::Collaboration => &mut self.collaboration,
            CollaboratorField::Email => &mut self.email,
        }
    }

    pub fn get(&self, field: CollaboratorField) -> &str {
        match field {
            CollaboratorField::Name => &self.name,
            CollaboratorField::Organization => &self.organization,
            CollaboratorField::Role => &self.role,
            CollaboratorField::Collaboration => &self.collaboration,
            CollaboratorField::Email => &self.email,
        }
    }

    /// Every field filled in and a well-formed email.
    pub fn validate(&self) -> Result<(), Notice> {
        if CollaboratorField::ALL
            .iter()
            .any(|f| self.get(*f).trim().is_empty())
        {
            return Err(Notice::validation(MISSING_FIELDS));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(Notice::validation(INVALID_EMAIL));
        }
        Ok(())
    }
}

/// The collaborator form and whether it has been sent.
#[derive(Debug, Clone, Default)]
pub struct CollaboratorForm {
    inquiry: CollaboratorInquiry,
    submitted: bool,
}

impl CollaboratorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inquiry(&self) -> &CollaboratorInquiry {
        &self.inquiry
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn update_field(&mut self, field: CollaboratorField, value: impl Into<String>) {
        *self.inquiry.slot(field) = value.into();
    }

    /// Validate and insert into `collaborator_submissions`.
    pub async fn submit<R: RemoteStore + ?Sized>(&mut self, remote: &R) -> FormOutcome {
        if self.submitted {
            return FormOutcome::AlreadySubmitted;
        }
        if let Err(notice) = self.inquiry.validate() {
            return FormOutcome::Rejected(notice);
        }

        let result = match serde_json::to_value(&self.inquiry) {
            Ok(record) => remote.insert_record(Table::CollaboratorSubmissions, &record).await,
            Err(error) => Err(RemoteError::unexpected(error)),
        };

        match result {
            Ok(receipt) => {
                tracing::info!(id = ?receipt.id, organization = %self.inquiry.organization, "collaborator inquiry submitted");
                self.submitted = true;
                FormOutcome::Submitted {
                    receipt,
                    celebration: Celebration::burst(),
                }
            }
            Err(error) => {
                tracing::warn!(%error, "collaborator submission failed");
                FormOutcome::Failed(failure_notice(&error))
            }
        }
    }
}
