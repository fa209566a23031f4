//! Core types for the intake crate.
//!
//! This crate provides the foundational types for describing the landing page
//! intake flows:
//! - `SurveyDefinition` and `StepDefinition` - The ordered survey structure
//! - `Question` and `QuestionKind` - Individual questions and their controls
//! - `Field` and `FieldValue` - Answer keys and the values written to them
//! - `RemoteStore` - The seam to the hosted backend

mod field;
pub use field::Field;

mod field_value;
pub use field_value::FieldValue;

mod question;
pub use question::{
    AnyOfQuestion, Choice, InputQuestion, InputType, MultilineQuestion, OTHER_CHOICE,
    OneOfQuestion, Question, QuestionKind, ShownWhen,
};

mod survey_definition;
pub use survey_definition::{StepDefinition, SurveyDefinition};

mod error;
pub use error::{FieldError, RemoteError};

mod remote;
pub use remote::{InsertReceipt, Table, TrackedEvent, VerifiedIdentity};

mod traits;
pub use traits::RemoteStore;
