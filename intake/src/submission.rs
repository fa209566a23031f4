//! Maps survey answers onto the `survey_responses` row and sends it.

use serde::Serialize;

use intake_types::{
    Field, InsertReceipt, OTHER_CHOICE, RemoteError, RemoteStore, Table, TrackedEvent,
    VerifiedIdentity,
};

use crate::answers::SurveyAnswers;
use crate::notice::Notice;

/// `survey_type` reported with every tracked survey event.
pub const SURVEY_TYPE: &str = "caregiver";

pub const SUBMISSION_FAILED: &str = "There was an error submitting your survey. Please try again.";
pub const UNEXPECTED_FAILURE: &str = "There was an unexpected error. Please try again.";

/// Comfort level stored when the answer is not a number.
const DEFAULT_TECH_COMFORT: i64 = 3;

/// One row of `survey_responses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub phone_number: String,
    pub relationship: String,
    pub care_duration: String,
    pub support_areas: Vec<String>,
    pub challenges: Vec<String>,
    pub goals: Vec<String>,
    pub tech_comfort: i64,
    pub additional_comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<VerifiedIdentity>,
}

impl SubmissionRecord {
    pub fn from_answers(answers: &SurveyAnswers, identity: Option<&VerifiedIdentity>) -> Self {
        let caring_for = choices(answers, Field::WhoCaringFor);
        let communication = choices(answers, Field::CommunicationPreference);

        let relationship = if caring_for.iter().any(|v| v == OTHER_CHOICE) {
            answers.text(Field::OtherWhoCaringFor).to_string()
        } else {
            caring_for.join(", ")
        };

        let goals = [Field::WhatWouldSupport, Field::AiHelpfulSupport]
            .into_iter()
            .map(|f| answers.text(f))
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();

        let additional_comments = format!(
            "Name: {}, Email: {}, Country: {}, State: {}, Communication: {}, Human Services: {}, Final Thoughts: {}",
            answers.text(Field::Name),
            answers.text(Field::Email),
            answers.text(Field::Country),
            answers.text(Field::State),
            communication.join(", "),
            answers.text(Field::HumanServicesOpenness),
            answers.text(Field::FinalThoughts),
        );

        Self {
            phone_number: answers.text(Field::PhoneNumber).to_string(),
            relationship,
            care_duration: answers.text(Field::UrgencyLevel).to_string(),
            support_areas: communication,
            challenges: vec![answers.text(Field::EmotionalChallenges).to_string()],
            goals,
            tech_comfort: parse_comfort(answers.text(Field::AiComfort)),
            additional_comments,
            user_id: identity.cloned(),
        }
    }
}

fn choices(answers: &SurveyAnswers, field: Field) -> Vec<String> {
    answers.choices(field).map(<[String]>::to_vec).unwrap_or_default()
}

/// Comfort as an integer; zero or anything unparsable becomes 3.
fn parse_comfort(value: &str) -> i64 {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n != 0)
        .unwrap_or(DEFAULT_TECH_COMFORT)
}

/// Build the record from `answers`, insert it once and track the outcome.
///
/// On failure the returned notice is safe to show as-is; the caller may
/// call this again with the same answers.
pub async fn submit<R: RemoteStore + ?Sized>(
    remote: &R,
    answers: &SurveyAnswers,
    identity: Option<&VerifiedIdentity>,
) -> Result<InsertReceipt, Notice> {
    let record = SubmissionRecord::from_answers(answers, identity);

    let result = match serde_json::to_value(&record) {
        Ok(value) => remote.insert_record(Table::SurveyResponses, &value).await,
        Err(error) => Err(RemoteError::unexpected(error)),
    };

    match result {
        Ok(receipt) => {
            tracing::info!(id = ?receipt.id, verified = identity.is_some(), "survey submitted");
            remote
                .track_event(
                    TrackedEvent::new("survey_submission_success")
                        .with("survey_type", SURVEY_TYPE)
                        .with("user_verified", identity.is_some())
                        .with("caregiving_type", choices(answers, Field::WhoCaringFor).join(", ")),
                )
                .await;
            Ok(receipt)
        }
        Err(error) => {
            tracing::warn!(%error, "survey submission failed");
            remote
                .track_event(
                    TrackedEvent::new("survey_submission_failed")
                        .with("survey_type", SURVEY_TYPE)
                        .with("error", error.to_string()),
                )
                .await;
            let message = if error.is_unexpected() {
                UNEXPECTED_FAILURE
            } else {
                SUBMISSION_FAILED
            };
            Err(Notice::submission_failed(message))
        }
    }
}
