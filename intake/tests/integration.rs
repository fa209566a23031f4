//! Integration tests for intake

use intake::{
    Field, FieldError, Failure, Notice, NoticeKind, RecordingRemote, STEP_COUNT, SurveySession, Table,
    Transition, VerificationStep,
};
use serde_json::json;

fn answered(remote: RecordingRemote) -> SurveySession<RecordingRemote> {
    let mut session = SurveySession::new(remote);
    let text_answers = [
        (Field::Name, "Ada Lovelace"),
        (Field::Email, "ada@example.com"),
        (Field::Country, "United States"),
        (Field::State, "Ohio"),
        (Field::Zipcode, "43004"),
        (Field::EmotionalChallenges, "Juggling work and care"),
        (Field::WhatWouldSupport, "A night off now and then"),
        (Field::AiHelpfulSupport, "Medication reminders"),
        (Field::AiComfort, "4"),
        (Field::HumanServicesOpenness, "yes"),
        (Field::UrgencyLevel, "ongoing"),
        (Field::FinalThoughts, "Thank you for listening"),
    ];
    for (field, value) in text_answers {
        session.update_field(field, value).unwrap();
    }
    session.toggle(Field::WhoCaringFor, "parent", true).unwrap();
    session.toggle(Field::CommunicationPreference, "text", true).unwrap();
    session.toggle(Field::CommunicationPreference, "email", true).unwrap();
    session
}

async fn walk_to_last_step(session: &mut SurveySession<RecordingRemote>) {
    for expected in 1..STEP_COUNT {
        assert_eq!(session.next().await, Transition::Advanced { step: expected });
    }
    assert_eq!(session.step(), STEP_COUNT - 1);
}

#[tokio::test]
async fn test_full_walk_submits_once() {
    let remote = RecordingRemote::new();
    let mut session = answered(remote.clone());

    walk_to_last_step(&mut session).await;
    assert!(remote.inserts().is_empty());

    let Transition::Submitted { receipt, celebration } = session.next().await else {
        panic!("expected submission");
    };
    assert_eq!(receipt.id.as_deref(), Some("row-1"));
    assert_eq!(celebration.particle_count, 100);
    assert_eq!(session.step(), STEP_COUNT);
    assert!(session.is_complete());

    let records = remote.records(Table::SurveyResponses);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["relationship"], json!("parent"));
    assert_eq!(records[0]["support_areas"], json!(["text", "email"]));
    assert_eq!(records[0]["tech_comfort"], json!(4));
    assert!(records[0].get("user_id").is_none());

    let names = remote.event_names();
    assert_eq!(names.len(), STEP_COUNT);
    assert!(names[..STEP_COUNT - 1].iter().all(|n| n == "survey_step_completed"));
    assert_eq!(names[STEP_COUNT - 1], "survey_submission_success");
}

#[tokio::test]
async fn test_terminal_state_is_sticky() {
    let remote = RecordingRemote::new();
    let mut session = answered(remote.clone());
    walk_to_last_step(&mut session).await;
    assert!(matches!(session.next().await, Transition::Submitted { .. }));

    assert_eq!(session.next().await, Transition::AlreadyComplete);
    assert_eq!(session.previous(), Transition::AlreadyComplete);
    assert_eq!(session.step(), STEP_COUNT);
    assert_eq!(remote.inserts().len(), 1);
}

#[tokio::test]
async fn test_phone_number_triggers_verification_before_insert() {
    let remote = RecordingRemote::new().with_identity("user-7");
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "+1 (555) 010-0199").unwrap();

    walk_to_last_step(&mut session).await;
    assert_eq!(
        session.next().await,
        Transition::VerificationRequired {
            phone: "+1 (555) 010-0199".to_string()
        }
    );
    assert!(remote.inserts().is_empty());
    assert_eq!(session.next().await, Transition::AwaitingVerification);
    assert_eq!(session.previous(), Transition::AwaitingVerification);

    assert_eq!(session.send_code().await, Transition::CodeSent);
    assert_eq!(
        session.verification().map(|v| v.step()),
        Some(VerificationStep::Otp)
    );

    let _ = session.enter_code("12-34-56");
    assert!(matches!(session.verify_code().await, Transition::Submitted { .. }));

    let records = remote.records(Table::SurveyResponses);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["user_id"], json!("user-7"));
    assert_eq!(records[0]["phone_number"], json!("+1 (555) 010-0199"));
    assert_eq!(
        remote.verified_codes(),
        vec![("+1 (555) 010-0199".to_string(), "123456".to_string())]
    );

    let success = remote.events().pop().unwrap();
    assert_eq!(success.property("user_verified"), Some(&json!(true)));
}

#[tokio::test]
async fn test_skip_from_otp_submits_without_identity() {
    let remote = RecordingRemote::new();
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "5550100").unwrap();

    walk_to_last_step(&mut session).await;
    assert!(matches!(
        session.next().await,
        Transition::VerificationRequired { .. }
    ));
    assert_eq!(session.send_code().await, Transition::CodeSent);

    assert!(matches!(
        session.skip_verification().await,
        Transition::Submitted { .. }
    ));
    assert!(session.verification().is_none());

    let records = remote.records(Table::SurveyResponses);
    assert_eq!(records.len(), 1);
    assert!(records[0].get("user_id").is_none());
}

#[tokio::test]
async fn test_wrong_code_keeps_verification_open() {
    let remote = RecordingRemote::new().failing_verify();
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "5550100").unwrap();
    walk_to_last_step(&mut session).await;
    let _ = session.next().await;
    let _ = session.send_code().await;

    let _ = session.enter_code("999999");
    let Transition::Rejected(notice) = session.verify_code().await else {
        panic!("expected rejection");
    };
    assert_eq!(notice.message, "Invalid verification code. Please try again.");
    assert_eq!(session.verification().map(|v| v.code()), Some("999999"));
    assert!(remote.inserts().is_empty());
}

#[tokio::test]
async fn test_failed_insert_stays_on_last_step_and_retries() {
    let remote = RecordingRemote::new().with_insert_failure(Failure::Rejected);
    let mut session = answered(remote.clone());
    walk_to_last_step(&mut session).await;

    assert_eq!(
        session.next().await,
        Transition::SubmissionFailed(Notice::error(
            "Submission Failed",
            "There was an error submitting your survey. Please try again."
        ))
    );
    assert_eq!(session.step(), STEP_COUNT - 1);

    assert!(matches!(session.next().await, Transition::Submitted { .. }));
    assert_eq!(session.step(), STEP_COUNT);
    assert_eq!(remote.inserts().len(), 2);
    assert_eq!(
        remote
            .event_names()
            .iter()
            .filter(|n| n.starts_with("survey_submission"))
            .collect::<Vec<_>>(),
        vec!["survey_submission_failed", "survey_submission_success"]
    );
}

#[tokio::test]
async fn test_verified_identity_survives_failed_insert() {
    let remote = RecordingRemote::new()
        .with_identity("user-9")
        .with_insert_failure(Failure::Transport);
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "5550100").unwrap();
    walk_to_last_step(&mut session).await;
    let _ = session.next().await;
    let _ = session.send_code().await;
    let _ = session.enter_code("123456");

    assert!(matches!(
        session.verify_code().await,
        Transition::SubmissionFailed(_)
    ));
    // Retrying goes straight to submission, no second verification.
    assert!(matches!(session.next().await, Transition::Submitted { .. }));
    assert_eq!(remote.sent_codes().len(), 1);
    assert_eq!(remote.records(Table::SurveyResponses)[1]["user_id"], json!("user-9"));
}

#[tokio::test]
async fn test_previous_never_validates_and_floors_at_zero() {
    let mut session = answered(RecordingRemote::new());
    for _ in 0..3 {
        let _ = session.next().await;
    }
    session.update_field(Field::EmotionalChallenges, "").unwrap();

    assert_eq!(session.previous(), Transition::Retreated { step: 2 });
    assert_eq!(session.previous(), Transition::Retreated { step: 1 });
    assert_eq!(session.previous(), Transition::Retreated { step: 0 });
    assert_eq!(session.previous(), Transition::Retreated { step: 0 });
}

#[tokio::test]
async fn test_content_filter_blocks_reflection_step() {
    let mut session = answered(RecordingRemote::new());
    session
        .update_field(Field::EmotionalChallenges, "Some days are just hell")
        .unwrap();
    let _ = session.next().await;
    let _ = session.next().await;
    assert_eq!(session.step(), 2);

    let Transition::Rejected(notice) = session.next().await else {
        panic!("expected rejection");
    };
    assert_eq!(notice.kind, NoticeKind::Validation);
    assert!(notice.message.starts_with("Please use respectful language"));
    assert_eq!(session.step(), 2);
}

#[tokio::test]
async fn test_other_requires_free_text() {
    let mut session = answered(RecordingRemote::new());
    let _ = session.next().await;
    session.toggle(Field::WhoCaringFor, "other", true).unwrap();

    let Transition::Rejected(notice) = session.next().await else {
        panic!("expected rejection");
    };
    assert_eq!(notice.message, "Please specify your other caregiving relationship");

    session.update_field(Field::OtherWhoCaringFor, "My neighbour's kids").unwrap();
    assert_eq!(session.next().await, Transition::Advanced { step: 2 });
}

#[tokio::test]
async fn test_changing_country_requires_state_again() {
    let mut session = answered(RecordingRemote::new());
    session.update_field(Field::Country, "India").unwrap();
    assert_eq!(session.answers().text(Field::State), "");
    assert_eq!(session.answers().text(Field::Zipcode), "");

    let Transition::Rejected(notice) = session.next().await else {
        panic!("expected rejection");
    };
    assert_eq!(notice.message, "Please select your state");

    session.update_field(Field::State, "Kerala").unwrap();
    assert_eq!(session.next().await, Transition::Advanced { step: 1 });
}

#[tokio::test]
async fn test_skip_from_phone_submits_without_identity() {
    let remote = RecordingRemote::new();
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "5550100").unwrap();

    walk_to_last_step(&mut session).await;
    assert!(matches!(
        session.next().await,
        Transition::VerificationRequired { .. }
    ));
    assert!(matches!(
        session.skip_verification().await,
        Transition::Submitted { .. }
    ));

    assert!(remote.sent_codes().is_empty());
    let records = remote.records(Table::SurveyResponses);
    assert_eq!(records.len(), 1);
    assert!(records[0].get("user_id").is_none());
}

#[tokio::test]
async fn test_answers_locked_while_verifying() {
    let remote = RecordingRemote::new().with_identity("owner-of-5550100");
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "+15550100").unwrap();
    walk_to_last_step(&mut session).await;
    let _ = session.next().await;

    let err = session.update_field(Field::PhoneNumber, "not a phone").unwrap_err();
    assert!(matches!(err, FieldError::Locked(Field::PhoneNumber)));
    let err = session.update_field(Field::Name, "").unwrap_err();
    assert!(matches!(err, FieldError::Locked(Field::Name)));
    let err = session.toggle(Field::WhoCaringFor, "spouse", true).unwrap_err();
    assert!(matches!(err, FieldError::Locked(Field::WhoCaringFor)));

    assert_eq!(session.send_code().await, Transition::CodeSent);
    let _ = session.enter_code("123456");
    assert!(matches!(session.verify_code().await, Transition::Submitted { .. }));

    assert_eq!(remote.sent_codes(), vec!["+15550100".to_string()]);
    let records = remote.records(Table::SurveyResponses);
    assert_eq!(records[0]["phone_number"], json!("+15550100"));
    assert_eq!(records[0]["user_id"], json!("owner-of-5550100"));
    assert!(
        records[0]["additional_comments"]
            .as_str()
            .unwrap()
            .starts_with("Name: Ada Lovelace,")
    );
}

#[tokio::test]
async fn test_edits_after_failed_insert_are_checked_again() {
    let remote = RecordingRemote::new().with_insert_failure(Failure::Rejected);
    let mut session = answered(remote.clone());
    walk_to_last_step(&mut session).await;
    assert!(matches!(
        session.next().await,
        Transition::SubmissionFailed(_)
    ));

    session.update_field(Field::Name, "").unwrap();
    let Transition::Rejected(notice) = session.next().await else {
        panic!("expected rejection");
    };
    assert_eq!(
        notice.message,
        "Please fill in all required fields: Name, Email, and Country"
    );
    assert_eq!(session.step(), 0);
    assert_eq!(remote.inserts().len(), 1);
}

#[tokio::test]
async fn test_changed_phone_needs_fresh_verification() {
    let remote = RecordingRemote::new()
        .with_identity("user-9")
        .with_insert_failure(Failure::Transport);
    let mut session = answered(remote.clone());
    session.update_field(Field::PhoneNumber, "5550100").unwrap();
    walk_to_last_step(&mut session).await;
    let _ = session.next().await;
    let _ = session.send_code().await;
    let _ = session.enter_code("123456");
    assert!(matches!(
        session.verify_code().await,
        Transition::SubmissionFailed(_)
    ));
    assert!(session.identity().is_some());

    session.update_field(Field::PhoneNumber, "5550111").unwrap();
    assert!(session.identity().is_none());
    assert_eq!(
        session.next().await,
        Transition::VerificationRequired {
            phone: "5550111".to_string()
        }
    );
    assert_eq!(remote.inserts().len(), 1);
}
