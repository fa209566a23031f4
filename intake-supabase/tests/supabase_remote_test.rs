//! Contract tests for SupabaseRemote against PostgREST and Supabase Auth.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/rest/v1/{table}` | `insert_*` |
//! | POST   | `/auth/v1/otp` | `send_otp_*` |
//! | POST   | `/auth/v1/verify` | `verify_otp_*` |

use intake_supabase::{SupabaseConfig, SupabaseRemote};
use intake_types::{RemoteError, RemoteStore, Table, TrackedEvent};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_remote(mock_server: &MockServer) -> SupabaseRemote {
    let mut config = SupabaseConfig::new(mock_server.uri(), "anon-test-key");
    config.timeout_secs = 5;
    SupabaseRemote::new(&config).unwrap()
}

// ── POST /rest/v1/{table} ────────────────────────────────────────────

#[tokio::test]
async fn insert_sends_array_body_with_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/signups"))
        .and(header("apikey", "anon-test-key"))
        .and(header("authorization", "Bearer anon-test-key"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{"name": "Jo", "email": "jo@example.com", "source": "waitlist"}])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": "8f14e45f-ea10-4c1b-9a44-5a3a2b6a7c01", "name": "Jo"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let receipt = remote
        .insert_record(
            Table::Signups,
            &json!({"name": "Jo", "email": "jo@example.com", "source": "waitlist"}),
        )
        .await
        .unwrap();
    assert_eq!(
        receipt.id.as_deref(),
        Some("8f14e45f-ea10-4c1b-9a44-5a3a2b6a7c01")
    );
}

#[tokio::test]
async fn insert_numeric_id_becomes_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/survey_responses"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": 42}])))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let receipt = remote
        .insert_record(Table::SurveyResponses, &json!({"tech_comfort": 3}))
        .await
        .unwrap();
    assert_eq!(receipt.id.as_deref(), Some("42"));
}

#[tokio::test]
async fn insert_empty_representation_has_no_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/collaborator_submissions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let receipt = remote
        .insert_record(Table::CollaboratorSubmissions, &json!({}))
        .await
        .unwrap();
    assert_eq!(receipt.id, None);
}

#[tokio::test]
async fn insert_handles_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/signups"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let err = remote
        .insert_record(Table::Signups, &json!({}))
        .await
        .unwrap_err();
    match err {
        RemoteError::Rejected { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "duplicate key value violates unique constraint");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn insert_unreachable_backend_is_transport_error() {
    let config = SupabaseConfig::new("http://127.0.0.1:9", "anon-test-key");
    let remote = SupabaseRemote::new(&config).unwrap();

    let err = remote
        .insert_record(Table::Signups, &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)), "{err:?}");
}

// ── POST /auth/v1/otp ────────────────────────────────────────────────

#[tokio::test]
async fn send_otp_posts_phone() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/otp"))
        .and(body_json(json!({"phone": "+15550100"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    remote.send_otp("+15550100").await.unwrap();
}

#[tokio::test]
async fn send_otp_handles_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/otp"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "Invalid phone number format"
        })))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let err = remote.send_otp("12").await.unwrap_err();
    assert!(
        matches!(err, RemoteError::Rejected { status: 422, ref message } if message == "Invalid phone number format")
    );
}

// ── POST /auth/v1/verify ─────────────────────────────────────────────

#[tokio::test]
async fn verify_otp_returns_user_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .and(body_json(json!({"phone": "+15550100", "token": "123456", "type": "sms"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "user": {"id": "d0e1f2a3-0000-4000-8000-000000000001", "phone": "15550100"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let identity = remote.verify_otp("+15550100", "123456").await.unwrap();
    assert_eq!(identity.as_str(), "d0e1f2a3-0000-4000-8000-000000000001");
}

#[tokio::test]
async fn verify_otp_rejected_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "access_denied",
            "error_description": "Token has expired or is invalid"
        })))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let err = remote.verify_otp("+15550100", "000000").await.unwrap_err();
    assert!(
        matches!(err, RemoteError::Rejected { status: 403, ref message } if message == "Token has expired or is invalid")
    );
}

#[tokio::test]
async fn verify_otp_without_user_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": null})))
        .mount(&mock_server)
        .await;

    let remote = test_remote(&mock_server);
    let err = remote.verify_otp("+15550100", "123456").await.unwrap_err();
    assert!(err.is_unexpected());
}

// ── analytics ────────────────────────────────────────────────────────

#[tokio::test]
async fn track_event_is_logged_without_a_request() {
    let mock_server = MockServer::start().await;

    let remote = test_remote(&mock_server);
    remote
        .track_event(TrackedEvent::new("Lead").with("source", "waitlist"))
        .await;

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
