//! In-memory remote store for running flows without a backend.
//!
//! `RecordingRemote` accepts every call, remembers it, and can be told to
//! fail specific operations. Clones share the same recording, so a test can
//! hand one clone to a session and inspect another.
//!
//! # Example
//!
//! ```rust,ignore
//! use intake::{RecordingRemote, SurveySession};
//!
//! let remote = RecordingRemote::new().with_insert_failure(Failure::Rejected);
//! let mut session = SurveySession::new(remote.clone());
//! // ... drive the session ...
//! assert_eq!(remote.inserts().len(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use intake_types::{
    InsertReceipt, RemoteError, RemoteStore, Table, TrackedEvent, VerifiedIdentity,
};

/// How a scripted call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The backend answers with an error status.
    Rejected,
    /// The backend cannot be reached.
    Transport,
    /// Something outside the protocol went wrong.
    Unexpected,
}

impl Failure {
    fn into_error(self, operation: &str) -> RemoteError {
        match self {
            Self::Rejected => RemoteError::rejected(400, format!("{operation} rejected")),
            Self::Transport => RemoteError::Transport(format!("{operation}: connection refused")),
            Self::Unexpected => RemoteError::unexpected(anyhow::anyhow!("{operation} blew up")),
        }
    }
}

#[derive(Debug, Default)]
struct Recording {
    inserts: Vec<(Table, Value)>,
    sent_codes: Vec<String>,
    verified_codes: Vec<(String, String)>,
    events: Vec<TrackedEvent>,
    insert_failures: VecDeque<Failure>,
}

/// A remote store that records calls instead of making them.
#[derive(Debug, Clone)]
pub struct RecordingRemote {
    recording: Arc<Mutex<Recording>>,
    identity: VerifiedIdentity,
    send_failure: Option<Failure>,
    verify_failure: Option<Failure>,
}

impl Default for RecordingRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRemote {
    /// Create a store where every call succeeds.
    pub fn new() -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            identity: VerifiedIdentity::new("recorded-user"),
            send_failure: None,
            verify_failure: None,
        }
    }

    /// Use `id` as the identity returned by successful verifications.
    pub fn with_identity(mut self, id: impl Into<String>) -> Self {
        self.identity = VerifiedIdentity::new(id);
        self
    }

    /// Fail the next insert that has not already been scripted to fail.
    ///
    /// Calls queue up: two calls fail the next two inserts.
    pub fn with_insert_failure(self, failure: Failure) -> Self {
        self.recording.lock().insert_failures.push_back(failure);
        self
    }

    /// Fail every `send_otp`.
    pub fn failing_send(mut self) -> Self {
        self.send_failure = Some(Failure::Rejected);
        self
    }

    /// Fail every `verify_otp`.
    pub fn failing_verify(mut self) -> Self {
        self.verify_failure = Some(Failure::Rejected);
        self
    }

    /// Every insert attempt, successful or not, in order.
    pub fn inserts(&self) -> Vec<(Table, Value)> {
        self.recording.lock().inserts.clone()
    }

    /// Records inserted into `table`.
    pub fn records(&self, table: Table) -> Vec<Value> {
        self.recording
            .lock()
            .inserts
            .iter()
            .filter(|(t, _)| *t == table)
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Phone numbers a code was requested for.
    pub fn sent_codes(&self) -> Vec<String> {
        self.recording.lock().sent_codes.clone()
    }

    /// `(phone, code)` pairs submitted for verification.
    pub fn verified_codes(&self) -> Vec<(String, String)> {
        self.recording.lock().verified_codes.clone()
    }

    /// Tracked events, in order.
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.recording.lock().events.clone()
    }

    /// Names of tracked events, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.recording
            .lock()
            .events
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }
}

#[async_trait]
impl RemoteStore for RecordingRemote {
    async fn insert_record(&self, table: Table, record: &Value) -> Result<InsertReceipt, RemoteError> {
        let mut recording = self.recording.lock();
        recording.inserts.push((table, record.clone()));
        if let Some(failure) = recording.insert_failures.pop_front() {
            return Err(failure.into_error("insert"));
        }
        Ok(InsertReceipt::with_id(format!("row-{}", recording.inserts.len())))
    }

    async fn send_otp(&self, phone: &str) -> Result<(), RemoteError> {
        self.recording.lock().sent_codes.push(phone.to_string());
        match self.send_failure {
            Some(failure) => Err(failure.into_error("send_otp")),
            None => Ok(()),
        }
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifiedIdentity, RemoteError> {
        self.recording
            .lock()
            .verified_codes
            .push((phone.to_string(), code.to_string()));
        match self.verify_failure {
            Some(failure) => Err(failure.into_error("verify_otp")),
            None => Ok(self.identity.clone()),
        }
    }

    async fn track_event(&self, event: TrackedEvent) {
        tracing::debug!(event = %event.name, "recorded analytics event");
        self.recording.lock().events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn clones_share_the_recording() {
        let remote = RecordingRemote::new();
        let handle = remote.clone();

        let receipt = remote
            .insert_record(Table::Signups, &json!({"name": "Ada"}))
            .await
            .unwrap();
        assert_eq!(receipt.id.as_deref(), Some("row-1"));
        assert_eq!(handle.records(Table::Signups), vec![json!({"name": "Ada"})]);
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let remote = RecordingRemote::new()
            .with_insert_failure(Failure::Rejected)
            .with_insert_failure(Failure::Unexpected);

        let first = remote.insert_record(Table::Signups, &json!({})).await.unwrap_err();
        assert!(matches!(first, RemoteError::Rejected { status: 400, .. }));
        let second = remote.insert_record(Table::Signups, &json!({})).await.unwrap_err();
        assert!(second.is_unexpected());
        assert!(remote.insert_record(Table::Signups, &json!({})).await.is_ok());
        assert_eq!(remote.inserts().len(), 3);
    }

    #[tokio::test]
    async fn events_are_recorded() {
        let remote = RecordingRemote::new();
        remote.track_event(TrackedEvent::new("Lead").with("source", "waitlist")).await;
        assert_eq!(remote.event_names(), vec!["Lead"]);
        assert_eq!(remote.events()[0].property("source"), Some(&json!("waitlist")));
    }
}
