use async_trait::async_trait;
use serde_json::Value;

use crate::{InsertReceipt, RemoteError, Table, TrackedEvent, VerifiedIdentity};

/// Trait for the hosted backend that stores submissions and verifies phones.
///
/// Implementations decide how to reach the backend (HTTP, in-memory, ...).
/// Every call is awaited to completion by the caller; implementations do not
/// retry on their own.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert one record into `table`.
    ///
    /// # Returns
    /// * `Ok(receipt)` once the backend accepted the row
    /// * `Err` if the backend refused it or could not be reached
    async fn insert_record(&self, table: Table, record: &Value) -> Result<InsertReceipt, RemoteError>;

    /// Ask the backend to text a one-time code to `phone`.
    async fn send_otp(&self, phone: &str) -> Result<(), RemoteError>;

    /// Exchange the code texted to `phone` for a verified identity.
    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifiedIdentity, RemoteError>;

    /// Record an analytics event.
    ///
    /// Best-effort: callers never wait on the outcome and failures are
    /// swallowed. The default implementation only logs the event.
    async fn track_event(&self, event: TrackedEvent) {
        let properties = Value::Object(event.properties);
        tracing::info!(
            event = %event.name,
            properties = %properties,
            "analytics event"
        );
    }
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for std::sync::Arc<T> {
    async fn insert_record(&self, table: Table, record: &Value) -> Result<InsertReceipt, RemoteError> {
        (**self).insert_record(table, record).await
    }

    async fn send_otp(&self, phone: &str) -> Result<(), RemoteError> {
        (**self).send_otp(phone).await
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifiedIdentity, RemoteError> {
        (**self).verify_otp(phone, code).await
    }

    async fn track_event(&self, event: TrackedEvent) {
        (**self).track_event(event).await
    }
}
